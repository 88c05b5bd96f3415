//! Domain core for the FlowKit onboarding editor.
//!
//! Everything in this crate is synchronous and free of I/O: the slide and
//! flow document model, style resolution, editor state, preview navigation
//! and animation, response capture, the native bridge message contract and
//! the view-tree renderer. The HTTP service and the native SDK are thin
//! shells around these modules.

pub mod animation;
pub mod app_id;
pub mod bridge;
pub mod editor;
pub mod error;
pub mod navigation;
pub mod preview;
pub mod render;
pub mod resolve;
pub mod response;
pub mod slide;
pub mod snippets;
pub mod style;
pub mod types;
