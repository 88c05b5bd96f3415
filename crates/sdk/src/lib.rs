//! Native-host side of FlowKit.
//!
//! A host app configures [`FlowKit`] with its app id, asks the
//! [`OnboardingPresenter`] whether onboarding should be shown, loads the
//! viewer URL in a web view, and feeds the page's bridge messages and load
//! errors to a [`BridgeController`], which drives the app through the
//! [`NativeHost`] trait. [`OnboardingService`] fetches the published flow
//! document directly.

pub mod bridge;
pub mod config;
pub mod error;
pub mod presenter;
pub mod service;

pub use bridge::{AlertAction, BridgeController, HostAction, LoadAlert, NativeHost};
pub use config::FlowKit;
pub use error::{FetchError, LoadFailure, LoadFailureKind, SdkError};
pub use presenter::{OnboardingPresenter, PresentRequest};
pub use service::OnboardingService;
