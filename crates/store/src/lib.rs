//! Storage seams for FlowKit: published flows keyed by app id, and the
//! small file-backed cache that keeps the editor's app id across restarts.

pub mod app_id_cache;
pub mod error;
pub mod flow_repo;

pub use app_id_cache::{AppIdCache, APP_ID_KEY};
pub use error::StoreError;
pub use flow_repo::{FlowRepository, InMemoryFlowRepo};
