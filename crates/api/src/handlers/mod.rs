//! Request handlers.
//!
//! JSON handlers live in [`editor`] and [`flows`] and map failures through
//! [`AppError`]; [`pages`] returns rendered HTML.

pub mod editor;
pub mod flows;
pub mod pages;

use flowkit_core::app_id::AppId;

use crate::error::{AppError, AppResult};

/// Validate an app id taken from a path segment.
pub(crate) fn parse_app_id(raw: &str) -> AppResult<AppId> {
    Ok(AppId::parse(raw)?)
}

pub(crate) fn session_not_found(app_id: &AppId) -> AppError {
    AppError::NotFound(format!("Editor session {app_id} not found"))
}
