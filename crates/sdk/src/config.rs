//! SDK configuration and onboarding URL construction.

use std::fmt;
use std::sync::Arc;

use flowkit_core::app_id::AppId;
use flowkit_core::bridge::SDK_QUERY_VALUE;
use reqwest::Url;

use crate::error::{LoadFailure, SdkError};

/// Callback invoked with every page-load failure.
pub type ErrorHandler = Arc<dyn Fn(&LoadFailure) + Send + Sync>;

#[derive(Clone)]
struct Settings {
    app_id: AppId,
    base_url: String,
}

/// Host-side configuration. Starts unconfigured; onboarding cannot be
/// shown until [`FlowKit::configure`] succeeds.
#[derive(Clone, Default)]
pub struct FlowKit {
    settings: Option<Settings>,
    error_handler: Option<ErrorHandler>,
}

impl fmt::Debug for FlowKit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowKit")
            .field("app_id", &self.app_id().map(AppId::as_str))
            .field("base_url", &self.base_url())
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}

impl FlowKit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the app id and the viewer origin. The base URL must be absolute;
    /// a trailing slash is ignored.
    pub fn configure(&mut self, app_id: &str, base_url: &str) -> Result<(), SdkError> {
        let app_id = AppId::parse(app_id).map_err(|e| SdkError::InvalidAppId(e.to_string()))?;
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| SdkError::InvalidUrl(format!("{base_url}: {e}")))?;

        tracing::info!(app_id = %app_id, base_url = %base_url, "FlowKit configured");
        self.settings = Some(Settings { app_id, base_url });
        Ok(())
    }

    /// Register a callback for page-load failures.
    pub fn with_error_handler(
        mut self,
        handler: impl Fn(&LoadFailure) + Send + Sync + 'static,
    ) -> Self {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    pub fn is_configured(&self) -> bool {
        self.settings.is_some()
    }

    pub fn app_id(&self) -> Option<&AppId> {
        self.settings.as_ref().map(|s| &s.app_id)
    }

    pub fn base_url(&self) -> Option<&str> {
        self.settings.as_ref().map(|s| s.base_url.as_str())
    }

    pub fn error_handler(&self) -> Option<ErrorHandler> {
        self.error_handler.clone()
    }

    /// `{base}/{appId}?sdk=ios`, the page the web view loads.
    pub fn onboarding_url(&self) -> Result<Url, SdkError> {
        let settings = self.settings.as_ref().ok_or(SdkError::NotConfigured)?;
        let raw = format!(
            "{}/{}?sdk={SDK_QUERY_VALUE}",
            settings.base_url, settings.app_id
        );
        Url::parse(&raw).map_err(|e| SdkError::InvalidUrl(format!("{raw}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn unconfigured_has_no_url() {
        assert_matches!(FlowKit::new().onboarding_url(), Err(SdkError::NotConfigured));
    }

    #[test]
    fn url_uses_legacy_path_and_sdk_marker() {
        let mut kit = FlowKit::new();
        kit.configure("fitness-abc12345", "https://flows.example.com/")
            .unwrap();
        assert_eq!(
            kit.onboarding_url().unwrap().as_str(),
            "https://flows.example.com/fitness-abc12345?sdk=ios"
        );
    }

    #[test]
    fn configure_rejects_bad_input_and_keeps_previous_settings() {
        let mut kit = FlowKit::new();
        kit.configure("good-id", "http://localhost:3000").unwrap();

        assert_matches!(
            kit.configure("Bad Id", "http://localhost:3000"),
            Err(SdkError::InvalidAppId(_))
        );
        assert_matches!(
            kit.configure("other-id", "not a url"),
            Err(SdkError::InvalidUrl(_))
        );
        assert_eq!(kit.app_id().map(AppId::as_str), Some("good-id"));
    }
}
