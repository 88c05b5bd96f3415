//! Host-side handling of the web bridge.
//!
//! The platform shell owns the web view and forwards three kinds of events
//! here: script messages posted on the bridge channel, page-load completion
//! and page-load failure. [`BridgeController`] decides what happens and
//! drives the app through [`NativeHost`].

use flowkit_core::app_id::AppId;
use flowkit_core::bridge::{BridgeMessage, HostHello, HANDLER_NAME};
use reqwest::Url;
use serde_json::Value;

use crate::config::ErrorHandler;
use crate::error::LoadFailure;

/// What the platform shell must be able to do for the controller.
pub trait NativeHost {
    /// Close the onboarding presentation.
    fn dismiss(&mut self);

    /// Tell the app that onboarding finished.
    fn post_completion(&mut self);

    /// Load `url` in the web view.
    fn load(&mut self, url: &Url);

    /// Deliver a message to the page (`window.postMessage`).
    fn post_to_page(&mut self, message: &Value);

    /// Show a modal alert; the user's choice comes back through
    /// [`BridgeController::resolve_alert`].
    fn present_alert(&mut self, alert: &LoadAlert);
}

/// Buttons offered after a failed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    TryAgain,
    Cancel,
}

impl AlertAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::TryAgain => "Try Again",
            Self::Cancel => "Cancel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadAlert {
    pub title: &'static str,
    pub message: String,
    pub actions: [AlertAction; 2],
}

impl LoadAlert {
    pub fn for_failure(failure: &LoadFailure) -> Self {
        Self {
            title: "Error",
            message: failure.alert_message(),
            actions: [AlertAction::TryAgain, AlertAction::Cancel],
        }
    }
}

/// What the controller did with one bridge message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    Dismissed,
    CompletedAndDismissed,
    Navigated { destination: String },
    /// Unknown action or malformed body; logged only.
    Ignored,
}

pub struct BridgeController<H: NativeHost> {
    host: H,
    app_id: AppId,
    url: Url,
    error_handler: Option<ErrorHandler>,
}

impl<H: NativeHost> BridgeController<H> {
    pub fn new(host: H, app_id: AppId, url: Url) -> Self {
        Self {
            host,
            app_id,
            url,
            error_handler: None,
        }
    }

    pub fn with_error_handler(mut self, handler: Option<ErrorHandler>) -> Self {
        self.error_handler = handler;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Start loading the onboarding page.
    pub fn start(&mut self) {
        tracing::info!(url = %self.url, "Loading onboarding");
        self.host.load(&self.url);
    }

    /// Handle a script message. Messages on other channels are ignored.
    pub fn handle_message(&mut self, channel: &str, body: &Value) -> HostAction {
        if channel != HANDLER_NAME {
            return HostAction::Ignored;
        }

        let message = match BridgeMessage::from_json(body) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed bridge message");
                return HostAction::Ignored;
            }
        };

        match message {
            BridgeMessage::Close => {
                self.host.dismiss();
                HostAction::Dismissed
            }
            BridgeMessage::Complete => {
                tracing::info!(app_id = %self.app_id, "Onboarding completed");
                self.host.post_completion();
                self.host.dismiss();
                HostAction::CompletedAndDismissed
            }
            BridgeMessage::Navigate { destination } => {
                tracing::info!(destination = %destination, "Navigate requested");
                self.host.dismiss();
                HostAction::Navigated { destination }
            }
            BridgeMessage::Unknown(action) => {
                tracing::warn!(action = %action, "Unknown bridge action");
                HostAction::Ignored
            }
        }
    }

    /// The page finished loading: introduce the host.
    pub fn page_loaded(&mut self) {
        let hello = HostHello::new(self.app_id.as_str());
        match serde_json::to_value(&hello) {
            Ok(message) => self.host.post_to_page(&message),
            Err(e) => tracing::error!(error = %e, "Could not encode host hello"),
        }
    }

    /// The page failed to load: report it and ask the user what to do.
    pub fn load_failed(&mut self, failure: LoadFailure) {
        tracing::warn!(url = %self.url, error = %failure, "Onboarding failed to load");
        if let Some(handler) = &self.error_handler {
            handler(&failure);
        }
        self.host.present_alert(&LoadAlert::for_failure(&failure));
    }

    /// Apply the user's answer to a load-failure alert.
    pub fn resolve_alert(&mut self, action: AlertAction) {
        match action {
            AlertAction::TryAgain => self.host.load(&self.url),
            AlertAction::Cancel => self.host.dismiss(),
        }
    }
}
