//! Message contract between the web preview and a native host.
//!
//! The web content posts `{ "action": ... }` objects over the
//! [`HANDLER_NAME`] channel; the host answers once, after page load, with a
//! [`HostHello`] identifying itself.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::CoreError;

/// Name of the script message channel the host listens on.
pub const HANDLER_NAME: &str = "flowKitHandler";

/// `source` value the host uses when introducing itself to the page.
pub const HOST_SOURCE: &str = "FlowKit-iOS";

/// Query flag that puts the standalone viewer in embedded mode.
pub const SDK_QUERY_VALUE: &str = "ios";

/// An action sent from the web content to the native host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeMessage {
    /// Dismiss the presentation.
    Close,
    /// The flow finished; notify the app, then dismiss.
    Complete,
    /// Dismiss; `destination` is advisory.
    Navigate { destination: String },
    /// An action this build does not recognize.
    Unknown(String),
}

impl BridgeMessage {
    /// Parse a message body. Bodies without a string `action` are invalid.
    pub fn from_json(body: &Value) -> Result<Self, CoreError> {
        let action = body
            .get("action")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                CoreError::Validation("Bridge message must carry a string 'action'".to_string())
            })?;

        Ok(match action {
            "close" => Self::Close,
            "complete" => Self::Complete,
            "navigate" => {
                let destination = body
                    .get("destination")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        CoreError::Validation(
                            "Navigate message requires a string 'destination'".to_string(),
                        )
                    })?;
                Self::Navigate {
                    destination: destination.to_string(),
                }
            }
            other => Self::Unknown(other.to_string()),
        })
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Close => json!({ "action": "close" }),
            Self::Complete => json!({ "action": "complete" }),
            Self::Navigate { destination } => {
                json!({ "action": "navigate", "destination": destination })
            }
            Self::Unknown(action) => json!({ "action": action }),
        }
    }
}

impl Serialize for BridgeMessage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Posted by the host to the page once it finishes loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostHello {
    pub source: String,
    pub app_id: String,
}

impl HostHello {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            source: HOST_SOURCE.to_string(),
            app_id: app_id.into(),
        }
    }
}
