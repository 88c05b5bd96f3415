use std::fmt;

/// Errors from configuring or presenting onboarding.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Onboarding was requested before `FlowKit::configure`.
    #[error("FlowKit is not configured: call FlowKit::configure before showing onboarding")]
    NotConfigured,

    #[error("Invalid app id: {0}")]
    InvalidAppId(String),

    #[error("Invalid onboarding URL: {0}")]
    InvalidUrl(String),
}

/// Errors from fetching a published flow.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid flow URL: {0}")]
    InvalidUrl(String),

    /// The service answered with a non-2xx status.
    #[error("Flow service error ({status})")]
    ServerError { status: u16 },

    /// The service answered 2xx with an empty body.
    #[error("Flow service returned no data")]
    NoData,

    #[error("Could not decode flow: {0}")]
    Decoding(#[from] serde_json::Error),

    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("Flow request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// How this failure should be reported to the user, if it is a
    /// connectivity problem rather than a server or data problem.
    pub fn load_failure(&self) -> Option<LoadFailure> {
        match self {
            Self::Transport(err) => Some(LoadFailure::from_transport(err)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Load failures
// ---------------------------------------------------------------------------

/// Cause of a failed page load, as reported by the host's web view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailureKind {
    NotConnected,
    CannotFindHost,
    CannotConnectToHost,
    TimedOut,
    Other,
}

impl LoadFailureKind {
    /// User-facing summary for this cause.
    pub fn message(self) -> &'static str {
        match self {
            Self::NotConnected => "No internet connection",
            Self::CannotFindHost | Self::CannotConnectToHost => "Could not connect to server",
            Self::TimedOut => "Connection timed out",
            Self::Other => "Failed to load onboarding",
        }
    }
}

/// A classified page-load failure plus the underlying description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub kind: LoadFailureKind,
    pub detail: Option<String>,
}

impl LoadFailure {
    pub fn new(kind: LoadFailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: Some(detail.into()),
        }
    }

    /// Classify a transport error from the HTTP client.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            LoadFailureKind::TimedOut
        } else if err.is_connect() {
            LoadFailureKind::CannotConnectToHost
        } else {
            LoadFailureKind::Other
        };
        Self::new(kind, err.to_string())
    }

    pub fn message(&self) -> &'static str {
        self.kind.message()
    }

    /// `"<summary>: <detail>"`, or just the summary when there is no detail.
    pub fn alert_message(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{}: {detail}", self.message()),
            None => self.message().to_string(),
        }
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.alert_message())
    }
}

impl std::error::Error for LoadFailure {}
