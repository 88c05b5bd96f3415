//! REST client for the published-flow endpoint.
//!
//! Wraps `GET /api/v1/flows/{app_id}` using [`reqwest`] and unwraps the
//! service's `{ "data": ... }` envelope.

use flowkit_core::app_id::AppId;
use flowkit_core::slide::OnboardingFlow;
use reqwest::Url;
use serde::Deserialize;

use crate::error::FetchError;

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// HTTP client for one FlowKit service.
#[derive(Debug, Clone)]
pub struct OnboardingService {
    client: reqwest::Client,
    base_url: String,
}

impl OnboardingService {
    /// * `base_url` - Service origin, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] (timeouts, pooling).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn flow_url(&self, app_id: &AppId) -> Result<Url, FetchError> {
        let raw = format!("{}/api/v1/flows/{app_id}", self.base_url);
        Url::parse(&raw).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// Fetch the published flow for `app_id`.
    pub async fn fetch_flow(&self, app_id: &AppId) -> Result<OnboardingFlow, FetchError> {
        let url = self.flow_url(app_id)?;
        tracing::debug!(%url, "Fetching onboarding flow");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(app_id = %app_id, status = status.as_u16(), "Flow fetch rejected");
            return Err(FetchError::ServerError {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(FetchError::NoData);
        }

        let envelope: DataEnvelope<OnboardingFlow> = serde_json::from_slice(&body)?;
        tracing::info!(app_id = %app_id, slides = envelope.data.slides.len(), "Onboarding flow fetched");
        Ok(envelope.data)
    }
}
