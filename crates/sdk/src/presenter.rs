//! Show-once presentation gate.
//!
//! Attached to the host's first screen; the first appearance schedules the
//! onboarding presentation after a short delay, later appearances do
//! nothing.

use std::time::Duration;

use reqwest::Url;

use crate::config::FlowKit;
use crate::error::SdkError;

/// Delay between the first appearance and the presentation.
pub const DEFAULT_PRESENT_DELAY: Duration = Duration::from_millis(500);

/// The presentation the host should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentRequest {
    pub url: Url,
    pub delay: Duration,
    /// Always full screen.
    pub full_screen: bool,
}

#[derive(Debug, Clone)]
pub struct OnboardingPresenter {
    delay: Duration,
    has_shown: bool,
}

impl Default for OnboardingPresenter {
    fn default() -> Self {
        Self::new(DEFAULT_PRESENT_DELAY)
    }
}

impl OnboardingPresenter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            has_shown: false,
        }
    }

    pub fn has_shown(&self) -> bool {
        self.has_shown
    }

    /// Called whenever the host view appears.
    ///
    /// The first call consumes the single showing even when it fails, so a
    /// missing configuration is reported once rather than on every
    /// appearance.
    pub fn on_appear(&mut self, kit: &FlowKit) -> Result<Option<PresentRequest>, SdkError> {
        if self.has_shown {
            return Ok(None);
        }
        self.has_shown = true;

        let url = kit.onboarding_url().inspect_err(|e| {
            tracing::error!(error = %e, "Cannot show onboarding");
        })?;
        tracing::debug!(%url, delay_ms = self.delay.as_millis() as u64, "Scheduling onboarding");
        Ok(Some(PresentRequest {
            url,
            delay: self.delay,
            full_screen: true,
        }))
    }
}
