//! Preview navigation: which slide is on screen and what "Continue" does.
//!
//! The previewed index is tracked separately from the editor's selection.
//! In the editor the two coincide; the standalone viewer moves through the
//! flow on its own.

use serde::Serialize;

use crate::bridge::BridgeMessage;
use crate::resolve::{progress_value, ResolvedStyle};

/// How the preview is being presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreviewMode {
    /// Inside the editor's simulated phone frame.
    #[default]
    Editor,
    /// The standalone viewer page in a browser.
    Standalone,
    /// Full screen inside the native WebView (`?sdk=ios`), controls hidden.
    Embedded,
}

impl PreviewMode {
    pub fn is_embedded(self) -> bool {
        self == Self::Embedded
    }

    /// Whether editor-only controls (replay, frame chrome) are shown.
    pub fn shows_controls(self) -> bool {
        !self.is_embedded()
    }
}

/// Text of the local notice shown when a flow finishes outside the SDK.
pub const COMPLETION_TOAST: &str = "Onboarding complete";

/// How the end of a flow is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum CompletionSignal {
    Bridge(BridgeMessage),
    Toast(String),
}

impl CompletionSignal {
    pub fn for_mode(mode: PreviewMode) -> Self {
        if mode.is_embedded() {
            Self::Bridge(BridgeMessage::Complete)
        } else {
            Self::Toast(COMPLETION_TOAST.to_string())
        }
    }
}

/// Result of tapping the continue button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ContinueOutcome {
    Advanced { index: usize },
    Completed { signal: CompletionSignal },
    /// There is nothing to continue from.
    Empty,
}

/// Cursor over a flow's slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreviewNavigator {
    index: usize,
    len: usize,
}

impl PreviewNavigator {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Start at `index`, clamped into range.
    pub fn at(len: usize, index: usize) -> Self {
        let mut nav = Self::new(len);
        nav.jump_to(index);
        nav
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The previewed index, or `None` for an empty flow.
    pub fn current(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.index)
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        !self.is_empty() && self.index == self.len - 1
    }

    /// Adopt a new slide count, keeping the index in range.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.index = self.index.min(len.saturating_sub(1));
    }

    pub fn jump_to(&mut self, index: usize) {
        self.index = index.min(self.len.saturating_sub(1));
    }

    pub fn advance(&mut self) -> Option<usize> {
        if !self.is_empty() {
            self.index = (self.index + 1).min(self.len - 1);
        }
        self.current()
    }

    pub fn retreat(&mut self) -> Option<usize> {
        self.index = self.index.saturating_sub(1);
        self.current()
    }

    /// Progress bar value for the previewed slide.
    pub fn progress(&self, resolved: &ResolvedStyle) -> Option<u8> {
        self.current()
            .and_then(|index| progress_value(resolved, index, self.len))
    }

    /// Handle one tap on "Continue".
    ///
    /// On the last slide the flow completes and the index stays put; each
    /// call yields exactly one outcome.
    pub fn continue_tap(&mut self, mode: PreviewMode) -> ContinueOutcome {
        if self.is_empty() {
            return ContinueOutcome::Empty;
        }
        if self.is_last() {
            return ContinueOutcome::Completed {
                signal: CompletionSignal::for_mode(mode),
            };
        }
        self.index += 1;
        ContinueOutcome::Advanced { index: self.index }
    }
}
