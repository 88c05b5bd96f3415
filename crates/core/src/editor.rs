//! Editor state: the canonical flow document plus the selected slide.
//!
//! All mutations are synchronous replacements. Operations on ids that do
//! not exist are silent no-ops and report `false`; selection is re-derived
//! after deletes so it always names an existing slide or nothing.

use serde::Serialize;

use crate::error::CoreError;
use crate::slide::{OnboardingFlow, Slide, SlideType};
use crate::style::{GlobalStyles, StyleField};
use crate::types::{SlideId, SLIDE_ID_PREFIX};

/// Source of the numeric part of new slide ids.
///
/// The default clock uses wall-clock milliseconds; tests substitute a fixed
/// value to exercise collision handling.
pub type IdClock = fn() -> i64;

fn wall_clock_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// In-memory editing session over one [`OnboardingFlow`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    flow: OnboardingFlow,
    selected_slide_id: Option<SlideId>,
    #[serde(skip)]
    clock: IdClock,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(OnboardingFlow::default())
    }
}

impl EditorState {
    /// Start editing `flow`, selecting its first slide.
    pub fn new(flow: OnboardingFlow) -> Self {
        let selected_slide_id = flow.slides.first().map(|s| s.id.clone());
        Self {
            flow,
            selected_slide_id,
            clock: wall_clock_millis,
        }
    }

    pub fn with_clock(mut self, clock: IdClock) -> Self {
        self.clock = clock;
        self
    }

    // -- reads ------------------------------------------------------------

    pub fn flow(&self) -> &OnboardingFlow {
        &self.flow
    }

    pub fn slides(&self) -> &[Slide] {
        &self.flow.slides
    }

    pub fn slide(&self, id: &str) -> Option<&Slide> {
        self.flow.slide(id)
    }

    pub fn selected_slide_id(&self) -> Option<&str> {
        self.selected_slide_id.as_deref()
    }

    pub fn selected_slide(&self) -> Option<&Slide> {
        self.selected_slide_id
            .as_deref()
            .and_then(|id| self.flow.slide(id))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_slide_id
            .as_deref()
            .and_then(|id| self.flow.position(id))
    }

    // -- slide CRUD -------------------------------------------------------

    /// Append a new slide of `slide_type` with its content defaults and
    /// select it.
    pub fn add_slide(&mut self, slide_type: SlideType) -> &Slide {
        let id = self.allocate_id();
        let slide = Slide::with_type_defaults(id.clone(), slide_type);
        self.flow.slides.push(slide);
        self.selected_slide_id = Some(id);
        let last = self.flow.slides.len() - 1;
        &self.flow.slides[last]
    }

    /// Remove the slide with `id`. Returns whether a slide was removed.
    pub fn delete_slide(&mut self, id: &str) -> bool {
        let Some(pos) = self.flow.position(id) else {
            return false;
        };
        self.flow.slides.remove(pos);

        if self.selected_slide_id.as_deref() == Some(id) {
            self.selected_slide_id = self.flow.slides.first().map(|s| s.id.clone());
        }
        true
    }

    /// Replace the slide carrying `updated.id` by value.
    ///
    /// Unknown ids and attempts to change a slide's type are ignored.
    pub fn update_slide(&mut self, updated: Slide) -> bool {
        match self.flow.slides.iter_mut().find(|s| s.id == updated.id) {
            Some(existing) if existing.slide_type == updated.slide_type => {
                *existing = updated;
                true
            }
            _ => false,
        }
    }

    pub fn select_slide(&mut self, id: &str) -> bool {
        if self.flow.contains(id) {
            self.selected_slide_id = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Patch one style override on a slide.
    pub fn patch_slide_style(
        &mut self,
        id: &str,
        field: StyleField,
        value: &serde_json::Value,
    ) -> Result<&Slide, CoreError> {
        let slide = self
            .flow
            .slides
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "Slide",
                id: id.to_string(),
            })?;
        slide.style.apply_patch(field, value)?;
        Ok(slide)
    }

    // -- flow-level edits -------------------------------------------------

    pub fn update_global_styles(&mut self, styles: GlobalStyles) {
        self.flow.global_styles = styles;
    }

    pub fn patch_global_style(
        &mut self,
        field: StyleField,
        value: &serde_json::Value,
    ) -> Result<&GlobalStyles, CoreError> {
        self.flow.global_styles.styles.apply_patch(field, value)?;
        Ok(&self.flow.global_styles)
    }

    pub fn rename_flow(&mut self, name: impl Into<String>) {
        self.flow.name = name.into();
    }

    // -- internals --------------------------------------------------------

    fn allocate_id(&self) -> SlideId {
        let mut n = (self.clock)();
        loop {
            let candidate = format!("{SLIDE_ID_PREFIX}{n}");
            if !self.flow.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
