//! Preview controller.
//!
//! A [`PreviewSession`] owns the state a live preview needs beyond the flow
//! document itself: which slide is shown, its animation phase, the local
//! selections on responsive slides, and the responses recorded so far. The
//! flow is always passed in, so every render sees the latest edits.

use std::time::Instant;

use serde::Serialize;

use crate::animation::{AnimationPhase, PreviewAnimator};
use crate::editor::EditorState;
use crate::error::CoreError;
use crate::navigation::{ContinueOutcome, PreviewMode, PreviewNavigator};
use crate::render::html::to_html;
use crate::render::{render_empty, render_slide, EmptyReason, NavLinks, RenderContext, ViewNode};
use crate::resolve::{resolve, ResolvedStyle};
use crate::response::{self, Interaction, ResponseEvent, ResponseLog, Selections};
use crate::slide::OnboardingFlow;
use crate::types::SlideId;

/// One rendered preview screen plus the data it was built from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewFrame {
    pub index: Option<usize>,
    pub total: usize,
    pub slide_id: Option<SlideId>,
    pub phase: AnimationPhase,
    pub resolved: Option<ResolvedStyle>,
    pub progress: Option<u8>,
    pub empty: Option<EmptyReason>,
    pub tree: ViewNode,
    pub html: String,
}

#[derive(Debug, Clone)]
pub struct PreviewSession {
    mode: PreviewMode,
    navigator: PreviewNavigator,
    animator: PreviewAnimator,
    selections: Selections,
    responses: ResponseLog,
}

impl PreviewSession {
    pub fn new(mode: PreviewMode, now: Instant) -> Self {
        Self {
            mode,
            navigator: PreviewNavigator::default(),
            animator: PreviewAnimator::new(now),
            selections: Selections::default(),
            responses: ResponseLog::default(),
        }
    }

    pub fn mode(&self) -> PreviewMode {
        self.mode
    }

    pub fn navigator(&self) -> &PreviewNavigator {
        &self.navigator
    }

    pub fn responses(&self) -> &ResponseLog {
        &self.responses
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    // -- syncing ----------------------------------------------------------

    /// Track the editor's selection, dropping answers for deleted slides and
    /// answers that edits made invalid.
    pub fn follow_editor(&mut self, editor: &EditorState, now: Instant) {
        self.sync_len(editor.flow());
        if let Some(index) = editor.selected_index() {
            self.navigator.jump_to(index);
        }
        self.animator.show(editor.selected_slide_id(), now);
    }

    /// Adopt the current slide count of `flow`, keeping the index in range.
    pub fn sync_flow(&mut self, flow: &OnboardingFlow, now: Instant) {
        self.sync_len(flow);
        self.show_current(flow, now);
    }

    fn sync_len(&mut self, flow: &OnboardingFlow) {
        self.navigator.set_len(flow.slides.len());
        self.selections.retain_valid(&flow.slides);
        self.responses.retain_valid(&flow.slides);
    }

    fn show_current(&mut self, flow: &OnboardingFlow, now: Instant) {
        let id = self
            .navigator
            .current()
            .and_then(|i| flow.slides.get(i))
            .map(|s| s.id.as_str());
        self.animator.show(id, now);
    }

    // -- navigation -------------------------------------------------------

    pub fn jump_to(&mut self, flow: &OnboardingFlow, index: usize, now: Instant) {
        self.sync_len(flow);
        self.navigator.jump_to(index);
        self.show_current(flow, now);
    }

    pub fn retreat(&mut self, flow: &OnboardingFlow, now: Instant) -> Option<usize> {
        self.sync_len(flow);
        let index = self.navigator.retreat();
        self.show_current(flow, now);
        index
    }

    pub fn continue_tap(&mut self, flow: &OnboardingFlow, now: Instant) -> ContinueOutcome {
        self.sync_len(flow);
        let outcome = self.navigator.continue_tap(self.mode);
        self.show_current(flow, now);
        outcome
    }

    pub fn replay(&mut self, now: Instant) {
        self.animator.replay(now);
    }

    // -- responses --------------------------------------------------------

    /// Apply `interaction` to the slide at `index` and record the response.
    pub fn interact(
        &mut self,
        flow: &OnboardingFlow,
        index: usize,
        interaction: &Interaction,
    ) -> Result<ResponseEvent, CoreError> {
        let slide = flow.slides.get(index).ok_or_else(|| {
            CoreError::Validation(format!(
                "Slide index {index} is out of range for {} slides",
                flow.slides.len()
            ))
        })?;
        let event = response::interact(slide, interaction, &mut self.responses)?;
        self.selections.set(event.slide_id.clone(), event.answer.clone());
        Ok(event)
    }

    // -- rendering --------------------------------------------------------

    /// Render the previewed slide of `flow` as of `now`.
    pub fn render(&self, flow: &OnboardingFlow, now: Instant, links: NavLinks) -> PreviewFrame {
        let phase = self.animator.phase_at(now);
        let total = flow.slides.len();

        let Some((index, slide)) = self
            .navigator
            .current()
            .and_then(|i| flow.slides.get(i).map(|s| (i, s)))
        else {
            let reason = if total == 0 {
                EmptyReason::NoSlides
            } else {
                EmptyReason::NoSelection
            };
            return empty_frame(reason, total, phase);
        };

        let resolved = resolve(slide, &flow.global_styles);
        let ctx = RenderContext {
            slide,
            resolved: &resolved,
            index,
            total,
            phase,
            mode: self.mode,
            selections: &self.selections,
            links,
        };
        let progress = ctx.progress();
        let tree = render_slide(&ctx);
        let html = to_html(&tree);

        PreviewFrame {
            index: Some(index),
            total,
            slide_id: Some(slide.id.clone()),
            phase,
            resolved: Some(resolved),
            progress,
            empty: None,
            tree,
            html,
        }
    }

    /// Render what the editor's phone frame shows: the selected slide, or
    /// the empty state when nothing is selected.
    pub fn render_for_editor(&self, editor: &EditorState, now: Instant) -> PreviewFrame {
        if editor.selected_slide().is_none() {
            let reason = if editor.slides().is_empty() {
                EmptyReason::NoSlides
            } else {
                EmptyReason::NoSelection
            };
            return empty_frame(reason, editor.slides().len(), self.animator.phase_at(now));
        }
        self.render(editor.flow(), now, NavLinks::default())
    }
}

fn empty_frame(reason: EmptyReason, total: usize, phase: AnimationPhase) -> PreviewFrame {
    let tree = render_empty(reason);
    let html = to_html(&tree);
    PreviewFrame {
        index: None,
        total,
        slide_id: None,
        phase,
        resolved: None,
        progress: None,
        empty: Some(reason),
        tree,
        html,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;

    use super::*;
    use crate::bridge::BridgeMessage;
    use crate::navigation::CompletionSignal;
    use crate::slide::SlideType;

    fn fixed_clock() -> i64 {
        500
    }

    fn editor_with_three_slides() -> EditorState {
        let mut editor = EditorState::default().with_clock(fixed_clock);
        editor.add_slide(SlideType::Choice);
        editor.add_slide(SlideType::Date);
        editor
    }

    #[test]
    fn editor_preview_follows_selection_and_restarts_animation() {
        let t0 = Instant::now();
        let mut editor = editor_with_three_slides();
        let mut preview = PreviewSession::new(PreviewMode::Editor, t0);

        editor.select_slide("slide-500");
        preview.follow_editor(&editor, t0);
        let frame = preview.render_for_editor(&editor, t0);
        assert_eq!(frame.index, Some(1));
        assert_eq!(frame.phase, AnimationPhase::Entering);
        assert!(frame.html.contains("Make a Selection"));

        let later = t0 + Duration::from_secs(1);
        assert_eq!(
            preview.render_for_editor(&editor, later).phase,
            AnimationPhase::Settled
        );

        editor.select_slide("slide-1");
        preview.follow_editor(&editor, later);
        assert_eq!(
            preview.render_for_editor(&editor, later).phase,
            AnimationPhase::Entering
        );
    }

    #[test]
    fn edits_are_visible_on_next_render() {
        let t0 = Instant::now();
        let mut editor = EditorState::default();
        let mut preview = PreviewSession::new(PreviewMode::Editor, t0);

        let mut slide = editor.slide("slide-1").cloned().unwrap();
        slide.title = Some("Hello there".into());
        editor.update_slide(slide);

        preview.follow_editor(&editor, t0);
        assert!(preview.render_for_editor(&editor, t0).html.contains("Hello there"));
    }

    #[test]
    fn empty_flow_renders_empty_state() {
        let t0 = Instant::now();
        let mut editor = EditorState::default();
        editor.delete_slide("slide-1");
        let mut preview = PreviewSession::new(PreviewMode::Editor, t0);
        preview.follow_editor(&editor, t0);

        let frame = preview.render_for_editor(&editor, t0);
        assert_eq!(frame.empty, Some(EmptyReason::NoSlides));
        assert!(frame.html.contains("This flow has no slides yet"));
    }

    #[test]
    fn embedded_continue_through_flow_completes_once() {
        let t0 = Instant::now();
        let editor = editor_with_three_slides();
        let flow = editor.flow();
        let mut preview = PreviewSession::new(PreviewMode::Embedded, t0);
        preview.sync_flow(flow, t0);

        assert_eq!(
            preview.continue_tap(flow, t0),
            ContinueOutcome::Advanced { index: 1 }
        );
        assert_eq!(
            preview.continue_tap(flow, t0),
            ContinueOutcome::Advanced { index: 2 }
        );
        assert_eq!(
            preview.continue_tap(flow, t0),
            ContinueOutcome::Completed {
                signal: CompletionSignal::Bridge(BridgeMessage::Complete)
            }
        );
        assert_eq!(preview.navigator().current(), Some(2));
    }

    #[test]
    fn interaction_records_event_and_updates_selection() {
        let t0 = Instant::now();
        let editor = editor_with_three_slides();
        let flow = editor.flow();
        let mut preview = PreviewSession::new(PreviewMode::Standalone, t0);
        preview.jump_to(flow, 1, t0);

        let event = preview
            .interact(flow, 1, &Interaction::SelectChoice("Option 1".into()))
            .unwrap();
        assert_eq!(event.sdk_key, "key_500");
        assert_eq!(preview.responses().events().len(), 1);
        assert_eq!(preview.selections().get("slide-500"), Some("Option 1"));

        let frame = preview.render(flow, t0, NavLinks::default());
        assert!(frame.html.contains("Selected: Option 1"));

        assert_matches!(
            preview.interact(flow, 9, &Interaction::InputChanged("x".into())),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn deleted_slides_drop_their_responses() {
        let t0 = Instant::now();
        let mut editor = editor_with_three_slides();
        let mut preview = PreviewSession::new(PreviewMode::Editor, t0);
        preview
            .interact(editor.flow(), 1, &Interaction::SelectChoice("Option 2".into()))
            .unwrap();

        editor.delete_slide("slide-500");
        preview.follow_editor(&editor, t0);
        assert!(preview.responses().is_empty());
        assert_eq!(preview.selections().get("slide-500"), None);
    }

    #[test]
    fn editing_options_clears_stale_choice() {
        let t0 = Instant::now();
        let mut editor = editor_with_three_slides();
        editor.select_slide("slide-500");
        let mut preview = PreviewSession::new(PreviewMode::Editor, t0);
        preview.follow_editor(&editor, t0);
        preview
            .interact(editor.flow(), 1, &Interaction::SelectChoice("Option 1".into()))
            .unwrap();

        let mut slide = editor.slide("slide-500").cloned().unwrap();
        slide.options = Some(vec!["Yes".into(), "No".into()]);
        assert!(editor.update_slide(slide));
        preview.follow_editor(&editor, t0);

        assert_eq!(preview.selections().get("slide-500"), None);
        assert_eq!(
            preview.responses().sdk_payload(),
            serde_json::json!({ "app": {} })
        );
        let html = preview.render_for_editor(&editor, t0).html;
        assert!(!html.contains("Selected:"));
        assert!(html.contains("data-option=\"Yes\""));
    }
}
