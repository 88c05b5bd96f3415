//! Entrance animation state machine for the previewed slide.
//!
//! Time is passed in by the caller; nothing here sleeps or schedules. A
//! newer slide change or replay simply restarts the machine, which
//! supersedes whatever transition was pending.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::types::SlideId;

/// Delay before the animation class is applied to a freshly shown slide.
pub const ENTER_DELAY: Duration = Duration::from_millis(50);

/// How long the animation itself runs.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationPhase {
    /// Slide just shown; animation class not yet applied.
    Entering,
    /// Animation class applied and running.
    Animating,
    /// Animation finished; class stays applied.
    Settled,
}

impl AnimationPhase {
    /// Whether the slide's animation class should be on the wrapper.
    pub fn applies_class(self) -> bool {
        !matches!(self, Self::Entering)
    }
}

#[derive(Debug, Clone)]
pub struct PreviewAnimator {
    slide_id: Option<SlideId>,
    started_at: Instant,
}

impl PreviewAnimator {
    pub fn new(now: Instant) -> Self {
        Self {
            slide_id: None,
            started_at: now,
        }
    }

    pub fn slide_id(&self) -> Option<&str> {
        self.slide_id.as_deref()
    }

    /// Note the slide currently on screen. A different id restarts the
    /// entrance; the same id leaves the running animation alone.
    pub fn show(&mut self, slide_id: Option<&str>, now: Instant) {
        if self.slide_id.as_deref() != slide_id {
            self.slide_id = slide_id.map(str::to_string);
            self.started_at = now;
        }
    }

    /// Restart the entrance of the current slide.
    pub fn replay(&mut self, now: Instant) {
        self.started_at = now;
    }

    pub fn phase_at(&self, now: Instant) -> AnimationPhase {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed < ENTER_DELAY {
            AnimationPhase::Entering
        } else if elapsed < ENTER_DELAY + ANIMATION_DURATION {
            AnimationPhase::Animating
        } else {
            AnimationPhase::Settled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_follow_elapsed_time() {
        let t0 = Instant::now();
        let mut animator = PreviewAnimator::new(t0);
        animator.show(Some("slide-1"), t0);

        assert_eq!(animator.phase_at(t0), AnimationPhase::Entering);
        assert_eq!(
            animator.phase_at(t0 + Duration::from_millis(49)),
            AnimationPhase::Entering
        );
        assert_eq!(
            animator.phase_at(t0 + ENTER_DELAY),
            AnimationPhase::Animating
        );
        assert_eq!(
            animator.phase_at(t0 + ENTER_DELAY + ANIMATION_DURATION),
            AnimationPhase::Settled
        );
    }

    #[test]
    fn new_slide_supersedes_pending_transition() {
        let t0 = Instant::now();
        let mut animator = PreviewAnimator::new(t0);
        animator.show(Some("slide-1"), t0);

        let t1 = t0 + Duration::from_millis(40);
        animator.show(Some("slide-2"), t1);
        // Would have been animating under the first start time.
        assert_eq!(
            animator.phase_at(t0 + Duration::from_millis(60)),
            AnimationPhase::Entering
        );
        assert_eq!(
            animator.phase_at(t1 + ENTER_DELAY),
            AnimationPhase::Animating
        );
    }

    #[test]
    fn same_slide_does_not_restart() {
        let t0 = Instant::now();
        let mut animator = PreviewAnimator::new(t0);
        animator.show(Some("slide-1"), t0);
        let later = t0 + Duration::from_secs(1);
        animator.show(Some("slide-1"), later);
        assert_eq!(animator.phase_at(later), AnimationPhase::Settled);
    }

    #[test]
    fn replay_resets_to_entering() {
        let t0 = Instant::now();
        let mut animator = PreviewAnimator::new(t0);
        animator.show(Some("slide-1"), t0);
        let later = t0 + Duration::from_secs(2);
        animator.replay(later);
        assert_eq!(animator.phase_at(later), AnimationPhase::Entering);
        assert!(!animator.phase_at(later).applies_class());
        assert!(AnimationPhase::Settled.applies_class());
    }
}
