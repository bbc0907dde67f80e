//! Timed step sequencing for the shuffle and reveal animations.
//!
//! The original flow is a chain of animation-completion callbacks; here it
//! is an explicit queue of fixed-duration steps advanced by a
//! single-threaded tick. Completing one step hands control to the next, so
//! the sequencing is testable without any rendering surface.

use crate::cups::CupId;
use crate::shuffle::{ShufflePlan, Spin};
use std::collections::VecDeque;
use std::time::Duration;

/// Cup or ball travel time for a single move or swap, in milliseconds.
pub const MOVE_MS: u64 = 500;
/// Pause between consecutive swaps.
pub const SWAP_GAP_MS: u64 = 520;
/// Flip time for a tapped cup.
pub const LIFT_MS: u64 = 500;
/// Snap-back time when restoring the start layout.
pub const RESET_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepAction {
    /// Ball slides under the chosen cup, then hides.
    BallToCup,
    /// All three cups rotate one slot.
    Swap(Spin),
    /// Idle gap between swaps.
    Pause,
    /// Tap targets arm on all three cups.
    OpenGuessing,
    /// The tapped cup flips up; scoring resolves when this completes.
    Lift(CupId),
    /// The previously lifted cup flips back down.
    ResetFlip,
    /// Ball and cups return to the captured start coordinates.
    ReturnToStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedStep {
    pub action: StepAction,
    pub duration: Duration,
}

/// Ordered queue of timed steps. `advance` consumes elapsed time and
/// returns every step that completed, oldest first; a zero-duration step
/// completes on the first advance after it reaches the front.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    queue: VecDeque<TimedStep>,
    elapsed: Duration,
    completed: usize,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.elapsed = Duration::ZERO;
    }

    pub fn push(&mut self, action: StepAction, duration: Duration) {
        self.queue.push_back(TimedStep { action, duration });
    }

    /// Steps completed since construction. Doubles as a stable id for the
    /// current front step, for start-of-step change detection.
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// The front step and its progress in `0.0..=1.0`.
    pub fn current(&self) -> Option<(StepAction, f32)> {
        self.queue.front().map(|step| {
            let progress = if step.duration.is_zero() {
                1.0
            } else {
                (self.elapsed.as_secs_f32() / step.duration.as_secs_f32()).clamp(0.0, 1.0)
            };
            (step.action, progress)
        })
    }

    /// Advance by `dt`, returning completed steps in order. Leftover time
    /// rolls into the next step, so one large advance can finish several.
    pub fn advance(&mut self, dt: Duration) -> Vec<StepAction> {
        if self.queue.is_empty() {
            return Vec::new();
        }
        self.elapsed += dt;
        let mut done = Vec::new();
        while let Some(step) = self.queue.front().copied() {
            if self.elapsed < step.duration {
                break;
            }
            self.elapsed -= step.duration;
            self.queue.pop_front();
            self.completed += 1;
            done.push(step.action);
        }
        if self.queue.is_empty() {
            self.elapsed = Duration::ZERO;
        }
        done
    }
}

/// The shuffle script: ball under the cup, each swap followed by the
/// inter-swap pause, then guessing opens.
pub fn shuffle_script(plan: &ShufflePlan) -> Timeline {
    let mut timeline = Timeline::new();
    timeline.push(StepAction::BallToCup, Duration::from_millis(MOVE_MS));
    for &spin in plan.spins() {
        timeline.push(StepAction::Swap(spin), Duration::from_millis(MOVE_MS));
        timeline.push(StepAction::Pause, Duration::from_millis(SWAP_GAP_MS));
    }
    timeline.push(StepAction::OpenGuessing, Duration::ZERO);
    timeline
}

/// The reveal script: the tapped cup lifts, then scoring resolves.
pub fn reveal_script(cup: CupId) -> Timeline {
    let mut timeline = Timeline::new();
    timeline.push(StepAction::Lift(cup), Duration::from_millis(LIFT_MS));
    timeline
}

/// The replay script: reset the flip, then return everything to the
/// captured start coordinates.
pub fn reset_script() -> Timeline {
    let mut timeline = Timeline::new();
    timeline.push(StepAction::ResetFlip, Duration::from_millis(RESET_MS));
    timeline.push(StepAction::ReturnToStart, Duration::from_millis(RESET_MS));
    timeline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shuffle::ShufflePlan;

    #[test]
    fn advance_completes_steps_in_order() {
        let mut t = Timeline::new();
        t.push(StepAction::BallToCup, Duration::from_millis(100));
        t.push(StepAction::Pause, Duration::from_millis(50));

        assert!(t.advance(Duration::from_millis(60)).is_empty());
        assert_eq!(t.advance(Duration::from_millis(40)), vec![StepAction::BallToCup]);
        assert_eq!(t.advance(Duration::from_millis(50)), vec![StepAction::Pause]);
        assert!(t.is_idle());
    }

    #[test]
    fn one_large_advance_finishes_several_steps() {
        let mut t = Timeline::new();
        t.push(StepAction::BallToCup, Duration::from_millis(100));
        t.push(StepAction::Pause, Duration::from_millis(100));
        t.push(StepAction::OpenGuessing, Duration::ZERO);

        let done = t.advance(Duration::from_millis(250));
        assert_eq!(done, vec![StepAction::BallToCup, StepAction::Pause, StepAction::OpenGuessing]);
        assert_eq!(t.completed(), 3);
    }

    #[test]
    fn progress_reflects_elapsed_time() {
        let mut t = Timeline::new();
        t.push(StepAction::BallToCup, Duration::from_millis(200));
        t.advance(Duration::from_millis(50));
        let (action, progress) = t.current().unwrap();
        assert_eq!(action, StepAction::BallToCup);
        assert!((progress - 0.25).abs() < 1e-3);
    }

    #[test]
    fn shuffle_script_opens_guessing_after_last_swap() {
        let plan = ShufflePlan::plan_seeded(21);
        let mut t = shuffle_script(&plan);
        // ball move + (swap + pause) per spin + open
        assert_eq!(t.len(), 1 + plan.swap_count() * 2 + 1);

        let mut actions = Vec::new();
        while !t.is_idle() {
            actions.extend(t.advance(Duration::from_millis(100)));
        }
        assert_eq!(actions.first(), Some(&StepAction::BallToCup));
        assert_eq!(actions.last(), Some(&StepAction::OpenGuessing));
        let swaps = actions.iter().filter(|a| matches!(a, StepAction::Swap(_))).count();
        assert_eq!(swaps, plan.swap_count());
    }

    #[test]
    fn clear_resets_elapsed() {
        let mut t = Timeline::new();
        t.push(StepAction::Pause, Duration::from_millis(100));
        t.advance(Duration::from_millis(80));
        t.clear();
        t.push(StepAction::Pause, Duration::from_millis(100));
        assert!(t.advance(Duration::from_millis(50)).is_empty());
    }
}
