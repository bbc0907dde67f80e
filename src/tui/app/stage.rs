use crate::coords::{Coordinates, StartLayout};
use crate::cups::{Arrangement, CupId};
use crate::timeline::StepAction;

/// Slot anchor positions inside the play area, in terminal cells.
const SLOT_POS: [Coordinates; 3] =
    [Coordinates::new(4.0, 3.0), Coordinates::new(24.0, 3.0), Coordinates::new(44.0, 3.0)];
/// Ball rest position before it slides under a cup.
const BALL_START: Coordinates = Coordinates::new(27.0, 9.0);

/// Visual positions of cups and ball, driven by the timeline. The start
/// layout is captured once and restored exactly on every replay.
#[derive(Debug, Clone)]
pub struct Stage {
    start: StartLayout,
    slots: Arrangement,
    cup_pos: [Coordinates; 3],
    cup_target: [Coordinates; 3],
    ball_pos: Coordinates,
    ball_target: Coordinates,
    ball_visible: bool,
    lifted: Option<CupId>,
}

/// Interpolated snapshot handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct StageView {
    /// Cup positions indexed by [`CupId::index`].
    pub cups: [Coordinates; 3],
    pub ball: Coordinates,
    pub ball_visible: bool,
    pub lifted: Option<CupId>,
}

impl Stage {
    pub fn new() -> Self {
        let start = StartLayout::capture(BALL_START, SLOT_POS);
        Self {
            start,
            slots: Arrangement::start(),
            cup_pos: start.cups,
            cup_target: start.cups,
            ball_pos: start.ball,
            ball_target: start.ball,
            ball_visible: true,
            lifted: None,
        }
    }

    pub fn start_layout(&self) -> StartLayout {
        self.start
    }

    pub fn slots(&self) -> Arrangement {
        self.slots
    }

    /// Set animation targets when a step begins.
    pub fn step_started(&mut self, action: StepAction, ball_cup: Option<CupId>) {
        match action {
            StepAction::BallToCup => {
                if let Some(cup) = ball_cup {
                    let mouth = self.cup_pos[cup.index()];
                    self.ball_target = Coordinates::new(mouth.x + 3.0, mouth.y + 2.0);
                }
            }
            StepAction::Swap(spin) => {
                let mut next = self.slots;
                next.apply(spin);
                for slot in 0..SLOT_POS.len() {
                    if let Some(cup) = next.cup_at(slot) {
                        self.cup_target[cup.index()] = self.start.cups[slot];
                    }
                }
            }
            StepAction::ReturnToStart => {
                self.cup_target = self.start.cups;
                self.ball_target = self.start.ball;
                self.ball_visible = true;
            }
            _ => {}
        }
    }

    /// Commit positions and flags when a step completes.
    pub fn step_completed(&mut self, action: StepAction) {
        match action {
            StepAction::BallToCup => {
                self.ball_pos = self.ball_target;
                self.ball_visible = false;
            }
            StepAction::Swap(spin) => {
                // Authoritative: recompute from the slot mapping so a swap
                // that completes within a single large tick (its start
                // targets never set) still lands every cup on its slot.
                self.slots.apply(spin);
                for slot in 0..SLOT_POS.len() {
                    if let Some(cup) = self.slots.cup_at(slot) {
                        self.cup_pos[cup.index()] = self.start.cups[slot];
                    }
                }
                self.cup_target = self.cup_pos;
            }
            StepAction::Lift(cup) => self.lifted = Some(cup),
            StepAction::ResetFlip => self.lifted = None,
            StepAction::ReturnToStart => {
                self.slots = Arrangement::start();
                self.cup_pos = self.start.cups;
                self.cup_target = self.start.cups;
                self.ball_pos = self.start.ball;
                self.ball_target = self.start.ball;
                self.ball_visible = true;
            }
            _ => {}
        }
    }

    /// Show the ball at the winning cup's mouth.
    pub fn reveal_ball_at(&mut self, cup: CupId) {
        let pos = self.cup_pos[cup.index()];
        self.ball_pos = Coordinates::new(pos.x + 3.0, pos.y - 1.0);
        self.ball_target = self.ball_pos;
        self.ball_visible = true;
    }

    /// Interpolated view; `progress` is the in-flight timeline step's
    /// progress, or `None` when idle.
    pub fn view(&self, progress: Option<f32>) -> StageView {
        let t = progress.unwrap_or(1.0);
        StageView {
            cups: [
                self.cup_pos[0].lerp(self.cup_target[0], t),
                self.cup_pos[1].lerp(self.cup_target[1], t),
                self.cup_pos[2].lerp(self.cup_target[2], t),
            ],
            ball: self.ball_pos.lerp(self.ball_target, t),
            ball_visible: self.ball_visible,
            lifted: self.lifted,
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}
