// Minimal game engine API boundary. This trait exposes the round actions and
// queries so UIs (TUI, GUI, tests) can drive the game without depending on
// its internals. It is implemented for the core `Game` type.

use crate::cups::{Arrangement, CupId};
use crate::game::{GameState, Outcome, RoundError};
use crate::shuffle::Spin;

pub trait GameEngine {
    // Round lifecycle
    fn start_round(&mut self, seed: u64) -> Result<(), RoundError>;
    fn apply_next_spin(&mut self) -> Result<Spin, RoundError>;
    fn open_guessing(&mut self) -> Result<(), RoundError>;
    fn guess(&mut self, cup: CupId) -> Result<Outcome, RoundError>;
    fn replay(&mut self) -> Result<(), RoundError>;
    fn cancel_round(&mut self);

    // Queries
    fn state(&self) -> GameState;
    fn balance(&self) -> u64;
    fn ball_cup(&self) -> Option<CupId>;
    fn arrangement(&self) -> Option<Arrangement>;
    fn swaps_remaining(&self) -> usize;
    fn guessing_open(&self) -> bool;
}

impl GameEngine for crate::game::Game {
    fn start_round(&mut self, seed: u64) -> Result<(), RoundError> {
        self.start_round_seeded(seed)
    }

    fn apply_next_spin(&mut self) -> Result<Spin, RoundError> {
        self.apply_next_spin()
    }

    fn open_guessing(&mut self) -> Result<(), RoundError> {
        self.open_guessing()
    }

    fn guess(&mut self, cup: CupId) -> Result<Outcome, RoundError> {
        self.guess(cup)
    }

    fn replay(&mut self) -> Result<(), RoundError> {
        self.replay()
    }

    fn cancel_round(&mut self) {
        self.cancel_round()
    }

    fn state(&self) -> GameState {
        self.state()
    }

    fn balance(&self) -> u64 {
        self.balance()
    }

    fn ball_cup(&self) -> Option<CupId> {
        self.ball_cup()
    }

    fn arrangement(&self) -> Option<Arrangement> {
        self.arrangement()
    }

    fn swaps_remaining(&self) -> usize {
        self.swaps_remaining()
    }

    fn guessing_open(&self) -> bool {
        self.guessing_open()
    }
}
