use crate::cups::{Arrangement, CupId};
use crate::shuffle::{ShufflePlan, Spin};
use log::debug;
use rand::Rng;
use std::fmt;

/// Default balance, and the value the balance resets to when a loss would
/// leave it at zero or below.
pub const STARTING_BALANCE: u64 = 100;
/// Amount credited on a win. The UI shows a nominal "+50"; the applied
/// delta is this value.
pub const WIN_CREDIT: u64 = 40;
/// Amount debited on a loss, before reset clamping.
pub const LOSS_DEBIT: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameState {
    /// Idle: the play control is available.
    Ready,
    /// Cups are shuffling or awaiting a guess; no replay allowed.
    InGame,
    /// Terminal for the round: the guess matched the ball cup.
    Win,
    /// Terminal for the round: the guess missed.
    Lose,
}

/// Result of a resolved guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

pub type Observer = Box<dyn FnMut(GameState)>;

/// Single observable slot holding the game state. Observers run
/// synchronously, in registration order, on every `set`.
pub struct StateCell {
    value: GameState,
    observers: Vec<Observer>,
}

impl StateCell {
    pub fn new(value: GameState) -> Self {
        Self { value, observers: Vec::new() }
    }

    pub fn get(&self) -> GameState {
        self.value
    }

    pub fn observe(&mut self, observer: impl FnMut(GameState) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn set(&mut self, value: GameState) {
        self.value = value;
        for observer in &mut self.observers {
            observer(value);
        }
    }
}

impl fmt::Debug for StateCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("value", &self.value)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("a round can only start from the ready state")]
    NotReady,
    #[error("no round in progress")]
    NoRound,
    #[error("all planned swaps already applied")]
    AllSwapsApplied,
    #[error("cups are still shuffling")]
    StillShuffling,
    #[error("round still in progress")]
    RoundInProgress,
}

#[derive(Debug, Clone)]
struct Round {
    plan: ShufflePlan,
    arrangement: Arrangement,
    applied: usize,
    guessing_open: bool,
}

/// The shell game: state machine, balance rules, and the current round.
///
/// Animation pacing lives elsewhere; this type only tracks which swaps have
/// been applied and when guessing is allowed, so the rules stay testable
/// without a rendering surface.
#[derive(Debug)]
pub struct Game {
    state: StateCell,
    balance: u64,
    round: Option<Round>,
}

impl Game {
    pub fn new(balance: u64) -> Self {
        Self { state: StateCell::new(GameState::Ready), balance, round: None }
    }

    /// Returns the current game state
    pub fn state(&self) -> GameState {
        self.state.get()
    }

    /// Returns the current balance
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Register a state observer. Exactly one is used in practice (the UI),
    /// but any number may attach.
    pub fn observe(&mut self, observer: impl FnMut(GameState) + 'static) {
        self.state.observe(observer);
    }

    /// Returns the round plan, if a round is running
    pub fn plan(&self) -> Option<&ShufflePlan> {
        self.round.as_ref().map(|r| &r.plan)
    }

    /// Returns the cup hiding the ball for the current round
    pub fn ball_cup(&self) -> Option<CupId> {
        self.round.as_ref().map(|r| r.plan.ball_cup())
    }

    /// Returns the current slot assignment, if a round is running
    pub fn arrangement(&self) -> Option<Arrangement> {
        self.round.as_ref().map(|r| r.arrangement)
    }

    /// Returns how many planned swaps have not been applied yet
    pub fn swaps_remaining(&self) -> usize {
        self.round.as_ref().map(|r| r.plan.swap_count() - r.applied).unwrap_or(0)
    }

    /// Returns whether guessing is currently open
    pub fn guessing_open(&self) -> bool {
        self.round.as_ref().map(|r| r.guessing_open).unwrap_or(false)
    }

    /// Start a round with the provided RNG: pick the ball cup and the swap
    /// sequence, then enter `InGame`. Only legal from `Ready`.
    pub fn start_round_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), RoundError> {
        if self.state.get() != GameState::Ready {
            return Err(RoundError::NotReady);
        }
        let plan = ShufflePlan::plan_with(rng);
        debug!("round started: ball under {} cup, {} swaps", plan.ball_cup(), plan.swap_count());
        self.round = Some(Round {
            plan,
            arrangement: Arrangement::start(),
            applied: 0,
            guessing_open: false,
        });
        self.state.set(GameState::InGame);
        Ok(())
    }

    /// Start a round from a seed for reproducibility.
    pub fn start_round_seeded(&mut self, seed: u64) -> Result<(), RoundError> {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        self.start_round_with(&mut rng)
    }

    /// Apply the next planned swap to the arrangement and return it. The UI
    /// calls this as each swap animation completes.
    pub fn apply_next_spin(&mut self) -> Result<Spin, RoundError> {
        if self.state.get() != GameState::InGame {
            return Err(RoundError::NoRound);
        }
        let round = self.round.as_mut().ok_or(RoundError::NoRound)?;
        let Some(&spin) = round.plan.spins().get(round.applied) else {
            return Err(RoundError::AllSwapsApplied);
        };
        round.arrangement.apply(spin);
        round.applied += 1;
        Ok(spin)
    }

    /// Open guessing once every planned swap has been applied.
    pub fn open_guessing(&mut self) -> Result<(), RoundError> {
        if self.state.get() != GameState::InGame {
            return Err(RoundError::NoRound);
        }
        let round = self.round.as_mut().ok_or(RoundError::NoRound)?;
        if round.applied < round.plan.swap_count() {
            return Err(RoundError::StillShuffling);
        }
        round.guessing_open = true;
        Ok(())
    }

    /// Resolve a guess. Guessing closes before the state changes, so a
    /// stray second tap cannot score twice. A hit credits the balance and
    /// enters `Win`; a miss debits it (with reset-to-100 clamping) and
    /// enters `Lose`.
    pub fn guess(&mut self, cup: CupId) -> Result<Outcome, RoundError> {
        if self.state.get() != GameState::InGame {
            return Err(RoundError::NoRound);
        }
        let round = self.round.as_mut().ok_or(RoundError::NoRound)?;
        if !round.guessing_open {
            return Err(RoundError::StillShuffling);
        }
        round.guessing_open = false;
        let outcome = if cup == round.plan.ball_cup() { Outcome::Win } else { Outcome::Lose };
        match outcome {
            Outcome::Win => {
                self.balance = self.balance.saturating_add(WIN_CREDIT);
                debug!("guess {cup}: win, balance {}", self.balance);
                self.state.set(GameState::Win);
            }
            Outcome::Lose => {
                self.balance = if self.balance <= LOSS_DEBIT {
                    STARTING_BALANCE
                } else {
                    self.balance - LOSS_DEBIT
                };
                debug!("guess {cup}: lose, balance {}", self.balance);
                self.state.set(GameState::Lose);
            }
        }
        Ok(outcome)
    }

    /// Return to `Ready` after a finished round. The UI restores the start
    /// layout on this transition.
    pub fn replay(&mut self) -> Result<(), RoundError> {
        match self.state.get() {
            GameState::Win | GameState::Lose => {
                self.round = None;
                self.state.set(GameState::Ready);
                Ok(())
            }
            GameState::InGame => Err(RoundError::RoundInProgress),
            GameState::Ready => Err(RoundError::NoRound),
        }
    }

    /// Abandon any in-flight round without touching the balance. Used when
    /// the game screen is dismissed mid-animation.
    pub fn cancel_round(&mut self) {
        if self.state.get() != GameState::Ready {
            self.round = None;
            self.state.set(GameState::Ready);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn finish_shuffle(game: &mut Game) {
        while game.swaps_remaining() > 0 {
            game.apply_next_spin().expect("spin applies");
        }
        game.open_guessing().expect("guessing opens");
    }

    fn wrong_cup(ball: CupId) -> CupId {
        CupId::ALL.into_iter().find(|&c| c != ball).expect("two other cups exist")
    }

    #[test]
    fn starts_ready_with_given_balance() {
        let game = Game::new(250);
        assert_eq!(game.state(), GameState::Ready);
        assert_eq!(game.balance(), 250);
        assert!(game.plan().is_none());
    }

    #[test]
    fn win_credits_forty() {
        let mut game = Game::new(STARTING_BALANCE);
        game.start_round_seeded(3).unwrap();
        finish_shuffle(&mut game);
        let ball = game.ball_cup().unwrap();
        assert_eq!(game.guess(ball).unwrap(), Outcome::Win);
        assert_eq!(game.state(), GameState::Win);
        assert_eq!(game.balance(), STARTING_BALANCE + WIN_CREDIT);
    }

    #[test]
    fn loss_debits_ten() {
        let mut game = Game::new(STARTING_BALANCE);
        game.start_round_seeded(3).unwrap();
        finish_shuffle(&mut game);
        let miss = wrong_cup(game.ball_cup().unwrap());
        assert_eq!(game.guess(miss).unwrap(), Outcome::Lose);
        assert_eq!(game.state(), GameState::Lose);
        assert_eq!(game.balance(), STARTING_BALANCE - LOSS_DEBIT);
    }

    #[test]
    fn loss_at_or_below_debit_resets_to_starting_balance() {
        for start in [LOSS_DEBIT, LOSS_DEBIT - 5] {
            let mut game = Game::new(start);
            game.start_round_seeded(9).unwrap();
            finish_shuffle(&mut game);
            let miss = wrong_cup(game.ball_cup().unwrap());
            game.guess(miss).unwrap();
            assert_eq!(game.balance(), STARTING_BALANCE);
        }
    }

    #[test]
    fn guess_rejected_while_shuffling() {
        let mut game = Game::new(STARTING_BALANCE);
        game.start_round_seeded(5).unwrap();
        assert_eq!(game.guess(CupId::Left), Err(RoundError::StillShuffling));
        assert_eq!(game.open_guessing(), Err(RoundError::StillShuffling));
    }

    #[test]
    fn second_guess_cannot_score_again() {
        let mut game = Game::new(STARTING_BALANCE);
        game.start_round_seeded(3).unwrap();
        finish_shuffle(&mut game);
        let ball = game.ball_cup().unwrap();
        game.guess(ball).unwrap();
        let balance = game.balance();
        assert_eq!(game.guess(ball), Err(RoundError::NoRound));
        assert_eq!(game.balance(), balance);
    }

    #[test]
    fn replay_only_from_terminal_states() {
        let mut game = Game::new(STARTING_BALANCE);
        assert_eq!(game.replay(), Err(RoundError::NoRound));
        game.start_round_seeded(3).unwrap();
        assert_eq!(game.replay(), Err(RoundError::RoundInProgress));
        finish_shuffle(&mut game);
        let ball = game.ball_cup().unwrap();
        game.guess(ball).unwrap();
        game.replay().unwrap();
        assert_eq!(game.state(), GameState::Ready);
        assert!(game.plan().is_none());
    }

    #[test]
    fn start_rejected_outside_ready() {
        let mut game = Game::new(STARTING_BALANCE);
        game.start_round_seeded(3).unwrap();
        assert_eq!(game.start_round_seeded(4), Err(RoundError::NotReady));
    }

    #[test]
    fn observers_run_synchronously_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut game = Game::new(STARTING_BALANCE);
        let sink = Rc::clone(&seen);
        game.observe(move |s| sink.borrow_mut().push(s));

        game.start_round_seeded(3).unwrap();
        finish_shuffle(&mut game);
        let ball = game.ball_cup().unwrap();
        game.guess(ball).unwrap();
        game.replay().unwrap();

        assert_eq!(*seen.borrow(), vec![GameState::InGame, GameState::Win, GameState::Ready]);
    }

    #[test]
    fn cancel_round_returns_to_ready_without_balance_change() {
        let mut game = Game::new(STARTING_BALANCE);
        game.start_round_seeded(3).unwrap();
        game.cancel_round();
        assert_eq!(game.state(), GameState::Ready);
        assert_eq!(game.balance(), STARTING_BALANCE);
        assert!(game.plan().is_none());
    }

    #[test]
    fn applied_spins_match_plan_order() {
        let mut game = Game::new(STARTING_BALANCE);
        game.start_round_seeded(11).unwrap();
        let planned: Vec<_> = game.plan().unwrap().spins().to_vec();
        let mut applied = Vec::new();
        while game.swaps_remaining() > 0 {
            applied.push(game.apply_next_spin().unwrap());
        }
        assert_eq!(applied, planned);
        assert_eq!(game.apply_next_spin(), Err(RoundError::AllSwapsApplied));
        assert_eq!(game.arrangement().unwrap(), game.plan().unwrap().final_arrangement());
    }
}
