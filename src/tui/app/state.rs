use super::stage::{Stage, StageView};
use crate::audio::{Cue, Mixer, NullSink};
use crate::cups::CupId;
use crate::game::{Game, GameState, Outcome};
use crate::store::{Prefs, PrefsStore};
use crate::timeline::{reset_script, reveal_script, shuffle_script, StepAction, Timeline};
use rand::Rng;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Start,
    Game,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    EnterGame,
    Back,
    Play,
    GuessSlot(usize),
    Replay,
    ToggleSound,
    ToggleInfo,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    // Core game instance; lives across both scenes so the start screen
    // always shows the current balance.
    pub game: Game,
    store: PrefsStore,
    prefs: Prefs,
    mixer: Mixer<NullSink>,
    timeline: Timeline,
    stage: Stage,
    // State transitions queued by the game observer, drained after every
    // input and tick.
    transitions: Rc<RefCell<VecDeque<GameState>>>,
    started_step: Option<usize>,
    info_open: bool,
    last_result: Option<Outcome>,
    store_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_store(PrefsStore::from_env())
    }
}

impl AppState {
    pub fn with_store(store: PrefsStore) -> Self {
        let prefs = store.load_or_default();
        let mut game = Game::new(prefs.balance);
        let transitions: Rc<RefCell<VecDeque<GameState>>> = Rc::default();
        let queue = Rc::clone(&transitions);
        game.observe(move |state| queue.borrow_mut().push_back(state));
        Self {
            scene: Scene::Start,
            game,
            mixer: Mixer::new(NullSink, prefs.is_sound_on),
            prefs,
            store,
            timeline: Timeline::new(),
            stage: Stage::new(),
            transitions,
            started_step: None,
            info_open: false,
            last_result: None,
            store_error: None,
        }
    }

    pub fn balance(&self) -> u64 {
        self.game.balance()
    }

    pub fn sound_on(&self) -> bool {
        self.prefs.is_sound_on
    }

    pub fn info_open(&self) -> bool {
        self.info_open
    }

    pub fn last_result(&self) -> Option<Outcome> {
        self.last_result
    }

    pub fn store_error(&self) -> Option<&str> {
        self.store_error.as_deref()
    }

    /// Whether an animation is in flight.
    pub fn busy(&self) -> bool {
        !self.timeline.is_idle()
    }

    pub fn guessing_open(&self) -> bool {
        self.game.guessing_open()
    }

    /// Whether any cue is currently sounding (drives the note marker).
    pub fn cue_active(&self) -> bool {
        self.mixer.active_voices() > 0
    }

    /// Fixed slot anchor positions, for the slot key markers.
    pub fn slot_anchors(&self) -> [crate::coords::Coordinates; 3] {
        self.stage.start_layout().cups
    }

    /// Positions for the renderer, interpolated by the in-flight step.
    pub fn stage_view(&self) -> StageView {
        self.stage.view(self.timeline.current().map(|(_, progress)| progress))
    }

    /// The cup being lifted and its flip progress, if a lift is showing.
    pub fn lift(&self) -> Option<(CupId, f32)> {
        if let Some((StepAction::Lift(cup), progress)) = self.timeline.current() {
            return Some((cup, progress));
        }
        self.stage.view(None).lifted.map(|cup| (cup, 1.0))
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleInfo => {
                self.info_open = !self.info_open;
                true
            }
            InputAction::EnterGame => {
                if self.scene != Scene::Start {
                    return false;
                }
                self.scene = Scene::Game;
                true
            }
            InputAction::Back => self.leave_game(),
            InputAction::Play => self.play(),
            InputAction::GuessSlot(slot) => self.guess_slot(slot),
            InputAction::Replay => self.replay(),
            InputAction::ToggleSound => {
                self.prefs.is_sound_on = !self.prefs.is_sound_on;
                self.mixer.set_enabled(self.prefs.is_sound_on);
                self.persist();
                true
            }
        }
    }

    /// Advance the animation clock. One tick drives the whole cooperative
    /// chain: swap, pause, next swap, guessing, lift, scoring.
    pub fn tick(&mut self, dt: Duration) {
        self.mixer.tick(dt);
        if self.scene != Scene::Game {
            return;
        }
        let done = self.timeline.advance(dt);
        for action in done {
            self.apply_completed(action);
        }
        self.drain_transitions();
        self.start_front_step();
    }

    fn play(&mut self) -> bool {
        if self.scene != Scene::Game
            || self.game.state() != GameState::Ready
            || !self.timeline.is_idle()
        {
            return false;
        }
        let seed: u64 = rand::rng().random();
        if self.game.start_round_seeded(seed).is_err() {
            return false;
        }
        self.drain_transitions();
        if let Some(plan) = self.game.plan().cloned() {
            self.timeline = shuffle_script(&plan);
        }
        self.started_step = None;
        self.start_front_step();
        true
    }

    fn guess_slot(&mut self, slot: usize) -> bool {
        if self.scene != Scene::Game || !self.game.guessing_open() || !self.timeline.is_idle() {
            return false;
        }
        let Some(cup) = self.game.arrangement().and_then(|a| a.cup_at(slot)) else {
            return false;
        };
        self.timeline = reveal_script(cup);
        self.started_step = None;
        self.start_front_step();
        true
    }

    fn replay(&mut self) -> bool {
        if self.scene != Scene::Game || !self.timeline.is_idle() {
            return false;
        }
        if self.game.replay().is_err() {
            return false;
        }
        self.drain_transitions();
        true
    }

    /// Back to the start screen. Any in-flight round is abandoned and the
    /// stage snaps straight back to the captured layout.
    fn leave_game(&mut self) -> bool {
        if self.scene != Scene::Game {
            return false;
        }
        self.timeline.clear();
        self.game.cancel_round();
        self.transitions.borrow_mut().clear();
        self.stage = Stage::new();
        self.started_step = None;
        self.last_result = None;
        self.scene = Scene::Start;
        true
    }

    fn apply_completed(&mut self, action: StepAction) {
        match action {
            StepAction::Swap(_) => {
                let _ = self.game.apply_next_spin();
                self.stage.step_completed(action);
            }
            StepAction::OpenGuessing => {
                let _ = self.game.open_guessing();
            }
            StepAction::Lift(cup) => {
                self.stage.step_completed(action);
                if let Ok(Outcome::Win) = self.game.guess(cup) {
                    self.stage.reveal_ball_at(cup);
                }
            }
            _ => self.stage.step_completed(action),
        }
    }

    fn start_front_step(&mut self) {
        let Some((action, _)) = self.timeline.current() else {
            return;
        };
        let id = self.timeline.completed();
        if self.started_step == Some(id) {
            return;
        }
        self.started_step = Some(id);
        if matches!(action, StepAction::Swap(_)) {
            self.mixer.play(Cue::Shuffle);
        }
        self.stage.step_started(action, self.game.ball_cup());
    }

    fn drain_transitions(&mut self) {
        loop {
            let next = self.transitions.borrow_mut().pop_front();
            let Some(state) = next else { break };
            self.on_state(state);
        }
    }

    fn on_state(&mut self, state: GameState) {
        match state {
            GameState::InGame => {
                self.last_result = None;
            }
            GameState::Win => {
                self.mixer.play(Cue::Win);
                self.last_result = Some(Outcome::Win);
                self.persist();
            }
            GameState::Lose => {
                self.mixer.play(Cue::Lose);
                self.last_result = Some(Outcome::Lose);
                self.persist();
            }
            GameState::Ready => {
                self.last_result = None;
                self.timeline = reset_script();
                self.started_step = None;
                self.start_front_step();
            }
        }
    }

    fn persist(&mut self) {
        self.prefs.balance = self.game.balance();
        match self.store.save(&self.prefs) {
            Ok(()) => self.store_error = None,
            Err(e) => self.store_error = Some(e.to_string()),
        }
    }
}
