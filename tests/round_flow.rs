//! End-to-end round through the tick-driven app state: play, shuffle,
//! guess, score, replay. No terminal involved.

use cupgo_rs::game::GameState;
use cupgo_rs::store::{Prefs, PrefsStore};
use cupgo_rs::tui::app::{AppState, InputAction, Scene};
use std::time::Duration;

fn app_with_temp_store() -> (AppState, PrefsStore, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = PrefsStore::new(dir.path().join("prefs.json"));
    (AppState::with_store(store.clone()), store, dir)
}

fn tick_until(app: &mut AppState, cond: impl Fn(&AppState) -> bool) {
    for _ in 0..1000 {
        if cond(app) {
            return;
        }
        app.tick(Duration::from_millis(100));
    }
    panic!("condition not reached within 100 simulated seconds");
}

#[test]
fn winning_round_updates_and_persists_the_balance() {
    let (mut app, store, _dir) = app_with_temp_store();
    app.handle_input(InputAction::EnterGame);
    assert!(app.handle_input(InputAction::Play));
    assert_eq!(app.game.state(), GameState::InGame);

    tick_until(&mut app, |a| a.guessing_open());
    let ball = app.game.ball_cup().expect("ball cup set");
    let slot = app.game.arrangement().expect("arrangement set").slot_of(ball);
    assert!(app.handle_input(InputAction::GuessSlot(slot)));

    tick_until(&mut app, |a| a.game.state() == GameState::Win);
    assert_eq!(app.balance(), 140);
    assert_eq!(store.load().expect("prefs readable").balance, 140);
}

#[test]
fn losing_round_updates_and_persists_the_balance() {
    let (mut app, store, _dir) = app_with_temp_store();
    app.handle_input(InputAction::EnterGame);
    app.handle_input(InputAction::Play);

    tick_until(&mut app, |a| a.guessing_open());
    let ball = app.game.ball_cup().expect("ball cup set");
    let arrangement = app.game.arrangement().expect("arrangement set");
    let miss_slot = (0..3).find(|&s| arrangement.cup_at(s) != Some(ball)).expect("a miss exists");
    app.handle_input(InputAction::GuessSlot(miss_slot));

    tick_until(&mut app, |a| a.game.state() == GameState::Lose);
    assert_eq!(app.balance(), 90);
    assert_eq!(store.load().expect("prefs readable").balance, 90);
}

#[test]
fn replay_restores_the_start_layout_every_time() {
    let (mut app, _store, _dir) = app_with_temp_store();
    app.handle_input(InputAction::EnterGame);
    let anchors = app.slot_anchors();

    for _ in 0..3 {
        app.handle_input(InputAction::Play);
        tick_until(&mut app, |a| a.guessing_open());
        let ball = app.game.ball_cup().expect("ball cup set");
        let slot = app.game.arrangement().expect("arrangement set").slot_of(ball);
        app.handle_input(InputAction::GuessSlot(slot));
        tick_until(&mut app, |a| a.game.state() == GameState::Win);

        app.handle_input(InputAction::Replay);
        tick_until(&mut app, |a| !a.busy());
        assert_eq!(app.game.state(), GameState::Ready);

        let view = app.stage_view();
        assert_eq!(view.cups, anchors, "cups back on their start coordinates");
        assert!(view.ball_visible);
    }
}

#[test]
fn sound_off_means_no_cue_ever_sounds() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = PrefsStore::new(dir.path().join("prefs.json"));
    store.save(&Prefs { balance: 100, is_sound_on: false }).expect("prefs saved");
    let mut app = AppState::with_store(store);
    assert!(!app.sound_on());

    app.handle_input(InputAction::EnterGame);
    app.handle_input(InputAction::Play);
    let mut saw_cue = false;
    for _ in 0..200 {
        app.tick(Duration::from_millis(100));
        saw_cue |= app.cue_active();
        if app.guessing_open() {
            break;
        }
    }
    let ball = app.game.ball_cup().expect("ball cup set");
    let slot = app.game.arrangement().expect("arrangement set").slot_of(ball);
    app.handle_input(InputAction::GuessSlot(slot));
    for _ in 0..20 {
        app.tick(Duration::from_millis(100));
        saw_cue |= app.cue_active();
    }
    assert_eq!(app.game.state(), GameState::Win);
    assert!(!saw_cue, "no playback while the sound preference is off");
}

#[test]
fn leaving_the_game_scene_shows_the_current_balance_on_start() {
    let (mut app, _store, _dir) = app_with_temp_store();
    app.handle_input(InputAction::EnterGame);
    app.handle_input(InputAction::Play);
    tick_until(&mut app, |a| a.guessing_open());
    let ball = app.game.ball_cup().expect("ball cup set");
    let slot = app.game.arrangement().expect("arrangement set").slot_of(ball);
    app.handle_input(InputAction::GuessSlot(slot));
    tick_until(&mut app, |a| a.game.state() == GameState::Win);

    app.handle_input(InputAction::Back);
    assert_eq!(app.scene, Scene::Start);
    assert_eq!(app.balance(), 140);
}
