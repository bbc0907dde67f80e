use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick(last_tick.elapsed());
            last_tick = Instant::now();
        }
    }
    Ok(())
}

fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    if app.info_open() {
        if matches!(code, KeyCode::Esc | KeyCode::Char('i') | KeyCode::Char('I')) {
            let _ = app.handle_input(InputAction::ToggleInfo);
        }
        return false;
    }

    match app.scene {
        Scene::Start => match code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                let _ = app.handle_input(InputAction::EnterGame);
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                let _ = app.handle_input(InputAction::ToggleSound);
            }
            KeyCode::Char('i') | KeyCode::Char('I') => {
                let _ = app.handle_input(InputAction::ToggleInfo);
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        },
        Scene::Game => match code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                let _ = app.handle_input(InputAction::Play);
            }
            KeyCode::Char(c @ '1'..='3') => {
                let slot = (c as u8 - b'1') as usize;
                let _ = app.handle_input(InputAction::GuessSlot(slot));
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let _ = app.handle_input(InputAction::Replay);
            }
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                let _ = app.handle_input(InputAction::Back);
            }
            _ => {}
        },
    }
    false
}
