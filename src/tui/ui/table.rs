use crate::cups::CupId;
use crate::game::{GameState, Outcome};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{inner, rect_at};

const CUP_WIDTH: u16 = 9;
const CUP_HEIGHT: u16 = 4;
/// How far a lifted cup rises, in rows.
const LIFT_RISE: f32 = 2.0;

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(12),   // play area
            Constraint::Length(4), // status bar
        ])
        .split(size);

    // Header
    let note = if app.cue_active() { "  ♪" } else { "" };
    let header = Paragraph::new(Line::from(format!("Balance: {}{note}", app.balance())))
        .block(Block::default().title("cupgo-rs").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    // Play area: slot markers, cups, ball, result banner
    let play_block = Block::default().borders(Borders::ALL);
    let play = inner(chunks[1]);
    f.render_widget(play_block, chunks[1]);

    for (i, anchor) in app.slot_anchors().iter().enumerate() {
        let label_y = anchor.y + CUP_HEIGHT as f32 + 1.0;
        if let Some(rect) = rect_at(play, anchor.x + 3.0, label_y, 3, 1) {
            let style = if app.guessing_open() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            f.render_widget(Paragraph::new(Span::styled(format!("[{}]", i + 1), style)), rect);
        }
    }

    let view = app.stage_view();
    let lift = app.lift();
    for cup in CupId::ALL {
        let mut pos = view.cups[cup.index()];
        let mut lifted = false;
        if let Some((cup_up, progress)) = lift {
            if cup_up == cup {
                pos.y -= LIFT_RISE * progress;
                lifted = progress >= 1.0;
            }
        }
        if let Some(rect) = rect_at(play, pos.x, pos.y, CUP_WIDTH, CUP_HEIGHT) {
            let border = if lifted { BorderType::Double } else { BorderType::Rounded };
            let block = Block::default().borders(Borders::ALL).border_type(border);
            f.render_widget(Clear, rect);
            f.render_widget(block, rect);
        }
    }

    if view.ball_visible {
        if let Some(rect) = rect_at(play, view.ball.x, view.ball.y, 3, 1) {
            let ball = Paragraph::new(Span::styled(
                "(o)",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
            f.render_widget(Clear, rect);
            f.render_widget(ball, rect);
        }
    }

    if let Some(outcome) = app.last_result() {
        let (title, coins, color) = match outcome {
            Outcome::Win => ("YOU WIN", "+50", Color::Green),
            Outcome::Lose => ("YOU LOSE", "-10", Color::Red),
        };
        let banner = Paragraph::new(vec![
            Line::from(Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(coins, Style::default().fg(color))),
        ])
        .alignment(Alignment::Center);
        if let Some(rect) = rect_at(play, 0.0, 0.0, play.width, 2) {
            f.render_widget(banner, rect);
        }
    }

    // Status bar
    let status_lines = status_lines(app);
    let status = Paragraph::new(status_lines)
        .block(Block::default().title("Status").borders(Borders::ALL));
    f.render_widget(status, chunks[2]);
}

fn status_lines(app: &AppState) -> Vec<Line<'static>> {
    let hint = match app.game.state() {
        GameState::Ready => "[Enter] Play  [Esc] Back".to_string(),
        GameState::InGame => {
            if app.guessing_open() {
                "Pick a cup: [1] [2] [3]".to_string()
            } else {
                "Shuffling...".to_string()
            }
        }
        GameState::Win | GameState::Lose => "[R] Replay  [Esc] Back".to_string(),
    };
    let mut lines = vec![Line::from(hint)];
    if let Some(err) = app.store_error() {
        lines.push(Line::from(Span::styled(err.to_string(), Style::default().fg(Color::Red))));
    }
    lines
}
