use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

/// Link shown by the info overlay.
const PRIVACY_URL: &str =
    "https://doc-hosting.flycricket.io/leader-cup-privacy-policy/d382f9ba-f8ba-4325-bbc6-dc81ba83089e/privacy";

pub(super) fn draw_start(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let area = centered_rect(80, 80, size);
    let block = Block::default().title("cupgo-rs").borders(Borders::ALL);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    let inner_all = inner(area);

    // ASCII logo at the top (render left-aligned to preserve spacing)
    let logo = r#"
  ____ _   _ ____     ____  ___
 / ___| | | |  _ \   / ___|/ _ \
| |   | | | | |_) | | |  _| | | |
| |___| |_| |  __/  | |_| | |_| |
 \____|\___/|_|      \____|\___/
"#;

    let logo_lines: Vec<Line> = logo
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Cyan))))
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(logo_lines.len() as u16 + 1), Constraint::Min(3)])
        .split(inner_all);

    let logo_para =
        Paragraph::new(logo_lines).wrap(Wrap { trim: false }).alignment(Alignment::Center);
    f.render_widget(logo_para, rows[0]);

    let sound = if app.sound_on() { "on" } else { "off" };
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!("Balance: {}", app.balance()),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!("Sound: {sound}")));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Start  [S] Sound  [I] Info  [Q] Quit",
        Style::default().add_modifier(Modifier::DIM),
    )));
    if let Some(err) = app.store_error() {
        lines.push(Line::from(Span::styled(err.to_string(), Style::default().fg(Color::Red))));
    }
    let para = Paragraph::new(lines).wrap(Wrap { trim: true }).alignment(Alignment::Center);
    f.render_widget(para, rows[1]);

    if app.info_open() {
        draw_info_overlay(f, size);
    }
}

fn draw_info_overlay(f: &mut Frame, size: Rect) {
    let area = centered_rect(70, 40, size);
    f.render_widget(Clear, area);
    let block = Block::default().title("Info").borders(Borders::ALL);
    f.render_widget(block, area);
    let lines = vec![
        Line::from("Find the ball under the shuffled cups."),
        Line::from("Wins pay out, misses cost you; the bank refills at zero."),
        Line::from(""),
        Line::from("Privacy policy:"),
        Line::from(Span::styled(PRIVACY_URL, Style::default().fg(Color::Blue))),
        Line::from(""),
        Line::from(Span::styled("[Esc] Close", Style::default().add_modifier(Modifier::DIM))),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true }).alignment(Alignment::Center);
    f.render_widget(para, inner(area));
}
