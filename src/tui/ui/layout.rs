use ratatui::layout::Constraint;
use ratatui::prelude::{Layout, Rect};

pub(super) fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(ratatui::prelude::Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let area = Layout::default()
        .direction(ratatui::prelude::Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);
    area[1]
}

/// Place a fixed-size box at cell coordinates inside `area`, clipped to it.
/// Returns `None` when the anchor falls entirely outside.
pub(super) fn rect_at(area: Rect, x: f32, y: f32, width: u16, height: u16) -> Option<Rect> {
    let x = area.x.saturating_add(x.round().max(0.0) as u16);
    let y = area.y.saturating_add(y.round().max(0.0) as u16);
    if x >= area.right() || y >= area.bottom() {
        return None;
    }
    let width = width.min(area.right() - x);
    let height = height.min(area.bottom() - y);
    if width == 0 || height == 0 {
        return None;
    }
    Some(Rect { x, y, width, height })
}
