mod layout;
mod start;
mod table;

use crate::tui::app::{AppState, Scene};
use ratatui::prelude::Frame;

pub fn draw(f: &mut Frame, app: &AppState) {
    match app.scene {
        Scene::Start => start::draw_start(f, app),
        Scene::Game => table::draw_table(f, app),
    }
}
