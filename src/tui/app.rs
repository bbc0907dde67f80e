mod stage;
mod state;

pub use stage::{Stage, StageView};
pub use state::{AppState, InputAction, Scene};
