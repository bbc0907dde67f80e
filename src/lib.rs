//! cupgo-rs: three-cup shell game
//!
//! Goals:
//! - Deterministic, UI-independent game rules (state machine, shuffle,
//!   balance) with an injectable random source
//! - Small, well-documented public API
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: play one seeded round
//! ```
//! use cupgo_rs::game::{Game, GameState};
//!
//! let mut game = Game::new(100);
//! game.start_round_seeded(7).unwrap();
//! assert_eq!(game.state(), GameState::InGame);
//!
//! while game.swaps_remaining() > 0 {
//!     game.apply_next_spin().unwrap();
//! }
//! game.open_guessing().unwrap();
//!
//! let ball = game.ball_cup().unwrap();
//! game.guess(ball).unwrap();
//! assert_eq!(game.state(), GameState::Win);
//! assert_eq!(game.balance(), 140);
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin cupgo-rs
//! ```

pub mod audio;
pub mod coords;
pub mod cups;
pub mod engine;
pub mod game;
pub mod shuffle;
pub mod store;
pub mod timeline;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
