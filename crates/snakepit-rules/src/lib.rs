//! # Snakepit Rules
//!
//! Deterministic turn-resolution kernel for competitive snake games.
//!
//! The library computes the next board state from a previous state and a set
//! of per-snake moves. It has no I/O, no clock, and no global state: given
//! the same settings (including a fixed seed), the same board, and the same
//! moves, it produces bit-identical results on every run.
//!
//! ## Architecture
//!
//! - **Board** ([`board`]): the passive data model a turn transforms.
//! - **Stages** ([`stage`], [`stages`]): named single-concern transformations
//!   (movement, starvation, feeding, elimination, ...) with one uniform
//!   function shape.
//! - **Pipeline** ([`pipeline`]): an ordered stage sequence executed against
//!   a clone of the previous state, short-circuiting once a stage reports
//!   the game has ended.
//! - **Rulesets** ([`ruleset`]): the shipped variants (standard, solo,
//!   royale, squad/team, wrapped, constrictor), each a settings bag plus a
//!   stage sequence.
//!
//! ## Usage
//!
//! ```
//! use snakepit_rules::board::{Direction, SnakeId, SnakeMove};
//! use snakepit_rules::ruleset::{Ruleset, StandardRuleset};
//! use snakepit_rules::settings::Settings;
//!
//! let ruleset = StandardRuleset::new(Settings::with_seed(2024));
//! let ids = [SnakeId::new("vipera"), SnakeId::new("boa")];
//! let mut board = ruleset.create_initial_board_state(11, 11, &ids).unwrap();
//!
//! while !ruleset.is_game_over(&board).unwrap() {
//!     let moves = [
//!         SnakeMove::new("vipera", Direction::Up),
//!         SnakeMove::new("boa", Direction::Down),
//!     ];
//!     board = ruleset.create_next_board_state(&board, &moves).unwrap();
//! }
//! assert!(board.turn > 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod board;
pub mod error;
pub mod pipeline;
pub mod ruleset;
pub mod settings;
pub mod stage;
pub mod stages;

#[cfg(test)]
mod tests;

pub use board::{BoardState, Direction, Point, Snake, SnakeId, SnakeMove};
pub use error::RulesError;
pub use pipeline::Pipeline;
pub use ruleset::{ruleset_with_params, Ruleset};
pub use settings::Settings;
pub use stage::{default_registry, StageRegistry};
