//! Ruleset variants composing the builtin stages.
//!
//! A [`Ruleset`] bundles a [`Settings`] bag with a fixed stage sequence and
//! exposes the three operations game runners call: create the initial board,
//! compute the next board from moves, and check whether the game is over.
//! Every variant resolves its stages against [`default_registry`] at call
//! time, so a variant is nothing more than a name, a settings bag, and a
//! list of stage names.
//!
//! # Determinism
//!
//! Initial board creation draws every random choice (start shuffling, food
//! placement) from `settings.rng(0)`, so a seeded game produces the same
//! starting board on every run. `is_game_over` runs only the variant's
//! game-over stage against a clone with the turn untouched, which makes it
//! idempotent and free of RNG consumption.
//!
//! # Example
//!
//! ```
//! use snakepit_rules::board::{Direction, SnakeId, SnakeMove};
//! use snakepit_rules::ruleset::{Ruleset, StandardRuleset};
//! use snakepit_rules::settings::Settings;
//!
//! let ruleset = StandardRuleset::new(Settings::with_seed(42));
//! let ids = [SnakeId::new("one"), SnakeId::new("two")];
//! let board = ruleset.create_initial_board_state(11, 11, &ids).unwrap();
//!
//! let moves = [
//!     SnakeMove::new("one", Direction::Up),
//!     SnakeMove::new("two", Direction::Up),
//! ];
//! let next = ruleset.create_next_board_state(&board, &moves).unwrap();
//! assert_eq!(next.turn, 1);
//! ```

mod constrictor;
mod royale;
mod solo;
mod squad;
mod standard;
mod wrapped;

pub use constrictor::ConstrictorRuleset;
pub use royale::RoyaleRuleset;
pub use solo::SoloRuleset;
pub use squad::SquadRuleset;
pub use standard::StandardRuleset;
pub use wrapped::WrappedRuleset;

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::board::{BoardState, Point, Snake, SnakeId, SnakeMove, SNAKE_MAX_HEALTH};
use crate::error::RulesError;
use crate::pipeline::Pipeline;
use crate::settings::Settings;
use crate::stage::default_registry;
use crate::stages::feeding::place_food_randomly;

/// Square board sizes with fixed start positions.
const KNOWN_BOARD_SIZES: [i32; 3] = [7, 11, 19];

/// A game variant: a settings bag plus a fixed stage sequence.
pub trait Ruleset {
    /// The wire name of this variant.
    fn name(&self) -> &str;

    /// The settings this variant was built with.
    fn settings(&self) -> &Settings;

    /// Builds the starting board for the given snakes.
    ///
    /// # Errors
    ///
    /// [`RulesError::TooManySnakes`], [`RulesError::NoRoomForSnake`], or
    /// [`RulesError::NoRoomForFood`] when the board cannot hold the
    /// requested layout.
    fn create_initial_board_state(
        &self,
        width: i32,
        height: i32,
        ids: &[SnakeId],
    ) -> Result<BoardState, RulesError> {
        initial_board(self.settings(), width, height, ids)
    }

    /// Computes the board after one turn, leaving `prev` untouched.
    ///
    /// # Errors
    ///
    /// Any stage error; the turn then has no result.
    fn create_next_board_state(
        &self,
        prev: &BoardState,
        moves: &[SnakeMove],
    ) -> Result<BoardState, RulesError>;

    /// Reports whether the game has ended, without advancing it.
    ///
    /// # Errors
    ///
    /// Any error from the variant's game-over stage.
    fn is_game_over(&self, state: &BoardState) -> Result<bool, RulesError>;
}

/// Builds a boxed variant from its wire name, defaulting to standard for
/// unrecognized names. "team" builds a squad ruleset that reports
/// team-flavored eliminations.
#[must_use]
pub fn ruleset_with_params(name: &str, params: &BTreeMap<String, String>) -> Box<dyn Ruleset> {
    let mut settings = Settings::from_params(params);
    match name {
        "solo" => {
            settings.game_type = name.to_string();
            Box::new(SoloRuleset::new(settings))
        }
        "royale" => {
            settings.game_type = name.to_string();
            Box::new(RoyaleRuleset::new(settings))
        }
        "wrapped" => {
            settings.game_type = name.to_string();
            Box::new(WrappedRuleset::new(settings))
        }
        "constrictor" => {
            settings.game_type = name.to_string();
            Box::new(ConstrictorRuleset::new(settings))
        }
        "squad" | "team" => {
            settings.game_type = name.to_string();
            Box::new(SquadRuleset::new(settings))
        }
        _ => {
            settings.game_type = "standard".to_string();
            Box::new(StandardRuleset::new(settings))
        }
    }
}

/// Runs a stage sequence for one turn and returns the new board.
pub(crate) fn next_state(
    settings: &Settings,
    stage_names: &[&str],
    prev: &BoardState,
    moves: &[SnakeMove],
) -> Result<BoardState, RulesError> {
    let (ended, next) =
        Pipeline::from_registry(default_registry(), stage_names).execute(prev, settings, moves)?;
    if ended {
        debug!(turn = next.turn, "game ended");
    }
    Ok(next)
}

/// Runs a single game-over stage against a clone of the state.
pub(crate) fn run_game_over(
    stage_name: &str,
    state: &BoardState,
    settings: &Settings,
) -> Result<bool, RulesError> {
    let stage = default_registry()
        .get(stage_name)
        .ok_or_else(|| RulesError::StageNotFound(stage_name.to_string()))?;
    let mut probe = state.clone();
    stage(&mut probe, settings, &[])
}

// =============================================================================
// Initial board creation
// =============================================================================

/// Builds the starting board shared by every variant: stacked three-point
/// snakes at full health, plus the initial food layout.
pub(crate) fn initial_board(
    settings: &Settings,
    width: i32,
    height: i32,
    ids: &[SnakeId],
) -> Result<BoardState, RulesError> {
    let mut state = BoardState::new(width, height);
    let mut rng = settings.rng(0);

    if width == height && KNOWN_BOARD_SIZES.contains(&width) {
        place_snakes_fixed(&mut state, &mut rng, ids)?;
        place_food_fixed(&mut state, &mut rng)?;
    } else {
        place_snakes_randomly(&mut state, &mut rng, ids)?;
        place_food_randomly(&mut state, &mut rng, ids.len());
    }
    Ok(state)
}

/// Places snakes on the eight fixed start points of a known square board:
/// the four corners and the four edge midpoints, one cell in from the edge.
fn place_snakes_fixed(
    state: &mut BoardState,
    rng: &mut ChaCha8Rng,
    ids: &[SnakeId],
) -> Result<(), RulesError> {
    let (mn, md, mx) = (1, (state.width - 1) / 2, state.width - 2);
    let mut starts = [
        Point::new(mn, mn),
        Point::new(mn, mx),
        Point::new(mx, mn),
        Point::new(mx, mx),
        Point::new(mn, md),
        Point::new(md, mn),
        Point::new(md, mx),
        Point::new(mx, md),
    ];
    if ids.len() > starts.len() {
        return Err(RulesError::TooManySnakes);
    }
    starts.shuffle(rng);
    for (id, &start) in ids.iter().zip(starts.iter()) {
        state.place_snake(id.clone(), vec![start; 3], SNAKE_MAX_HEALTH);
    }
    Ok(())
}

/// Places snakes on random unoccupied cells of even parity, so no two
/// snakes can collide head-to-head on the first turn.
fn place_snakes_randomly(
    state: &mut BoardState,
    rng: &mut ChaCha8Rng,
    ids: &[SnakeId],
) -> Result<(), RulesError> {
    let mut cells: Vec<Point> = state
        .unoccupied_points()
        .into_iter()
        .filter(|p| (p.x + p.y) % 2 == 0)
        .collect();
    cells.shuffle(rng);
    for id in ids {
        let Some(start) = cells.pop() else {
            return Err(RulesError::NoRoomForSnake);
        };
        state.place_snake(id.clone(), vec![start; 3], SNAKE_MAX_HEALTH);
    }
    Ok(())
}

/// Places one food diagonally adjacent to each snake on a known board, plus
/// one in the center when the center is free.
fn place_food_fixed(state: &mut BoardState, rng: &mut ChaCha8Rng) -> Result<(), RulesError> {
    let center = state.center();
    let heads: Vec<Point> = state.snakes.iter().filter_map(Snake::head).collect();
    for head in heads {
        let candidates: Vec<Point> = [(-1, -1), (-1, 1), (1, -1), (1, 1)]
            .iter()
            .map(|&(dx, dy)| Point::new(head.x + dx, head.y + dy))
            .filter(|&p| p != center && state.contains(p) && state.is_unoccupied(p))
            .collect();
        let Some(&food) = candidates.choose(rng) else {
            return Err(RulesError::NoRoomForFood);
        };
        state.add_food(food);
    }
    if state.is_unoccupied(center) {
        state.add_food(center);
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
