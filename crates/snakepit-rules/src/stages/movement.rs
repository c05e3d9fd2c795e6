//! Movement stages.
//!
//! For every living snake: compute the new head one cell in the requested
//! direction, push it at the front of the body, and pop the tail. A snake
//! therefore slides forward by one cell; growth happens when an earlier
//! feeding duplicated the tail, making the pop a no-op net of length.
//!
//! When a move is unrecognized (direction `None`), the snake keeps going
//! straight: the direction is derived from the head-minus-neck vector.
//! With no neck, or a neck stacked on the head (the start-of-game layout),
//! the default is up.
//!
//! The wrapped variant runs the same logic and then wraps any out-of-range
//! head coordinate onto the opposite edge.

use crate::board::{BoardState, Direction, Point, Snake, SnakeMove};
use crate::error::RulesError;
use crate::settings::Settings;

/// Standard movement stage (`snake.movement.standard`).
///
/// # Errors
///
/// [`RulesError::NoMoveFound`] when a living snake has no move entry;
/// [`RulesError::ZeroLengthSnake`] when a living snake has an empty body.
pub fn move_snakes(
    state: &mut BoardState,
    _settings: &Settings,
    moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    apply_moves(state, moves, false)
}

/// Wrapped movement stage (`snake.movement.wrapped`).
///
/// # Errors
///
/// Same as [`move_snakes`].
pub fn move_snakes_wrapped(
    state: &mut BoardState,
    _settings: &Settings,
    moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    apply_moves(state, moves, true)
}

fn apply_moves(
    state: &mut BoardState,
    moves: &[SnakeMove],
    wrapped: bool,
) -> Result<bool, RulesError> {
    let (width, height) = (state.width, state.height);
    for snake in &mut state.snakes {
        if snake.is_eliminated() {
            continue;
        }
        if snake.body.is_empty() {
            return Err(RulesError::ZeroLengthSnake(snake.id.clone()));
        }
        let mv = moves
            .iter()
            .find(|m| m.id == snake.id)
            .ok_or_else(|| RulesError::NoMoveFound(snake.id.clone()))?;

        let direction = mv.direction.unwrap_or_else(|| fallback_direction(snake));
        let (dx, dy) = direction.offset();
        let head = snake.body[0];
        let mut new_head = Point::new(head.x + dx, head.y + dy);
        if wrapped {
            new_head.x = wrap(new_head.x, 0, width - 1);
            new_head.y = wrap(new_head.y, 0, height - 1);
        }

        snake.body.insert(0, new_head);
        snake.body.pop();
    }
    Ok(false)
}

/// Continues straight: derives the direction from the neck-to-head vector.
/// Falls back to up with no neck or a stacked neck.
fn fallback_direction(snake: &Snake) -> Direction {
    match snake.body.as_slice() {
        [head, neck, ..] if neck != head => {
            if neck.x < head.x {
                Direction::Right
            } else if neck.x > head.x {
                Direction::Left
            } else if neck.y < head.y {
                Direction::Up
            } else {
                Direction::Down
            }
        }
        _ => Direction::Up,
    }
}

/// Wraps a coordinate onto the opposite edge: below `min` becomes `max`,
/// above `max` becomes `min`.
#[must_use]
pub fn wrap(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        max
    } else if value > max {
        min
    } else {
        value
    }
}

// =============================================================================
// Tests
// =============================================================================
