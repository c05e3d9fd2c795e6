//! Shared builders for cross-module tests.

use crate::board::{BoardState, Direction, Point, SnakeMove};

/// Builds a board from `(id, body, health)` triples.
pub fn board_with(width: i32, height: i32, snakes: &[(&str, &[(i32, i32)], i32)]) -> BoardState {
    let mut board = BoardState::new(width, height);
    for &(id, body, health) in snakes {
        board.place_snake(
            id,
            body.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            health,
        );
    }
    board
}

/// Builds a move list from `(id, direction)` pairs.
pub fn moves_for(pairs: &[(&str, Direction)]) -> Vec<SnakeMove> {
    pairs
        .iter()
        .map(|&(id, direction)| SnakeMove::new(id, direction))
        .collect()
}

/// A scripted move policy: every living snake walks a deterministic pattern
/// derived from the turn counter, cycling through all four directions.
pub fn scripted_moves(state: &BoardState) -> Vec<SnakeMove> {
    state
        .snakes
        .iter()
        .enumerate()
        .map(|(i, snake)| {
            let step = usize::try_from(state.turn).unwrap() + i;
            let direction = match step % 4 {
                0 => Direction::Up,
                1 => Direction::Right,
                2 => Direction::Down,
                _ => Direction::Left,
            };
            SnakeMove::new(snake.id.clone(), direction)
        })
        .collect()
}
