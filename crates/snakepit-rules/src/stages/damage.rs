//! Per-turn health reduction stages: starvation and hazard damage.
//!
//! Starvation costs every living snake exactly one health per turn with no
//! floor; the elimination stage decides what health at or below zero means.
//! Hazard damage applies the configured per-turn amount once per hazard
//! entry under the head (duplicate entries stack) and floors at zero, so a
//! later feeding stage can still rescue the snake.

use crate::board::{BoardState, SnakeMove};
use crate::error::RulesError;
use crate::settings::Settings;

/// Starvation stage (`snake.reducehealth.standard`).
pub fn reduce_health(
    state: &mut BoardState,
    _settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    for snake in &mut state.snakes {
        if !snake.is_eliminated() {
            snake.health -= 1;
        }
    }
    Ok(false)
}

/// Hazard damage stage (`hazard.damage.standard`).
pub fn damage_hazards(
    state: &mut BoardState,
    settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    let damage = settings.hazard_damage_per_turn;
    if damage == 0 || state.hazards.is_empty() {
        return Ok(false);
    }

    for i in 0..state.snakes.len() {
        if state.snakes[i].is_eliminated() {
            continue;
        }
        let Some(head) = state.snakes[i].head() else {
            continue;
        };
        let hits = state.hazards.iter().filter(|&&h| h == head).count();
        if hits > 0 {
            let snake = &mut state.snakes[i];
            snake.health -= damage.saturating_mul(i32::try_from(hits).unwrap_or(i32::MAX));
            if snake.health < 0 {
                snake.health = 0;
            }
        }
    }
    Ok(false)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{EliminationCause, Point};

    fn board_with_snake(health: i32) -> BoardState {
        let mut board = BoardState::new(11, 11);
        board.place_snake(
            "one",
            vec![Point::new(5, 5), Point::new(5, 4), Point::new(5, 3)],
            health,
        );
        board
    }

    #[test]
    fn starvation_costs_one_health() {
        let mut board = board_with_snake(100);
        reduce_health(&mut board, &Settings::default(), &[]).unwrap();
        assert_eq!(board.snakes[0].health, 99);
    }

    #[test]
    fn starvation_has_no_floor() {
        let mut board = board_with_snake(0);
        reduce_health(&mut board, &Settings::default(), &[]).unwrap();
        assert_eq!(board.snakes[0].health, -1);
    }

    #[test]
    fn starvation_skips_eliminated_snakes() {
        let mut board = board_with_snake(80);
        board.snakes[0].eliminate(EliminationCause::OutOfBounds, None, 1);
        reduce_health(&mut board, &Settings::default(), &[]).unwrap();
        assert_eq!(board.snakes[0].health, 80);
    }

    #[test]
    fn hazard_hits_head_only() {
        let mut board = board_with_snake(100);
        board.add_hazard(Point::new(5, 4)); // body segment, not head
        damage_hazards(&mut board, &Settings::default(), &[]).unwrap();
        assert_eq!(board.snakes[0].health, 100);

        board.add_hazard(Point::new(5, 5)); // head
        damage_hazards(&mut board, &Settings::default(), &[]).unwrap();
        assert_eq!(board.snakes[0].health, 100 - 14);
    }

    #[test]
    fn duplicate_hazard_entries_stack() {
        let mut board = board_with_snake(100);
        board.add_hazard(Point::new(5, 5));
        board.add_hazard(Point::new(5, 5));
        damage_hazards(&mut board, &Settings::default(), &[]).unwrap();
        assert_eq!(board.snakes[0].health, 100 - 28);
    }

    #[test]
    fn hazard_damage_floors_at_zero() {
        let mut board = board_with_snake(5);
        board.add_hazard(Point::new(5, 5));
        damage_hazards(&mut board, &Settings::default(), &[]).unwrap();
        assert_eq!(board.snakes[0].health, 0);
    }

    #[test]
    fn configured_damage_is_used() {
        let mut board = board_with_snake(100);
        board.add_hazard(Point::new(5, 5));
        let settings = Settings {
            hazard_damage_per_turn: 30,
            ..Settings::default()
        };
        damage_hazards(&mut board, &settings, &[]).unwrap();
        assert_eq!(board.snakes[0].health, 70);
    }
}
