//! Terminal checks.
//!
//! Game-over stages never mutate the board; they only report whether the
//! game has ended, short-circuiting any stage scheduled after them.

use std::collections::BTreeSet;

use crate::board::{BoardState, SnakeMove};
use crate::error::RulesError;
use crate::settings::Settings;

/// Standard terminal check (`gameover.standard`): over when fewer than two
/// snakes remain alive.
pub fn game_over_standard(
    state: &mut BoardState,
    _settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    Ok(state.living_count() <= 1)
}

/// Solo terminal check (`gameover.solo`): over only when no snake remains.
pub fn game_over_solo(
    state: &mut BoardState,
    _settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    Ok(state.living_count() == 0)
}

/// Squad terminal check (`gameover.squad`): over when the living snakes span
/// at most one squad. Unmapped snakes count as their own singleton squad.
pub fn game_over_squad(
    state: &mut BoardState,
    settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    let squads: BTreeSet<&str> = state
        .living_snakes()
        .map(|s| settings.squad.squad_of(&s.id).unwrap_or(s.id.as_str()))
        .collect();
    Ok(squads.len() <= 1)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{EliminationCause, Point};

    fn board_with(ids: &[&str]) -> BoardState {
        let mut board = BoardState::new(11, 11);
        for (i, id) in ids.iter().enumerate() {
            let x = i32::try_from(i).unwrap();
            board.place_snake(*id, vec![Point::new(x, 0), Point::new(x, 0)], 100);
        }
        board
    }

    fn eliminate(board: &mut BoardState, id: &str) {
        board
            .snake_mut(&crate::board::SnakeId::new(id))
            .unwrap()
            .eliminate(EliminationCause::OutOfHealth, None, 1);
    }

    #[test]
    fn standard_ends_at_one_or_zero_survivors() {
        let settings = Settings::default();
        let mut board = board_with(&["one", "two"]);
        assert!(!game_over_standard(&mut board, &settings, &[]).unwrap());

        eliminate(&mut board, "two");
        assert!(game_over_standard(&mut board, &settings, &[]).unwrap());

        eliminate(&mut board, "one");
        assert!(game_over_standard(&mut board, &settings, &[]).unwrap());
    }

    #[test]
    fn solo_ends_only_with_no_survivors() {
        let settings = Settings::default();
        let mut board = board_with(&["one"]);
        assert!(!game_over_solo(&mut board, &settings, &[]).unwrap());

        eliminate(&mut board, "one");
        assert!(game_over_solo(&mut board, &settings, &[]).unwrap());
    }

    #[test]
    fn squad_ends_when_one_squad_remains() {
        let mut settings = Settings::default();
        for (id, squad) in [("one", "red"), ("two", "red"), ("three", "blue")] {
            settings
                .squad
                .squad_map
                .insert(crate::board::SnakeId::new(id), squad.to_string());
        }

        let mut board = board_with(&["one", "two", "three"]);
        assert!(!game_over_squad(&mut board, &settings, &[]).unwrap());

        eliminate(&mut board, "three");
        assert!(game_over_squad(&mut board, &settings, &[]).unwrap());
    }

    #[test]
    fn unmapped_snakes_are_singleton_squads() {
        let settings = Settings::default();
        let mut board = board_with(&["one", "two"]);
        assert!(!game_over_squad(&mut board, &settings, &[]).unwrap());

        eliminate(&mut board, "two");
        assert!(game_over_squad(&mut board, &settings, &[]).unwrap());
    }
}
