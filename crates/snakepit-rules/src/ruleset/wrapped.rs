//! The wrapped ruleset: a toroidal board with no walls.

use crate::board::{BoardState, SnakeMove};
use crate::error::RulesError;
use crate::settings::Settings;
use crate::stage::names;

use super::{next_state, run_game_over, Ruleset};

/// Stage sequence executed every turn. Only movement differs from standard:
/// heads wrap instead of leaving the board, so the out-of-bounds elimination
/// rule can never fire.
const STAGES: &[&str] = &[
    names::MOVEMENT_WRAPPED,
    names::REDUCE_HEALTH_STANDARD,
    names::HAZARD_DAMAGE_STANDARD,
    names::EAT_FOOD_STANDARD,
    names::ELIMINATE_STANDARD,
    names::GAME_OVER_STANDARD,
    names::SPAWN_FOOD_STANDARD,
];

/// Wrapped rules: standard elimination on a torus.
#[derive(Debug, Clone)]
pub struct WrappedRuleset {
    settings: Settings,
}

impl WrappedRuleset {
    /// Creates the ruleset with the given settings.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl Ruleset for WrappedRuleset {
    fn name(&self) -> &str {
        "wrapped"
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn create_next_board_state(
        &self,
        prev: &BoardState,
        moves: &[SnakeMove],
    ) -> Result<BoardState, RulesError> {
        next_state(&self.settings, STAGES, prev, moves)
    }

    fn is_game_over(&self, state: &BoardState) -> Result<bool, RulesError> {
        run_game_over(names::GAME_OVER_STANDARD, state, &self.settings)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Direction, Point, SnakeId};

    #[test]
    fn edge_crossing_wraps_instead_of_eliminating() {
        let ruleset = WrappedRuleset::new(Settings::with_seed(1));
        let mut board = BoardState::new(11, 11);
        board.place_snake(
            "one",
            vec![Point::new(0, 5), Point::new(1, 5), Point::new(2, 5)],
            80,
        );
        board.place_snake(
            "two",
            vec![Point::new(5, 10), Point::new(5, 9), Point::new(5, 8)],
            80,
        );
        let moves = [
            SnakeMove::new("one", Direction::Left),
            SnakeMove::new("two", Direction::Up),
        ];

        let next = ruleset.create_next_board_state(&board, &moves).unwrap();

        let one = next.snake(&SnakeId::new("one")).unwrap();
        assert_eq!(one.head(), Some(Point::new(10, 5)));
        assert!(!one.is_eliminated());
        let two = next.snake(&SnakeId::new("two")).unwrap();
        assert_eq!(two.head(), Some(Point::new(5, 0)));
        assert!(!two.is_eliminated());
    }
}
