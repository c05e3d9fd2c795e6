//! The constrictor ruleset: every snake grows every turn.

use crate::board::{BoardState, SnakeMove};
use crate::error::RulesError;
use crate::settings::Settings;
use crate::stage::names;

use super::{next_state, run_game_over, Ruleset};

/// Stage sequence executed every turn. Constant growth replaces hazards,
/// feeding, and food spawning entirely; health never drops below maximum so
/// starvation can never eliminate a snake.
const STAGES: &[&str] = &[
    names::MOVEMENT_STANDARD,
    names::REDUCE_HEALTH_STANDARD,
    names::GROW_CONSTRICTOR,
    names::ELIMINATE_STANDARD,
    names::GAME_OVER_STANDARD,
];

/// Constrictor rules: the board fills up until somebody collides.
#[derive(Debug, Clone)]
pub struct ConstrictorRuleset {
    settings: Settings,
}

impl ConstrictorRuleset {
    /// Creates the ruleset with the given settings.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl Ruleset for ConstrictorRuleset {
    fn name(&self) -> &str {
        "constrictor"
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
