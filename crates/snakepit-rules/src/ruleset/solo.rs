//! The solo ruleset: one snake surviving as long as it can.

use crate::board::{BoardState, SnakeMove};
use crate::error::RulesError;
use crate::settings::Settings;
use crate::stage::names;

use super::{next_state, run_game_over, Ruleset};

/// Stage sequence executed every turn.
const STAGES: &[&str] = &[
    names::MOVEMENT_STANDARD,
    names::REDUCE_HEALTH_STANDARD,
    names::HAZARD_DAMAGE_STANDARD,
    names::EAT_FOOD_STANDARD,
    names::ELIMINATE_STANDARD,
    names::GAME_OVER_SOLO,
    names::SPAWN_FOOD_STANDARD,
];

/// Solo rules: the game runs until the last snake is eliminated.
#[derive(Debug, Clone)]
pub struct SoloRuleset {
    settings: Settings,
}

impl SoloRuleset {
    /// Creates the ruleset with the given settings.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl Ruleset for SoloRuleset {
    fn name(&self) -> &str {
        "solo"
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
        run_game_over(names::GAME_OVER_SOLO, state, &self.settings)
    }
}

// =============================================================================
// Tests
// =============================================================================
