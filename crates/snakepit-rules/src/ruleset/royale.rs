//! The royale ruleset: a shrinking safe zone of hazards.

use crate::board::{BoardState, SnakeMove};
use crate::error::RulesError;
use crate::settings::Settings;
use crate::stage::names;

use super::{next_state, run_game_over, Ruleset};

/// Stage sequence executed every turn. Hazard regeneration runs after
/// elimination so this turn's deaths are judged against last turn's zone.
const STAGES: &[&str] = &[
    names::MOVEMENT_STANDARD,
    names::REDUCE_HEALTH_STANDARD,
    names::HAZARD_DAMAGE_STANDARD,
    names::EAT_FOOD_STANDARD,
    names::ELIMINATE_STANDARD,
    names::SPAWN_HAZARDS_ROYALE,
    names::GAME_OVER_STANDARD,
    names::SPAWN_FOOD_STANDARD,
];

/// Royale rules: standard elimination plus a shrinking hazard border.
#[derive(Debug, Clone)]
pub struct RoyaleRuleset {
    settings: Settings,
}

impl RoyaleRuleset {
    /// Creates the ruleset with the given settings.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl Ruleset for RoyaleRuleset {
    fn name(&self) -> &str {
        "royale"
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
