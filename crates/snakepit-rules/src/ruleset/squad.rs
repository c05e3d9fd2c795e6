//! The squad ruleset and its "team" flavor.

use crate::board::{BoardState, SnakeMove};
use crate::error::RulesError;
use crate::settings::Settings;
use crate::stage::names;

use super::{next_state, run_game_over, Ruleset};

/// Stage sequence executed every turn. Resurrection must run before
/// attribute sharing so a body collision undone by `allow_body_collisions`
/// never triggers a shared elimination.
const STAGES: &[&str] = &[
    names::MOVEMENT_STANDARD,
    names::REDUCE_HEALTH_STANDARD,
    names::HAZARD_DAMAGE_STANDARD,
    names::EAT_FOOD_STANDARD,
    names::ELIMINATE_STANDARD,
    names::RESURRECT_SQUAD,
    names::SHARED_ATTRIBUTES_SQUAD,
    names::GAME_OVER_SQUAD,
    names::SPAWN_FOOD_STANDARD,
];

/// Squad rules: snakes win and lose together with their squad.
///
/// The "team" flavor is the same ruleset built with `game_type = "team"`;
/// the only observable difference is the elimination cause recorded when a
/// shared elimination takes a member down.
#[derive(Debug, Clone)]
pub struct SquadRuleset {
    settings: Settings,
}

impl SquadRuleset {
    /// Creates the ruleset with the given settings.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl Ruleset for SquadRuleset {
    fn name(&self) -> &str {
        &self.settings.game_type
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
        run_game_over(names::GAME_OVER_SQUAD, state, &self.settings)
    }
}

// =============================================================================
// Tests
// =============================================================================
