//! Stage function contract and stage registry.
//!
//! A stage is a single named transformation applied to a board state during
//! one turn. Stage functions have the uniform shape
//! `(state, settings, moves) -> Result<ended, error>` and mutate the state
//! in place; the [`StageRegistry`] maps stable string names to stage
//! functions so rulesets can compose different turn-processing recipes from
//! shared primitives.
//!
//! # Registry model
//!
//! The registry is an explicit value passed to pipeline constructors. A
//! process-wide default instance seeded with every builtin stage is
//! available from [`default_registry`]; it is built once from a fixed table
//! and never mutated. Callers that need extra stages clone a registry and
//! register into the clone:
//!
//! ```
//! use snakepit_rules::stage::{default_registry, StageRegistry};
//!
//! let mut registry = default_registry().clone();
//! registry
//!     .register("hazard.spawn.spiral", |_state, _settings, _moves| Ok(false))
//!     .unwrap();
//! assert!(registry.get("hazard.spawn.spiral").is_some());
//! ```
//!
//! Registering a duplicate name is a programmer error: [`StageRegistry::register`]
//! reports it as a recoverable [`RulesError::StageRegisteredTwice`], while
//! [`StageRegistry::must_register`] panics for callers that prefer failing
//! fast.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::board::{BoardState, SnakeMove};
use crate::error::RulesError;
use crate::settings::Settings;
use crate::stages;

/// Stable stage names. These strings are part of the wire contract: a game
/// archive that records a stage sequence must replay against the same names.
pub mod names {
    /// Standard movement: offset heads, pop tails.
    pub const MOVEMENT_STANDARD: &str = "snake.movement.standard";
    /// Movement with toroidal boundary wrapping.
    pub const MOVEMENT_WRAPPED: &str = "snake.movement.wrapped";
    /// Per-turn health decrement.
    pub const REDUCE_HEALTH_STANDARD: &str = "snake.reducehealth.standard";
    /// Per-turn hazard damage for heads inside hazards.
    pub const HAZARD_DAMAGE_STANDARD: &str = "hazard.damage.standard";
    /// Feeding: heal and grow snakes whose head is on food.
    pub const EAT_FOOD_STANDARD: &str = "snake.eatfood.standard";
    /// Ordered elimination rules over the post-movement snapshot.
    pub const ELIMINATE_STANDARD: &str = "snake.eliminate.standard";
    /// Minimum-food top-up plus chance-based extra spawn.
    pub const SPAWN_FOOD_STANDARD: &str = "food.spawn.standard";
    /// Game over when fewer than two snakes remain.
    pub const GAME_OVER_STANDARD: &str = "gameover.standard";
    /// Game over when no snake remains.
    pub const GAME_OVER_SOLO: &str = "gameover.solo";
    /// Game over when at most one squad remains.
    pub const GAME_OVER_SQUAD: &str = "gameover.squad";
    /// Royale safe-zone regeneration.
    pub const SPAWN_HAZARDS_ROYALE: &str = "hazard.spawn.royale";
    /// Undo body collisions between squad mates.
    pub const RESURRECT_SQUAD: &str = "snake.resurrect.squad";
    /// Propagate shared health/length/elimination across squads.
    pub const SHARED_ATTRIBUTES_SQUAD: &str = "snake.sharedattributes.squad";
    /// Constrictor growth: clear food, grow every snake.
    pub const GROW_CONSTRICTOR: &str = "snake.grow.constrictor";
}

/// A stage function.
///
/// Mutates the state in place and returns `Ok(true)` when the game has
/// ended, short-circuiting the rest of the pipeline. Errors propagate
/// unwrapped and are fatal to the turn.
pub type StageFn =
    Arc<dyn Fn(&mut BoardState, &Settings, &[SnakeMove]) -> Result<bool, RulesError> + Send + Sync>;

// =============================================================================
// StageRegistry
// =============================================================================

/// Name-to-stage-function lookup.
///
/// Uses a `BTreeMap` so iteration over registered names is deterministic.
#[derive(Clone, Default)]
pub struct StageRegistry {
    stages: BTreeMap<String, StageFn>,
}

impl fmt::Debug for StageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageRegistry")
            .field("stages", &self.stages.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl StageRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with every builtin stage.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let builtins: [(&str, StageFn); 14] = [
            (names::MOVEMENT_STANDARD, Arc::new(stages::move_snakes)),
            (names::MOVEMENT_WRAPPED, Arc::new(stages::move_snakes_wrapped)),
            (names::REDUCE_HEALTH_STANDARD, Arc::new(stages::reduce_health)),
            (names::HAZARD_DAMAGE_STANDARD, Arc::new(stages::damage_hazards)),
            (names::EAT_FOOD_STANDARD, Arc::new(stages::feed_snakes)),
            (names::ELIMINATE_STANDARD, Arc::new(stages::eliminate_snakes)),
            (names::SPAWN_FOOD_STANDARD, Arc::new(stages::spawn_food)),
            (names::GAME_OVER_STANDARD, Arc::new(stages::game_over_standard)),
            (names::GAME_OVER_SOLO, Arc::new(stages::game_over_solo)),
            (names::GAME_OVER_SQUAD, Arc::new(stages::game_over_squad)),
            (names::SPAWN_HAZARDS_ROYALE, Arc::new(stages::spawn_hazards_royale)),
            (names::RESURRECT_SQUAD, Arc::new(stages::resurrect_squad)),
            (
                names::SHARED_ATTRIBUTES_SQUAD,
                Arc::new(stages::share_squad_attributes),
            ),
            (names::GROW_CONSTRICTOR, Arc::new(stages::grow_constrictor)),
        ];
        for (name, stage) in builtins {
            // The builtin table has no duplicate names.
            registry.stages.insert(name.to_string(), stage);
        }
        registry
    }

    /// Registers a stage under a name.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::StageRegisteredTwice`] when the name is taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        stage: impl Fn(&mut BoardState, &Settings, &[SnakeMove]) -> Result<bool, RulesError>
            + Send
            + Sync
            + 'static,
    ) -> Result<(), RulesError> {
        let name = name.into();
        if self.stages.contains_key(&name) {
            return Err(RulesError::StageRegisteredTwice(name));
        }
        self.stages.insert(name, Arc::new(stage));
        Ok(())
    }

    /// Registers a stage under a name, panicking on a duplicate.
    ///
    /// # Panics
    ///
    /// Panics when the name is already registered. Use [`Self::register`]
    /// for the recoverable path.
    pub fn must_register(
        &mut self,
        name: impl Into<String>,
        stage: impl Fn(&mut BoardState, &Settings, &[SnakeMove]) -> Result<bool, RulesError>
            + Send
            + Sync
            + 'static,
    ) {
        if let Err(err) = self.register(name, stage) {
            panic!("{err}");
        }
    }

    /// Looks up a stage by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StageFn> {
        self.stages.get(name)
    }

    /// Returns the number of registered stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true when no stage is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Iterates over registered stage names in lexicographic order.
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.keys().map(String::as_str)
    }
}

/// Returns the process-wide default registry holding every builtin stage.
///
/// Built once from a fixed table; extend a clone of it to add custom stages.
#[must_use]
pub fn default_registry() -> &'static StageRegistry {
    static REGISTRY: OnceLock<StageRegistry> = OnceLock::new();
    REGISTRY.get_or_init(StageRegistry::with_builtins)
}

// =============================================================================
// Tests
// =============================================================================
