//! Ordered stage executor with short-circuit semantics.
//!
//! A [`Pipeline`] is a named stage sequence compiled once against a
//! [`StageRegistry`] and executed once per turn. Execution follows
//! clone-then-mutate: the caller's state is cloned, the clone's turn counter
//! is advanced, and stages run in order against the clone until one reports
//! the game has ended or fails. The input state is never touched.
//!
//! # Lazy construction errors
//!
//! Name resolution happens at construction time, but a resolution failure
//! (empty registry, no stage names, unknown stage) is captured and returned
//! from [`Pipeline::execute`] instead of the constructor, so construction
//! and execution chain fluently:
//!
//! ```
//! use snakepit_rules::board::BoardState;
//! use snakepit_rules::error::RulesError;
//! use snakepit_rules::pipeline::Pipeline;
//! use snakepit_rules::settings::Settings;
//! use snakepit_rules::stage::default_registry;
//!
//! let result = Pipeline::from_registry(default_registry(), &["no.such.stage"])
//!     .execute(&BoardState::new(11, 11), &Settings::default(), &[]);
//! assert_eq!(
//!     result.unwrap_err(),
//!     RulesError::StageNotFound("no.such.stage".to_string())
//! );
//! ```
//!
//! # Short-circuit
//!
//! The first stage returning `ended = true` stops the pipeline with the
//! state as mutated so far; a game-over stage therefore ends the turn before
//! any later food-spawning stage runs. An error stops the pipeline
//! immediately and the partially mutated clone is dropped, because every
//! error is fatal to the turn.

use tracing::{debug, trace};

use crate::board::{BoardState, SnakeMove};
use crate::error::RulesError;
use crate::settings::Settings;
use crate::stage::{StageFn, StageRegistry};

/// An ordered, compiled sequence of stages.
pub struct Pipeline {
    /// Resolved `(name, stage)` pairs, in execution order.
    stages: Vec<(String, StageFn)>,
    /// Construction failure, surfaced lazily from `execute`.
    build_error: Option<RulesError>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field(
                "stages",
                &self.stages.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .field("build_error", &self.build_error)
            .finish()
    }
}

impl Pipeline {
    /// Compiles a stage-name sequence against a registry.
    ///
    /// Resolution failures are captured, not returned: the pipeline is
    /// always constructed, and [`Self::execute`] reports the error.
    #[must_use]
    pub fn from_registry(registry: &StageRegistry, stage_names: &[&str]) -> Self {
        if registry.is_empty() {
            return Self::broken(RulesError::EmptyRegistry);
        }
        if stage_names.is_empty() {
            return Self::broken(RulesError::NoStages);
        }

        let mut stages = Vec::with_capacity(stage_names.len());
        for &name in stage_names {
            match registry.get(name) {
                Some(stage) => stages.push((name.to_string(), stage.clone())),
                None => return Self::broken(RulesError::StageNotFound(name.to_string())),
            }
        }

        Self {
            stages,
            build_error: None,
        }
    }

    fn broken(err: RulesError) -> Self {
        Self {
            stages: Vec::new(),
            build_error: Some(err),
        }
    }

    /// Returns the compiled stage names in execution order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Runs the pipeline for one turn.
    ///
    /// Clones `state`, advances the clone's turn counter, and runs every
    /// stage in order against the clone. Returns the ended flag of the last
    /// stage that ran together with the new state.
    ///
    /// # Errors
    ///
    /// Returns the captured construction error, or the first stage error.
    pub fn execute(
        &self,
        state: &BoardState,
        settings: &Settings,
        moves: &[SnakeMove],
    ) -> Result<(bool, BoardState), RulesError> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }

        let mut next = state.clone();
        next.turn += 1;
        debug!(turn = next.turn, stages = self.stages.len(), "executing pipeline");

        let mut ended = false;
        for (name, stage) in &self.stages {
            ended = stage(&mut next, settings, moves)?;
            trace!(stage = %name, ended, "stage complete");
            if ended {
                debug!(turn = next.turn, stage = %name, "game ended");
                break;
            }
        }

        Ok((ended, next))
    }
}

// =============================================================================
// Tests
// =============================================================================
