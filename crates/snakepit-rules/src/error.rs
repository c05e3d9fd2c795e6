//! Error types for the rules kernel.
//!
//! Errors form a closed set of sentinel values rather than arbitrary
//! strings. Stage functions return them up through the pipeline without
//! wrapping, the pipeline stops immediately, and the ruleset hands the
//! error to the caller unchanged. There is no internal retry: any error is
//! fatal to that turn's computation.
//!
//! All variants implement `PartialEq` so sentinels compare by value across
//! the library boundary:
//!
//! ```
//! use snakepit_rules::error::RulesError;
//!
//! let err = RulesError::StageNotFound("no.such.stage".to_string());
//! assert_eq!(err, RulesError::StageNotFound("no.such.stage".to_string()));
//! ```

use thiserror::Error;

use crate::board::SnakeId;

/// The closed set of errors the kernel can surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// More snakes requested than there are fixed start positions.
    #[error("too many snakes for fixed start positions")]
    TooManySnakes,

    /// No free cell was available to place a snake.
    #[error("not enough space to place snake")]
    NoRoomForSnake,

    /// No valid cell was available to place food.
    #[error("not enough space to place food")]
    NoRoomForFood,

    /// The per-turn move set contained no entry for a living snake.
    #[error("move not provided for snake {0}")]
    NoMoveFound(SnakeId),

    /// A living snake had an empty body.
    #[error("snake {0} is length zero")]
    ZeroLengthSnake(SnakeId),

    /// A pipeline was built from a registry with no stages at all.
    #[error("empty stage registry")]
    EmptyRegistry,

    /// A pipeline was built with no stage names.
    #[error("no stages to execute")]
    NoStages,

    /// A pipeline referenced a stage name the registry does not know.
    #[error("stage not found: {0}")]
    StageNotFound(String),

    /// A stage name was registered twice in the same registry.
    #[error("stage already registered: {0}")]
    StageRegisteredTwice(String),

    /// A board size a map collaborator cannot generate for. Defined here as
    /// part of the shared contract; the kernel itself never raises it.
    #[error("unsupported board size: {width}x{height}")]
    UnsupportedBoardSize {
        /// Requested board width.
        width: i32,
        /// Requested board height.
        height: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_compare_by_value() {
        assert_eq!(RulesError::TooManySnakes, RulesError::TooManySnakes);
        assert_ne!(RulesError::TooManySnakes, RulesError::NoRoomForSnake);
        assert_eq!(
            RulesError::NoMoveFound(SnakeId::new("a")),
            RulesError::NoMoveFound(SnakeId::new("a")),
        );
        assert_ne!(
            RulesError::NoMoveFound(SnakeId::new("a")),
            RulesError::NoMoveFound(SnakeId::new("b")),
        );
    }

    #[test]
    fn messages_are_stable() {
        assert_eq!(
            RulesError::TooManySnakes.to_string(),
            "too many snakes for fixed start positions"
        );
        assert_eq!(
            RulesError::StageNotFound("x.y".to_string()).to_string(),
            "stage not found: x.y"
        );
        assert_eq!(
            RulesError::UnsupportedBoardSize {
                width: 3,
                height: 900
            }
            .to_string(),
            "unsupported board size: 3x900"
        );
    }
}
