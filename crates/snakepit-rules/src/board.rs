//! Board data model for the rules kernel.
//!
//! This module defines the passive game state that every stage function
//! transforms: [`Point`], [`Snake`], [`BoardState`], and the per-turn agent
//! input [`SnakeMove`]. It also exposes the board-editing surface consumed by
//! external map generators (`add_food`, `add_hazard`, `place_snake`, ...),
//! which is the only way collaborators outside the kernel are allowed to
//! build or evolve a board.
//!
//! # Determinism
//!
//! All state lives in ordered containers: snakes keep their insertion order
//! (which stages rely on for stable iteration), and the free-form
//! `game_state` scratch map is a `BTreeMap` so cloning and serializing a
//! board never depends on hash ordering.
//!
//! # Clone-then-mutate
//!
//! A `BoardState` is never mutated in place across turns. The pipeline
//! clones the previous state and mutates the clone, so the previous state is
//! read-only once it has been handed to the next-state computation.
//!
//! # Example
//!
//! ```
//! use snakepit_rules::board::{BoardState, Point, SnakeId};
//!
//! let mut board = BoardState::new(11, 11);
//! board.place_snake(
//!     SnakeId::new("alpha"),
//!     vec![Point::new(5, 5), Point::new(5, 4), Point::new(5, 3)],
//!     100,
//! );
//! board.add_food(Point::new(6, 5));
//!
//! assert_eq!(board.snakes.len(), 1);
//! assert!(board.contains(Point::new(0, 0)));
//! assert!(!board.contains(Point::new(11, 0)));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Health a snake is restored to when it eats (and starts the game with).
pub const SNAKE_MAX_HEALTH: i32 = 100;

// =============================================================================
// Point
// =============================================================================

/// An integer grid coordinate.
///
/// Coordinates are signed so that a head that has just moved off the board
/// can be represented between the movement stage and the elimination stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Column, `0..width` while on the board.
    pub x: i32,
    /// Row, `0..height` while on the board.
    pub y: i32,
}

impl Point {
    /// Creates a point at `(x, y)`.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// =============================================================================
// Snake identity
// =============================================================================

/// Unique, stable identifier of a snake for the whole game.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SnakeId(String);

impl SnakeId {
    /// Creates an ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SnakeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// =============================================================================
// Direction & SnakeMove
// =============================================================================

/// One of the four cardinal movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards `y + 1`.
    Up,
    /// Towards `y - 1`.
    Down,
    /// Towards `x - 1`.
    Left,
    /// Towards `x + 1`.
    Right,
}

impl Direction {
    /// Returns the `(dx, dy)` offset one step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Error returned when a move string is not one of the four wire literals.
///
/// The kernel itself never surfaces this: [`SnakeMove::parse`] maps an
/// unrecognized string to "no direction" and the movement stage falls back
/// to continuing straight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownDirection;

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(UnknownDirection),
        }
    }
}

/// A single agent's requested move for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeMove {
    /// The snake this move applies to.
    pub id: SnakeId,
    /// The requested direction, or `None` for an unrecognized/empty move
    /// string (the movement stage then continues straight).
    pub direction: Option<Direction>,
}

impl SnakeMove {
    /// Creates a move with a recognized direction.
    #[must_use]
    pub fn new(id: impl Into<SnakeId>, direction: Direction) -> Self {
        Self {
            id: id.into(),
            direction: Some(direction),
        }
    }

    /// Parses a raw wire move string, mapping anything unrecognized to
    /// "no direction".
    #[must_use]
    pub fn parse(id: impl Into<SnakeId>, raw: &str) -> Self {
        Self {
            id: id.into(),
            direction: raw.parse().ok(),
        }
    }
}

impl From<String> for SnakeId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

// =============================================================================
// Elimination
// =============================================================================

/// Closed taxonomy of reasons a snake stopped being active.
///
/// The string literals are a stable wire contract shared with game runners
/// and replay tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EliminationCause {
    /// Health reached zero with no hazard involved.
    #[serde(rename = "out-of-health")]
    OutOfHealth,
    /// A body point left the board.
    #[serde(rename = "wall-collision")]
    OutOfBounds,
    /// The head landed on the snake's own body.
    #[serde(rename = "snake-self-collision")]
    SelfCollision,
    /// The head landed on another snake's body.
    #[serde(rename = "snake-collision")]
    Collision,
    /// Lost (or drew) a head-to-head encounter.
    #[serde(rename = "head-collision")]
    HeadToHead,
    /// Health reached zero while the head sat in a hazard.
    #[serde(rename = "hazard")]
    HazardDamage,
    /// Eliminated because a squad member was eliminated.
    #[serde(rename = "squad-eliminated")]
    SharedElimination,
    /// Eliminated because a team member died (team flavor of squads).
    #[serde(rename = "team-member-died")]
    TeamMemberDied,
}

impl EliminationCause {
    /// Returns the stable wire literal for this cause.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OutOfHealth => "out-of-health",
            Self::OutOfBounds => "wall-collision",
            Self::SelfCollision => "snake-self-collision",
            Self::Collision => "snake-collision",
            Self::HeadToHead => "head-collision",
            Self::HazardDamage => "hazard",
            Self::SharedElimination => "squad-eliminated",
            Self::TeamMemberDied => "team-member-died",
        }
    }
}

impl fmt::Display for EliminationCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of how and when a snake was eliminated.
///
/// `by` may reference the snake's own ID (self-collision), and a drawn
/// head-to-head is represented as two distinct mutual references. Both are
/// valid and intentional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    /// Why the snake was eliminated.
    pub cause: EliminationCause,
    /// The snake that caused the elimination, when one exists.
    pub by: Option<SnakeId>,
    /// The turn the elimination occurred on.
    pub turn: u32,
}

// =============================================================================
// Snake
// =============================================================================

/// One agent on the board.
///
/// Eliminated snakes are never removed from [`BoardState::snakes`]; they
/// persist with their [`Elimination`] record set so replay and scoring can
/// see game history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    /// Unique, stable identifier.
    pub id: SnakeId,
    /// Ordered body, head at index 0, tail at the end. A duplicated tail
    /// (two equal trailing points) means the snake is about to grow.
    pub body: Vec<Point>,
    /// Current health, `0..=100` between turns.
    pub health: i32,
    /// `None` while the snake is alive.
    pub elimination: Option<Elimination>,
}

impl Snake {
    /// Creates a living snake.
    #[must_use]
    pub fn new(id: impl Into<SnakeId>, body: Vec<Point>, health: i32) -> Self {
        Self {
            id: id.into(),
            body,
            health,
            elimination: None,
        }
    }

    /// Returns the head position, or `None` for a zero-length body.
    #[must_use]
    pub fn head(&self) -> Option<Point> {
        self.body.first().copied()
    }

    /// Returns the body length.
    #[must_use]
    pub fn length(&self) -> usize {
        self.body.len()
    }

    /// Returns true once the snake has an elimination record.
    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.elimination.is_some()
    }

    /// Returns true when the last two body points are equal, i.e. the next
    /// movement step will grow the snake by one cell.
    #[must_use]
    pub fn about_to_grow(&self) -> bool {
        match self.body.as_slice() {
            [.., a, b] => a == b,
            _ => false,
        }
    }

    /// Duplicates the tail point, growing the snake on the next movement.
    pub fn grow(&mut self) {
        if let Some(&tail) = self.body.last() {
            self.body.push(tail);
        }
    }

    /// Records an elimination for this snake.
    pub fn eliminate(&mut self, cause: EliminationCause, by: Option<SnakeId>, turn: u32) {
        self.elimination = Some(Elimination { cause, by, turn });
    }
}

// =============================================================================
// BoardState
// =============================================================================

/// The complete per-turn game state.
///
/// # Example
///
/// ```
/// use snakepit_rules::board::{BoardState, Point};
///
/// let mut board = BoardState::new(7, 7);
/// board.add_food(Point::new(3, 3));
/// board.add_hazard(Point::new(0, 0));
///
/// assert_eq!(board.food, vec![Point::new(3, 3)]);
/// board.remove_food(Point::new(3, 3));
/// assert!(board.food.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// Monotonic turn counter, starting at 0.
    pub turn: u32,
    /// Board width in cells.
    pub width: i32,
    /// Board height in cells.
    pub height: i32,
    /// Food cells. Duplicates are representable and not actively prevented.
    pub food: Vec<Point>,
    /// Hazard cells. Duplicate entries stack their damage.
    pub hazards: Vec<Point>,
    /// All snakes, in insertion order. Eliminated snakes are kept.
    pub snakes: Vec<Snake>,
    /// Free-form scratch data for variants that need cross-turn state.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub game_state: BTreeMap<String, String>,
}

impl BoardState {
    /// Creates an empty board of the given dimensions at turn 0.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            turn: 0,
            width,
            height,
            food: Vec::new(),
            hazards: Vec::new(),
            snakes: Vec::new(),
            game_state: BTreeMap::new(),
        }
    }

    /// Returns true when the point lies inside `[0, width) x [0, height)`.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Returns the center cell of the board.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.width - 1) / 2, (self.height - 1) / 2)
    }

    /// Adds a food cell.
    pub fn add_food(&mut self, p: Point) {
        self.food.push(p);
    }

    /// Removes the first food entry at the given point, if any.
    pub fn remove_food(&mut self, p: Point) {
        if let Some(idx) = self.food.iter().position(|&f| f == p) {
            self.food.remove(idx);
        }
    }

    /// Removes all food.
    pub fn clear_food(&mut self) {
        self.food.clear();
    }

    /// Adds a hazard cell.
    pub fn add_hazard(&mut self, p: Point) {
        self.hazards.push(p);
    }

    /// Removes the first hazard entry at the given point, if any.
    pub fn remove_hazard(&mut self, p: Point) {
        if let Some(idx) = self.hazards.iter().position(|&h| h == p) {
            self.hazards.remove(idx);
        }
    }

    /// Removes all hazards.
    pub fn clear_hazards(&mut self) {
        self.hazards.clear();
    }

    /// Places a snake on the board, replacing the body and health of an
    /// existing snake with the same ID.
    pub fn place_snake(&mut self, id: impl Into<SnakeId>, body: Vec<Point>, health: i32) {
        let id = id.into();
        if let Some(snake) = self.snakes.iter_mut().find(|s| s.id == id) {
            snake.body = body;
            snake.health = health;
        } else {
            self.snakes.push(Snake::new(id, body, health));
        }
    }

    /// Looks up a snake by ID.
    #[must_use]
    pub fn snake(&self, id: &SnakeId) -> Option<&Snake> {
        self.snakes.iter().find(|s| &s.id == id)
    }

    /// Looks up a snake by ID, mutably.
    pub fn snake_mut(&mut self, id: &SnakeId) -> Option<&mut Snake> {
        self.snakes.iter_mut().find(|s| &s.id == id)
    }

    /// Iterates over snakes that have not been eliminated.
    pub fn living_snakes(&self) -> impl Iterator<Item = &Snake> {
        self.snakes.iter().filter(|s| !s.is_eliminated())
    }

    /// Counts snakes that have not been eliminated.
    #[must_use]
    pub fn living_count(&self) -> usize {
        self.living_snakes().count()
    }

    /// Returns all cells not covered by food or a living snake's body, in
    /// row-major order.
    ///
    /// Hazard cells are included; food may legally spawn inside hazards.
    #[must_use]
    pub fn unoccupied_points(&self) -> Vec<Point> {
        let mut points = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let p = Point::new(x, y);
                if self.is_unoccupied(p) {
                    points.push(p);
                }
            }
        }
        points
    }

    /// Returns true when the cell holds no food and no living snake body.
    #[must_use]
    pub fn is_unoccupied(&self, p: Point) -> bool {
        !self.food.contains(&p)
            && !self
                .living_snakes()
                .any(|s| s.body.contains(&p))
    }
}

// =============================================================================
// Tests
// =============================================================================
