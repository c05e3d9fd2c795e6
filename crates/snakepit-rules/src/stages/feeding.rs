//! Feeding, standard food spawning, and constrictor growth.
//!
//! Feeding is not exclusive: every snake whose head lands on the same food
//! cell in the same turn is fed. A head-to-head on food is resolved later by
//! the elimination stage, not here.
//!
//! Standard food spawning is the kernel's only per-turn consumer of
//! randomness and draws its generator from `settings.rng(turn)`, keeping
//! replays bit-identical under a fixed seed.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::board::{BoardState, SnakeMove, SNAKE_MAX_HEALTH};
use crate::error::RulesError;
use crate::settings::Settings;

/// Feeding stage (`snake.eatfood.standard`).
///
/// For each food item with at least one living snake's head on it: the food
/// is removed once, and every such snake has its health reset to maximum and
/// its tail duplicated.
pub fn feed_snakes(
    state: &mut BoardState,
    _settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    let food_items = std::mem::take(&mut state.food);
    let mut remaining = Vec::with_capacity(food_items.len());

    for food in food_items {
        let eaters: Vec<usize> = state
            .snakes
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_eliminated() && s.head() == Some(food))
            .map(|(i, _)| i)
            .collect();

        if eaters.is_empty() {
            remaining.push(food);
        } else {
            for i in eaters {
                let snake = &mut state.snakes[i];
                snake.health = SNAKE_MAX_HEALTH;
                snake.grow();
                trace!(snake = %snake.id, food = %food, "snake fed");
            }
        }
    }

    state.food = remaining;
    Ok(false)
}

/// Standard food spawning stage (`food.spawn.standard`).
///
/// Tops the board up to the configured minimum with uniformly random
/// unoccupied cells; at or above the minimum, spawns exactly one extra with
/// the configured percent chance.
pub fn spawn_food(
    state: &mut BoardState,
    settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    let mut rng = settings.rng(state.turn);

    let count = if state.food.len() < settings.minimum_food {
        settings.minimum_food - state.food.len()
    } else if settings.food_spawn_chance > 0
        && rng.gen_range(0..100) < settings.food_spawn_chance
    {
        1
    } else {
        0
    };

    if count > 0 {
        place_food_randomly(state, &mut rng, count);
    }
    Ok(false)
}

/// Places up to `count` food on uniformly random unoccupied cells. Placing
/// fewer (including none) when the board is short of space is not an error.
pub(crate) fn place_food_randomly(state: &mut BoardState, rng: &mut ChaCha8Rng, count: usize) {
    let mut unoccupied = state.unoccupied_points();
    unoccupied.shuffle(rng);
    for p in unoccupied.into_iter().take(count) {
        trace!(food = %p, turn = state.turn, "food spawned");
        state.add_food(p);
    }
}

/// Constrictor growth stage (`snake.grow.constrictor`).
///
/// Removes all food every turn and forces every living snake to grow: health
/// back to maximum, tail duplicated unless the snake is already about to
/// grow.
pub fn grow_constrictor(
    state: &mut BoardState,
    _settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    state.clear_food();
    for snake in &mut state.snakes {
        if snake.is_eliminated() {
            continue;
        }
        snake.health = SNAKE_MAX_HEALTH;
        if !snake.about_to_grow() {
            snake.grow();
        }
    }
    Ok(false)
}

// =============================================================================
// Tests
// =============================================================================
