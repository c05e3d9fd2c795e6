//! Royale safe-zone shrinking.
//!
//! The hazard border is not stored incrementally. Every turn the stage
//! clears all hazards and regenerates the border from scratch by replaying
//! the shrink history with the turn-zero generator: shrink number `k` always
//! draws the same side, so the zone for a given `(seed, turn)` is a pure
//! function and replays never drift.

use rand::Rng;

use crate::board::{BoardState, Point, SnakeMove};
use crate::error::RulesError;
use crate::settings::Settings;

/// Royale hazard stage (`hazard.spawn.royale`).
///
/// Every `shrink_every_n_turns` turns one border row or column (chosen
/// uniformly from the four sides) joins the hazard zone. Opposite sides can
/// shrink past each other, leaving the whole board hazardous. A shrink
/// interval of zero disables shrinking entirely.
pub fn spawn_hazards_royale(
    state: &mut BoardState,
    settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    state.clear_hazards();

    let shrink = settings.royale.shrink_every_n_turns;
    if shrink == 0 || state.turn < shrink {
        return Ok(false);
    }

    // Replay every shrink so far from the turn-zero generator.
    let mut rng = settings.rng(0);
    let num_shrinks = state.turn / shrink;

    let (mut min_x, mut max_x) = (0, state.width - 1);
    let (mut min_y, mut max_y) = (0, state.height - 1);
    for _ in 0..num_shrinks {
        match rng.gen_range(0..4) {
            0 => min_x += 1,
            1 => max_x -= 1,
            2 => min_y += 1,
            _ => max_y -= 1,
        }
    }

    for y in 0..state.height {
        for x in 0..state.width {
            if x < min_x || x > max_x || y < min_y || y > max_y {
                state.add_hazard(Point::new(x, y));
            }
        }
    }
    Ok(false)
}

// =============================================================================
// Tests
// =============================================================================
