//! Squad stages: teammate resurrection and shared attributes.
//!
//! Both stages group snakes by the squad map in the settings. Snakes absent
//! from the map are their own singleton squad and are untouched by sharing.

use std::collections::BTreeMap;

use crate::board::{BoardState, EliminationCause, SnakeMove};
use crate::error::RulesError;
use crate::settings::Settings;

/// Squad resurrection stage (`snake.resurrect.squad`).
///
/// With `allow_body_collisions` on, undoes eliminations caused by a body
/// collision with a living squad mate. Head-to-heads and self collisions
/// stand.
pub fn resurrect_squad(
    state: &mut BoardState,
    settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    if !settings.squad.allow_body_collisions {
        return Ok(false);
    }

    for snake in &mut state.snakes {
        let Some(elimination) = &snake.elimination else {
            continue;
        };
        if elimination.cause != EliminationCause::Collision {
            continue;
        }
        let Some(by) = &elimination.by else {
            continue;
        };
        if settings.squad.same_squad(&snake.id, by) {
            snake.elimination = None;
        }
    }
    Ok(false)
}

/// Shared-attributes stage (`snake.sharedattributes.squad`).
///
/// Propagates health, length, and elimination across each mapped squad
/// according to the sharing flags. Health and length sharing take the
/// maximum over the squad's living members; elimination sharing takes any
/// member down with the first.
///
/// # Errors
///
/// [`RulesError::ZeroLengthSnake`] when length sharing meets a living snake
/// with an empty body.
pub fn share_squad_attributes(
    state: &mut BoardState,
    settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    let squad = &settings.squad;
    if !(squad.shared_health || squad.shared_length || squad.shared_elimination) {
        return Ok(false);
    }

    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, snake) in state.snakes.iter().enumerate() {
        if let Some(name) = squad.squad_of(&snake.id) {
            groups.entry(name).or_default().push(i);
        }
    }

    let turn = state.turn;
    let shared_cause = if settings.game_type == "team" {
        EliminationCause::TeamMemberDied
    } else {
        EliminationCause::SharedElimination
    };

    for members in groups.values() {
        let living: Vec<usize> = members
            .iter()
            .copied()
            .filter(|&i| !state.snakes[i].is_eliminated())
            .collect();

        if squad.shared_health {
            let max_health = living
                .iter()
                .map(|&i| state.snakes[i].health)
                .max()
                .unwrap_or(0);
            for &i in &living {
                state.snakes[i].health = max_health;
            }
        }

        if squad.shared_length {
            let max_length = living
                .iter()
                .map(|&i| state.snakes[i].length())
                .max()
                .unwrap_or(0);
            for &i in &living {
                let snake = &mut state.snakes[i];
                if snake.body.is_empty() {
                    return Err(RulesError::ZeroLengthSnake(snake.id.clone()));
                }
                while snake.length() < max_length {
                    snake.grow();
                }
            }
        }

        if squad.shared_elimination && living.len() < members.len() {
            for &i in &living {
                state.snakes[i].eliminate(shared_cause, None, turn);
            }
        }
    }
    Ok(false)
}

// =============================================================================
// Tests
// =============================================================================
