//! Elimination stage: the ordered rule list over post-movement positions.
//!
//! Runs after movement and feeding, so every comparison uses the already
//! moved heads. Causes are determined with a fixed precedence, first match
//! wins:
//!
//! 1. out of health (recorded as hazard elimination when the head sits in a
//!    hazard and hazard damage is configured)
//! 2. out of bounds
//! 3. self collision
//! 4. body collision with another living snake
//! 5. head-to-head loss (equal length eliminates both, mutually)
//!
//! # Snapshot semantics
//!
//! Collisions are evaluated in two phases. Phase one applies health and
//! bounds eliminations directly. Phase two computes a collision outcome for
//! every phase-one survivor against the frozen bodies of all phase-one
//! survivors, then applies every outcome at once. A snake eliminated by a
//! collision in this turn therefore still eliminates others this turn, and
//! iteration order can never change an outcome.

use crate::board::{BoardState, EliminationCause, Snake, SnakeId, SnakeMove};
use crate::error::RulesError;
use crate::settings::Settings;

/// Elimination stage (`snake.eliminate.standard`).
///
/// # Errors
///
/// [`RulesError::ZeroLengthSnake`] when a living snake has an empty body.
pub fn eliminate_snakes(
    state: &mut BoardState,
    settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    let turn = state.turn;

    // Phase one: health and bounds. A snake that starved or left the board
    // no longer takes part in collision checks.
    for i in 0..state.snakes.len() {
        if state.snakes[i].is_eliminated() {
            continue;
        }
        let Some(head) = state.snakes[i].head() else {
            return Err(RulesError::ZeroLengthSnake(state.snakes[i].id.clone()));
        };
        if state.snakes[i].health <= 0 {
            let cause = if settings.hazard_damage_per_turn > 0 && state.hazards.contains(&head) {
                EliminationCause::HazardDamage
            } else {
                EliminationCause::OutOfHealth
            };
            state.snakes[i].eliminate(cause, None, turn);
        } else if out_of_bounds(&state.snakes[i], state.width, state.height) {
            state.snakes[i].eliminate(EliminationCause::OutOfBounds, None, turn);
        }
    }

    // Phase two: collisions, evaluated for every survivor against the same
    // frozen survivor snapshot, then applied together.
    let alive: Vec<usize> = (0..state.snakes.len())
        .filter(|&i| !state.snakes[i].is_eliminated())
        .collect();

    let mut pending: Vec<(usize, EliminationCause, SnakeId)> = Vec::new();
    for &i in &alive {
        let others: Vec<&Snake> = alive
            .iter()
            .filter(|&&j| j != i)
            .map(|&j| &state.snakes[j])
            .collect();
        if let Some((cause, by)) = collision_outcome(&state.snakes[i], &others) {
            pending.push((i, cause, by));
        }
    }
    for (i, cause, by) in pending {
        state.snakes[i].eliminate(cause, Some(by), turn);
    }

    Ok(false)
}

/// Returns true when any body point lies outside the board.
fn out_of_bounds(snake: &Snake, width: i32, height: i32) -> bool {
    snake
        .body
        .iter()
        .any(|p| p.x < 0 || p.x >= width || p.y < 0 || p.y >= height)
}

/// Evaluates the collision rules for one snake against the frozen bodies of
/// all other living snakes. First match wins: self collision, then body
/// collision, then head-to-head.
pub(crate) fn collision_outcome(
    snake: &Snake,
    others: &[&Snake],
) -> Option<(EliminationCause, SnakeId)> {
    let head = snake.head()?;

    if snake.body[1..].contains(&head) {
        return Some((EliminationCause::SelfCollision, snake.id.clone()));
    }
    for other in others {
        if other.body.len() > 1 && other.body[1..].contains(&head) {
            return Some((EliminationCause::Collision, other.id.clone()));
        }
    }
    for other in others {
        if other.head() == Some(head) && other.length() >= snake.length() {
            return Some((EliminationCause::HeadToHead, other.id.clone()));
        }
    }
    None
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Point;

    fn snake(id: &str, body: &[(i32, i32)], health: i32) -> Snake {
        Snake::new(
            id,
            body.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            health,
        )
    }

    fn board(snakes: Vec<Snake>) -> BoardState {
        let mut b = BoardState::new(11, 11);
        b.turn = 5;
        b.snakes = snakes;
        b
    }

    fn cause(board: &BoardState, idx: usize) -> Option<EliminationCause> {
        board.snakes[idx].elimination.as_ref().map(|e| e.cause)
    }

    fn by(board: &BoardState, idx: usize) -> Option<SnakeId> {
        board.snakes[idx]
            .elimination
            .as_ref()
            .and_then(|e| e.by.clone())
    }

    mod health_and_bounds_tests {
        use super::*;

        #[test]
        fn starved_snake_is_out_of_health() {
            let mut b = board(vec![snake("one", &[(5, 5), (5, 4)], 0)]);
            eliminate_snakes(&mut b, &Settings::default(), &[]).unwrap();

            assert_eq!(cause(&b, 0), Some(EliminationCause::OutOfHealth));
            assert_eq!(b.snakes[0].elimination.as_ref().unwrap().turn, 5);
            assert_eq!(by(&b, 0), None);
        }

        #[test]
        fn starved_in_hazard_records_hazard_cause() {
            let mut b = board(vec![snake("one", &[(5, 5), (5, 4)], 0)]);
            b.add_hazard(Point::new(5, 5));
            eliminate_snakes(&mut b, &Settings::default(), &[]).unwrap();

            assert_eq!(cause(&b, 0), Some(EliminationCause::HazardDamage));
        }

        #[test]
        fn starved_in_hazard_without_damage_stays_out_of_health() {
            let mut b = board(vec![snake("one", &[(5, 5), (5, 4)], 0)]);
            b.add_hazard(Point::new(5, 5));
            let settings = Settings {
                hazard_damage_per_turn: 0,
                ..Settings::default()
            };
            eliminate_snakes(&mut b, &settings, &[]).unwrap();

            assert_eq!(cause(&b, 0), Some(EliminationCause::OutOfHealth));
        }

        #[test]
        fn head_off_board_is_wall_collision() {
            let mut b = board(vec![snake("one", &[(-1, 5), (0, 5)], 80)]);
            eliminate_snakes(&mut b, &Settings::default(), &[]).unwrap();

            assert_eq!(cause(&b, 0), Some(EliminationCause::OutOfBounds));
        }

        #[test]
        fn out_of_health_beats_out_of_bounds() {
            let mut b = board(vec![snake("one", &[(11, 5), (10, 5)], 0)]);
            eliminate_snakes(&mut b, &Settings::default(), &[]).unwrap();

            assert_eq!(cause(&b, 0), Some(EliminationCause::OutOfHealth));
        }
    }

    mod collision_tests {
        use super::*;

        #[test]
        fn self_collision_records_own_id() {
            // Head re-enters its own body loop.
            let mut b = board(vec![snake(
                "one",
                &[(5, 5), (5, 4), (6, 4), (6, 5), (5, 5), (4, 5)],
                80,
            )]);
            eliminate_snakes(&mut b, &Settings::default(), &[]).unwrap();

            assert_eq!(cause(&b, 0), Some(EliminationCause::SelfCollision));
            assert_eq!(by(&b, 0), Some(SnakeId::new("one")));
        }

        #[test]
        fn body_collision_records_other_id() {
            let mut b = board(vec![
                snake("one", &[(5, 5), (5, 4), (5, 3)], 80),
                snake("two", &[(6, 5), (5, 5), (4, 5)], 80),
            ]);
            eliminate_snakes(&mut b, &Settings::default(), &[]).unwrap();

            assert_eq!(cause(&b, 0), Some(EliminationCause::Collision));
            assert_eq!(by(&b, 0), Some(SnakeId::new("two")));
            assert!(!b.snakes[1].is_eliminated());
        }

        #[test]
        fn equal_length_head_to_head_eliminates_both() {
            let mut b = board(vec![
                snake("one", &[(5, 5), (4, 5), (3, 5)], 80),
                snake("two", &[(5, 5), (6, 5), (7, 5)], 80),
            ]);
            eliminate_snakes(&mut b, &Settings::default(), &[]).unwrap();

            assert_eq!(cause(&b, 0), Some(EliminationCause::HeadToHead));
            assert_eq!(cause(&b, 1), Some(EliminationCause::HeadToHead));
            assert_eq!(by(&b, 0), Some(SnakeId::new("two")));
            assert_eq!(by(&b, 1), Some(SnakeId::new("one")));
        }

        #[test]
        fn strictly_longer_snake_survives_head_to_head() {
            let mut b = board(vec![
                snake("long", &[(5, 5), (4, 5), (3, 5), (2, 5)], 80),
                snake("short", &[(5, 5), (6, 5), (7, 5)], 80),
            ]);
            eliminate_snakes(&mut b, &Settings::default(), &[]).unwrap();

            assert!(!b.snakes[0].is_eliminated());
            assert_eq!(cause(&b, 1), Some(EliminationCause::HeadToHead));
            assert_eq!(by(&b, 1), Some(SnakeId::new("long")));
        }

        #[test]
        fn body_collision_beats_head_to_head() {
            // "one" and "three" share a head cell that also lies on "two"'s
            // body; the body collision wins the precedence for both.
            let mut b = board(vec![
                snake("one", &[(5, 5), (5, 4)], 80),
                snake("two", &[(4, 5), (5, 5), (6, 5)], 80),
                snake("three", &[(5, 5), (5, 6), (5, 7)], 80),
            ]);
            eliminate_snakes(&mut b, &Settings::default(), &[]).unwrap();

            assert_eq!(cause(&b, 0), Some(EliminationCause::Collision));
            assert_eq!(by(&b, 0), Some(SnakeId::new("two")));
            assert_eq!(cause(&b, 2), Some(EliminationCause::Collision));
            assert_eq!(by(&b, 2), Some(SnakeId::new("two")));
            assert!(!b.snakes[1].is_eliminated());
        }

        #[test]
        fn mutual_body_collisions_use_the_frozen_snapshot() {
            // Each head sits on the other's body. Both must be eliminated,
            // each recording the other, regardless of evaluation order.
            let mut b = board(vec![
                snake("one", &[(5, 5), (5, 4), (5, 3)], 80),
                snake("two", &[(5, 4), (5, 5), (6, 5)], 80),
            ]);
            eliminate_snakes(&mut b, &Settings::default(), &[]).unwrap();

            assert_eq!(cause(&b, 0), Some(EliminationCause::Collision));
            assert_eq!(by(&b, 0), Some(SnakeId::new("two")));
            assert_eq!(cause(&b, 1), Some(EliminationCause::Collision));
            assert_eq!(by(&b, 1), Some(SnakeId::new("one")));
        }

        #[test]
        fn starved_snake_no_longer_eliminates_others() {
            // "hungry" starves in phase one, so "one" landing on its body
            // survives the turn.
            let mut b = board(vec![
                snake("hungry", &[(6, 5), (5, 5), (4, 5)], 0),
                snake("one", &[(5, 5), (5, 4), (5, 3)], 80),
            ]);
            eliminate_snakes(&mut b, &Settings::default(), &[]).unwrap();

            assert_eq!(cause(&b, 0), Some(EliminationCause::OutOfHealth));
            assert!(!b.snakes[1].is_eliminated());
        }

        #[test]
        fn previously_eliminated_snakes_do_not_block() {
            let mut dead = snake("dead", &[(5, 5), (4, 5), (3, 5)], 80);
            dead.eliminate(EliminationCause::OutOfBounds, None, 2);
            let mut b = board(vec![dead, snake("one", &[(4, 5), (4, 4), (4, 3)], 80)]);
            eliminate_snakes(&mut b, &Settings::default(), &[]).unwrap();

            assert!(!b.snakes[1].is_eliminated());
        }

        #[test]
        fn zero_length_living_snake_is_an_error() {
            let mut b = board(vec![snake("one", &[], 80)]);
            let err = eliminate_snakes(&mut b, &Settings::default(), &[]).unwrap_err();
            assert_eq!(err, RulesError::ZeroLengthSnake(SnakeId::new("one")));
        }
    }

    mod outcome_tests {
        use super::*;

        #[test]
        fn outcome_is_none_without_contact() {
            let a = snake("a", &[(1, 1), (1, 0)], 80);
            let b = snake("b", &[(9, 9), (9, 8)], 80);
            assert_eq!(collision_outcome(&a, &[&b]), None);
        }

        #[test]
        fn self_collision_wins_over_everything() {
            // Head on own body and on the other's body at once.
            let a = snake("a", &[(5, 5), (5, 4), (5, 5), (5, 6)], 80);
            let b = snake("b", &[(4, 5), (5, 5), (6, 5)], 80);
            assert_eq!(
                collision_outcome(&a, &[&b]),
                Some((EliminationCause::SelfCollision, SnakeId::new("a")))
            );
        }
    }
}
