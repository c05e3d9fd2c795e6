//! Typed ruleset settings and the deterministic RNG factory.
//!
//! [`Settings`] is the parameter bag every stage function reads. Internally
//! it is a typed struct with documented defaults; the string-keyed form used
//! by the wire protocol is supported only at the boundary via
//! [`Settings::from_params`], whose accessors fall back to defaults on
//! missing or invalid values and never error.
//!
//! # Determinism
//!
//! [`Settings::rng`] is the single source of randomness for the kernel.
//! With a fixed seed it is a pure function of `(seed, turn)`: the generator
//! is re-derived for every call rather than advanced as a long-lived
//! generator, so replaying a turn (or recomputing game-over without
//! advancing the turn) is idempotent and order-independent.
//!
//! ```
//! use rand::Rng;
//! use snakepit_rules::settings::Settings;
//!
//! let settings = Settings::with_seed(42);
//! let a: u64 = settings.rng(7).gen();
//! let b: u64 = settings.rng(7).gen();
//! assert_eq!(a, b);
//! ```

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::SnakeId;

/// Default chance (percent) of spawning one extra food per turn.
pub const DEFAULT_FOOD_SPAWN_CHANCE: u32 = 15;
/// Default minimum food kept on the board.
pub const DEFAULT_MINIMUM_FOOD: usize = 1;
/// Default health lost per turn while the head sits in a hazard.
pub const DEFAULT_HAZARD_DAMAGE_PER_TURN: i32 = 14;
/// Default number of turns between royale safe-zone shrinks.
pub const DEFAULT_SHRINK_EVERY_N_TURNS: u32 = 25;

/// Wire parameter names. These string keys are a stable contract with game
/// runners and must not change.
pub mod params {
    /// Ruleset name ("standard", "royale", "solo", "squad", "team",
    /// "wrapped", "constrictor").
    pub const GAME_TYPE: &str = "gameType";
    /// Percent chance of one extra food per turn, `0..=100`.
    pub const FOOD_SPAWN_CHANCE: &str = "foodSpawnChance";
    /// Minimum food kept on the board.
    pub const MINIMUM_FOOD: &str = "minimumFood";
    /// Health lost per turn while the head sits in a hazard.
    pub const HAZARD_DAMAGE_PER_TURN: &str = "hazardDamagePerTurn";
    /// Turns between royale safe-zone shrinks.
    pub const SHRINK_EVERY_N_TURNS: &str = "shrinkEveryNTurns";
    /// Whether squad members may pass through each other.
    pub const ALLOW_BODY_COLLISIONS: &str = "allowBodyCollisions";
    /// Whether one squad member's elimination eliminates the squad.
    pub const SHARED_ELIMINATION: &str = "sharedElimination";
    /// Whether squad members share the maximum health of the squad.
    pub const SHARED_HEALTH: &str = "sharedHealth";
    /// Whether squad members share the maximum length of the squad.
    pub const SHARED_LENGTH: &str = "sharedLength";
    /// Squad membership map, encoded as `snakeId:squadName` pairs joined
    /// with commas.
    pub const SQUAD_MAP: &str = "squadMap";
}

// =============================================================================
// Settings
// =============================================================================

/// Royale-specific parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoyaleSettings {
    /// Turns between safe-zone shrinks. Zero disables shrinking.
    pub shrink_every_n_turns: u32,
}

impl Default for RoyaleSettings {
    fn default() -> Self {
        Self {
            shrink_every_n_turns: DEFAULT_SHRINK_EVERY_N_TURNS,
        }
    }
}

/// Squad/team-specific parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadSettings {
    /// When true, a body collision with a squad mate is undone by the
    /// resurrection stage.
    pub allow_body_collisions: bool,
    /// When true, one member's elimination eliminates the whole squad.
    pub shared_elimination: bool,
    /// When true, every member gets the squad's maximum health.
    pub shared_health: bool,
    /// When true, every member grows to the squad's maximum length.
    pub shared_length: bool,
    /// Snake ID to squad name. Snakes absent from the map form their own
    /// singleton squad.
    pub squad_map: BTreeMap<SnakeId, String>,
}

impl SquadSettings {
    /// Returns the squad name for a snake, or `None` when it is unmapped
    /// (and therefore its own squad).
    #[must_use]
    pub fn squad_of(&self, id: &SnakeId) -> Option<&str> {
        self.squad_map.get(id).map(String::as_str)
    }

    /// Returns true when both snakes are mapped to the same squad.
    #[must_use]
    pub fn same_squad(&self, a: &SnakeId, b: &SnakeId) -> bool {
        match (self.squad_of(a), self.squad_of(b)) {
            (Some(sa), Some(sb)) => sa == sb,
            _ => false,
        }
    }
}

/// Parameter bag and RNG factory consumed by every stage function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Ruleset name this settings bag was built for.
    pub game_type: String,
    /// Percent chance (`0..=100`) of spawning one extra food per turn.
    pub food_spawn_chance: u32,
    /// Minimum food kept on the board.
    pub minimum_food: usize,
    /// Health lost per turn while the head sits in a hazard.
    pub hazard_damage_per_turn: i32,
    /// Royale parameters.
    pub royale: RoyaleSettings,
    /// Squad/team parameters.
    pub squad: SquadSettings,
    /// Fixed seed for deterministic games. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_type: "standard".to_string(),
            food_spawn_chance: DEFAULT_FOOD_SPAWN_CHANCE,
            minimum_food: DEFAULT_MINIMUM_FOOD,
            hazard_damage_per_turn: DEFAULT_HAZARD_DAMAGE_PER_TURN,
            royale: RoyaleSettings::default(),
            squad: SquadSettings::default(),
            seed: None,
        }
    }
}

impl Settings {
    /// Default settings with a fixed seed. The main constructor for tests
    /// and replays.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Builds settings from the string-keyed wire parameters.
    ///
    /// Unknown keys are ignored; missing or unparseable values fall back to
    /// the documented defaults. This accessor path never errors.
    #[must_use]
    pub fn from_params(raw: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        Self {
            game_type: raw
                .get(params::GAME_TYPE)
                .cloned()
                .unwrap_or(defaults.game_type),
            food_spawn_chance: int_param(raw, params::FOOD_SPAWN_CHANCE, DEFAULT_FOOD_SPAWN_CHANCE),
            minimum_food: int_param(raw, params::MINIMUM_FOOD, DEFAULT_MINIMUM_FOOD),
            hazard_damage_per_turn: int_param(
                raw,
                params::HAZARD_DAMAGE_PER_TURN,
                DEFAULT_HAZARD_DAMAGE_PER_TURN,
            ),
            royale: RoyaleSettings {
                shrink_every_n_turns: int_param(
                    raw,
                    params::SHRINK_EVERY_N_TURNS,
                    DEFAULT_SHRINK_EVERY_N_TURNS,
                ),
            },
            squad: SquadSettings {
                allow_body_collisions: bool_param(raw, params::ALLOW_BODY_COLLISIONS, false),
                shared_elimination: bool_param(raw, params::SHARED_ELIMINATION, false),
                shared_health: bool_param(raw, params::SHARED_HEALTH, false),
                shared_length: bool_param(raw, params::SHARED_LENGTH, false),
                squad_map: parse_squad_map(raw.get(params::SQUAD_MAP)),
            },
            seed: None,
        }
    }

    /// Returns the RNG for the given turn.
    ///
    /// With a fixed seed this is a pure function of `(seed, turn)` and
    /// yields a bit-identical stream on every call. Without one, each call
    /// draws a fresh generator from OS entropy.
    #[must_use]
    pub fn rng(&self, turn: u32) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(u64::from(turn))),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

/// Parses an integer parameter, falling back to the default on a missing or
/// invalid value.
fn int_param<T: std::str::FromStr + Copy>(
    raw: &BTreeMap<String, String>,
    key: &str,
    default: T,
) -> T {
    raw.get(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses a boolean parameter ("true"/"false"), falling back to the default
/// on a missing or invalid value.
fn bool_param(raw: &BTreeMap<String, String>, key: &str, default: bool) -> bool {
    raw.get(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses the `id:squad` comma-joined membership encoding. Malformed pairs
/// are skipped.
fn parse_squad_map(raw: Option<&String>) -> BTreeMap<SnakeId, String> {
    let mut map = BTreeMap::new();
    if let Some(raw) = raw {
        for pair in raw.split(',') {
            if let Some((id, squad)) = pair.split_once(':') {
                let (id, squad) = (id.trim(), squad.trim());
                if !id.is_empty() && !squad.is_empty() {
                    map.insert(SnakeId::new(id), squad.to_string());
                }
            }
        }
    }
    map
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn raw(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    mod param_tests {
        use super::*;

        #[test]
        fn from_params_parses_typed_values() {
            let settings = Settings::from_params(&raw(&[
                ("gameType", "royale"),
                ("foodSpawnChance", "25"),
                ("minimumFood", "3"),
                ("hazardDamagePerTurn", "30"),
                ("shrinkEveryNTurns", "20"),
                ("sharedHealth", "true"),
            ]));

            assert_eq!(settings.game_type, "royale");
            assert_eq!(settings.food_spawn_chance, 25);
            assert_eq!(settings.minimum_food, 3);
            assert_eq!(settings.hazard_damage_per_turn, 30);
            assert_eq!(settings.royale.shrink_every_n_turns, 20);
            assert!(settings.squad.shared_health);
            assert!(!settings.squad.shared_length);
        }

        #[test]
        fn invalid_values_fall_back_to_defaults() {
            let settings = Settings::from_params(&raw(&[
                ("foodSpawnChance", "plenty"),
                ("minimumFood", "-2"),
                ("sharedElimination", "yes"),
            ]));

            assert_eq!(settings.food_spawn_chance, DEFAULT_FOOD_SPAWN_CHANCE);
            assert_eq!(settings.minimum_food, DEFAULT_MINIMUM_FOOD);
            assert!(!settings.squad.shared_elimination);
        }

        #[test]
        fn missing_params_use_defaults() {
            let settings = Settings::from_params(&BTreeMap::new());
            assert_eq!(settings, Settings::default());
        }

        #[test]
        fn squad_map_parses_pairs_and_skips_junk() {
            let settings = Settings::from_params(&raw(&[(
                "squadMap",
                "one:red, two:red ,three:blue,broken,:red,four:",
            )]));

            let squad = &settings.squad;
            assert_eq!(squad.squad_of(&SnakeId::new("one")), Some("red"));
            assert_eq!(squad.squad_of(&SnakeId::new("two")), Some("red"));
            assert_eq!(squad.squad_of(&SnakeId::new("three")), Some("blue"));
            assert_eq!(squad.squad_map.len(), 3);
            assert!(squad.same_squad(&SnakeId::new("one"), &SnakeId::new("two")));
            assert!(!squad.same_squad(&SnakeId::new("one"), &SnakeId::new("three")));
            assert!(!squad.same_squad(&SnakeId::new("one"), &SnakeId::new("unmapped")));
        }
    }

    mod rng_tests {
        use super::*;

        #[test]
        fn seeded_rng_is_pure_in_seed_and_turn() {
            let settings = Settings::with_seed(1234);

            let a: [u64; 4] = settings.rng(10).gen();
            let b: [u64; 4] = settings.rng(10).gen();
            assert_eq!(a, b);

            let c: [u64; 4] = settings.rng(11).gen();
            assert_ne!(a, c);
        }

        #[test]
        fn different_seeds_differ() {
            let x: u64 = Settings::with_seed(1).rng(0).gen();
            let y: u64 = Settings::with_seed(2).rng(0).gen();
            assert_ne!(x, y);
        }
    }
}
