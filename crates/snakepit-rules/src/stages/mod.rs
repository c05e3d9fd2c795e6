//! Builtin stage functions.
//!
//! Each submodule implements one concern of the turn-resolution pipeline:
//!
//! - [`movement`]: head offsetting, neck fallback, boundary wrapping
//! - [`damage`]: per-turn starvation and hazard damage
//! - [`feeding`]: feeding, standard food spawning, constrictor growth
//! - [`elimination`]: the ordered elimination rules over a frozen snapshot
//! - [`game_over`]: the terminal checks per ruleset family
//! - [`royale`]: deterministic safe-zone shrinking
//! - [`squad`]: teammate resurrection and shared attributes
//!
//! All functions follow the stage contract in [`crate::stage`]: they mutate
//! the board in place, return `Ok(true)` only when the game has ended, and
//! surface sentinel errors unwrapped.

pub mod damage;
pub mod elimination;
pub mod feeding;
pub mod game_over;
pub mod movement;
pub mod royale;
pub mod squad;

pub use damage::{damage_hazards, reduce_health};
pub use elimination::eliminate_snakes;
pub use feeding::{feed_snakes, grow_constrictor, spawn_food};
pub use game_over::{game_over_solo, game_over_squad, game_over_standard};
pub use movement::{move_snakes, move_snakes_wrapped};
pub use royale::spawn_hazards_royale;
pub use squad::{resurrect_squad, share_squad_attributes};
