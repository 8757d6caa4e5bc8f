//! Regicide: a cooperative fight through a castle of twelve bosses.
//!
//! Players share a tavern deck and take turns attacking the boss at the
//! head of the castle. Each suit in an attack triggers a power:
//! - Hearts: shuffle the discard and return cards under the tavern deck
//! - Diamonds: deal cards round-robin from the attacker
//! - Spades: lower the boss's attack
//! - Clubs: double the damage
//!
//! A boss is immune to its own suit until a Jester is played against it.
//! After each attack that leaves the boss standing, the attacker discards
//! enough to cover its attack or the game is lost.
//!
//! Supports 1-4 players.

mod builder;
mod combo;
mod departure;
mod engine;
mod resolution;

pub use builder::RegicideBuilder;
pub use combo::{is_legal_combo, MAX_SET_RANK, MAX_SET_TOTAL};
pub use engine::TurnEngine;
pub use resolution::{BossView, Defeat, Event, Resolution, Status};
