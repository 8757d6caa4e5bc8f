//! Players, seats, and hands.
//!
//! ## Key Types
//!
//! - `PlayerHand`: sorted cards, selection, and hand size limit
//! - `SessionRoster`: seat order, turn pointer, departed players
//! - `Departure`: what a removal changed, for the engine to compensate

pub mod hand;
#[allow(clippy::module_inception)]
pub mod roster;

pub use hand::PlayerHand;
pub use roster::{Departure, SessionRoster};
