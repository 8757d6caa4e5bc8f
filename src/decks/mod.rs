//! The two decks a game is played with.
//!
//! ## Key Types
//!
//! - `HostileDeck`: the castle, bosses fought one at a time
//! - `SharedDeck`: the tavern draw pile and the discard pile

pub mod castle;
pub mod tavern;

pub use castle::HostileDeck;
pub use tavern::SharedDeck;
