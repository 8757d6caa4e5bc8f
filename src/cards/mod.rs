//! Card system: identity, bosses, and the fixed catalog.
//!
//! ## Key Types
//!
//! - `Card`: rank + suit, with kind and combat stats derived from rank
//! - `Suit`: the four suits and their power resolution order
//! - `Boss`: a boss card under attack (health, attack, immunity)
//! - `DamageOutcome`: whether a hit left the boss alive, exact, or overkilled

pub mod card;
pub mod boss;
pub mod catalog;

pub use card::{Card, CardKind, Suit, COMPANION, JACK, JESTER, KING, QUEEN};
pub use boss::{Boss, DamageOutcome};
pub use catalog::{castle_groups, make_card, tavern_cards};
