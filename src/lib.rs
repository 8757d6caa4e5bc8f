//! # rust-regicide
//!
//! Rules engine for Regicide, a cooperative card game in which one to four
//! players fight their way through a castle of twelve face-card bosses.
//!
//! ## Design Principles
//!
//! 1. **Engine, not frontend**: every accepted action returns a
//!    `Resolution` describing what happened. Rendering, chat commands and
//!    timers belong to the caller.
//!
//! 2. **Rejections change nothing**: a rejected action leaves decks, hands
//!    and phase exactly as they were.
//!
//! 3. **Deterministic when asked**: all shuffles draw from an injectable
//!    `RandomSource`, so games can be seeded or fully stacked.
//!
//! ## Modules
//!
//! - `core`: Player ids, phases, actions, errors, RNG, configuration
//! - `cards`: Cards, bosses, and the fixed catalog
//! - `decks`: The castle and tavern decks
//! - `roster`: Hands and seat order
//! - `rules`: `RulesEngine` trait and game outcomes
//! - `games`: The Regicide turn engine
//! - `session`: Lobby, lifecycle, and the session-keyed store

pub mod core;
pub mod cards;
pub mod decks;
pub mod roster;
pub mod rules;
pub mod games;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionError, ActionKind, ActionRecord, GameConfig, GameRng, InvalidAction, Phase, PlayerId,
    RandomSource, RejectionKind,
};

pub use crate::cards::{Boss, Card, Suit};

pub use crate::decks::{HostileDeck, SharedDeck};

pub use crate::roster::{PlayerHand, SessionRoster};

pub use crate::rules::{EndReason, GameOutcome, RulesEngine, VictoryGrade};

pub use crate::games::regicide::{RegicideBuilder, Resolution, Status, TurnEngine};

pub use crate::session::{Session, SessionError, SessionStore};
