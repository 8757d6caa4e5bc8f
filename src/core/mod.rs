//! Core engine types: players, phases, actions, errors, RNG, configuration.
//!
//! These are shared by every layer above: the card model, the decks, the
//! roster, the turn engine, and the session store.

pub mod player;
pub mod phase;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use player::PlayerId;
pub use phase::Phase;
pub use rng::{shuffle, GameRng, NoShuffle, RandomSource, ScriptedSource};
pub use config::{ConfigError, GameConfig};
pub use action::{Action, ActionKind, ActionRecord, CardIndices};
pub use error::{ActionError, InvalidAction, RejectionKind, SelectionError};
