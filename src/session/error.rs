//! Session-level errors.

use thiserror::Error;

use crate::core::{ActionError, ConfigError, InvalidAction, PlayerId, RejectionKind};

/// Errors from the session layer.
///
/// Keys are carried as their `Display` rendering so the error stays
/// independent of the store's key type.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no game is running in {0}")]
    NotFound(String),

    #[error("a game hosted by {host} is already running in {key}")]
    AlreadyActive { key: String, host: PlayerId },

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error("could not start the game: {0}")]
    Config(#[from] ConfigError),
}

impl SessionError {
    /// Rejection class, for errors that came from the engine.
    #[must_use]
    pub fn rejection(&self) -> Option<RejectionKind> {
        match self {
            SessionError::Action(err) => Some(err.kind()),
            _ => None,
        }
    }
}

impl From<InvalidAction> for SessionError {
    fn from(err: InvalidAction) -> Self {
        SessionError::Action(err.into())
    }
}
