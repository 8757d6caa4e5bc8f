//! Rejection taxonomy for player actions.
//!
//! Every rejection is local and recoverable: the engine state is left
//! exactly as it was before the call. Only game-over transitions are fatal,
//! and those are reported as a successful resolution, not an error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::phase::Phase;
use super::player::PlayerId;

/// Why an action was rejected, grouped for the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionKind {
    /// Out of turn, out of phase, or not a participant.
    InvalidAction,
    /// Right time, wrong grouping of cards.
    InvalidCombination,
    /// Discard total below the damage owed.
    InsufficientPayment,
    /// Selection no longer matches the hand (dispatcher contract violation).
    StructuralInconsistency,
}

/// A rejected action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Action attempted out of turn, out of phase, or by a non-participant.
    #[error(transparent)]
    InvalidAction(#[from] InvalidAction),

    /// Cards may only be combined as a Companion pair or a matching set
    /// of 2-5 totalling 10 or less.
    #[error("invalid card combination")]
    InvalidCombination,

    /// Discarded cards do not cover the boss's attack.
    #[error("discarded {offered} but must discard at least {required}")]
    InsufficientPayment { required: u32, offered: u32 },

    /// Selected indices do not match the current hand.
    #[error("selection does not match hand: {0}")]
    StructuralInconsistency(#[from] SelectionError),
}

impl ActionError {
    /// Coarse classification of this rejection.
    #[must_use]
    pub fn kind(&self) -> RejectionKind {
        match self {
            ActionError::InvalidAction(_) => RejectionKind::InvalidAction,
            ActionError::InvalidCombination => RejectionKind::InvalidCombination,
            ActionError::InsufficientPayment { .. } => RejectionKind::InsufficientPayment,
            ActionError::StructuralInconsistency(_) => RejectionKind::StructuralInconsistency,
        }
    }
}

/// Specific reasons an action is not allowed right now.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidAction {
    #[error("the game is already over")]
    GameOver,
    #[error("the game has not started")]
    NotStarted,
    #[error("the game has already started")]
    AlreadyStarted,
    #[error("{0} is not in this game")]
    NotParticipant(PlayerId),
    #[error("{0} has already joined")]
    AlreadyJoined(PlayerId),
    #[error("it is {expected}'s turn, not {actual}'s")]
    NotYourTurn { expected: PlayerId, actual: PlayerId },
    #[error("cannot do that during the {actual} phase")]
    WrongPhase { actual: Phase },
    #[error("no cards selected")]
    EmptySelection,
    #[error("cannot yield: someone has to attack")]
    YieldBlocked,
    #[error("no special plays are available")]
    NoSpecialAvailable,
    #[error("selection contains no special card")]
    NoSpecialSelected,
    #[error("no player at seat {0}")]
    NoSuchSeat(usize),
    #[error("the last player cannot leave")]
    LastPlayer,
    #[error("the table is full ({max} players)")]
    RosterFull { max: usize },
    #[error("the host cannot leave; end the game instead")]
    HostCannotLeave,
    #[error("only the host can do that")]
    NotHost,
    #[error("need at least {min} player(s) to start")]
    NotEnoughPlayers { min: usize },
}

/// Selection indices that do not fit the hand.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("index {index} is out of range for a hand of {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("index {0} selected twice")]
    Duplicate(usize),
}
