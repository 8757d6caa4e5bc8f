//! Player identification.
//!
//! ## PlayerId
//!
//! Players are identified by the chat platform's user id, not by seat.
//! Seats shift when someone leaves mid-game, so anything that must survive
//! a departure (turn ownership, history records) refers to a `PlayerId`
//! and resolves the seat through the roster.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a participant, as handed to us by the dispatcher.
///
/// ```
/// use rust_regicide::core::PlayerId;
///
/// let host = PlayerId::new(1_234);
/// assert_eq!(host.raw(), 1_234);
/// assert_eq!(host.to_string(), "Player 1234");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

impl From<u64> for PlayerId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
