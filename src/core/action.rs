//! Action representation: verb + hand indices.
//!
//! Actions refer to cards by their index in the acting player's hand, as
//! shown to that player. Hands are kept sorted, so the dispatcher must
//! resolve indices against the hand it just rendered.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;

/// Hand indices carried by an action. A legal play never exceeds four cards.
pub type CardIndices = SmallVec<[usize; 4]>;

/// A complete in-game action.
///
/// ## Example
///
/// ```
/// use rust_regicide::core::{Action, ActionKind};
///
/// let pair = Action::play(&[0, 1]);
/// assert_eq!(pair.kind(), ActionKind::PlayCards);
/// assert_eq!(pair.indices(), &[0, 1]);
///
/// assert!(Action::Yield.indices().is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Attack with the selected cards.
    PlayCards { cards: CardIndices },
    /// Skip attacking and go straight to suffering damage.
    Yield,
    /// Discard the selected cards to cover the boss's attack.
    SufferDamage { cards: CardIndices },
    /// Play a Jester. Solo play needs no selection.
    PlaySpecial { cards: Option<CardIndices> },
    /// After a Jester, pick the seat that goes next.
    SelectNextPlayer { seat: usize },
}

impl Action {
    /// Attack with the cards at `indices`.
    #[must_use]
    pub fn play(indices: &[usize]) -> Self {
        Action::PlayCards {
            cards: SmallVec::from_slice(indices),
        }
    }

    /// Discard the cards at `indices` to suffer damage.
    #[must_use]
    pub fn discard(indices: &[usize]) -> Self {
        Action::SufferDamage {
            cards: SmallVec::from_slice(indices),
        }
    }

    /// Play the solo special (no selection).
    #[must_use]
    pub fn special() -> Self {
        Action::PlaySpecial { cards: None }
    }

    /// Play the Jester among the cards at `indices`.
    #[must_use]
    pub fn special_from(indices: &[usize]) -> Self {
        Action::PlaySpecial {
            cards: Some(SmallVec::from_slice(indices)),
        }
    }

    /// Choose the seat that goes next.
    #[must_use]
    pub fn select_next(seat: usize) -> Self {
        Action::SelectNextPlayer { seat }
    }

    /// The verb of this action.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::PlayCards { .. } => ActionKind::PlayCards,
            Action::Yield => ActionKind::Yield,
            Action::SufferDamage { .. } => ActionKind::SufferDamage,
            Action::PlaySpecial { .. } => ActionKind::PlaySpecial,
            Action::SelectNextPlayer { .. } => ActionKind::SelectNextPlayer,
        }
    }

    /// Hand indices referenced by this action.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        match self {
            Action::PlayCards { cards } | Action::SufferDamage { cards } => cards.as_slice(),
            Action::PlaySpecial { cards: Some(cards) } => cards.as_slice(),
            _ => &[],
        }
    }
}

/// Action verbs, used to advertise what a player may do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    PlayCards,
    Yield,
    SufferDamage,
    PlaySpecial,
    SelectNextPlayer,
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the game (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
