//! Card identity and derived combat stats.
//!
//! A `Card` is a plain value: rank plus optional suit. Everything else
//! (kind, attack value, health) is derived from those two fields, so cards
//! can be copied freely between decks and hands.

use serde::{Deserialize, Serialize};

/// Rank of the Jester (the special card).
pub const JESTER: u8 = 0;
/// Rank of an animal Companion.
pub const COMPANION: u8 = 1;
/// Rank of a Jack.
pub const JACK: u8 = 11;
/// Rank of a Queen.
pub const QUEEN: u8 = 12;
/// Rank of a King.
pub const KING: u8 = 13;

/// Card suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits, in deck-building order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Order in which suit powers resolve within one play.
    pub const POWER_ORDER: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Spades, Suit::Clubs];
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        };
        f.write_str(name)
    }
}

/// What a card is, derived from its rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Jester (rank 0).
    Special,
    /// Animal Companion (rank 1).
    Companion,
    /// Numbered card (ranks 2-10).
    Number,
    /// Jack, Queen or King (ranks 11-13).
    Boss,
}

/// A single card.
///
/// ```
/// use rust_regicide::cards::{Card, CardKind, Suit};
///
/// let seven = Card::new(7, Suit::Hearts);
/// assert_eq!(seven.kind(), CardKind::Number);
/// assert_eq!(seven.attack_value(), 7);
///
/// let queen = Card::new(12, Suit::Spades);
/// assert_eq!(queen.attack_value(), 15);
/// assert_eq!(queen.to_string(), "Queen of Spades");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: u8,
    suit: Option<Suit>,
}

impl Card {
    /// Create a suited card. `rank` must be in `1..=13`.
    #[must_use]
    pub const fn new(rank: u8, suit: Suit) -> Self {
        debug_assert!(rank >= COMPANION && rank <= KING);
        Self { rank, suit: Some(suit) }
    }

    /// Create a Jester.
    #[must_use]
    pub const fn jester() -> Self {
        Self { rank: JESTER, suit: None }
    }

    /// Create a Companion of the given suit.
    #[must_use]
    pub const fn companion(suit: Suit) -> Self {
        Self::new(COMPANION, suit)
    }

    /// Face value, 0 for the Jester.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Suit, `None` for the Jester.
    #[must_use]
    pub const fn suit(self) -> Option<Suit> {
        self.suit
    }

    /// Kind derived from rank.
    #[must_use]
    pub const fn kind(self) -> CardKind {
        match self.rank {
            JESTER => CardKind::Special,
            COMPANION => CardKind::Companion,
            2..=10 => CardKind::Number,
            _ => CardKind::Boss,
        }
    }

    /// Check whether this is a Jester.
    #[must_use]
    pub const fn is_special(self) -> bool {
        matches!(self.kind(), CardKind::Special)
    }

    /// Attack value when played (and payment value when discarded).
    ///
    /// Boss ranks use the fixed table J=10, Q=15, K=20.
    #[must_use]
    pub const fn attack_value(self) -> u32 {
        match self.rank {
            JACK => 10,
            QUEEN => 15,
            KING => 20,
            rank => rank as u32,
        }
    }

    /// Health contributed to a hand. Equal to the attack value for every
    /// card held by a player, including converted bosses.
    #[must_use]
    pub const fn health(self) -> u32 {
        self.attack_value()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(suit) = self.suit else {
            return f.write_str("Jester");
        };
        match self.rank {
            COMPANION => {
                let animal = match suit {
                    Suit::Hearts => "Fox",
                    Suit::Diamonds => "Dove",
                    Suit::Clubs => "Otter",
                    Suit::Spades => "Hedgehog",
                };
                write!(f, "{animal} Companion")
            }
            JACK => write!(f, "Jack of {suit}"),
            QUEEN => write!(f, "Queen of {suit}"),
            KING => write!(f, "King of {suit}"),
            rank => write!(f, "{rank} of {suit}"),
        }
    }
}
