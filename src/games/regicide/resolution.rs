//! What an accepted action did.
//!
//! A `Resolution` is plain data: the presentation layer renders it, the
//! session layer reads `status` to decide whether the game lives on.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Boss, Card, Suit};
use crate::core::{Phase, PlayerId};
use crate::rules::GameOutcome;

/// The triggering event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Decks were built and opening hands dealt.
    Started,
    /// Cards were played against the boss.
    Attacked { cards: Vec<Card> },
    /// The player skipped attacking.
    Yielded,
    /// Cards were discarded to cover the boss's attack.
    DamageSuffered { cards: Vec<Card> },
    /// A lone player spent a special play to refresh their hand.
    HandRefreshed { discarded: usize },
    /// A Jester was played at a multiplayer table.
    SpecialPlayed,
    /// The Jester's player chose who goes next.
    NextPlayerChosen { seat: usize, player: PlayerId },
    /// A player left the game.
    PlayerLeft { player: PlayerId },
}

/// Whether the game goes on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Continue,
    GameOver(GameOutcome),
}

impl Status {
    /// Check whether this resolution ended the game.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self, Status::GameOver(_))
    }
}

/// Snapshot of the boss in the fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossView {
    pub card: Card,
    pub health: u32,
    pub attack: u32,
    pub immunity_negated: bool,
    /// Bosses left to defeat, this one included if alive.
    pub remaining: usize,
}

impl BossView {
    pub(crate) fn of(boss: &Boss, remaining: usize) -> Self {
        Self {
            card: boss.card(),
            health: boss.health(),
            attack: boss.attack_value(),
            immunity_negated: boss.immunity_negated(),
            remaining,
        }
    }
}

/// A boss that left the fight during this action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defeat {
    pub card: Card,
    /// Exact kill: the card went to the top of the tavern deck.
    /// Otherwise it went to the discard pile.
    pub converted: bool,
}

/// Outcome of one accepted action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Who acted, if a player did.
    pub actor: Option<PlayerId>,
    pub event: Event,
    /// Phase after the action.
    pub phase: Phase,
    /// Whose turn it is after the action.
    pub active_player: Option<PlayerId>,
    /// The boss now in the fight.
    pub boss: BossView,
    pub damage_dealt: u32,
    pub cards_drawn: usize,
    pub cards_healed: usize,
    /// Suit powers that took effect, in resolution order.
    pub suit_powers: SmallVec<[Suit; 4]>,
    /// Suits played that the boss was immune to.
    pub blocked_suits: SmallVec<[Suit; 4]>,
    pub defeated: Option<Defeat>,
    /// The same player keeps attacking after a defeat.
    pub turn_retained: bool,
    /// A next-player choice was restarted because someone left.
    pub player_left: bool,
    /// A Jester was taken out of the game to rebalance the table.
    pub special_removed: bool,
    pub status: Status,
}

impl Resolution {
    pub(crate) fn new(actor: Option<PlayerId>, event: Event, boss: BossView) -> Self {
        Self {
            actor,
            event,
            phase: Phase::Attack,
            active_player: None,
            boss,
            damage_dealt: 0,
            cards_drawn: 0,
            cards_healed: 0,
            suit_powers: SmallVec::new(),
            blocked_suits: SmallVec::new(),
            defeated: None,
            turn_retained: false,
            player_left: false,
            special_removed: false,
            status: Status::Continue,
        }
    }

    /// Check whether this action ended the game.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    /// The outcome, if the game ended.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.status {
            Status::GameOver(outcome) => Some(outcome),
            Status::Continue => None,
        }
    }
}
