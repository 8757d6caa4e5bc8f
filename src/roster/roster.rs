//! Seat order and hand ownership.
//!
//! `SessionRoster` owns every `PlayerHand` and the turn pointer. The engine
//! borrows it mutably per action; it never holds on to it between calls.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{GameConfig, InvalidAction, PlayerId};

use super::hand::PlayerHand;

/// What happened when a player left the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Departure {
    /// The player who left.
    pub player: PlayerId,
    /// Seat index the player occupied before removal.
    pub index: usize,
    /// Whether it was the player's turn when they left.
    pub was_active_turn: bool,
    /// Cards the player was holding.
    pub cards: Vec<Card>,
}

/// Active players in seat order, plus those who already left.
///
/// ## Example
///
/// ```
/// use rust_regicide::core::{GameConfig, PlayerId};
/// use rust_regicide::roster::SessionRoster;
///
/// let mut roster = SessionRoster::new(GameConfig::default());
/// roster.add(PlayerId::new(1)).unwrap();
/// roster.add(PlayerId::new(2)).unwrap();
///
/// assert_eq!(roster.hand_limit(), 7);
/// assert_eq!(roster.current_player(), Some(PlayerId::new(1)));
///
/// roster.advance();
/// assert_eq!(roster.current_player(), Some(PlayerId::new(2)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRoster {
    config: GameConfig,
    seats: Vec<PlayerHand>,
    departed: Vec<PlayerId>,
    current: usize,
}

impl SessionRoster {
    /// Create an empty roster.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            seats: Vec::new(),
            departed: Vec::new(),
            current: 0,
        }
    }

    /// Create a roster seated in the given order.
    pub fn with_players(
        config: GameConfig,
        players: impl IntoIterator<Item = PlayerId>,
    ) -> Result<Self, InvalidAction> {
        let mut roster = Self::new(config);
        for player in players {
            roster.add(player)?;
        }
        Ok(roster)
    }

    /// Seat a new player at the end of the table.
    ///
    /// Returns the new seat index. Hand limits of every seat follow the
    /// new table size.
    pub fn add(&mut self, player: PlayerId) -> Result<usize, InvalidAction> {
        if self.index_of(player).is_some() {
            return Err(InvalidAction::AlreadyJoined(player));
        }
        if self.seats.len() >= self.config.max_players {
            return Err(InvalidAction::RosterFull {
                max: self.config.max_players,
            });
        }
        self.seats.push(PlayerHand::new(player, 0));
        self.refresh_limits();
        Ok(self.seats.len() - 1)
    }

    /// Remove a player and reindex the turn order.
    ///
    /// The turn pointer moves back only when a seat before it is removed;
    /// removing the active seat hands the turn to whoever slides into it,
    /// wrapping to the first seat. Returns `None` if the player is not
    /// seated.
    pub fn remove(&mut self, player: PlayerId) -> Option<Departure> {
        let index = self.index_of(player)?;
        let was_active_turn = index == self.current;

        let mut hand = self.seats.remove(index);
        if index < self.current {
            self.current -= 1;
        }
        if self.current >= self.seats.len() {
            self.current = 0;
        }
        self.departed.push(player);
        self.refresh_limits();

        Some(Departure {
            player,
            index,
            was_active_turn,
            cards: hand.take_all(),
        })
    }

    /// Unseat a player before the game starts.
    ///
    /// Unlike [`remove`](Self::remove) this leaves no departure record.
    pub fn withdraw(&mut self, player: PlayerId) -> bool {
        let Some(index) = self.index_of(player) else {
            return false;
        };
        self.seats.remove(index);
        self.current = 0;
        self.refresh_limits();
        true
    }

    /// Rules this roster seats players under.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Number of active players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Check if nobody is seated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Check whether a single player is at the table.
    #[must_use]
    pub fn is_solo(&self) -> bool {
        self.seats.len() == 1
    }

    /// Active players in seat order.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.seats.iter().map(PlayerHand::owner)
    }

    /// Players who left, in departure order.
    #[must_use]
    pub fn departed(&self) -> &[PlayerId] {
        &self.departed
    }

    /// Seat index of a player.
    #[must_use]
    pub fn index_of(&self, player: PlayerId) -> Option<usize> {
        self.seats.iter().position(|hand| hand.owner() == player)
    }

    /// Check whether a player is seated.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        self.index_of(player).is_some()
    }

    /// Seat index whose turn it is.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.seats.get(self.current).map(PlayerHand::owner)
    }

    /// Player at a seat.
    #[must_use]
    pub fn player_at(&self, index: usize) -> Option<PlayerId> {
        self.seats.get(index).map(PlayerHand::owner)
    }

    /// Pass the turn to the next seat.
    pub fn advance(&mut self) {
        if !self.seats.is_empty() {
            self.current = (self.current + 1) % self.seats.len();
        }
    }

    /// Give the turn to a specific seat. Returns `false` if there is no
    /// such seat.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index >= self.seats.len() {
            return false;
        }
        self.current = index;
        true
    }

    /// Hand at a seat.
    #[must_use]
    pub fn hand(&self, index: usize) -> Option<&PlayerHand> {
        self.seats.get(index)
    }

    /// Mutable hand at a seat.
    pub fn hand_mut(&mut self, index: usize) -> Option<&mut PlayerHand> {
        self.seats.get_mut(index)
    }

    /// Hand held by a player.
    #[must_use]
    pub fn hand_of(&self, player: PlayerId) -> Option<&PlayerHand> {
        self.seats.iter().find(|hand| hand.owner() == player)
    }

    /// All hands in seat order.
    #[must_use]
    pub fn hands(&self) -> &[PlayerHand] {
        &self.seats
    }

    /// All hands in seat order, mutably.
    pub fn hands_mut(&mut self) -> &mut [PlayerHand] {
        &mut self.seats
    }

    /// Hand size limit at the current table size.
    #[must_use]
    pub fn hand_limit(&self) -> usize {
        self.config.hand_limit(self.seats.len())
    }

    /// Free hand slots across the table.
    #[must_use]
    pub fn total_vacancy(&self) -> usize {
        self.seats.iter().map(PlayerHand::vacancy).sum()
    }

    /// Cards held across the table.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.seats.iter().map(PlayerHand::len).sum()
    }

    fn refresh_limits(&mut self) {
        let limit = self.hand_limit();
        for hand in &mut self.seats {
            hand.set_limit(limit);
        }
    }
}
