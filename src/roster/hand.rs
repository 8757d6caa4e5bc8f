//! A single player's hand.
//!
//! Cards are kept in ascending rank order so that indices shown to the
//! player stay stable between renders. Selection is a set of indices into
//! that order and is cleared after every resolution.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{PlayerId, SelectionError};

/// Cards held by one player.
///
/// ```
/// use rust_regicide::cards::{Card, Suit};
/// use rust_regicide::core::PlayerId;
/// use rust_regicide::roster::PlayerHand;
///
/// let mut hand = PlayerHand::new(PlayerId::new(1), 8);
/// hand.insert(Card::new(9, Suit::Clubs));
/// hand.insert(Card::new(3, Suit::Hearts));
///
/// assert_eq!(hand.cards()[0].rank(), 3);
/// assert_eq!(hand.attack_total(), 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHand {
    owner: PlayerId,
    cards: Vec<Card>,
    selected: BTreeSet<usize>,
    limit: usize,
}

impl PlayerHand {
    /// Create an empty hand.
    #[must_use]
    pub fn new(owner: PlayerId, limit: usize) -> Self {
        Self {
            owner,
            cards: Vec::new(),
            selected: BTreeSet::new(),
            limit,
        }
    }

    /// The player holding this hand.
    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Cards in ascending rank order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Maximum hand size at the current table size.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Update the maximum hand size (table size changed).
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    /// Check whether the hand can take no more cards.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.limit
    }

    /// Free slots before the hand is full.
    #[must_use]
    pub fn vacancy(&self) -> usize {
        self.limit.saturating_sub(self.cards.len())
    }

    /// Sum of attack values. Also the most damage this hand can pay.
    #[must_use]
    pub fn attack_total(&self) -> u32 {
        self.cards.iter().map(|c| c.attack_value()).sum()
    }

    /// Sum of card health. Zero for an empty hand or a hand of Jesters.
    #[must_use]
    pub fn health(&self) -> u32 {
        self.cards.iter().map(|c| c.health()).sum()
    }

    /// Insert a card, keeping ascending rank order.
    ///
    /// Equal ranks are placed after the ones already held.
    pub fn insert(&mut self, card: Card) {
        let idx = self.cards.partition_point(|c| c.rank() <= card.rank());
        self.cards.insert(idx, card);
    }

    /// Validate and store a selection.
    ///
    /// Rejects out-of-range and repeated indices without touching the
    /// previous selection. Returns the selected cards in index order.
    pub fn select(&mut self, indices: &[usize]) -> Result<Vec<Card>, SelectionError> {
        let mut selection = BTreeSet::new();
        for &index in indices {
            if index >= self.cards.len() {
                return Err(SelectionError::OutOfRange {
                    index,
                    len: self.cards.len(),
                });
            }
            if !selection.insert(index) {
                return Err(SelectionError::Duplicate(index));
            }
        }
        self.selected = selection;
        Ok(self.selected_cards())
    }

    /// Currently selected indices, ascending.
    #[must_use]
    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    /// Currently selected cards, in index order.
    #[must_use]
    pub fn selected_cards(&self) -> Vec<Card> {
        self.selected.iter().map(|&i| self.cards[i]).collect()
    }

    /// Drop the current selection.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Remove the selected cards and clear the selection.
    ///
    /// Returns the removed cards in index order.
    pub fn take_selected(&mut self) -> Vec<Card> {
        let taken = self.selected_cards();
        for &index in self.selected.iter().rev() {
            self.cards.remove(index);
        }
        self.selected.clear();
        taken
    }

    /// Remove one card by index.
    pub fn take(&mut self, index: usize) -> Option<Card> {
        if index >= self.cards.len() {
            return None;
        }
        self.selected.clear();
        Some(self.cards.remove(index))
    }

    /// Remove every card.
    pub fn take_all(&mut self) -> Vec<Card> {
        self.selected.clear();
        std::mem::take(&mut self.cards)
    }

    /// Remove the first Jester held, if any.
    pub fn take_special(&mut self) -> Option<Card> {
        let index = self.cards.iter().position(|c| c.is_special())?;
        self.take(index)
    }
}
