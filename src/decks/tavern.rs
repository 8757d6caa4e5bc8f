//! The tavern deck and its discard pile.

use serde::{Deserialize, Serialize};

use crate::cards::{tavern_cards, Card};
use crate::core::{shuffle, RandomSource};
use crate::roster::SessionRoster;

/// Shared draw pile plus discard.
///
/// The top of the draw pile is the end of the `Vec`; the bottom is index 0.
/// Discard order carries no meaning until the pile is shuffled for healing.
///
/// ## Example
///
/// ```
/// use rust_regicide::cards::{Card, Suit};
/// use rust_regicide::decks::SharedDeck;
///
/// let mut tavern = SharedDeck::from_draw_order(vec![Card::new(2, Suit::Clubs)]);
/// tavern.add_to_top(Card::new(11, Suit::Hearts));
/// tavern.add_to_bottom(Card::new(5, Suit::Spades));
///
/// assert_eq!(tavern.top(), Some(Card::new(11, Suit::Hearts)));
/// assert_eq!(tavern.len(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedDeck {
    cards: Vec<Card>,
    discard: Vec<Card>,
}

impl SharedDeck {
    /// Build and shuffle the standard tavern with `specials` Jesters.
    pub fn standard(specials: usize, source: &mut dyn RandomSource) -> Self {
        let mut cards = tavern_cards(specials);
        shuffle(&mut cards, source);
        Self {
            cards,
            discard: Vec::new(),
        }
    }

    /// Build a stacked tavern. The first card is drawn first.
    #[must_use]
    pub fn from_draw_order(mut cards: Vec<Card>) -> Self {
        cards.reverse();
        Self {
            cards,
            discard: Vec::new(),
        }
    }

    /// Cards left to draw.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the draw pile is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The next card to be drawn.
    #[must_use]
    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Draw pile, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards in the discard pile.
    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    /// The discard pile.
    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    /// Put a card on top of the draw pile.
    pub fn add_to_top(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Put a card on the bottom of the draw pile.
    pub fn add_to_bottom(&mut self, card: Card) {
        self.cards.insert(0, card);
    }

    /// Move cards to the discard pile.
    pub fn discard(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard.extend(cards);
    }

    /// Deal up to `n` cards round-robin, starting at seat `start`.
    ///
    /// Seats with full hands are skipped. The count is capped by the draw
    /// pile and by the free slots across the table, so a short deal is
    /// normal near the end of a game. Returns the number actually dealt.
    pub fn deal(&mut self, n: usize, start: usize, roster: &mut SessionRoster) -> usize {
        let seats = roster.len();
        if seats == 0 {
            return 0;
        }
        let count = n.min(self.cards.len()).min(roster.total_vacancy());
        let mut seat = start % seats;
        for _ in 0..count {
            while roster.hand(seat).map_or(false, |hand| hand.is_full()) {
                seat = (seat + 1) % seats;
            }
            let (Some(card), Some(hand)) = (self.cards.pop(), roster.hand_mut(seat)) else {
                break;
            };
            hand.insert(card);
            seat = (seat + 1) % seats;
        }
        count
    }

    /// Shuffle the discard and move up to `amount` cards to the bottom of
    /// the draw pile. Returns the number moved.
    pub fn heal_from_discard(&mut self, amount: usize, source: &mut dyn RandomSource) -> usize {
        shuffle(&mut self.discard, source);
        let count = amount.min(self.discard.len());
        for _ in 0..count {
            if let Some(card) = self.discard.pop() {
                self.add_to_bottom(card);
            }
        }
        count
    }

    /// Remove the first Jester from the draw pile, bottom first.
    pub fn remove_special(&mut self) -> Option<Card> {
        let index = self.cards.iter().position(|c| c.is_special())?;
        Some(self.cards.remove(index))
    }

    /// Remove the first Jester from the discard pile.
    pub fn remove_special_from_discard(&mut self) -> Option<Card> {
        let index = self.discard.iter().position(|c| c.is_special())?;
        Some(self.discard.remove(index))
    }
}
