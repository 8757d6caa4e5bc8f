//! The fixed card catalog.
//!
//! Rank and suit domains are closed, so the catalog is just a set of
//! constructors for the two decks a game starts with.

use super::card::{Card, Suit, JACK, KING, QUEEN};

/// Build a card from its catalog coordinates.
///
/// Rank 0 is the Jester and ignores `suit`.
#[must_use]
pub fn make_card(rank: u8, suit: Suit) -> Card {
    if rank == 0 {
        Card::jester()
    } else {
        Card::new(rank, suit)
    }
}

/// Tavern cards: Companions and 2-10 in every suit, plus `specials` Jesters.
///
/// Returned unshuffled, grouped by rank.
#[must_use]
pub fn tavern_cards(specials: usize) -> Vec<Card> {
    let mut cards: Vec<Card> = (1..=10)
        .flat_map(|rank| Suit::ALL.into_iter().map(move |suit| Card::new(rank, suit)))
        .collect();
    cards.extend(std::iter::repeat(Card::jester()).take(specials));
    cards
}

/// Castle boss groups, bottom of the deck first: Kings, Queens, Jacks.
///
/// Each group is shuffled on its own when the castle is built.
#[must_use]
pub fn castle_groups() -> [Vec<Card>; 3] {
    [KING, QUEEN, JACK].map(|rank| Suit::ALL.into_iter().map(|suit| Card::new(rank, suit)).collect())
}
