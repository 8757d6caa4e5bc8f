//! Which groups of cards may be played together.

use crate::cards::{Card, CardKind};

/// Largest rank allowed in a matching set.
pub const MAX_SET_RANK: u8 = 5;

/// Largest combined rank of a matching set.
pub const MAX_SET_TOTAL: u32 = 10;

/// Check whether `cards` form a legal attack.
///
/// - a single card is always legal
/// - two cards are legal if either is a Companion
/// - otherwise every card must be a Number of the same rank, at most 5,
///   with ranks summing to 10 or less
///
/// ```
/// use rust_regicide::cards::{Card, Suit};
/// use rust_regicide::games::regicide::is_legal_combo;
///
/// let three = |suit| Card::new(3, suit);
/// assert!(is_legal_combo(&[three(Suit::Hearts), three(Suit::Clubs)]));
/// assert!(is_legal_combo(&[Card::companion(Suit::Spades), Card::new(9, Suit::Hearts)]));
/// assert!(!is_legal_combo(&[three(Suit::Hearts), Card::new(4, Suit::Clubs)]));
/// ```
#[must_use]
pub fn is_legal_combo(cards: &[Card]) -> bool {
    match cards {
        [] => false,
        [_] => true,
        [a, b] if a.kind() == CardKind::Companion || b.kind() == CardKind::Companion => true,
        [first, ..] => {
            let same_rank_numbers = cards
                .iter()
                .all(|c| c.kind() == CardKind::Number && c.rank() == first.rank() && c.rank() <= MAX_SET_RANK);
            let total: u32 = cards.iter().map(|c| u32::from(c.rank())).sum();
            same_rank_numbers && total <= MAX_SET_TOTAL
        }
    }
}
