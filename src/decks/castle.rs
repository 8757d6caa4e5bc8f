//! The castle deck: bosses waiting to be fought.

use serde::{Deserialize, Serialize};

use crate::cards::{castle_groups, Boss, Card};
use crate::core::{shuffle, ConfigError, RandomSource};

/// Ordered boss stack with one boss in the fight.
///
/// The top of the stack is the end of the `Vec`. A standard castle puts
/// Jacks on top, Queens under them, and Kings at the bottom.
///
/// ## Example
///
/// ```
/// use rust_regicide::cards::{Card, Suit};
/// use rust_regicide::decks::HostileDeck;
///
/// let mut castle = HostileDeck::from_draw_order(vec![
///     Card::new(11, Suit::Clubs),
///     Card::new(12, Suit::Hearts),
/// ])
/// .unwrap();
///
/// assert_eq!(castle.remaining_count(), 2);
/// assert!(castle.advance().is_none()); // the Jack is still alive
///
/// castle.active_mut().apply_damage(20);
/// assert_eq!(castle.advance().unwrap().card(), Card::new(12, Suit::Hearts));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostileDeck {
    stack: Vec<Boss>,
    active: Boss,
}

impl HostileDeck {
    /// Build the standard twelve-boss castle.
    ///
    /// Each rank group is shuffled on its own before stacking.
    pub fn standard(source: &mut dyn RandomSource) -> Result<Self, ConfigError> {
        let mut bottom_first = Vec::with_capacity(12);
        for mut group in castle_groups() {
            shuffle(&mut group, source);
            bottom_first.extend(group);
        }
        bottom_first.reverse();
        Self::from_draw_order(bottom_first)
    }

    /// Build a stacked castle. The first card is fought first.
    pub fn from_draw_order(cards: Vec<Card>) -> Result<Self, ConfigError> {
        let mut stack: Vec<Boss> = cards.into_iter().rev().map(Boss::new).collect();
        let active = stack.pop().ok_or(ConfigError::EmptyCastle)?;
        Ok(Self { stack, active })
    }

    /// The boss currently being fought.
    #[must_use]
    pub fn active(&self) -> &Boss {
        &self.active
    }

    /// The boss currently being fought, mutably.
    pub fn active_mut(&mut self) -> &mut Boss {
        &mut self.active
    }

    /// Bring the next boss into the fight.
    ///
    /// Only moves once the active boss is out of health. Returns `None`
    /// while it is still alive or when the stack is exhausted.
    pub fn advance(&mut self) -> Option<&Boss> {
        if !self.active.is_defeated() {
            return None;
        }
        self.active = self.stack.pop()?;
        Some(&self.active)
    }

    /// Bosses still to defeat, counting the active one if alive.
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.stack.len() + usize::from(!self.active.is_defeated())
    }

    /// Check whether every boss has been defeated.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.stack.is_empty() && self.active.is_defeated()
    }

    /// Bosses waiting behind the active one, next first.
    pub fn upcoming(&self) -> impl Iterator<Item = &Boss> + '_ {
        self.stack.iter().rev()
    }
}
