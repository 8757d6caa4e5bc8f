//! The boss being fought.
//!
//! A `Boss` wraps a boss-ranked `Card` with the mutable combat state that
//! only exists while it sits at the head of the castle deck: remaining
//! health, current attack value, and whether a Jester negated its suit
//! immunity.

use serde::{Deserialize, Serialize};

use super::card::{Card, Suit};

/// How a hit landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// Boss still has health left.
    Survived,
    /// Damage matched remaining health exactly: the boss converts.
    Exact,
    /// Damage exceeded remaining health: the boss is slain.
    Overkill,
}

impl DamageOutcome {
    /// Check whether the boss is out of the fight.
    #[must_use]
    pub fn is_defeated(self) -> bool {
        !matches!(self, DamageOutcome::Survived)
    }
}

/// An enemy boss in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boss {
    card: Card,
    health: u32,
    attack: u32,
    immunity_negated: bool,
}

impl Boss {
    /// Put a boss card into the fight at full strength (twice its base).
    #[must_use]
    pub fn new(card: Card) -> Self {
        let base = card.attack_value();
        Self {
            card,
            health: base * 2,
            attack: base,
            immunity_negated: false,
        }
    }

    /// The underlying card.
    #[must_use]
    pub fn card(&self) -> Card {
        self.card
    }

    /// The boss's suit.
    #[must_use]
    pub fn suit(&self) -> Option<Suit> {
        self.card.suit()
    }

    /// Remaining health. Never negative.
    #[must_use]
    pub fn health(&self) -> u32 {
        self.health
    }

    /// Full health of an unconverted boss.
    #[must_use]
    pub fn max_health(&self) -> u32 {
        self.card.attack_value() * 2
    }

    /// Current attack value after Spade reductions.
    #[must_use]
    pub fn attack_value(&self) -> u32 {
        self.attack
    }

    /// Whether a Jester has negated this boss's immunity.
    #[must_use]
    pub fn immunity_negated(&self) -> bool {
        self.immunity_negated
    }

    /// Check whether the boss is out of health.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Check whether a suit power is blocked by this boss.
    ///
    /// Bosses are immune to their own suit until a Jester negates it.
    #[must_use]
    pub fn is_immune(&self, suit: Suit) -> bool {
        !self.immunity_negated && self.card.suit() == Some(suit)
    }

    /// Negate suit immunity. Idempotent.
    pub fn negate_immunity(&mut self) {
        self.immunity_negated = true;
    }

    /// Apply damage, clamping health at zero.
    ///
    /// Reports whether the hit was exact or an overkill so the caller can
    /// route the card (tavern top vs discard) even though health is clamped.
    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        let outcome = match amount.cmp(&self.health) {
            std::cmp::Ordering::Less => DamageOutcome::Survived,
            std::cmp::Ordering::Equal => DamageOutcome::Exact,
            std::cmp::Ordering::Greater => DamageOutcome::Overkill,
        };
        self.health = self.health.saturating_sub(amount);
        outcome
    }

    /// Reduce the attack value by a Spade power, floored at zero.
    ///
    /// No effect while the boss is immune to Spades.
    pub fn reduce_attack(&mut self, amount: u32) {
        if self.is_immune(Suit::Spades) {
            return;
        }
        self.attack = self.attack.saturating_sub(amount);
    }

    /// Turn the boss into an ally card.
    ///
    /// The returned card carries base stats only (health = attack = base)
    /// and no immunity state.
    #[must_use]
    pub fn convert_to_ally(&self) -> Card {
        self.card
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::{JACK, KING, QUEEN};

    #[test]
    fn test_boss_stats() {
        let jack = Boss::new(Card::new(JACK, Suit::Clubs));
        assert_eq!(jack.attack_value(), 10);
        assert_eq!(jack.health(), 20);
        assert_eq!(jack.max_health(), 20);

        let queen = Boss::new(Card::new(QUEEN, Suit::Hearts));
        assert_eq!(queen.attack_value(), 15);
        assert_eq!(queen.health(), 30);

        let king = Boss::new(Card::new(KING, Suit::Spades));
        assert_eq!(king.attack_value(), 20);
        assert_eq!(king.health(), 40);
    }

    #[test]
    fn test_damage_outcomes() {
        let mut boss = Boss::new(Card::new(JACK, Suit::Clubs));
        assert_eq!(boss.apply_damage(5), DamageOutcome::Survived);
        assert_eq!(boss.health(), 15);
        assert_eq!(boss.apply_damage(15), DamageOutcome::Exact);
        assert_eq!(boss.health(), 0);
        assert!(boss.is_defeated());

        let mut boss = Boss::new(Card::new(JACK, Suit::Clubs));
        assert_eq!(boss.apply_damage(25), DamageOutcome::Overkill);
        assert_eq!(boss.health(), 0);
    }

    #[test]
    fn test_zero_damage_survives() {
        let mut boss = Boss::new(Card::new(JACK, Suit::Hearts));
        assert_eq!(boss.apply_damage(0), DamageOutcome::Survived);
        assert_eq!(boss.health(), 20);
    }

    #[test]
    fn test_immunity() {
        let mut boss = Boss::new(Card::new(QUEEN, Suit::Diamonds));
        assert!(boss.is_immune(Suit::Diamonds));
        assert!(!boss.is_immune(Suit::Hearts));

        boss.negate_immunity();
        boss.negate_immunity();
        assert!(boss.immunity_negated());
        assert!(!boss.is_immune(Suit::Diamonds));
    }

    #[test]
    fn test_spade_reduction_floors_at_zero() {
        let mut boss = Boss::new(Card::new(JACK, Suit::Hearts));
        boss.reduce_attack(4);
        assert_eq!(boss.attack_value(), 6);
        boss.reduce_attack(9);
        assert_eq!(boss.attack_value(), 0);
    }

    #[test]
    fn test_spade_boss_ignores_reduction_until_negated() {
        let mut boss = Boss::new(Card::new(KING, Suit::Spades));
        boss.reduce_attack(5);
        assert_eq!(boss.attack_value(), 20);

        boss.negate_immunity();
        boss.reduce_attack(5);
        assert_eq!(boss.attack_value(), 15);
    }

    #[test]
    fn test_convert_to_ally_has_base_stats() {
        let mut boss = Boss::new(Card::new(QUEEN, Suit::Clubs));
        boss.negate_immunity();
        boss.apply_damage(30);
        let ally = boss.convert_to_ally();
        assert_eq!(ally, Card::new(QUEEN, Suit::Clubs));
        assert_eq!(ally.attack_value(), 15);
        assert_eq!(ally.health(), 15);
    }
}
