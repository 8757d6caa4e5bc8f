//! Rules engine trait for game implementations.
//!
//! A game implements `RulesEngine` to define:
//! - How a game starts from a seated roster
//! - How actions modify state
//! - What happens when a player leaves mid-game
//! - Win/loss conditions

use serde::{Deserialize, Serialize};

use crate::core::{Action, ActionError, ActionKind, ConfigError, GameConfig, PlayerId};
use crate::roster::SessionRoster;

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// Every boss was defeated.
    CastleCleared,
    /// The active player could not cover the boss's attack.
    CannotPayDamage,
    /// A lone player ran out of cards with no way to draw more.
    OutOfCards,
    /// No player holds anything worth discarding.
    AllHandsExhausted,
    /// Nobody acted for too long.
    Inactivity,
    /// The host ended the game.
    Ended,
}

/// How well a won game went.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VictoryGrade {
    Bronze,
    Silver,
    Gold,
}

/// Result of a completed game.
///
/// Every player shares the outcome: the game is cooperative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Whether the players won.
    pub won: bool,
    /// Why the game ended.
    pub reason: EndReason,
    /// Grade of a win. `None` for losses and cancellations.
    pub grade: Option<VictoryGrade>,
}

impl GameOutcome {
    /// A won game.
    #[must_use]
    pub fn victory(grade: VictoryGrade) -> Self {
        Self {
            won: true,
            reason: EndReason::CastleCleared,
            grade: Some(grade),
        }
    }

    /// A lost or cancelled game.
    #[must_use]
    pub fn defeat(reason: EndReason) -> Self {
        Self {
            won: false,
            reason,
            grade: None,
        }
    }

    /// Check whether the game was cut short rather than played out.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.reason, EndReason::Inactivity | EndReason::Ended)
    }
}

/// Rules engine trait.
///
/// The session layer drives a game through this trait. It owns the
/// roster and lends it to the engine for each call.
///
/// ## Implementation Notes
///
/// - `start`: build decks and deal from the seated roster
/// - `apply_action`: a rejection must leave engine and roster untouched
/// - `legal_actions`: return empty if the player can't act
/// - `end`: idempotent; later calls return the first outcome
pub trait RulesEngine: Sized {
    /// Everything needed to start a game besides the roster.
    type Setup;

    /// Facts about a resolved action, for the presentation layer.
    type Resolution;

    /// Start a game for the players seated in `roster`.
    fn start(setup: Self::Setup, roster: &mut SessionRoster) -> Result<(Self, Self::Resolution), ConfigError>;

    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Apply an action for a player.
    fn apply_action(
        &mut self,
        roster: &mut SessionRoster,
        player: PlayerId,
        action: &Action,
    ) -> Result<Self::Resolution, ActionError>;

    /// Remove a player mid-game and compensate the rest of the table.
    fn remove_player(&mut self, roster: &mut SessionRoster, player: PlayerId) -> Result<Self::Resolution, ActionError>;

    /// Action verbs a player may use right now.
    fn legal_actions(&self, roster: &SessionRoster, player: PlayerId) -> Vec<ActionKind>;

    /// The outcome, once the game is over.
    fn outcome(&self) -> Option<GameOutcome>;

    /// End the game early.
    fn end(&mut self, inactive: bool) -> GameOutcome;

    // === Convenience Methods ===

    /// Check if the game is over.
    fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Check whether a player may use a given verb right now.
    fn can(&self, roster: &SessionRoster, player: PlayerId, kind: ActionKind) -> bool {
        self.legal_actions(roster, player).contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_constructors() {
        let win = GameOutcome::victory(VictoryGrade::Silver);
        assert!(win.won);
        assert_eq!(win.reason, EndReason::CastleCleared);
        assert_eq!(win.grade, Some(VictoryGrade::Silver));
        assert!(!win.is_cancelled());

        let loss = GameOutcome::defeat(EndReason::CannotPayDamage);
        assert!(!loss.won);
        assert_eq!(loss.grade, None);

        assert!(GameOutcome::defeat(EndReason::Inactivity).is_cancelled());
        assert!(GameOutcome::defeat(EndReason::Ended).is_cancelled());
    }

    #[test]
    fn test_grade_order() {
        assert!(VictoryGrade::Gold > VictoryGrade::Silver);
        assert!(VictoryGrade::Silver > VictoryGrade::Bronze);
    }
}
