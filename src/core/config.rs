//! Game configuration.
//!
//! Tunable rules live here so a dispatcher can load them from its own
//! settings source (anything `serde` can read). The fixed card catalog
//! (boss attack table, tavern composition) is not configurable.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems detected by [`GameConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Player bounds are empty or inverted.
    #[error("invalid player bounds: min {min}, max {max}")]
    InvalidPlayerBounds { min: usize, max: usize },
    /// No hand limits were configured.
    #[error("hand limit table is empty")]
    EmptyHandLimits,
    /// A hand limit of zero would make dealing impossible.
    #[error("hand limit for {players} player(s) must be positive")]
    ZeroHandLimit { players: usize },
    /// A game was started with too few or too many players.
    #[error("{count} player(s) cannot play; need {min} to {max}")]
    PlayerCount { count: usize, min: usize, max: usize },
    /// A stacked castle deck had no bosses in it.
    #[error("castle deck must contain at least one boss")]
    EmptyCastle,
}

/// Complete rule configuration for one game.
///
/// ## Example
///
/// ```
/// use rust_regicide::core::GameConfig;
///
/// let config = GameConfig::default().with_solo_specials(1);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.hand_limit(1), 8);
/// assert_eq!(config.hand_limit(4), 5);
/// assert_eq!(config.specials_in_deck(3), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fewest players that may start a game.
    pub min_players: usize,

    /// Most players that may join a game.
    pub max_players: usize,

    /// Maximum hand size, indexed by `player_count - 1`.
    /// The last entry applies to any larger table.
    pub hand_limits: Vec<usize>,

    /// Special plays available to a player on their own.
    pub solo_specials: u8,

    /// Quiet period after which the session layer ends the game.
    pub inactivity_timeout_secs: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 1,
            max_players: 4,
            hand_limits: vec![8, 7, 6, 5],
            solo_specials: 2,
            inactivity_timeout_secs: 600,
        }
    }
}

impl GameConfig {
    /// Set the player bounds.
    #[must_use]
    pub fn with_player_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Set the number of solo special plays.
    #[must_use]
    pub fn with_solo_specials(mut self, count: u8) -> Self {
        self.solo_specials = count;
        self
    }

    /// Set the inactivity timeout.
    #[must_use]
    pub fn with_inactivity_timeout(mut self, timeout: Duration) -> Self {
        self.inactivity_timeout_secs = timeout.as_secs();
        self
    }

    /// Check the configuration for impossible values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players == 0 || self.min_players > self.max_players {
            return Err(ConfigError::InvalidPlayerBounds {
                min: self.min_players,
                max: self.max_players,
            });
        }
        if self.hand_limits.is_empty() {
            return Err(ConfigError::EmptyHandLimits);
        }
        if let Some(pos) = self.hand_limits.iter().position(|&limit| limit == 0) {
            return Err(ConfigError::ZeroHandLimit { players: pos + 1 });
        }
        Ok(())
    }

    /// Check that a table of `count` players may start.
    pub fn check_player_count(&self, count: usize) -> Result<(), ConfigError> {
        if count < self.min_players || count > self.max_players {
            return Err(ConfigError::PlayerCount {
                count,
                min: self.min_players,
                max: self.max_players,
            });
        }
        Ok(())
    }

    /// Maximum hand size for a table of `player_count` players.
    #[must_use]
    pub fn hand_limit(&self, player_count: usize) -> usize {
        let idx = player_count.saturating_sub(1).min(self.hand_limits.len().saturating_sub(1));
        self.hand_limits.get(idx).copied().unwrap_or(0)
    }

    /// Number of Jesters shuffled into the tavern deck.
    #[must_use]
    pub fn specials_in_deck(&self, player_count: usize) -> usize {
        match player_count {
            0..=2 => 0,
            3 => 1,
            _ => 2,
        }
    }

    /// Inactivity timeout as a `Duration`.
    #[must_use]
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_secs)
    }
}
