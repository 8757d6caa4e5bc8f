//! Game setup.

use crate::cards::Card;
use crate::core::{ConfigError, GameConfig, GameRng, PlayerId, RandomSource};
use crate::decks::{HostileDeck, SharedDeck};
use crate::roster::SessionRoster;
use crate::rules::RulesEngine;

use super::engine::TurnEngine;

/// Builder for a game of Regicide.
///
/// Used directly it seats `player_count` players with ids `1..=n`. A
/// session passes it to [`RulesEngine::start`] with its own roster instead.
///
/// Decks are shuffled from `seed` (platform entropy if unset), with the
/// castle and tavern drawing from independent streams. A custom random
/// source replaces all of that, and stacked decks skip shuffling entirely.
pub struct RegicideBuilder {
    config: GameConfig,
    player_count: usize,
    seed: Option<u64>,
    source: Option<Box<dyn RandomSource>>,
    castle: Option<Vec<Card>>,
    tavern: Option<Vec<Card>>,
}

/// Everything the engine needs besides the roster.
pub(super) struct Table {
    pub config: GameConfig,
    pub castle: HostileDeck,
    pub tavern: SharedDeck,
    pub rng: Box<dyn RandomSource>,
}

impl Default for RegicideBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            player_count: 1,
            seed: None,
            source: None,
            castle: None,
            tavern: None,
        }
    }
}

impl RegicideBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rules the game will be played under.
    #[must_use]
    pub fn game_config(&self) -> &GameConfig {
        &self.config
    }

    /// Use a custom random source for every shuffle.
    #[must_use]
    pub fn random_source(mut self, source: impl RandomSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Stack the castle. The first card is fought first.
    #[must_use]
    pub fn castle(mut self, draw_order: Vec<Card>) -> Self {
        self.castle = Some(draw_order);
        self
    }

    /// Stack the tavern. The first card is dealt first.
    #[must_use]
    pub fn tavern(mut self, draw_order: Vec<Card>) -> Self {
        self.tavern = Some(draw_order);
        self
    }

    /// Build the engine and a roster of `player_count` players, with
    /// opening hands dealt.
    pub fn build(self) -> Result<(TurnEngine, SessionRoster), ConfigError> {
        self.config.check_player_count(self.player_count)?;
        let players = (1..=self.player_count as u64).map(PlayerId::new);
        let mut roster =
            SessionRoster::with_players(self.config.clone(), players).map_err(|_| ConfigError::PlayerCount {
                count: self.player_count,
                min: self.config.min_players,
                max: self.config.max_players,
            })?;
        let (engine, _) = TurnEngine::start(self, &mut roster)?;
        Ok((engine, roster))
    }

    pub(super) fn into_table(self, player_count: usize) -> Result<Table, ConfigError> {
        self.config.validate()?;
        self.config.check_player_count(player_count)?;
        let specials = self.config.specials_in_deck(player_count);

        let (castle, tavern, rng) = match self.source {
            Some(mut source) => {
                let castle = stack_castle(self.castle, source.as_mut())?;
                let tavern = stack_tavern(self.tavern, specials, source.as_mut());
                (castle, tavern, source)
            }
            None => {
                let base = self.seed.map_or_else(GameRng::from_entropy, GameRng::new);
                let castle = stack_castle(self.castle, &mut base.for_context("castle"))?;
                let tavern = stack_tavern(self.tavern, specials, &mut base.for_context("tavern"));
                (castle, tavern, Box::new(base) as Box<dyn RandomSource>)
            }
        };

        Ok(Table {
            config: self.config,
            castle,
            tavern,
            rng,
        })
    }
}

fn stack_castle(order: Option<Vec<Card>>, source: &mut dyn RandomSource) -> Result<HostileDeck, ConfigError> {
    match order {
        Some(cards) => HostileDeck::from_draw_order(cards),
        None => HostileDeck::standard(source),
    }
}

fn stack_tavern(order: Option<Vec<Card>>, specials: usize, source: &mut dyn RandomSource) -> SharedDeck {
    match order {
        Some(cards) => SharedDeck::from_draw_order(cards),
        None => SharedDeck::standard(specials, source),
    }
}
