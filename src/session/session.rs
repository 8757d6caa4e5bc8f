//! One game's lifecycle: lobby, play, and end.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::core::{Action, ActionKind, GameConfig, InvalidAction, PlayerId};
use crate::games::regicide::{RegicideBuilder, TurnEngine};
use crate::roster::SessionRoster;
use crate::rules::{EndReason, GameOutcome, RulesEngine};

use super::error::SessionError;

/// A game from creation to its end.
///
/// The host seats themselves on creation. Others join and leave freely
/// until the host starts the game; after that, leaving goes through the
/// engine so the table is compensated. Only the host can start or end.
///
/// ## Example
///
/// ```
/// use rust_regicide::core::{Action, PlayerId};
/// use rust_regicide::games::regicide::RegicideBuilder;
/// use rust_regicide::session::Session;
///
/// let host = PlayerId::new(1);
/// let mut session = Session::regicide(host, RegicideBuilder::new().seed(3)).unwrap();
/// session.join(PlayerId::new(2)).unwrap();
/// session.start(host).unwrap();
///
/// assert!(session.is_started());
/// assert_eq!(session.roster().hand(0).unwrap().len(), 7);
/// ```
pub struct Session<E: RulesEngine = TurnEngine> {
    host: PlayerId,
    roster: SessionRoster,
    setup: Option<E::Setup>,
    engine: Option<E>,
    outcome: Option<GameOutcome>,
    last_activity: Instant,
    timeout: Duration,
}

impl Session<TurnEngine> {
    /// Open a Regicide lobby under the builder's rules.
    pub fn regicide(host: PlayerId, builder: RegicideBuilder) -> Result<Self, SessionError> {
        let config = builder.game_config().clone();
        Self::new(host, config, builder)
    }
}

impl<E: RulesEngine> Session<E> {
    /// Open a lobby with the host seated first.
    ///
    /// Fails if the configuration is unusable.
    pub fn new(host: PlayerId, config: GameConfig, setup: E::Setup) -> Result<Self, SessionError> {
        config.validate()?;
        let timeout = config.inactivity_timeout();
        let mut roster = SessionRoster::new(config);
        roster.add(host)?;
        Ok(Self {
            host,
            roster,
            setup: Some(setup),
            engine: None,
            outcome: None,
            last_activity: Instant::now(),
            timeout,
        })
    }

    #[must_use]
    pub fn host(&self) -> PlayerId {
        self.host
    }

    #[must_use]
    pub fn roster(&self) -> &SessionRoster {
        &self.roster
    }

    /// The running engine, once started.
    #[must_use]
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.engine.is_some()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    /// Reset the inactivity clock.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Check whether nobody has acted for the whole timeout.
    #[must_use]
    pub fn is_idle(&self, now: Instant) -> bool {
        self.outcome.is_none() && now.saturating_duration_since(self.last_activity) >= self.timeout
    }

    /// Seat a player in the lobby. Returns their seat.
    pub fn join(&mut self, player: PlayerId) -> Result<usize, SessionError> {
        self.require_lobby()?;
        let seat = self.roster.add(player)?;
        self.touch();
        debug!(player = %player, seat, "player joined");
        Ok(seat)
    }

    /// Take a player out of the game.
    ///
    /// Returns the engine's resolution when the game was already running.
    pub fn leave(&mut self, player: PlayerId) -> Result<Option<E::Resolution>, SessionError> {
        if self.outcome.is_some() {
            return Err(InvalidAction::GameOver.into());
        }
        if player == self.host {
            return Err(InvalidAction::HostCannotLeave.into());
        }
        let Some(engine) = self.engine.as_mut() else {
            if !self.roster.withdraw(player) {
                return Err(InvalidAction::NotParticipant(player).into());
            }
            self.touch();
            debug!(player = %player, "player left the lobby");
            return Ok(None);
        };

        let res = engine.remove_player(&mut self.roster, player)?;
        self.outcome = engine.outcome();
        self.touch();
        Ok(Some(res))
    }

    /// Start the game. Host only.
    ///
    /// A setup the engine refuses closes the session.
    pub fn start(&mut self, player: PlayerId) -> Result<E::Resolution, SessionError> {
        self.require_lobby()?;
        self.require_host(player)?;
        let min = self.roster.config().min_players;
        if self.roster.len() < min {
            return Err(InvalidAction::NotEnoughPlayers { min }.into());
        }
        let setup = self.setup.take().ok_or(InvalidAction::AlreadyStarted)?;

        match E::start(setup, &mut self.roster) {
            Ok((engine, res)) => {
                self.outcome = engine.outcome();
                self.engine = Some(engine);
                self.touch();
                Ok(res)
            }
            Err(err) => {
                self.close(GameOutcome::defeat(EndReason::Ended));
                Err(err.into())
            }
        }
    }

    /// Apply an in-game action.
    pub fn act(&mut self, player: PlayerId, action: &Action) -> Result<E::Resolution, SessionError> {
        if self.outcome.is_some() {
            return Err(InvalidAction::GameOver.into());
        }
        let engine = self.engine.as_mut().ok_or(InvalidAction::NotStarted)?;
        let res = engine.apply_action(&mut self.roster, player, action)?;
        self.outcome = engine.outcome();
        self.touch();
        Ok(res)
    }

    /// Verbs `player` may use right now.
    #[must_use]
    pub fn legal_actions(&self, player: PlayerId) -> Vec<ActionKind> {
        self.engine
            .as_ref()
            .map(|engine| engine.legal_actions(&self.roster, player))
            .unwrap_or_default()
    }

    /// End the game at the host's request.
    pub fn end(&mut self, player: PlayerId) -> Result<GameOutcome, SessionError> {
        self.require_host(player)?;
        Ok(self.finish(false))
    }

    /// End the game for inactivity.
    pub fn expire(&mut self) -> GameOutcome {
        self.finish(true)
    }

    /// End the game. Later calls return the first outcome.
    fn finish(&mut self, inactive: bool) -> GameOutcome {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        let outcome = match self.engine.as_mut() {
            Some(engine) => engine.end(inactive),
            None => {
                let reason = if inactive { EndReason::Inactivity } else { EndReason::Ended };
                GameOutcome::defeat(reason)
            }
        };
        self.close(outcome);
        outcome
    }

    fn close(&mut self, outcome: GameOutcome) {
        self.outcome = Some(outcome);
        self.setup = None;
        info!(host = %self.host, reason = ?outcome.reason, started = self.engine.is_some(), "session closed");
    }

    fn require_lobby(&self) -> Result<(), InvalidAction> {
        if self.outcome.is_some() {
            return Err(InvalidAction::GameOver);
        }
        if self.engine.is_some() {
            return Err(InvalidAction::AlreadyStarted);
        }
        Ok(())
    }

    fn require_host(&self, player: PlayerId) -> Result<(), InvalidAction> {
        if player != self.host {
            return Err(InvalidAction::NotHost);
        }
        Ok(())
    }
}

impl<E: RulesEngine + std::fmt::Debug> std::fmt::Debug for Session<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("host", &self.host)
            .field("roster", &self.roster)
            .field("engine", &self.engine)
            .field("outcome", &self.outcome)
            .field("last_activity", &self.last_activity)
            .finish()
    }
}
