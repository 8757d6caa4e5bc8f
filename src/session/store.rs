//! Session-keyed store of running games.
//!
//! At most one session lives under a key (a channel, a room). Sessions are
//! inserted on create and removed as soon as their game ends, whether by
//! play, by the host, or by inactivity.

use std::fmt::Display;
use std::hash::Hash;
use std::time::Instant;

use rustc_hash::FxHashMap;
use tracing::info;

use crate::core::{Action, PlayerId};
use crate::games::regicide::TurnEngine;
use crate::rules::{GameOutcome, RulesEngine};

use super::error::SessionError;
use super::session::Session;

/// Running sessions by key.
///
/// ## Example
///
/// ```
/// use rust_regicide::core::PlayerId;
/// use rust_regicide::games::regicide::RegicideBuilder;
/// use rust_regicide::session::{Session, SessionError, SessionStore};
///
/// let mut store: SessionStore<&str> = SessionStore::new();
/// store.create("#cards", Session::regicide(PlayerId::new(1), RegicideBuilder::new()).unwrap()).unwrap();
///
/// let err = store
///     .create("#cards", Session::regicide(PlayerId::new(2), RegicideBuilder::new()).unwrap())
///     .unwrap_err();
/// assert!(matches!(err, SessionError::AlreadyActive { host, .. } if host == PlayerId::new(1)));
/// ```
pub struct SessionStore<K, E: RulesEngine = TurnEngine> {
    sessions: FxHashMap<K, Session<E>>,
}

impl<K, E: RulesEngine> Default for SessionStore<K, E> {
    fn default() -> Self {
        Self {
            sessions: FxHashMap::default(),
        }
    }
}

impl<K: Hash + Eq + Clone + Display, E: RulesEngine> SessionStore<K, E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new session. Fails if the key already has one.
    pub fn create(&mut self, key: K, session: Session<E>) -> Result<&mut Session<E>, SessionError> {
        if let Some(existing) = self.sessions.get(&key) {
            return Err(SessionError::AlreadyActive {
                key: key.to_string(),
                host: existing.host(),
            });
        }
        info!(key = %key, host = %session.host(), "session created");
        Ok(self.sessions.entry(key).or_insert(session))
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&Session<E>> {
        self.sessions.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut Session<E>> {
        self.sessions.get_mut(key)
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.sessions.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.sessions.keys()
    }

    /// Seat a player in a lobby.
    pub fn join(&mut self, key: &K, player: PlayerId) -> Result<usize, SessionError> {
        self.session(key)?.join(player)
    }

    /// Start the game under `key`.
    pub fn start(&mut self, key: &K, player: PlayerId) -> Result<E::Resolution, SessionError> {
        let result = self.session(key)?.start(player);
        self.sweep(key);
        result
    }

    /// Apply an in-game action, dropping the session if the game ends.
    pub fn dispatch(&mut self, key: &K, player: PlayerId, action: &Action) -> Result<E::Resolution, SessionError> {
        let res = self.session(key)?.act(player, action)?;
        self.sweep(key);
        Ok(res)
    }

    /// Take a player out, dropping the session if that ends the game.
    pub fn leave(&mut self, key: &K, player: PlayerId) -> Result<Option<E::Resolution>, SessionError> {
        let res = self.session(key)?.leave(player)?;
        self.sweep(key);
        Ok(res)
    }

    /// End a game at the host's request and drop it.
    pub fn end(&mut self, key: &K, player: PlayerId) -> Result<GameOutcome, SessionError> {
        let outcome = self.session(key)?.end(player)?;
        self.sessions.remove(key);
        Ok(outcome)
    }

    /// End and drop every session idle at `now`.
    pub fn reap_idle(&mut self, now: Instant) -> Vec<(K, GameOutcome)> {
        let idle: Vec<K> = self
            .sessions
            .iter()
            .filter(|(_, session)| session.is_idle(now))
            .map(|(key, _)| key.clone())
            .collect();

        idle.into_iter()
            .filter_map(|key| {
                let mut session = self.sessions.remove(&key)?;
                let outcome = session.expire();
                info!(key = %key, "session expired");
                Some((key, outcome))
            })
            .collect()
    }

    /// Drop a session without ending its game.
    pub fn remove(&mut self, key: &K) -> Option<Session<E>> {
        self.sessions.remove(key)
    }

    fn session(&mut self, key: &K) -> Result<&mut Session<E>, SessionError> {
        self.sessions
            .get_mut(key)
            .ok_or_else(|| SessionError::NotFound(key.to_string()))
    }

    fn sweep(&mut self, key: &K) {
        if self.sessions.get(key).map_or(false, |session| session.is_over()) {
            self.sessions.remove(key);
            info!(key = %key, "session finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::InvalidAction;
    use crate::games::regicide::RegicideBuilder;
    use crate::rules::EndReason;

    fn p(n: u64) -> PlayerId {
        PlayerId::new(n)
    }

    fn open(store: &mut SessionStore<u64>, key: u64, host: u64) {
        store
            .create(key, Session::regicide(p(host), RegicideBuilder::new().seed(key)).unwrap())
            .unwrap();
    }

    #[test]
    fn test_one_session_per_key() {
        let mut store = SessionStore::new();
        open(&mut store, 10, 1);
        open(&mut store, 11, 2);

        let err = store
            .create(10, Session::regicide(p(3), RegicideBuilder::new()).unwrap())
            .unwrap_err();
        assert_eq!(err, SessionError::AlreadyActive { key: "10".into(), host: p(1) });
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_unknown_key() {
        let mut store: SessionStore<u64> = SessionStore::new();
        let err = store.dispatch(&5, p(1), &Action::Yield).unwrap_err();
        assert_eq!(err, SessionError::NotFound("5".into()));
    }

    #[test]
    fn test_end_removes_session() {
        let mut store = SessionStore::new();
        open(&mut store, 1, 1);
        store.start(&1, p(1)).unwrap();

        assert_eq!(store.end(&1, p(2)).unwrap_err(), InvalidAction::NotHost.into());
        assert!(store.contains(&1));

        let outcome = store.end(&1, p(1)).unwrap();
        assert_eq!(outcome.reason, EndReason::Ended);
        assert!(store.is_empty());
    }

    #[test]
    fn test_reap_idle() {
        let mut store = SessionStore::new();
        open(&mut store, 1, 1);
        open(&mut store, 2, 2);
        let now = Instant::now();

        assert!(store.reap_idle(now).is_empty());

        let later = now + Duration::from_secs(601);
        let mut reaped = store.reap_idle(later);
        reaped.sort_by_key(|(key, _)| *key);
        assert_eq!(reaped.len(), 2);
        assert_eq!(reaped[0].0, 1);
        assert_eq!(reaped[0].1.reason, EndReason::Inactivity);
        assert!(store.is_empty());
    }
}
