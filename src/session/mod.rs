//! Session lifecycle and the session-keyed store.
//!
//! A `Session` wraps one game from lobby to end: seating, the host's
//! privileges, and the inactivity clock. The engine knows none of this.
//! `SessionStore` keeps at most one session per key and forgets a session
//! once its game is over.

pub mod error;
#[allow(clippy::module_inception)]
pub mod session;
pub mod store;

pub use error::SessionError;
pub use session::Session;
pub use store::SessionStore;
