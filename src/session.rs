//! Explicit authentication session.
//!
//! Replaces the ambient token-in-local-storage plus window-level
//! "unauthorized" event of earlier iterations: the transport reads the
//! bearer token from a [`Session`] passed by reference, and the UI learns
//! about a forced logout through an injectable watch channel instead of a
//! global signal.

use parking_lot::RwLock;
use tokio::sync::watch;

pub struct Session {
    token: RwLock<Option<String>>,
    logout_tx: watch::Sender<bool>,
}

impl Session {
    pub fn new() -> Self {
        let (logout_tx, _) = watch::channel(false);
        Self {
            token: RwLock::new(None),
            logout_tx,
        }
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    pub fn clear(&self) {
        *self.token.write() = None;
    }

    /// Drop the token and notify every subscriber. Called by the transport
    /// when the backend answers 401.
    pub fn force_logout(&self) {
        self.clear();
        let _ = self.logout_tx.send(true);
    }

    /// Subscribe to forced-logout notifications. The value flips to `true`
    /// once the session has been invalidated.
    pub fn logout_signal(&self) -> watch::Receiver<bool> {
        self.logout_tx.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
