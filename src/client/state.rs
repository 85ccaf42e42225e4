use crate::client::cart::Cart;
use crate::client::flow::AuthStage;
use crate::models::user::UserSummary;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// A verified session as the client keeps it: the bearer token plus the
/// user summary returned at verification time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: UserSummary,
}

/// All state the client shell owns: where the auth flow stands and what is
/// in the cart. Persisted as a JSON file so it survives restarts; loaded on
/// start, session cleared on logout. There is no other copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientState {
    pub auth: AuthStage,
    pub cart: Cart,
}

impl ClientState {
    /// Load from disk. A missing or unreadable file means a fresh start.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!("Discarding corrupt client state file: {}", e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, contents)
    }

    /// Drop the session (logout). The cart is left alone.
    pub fn clear_session(&mut self) {
        self.auth = AuthStage::Idle;
    }

    pub fn session(&self) -> Option<&StoredSession> {
        match &self.auth {
            AuthStage::Authenticated { session } => Some(session),
            _ => None,
        }
    }
}
