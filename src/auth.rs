//! Authentication Module
//!
//! Session state and the shared handle requests read credentials from.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::info;

/// Account returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub preferences: Option<HashMap<String, serde_json::Value>>,
    pub created_at: String,
}

/// Client-held authentication state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Anonymous,
    /// Token restored from storage, profile not loaded yet
    Pending { token: String },
    Authenticated { token: String, user: User },
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Pending { token } | Session::Authenticated { token, .. } => Some(token),
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { token, .. } if !token.is_empty())
    }

    /// Token held but no user yet
    pub fn needs_hydration(&self) -> bool {
        matches!(self, Session::Pending { .. })
    }
}

/// Shared session cell
///
/// The API client reads the bearer token from here on every request, so a
/// mutation is visible to the next outgoing call.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<Mutex<Session>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.lock().token().map(str::to_string)
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().is_authenticated()
    }

    /// Set token and user together
    pub fn establish(&self, token: String, user: User) {
        info!("Session set for user: {}", user.id);
        *self.lock() = Session::Authenticated { token, user };
    }

    pub fn restore_pending(&self, token: String) {
        info!("Session restored without profile");
        *self.lock() = Session::Pending { token };
    }

    /// Replace the user of a session that still holds a token.
    /// Returns false if the session was cleared in the meantime.
    pub fn update_user(&self, user: User) -> bool {
        let mut session = self.lock();
        match session.token() {
            Some(token) => {
                let token = token.to_string();
                *session = Session::Authenticated { token, user };
                true
            }
            None => false,
        }
    }

    pub fn clear(&self) {
        info!("Session cleared");
        *self.lock() = Session::Anonymous;
    }
}
