//! Session Store
//!
//! Owns the authentication lifecycle: restoring a persisted session,
//! login/register, logout and profile refresh. Every change to the
//! in-memory session is mirrored to storage in the same call.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error, info, warn};

use crate::api::{AuthResponse, RegisterData};
use crate::auth::{Session, SessionHandle, User};
use crate::storage::SecureStorage;
use crate::sync::{ApiClient, ApiError};

/// Storage key of the raw bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key of the JSON-encoded user
pub const USER_KEY: &str = "user";

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Failure surfaced to the login and registration forms
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Failed(String),
}

impl AuthError {
    fn from_api(err: &ApiError, fallback: &str) -> Self {
        AuthError::Failed(err.detail().unwrap_or(fallback).to_string())
    }

    pub fn message(&self) -> &str {
        match self {
            AuthError::Failed(message) => message,
        }
    }
}

pub struct SessionStore {
    session: SessionHandle,
    storage: SecureStorage,
    api: ApiClient,
    loading: AtomicBool,
}

impl SessionStore {
    /// The store mutates the same session `api` reads credentials from
    pub fn new(api: ApiClient, storage: SecureStorage) -> Self {
        Self {
            session: api.session().clone(),
            storage,
            api,
            loading: AtomicBool::new(false),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn storage(&self) -> &SecureStorage {
        &self.storage
    }

    pub fn snapshot(&self) -> Session {
        self.session.snapshot()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.session.bearer_token()
    }

    pub fn user(&self) -> Option<User> {
        self.session.snapshot().user().cloned()
    }

    /// True while a login or registration request is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Restore the persisted session. Unreadable state is wiped.
    pub fn init_auth(&self) {
        let token = match self.storage.get_item(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => {
                if self.storage.exists(USER_KEY) {
                    warn!("Stored user without a token, discarding");
                    self.clear();
                } else {
                    debug!("No stored session found");
                }
                return;
            }
            Err(e) => {
                warn!("Failed to read stored token: {}", e);
                self.clear();
                return;
            }
        };

        match self.storage.get_item(USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => self.session.establish(token, user),
                Err(e) => {
                    error!("Failed to parse saved user data: {}", e);
                    self.clear();
                }
            },
            Ok(None) => self.session.restore_pending(token),
            Err(e) => {
                warn!("Failed to read stored user: {}", e);
                self.clear();
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        info!("Logging in");
        self.loading.store(true, Ordering::SeqCst);
        let result = self.api.login(email, password).await;
        self.loading.store(false, Ordering::SeqCst);

        match result {
            Ok(response) => self.save_auth_data(response, LOGIN_FAILED),
            Err(e) => {
                error!("Login failed: {}", e);
                Err(AuthError::from_api(&e, LOGIN_FAILED))
            }
        }
    }

    pub async fn register(&self, data: &RegisterData) -> Result<(), AuthError> {
        info!("Registering user: {}", data.username);
        self.loading.store(true, Ordering::SeqCst);
        let result = self.api.register(data).await;
        self.loading.store(false, Ordering::SeqCst);

        match result {
            Ok(response) => self.save_auth_data(response, REGISTRATION_FAILED),
            Err(e) => {
                error!("Registration failed: {}", e);
                Err(AuthError::from_api(&e, REGISTRATION_FAILED))
            }
        }
    }

    /// Always ends signed out, whatever the server says
    pub async fn logout(&self) {
        info!("Logging out");

        if let Err(e) = self.api.logout().await {
            error!("Logout API call failed: {}", e);
        }

        self.clear();
    }

    /// Refresh the profile of the held token.
    ///
    /// A failed fetch means the token is no longer good: the session is
    /// cleared and the error returned.
    pub async fn get_current_user(&self) -> Result<(), ApiError> {
        if self.session.bearer_token().is_none() {
            return Ok(());
        }

        match self.api.me().await {
            Ok(user) => {
                if self.session.update_user(user.clone()) {
                    self.persist_user(&user);
                }
                Ok(())
            }
            Err(e) => {
                error!("Failed to get current user: {}", e);
                self.clear();
                Err(e)
            }
        }
    }

    pub async fn check_token_validity(&self) -> bool {
        if self.session.bearer_token().is_none() {
            return false;
        }

        match self.get_current_user().await {
            Ok(()) => self.session.is_authenticated(),
            Err(_) => false,
        }
    }

    fn save_auth_data(&self, response: AuthResponse, fallback: &str) -> Result<(), AuthError> {
        if response.access_token.is_empty() {
            error!("Auth response carried an empty token");
            return Err(AuthError::Failed(fallback.to_string()));
        }

        if let Err(e) = self.storage.set_item(TOKEN_KEY, &response.access_token) {
            error!("Failed to save {}: {}", TOKEN_KEY, e);
        }
        self.persist_user(&response.user);
        self.session.establish(response.access_token, response.user);
        Ok(())
    }

    fn persist_user(&self, user: &User) {
        if let Err(e) = self.storage.save(USER_KEY, user) {
            error!("Failed to save {}: {}", USER_KEY, e);
        }
    }

    fn clear(&self) {
        self.session.clear();
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove_item(key) {
                error!("Failed to delete {}: {}", key, e);
            }
        }
    }
}
