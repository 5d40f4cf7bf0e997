//! Trip Planner Desktop Library
//!
//! Core modules for the trip planning client: runtime configuration,
//! session lifecycle, backend API and the navigation guard.

pub mod api;
pub mod auth;
pub mod config;
pub mod guard;
pub mod logging;
pub mod session;
pub mod storage;
pub mod sync;

#[cfg(feature = "desktop")]
pub mod commands;

use auth::SessionHandle;
use config::ConfigResolver;
use guard::NavigationGuard;
use session::SessionStore;
use storage::SecureStorage;
use sync::{ApiClient, ApiError};

/// Application state shared across commands
pub struct AppState {
    pub config: ConfigResolver,
    pub session: SessionStore,
    pub guard: NavigationGuard,
}

impl AppState {
    /// Wire the components together and restore any persisted session
    pub fn new(config: ConfigResolver, storage: SecureStorage) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api_base_url(), SessionHandle::new())?;
        let session = SessionStore::new(api, storage);
        session.init_auth();

        Ok(Self {
            config,
            session,
            guard: NavigationGuard::default(),
        })
    }

    pub fn api(&self) -> &ApiClient {
        self.session.api()
    }
}
