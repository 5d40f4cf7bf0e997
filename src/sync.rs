//! API Sync Module
//!
//! Handles HTTP communication with the Trip Planner backend. Endpoint
//! groups live in [`crate::api`]; this module owns the shared client,
//! credential attachment and response handling.

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::auth::SessionHandle;

/// API client for the Trip Planner backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    session: SessionHandle,
}

impl ApiClient {
    /// Create a new API client reading credentials from `session`
    pub fn new(base_url: &str, session: SessionHandle) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("trip-planner-desktop/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Build a request, attaching the bearer token held at this moment
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let request = self.client.request(method, url);
        match self.session.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and decode the JSON body
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(ErrorResponse::into_message);
            debug!("Request failed with status {}", status);
            return Err(ApiError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Backend liveness probe
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.send(self.request(Method::GET, "/health")).await
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Error body produced by the backend
#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    // Validation errors carry a list here; only non-blank strings are shown.
    fn into_message(self) -> Option<String> {
        match self.detail {
            Some(serde_json::Value::String(message)) if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Client error: {0}")]
    Client(String),
}

impl ApiError {
    /// Server-supplied message, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}
