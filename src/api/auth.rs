use std::collections::HashMap;

use reqwest::Method;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::auth::User;
use crate::sync::{ApiClient, ApiError};

#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterData {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<HashMap<String, serde_json::Value>>,
}

impl std::fmt::Debug for RegisterData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterData")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("preferences", &self.preferences)
            .finish()
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
    pub user: User,
}

fn bearer() -> String {
    "bearer".to_string()
}

impl ApiClient {
    pub async fn register(&self, data: &RegisterData) -> Result<AuthResponse, ApiError> {
        self.send(self.request(Method::POST, "/api/auth/register").json(data))
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.send(
            self.request(Method::POST, "/api/auth/login")
                .json(&LoginRequest { email, password }),
        )
        .await
    }

    /// Server-side logout; the body is not inspected
    pub async fn logout(&self) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .send(self.request(Method::POST, "/api/auth/logout"))
            .await?;
        Ok(())
    }

    /// Profile of the current token's owner
    pub async fn me(&self) -> Result<User, ApiError> {
        self.send(self.request(Method::GET, "/api/auth/me")).await
    }
}
