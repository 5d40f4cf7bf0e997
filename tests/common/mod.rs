#![allow(dead_code)]

use serde_json::{json, Value};
use tempfile::TempDir;
use trip_planner_lib::auth::SessionHandle;
use trip_planner_lib::session::SessionStore;
use trip_planner_lib::storage::SecureStorage;
use trip_planner_lib::sync::ApiClient;

pub fn user_json() -> Value {
    json!({
        "id": 1,
        "username": "u",
        "email": "e",
        "created_at": "t"
    })
}

pub fn auth_response(token: &str) -> Value {
    json!({
        "access_token": token,
        "token_type": "bearer",
        "user": user_json()
    })
}

/// Store talking to `base_url` with storage in a fresh temp dir
pub fn store(base_url: &str) -> (SessionStore, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let api = ApiClient::new(base_url, SessionHandle::new()).unwrap();
    let store = SessionStore::new(api, SecureStorage::with_path(dir.path()));
    (store, dir)
}

/// Nothing listens here; requests fail with a network error
pub const UNREACHABLE: &str = "http://127.0.0.1:9";
