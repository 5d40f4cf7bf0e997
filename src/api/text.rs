use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::sync::{ApiClient, ApiError};

/// Trip fields extracted from free text to prefill the new-trip form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripDraft {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub travelers: Option<u32>,
    #[serde(default)]
    pub preferences: Option<String>,
}

#[derive(Serialize)]
struct ParseRequest<'a> {
    text: &'a str,
}

impl ApiClient {
    pub async fn parse_trip_text(&self, text: &str) -> Result<TripDraft, ApiError> {
        self.send(
            self.request(Method::POST, "/api/text/parse")
                .json(&ParseRequest { text }),
        )
        .await
    }
}
