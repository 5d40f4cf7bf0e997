//! Itinerary generation and editing.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::sync::{ApiClient, ApiError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryGenerateRequest {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travelers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Partial update; unset fields are left alone by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItineraryUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travelers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<BTreeMap<String, DayItinerary>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub time: String,
    pub activity: String,
    pub location: String,
    pub duration: String,
    pub cost: f64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayItinerary {
    pub date: String,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub travelers: Option<u32>,
    pub status: String,
    /// Day key (e.g. `day1`) to plan
    #[serde(default)]
    pub itinerary: Option<BTreeMap<String, DayItinerary>>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItinerarySummary {
    pub id: i64,
    pub title: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub travelers: Option<u32>,
    pub status: String,
    pub created_at: String,
    #[serde(default)]
    pub budget: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateItineraryResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub data: Option<Itinerary>,
}

/// Generic acknowledgement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl ApiClient {
    pub async fn generate_itinerary(
        &self,
        request: &ItineraryGenerateRequest,
    ) -> Result<GenerateItineraryResponse, ApiError> {
        info!("Generating itinerary for {}", request.destination);
        self.send(
            self.request(Method::POST, "/api/itinerary/generate")
                .json(request),
        )
        .await
    }

    pub async fn list_itineraries(&self) -> Result<Vec<ItinerarySummary>, ApiError> {
        self.send(self.request(Method::GET, "/api/itinerary/list"))
            .await
    }

    pub async fn get_itinerary(&self, id: i64) -> Result<Itinerary, ApiError> {
        self.send(self.request(Method::GET, &format!("/api/itinerary/{id}")))
            .await
    }

    pub async fn update_itinerary(
        &self,
        id: i64,
        request: &ItineraryGenerateRequest,
    ) -> Result<ApiResponse, ApiError> {
        self.send(
            self.request(Method::PUT, &format!("/api/itinerary/{id}"))
                .json(request),
        )
        .await
    }

    pub async fn delete_itinerary(&self, id: i64) -> Result<ApiResponse, ApiError> {
        self.send(self.request(Method::DELETE, &format!("/api/itinerary/{id}")))
            .await
    }

    /// Raw trip document for the edit screen
    pub async fn get_trip_by_id(&self, id: &str) -> Result<serde_json::Value, ApiError> {
        self.send(self.request(Method::GET, &format!("/api/itinerary/{id}")))
            .await
    }

    pub async fn update_trip(
        &self,
        id: &str,
        update: &ItineraryUpdateRequest,
    ) -> Result<ApiResponse, ApiError> {
        self.send(
            self.request(Method::PUT, &format!("/api/itinerary/{id}"))
                .json(update),
        )
        .await
    }
}
