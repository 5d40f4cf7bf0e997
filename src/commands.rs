//! Tauri Commands Module
//!
//! IPC commands exposed to the frontend.

use serde::Serialize;
use tauri::{command, State};
use tracing::{debug, info};

use crate::api::{
    ApiResponse, BudgetSummary, Expense, ExtractedExpense, GenerateItineraryResponse, Itinerary,
    ItineraryGenerateRequest, ItinerarySummary, ItineraryUpdateRequest, NewExpense,
    RecognizeOptions, RegisterData, SpeechRecognition, TripDraft,
};
use crate::auth::User;
use crate::guard::Navigation;
use crate::AppState;

// Response types for frontend

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: Option<User>,
}

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub outcome: Navigation,
    /// Path the frontend should render
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfigResponse {
    pub api_base_url: String,
    pub amap_key: String,
    pub map_enabled: bool,
}

fn session_response(state: &AppState) -> SessionResponse {
    let session = state.session.snapshot();
    SessionResponse {
        authenticated: session.is_authenticated(),
        user: session.user().cloned(),
    }
}

// Session commands

/// Re-read the persisted session
#[command]
pub fn init_auth(state: State<'_, AppState>) -> SessionResponse {
    debug!("Getting stored session");
    state.session.init_auth();
    session_response(&state)
}

#[command]
pub async fn login(
    email: String,
    password: String,
    state: State<'_, AppState>,
) -> Result<SessionResponse, String> {
    state
        .session
        .login(&email, &password)
        .await
        .map_err(|e| e.to_string())?;
    Ok(session_response(&state))
}

#[command]
pub async fn register(
    data: RegisterData,
    state: State<'_, AppState>,
) -> Result<SessionResponse, String> {
    state
        .session
        .register(&data)
        .await
        .map_err(|e| e.to_string())?;
    Ok(session_response(&state))
}

#[command]
pub async fn logout(state: State<'_, AppState>) -> Result<(), String> {
    state.session.logout().await;
    Ok(())
}

#[command]
pub async fn current_user(state: State<'_, AppState>) -> Result<SessionResponse, String> {
    state
        .session
        .get_current_user()
        .await
        .map_err(|e| e.to_string())?;
    Ok(session_response(&state))
}

#[command]
pub async fn check_token_validity(state: State<'_, AppState>) -> Result<bool, String> {
    Ok(state.session.check_token_validity().await)
}

/// Ask the guard before rendering `to`
#[command]
pub async fn navigate(to: String, state: State<'_, AppState>) -> Result<NavigationResponse, String> {
    let outcome = state.guard.before_each(&to, &state.session).await;
    let path = outcome.redirect_path().map(str::to_string).unwrap_or(to);
    info!("Navigating to {}", path);
    Ok(NavigationResponse { outcome, path })
}

#[command]
pub fn runtime_config(state: State<'_, AppState>) -> RuntimeConfigResponse {
    RuntimeConfigResponse {
        api_base_url: state.config.api_base_url(),
        amap_key: state.config.amap_key(),
        map_enabled: state.config.map_enabled(),
    }
}

// Budget commands

#[command]
pub async fn add_expense(expense: NewExpense, state: State<'_, AppState>) -> Result<Expense, String> {
    state.api().add_expense(&expense).await.map_err(|e| e.to_string())
}

#[command]
pub async fn list_expenses(trip_id: i64, state: State<'_, AppState>) -> Result<Vec<Expense>, String> {
    state.api().list_expenses(trip_id).await.map_err(|e| e.to_string())
}

#[command]
pub async fn budget_summary(trip_id: i64, state: State<'_, AppState>) -> Result<BudgetSummary, String> {
    state.api().budget_summary(trip_id).await.map_err(|e| e.to_string())
}

#[command]
pub async fn extract_expense(
    text: String,
    state: State<'_, AppState>,
) -> Result<ExtractedExpense, String> {
    state.api().extract_expense(&text).await.map_err(|e| e.to_string())
}

// Itinerary commands

#[command]
pub async fn generate_itinerary(
    request: ItineraryGenerateRequest,
    state: State<'_, AppState>,
) -> Result<GenerateItineraryResponse, String> {
    state.api().generate_itinerary(&request).await.map_err(|e| e.to_string())
}

#[command]
pub async fn list_itineraries(state: State<'_, AppState>) -> Result<Vec<ItinerarySummary>, String> {
    state.api().list_itineraries().await.map_err(|e| e.to_string())
}

#[command]
pub async fn get_itinerary(id: i64, state: State<'_, AppState>) -> Result<Itinerary, String> {
    state.api().get_itinerary(id).await.map_err(|e| e.to_string())
}

#[command]
pub async fn update_itinerary(
    id: i64,
    request: ItineraryGenerateRequest,
    state: State<'_, AppState>,
) -> Result<ApiResponse, String> {
    state.api().update_itinerary(id, &request).await.map_err(|e| e.to_string())
}

#[command]
pub async fn delete_itinerary(id: i64, state: State<'_, AppState>) -> Result<ApiResponse, String> {
    state.api().delete_itinerary(id).await.map_err(|e| e.to_string())
}

#[command]
pub async fn get_trip(id: String, state: State<'_, AppState>) -> Result<serde_json::Value, String> {
    state.api().get_trip_by_id(&id).await.map_err(|e| e.to_string())
}

#[command]
pub async fn update_trip(
    id: String,
    update: ItineraryUpdateRequest,
    state: State<'_, AppState>,
) -> Result<ApiResponse, String> {
    state.api().update_trip(&id, &update).await.map_err(|e| e.to_string())
}

#[command]
pub async fn parse_trip_text(text: String, state: State<'_, AppState>) -> Result<TripDraft, String> {
    state.api().parse_trip_text(&text).await.map_err(|e| e.to_string())
}

// Voice input

#[command]
pub async fn recognize_speech(
    audio: Vec<u8>,
    options: Option<RecognizeOptions>,
    state: State<'_, AppState>,
) -> Result<SpeechRecognition, String> {
    let options = options.unwrap_or_default();
    state
        .api()
        .recognize_speech(audio, &options)
        .await
        .map_err(|e| e.to_string())
}
