//! Trip Planner Desktop - Main Entry Point
//!
//! Desktop shell for the trip planner: hosts the web front end and
//! serves it session, configuration and backend access over IPC.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use tracing::info;

use trip_planner_lib::{
    commands, config::ConfigResolver, logging, storage::SecureStorage, AppState,
};

fn main() -> anyhow::Result<()> {
    logging::init();
    info!("Trip Planner Desktop starting...");

    let config = ConfigResolver::from_environment();
    info!("Using API at {}", config.api_base_url());
    if !config.map_enabled() {
        info!("No map key configured, map view disabled");
    }

    let app_state = AppState::new(config, SecureStorage::new())
        .context("failed to initialize application state")?;

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            commands::init_auth,
            commands::login,
            commands::register,
            commands::logout,
            commands::current_user,
            commands::check_token_validity,
            commands::navigate,
            commands::runtime_config,
            commands::add_expense,
            commands::list_expenses,
            commands::budget_summary,
            commands::extract_expense,
            commands::generate_itinerary,
            commands::list_itineraries,
            commands::get_itinerary,
            commands::update_itinerary,
            commands::delete_itinerary,
            commands::get_trip,
            commands::update_trip,
            commands::parse_trip_text,
            commands::recognize_speech,
        ])
        .setup(|_app| {
            info!("Application setup complete");
            Ok(())
        })
        .run(tauri::generate_context!())
        .context("error running Trip Planner")?;

    Ok(())
}
