mod commands;
mod config;
mod db;
mod diets;
mod error;
mod foods;
mod logging;
mod macros;
mod models;
mod nutrition;
mod profile;

#[cfg(test)]
mod test_utils;

use config::AppConfig;
use db::AppState;
use log::{error, info};
use std::sync::Arc;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
  // Load .env and environment configuration
  let config = match AppConfig::load() {
    Ok(config) => config,
    Err(e) => {
      eprintln!("Invalid configuration, using defaults: {}", e);
      AppConfig::default()
    }
  };

  if let Err(e) = logging::init(&config) {
    eprintln!("Failed to initialize logging: {}", e);
  }

  tauri::Builder::default()
    .setup(move |app| {
      // Initialize database
      let app_handle = app.handle().clone();
      tauri::async_runtime::block_on(async move {
        match db::initialize_db(&app_handle, &config).await {
          Ok(pool) => {
            let state = Arc::new(AppState { db: pool });
            app_handle.manage(state);
            info!("Database ready");
          }
          Err(e) => {
            error!("Failed to initialize database: {}", e);
          }
        }
      });
      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
      // Macro goals
      commands::macros::calculate_macro_goals,
      commands::macros::list_activity_levels,
      commands::macros::list_goals,
      // Food catalogue
      commands::foods::list_foods,
      commands::foods::get_food,
      commands::foods::create_food,
      commands::foods::update_food,
      commands::foods::delete_food,
      // Diets and meals
      commands::diets::list_diets,
      commands::diets::get_diet,
      commands::diets::create_diet,
      commands::diets::update_diet,
      commands::diets::delete_diet,
      commands::diets::get_diet_summary,
      commands::diets::get_diet_progress,
      commands::diets::list_meals,
      commands::diets::add_meal,
      commands::diets::rename_meal,
      commands::diets::delete_meal,
      commands::diets::add_food_to_meal,
      commands::diets::update_meal_entry,
      commands::diets::remove_meal_entry,
    ])
    .run(tauri::generate_context!())
    .expect("error while running tauri application");
}
