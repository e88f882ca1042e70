//! Tauri commands for the food catalogue

use std::sync::Arc;
use tauri::State;

use crate::db::AppState;
use crate::error::AppError;
use crate::foods;
use crate::models::{Food, NewFood};

#[tauri::command]
pub async fn list_foods(
  state: State<'_, Arc<AppState>>,
  search: Option<String>,
) -> Result<Vec<Food>, AppError> {
  foods::list_foods(&state.db, search.as_deref()).await
}

#[tauri::command]
pub async fn get_food(state: State<'_, Arc<AppState>>, id: i64) -> Result<Food, AppError> {
  foods::get_food(&state.db, id).await
}

#[tauri::command]
pub async fn create_food(
  state: State<'_, Arc<AppState>>,
  food: NewFood,
) -> Result<Food, AppError> {
  foods::create_food(&state.db, &food).await
}

#[tauri::command]
pub async fn update_food(
  state: State<'_, Arc<AppState>>,
  id: i64,
  food: NewFood,
) -> Result<Food, AppError> {
  foods::update_food(&state.db, id, &food).await
}

#[tauri::command]
pub async fn delete_food(state: State<'_, Arc<AppState>>, id: i64) -> Result<(), AppError> {
  foods::delete_food(&state.db, id).await
}
