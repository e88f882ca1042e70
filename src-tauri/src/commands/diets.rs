//! Tauri commands for diets, meals and meal entries

use serde::Serialize;
use std::sync::Arc;
use tauri::State;

use crate::commands::macros::{goals_for_today, MacroGoalsOutcome};
use crate::db::AppState;
use crate::diets;
use crate::error::AppError;
use crate::models::{Diet, DietSummary, Meal, MealEntry, NewDiet};
use crate::nutrition::Remaining;
use crate::profile::ProfileInput;

/// ---------------------------------------------------------------------------
/// Diets
/// ---------------------------------------------------------------------------

#[tauri::command]
pub async fn list_diets(state: State<'_, Arc<AppState>>) -> Result<Vec<Diet>, AppError> {
  diets::list_diets(&state.db).await
}

#[tauri::command]
pub async fn get_diet(state: State<'_, Arc<AppState>>, id: i64) -> Result<Diet, AppError> {
  diets::get_diet(&state.db, id).await
}

#[tauri::command]
pub async fn create_diet(
  state: State<'_, Arc<AppState>>,
  diet: NewDiet,
) -> Result<Diet, AppError> {
  diets::create_diet(&state.db, &diet).await
}

#[tauri::command]
pub async fn update_diet(
  state: State<'_, Arc<AppState>>,
  id: i64,
  diet: NewDiet,
) -> Result<Diet, AppError> {
  diets::update_diet(&state.db, id, &diet).await
}

#[tauri::command]
pub async fn delete_diet(state: State<'_, Arc<AppState>>, id: i64) -> Result<(), AppError> {
  diets::delete_diet(&state.db, id).await
}

#[tauri::command]
pub async fn get_diet_summary(
  state: State<'_, Arc<AppState>>,
  diet_id: i64,
) -> Result<DietSummary, AppError> {
  diets::diet_summary(&state.db, diet_id).await
}

/// ---------------------------------------------------------------------------
/// Meals
/// ---------------------------------------------------------------------------

#[tauri::command]
pub async fn list_meals(
  state: State<'_, Arc<AppState>>,
  diet_id: i64,
) -> Result<Vec<Meal>, AppError> {
  diets::list_meals(&state.db, diet_id).await
}

#[tauri::command]
pub async fn add_meal(
  state: State<'_, Arc<AppState>>,
  diet_id: i64,
  name: String,
) -> Result<Meal, AppError> {
  diets::add_meal(&state.db, diet_id, &name).await
}

#[tauri::command]
pub async fn rename_meal(
  state: State<'_, Arc<AppState>>,
  meal_id: i64,
  name: String,
) -> Result<Meal, AppError> {
  diets::rename_meal(&state.db, meal_id, &name).await
}

#[tauri::command]
pub async fn delete_meal(state: State<'_, Arc<AppState>>, meal_id: i64) -> Result<(), AppError> {
  diets::delete_meal(&state.db, meal_id).await
}

#[tauri::command]
pub async fn add_food_to_meal(
  state: State<'_, Arc<AppState>>,
  meal_id: i64,
  food_id: i64,
  grams: f64,
) -> Result<MealEntry, AppError> {
  diets::add_food_to_meal(&state.db, meal_id, food_id, grams).await
}

#[tauri::command]
pub async fn update_meal_entry(
  state: State<'_, Arc<AppState>>,
  entry_id: i64,
  grams: f64,
) -> Result<MealEntry, AppError> {
  diets::update_meal_entry(&state.db, entry_id, grams).await
}

#[tauri::command]
pub async fn remove_meal_entry(
  state: State<'_, Arc<AppState>>,
  entry_id: i64,
) -> Result<(), AppError> {
  diets::remove_meal_entry(&state.db, entry_id).await
}

/// ---------------------------------------------------------------------------
/// Diet vs Goals
/// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct DietProgress {
  pub summary: DietSummary,
  pub goals: MacroGoalsOutcome,
  /// None when the profile is incomplete
  pub remaining: Option<Remaining>,
}

#[tauri::command]
pub async fn get_diet_progress(
  state: State<'_, Arc<AppState>>,
  diet_id: i64,
  profile: ProfileInput,
) -> Result<DietProgress, AppError> {
  let summary = diets::diet_summary(&state.db, diet_id).await?;
  let goals = goals_for_today(&profile);
  let remaining = goals
    .goals()
    .map(|g| Remaining::between(g, &summary.totals));

  Ok(DietProgress {
    summary,
    goals,
    remaining,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::*;
  use serial_test::serial;
  use tauri::Manager;

  #[tokio::test]
  #[serial]
  async fn test_build_diet_through_commands() {
    let pool = setup_test_db().await;
    let food_ids = seed_test_foods(&pool).await;
    let state = Arc::new(AppState { db: pool.clone() });
    let app = tauri::test::mock_app();
    app.manage(state);

    let diet = create_diet(
      app.state(),
      NewDiet {
        name: "Volumen".into(),
        description: None,
      },
    )
    .await
    .unwrap();
    let meal = add_meal(app.state(), diet.id, "Cena".into()).await.unwrap();
    add_food_to_meal(app.state(), meal.id, food_ids[1], 300.0)
      .await
      .unwrap();

    assert_eq!(get_diet(app.state(), diet.id).await.unwrap().name, "Volumen");
    assert_eq!(list_meals(app.state(), diet.id).await.unwrap(), vec![meal]);

    let summary = get_diet_summary(app.state(), diet.id).await.unwrap();
    assert_eq!(summary.meals.len(), 1);
    assert!((summary.totals.calories - 390.0).abs() < 1e-9);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  #[serial]
  async fn test_diet_progress() {
    let pool = setup_test_db().await;
    let (diet_id, _) = seed_test_diet(&pool).await;
    let state = Arc::new(AppState { db: pool.clone() });
    let app = tauri::test::mock_app();
    app.manage(state);

    let progress = get_diet_progress(app.state(), diet_id, mock_profile_input())
      .await
      .unwrap();
    let goals = progress.goals.goals().copied().expect("complete profile");
    let remaining = progress.remaining.expect("remaining with goals");
    assert!((remaining.calories - (goals.calorie_goal as f64 - 548.4)).abs() < 1e-9);
    assert!((remaining.protein - (126.0 - 62.0 - 2.7)).abs() < 1e-9);

    let incomplete = get_diet_progress(app.state(), diet_id, ProfileInput::default())
      .await
      .unwrap();
    assert!(incomplete.remaining.is_none());
    assert!(matches!(
      incomplete.goals,
      MacroGoalsOutcome::MissingData { ref fields } if fields.len() == 6
    ));

    teardown_test_db(pool).await;
  }
}
