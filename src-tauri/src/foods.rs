//! Food catalogue: validation and persistence of foods

use log::{debug, info};
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::models::food::DEFAULT_SERVING_GRAMS;
use crate::models::{Food, NewFood};

const FOOD_COLUMNS: &str =
  "id, name, brand, calories, protein, carbs, fat, serving_grams, created_at, updated_at";

/// ---------------------------------------------------------------------------
/// Validation
/// ---------------------------------------------------------------------------

/// A food ready to be written: trimmed name, brand blank -> None, serving defaulted
#[derive(Debug, Clone, PartialEq)]
struct ValidFood {
  name: String,
  brand: Option<String>,
  calories: f64,
  protein: f64,
  carbs: f64,
  fat: f64,
  serving_grams: f64,
}

fn validate(food: &NewFood) -> AppResult<ValidFood> {
  let name = food.name.trim();
  if name.is_empty() {
    return Err(AppError::Validation("food name is required".into()));
  }

  for (field, value) in [
    ("calories", food.calories),
    ("protein", food.protein),
    ("carbs", food.carbs),
    ("fat", food.fat),
  ] {
    if !value.is_finite() || value < 0.0 {
      return Err(AppError::Validation(format!("{} must be zero or more", field)));
    }
  }

  let serving_grams = food.serving_grams.unwrap_or(DEFAULT_SERVING_GRAMS);
  if !serving_grams.is_finite() || serving_grams <= 0.0 {
    return Err(AppError::Validation("serving size must be greater than zero".into()));
  }

  Ok(ValidFood {
    name: name.to_string(),
    brand: food
      .brand
      .as_deref()
      .map(str::trim)
      .filter(|b| !b.is_empty())
      .map(str::to_string),
    calories: food.calories,
    protein: food.protein,
    carbs: food.carbs,
    fat: food.fat,
    serving_grams,
  })
}

/// ---------------------------------------------------------------------------
/// Database Operations
/// ---------------------------------------------------------------------------

/// List foods ordered by name, optionally filtered by a case-insensitive
/// substring of the name or brand
pub async fn list_foods(pool: &SqlitePool, search: Option<&str>) -> AppResult<Vec<Food>> {
  let pattern = search
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(|s| format!("%{}%", s.to_lowercase()));

  let foods = match pattern {
    Some(pattern) => {
      sqlx::query_as::<_, Food>(&format!(
        "SELECT {} FROM foods
         WHERE lower(name) LIKE ?1 OR lower(COALESCE(brand, '')) LIKE ?1
         ORDER BY name COLLATE NOCASE",
        FOOD_COLUMNS
      ))
      .bind(pattern)
      .fetch_all(pool)
      .await?
    }
    None => {
      sqlx::query_as::<_, Food>(&format!(
        "SELECT {} FROM foods ORDER BY name COLLATE NOCASE",
        FOOD_COLUMNS
      ))
      .fetch_all(pool)
      .await?
    }
  };

  debug!("Loaded {} foods", foods.len());
  Ok(foods)
}

pub async fn get_food(pool: &SqlitePool, id: i64) -> AppResult<Food> {
  sqlx::query_as::<_, Food>(&format!("SELECT {} FROM foods WHERE id = ?1", FOOD_COLUMNS))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::not_found("food", id))
}

pub async fn create_food(pool: &SqlitePool, food: &NewFood) -> AppResult<Food> {
  let food = validate(food)?;

  let result = sqlx::query(
    r#"
    INSERT INTO foods (name, brand, calories, protein, carbs, fat, serving_grams)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    "#,
  )
  .bind(&food.name)
  .bind(&food.brand)
  .bind(food.calories)
  .bind(food.protein)
  .bind(food.carbs)
  .bind(food.fat)
  .bind(food.serving_grams)
  .execute(pool)
  .await
  .map_err(|e| duplicate_name(e, &food.name))?;

  let id = result.last_insert_rowid();
  info!("Created food {} ({})", id, food.name);
  get_food(pool, id).await
}

pub async fn update_food(pool: &SqlitePool, id: i64, food: &NewFood) -> AppResult<Food> {
  let food = validate(food)?;

  let result = sqlx::query(
    r#"
    UPDATE foods SET
      name = ?1,
      brand = ?2,
      calories = ?3,
      protein = ?4,
      carbs = ?5,
      fat = ?6,
      serving_grams = ?7,
      updated_at = CURRENT_TIMESTAMP
    WHERE id = ?8
    "#,
  )
  .bind(&food.name)
  .bind(&food.brand)
  .bind(food.calories)
  .bind(food.protein)
  .bind(food.carbs)
  .bind(food.fat)
  .bind(food.serving_grams)
  .bind(id)
  .execute(pool)
  .await
  .map_err(|e| duplicate_name(e, &food.name))?;

  if result.rows_affected() == 0 {
    return Err(AppError::not_found("food", id));
  }

  get_food(pool, id).await
}

/// Delete a food. Meal entries using it are removed with it.
pub async fn delete_food(pool: &SqlitePool, id: i64) -> AppResult<()> {
  let result = sqlx::query("DELETE FROM foods WHERE id = ?1")
    .bind(id)
    .execute(pool)
    .await?;

  if result.rows_affected() == 0 {
    return Err(AppError::not_found("food", id));
  }

  info!("Deleted food {}", id);
  Ok(())
}

fn duplicate_name(e: sqlx::Error, name: &str) -> AppError {
  match AppError::from(e) {
    AppError::Conflict(_) => AppError::Conflict(format!("a food named '{}' already exists", name)),
    other => other,
  }
}
