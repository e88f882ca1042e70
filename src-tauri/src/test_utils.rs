//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Seed data for foods and diets
//! - Mock profile inputs

use crate::models::NewFood;
use crate::profile::ProfileInput;
use sqlx::SqlitePool;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  crate::db::connect("sqlite::memory:", 1)
    .await
    .expect("Failed to create in-memory database")
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Seed three foods: chicken breast, white rice, olive oil (in that order)
/// Returns the IDs of created foods
pub async fn seed_test_foods(pool: &SqlitePool) -> Vec<i64> {
  let foods = [
    ("Pechuga de pollo", None, 165.0, 31.0, 0.0, 3.6, 150.0),
    ("Arroz blanco", None, 130.0, 2.7, 28.0, 0.3, 100.0),
    ("Aceite de oliva", Some("Hacendado"), 884.0, 0.0, 0.0, 100.0, 10.0),
  ];

  let mut ids = Vec::new();

  for (name, brand, calories, protein, carbs, fat, serving_grams) in foods {
    let result = sqlx::query(
      r#"
      INSERT INTO foods (name, brand, calories, protein, carbs, fat, serving_grams)
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
      "#,
    )
    .bind(name)
    .bind(brand)
    .bind(calories)
    .bind(protein)
    .bind(carbs)
    .bind(fat)
    .bind(serving_grams)
    .execute(pool)
    .await
    .expect("Failed to insert test food");

    ids.push(result.last_insert_rowid());
  }

  ids
}

/// Seed the foods and a diet using them
/// Returns the diet ID and its meal IDs
pub async fn seed_test_diet(pool: &SqlitePool) -> (i64, Vec<i64>) {
  let food_ids = seed_test_foods(pool).await;
  seed_test_diet_with(pool, &food_ids).await
}

/// Seed a diet "Mantenimiento" with two meals:
/// - Desayuno: 100 g rice
/// - Comida: 200 g chicken, 10 g olive oil
pub async fn seed_test_diet_with(pool: &SqlitePool, food_ids: &[i64]) -> (i64, Vec<i64>) {
  let diet_id = sqlx::query("INSERT INTO diets (name) VALUES ('Mantenimiento')")
    .execute(pool)
    .await
    .expect("Failed to seed diet")
    .last_insert_rowid();

  let meals: [(&str, Vec<(i64, f64)>); 2] = [
    ("Desayuno", vec![(food_ids[1], 100.0)]),
    ("Comida", vec![(food_ids[0], 200.0), (food_ids[2], 10.0)]),
  ];

  let mut meal_ids = Vec::new();

  for (position, (name, entries)) in meals.into_iter().enumerate() {
    let meal_id = sqlx::query("INSERT INTO meals (diet_id, name, position) VALUES (?1, ?2, ?3)")
      .bind(diet_id)
      .bind(name)
      .bind(position as i64)
      .execute(pool)
      .await
      .expect("Failed to seed meal")
      .last_insert_rowid();

    for (food_id, grams) in entries {
      sqlx::query("INSERT INTO meal_foods (meal_id, food_id, grams) VALUES (?1, ?2, ?3)")
        .bind(meal_id)
        .bind(food_id)
        .bind(grams)
        .execute(pool)
        .await
        .expect("Failed to seed meal entry");
    }

    meal_ids.push(meal_id);
  }

  (diet_id, meal_ids)
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn mock_new_food(name: &str) -> NewFood {
  NewFood {
    name: name.to_string(),
    brand: None,
    calories: 130.0,
    protein: 2.7,
    carbs: 28.0,
    fat: 0.3,
    serving_grams: None,
  }
}

/// 70 kg, 175 cm, born 01/01/1990, male, moderate activity, maintenance
pub fn mock_profile_input() -> ProfileInput {
  ProfileInput {
    weight_kg: "70".into(),
    height_cm: "175".into(),
    birth_date: "01011990".into(),
    sex: "Hombre".into(),
    activity_level: "Moderado".into(),
    goal: "Mantener peso".into(),
  }
}
