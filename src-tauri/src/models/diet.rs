use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::nutrition::Nutrients;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Diet {
  pub id: i64,
  pub name: String,
  pub description: Option<String>,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDiet {
  pub name: String,
  pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Meal {
  pub id: i64,
  pub diet_id: i64,
  pub name: String,
  pub position: i64,
}

/// A quantity of one food inside a meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MealEntry {
  pub id: i64,
  pub meal_id: i64,
  pub food_id: i64,
  pub grams: f64,
}

/// ---------------------------------------------------------------------------
/// Summaries (computed, never stored)
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealEntryDetail {
  pub entry_id: i64,
  pub food_id: i64,
  pub food_name: String,
  pub grams: f64,
  pub nutrients: Nutrients,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealSummary {
  pub meal: Meal,
  pub entries: Vec<MealEntryDetail>,
  pub totals: Nutrients,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietSummary {
  pub diet: Diet,
  pub meals: Vec<MealSummary>,
  pub totals: Nutrients,
}
