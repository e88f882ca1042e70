use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVING_GRAMS: f64 = 100.0;

/// A catalogue food. Nutrient values are per 100 g.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Food {
  pub id: i64,
  pub name: String,
  pub brand: Option<String>,
  pub calories: f64,
  pub protein: f64,
  pub carbs: f64,
  pub fat: f64,
  pub serving_grams: f64,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

/// For inserting or replacing a food (without id, timestamps)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFood {
  pub name: String,
  pub brand: Option<String>,
  pub calories: f64,
  pub protein: f64,
  pub carbs: f64,
  pub fat: f64,
  pub serving_grams: Option<f64>,
}
