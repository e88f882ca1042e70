//! Application error type returned by store operations and Tauri commands

use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
  #[error("Database error: {0}")]
  Database(String),

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Invalid input: {0}")]
  Validation(String),

  #[error("Already exists: {0}")]
  Conflict(String),

  #[error("Configuration error: {0}")]
  Config(String),
}

impl AppError {
  pub fn not_found(entity: &str, id: i64) -> Self {
    AppError::NotFound(format!("{} {}", entity, id))
  }
}

// Convert sqlx::Error to AppError
impl From<sqlx::Error> for AppError {
  fn from(e: sqlx::Error) -> Self {
    match &e {
      sqlx::Error::RowNotFound => AppError::NotFound("row".into()),
      sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(db.message().to_string()),
      sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
        AppError::NotFound(format!("referenced row missing ({})", db.message()))
      }
      _ => AppError::Database(e.to_string()),
    }
  }
}

impl From<sqlx::migrate::MigrateError> for AppError {
  fn from(e: sqlx::migrate::MigrateError) -> Self {
    AppError::Database(format!("Migration failed: {}", e))
  }
}

pub type AppResult<T> = Result<T, AppError>;
