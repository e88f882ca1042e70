use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tauri::Manager;

use crate::config::AppConfig;
use crate::error::AppError;

pub type DbPool = SqlitePool;

/// Application state holding the database connection pool
pub struct AppState {
  pub db: DbPool,
}

/// Get the path to the database file
/// Stored in the platform app data dir, e.g. ~/.local/share/com.nutritrack.app/nutritrack.db
fn get_db_path<R: tauri::Runtime>(
  app: &tauri::AppHandle<R>,
  config: &AppConfig,
) -> Result<PathBuf, AppError> {
  let data_dir = app
    .path()
    .app_data_dir()
    .map_err(|e| AppError::Config(format!("Failed to get app data dir: {}", e)))?;

  // Create directory if it doesn't exist
  fs::create_dir_all(&data_dir)
    .map_err(|e| AppError::Config(format!("Failed to create {}: {}", data_dir.display(), e)))?;

  Ok(data_dir.join(&config.db_file))
}

/// Open a pool on `url` and bring the schema up to date
pub async fn connect(url: &str, max_connections: u32) -> Result<DbPool, AppError> {
  let options = SqliteConnectOptions::from_str(url)?
    .create_if_missing(true)
    .foreign_keys(true);

  let pool = SqlitePoolOptions::new()
    .max_connections(max_connections)
    .connect_with(options)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  Ok(pool)
}

/// Initialize the database connection pool and run migrations
pub async fn initialize_db<R: tauri::Runtime>(
  app: &tauri::AppHandle<R>,
  config: &AppConfig,
) -> Result<DbPool, AppError> {
  let db_path = get_db_path(app, config)?;
  let db_url = format!("sqlite://{}", db_path.display());

  info!("Initializing database at: {}", db_path.display());

  let pool = connect(&db_url, config.db_max_connections).await?;

  info!("Database initialized successfully");

  Ok(pool)
}
