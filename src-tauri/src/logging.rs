//! Logger setup: `log` facade backed by log4rs

use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

use crate::config::AppConfig;
use crate::error::AppError;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}";

/// Initialize logging from the YAML file if it exists, otherwise log to stdout
pub fn init(config: &AppConfig) -> Result<(), AppError> {
  if Path::new(&config.log_config).exists() {
    return log4rs::init_file(&config.log_config, Default::default())
      .map_err(|e| AppError::Config(format!("Failed to load {}: {}", config.log_config, e)));
  }

  let stdout = ConsoleAppender::builder()
    .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
    .build();

  let log_config = Config::builder()
    .appender(Appender::builder().build("stdout", Box::new(stdout)))
    .build(Root::builder().appender("stdout").build(config.log_level))
    .map_err(|e| AppError::Config(e.to_string()))?;

  log4rs::init_config(log_config).map_err(|e| AppError::Config(e.to_string()))?;
  Ok(())
}
