mod app_config;
mod config;

pub use app_config::{TrendsConfig, DEFAULT_API_BASE_URL, DEFAULT_BATCH_EXECUTE_URL};
pub use config::{load_config, load_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
