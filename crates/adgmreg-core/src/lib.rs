use thiserror::Error;

mod app_config;
mod config;
mod records;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{CsvRecord, FirmRecord, PractitionerRecord, NOT_AVAILABLE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
