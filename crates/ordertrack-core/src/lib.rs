mod app_config;
mod config;
pub mod orders;

pub use app_config::{AppConfig, CredentialPolicy, Environment};
pub use config::{
    load_app_config, load_app_config_from_env, DEFAULT_API_URL, DEFAULT_FALLBACK_ERROR,
    DEFAULT_USER_AGENT,
};
pub use orders::{EntryId, HistoryEntry, Order};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
