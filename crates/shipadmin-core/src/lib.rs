//! Domain logic shared by the shipadmin proxy server: configuration,
//! the fixed sheet/category catalog, numeric keystroke normalization,
//! volumetric-weight derivation, and the editing-session form state.

mod app_config;
pub mod catalog;
mod config;
pub mod form;
pub mod input;
pub mod metric;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

/// Errors produced while loading application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
