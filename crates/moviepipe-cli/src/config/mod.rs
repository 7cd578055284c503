//! Application configuration module.
//!
//! Manages the TOML config file holding the backend base URL, and
//! resolves where config and log files live.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{ApiConfig, AppConfig};
pub use paths::{resolve_config_path, resolve_log_path};
