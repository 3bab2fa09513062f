//! Application configuration module.
//!
//! Manages the TOML config file holding the backend address and the
//! initial view settings.

#[allow(clippy::module_inception)]
mod config;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
