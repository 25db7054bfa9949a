//! Command-line host for the Permit node.

pub mod commands;
pub mod config;
pub mod input;

pub use config::{load_config, AppConfig, ConfigError};
