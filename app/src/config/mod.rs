//! Configuration management: defaults, config-file loading, launch arguments.

pub mod app_config;
pub mod cli;

pub use app_config::{AppConfig, DEFAULT_API_PORT};
pub use cli::LaunchArgs;
