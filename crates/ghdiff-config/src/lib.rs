//! Configuration for ghdiff
//!
//! This crate provides:
//! - Config file locations (local, XDG config dir, home directory)
//! - Configuration file loading (TOML)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::{AppConfig, OutputFormat, ViewMode};
pub use config_file::load_config_file;
