//! Climate API Core Library
//!
//! Shared utilities for the climate observations service:
//! - Configuration loading (XDG-compliant)
//! - Dataset path checks

mod config;
pub mod fs;

pub use config::{find_config_file, load_config, ConfigSource};
pub use fs::{require_directory, require_file};

/// Application name used for XDG paths
pub const APP_NAME: &str = "climate-api";

/// Default API port
pub const DEFAULT_API_PORT: u16 = 5000;

/// Default location of the SQLite climate dataset
pub const DEFAULT_DATASET_PATH: &str = "./Resources/hawaii.sqlite";

/// Default span, in days, of the "recent" window
pub const DEFAULT_RECENT_DAYS: u32 = 365;
