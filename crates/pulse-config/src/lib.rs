//! pulse-config
//!
//! Persistent user preferences: payday, monthly budget, insight thresholds
//! and scroll tracking tuning, plus the atomic file writes shared with the
//! data store.

pub mod error;
pub mod manager;
pub mod model;
pub mod persist;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, InsightThresholds, ScrollSpySettings};
pub use persist::{replace_file, staging_path};
