//! Configuration loading and management for the payroll engine.
//!
//! This module provides the [`EngineConfig`] tunables passed into every stage
//! and a loader that reads them from YAML.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default.yaml").unwrap();
//! println!("Max shift: {}h", loader.config().max_shift_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BreakResumePolicy, ContractorIntervalDays, EngineConfig, MAX_NOISE_WINDOW_SECONDS,
    MAX_SHIFT_THRESHOLD_HOURS, PayPeriodDays,
};
