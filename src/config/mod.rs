//! Configuration loading and management for the attendance engine.
//!
//! This module loads working-hours settings and the initial leave policy
//! from YAML files, and defines the versioned policy value that the
//! accrual calculator receives by reference.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Accrual: {} days/month", config.policy().monthly_vacation_days);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceSettings, EngineConfig, InvertedPairPolicy, LeavePolicySettings, LunchWindow,
    MAX_MONTHLY_VACATION_DAYS, SeedData, VersionedPolicy,
};
