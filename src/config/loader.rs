//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{AttendanceSettings, EngineConfig, LeavePolicySettings, SeedData};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── attendance.yaml  # Working hours, lunch window, pairing rules
/// ├── policy.yaml      # Initial leave accrual policy
/// └── seed.yaml        # Optional roster and punches for the in-memory store
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Lunch starts at {}", loader.attendance().lunch_break_start);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `attendance.yaml` or `policy.yaml` is missing
    /// - Any file contains invalid YAML
    /// - A value is out of range (inverted lunch window, negative accrual, ...)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use attendance_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), attendance_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let attendance = Self::load_yaml::<AttendanceSettings>(&path.join("attendance.yaml"))?;
        attendance.validate()?;

        let policy = Self::load_yaml::<LeavePolicySettings>(&path.join("policy.yaml"))?;
        policy.validate()?;

        debug!(path = %path.display(), "Loaded engine configuration");

        Ok(Self {
            config: EngineConfig::new(attendance, policy),
        })
    }

    /// Loads seed data for the in-memory store.
    ///
    /// A missing file yields an empty seed; a malformed file is an error.
    pub fn load_seed<P: AsRef<Path>>(path: P) -> EngineResult<SeedData> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No seed file, starting with an empty store");
            return Ok(SeedData::default());
        }
        Self::load_yaml::<SeedData>(path)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the working-hours settings.
    pub fn attendance(&self) -> &AttendanceSettings {
        self.config.attendance()
    }

    /// Returns the initial leave policy.
    pub fn policy(&self) -> &LeavePolicySettings {
        self.config.policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Weekday};
    use rust_decimal::Decimal;

    use crate::config::InvertedPairPolicy;

    fn config_path() -> &'static str {
        "./config/default"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
    }

    #[test]
    fn test_attendance_settings_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let attendance = loader.attendance();

        assert_eq!(
            attendance.check_in_start,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap()
        );
        assert_eq!(
            attendance.check_out_end,
            NaiveTime::from_hms_opt(17, 0, 0).unwrap()
        );
        assert_eq!(
            attendance.lunch_break_start,
            NaiveTime::from_hms_opt(12, 0, 0).unwrap()
        );
        assert_eq!(
            attendance.lunch_break_end,
            NaiveTime::from_hms_opt(13, 0, 0).unwrap()
        );
        assert_eq!(
            attendance.working_days,
            vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri
            ]
        );
        assert_eq!(
            attendance.inverted_pair_policy,
            InvertedPairPolicy::KeepCheckIn
        );
    }

    #[test]
    fn test_policy_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let policy = loader.policy();

        assert_eq!(policy.monthly_vacation_days, Decimal::new(25, 1));
        assert_eq!(policy.probation_period_months, 3);
        assert!(!policy.include_weekends);
        assert_eq!(policy.max_consecutive_days, 30);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("attendance.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_seed_from_default_directory() {
        let seed = ConfigLoader::load_seed("./config/default/seed.yaml").unwrap();
        assert!(!seed.employees.is_empty());
        assert!(!seed.events.is_empty());
    }

    #[test]
    fn test_missing_seed_is_empty() {
        let seed = ConfigLoader::load_seed("/nonexistent/seed.yaml").unwrap();
        assert!(seed.employees.is_empty());
        assert!(seed.events.is_empty());
        assert!(seed.leave_requests.is_empty());
    }
}
