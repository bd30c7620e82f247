//! Configuration types for attendance aggregation and leave accrual.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceEvent, LeaveRequest, RosterEntry};

/// Wall-clock times are written as `HH:MM` in configuration files.
mod wall_clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|e| serde::de::Error::custom(format!("invalid time '{}': {}", raw, e)))
    }
}

/// How a day whose last check-out is not after its first check-in is
/// resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvertedPairPolicy {
    /// Keep the check-in and drop the check-out; the day is `partial`.
    #[default]
    KeepCheckIn,
    /// Keep the check-out and drop the check-in; the day is `partial`.
    KeepCheckOut,
    /// Use neither punch; the day is `absent`.
    MarkAbsent,
}

/// The configured lunch break, as wall-clock times relative to a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunchWindow {
    /// When lunch starts.
    pub start: NaiveTime,
    /// When lunch ends.
    pub end: NaiveTime,
}

impl LunchWindow {
    /// Length of the window in seconds. Zero for an empty or inverted window.
    pub fn length_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds().max(0)
    }
}

/// Working-hours configuration from `attendance.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSettings {
    /// Published start of the working day.
    ///
    /// Informational only: pairing and hour totals come from the punches
    /// themselves, and no lateness is derived from this value.
    #[serde(with = "wall_clock", default = "default_check_in_start")]
    pub check_in_start: NaiveTime,
    /// Published end of the working day. Informational only, like
    /// `check_in_start`.
    #[serde(with = "wall_clock", default = "default_check_out_end")]
    pub check_out_end: NaiveTime,
    /// Start of the unpaid lunch window.
    #[serde(with = "wall_clock", default = "default_lunch_break_start")]
    pub lunch_break_start: NaiveTime,
    /// End of the unpaid lunch window.
    #[serde(with = "wall_clock", default = "default_lunch_break_end")]
    pub lunch_break_end: NaiveTime,
    /// Weekdays on which attendance is expected.
    #[serde(default = "default_working_days")]
    pub working_days: Vec<Weekday>,
    /// Punches with a match score below this value are not used for pairing.
    #[serde(default)]
    pub min_match_score: Decimal,
    /// Resolution of check-out-before-check-in days.
    #[serde(default)]
    pub inverted_pair_policy: InvertedPairPolicy,
    /// Longest period summary that may be requested, in days.
    #[serde(default = "default_max_period_days")]
    pub max_period_days: u32,
}

fn default_check_in_start() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).expect("valid wall-clock time")
}

fn default_check_out_end() -> NaiveTime {
    NaiveTime::from_hms_opt(17, 0, 0).expect("valid wall-clock time")
}

fn default_lunch_break_start() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).expect("valid wall-clock time")
}

fn default_lunch_break_end() -> NaiveTime {
    NaiveTime::from_hms_opt(13, 0, 0).expect("valid wall-clock time")
}

fn default_working_days() -> Vec<Weekday> {
    vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ]
}

fn default_max_period_days() -> u32 {
    366
}

impl Default for AttendanceSettings {
    fn default() -> Self {
        Self {
            check_in_start: default_check_in_start(),
            check_out_end: default_check_out_end(),
            lunch_break_start: default_lunch_break_start(),
            lunch_break_end: default_lunch_break_end(),
            working_days: default_working_days(),
            min_match_score: Decimal::ZERO,
            inverted_pair_policy: InvertedPairPolicy::default(),
            max_period_days: default_max_period_days(),
        }
    }
}

impl AttendanceSettings {
    /// Returns the configured lunch window.
    pub fn lunch_window(&self) -> LunchWindow {
        LunchWindow {
            start: self.lunch_break_start,
            end: self.lunch_break_end,
        }
    }

    /// Returns true when attendance is expected on `date`.
    ///
    /// With `include_weekends` every day is a working day; otherwise only
    /// the configured `working_days` are.
    pub fn is_working_day(&self, date: NaiveDate, include_weekends: bool) -> bool {
        include_weekends || self.working_days.contains(&date.weekday())
    }

    /// Rejects settings the aggregators cannot work with.
    pub fn validate(&self) -> EngineResult<()> {
        if self.lunch_break_end <= self.lunch_break_start {
            return Err(EngineError::InvalidConfig {
                field: "lunch_break_end".to_string(),
                message: "must be after lunch_break_start".to_string(),
            });
        }
        if self.check_out_end <= self.check_in_start {
            return Err(EngineError::InvalidConfig {
                field: "check_out_end".to_string(),
                message: "must be after check_in_start".to_string(),
            });
        }
        if self.min_match_score < Decimal::ZERO || self.min_match_score > Decimal::ONE {
            return Err(EngineError::InvalidConfig {
                field: "min_match_score".to_string(),
                message: format!("{} is outside [0, 1]", self.min_match_score),
            });
        }
        if self.max_period_days == 0 {
            return Err(EngineError::InvalidConfig {
                field: "max_period_days".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Leave accrual policy from `policy.yaml` or a settings update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePolicySettings {
    /// Vacation days earned per month of service after probation.
    #[serde(default = "default_monthly_vacation_days")]
    pub monthly_vacation_days: Decimal,
    /// Months at the start of employment during which nothing accrues.
    #[serde(default = "default_probation_period_months")]
    pub probation_period_months: u32,
    /// Whether weekends count as expected attendance days.
    #[serde(default)]
    pub include_weekends: bool,
    /// Longest leave request that is not flagged, in days.
    #[serde(default = "default_max_consecutive_days")]
    pub max_consecutive_days: u32,
}

/// Upper bound for `monthly_vacation_days`: a month never grants more days
/// than it has.
pub const MAX_MONTHLY_VACATION_DAYS: u32 = 31;

fn default_monthly_vacation_days() -> Decimal {
    Decimal::new(25, 1)
}

fn default_probation_period_months() -> u32 {
    3
}

fn default_max_consecutive_days() -> u32 {
    30
}

impl Default for LeavePolicySettings {
    fn default() -> Self {
        Self {
            monthly_vacation_days: default_monthly_vacation_days(),
            probation_period_months: default_probation_period_months(),
            include_weekends: false,
            max_consecutive_days: default_max_consecutive_days(),
        }
    }
}

impl LeavePolicySettings {
    /// Rejects out-of-range policy values.
    pub fn validate(&self) -> EngineResult<()> {
        if self.monthly_vacation_days < Decimal::ZERO {
            return Err(EngineError::InvalidPolicy {
                field: "monthly_vacation_days".to_string(),
                message: format!("{} must not be negative", self.monthly_vacation_days),
            });
        }
        if self.monthly_vacation_days > Decimal::from(MAX_MONTHLY_VACATION_DAYS) {
            return Err(EngineError::InvalidPolicy {
                field: "monthly_vacation_days".to_string(),
                message: format!(
                    "{} exceeds {} days per month",
                    self.monthly_vacation_days, MAX_MONTHLY_VACATION_DAYS
                ),
            });
        }
        if self.max_consecutive_days < 1 {
            return Err(EngineError::InvalidPolicy {
                field: "max_consecutive_days".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// A committed policy together with its version.
///
/// Versions increase by one on every settings update; balances record the
/// version they were computed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedPolicy {
    /// Monotonic version number.
    pub version: u64,
    /// The policy values.
    pub settings: LeavePolicySettings,
    /// When this version was committed.
    pub updated_at: DateTime<Utc>,
}

impl VersionedPolicy {
    /// Creates the first version of a policy.
    pub fn initial(settings: LeavePolicySettings, updated_at: DateTime<Utc>) -> Self {
        Self {
            version: 1,
            settings,
            updated_at,
        }
    }

    /// Creates the version that would replace this one.
    pub fn next(&self, settings: LeavePolicySettings, updated_at: DateTime<Utc>) -> Self {
        Self {
            version: self.version + 1,
            settings,
            updated_at,
        }
    }
}

/// Initial data for the in-memory store from `seed.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    /// Employees and their hire dates.
    #[serde(default)]
    pub employees: Vec<RosterEntry>,
    /// Recorded punches.
    #[serde(default)]
    pub events: Vec<AttendanceEvent>,
    /// Previously submitted leave requests.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Working-hours settings.
    attendance: AttendanceSettings,
    /// Initial leave policy.
    policy: LeavePolicySettings,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(attendance: AttendanceSettings, policy: LeavePolicySettings) -> Self {
        Self { attendance, policy }
    }

    /// Returns the working-hours settings.
    pub fn attendance(&self) -> &AttendanceSettings {
        &self.attendance
    }

    /// Returns the initial leave policy.
    pub fn policy(&self) -> &LeavePolicySettings {
        &self.policy
    }
}
