//! Attendance event model.
//!
//! An [`AttendanceEvent`] is one punch recorded by a time-clock or biometric
//! terminal. Events are immutable source-of-truth records; every summary in
//! this crate is derived from them.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The direction of a punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// The employee arrived.
    CheckIn,
    /// The employee left.
    CheckOut,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::CheckIn => write!(f, "check_in"),
            EventType::CheckOut => write!(f, "check_out"),
        }
    }
}

/// A single check-in or check-out punch.
///
/// Timestamps are expected to be normalised to one reference timezone by the
/// store adapter before they reach the aggregators.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AttendanceEvent, EventType};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let event = AttendanceEvent::new(
///     "emp_001",
///     NaiveDateTime::parse_from_str("2026-01-21 08:02:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     EventType::CheckIn,
/// )
/// .with_device("terminal_lobby")
/// .with_match_score(Decimal::new(97, 2));
///
/// assert!(event.validate().is_ok());
/// assert_eq!(event.date().to_string(), "2026-01-21");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// The employee who punched.
    pub employee_id: String,
    /// When the punch happened.
    pub timestamp: NaiveDateTime,
    /// Whether this is a check-in or a check-out.
    pub event_type: EventType,
    /// The terminal that recorded the punch, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// Biometric match confidence in `[0, 1]`, if the terminal reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<Decimal>,
}

impl AttendanceEvent {
    /// Creates an event without device or match score metadata.
    pub fn new(
        employee_id: impl Into<String>,
        timestamp: NaiveDateTime,
        event_type: EventType,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            timestamp,
            event_type,
            device_id: None,
            match_score: None,
        }
    }

    /// Sets the recording device.
    pub fn with_device(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Sets the biometric match score.
    pub fn with_match_score(mut self, match_score: Decimal) -> Self {
        self.match_score = Some(match_score);
        self
    }

    /// Returns the calendar day the punch belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Checks the event before it is accepted into a store.
    ///
    /// Aggregation never calls this: malformed punches that are already
    /// stored degrade to a summary status instead of failing.
    pub fn validate(&self) -> EngineResult<()> {
        if self.employee_id.trim().is_empty() {
            return Err(EngineError::MalformedEvent {
                employee_id: self.employee_id.clone(),
                message: "employee_id must not be empty".to_string(),
            });
        }

        if let Some(score) = self.match_score {
            if score < Decimal::ZERO || score > Decimal::ONE {
                return Err(EngineError::MalformedEvent {
                    employee_id: self.employee_id.clone(),
                    message: format!("match_score {} is outside [0, 1]", score),
                });
            }
        }

        Ok(())
    }
}
