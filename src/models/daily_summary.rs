//! Daily attendance summary model.
//!
//! A [`DailySummary`] is the single daily truth derived from one employee's
//! punches on one calendar day. It is recomputable from the event log and is
//! never treated as an authoritative record.

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Completeness classification of one day.
///
/// Computed once by the daily aggregator and carried through; consumers
/// never re-derive it from the other fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyStatus {
    /// A usable check-in and a later check-out were both found.
    Complete,
    /// Only one side of the pair is usable.
    Partial,
    /// Punches exist but no usable check-in or check-out could be formed.
    Absent,
    /// No punches at all.
    NoData,
}

impl DailyStatus {
    /// Returns true when at least one punch was recorded for the day.
    pub fn has_records(self) -> bool {
        self != DailyStatus::NoData
    }
}

impl std::fmt::Display for DailyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DailyStatus::Complete => write!(f, "complete"),
            DailyStatus::Partial => write!(f, "partial"),
            DailyStatus::Absent => write!(f, "absent"),
            DailyStatus::NoData => write!(f, "no_data"),
        }
    }
}

/// A punch the aggregator could not use as recorded.
///
/// Anomalies are informational. They explain a degraded status but never
/// turn into errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PunchAnomaly {
    /// The last check-out is not after the first check-in.
    InvertedPair {
        /// The first qualifying check-in.
        check_in: NaiveDateTime,
        /// The last qualifying check-out.
        check_out: NaiveDateTime,
    },
    /// The punch's match score is below the configured minimum.
    LowMatchScore {
        /// When the punch happened.
        timestamp: NaiveDateTime,
        /// The reported match score.
        match_score: Decimal,
    },
    /// The punch does not fall on the summarised day.
    OutsideDay {
        /// When the punch happened.
        timestamp: NaiveDateTime,
    },
    /// The punch belongs to a different employee.
    ForeignEmployee {
        /// The employee named on the punch.
        employee_id: String,
    },
}

/// Attendance summary for one employee on one calendar day.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{DailyStatus, DailySummary};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let summary = DailySummary::no_data(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2026, 1, 24).unwrap(),
///     false,
/// );
/// assert_eq!(summary.status, DailyStatus::NoData);
/// assert_eq!(summary.worked_hours, Decimal::ZERO);
/// assert!(!summary.has_records());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    /// The employee summarised.
    pub employee_id: String,
    /// The calendar day summarised.
    pub date: NaiveDate,
    /// The weekday of `date`.
    pub day_of_week: Weekday,
    /// Whether attendance is expected on this day.
    pub is_working_day: bool,
    /// The first qualifying check-in, if usable.
    pub check_in: Option<NaiveDateTime>,
    /// The last qualifying check-out, if usable.
    pub check_out: Option<NaiveDateTime>,
    /// Number of check-in punches recorded.
    pub check_in_count: u32,
    /// Number of check-out punches recorded.
    pub check_out_count: u32,
    /// Number of punches recorded for the day.
    pub total_records: u32,
    /// Raw hours between check-in and check-out.
    pub total_hours: Decimal,
    /// Hours of the lunch window covered by the work interval.
    pub lunch_break_hours: Decimal,
    /// `total_hours - lunch_break_hours`, never negative.
    pub worked_hours: Decimal,
    /// True only when worked hours were computed from a full pair.
    pub is_complete: bool,
    /// Completeness classification.
    pub status: DailyStatus,
    /// Punches that were recorded but could not be used as-is.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<PunchAnomaly>,
}

impl DailySummary {
    /// Creates the summary of a day without any punches.
    pub fn no_data(employee_id: impl Into<String>, date: NaiveDate, is_working_day: bool) -> Self {
        use chrono::Datelike;

        Self {
            employee_id: employee_id.into(),
            date,
            day_of_week: date.weekday(),
            is_working_day,
            check_in: None,
            check_out: None,
            check_in_count: 0,
            check_out_count: 0,
            total_records: 0,
            total_hours: Decimal::ZERO,
            lunch_break_hours: Decimal::ZERO,
            worked_hours: Decimal::ZERO,
            is_complete: false,
            status: DailyStatus::NoData,
            anomalies: Vec::new(),
        }
    }

    /// Returns true when at least one punch was recorded for the day.
    pub fn has_records(&self) -> bool {
        self.status.has_records()
    }
}
