//! Period attendance summary model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DailySummary;

/// Totals reduced from the daily summaries of a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Calendar days in the range, inclusive.
    pub total_days: u32,
    /// Days on which attendance is expected.
    pub working_days: u32,
    /// Days with at least one punch.
    pub days_with_records: u32,
    /// Days with status `complete`.
    pub complete_days: u32,
    /// Days with status `partial`.
    pub partial_days: u32,
    /// Days with status `absent`.
    pub absent_days: u32,
    /// Days with status `no_data`.
    pub no_data_days: u32,
    /// Punches recorded across the period.
    pub total_records: u32,
    /// Sum of the daily worked hours.
    pub worked_hours: Decimal,
}

/// Attendance for one employee over an inclusive date range.
///
/// `daily_summaries` holds exactly one entry per calendar day in
/// chronological order, including non-working days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The employee summarised.
    pub employee_id: String,
    /// The first day of the range.
    pub start_date: NaiveDate,
    /// The last day of the range.
    pub end_date: NaiveDate,
    /// One summary per calendar day.
    pub daily_summaries: Vec<DailySummary>,
    /// Reductions over `daily_summaries`.
    pub totals: PeriodTotals,
}
