//! Period attendance aggregation.
//!
//! This module runs the daily aggregator over every calendar day of an
//! inclusive date range and reduces the results to [`PeriodTotals`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::AttendanceSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceEvent, DailyStatus, DailySummary, PeriodSummary, PeriodTotals};

use super::daily_aggregation::aggregate_day;

/// Returns the number of calendar days in `[start, end]`, validating the
/// range against `max_days`.
///
/// # Errors
///
/// Returns `InvalidDateRange` if `end` is before `start` or the range is
/// longer than `max_days`.
pub fn period_length(start: NaiveDate, end: NaiveDate, max_days: u32) -> EngineResult<u32> {
    if end < start {
        return Err(EngineError::InvalidDateRange {
            start,
            end,
            message: "end date is before start date".to_string(),
        });
    }

    let days = (end - start).num_days() + 1;
    if days > i64::from(max_days) {
        return Err(EngineError::InvalidDateRange {
            start,
            end,
            message: format!("{} days exceeds the maximum of {}", days, max_days),
        });
    }

    Ok(days as u32)
}

/// Aggregates one employee's punches over an inclusive date range.
///
/// Every calendar day in the range gets a [`DailySummary`], in chronological
/// order, including non-working days. A day is a working day when
/// `include_weekends` is set or its weekday is listed in
/// `settings.working_days`.
///
/// Events outside the range are ignored; events for other employees are
/// recorded as anomalies on the day they fall on.
///
/// # Arguments
///
/// * `employee_id` - The employee being summarised
/// * `start` - First day of the range
/// * `end` - Last day of the range, inclusive
/// * `events` - Punches for the range, in any order
/// * `settings` - Working-hours settings
/// * `include_weekends` - Whether every day counts as a working day
///
/// # Errors
///
/// Returns `InvalidDateRange` if `end < start` or the range exceeds
/// `settings.max_period_days`.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::aggregate_period;
/// use attendance_engine::config::AttendanceSettings;
/// use chrono::NaiveDate;
///
/// let summary = aggregate_period(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2026, 1, 19).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 25).unwrap(),
///     &[],
///     &AttendanceSettings::default(),
///     false,
/// )
/// .unwrap();
///
/// assert_eq!(summary.totals.total_days, 7);
/// assert_eq!(summary.totals.working_days, 5);
/// assert_eq!(summary.totals.no_data_days, 7);
/// ```
pub fn aggregate_period(
    employee_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    events: &[AttendanceEvent],
    settings: &AttendanceSettings,
    include_weekends: bool,
) -> EngineResult<PeriodSummary> {
    let total_days = period_length(start, end, settings.max_period_days)?;

    let mut by_day: BTreeMap<NaiveDate, Vec<AttendanceEvent>> = BTreeMap::new();
    for event in events {
        let day = event.date();
        if day >= start && day <= end {
            by_day.entry(day).or_default().push(event.clone());
        }
    }

    let daily_summaries: Vec<DailySummary> = start
        .iter_days()
        .take(total_days as usize)
        .map(|date| {
            let day_events = by_day.get(&date).map(Vec::as_slice).unwrap_or(&[]);
            aggregate_day(employee_id, date, day_events, settings, include_weekends)
        })
        .collect();

    let totals = summarize_totals(&daily_summaries);

    Ok(PeriodSummary {
        employee_id: employee_id.to_string(),
        start_date: start,
        end_date: end,
        daily_summaries,
        totals,
    })
}

/// Reduces daily summaries to period totals.
pub fn summarize_totals(days: &[DailySummary]) -> PeriodTotals {
    let mut totals = PeriodTotals {
        total_days: days.len() as u32,
        working_days: 0,
        days_with_records: 0,
        complete_days: 0,
        partial_days: 0,
        absent_days: 0,
        no_data_days: 0,
        total_records: 0,
        worked_hours: Decimal::ZERO,
    };

    for day in days {
        if day.is_working_day {
            totals.working_days += 1;
        }
        if day.has_records() {
            totals.days_with_records += 1;
        }
        match day.status {
            DailyStatus::Complete => totals.complete_days += 1,
            DailyStatus::Partial => totals.partial_days += 1,
            DailyStatus::Absent => totals.absent_days += 1,
            DailyStatus::NoData => totals.no_data_days += 1,
        }
        totals.total_records += day.total_records;
        totals.worked_hours += day.worked_hours;
    }

    totals
}
