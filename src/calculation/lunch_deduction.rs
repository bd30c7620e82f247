//! Lunch deduction calculation functionality.
//!
//! This module computes how much of the configured lunch window a work
//! interval covers, and provides the hour rounding shared by the
//! aggregators.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::LunchWindow;

const SECONDS_PER_HOUR: i64 = 3600;

/// Rounds an hour quantity to 2 decimal places, midpoint away from zero.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::round_hours;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_hours(Decimal::from_str("8.125").unwrap()), Decimal::from_str("8.13").unwrap());
/// ```
pub fn round_hours(hours: Decimal) -> Decimal {
    hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a whole number of seconds to hours, rounded to 2 decimal places.
pub fn seconds_to_hours(seconds: i64) -> Decimal {
    round_hours(Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR))
}

/// Calculates the lunch hours covered by a work interval.
///
/// The lunch window is placed on the calendar day of `check_in`. The result
/// is the length of the intersection of `[check_in, check_out]` with that
/// window, clamped to `[0, window length]`. An interval that does not touch
/// the window yields zero.
///
/// # Arguments
///
/// * `check_in` - Start of the work interval
/// * `check_out` - End of the work interval
/// * `window` - The configured lunch window
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::lunch_break_hours;
/// use attendance_engine::config::AttendanceSettings;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let window = AttendanceSettings::default().lunch_window();
/// let check_in = NaiveDateTime::parse_from_str("2026-01-19 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let check_out = NaiveDateTime::parse_from_str("2026-01-19 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// assert_eq!(lunch_break_hours(check_in, check_out, &window), Decimal::ONE);
/// ```
pub fn lunch_break_hours(
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
    window: &LunchWindow,
) -> Decimal {
    let day = check_in.date();
    let window_start = day.and_time(window.start);
    let window_end = day.and_time(window.end);

    let overlap_start = check_in.max(window_start);
    let overlap_end = check_out.min(window_end);

    let overlap_seconds = (overlap_end - overlap_start)
        .num_seconds()
        .clamp(0, window.length_seconds());

    seconds_to_hours(overlap_seconds)
}

/// Calculates worked hours as total hours minus lunch, never negative.
pub fn worked_hours(total_hours: Decimal, lunch_hours: Decimal) -> Decimal {
    (total_hours - lunch_hours).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn noon_to_one() -> LunchWindow {
        LunchWindow {
            start: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_full_day_covers_whole_window() {
        let hours = lunch_break_hours(
            make_datetime("2026-01-19", "08:00:00"),
            make_datetime("2026-01-19", "17:00:00"),
            &noon_to_one(),
        );
        assert_eq!(hours, dec("1"));
    }

    #[test]
    fn test_morning_only_has_no_lunch() {
        let hours = lunch_break_hours(
            make_datetime("2026-01-19", "08:00:00"),
            make_datetime("2026-01-19", "11:30:00"),
            &noon_to_one(),
        );
        assert_eq!(hours, Decimal::ZERO);
    }

    #[test]
    fn test_afternoon_only_has_no_lunch() {
        let hours = lunch_break_hours(
            make_datetime("2026-01-19", "13:00:00"),
            make_datetime("2026-01-19", "17:00:00"),
            &noon_to_one(),
        );
        assert_eq!(hours, Decimal::ZERO);
    }

    #[test]
    fn test_partial_overlap_at_start() {
        let hours = lunch_break_hours(
            make_datetime("2026-01-19", "12:30:00"),
            make_datetime("2026-01-19", "17:00:00"),
            &noon_to_one(),
        );
        assert_eq!(hours, dec("0.50"));
    }

    #[test]
    fn test_partial_overlap_at_end() {
        let hours = lunch_break_hours(
            make_datetime("2026-01-19", "08:00:00"),
            make_datetime("2026-01-19", "12:20:00"),
            &noon_to_one(),
        );
        assert_eq!(hours, dec("0.33"));
    }

    #[test]
    fn test_interval_inside_window() {
        let hours = lunch_break_hours(
            make_datetime("2026-01-19", "12:15:00"),
            make_datetime("2026-01-19", "12:45:00"),
            &noon_to_one(),
        );
        assert_eq!(hours, dec("0.50"));
    }

    #[test]
    fn test_window_placed_on_check_in_day() {
        // Overnight shift: only the check-in day's window is considered.
        let hours = lunch_break_hours(
            make_datetime("2026-01-19", "22:00:00"),
            make_datetime("2026-01-20", "14:00:00"),
            &noon_to_one(),
        );
        assert_eq!(hours, Decimal::ZERO);
    }

    #[test]
    fn test_round_hours_midpoint_away_from_zero() {
        assert_eq!(round_hours(dec("1.005")), dec("1.01"));
        assert_eq!(round_hours(dec("1.004")), dec("1.00"));
        assert_eq!(round_hours(dec("-1.005")), dec("-1.01"));
    }

    #[test]
    fn test_seconds_to_hours() {
        assert_eq!(seconds_to_hours(9 * 3600), dec("9"));
        assert_eq!(seconds_to_hours(20 * 60), dec("0.33"));
        assert_eq!(seconds_to_hours(0), Decimal::ZERO);
    }

    #[test]
    fn test_worked_hours_never_negative() {
        assert_eq!(worked_hours(dec("0.25"), dec("0.50")), Decimal::ZERO);
        assert_eq!(worked_hours(dec("9"), dec("1")), dec("8"));
    }
}
