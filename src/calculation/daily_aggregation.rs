//! Daily attendance aggregation.
//!
//! This module reduces one employee's punches on one calendar day to a
//! [`DailySummary`]. Pairing is first qualifying check-in / last qualifying
//! check-out. Aggregation never fails: punches that cannot be used degrade
//! the day's status and are recorded as [`PunchAnomaly`] entries.

use chrono::NaiveDate;

use crate::config::{AttendanceSettings, InvertedPairPolicy};
use crate::models::{AttendanceEvent, DailyStatus, DailySummary, EventType, PunchAnomaly};

use super::lunch_deduction::{lunch_break_hours, seconds_to_hours, worked_hours};

/// Aggregates one employee's punches for one calendar day.
///
/// Events are considered in ascending timestamp order; ties keep their input
/// order. Events that belong to another employee or another day are skipped
/// and recorded as anomalies. A punch whose match score is below
/// `settings.min_match_score` is counted but never paired.
///
/// # Arguments
///
/// * `employee_id` - The employee being summarised
/// * `date` - The calendar day being summarised
/// * `events` - Punches for the day, in any order
/// * `settings` - Working-hours settings (lunch window, pairing rules)
/// * `include_weekends` - Whether every day counts as a working day
///
/// # Status Rules
///
/// | Usable check-in | Usable check-out | Status |
/// |---|---|---|
/// | yes | yes, later | `complete` |
/// | yes | no | `partial` |
/// | no | yes | `partial` |
/// | no | no, but punches exist | `absent` |
/// | no punches | | `no_data` |
///
/// A check-out that is not after the check-in is an inverted pair and is
/// resolved by `settings.inverted_pair_policy`.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::aggregate_day;
/// use attendance_engine::config::AttendanceSettings;
/// use attendance_engine::models::{AttendanceEvent, DailyStatus, EventType};
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let ts = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let events = vec![
///     AttendanceEvent::new("emp_001", ts("2026-01-19 08:00:00"), EventType::CheckIn),
///     AttendanceEvent::new("emp_001", ts("2026-01-19 17:00:00"), EventType::CheckOut),
/// ];
///
/// let summary = aggregate_day(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2026, 1, 19).unwrap(),
///     &events,
///     &AttendanceSettings::default(),
///     false,
/// );
///
/// assert_eq!(summary.status, DailyStatus::Complete);
/// assert_eq!(summary.total_hours, Decimal::from(9));
/// assert_eq!(summary.worked_hours, Decimal::from(8));
/// ```
pub fn aggregate_day(
    employee_id: &str,
    date: NaiveDate,
    events: &[AttendanceEvent],
    settings: &AttendanceSettings,
    include_weekends: bool,
) -> DailySummary {
    let mut summary = DailySummary::no_data(
        employee_id,
        date,
        settings.is_working_day(date, include_weekends),
    );

    let mut ordered: Vec<&AttendanceEvent> = events.iter().collect();
    ordered.sort_by_key(|event| event.timestamp);

    let mut check_in = None;
    let mut check_out = None;

    for event in ordered {
        if event.employee_id != employee_id {
            summary.anomalies.push(PunchAnomaly::ForeignEmployee {
                employee_id: event.employee_id.clone(),
            });
            continue;
        }
        if event.date() != date {
            summary.anomalies.push(PunchAnomaly::OutsideDay {
                timestamp: event.timestamp,
            });
            continue;
        }

        summary.total_records += 1;
        match event.event_type {
            EventType::CheckIn => summary.check_in_count += 1,
            EventType::CheckOut => summary.check_out_count += 1,
        }

        if let Some(score) = event.match_score {
            if score < settings.min_match_score {
                summary.anomalies.push(PunchAnomaly::LowMatchScore {
                    timestamp: event.timestamp,
                    match_score: score,
                });
                continue;
            }
        }

        match event.event_type {
            EventType::CheckIn => {
                if check_in.is_none() {
                    check_in = Some(event.timestamp);
                }
            }
            EventType::CheckOut => check_out = Some(event.timestamp),
        }
    }

    if summary.total_records == 0 {
        return summary;
    }

    match (check_in, check_out) {
        (Some(start), Some(end)) if end > start => {
            let total_hours = seconds_to_hours((end - start).num_seconds());
            let lunch_hours = lunch_break_hours(start, end, &settings.lunch_window());

            summary.check_in = Some(start);
            summary.check_out = Some(end);
            summary.total_hours = total_hours;
            summary.lunch_break_hours = lunch_hours;
            summary.worked_hours = worked_hours(total_hours, lunch_hours);
            summary.is_complete = true;
            summary.status = DailyStatus::Complete;
        }
        (Some(start), Some(end)) => {
            summary.anomalies.push(PunchAnomaly::InvertedPair {
                check_in: start,
                check_out: end,
            });
            match settings.inverted_pair_policy {
                InvertedPairPolicy::KeepCheckIn => {
                    summary.check_in = Some(start);
                    summary.status = DailyStatus::Partial;
                }
                InvertedPairPolicy::KeepCheckOut => {
                    summary.check_out = Some(end);
                    summary.status = DailyStatus::Partial;
                }
                InvertedPairPolicy::MarkAbsent => {
                    summary.status = DailyStatus::Absent;
                }
            }
        }
        (Some(_), None) | (None, Some(_)) => {
            summary.check_in = check_in;
            summary.check_out = check_out;
            summary.status = DailyStatus::Partial;
        }
        (None, None) => {
            summary.status = DailyStatus::Absent;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, Weekday};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn punch(time_str: &str, event_type: EventType) -> AttendanceEvent {
        AttendanceEvent::new("emp_001", make_datetime("2026-01-19", time_str), event_type)
    }

    fn aggregate(events: &[AttendanceEvent]) -> DailySummary {
        aggregate_day(
            "emp_001",
            make_date("2026-01-19"),
            events,
            &AttendanceSettings::default(),
            false,
        )
    }

    fn aggregate_with(events: &[AttendanceEvent], settings: &AttendanceSettings) -> DailySummary {
        aggregate_day("emp_001", make_date("2026-01-19"), events, settings, false)
    }

    #[test]
    fn test_full_day_is_complete_with_lunch_deducted() {
        let summary = aggregate(&[
            punch("08:00:00", EventType::CheckIn),
            punch("17:00:00", EventType::CheckOut),
        ]);

        assert_eq!(summary.status, DailyStatus::Complete);
        assert!(summary.is_complete);
        assert_eq!(summary.total_hours, dec("9"));
        assert_eq!(summary.lunch_break_hours, dec("1"));
        assert_eq!(summary.worked_hours, dec("8"));
        assert_eq!(summary.day_of_week, Weekday::Mon);
        assert!(summary.is_working_day);
        assert!(summary.anomalies.is_empty());
    }

    #[test]
    fn test_morning_only_has_no_lunch_deduction() {
        let summary = aggregate(&[
            punch("08:00:00", EventType::CheckIn),
            punch("11:30:00", EventType::CheckOut),
        ]);

        assert_eq!(summary.status, DailyStatus::Complete);
        assert_eq!(summary.total_hours, dec("3.5"));
        assert_eq!(summary.lunch_break_hours, Decimal::ZERO);
        assert_eq!(summary.worked_hours, dec("3.5"));
    }

    #[test]
    fn test_first_in_last_out_pairing() {
        let summary = aggregate(&[
            punch("17:30:00", EventType::CheckOut),
            punch("08:15:00", EventType::CheckIn),
            punch("12:00:00", EventType::CheckOut),
            punch("13:00:00", EventType::CheckIn),
        ]);

        assert_eq!(summary.check_in, Some(make_datetime("2026-01-19", "08:15:00")));
        assert_eq!(summary.check_out, Some(make_datetime("2026-01-19", "17:30:00")));
        assert_eq!(summary.check_in_count, 2);
        assert_eq!(summary.check_out_count, 2);
        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.total_hours, dec("9.25"));
        assert_eq!(summary.worked_hours, dec("8.25"));
    }

    #[test]
    fn test_only_check_in_is_partial() {
        let summary = aggregate(&[punch("08:00:00", EventType::CheckIn)]);

        assert_eq!(summary.status, DailyStatus::Partial);
        assert!(!summary.is_complete);
        assert!(summary.check_in.is_some());
        assert!(summary.check_out.is_none());
        assert_eq!(summary.worked_hours, Decimal::ZERO);
    }

    #[test]
    fn test_only_check_out_is_partial() {
        let summary = aggregate(&[punch("17:00:00", EventType::CheckOut)]);

        assert_eq!(summary.status, DailyStatus::Partial);
        assert!(summary.check_in.is_none());
        assert!(summary.check_out.is_some());
    }

    #[test]
    fn test_no_events_is_no_data() {
        let summary = aggregate(&[]);

        assert_eq!(summary.status, DailyStatus::NoData);
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.worked_hours, Decimal::ZERO);
    }

    #[test]
    fn test_inverted_pair_keeps_check_in_by_default() {
        let summary = aggregate(&[
            punch("07:00:00", EventType::CheckOut),
            punch("08:00:00", EventType::CheckIn),
        ]);

        assert_eq!(summary.status, DailyStatus::Partial);
        assert_eq!(summary.check_in, Some(make_datetime("2026-01-19", "08:00:00")));
        assert!(summary.check_out.is_none());
        assert_eq!(summary.worked_hours, Decimal::ZERO);
        assert!(matches!(
            summary.anomalies.as_slice(),
            [PunchAnomaly::InvertedPair { .. }]
        ));
    }

    #[test]
    fn test_inverted_pair_keep_check_out() {
        let settings = AttendanceSettings {
            inverted_pair_policy: InvertedPairPolicy::KeepCheckOut,
            ..AttendanceSettings::default()
        };
        let summary = aggregate_with(
            &[
                punch("07:00:00", EventType::CheckOut),
                punch("08:00:00", EventType::CheckIn),
            ],
            &settings,
        );

        assert_eq!(summary.status, DailyStatus::Partial);
        assert!(summary.check_in.is_none());
        assert_eq!(summary.check_out, Some(make_datetime("2026-01-19", "07:00:00")));
    }

    #[test]
    fn test_inverted_pair_mark_absent() {
        let settings = AttendanceSettings {
            inverted_pair_policy: InvertedPairPolicy::MarkAbsent,
            ..AttendanceSettings::default()
        };
        let summary = aggregate_with(
            &[
                punch("07:00:00", EventType::CheckOut),
                punch("08:00:00", EventType::CheckIn),
            ],
            &settings,
        );

        assert_eq!(summary.status, DailyStatus::Absent);
        assert!(summary.check_in.is_none());
        assert!(summary.check_out.is_none());
        assert_eq!(summary.total_records, 2);
    }

    #[test]
    fn test_equal_timestamps_are_inverted() {
        let summary = aggregate(&[
            punch("08:00:00", EventType::CheckIn),
            punch("08:00:00", EventType::CheckOut),
        ]);

        assert_eq!(summary.status, DailyStatus::Partial);
        assert_eq!(summary.total_hours, Decimal::ZERO);
    }

    #[test]
    fn test_low_score_punch_is_counted_but_not_paired() {
        let settings = AttendanceSettings {
            min_match_score: dec("0.8"),
            ..AttendanceSettings::default()
        };
        let summary = aggregate_with(
            &[
                punch("08:00:00", EventType::CheckIn).with_match_score(dec("0.5")),
                punch("08:30:00", EventType::CheckIn).with_match_score(dec("0.9")),
                punch("17:00:00", EventType::CheckOut),
            ],
            &settings,
        );

        assert_eq!(summary.status, DailyStatus::Complete);
        assert_eq!(summary.check_in, Some(make_datetime("2026-01-19", "08:30:00")));
        assert_eq!(summary.check_in_count, 2);
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.worked_hours, dec("7.5"));
        assert!(matches!(
            summary.anomalies.as_slice(),
            [PunchAnomaly::LowMatchScore { .. }]
        ));
    }

    #[test]
    fn test_only_low_score_punches_is_absent() {
        let settings = AttendanceSettings {
            min_match_score: dec("0.8"),
            ..AttendanceSettings::default()
        };
        let summary = aggregate_with(
            &[
                punch("08:00:00", EventType::CheckIn).with_match_score(dec("0.1")),
                punch("17:00:00", EventType::CheckOut).with_match_score(dec("0.2")),
            ],
            &settings,
        );

        assert_eq!(summary.status, DailyStatus::Absent);
        assert_eq!(summary.total_records, 2);
        assert_eq!(summary.anomalies.len(), 2);
    }

    #[test]
    fn test_foreign_and_outside_day_events_are_ignored() {
        let events = vec![
            punch("08:00:00", EventType::CheckIn),
            AttendanceEvent::new(
                "emp_002",
                make_datetime("2026-01-19", "09:00:00"),
                EventType::CheckIn,
            ),
            AttendanceEvent::new(
                "emp_001",
                make_datetime("2026-01-20", "17:00:00"),
                EventType::CheckOut,
            ),
        ];
        let summary = aggregate(&events);

        assert_eq!(summary.status, DailyStatus::Partial);
        assert_eq!(summary.total_records, 1);
        assert_eq!(summary.anomalies.len(), 2);
        assert!(summary
            .anomalies
            .iter()
            .any(|a| matches!(a, PunchAnomaly::ForeignEmployee { employee_id } if employee_id == "emp_002")));
        assert!(summary
            .anomalies
            .iter()
            .any(|a| matches!(a, PunchAnomaly::OutsideDay { .. })));
    }

    #[test]
    fn test_only_foreign_events_is_no_data() {
        let events = vec![AttendanceEvent::new(
            "emp_002",
            make_datetime("2026-01-19", "09:00:00"),
            EventType::CheckIn,
        )];
        let summary = aggregate(&events);

        assert_eq!(summary.status, DailyStatus::NoData);
        assert_eq!(summary.anomalies.len(), 1);
    }

    #[test]
    fn test_weekend_flagged_as_non_working_day() {
        let saturday = make_date("2026-01-24");
        let settings = AttendanceSettings::default();

        let summary = aggregate_day("emp_001", saturday, &[], &settings, false);
        assert!(!summary.is_working_day);
        assert_eq!(summary.day_of_week, Weekday::Sat);

        let summary = aggregate_day("emp_001", saturday, &[], &settings, true);
        assert!(summary.is_working_day);
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        let mut events = vec![
            punch("08:00:00", EventType::CheckIn),
            punch("12:05:00", EventType::CheckOut),
            punch("12:55:00", EventType::CheckIn),
            punch("17:10:00", EventType::CheckOut),
        ];
        let forward = aggregate(&events);
        events.reverse();
        let backward = aggregate(&events);

        assert_eq!(forward, backward);
    }
}
