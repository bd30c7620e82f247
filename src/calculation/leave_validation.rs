//! Leave request validation.
//!
//! A request is checked against the requester's current balance and the
//! policy's consecutive-day limit. Both checks are advisory: they set flags
//! on the request for the approver but never block submission. Only a
//! malformed date range is rejected.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::LeavePolicySettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveBalance, LeaveRequest, LeaveRequestDraft, LeaveStatus};

/// Returns the inclusive number of calendar days in a leave range.
///
/// # Errors
///
/// Returns `InvalidDateRange` if `end` is before `start`.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::requested_days;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 2, 6).unwrap();
/// assert_eq!(requested_days(start, end).unwrap(), 5);
/// assert!(requested_days(end, start).is_err());
/// ```
pub fn requested_days(start: NaiveDate, end: NaiveDate) -> EngineResult<u32> {
    let days = (end - start).num_days() + 1;
    if days < 1 {
        return Err(EngineError::InvalidDateRange {
            start,
            end,
            message: "leave must cover at least one day".to_string(),
        });
    }
    u32::try_from(days).map_err(|_| EngineError::InvalidDateRange {
        start,
        end,
        message: format!("{} days is not a valid leave length", days),
    })
}

/// Builds a pending leave request from a draft.
///
/// # Arguments
///
/// * `draft` - The caller-supplied request
/// * `balance` - The requester's balance under the current policy
/// * `policy` - The current policy settings
/// * `now` - Submission time
///
/// # Flags
///
/// - `insufficient_balance` is set when `days` exceeds `balance.balance`,
///   whatever the leave type
/// - `exceeds_max_consecutive` is set when `days` exceeds
///   `policy.max_consecutive_days`
///
/// # Errors
///
/// Returns `InvalidDateRange` if `end_date` is before `start_date`.
pub fn build_leave_request(
    draft: LeaveRequestDraft,
    balance: &LeaveBalance,
    policy: &LeavePolicySettings,
    now: DateTime<Utc>,
) -> EngineResult<LeaveRequest> {
    let days = requested_days(draft.start_date, draft.end_date)?;

    let insufficient_balance = Decimal::from(days) > balance.balance;
    let exceeds_max_consecutive = days > policy.max_consecutive_days;

    Ok(LeaveRequest {
        id: Uuid::new_v4(),
        employee_id: draft.employee_id,
        leave_type: draft.leave_type,
        start_date: draft.start_date,
        end_date: draft.end_date,
        days,
        reason: draft.reason,
        status: LeaveStatus::Pending,
        insufficient_balance,
        balance_at_request: balance.balance,
        exceeds_max_consecutive,
        created_at: now,
        reviewed_by: None,
        review_comment: None,
        reviewed_at: None,
    })
}
