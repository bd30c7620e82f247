//! Request types for the attendance engine API.
//!
//! This module defines the query strings and JSON bodies accepted by the
//! HTTP endpoints, and their conversions to engine types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LeavePolicySettings;
use crate::models::{LeaveRequestDraft, LeaveStatus, LeaveType};

/// Query string for `GET /attendance/daily-summary/:employee_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailySummaryQuery {
    /// The day to summarise. Defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Query string for `GET /attendance/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummaryQuery {
    /// The employee to summarise.
    pub employee_id: String,
    /// First day of the period.
    pub start_date: NaiveDate,
    /// Last day of the period, inclusive.
    pub end_date: NaiveDate,
}

/// Query string for `GET /leave/requests`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveListQuery {
    /// Only requests by this employee.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Only requests in this state.
    #[serde(default)]
    pub status: Option<LeaveStatus>,
}

/// Query string for `GET /leave/statistics`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveStatisticsQuery {
    /// Only count requests by this employee.
    #[serde(default)]
    pub employee_id: Option<String>,
}

/// Request body for `POST /leave/requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequestBody {
    /// The requesting employee.
    pub employee_id: String,
    /// `annual`, `sick` or `unpaid`, in any letter case.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Free-text justification.
    #[serde(default)]
    pub reason: String,
}

impl From<LeaveRequestBody> for LeaveRequestDraft {
    fn from(req: LeaveRequestBody) -> Self {
        LeaveRequestDraft {
            employee_id: req.employee_id,
            leave_type: req.leave_type,
            start_date: req.start_date,
            end_date: req.end_date,
            reason: req.reason.trim().to_string(),
        }
    }
}

/// Request body for `POST /leave/requests/:id/approve` and `/reject`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Who is approving or rejecting the request.
    pub reviewer: String,
    /// Optional note for the requester.
    #[serde(default)]
    pub comment: Option<String>,
}

/// Request body for `PUT /settings/policy`.
///
/// Omitted fields keep their committed value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyUpdateRequest {
    /// Vacation days earned per month after probation.
    #[serde(default)]
    pub monthly_vacation_days: Option<Decimal>,
    /// Months without accrual at the start of employment.
    #[serde(default)]
    pub probation_period_months: Option<u32>,
    /// Whether weekends count as working days.
    #[serde(default)]
    pub include_weekends: Option<bool>,
    /// Longest leave request that is not flagged.
    #[serde(default)]
    pub max_consecutive_days: Option<u32>,
}

impl PolicyUpdateRequest {
    /// Returns `current` with the provided fields replaced.
    pub fn apply_to(&self, current: &LeavePolicySettings) -> LeavePolicySettings {
        LeavePolicySettings {
            monthly_vacation_days: self
                .monthly_vacation_days
                .unwrap_or(current.monthly_vacation_days),
            probation_period_months: self
                .probation_period_months
                .unwrap_or(current.probation_period_months),
            include_weekends: self.include_weekends.unwrap_or(current.include_weekends),
            max_consecutive_days: self
                .max_consecutive_days
                .unwrap_or(current.max_consecutive_days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_leave_request_body() {
        let json = r#"{
            "employee_id": "emp_001",
            "leave_type": "Annual",
            "start_date": "2026-02-02",
            "end_date": "2026-02-06",
            "reason": "  family trip  "
        }"#;

        let body: LeaveRequestBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.leave_type, LeaveType::Annual);

        let draft: LeaveRequestDraft = body.into();
        assert_eq!(draft.reason, "family trip");
    }

    #[test]
    fn test_unknown_leave_type_is_rejected() {
        let json = r#"{
            "employee_id": "emp_001",
            "leave_type": "sabbatical",
            "start_date": "2026-02-02",
            "end_date": "2026-02-06"
        }"#;

        let err = serde_json::from_str::<LeaveRequestBody>(json).unwrap_err();
        assert!(err.to_string().contains("sabbatical"));
    }

    #[test]
    fn test_partial_policy_update_keeps_other_fields() {
        let update: PolicyUpdateRequest =
            serde_json::from_str(r#"{"monthly_vacation_days": "3"}"#).unwrap();
        let current = LeavePolicySettings {
            include_weekends: true,
            ..LeavePolicySettings::default()
        };

        let merged = update.apply_to(&current);
        assert_eq!(merged.monthly_vacation_days, Decimal::from(3));
        assert_eq!(merged.probation_period_months, 3);
        assert!(merged.include_weekends);
        assert_eq!(merged.max_consecutive_days, 30);
    }

    #[test]
    fn test_leave_list_query_parses_status() {
        let query: LeaveListQuery =
            serde_json::from_str(r#"{"status": "pending"}"#).unwrap();
        assert_eq!(query.status, Some(LeaveStatus::Pending));
        assert!(query.employee_id.is_none());
    }

    #[test]
    fn test_review_comment_is_optional() {
        let review: ReviewRequest = serde_json::from_str(r#"{"reviewer": "manager_01"}"#).unwrap();
        assert_eq!(review.reviewer, "manager_01");
        assert!(review.comment.is_none());
    }
}
