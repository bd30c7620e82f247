//! Leave balance and leave request models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// The kind of time off requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Paid vacation, drawn from the accrued balance.
    Annual,
    /// Sick leave.
    Sick,
    /// Unpaid leave.
    Unpaid,
}

impl LeaveType {
    /// Returns true when requests of this type consume the accrued vacation
    /// balance.
    pub fn draws_on_accrual(self) -> bool {
        self == LeaveType::Annual
    }
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveType::Annual => write!(f, "annual"),
            LeaveType::Sick => write!(f, "sick"),
            LeaveType::Unpaid => write!(f, "unpaid"),
        }
    }
}

impl std::str::FromStr for LeaveType {
    type Err = String;

    /// Parses a leave type case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "annual" => Ok(LeaveType::Annual),
            "sick" => Ok(LeaveType::Sick),
            "unpaid" => Ok(LeaveType::Unpaid),
            other => Err(format!(
                "unknown leave type '{}', expected annual, sick or unpaid",
                other
            )),
        }
    }
}

impl<'de> Deserialize<'de> for LeaveType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Lifecycle state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting a human approver.
    Pending,
    /// Approved by an approver.
    Approved,
    /// Rejected by an approver.
    Rejected,
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "pending"),
            LeaveStatus::Approved => write!(f, "approved"),
            LeaveStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// An approver's decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    /// Grant the leave.
    Approve,
    /// Refuse the leave.
    Reject,
}

impl ReviewDecision {
    /// The status a request moves to under this decision.
    pub fn status(self) -> LeaveStatus {
        match self {
            ReviewDecision::Approve => LeaveStatus::Approved,
            ReviewDecision::Reject => LeaveStatus::Rejected,
        }
    }
}

/// Accrued vacation for one employee under one policy version.
///
/// `balance` may be negative: an approver can grant leave beyond strict
/// accrual, and the deficit is shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The employee this balance belongs to.
    pub employee_id: String,
    /// The hire date accrual was computed from.
    pub hire_date: Option<NaiveDate>,
    /// Whole calendar months between hire date and `as_of`.
    pub months_service: u32,
    /// Months of service beyond the probation period.
    pub months_after_probation: u32,
    /// Days earned so far.
    pub earned: Decimal,
    /// Days consumed by approved annual leave.
    pub used: Decimal,
    /// `earned - used`.
    pub balance: Decimal,
    /// The policy version the balance was computed under.
    pub policy_version: u64,
    /// The day the balance was computed for.
    pub as_of: NaiveDate,
}

/// The caller-supplied part of a leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequestDraft {
    /// The requesting employee.
    pub employee_id: String,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave, inclusive.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Free-text justification.
    #[serde(default)]
    pub reason: String,
}

/// A submitted leave request.
///
/// `insufficient_balance` and `exceeds_max_consecutive` are advisory: they
/// are shown to the requester and approver but never block submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier of the request.
    pub id: Uuid,
    /// The requesting employee.
    pub employee_id: String,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave, inclusive.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Inclusive day count of the range.
    pub days: u32,
    /// Free-text justification.
    pub reason: String,
    /// Lifecycle state.
    pub status: LeaveStatus,
    /// True when `days` exceeded the balance at submission time.
    pub insufficient_balance: bool,
    /// The balance the request was checked against.
    pub balance_at_request: Decimal,
    /// True when `days` exceeds the policy's consecutive-day limit.
    pub exceeds_max_consecutive: bool,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
    /// Who approved or rejected the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    /// The approver's comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_comment: Option<String>,
    /// When the request was approved or rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl LeaveRequest {
    /// Returns true when the request consumes accrued vacation days.
    pub fn consumes_balance(&self) -> bool {
        self.status == LeaveStatus::Approved && self.leave_type.draws_on_accrual()
    }
}

/// Counts of leave requests by status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveStatistics {
    /// Every request counted.
    pub total: u32,
    /// Requests awaiting review.
    pub pending: u32,
    /// Approved requests.
    pub approved: u32,
    /// Rejected requests.
    pub rejected: u32,
    /// Days covered by approved requests of any type.
    pub approved_days: u32,
}

impl LeaveStatistics {
    /// Tallies `requests`.
    pub fn tally<'a>(requests: impl IntoIterator<Item = &'a LeaveRequest>) -> Self {
        requests
            .into_iter()
            .fold(Self::default(), |mut stats, request| {
                stats.total += 1;
                match request.status {
                    LeaveStatus::Pending => stats.pending += 1,
                    LeaveStatus::Approved => {
                        stats.approved += 1;
                        stats.approved_days += request.days;
                    }
                    LeaveStatus::Rejected => stats.rejected += 1,
                }
                stats
            })
    }
}
