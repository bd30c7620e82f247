//! Core data models for the attendance engine.
//!
//! This module contains the domain models shared by the aggregators, the
//! accrual calculator and the store contracts.

mod attendance_event;
mod daily_summary;
mod employee;
mod leave;
mod period_summary;

pub use attendance_event::{AttendanceEvent, EventType};
pub use daily_summary::{DailyStatus, DailySummary, PunchAnomaly};
pub use employee::RosterEntry;
pub use leave::{
    LeaveBalance, LeaveRequest, LeaveRequestDraft, LeaveStatistics, LeaveStatus, LeaveType,
    ReviewDecision,
};
pub use period_summary::{PeriodSummary, PeriodTotals};
