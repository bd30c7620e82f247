//! Calculation logic for the attendance engine.
//!
//! This module contains the pure functions behind every query: lunch
//! deduction, daily and period attendance aggregation, leave accrual and
//! leave request validation. None of them perform I/O or read the clock;
//! callers pass the day and policy version explicitly.

mod accrual;
mod daily_aggregation;
mod leave_validation;
mod lunch_deduction;
mod period_aggregation;

pub use accrual::{calculate_accrual, months_of_service};
pub use daily_aggregation::aggregate_day;
pub use leave_validation::{build_leave_request, requested_days};
pub use lunch_deduction::{lunch_break_hours, round_hours, seconds_to_hours, worked_hours};
pub use period_aggregation::{aggregate_period, period_length, summarize_totals};
