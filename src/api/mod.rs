//! HTTP API module for the attendance engine.
//!
//! This module exposes attendance summaries, leave balances, leave requests
//! and policy settings as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    DailySummaryQuery, LeaveListQuery, LeaveRequestBody, LeaveStatisticsQuery, PeriodSummaryQuery,
    PolicyUpdateRequest, ReviewRequest,
};
pub use response::{ApiError, ApiErrorResponse, PolicyUpdateResponse};
pub use state::AppState;
