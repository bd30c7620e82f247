//! Error types for the attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Gaps in punches, absent days and insufficient leave balances are not
//! errors: they are absorbed into summary statuses and advisory flags.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the attendance engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
/// use chrono::NaiveDate;
///
/// let error = EngineError::InvalidDateRange {
///     start: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
///     end: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
///     message: "end date is before start date".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid date range 2026-03-10..2026-03-09: end date is before start date"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was parsed but is not usable.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// An attendance settings update carried an unusable value.
    #[error("Invalid attendance settings field '{field}': {message}")]
    InvalidAttendanceSettings {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A leave policy update carried an out-of-range value.
    #[error("Invalid leave policy field '{field}': {message}")]
    InvalidPolicy {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// An attendance event could not be accepted into the store.
    #[error("Malformed attendance event for '{employee_id}': {message}")]
    MalformedEvent {
        /// The employee the event claims to belong to.
        employee_id: String,
        /// What was wrong with the event.
        message: String,
    },

    /// The requested date range is empty, inverted or too long.
    #[error("Invalid date range {start}..{end}: {message}")]
    InvalidDateRange {
        /// The first day of the range.
        start: NaiveDate,
        /// The last day of the range.
        end: NaiveDate,
        /// Why the range was rejected.
        message: String,
    },

    /// The employee is not on the roster.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The unknown employee id.
        employee_id: String,
    },

    /// No leave request exists with this id.
    #[error("Leave request not found: {id}")]
    LeaveRequestNotFound {
        /// The unknown request id.
        id: Uuid,
    },

    /// The leave request has already been approved or rejected.
    #[error("Leave request {id} already reviewed (status: {status})")]
    LeaveRequestAlreadyReviewed {
        /// The request id.
        id: Uuid,
        /// The status the request is already in.
        status: String,
    },

    /// A bulk balance recalculation was aborted; no balance was changed.
    #[error("Balance recalculation for policy version {policy_version} failed: {message}")]
    PolicyRecalculationFailure {
        /// The policy version that could not be applied.
        policy_version: u64,
        /// What aborted the pass.
        message: String,
    },

    /// The backing store failed to read or write.
    #[error("Store error during {operation}: {message}")]
    StoreError {
        /// The store operation that failed.
        operation: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
