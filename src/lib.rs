//! Attendance aggregation and leave accrual engine.
//!
//! This crate turns raw time-clock punches into daily and period attendance
//! summaries, and turns hire dates plus a versioned leave policy into leave
//! balances that advise the approval of time-off requests.
//!
//! - [`calculation`] holds the pure calculators
//! - [`engine`] ties them to a [`store`] and the committed policy
//! - [`api`] exposes the engine over HTTP

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
