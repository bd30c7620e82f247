//! Application state for the attendance engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::AttendanceEngine;

/// Shared application state.
///
/// Holds the engine behind an `Arc`; cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<AttendanceEngine>,
}

impl AppState {
    /// Creates a new application state around an engine.
    pub fn new(engine: AttendanceEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Creates a state sharing an existing engine.
    pub fn from_shared(engine: Arc<AttendanceEngine>) -> Self {
        Self { engine }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &AttendanceEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone_send_sync() {
        // axum requires state to be Clone + Send + Sync
        fn assert_state<T: Clone + Send + Sync + 'static>() {}
        assert_state::<AppState>();
    }
}
