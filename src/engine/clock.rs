//! Time sources for the engine.
//!
//! Accrual depends on "today", so the engine reads time through [`Clock`]
//! instead of calling `Utc::now()` directly. Tests pin the date with
//! [`FixedClock`].

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

/// A source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current calendar day.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// # Example
///
/// ```
/// use attendance_engine::engine::{Clock, FixedClock};
/// use chrono::{Duration, NaiveDate, TimeZone, Utc};
///
/// let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 1, 31, 12, 0, 0).unwrap());
/// clock.advance(Duration::days(1));
/// assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
/// ```
#[derive(Debug)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    /// Creates a clock stopped at `at`.
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(at.timestamp_millis()),
        }
    }

    /// Creates a clock stopped at noon UTC on `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self::new(Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap_or_default()))
    }

    /// Moves the clock to `at`.
    pub fn set(&self, at: DateTime<Utc>) {
        self.millis.store(at.timestamp_millis(), Ordering::Relaxed);
    }

    /// Moves the clock forward by `duration`.
    pub fn advance(&self, duration: Duration) {
        self.millis
            .fetch_add(duration.num_milliseconds(), Ordering::Relaxed);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.millis.load(Ordering::Relaxed))
            .single()
            .unwrap_or_default()
    }
}
