//! Storage contracts for the attendance engine.
//!
//! The engine reads punches, the roster, policy settings and leave data
//! through [`EventStore`], and writes balances, leave requests and
//! recalculation batches through [`PersistenceStore`]. Both are implemented
//! by [`InMemoryStore`]; a database-backed adapter would implement the same
//! traits.

mod memory;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::VersionedPolicy;
use crate::error::EngineResult;
use crate::models::{AttendanceEvent, LeaveBalance, LeaveRequest, RosterEntry};

pub use memory::InMemoryStore;

/// Read side of the store.
pub trait EventStore: Send + Sync {
    /// Returns an employee's punches on one calendar day.
    fn fetch_events(&self, employee_id: &str, date: NaiveDate)
    -> EngineResult<Vec<AttendanceEvent>>;

    /// Returns an employee's punches on the days `[start, end]`.
    fn fetch_events_range(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceEvent>>;

    /// Returns the committed policy version.
    fn fetch_policy_settings(&self) -> EngineResult<VersionedPolicy>;

    /// Returns the days consumed by the employee's approved annual leave.
    fn fetch_used_leave_days(&self, employee_id: &str) -> EngineResult<Decimal>;

    /// Returns every employee known to the store.
    fn fetch_roster(&self) -> EngineResult<Vec<RosterEntry>>;

    /// Returns one employee, if known.
    fn fetch_employee(&self, employee_id: &str) -> EngineResult<Option<RosterEntry>>;

    /// Returns the last persisted balance for an employee, if any.
    fn fetch_balance(&self, employee_id: &str) -> EngineResult<Option<LeaveBalance>>;

    /// Returns a leave request by id, if it exists.
    fn fetch_leave_request(&self, id: Uuid) -> EngineResult<Option<LeaveRequest>>;

    /// Returns leave requests oldest first, limited to one employee when
    /// `employee_id` is given.
    fn fetch_leave_requests(&self, employee_id: Option<&str>) -> EngineResult<Vec<LeaveRequest>>;
}

/// Write side of the store.
pub trait PersistenceStore: Send + Sync {
    /// Stores the balance for one employee, replacing any previous one.
    fn persist_balance(&self, employee_id: &str, balance: &LeaveBalance) -> EngineResult<()>;

    /// Stores a leave request, replacing any previous version with the same id.
    fn persist_leave_request(&self, request: &LeaveRequest) -> EngineResult<()>;

    /// Stores a reviewed leave request together with the balance it leads
    /// to.
    ///
    /// Implementations must apply both writes or neither.
    fn commit_review(
        &self,
        request: &LeaveRequest,
        balance: Option<&LeaveBalance>,
    ) -> EngineResult<()>;

    /// Commits a policy version together with every balance computed under
    /// it.
    ///
    /// Implementations must apply all of it or none of it.
    fn commit_recalculation(
        &self,
        policy: &VersionedPolicy,
        balances: &[LeaveBalance],
    ) -> EngineResult<()>;
}

/// A store that can be both read and written.
pub trait Store: EventStore + PersistenceStore {}

impl<T: EventStore + PersistenceStore + ?Sized> Store for T {}
