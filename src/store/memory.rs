//! In-memory store used by the server binary and the tests.

use std::collections::HashMap;

use chrono::NaiveDate;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::config::{SeedData, VersionedPolicy};
use crate::error::EngineResult;
use crate::models::{AttendanceEvent, LeaveBalance, LeaveRequest, RosterEntry};

use super::{EventStore, PersistenceStore};

#[derive(Debug)]
struct StoreState {
    policy: VersionedPolicy,
    employees: HashMap<String, RosterEntry>,
    events: HashMap<String, Vec<AttendanceEvent>>,
    balances: HashMap<String, LeaveBalance>,
    leave_requests: HashMap<Uuid, LeaveRequest>,
}

/// A thread-safe store that keeps everything in process memory.
///
/// All state sits behind one lock, so a recalculation commit is observed
/// either entirely or not at all.
///
/// # Example
///
/// ```
/// use attendance_engine::config::{LeavePolicySettings, VersionedPolicy};
/// use attendance_engine::models::RosterEntry;
/// use attendance_engine::store::{EventStore, InMemoryStore};
/// use chrono::Utc;
///
/// let store = InMemoryStore::new(VersionedPolicy::initial(LeavePolicySettings::default(), Utc::now()));
/// store.upsert_employee(RosterEntry::new("emp_001", None));
/// assert_eq!(store.fetch_roster().unwrap().len(), 1);
/// ```
#[derive(Debug)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    /// Creates an empty store holding the given policy version.
    pub fn new(policy: VersionedPolicy) -> Self {
        Self {
            state: RwLock::new(StoreState {
                policy,
                employees: HashMap::new(),
                events: HashMap::new(),
                balances: HashMap::new(),
                leave_requests: HashMap::new(),
            }),
        }
    }

    /// Creates a store populated from seed data.
    ///
    /// # Errors
    ///
    /// Returns `MalformedEvent` if any seeded punch fails validation.
    pub fn from_seed(seed: SeedData, policy: VersionedPolicy) -> EngineResult<Self> {
        let store = Self::new(policy);
        for entry in seed.employees {
            store.upsert_employee(entry);
        }
        for event in seed.events {
            store.record_event(event)?;
        }
        for request in seed.leave_requests {
            store.persist_leave_request(&request)?;
        }
        debug!(
            employees = store.state.read().employees.len(),
            "Seeded in-memory store"
        );
        Ok(store)
    }

    /// Adds or replaces a roster entry.
    pub fn upsert_employee(&self, entry: RosterEntry) {
        self.state
            .write()
            .employees
            .insert(entry.employee_id.clone(), entry);
    }

    /// Records a punch after validating it.
    ///
    /// # Errors
    ///
    /// Returns `MalformedEvent` for an empty employee id or a match score
    /// outside `[0, 1]`.
    pub fn record_event(&self, event: AttendanceEvent) -> EngineResult<()> {
        event.validate()?;
        self.state
            .write()
            .events
            .entry(event.employee_id.clone())
            .or_default()
            .push(event);
        Ok(())
    }

    fn events_where(
        &self,
        employee_id: &str,
        keep: impl Fn(NaiveDate) -> bool,
    ) -> Vec<AttendanceEvent> {
        self.state
            .read()
            .events
            .get(employee_id)
            .map(|events| {
                events
                    .iter()
                    .filter(|event| keep(event.date()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl EventStore for InMemoryStore {
    fn fetch_events(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Vec<AttendanceEvent>> {
        Ok(self.events_where(employee_id, |day| day == date))
    }

    fn fetch_events_range(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceEvent>> {
        Ok(self.events_where(employee_id, |day| day >= start && day <= end))
    }

    fn fetch_policy_settings(&self) -> EngineResult<VersionedPolicy> {
        Ok(self.state.read().policy.clone())
    }

    fn fetch_used_leave_days(&self, employee_id: &str) -> EngineResult<Decimal> {
        Ok(self
            .state
            .read()
            .leave_requests
            .values()
            .filter(|request| request.employee_id == employee_id && request.consumes_balance())
            .map(|request| Decimal::from(request.days))
            .sum())
    }

    fn fetch_roster(&self) -> EngineResult<Vec<RosterEntry>> {
        let mut roster: Vec<RosterEntry> =
            self.state.read().employees.values().cloned().collect();
        roster.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        Ok(roster)
    }

    fn fetch_employee(&self, employee_id: &str) -> EngineResult<Option<RosterEntry>> {
        Ok(self.state.read().employees.get(employee_id).cloned())
    }

    fn fetch_balance(&self, employee_id: &str) -> EngineResult<Option<LeaveBalance>> {
        Ok(self.state.read().balances.get(employee_id).cloned())
    }

    fn fetch_leave_request(&self, id: Uuid) -> EngineResult<Option<LeaveRequest>> {
        Ok(self.state.read().leave_requests.get(&id).cloned())
    }

    fn fetch_leave_requests(&self, employee_id: Option<&str>) -> EngineResult<Vec<LeaveRequest>> {
        let state = self.state.read();
        let mut requests: Vec<LeaveRequest> = state
            .leave_requests
            .values()
            .filter(|request| employee_id.is_none_or(|id| request.employee_id == id))
            .cloned()
            .collect();
        requests.sort_by_key(|request| (request.created_at, request.id));
        Ok(requests)
    }
}

impl PersistenceStore for InMemoryStore {
    fn persist_balance(&self, employee_id: &str, balance: &LeaveBalance) -> EngineResult<()> {
        self.state
            .write()
            .balances
            .insert(employee_id.to_string(), balance.clone());
        Ok(())
    }

    fn persist_leave_request(&self, request: &LeaveRequest) -> EngineResult<()> {
        self.state
            .write()
            .leave_requests
            .insert(request.id, request.clone());
        Ok(())
    }

    fn commit_review(
        &self,
        request: &LeaveRequest,
        balance: Option<&LeaveBalance>,
    ) -> EngineResult<()> {
        let mut state = self.state.write();
        state.leave_requests.insert(request.id, request.clone());
        if let Some(balance) = balance {
            state
                .balances
                .insert(balance.employee_id.clone(), balance.clone());
        }
        Ok(())
    }

    fn commit_recalculation(
        &self,
        policy: &VersionedPolicy,
        balances: &[LeaveBalance],
    ) -> EngineResult<()> {
        let mut state = self.state.write();
        state.policy = policy.clone();
        for balance in balances {
            state
                .balances
                .insert(balance.employee_id.clone(), balance.clone());
        }
        Ok(())
    }
}
