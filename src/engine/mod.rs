//! The attendance engine query surface.
//!
//! [`AttendanceEngine`] ties the pure calculators to a [`Store`], a
//! [`Clock`] and the committed leave policy. It is `Send + Sync` and is
//! shared behind an `Arc` by the HTTP layer.

mod clock;
mod policy;
mod recalculation;

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    aggregate_day, aggregate_period, build_leave_request, calculate_accrual, period_length,
};
use crate::config::{AttendanceSettings, LeavePolicySettings, VersionedPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DailySummary, LeaveBalance, LeaveRequest, LeaveRequestDraft, LeaveStatistics, LeaveStatus,
    PeriodSummary, ReviewDecision, RosterEntry,
};
use crate::store::Store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use policy::PolicyState;
pub use recalculation::{RecalculationReport, recalculate_all, stage_balances};

/// Attendance aggregation and leave accrual over a store.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use attendance_engine::config::{AttendanceSettings, LeavePolicySettings, VersionedPolicy};
/// use attendance_engine::engine::{AttendanceEngine, FixedClock};
/// use attendance_engine::models::RosterEntry;
/// use attendance_engine::store::InMemoryStore;
/// use chrono::{NaiveDate, Utc};
///
/// let store = Arc::new(InMemoryStore::new(VersionedPolicy::initial(
///     LeavePolicySettings::default(),
///     Utc::now(),
/// )));
/// store.upsert_employee(RosterEntry::new("emp_001", NaiveDate::from_ymd_opt(2025, 1, 15)));
///
/// let engine = AttendanceEngine::new(
///     store,
///     AttendanceSettings::default(),
///     Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap())),
/// )
/// .unwrap();
///
/// let balance = engine.get_balance("emp_001").unwrap();
/// assert_eq!(balance.months_after_probation, 6);
/// ```
pub struct AttendanceEngine {
    store: Arc<dyn Store>,
    attendance: RwLock<Arc<AttendanceSettings>>,
    clock: Arc<dyn Clock>,
    policy: PolicyState,
}

impl AttendanceEngine {
    /// Creates an engine, loading the committed policy from the store.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for unusable attendance settings, or the
    /// store's error if the policy cannot be read.
    pub fn new(
        store: Arc<dyn Store>,
        attendance: AttendanceSettings,
        clock: Arc<dyn Clock>,
    ) -> EngineResult<Self> {
        attendance.validate()?;
        let policy = store.fetch_policy_settings()?;
        debug!(policy_version = policy.version, "Loaded committed leave policy");

        Ok(Self {
            store,
            attendance: RwLock::new(Arc::new(attendance)),
            clock,
            policy: PolicyState::new(policy),
        })
    }

    /// Returns the working-hours settings.
    pub fn attendance_settings(&self) -> Arc<AttendanceSettings> {
        Arc::clone(&self.attendance.read())
    }

    /// Replaces the working-hours settings.
    ///
    /// Summaries already being computed finish under the settings they
    /// started with.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAttendanceSettings` for unusable settings; the
    /// previous settings stay in effect.
    pub fn update_attendance_settings(
        &self,
        settings: AttendanceSettings,
    ) -> EngineResult<Arc<AttendanceSettings>> {
        settings.validate().map_err(|error| match error {
            EngineError::InvalidConfig { field, message } => {
                EngineError::InvalidAttendanceSettings { field, message }
            }
            other => other,
        })?;

        let settings = Arc::new(settings);
        *self.attendance.write() = Arc::clone(&settings);
        info!(
            lunch_break_start = %settings.lunch_break_start,
            lunch_break_end = %settings.lunch_break_end,
            "Attendance settings updated"
        );

        Ok(settings)
    }

    /// Returns the committed policy version.
    pub fn policy(&self) -> Arc<VersionedPolicy> {
        self.policy.current()
    }

    /// Returns the current calendar day according to the engine's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    fn require_employee(&self, employee_id: &str) -> EngineResult<RosterEntry> {
        self.store
            .fetch_employee(employee_id)?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Summarises one employee's attendance on one day.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` for an unknown employee, or the store's
    /// error if punches cannot be read.
    pub fn get_daily_summary(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<DailySummary> {
        self.require_employee(employee_id)?;
        let events = self.store.fetch_events(employee_id, date)?;
        let attendance = self.attendance_settings();
        let include_weekends = self.policy.current().settings.include_weekends;

        Ok(aggregate_day(
            employee_id,
            date,
            &events,
            &attendance,
            include_weekends,
        ))
    }

    /// Summarises one employee's attendance over `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` before touching the store if the range is
    /// inverted or too long, and `EmployeeNotFound` for an unknown employee.
    pub fn get_period_summary(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<PeriodSummary> {
        let attendance = self.attendance_settings();
        period_length(start, end, attendance.max_period_days)?;
        self.require_employee(employee_id)?;

        let events = self.store.fetch_events_range(employee_id, start, end)?;
        let include_weekends = self.policy.current().settings.include_weekends;

        aggregate_period(
            employee_id,
            start,
            end,
            &events,
            &attendance,
            include_weekends,
        )
    }

    /// Returns an employee's leave balance as of today.
    ///
    /// The persisted balance is returned when it was computed under the
    /// committed policy version today; otherwise a fresh balance is computed
    /// and returned without being persisted.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` for an unknown employee, and
    /// `InvalidPolicy` if the accrued balance cannot be represented.
    pub fn get_balance(&self, employee_id: &str) -> EngineResult<LeaveBalance> {
        let employee = self.require_employee(employee_id)?;
        let policy = self.policy.current();
        let today = self.today();

        if let Some(stored) = self.store.fetch_balance(employee_id)? {
            if stored.policy_version == policy.version && stored.as_of == today {
                return Ok(stored);
            }
        }

        let used = self.store.fetch_used_leave_days(employee_id)?;
        calculate_accrual(employee_id, employee.hire_date, today, used, &policy)
    }

    /// Submits a leave request.
    ///
    /// The request is always created as `pending`. An insufficient balance
    /// or an overly long range only sets advisory flags.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` if the end date is before the start date,
    /// and `EmployeeNotFound` for an unknown employee.
    pub fn submit_leave_request(&self, draft: LeaveRequestDraft) -> EngineResult<LeaveRequest> {
        let balance = self.get_balance(&draft.employee_id)?;
        let policy = self.policy.current();

        let request = build_leave_request(draft, &balance, &policy.settings, self.clock.now())?;
        self.store.persist_leave_request(&request)?;

        if request.insufficient_balance {
            warn!(
                request_id = %request.id,
                employee_id = %request.employee_id,
                days = request.days,
                balance = %request.balance_at_request,
                "Leave request exceeds available balance"
            );
        }
        info!(
            request_id = %request.id,
            employee_id = %request.employee_id,
            leave_type = %request.leave_type,
            days = request.days,
            "Leave request submitted"
        );

        Ok(request)
    }

    /// Approves or rejects a pending leave request.
    ///
    /// Approving annual leave also refreshes the employee's balance under
    /// the committed policy. The reviewed request and the balance are
    /// written in one store commit, so a failure leaves both untouched.
    ///
    /// # Errors
    ///
    /// Returns `LeaveRequestNotFound` for an unknown id and
    /// `LeaveRequestAlreadyReviewed` if the request is not pending.
    pub fn review_leave_request(
        &self,
        id: Uuid,
        decision: ReviewDecision,
        reviewer: &str,
        comment: Option<String>,
    ) -> EngineResult<LeaveRequest> {
        let _writer = self.policy.lock_writer();

        let mut request = self
            .store
            .fetch_leave_request(id)?
            .ok_or(EngineError::LeaveRequestNotFound { id })?;

        if request.status != LeaveStatus::Pending {
            return Err(EngineError::LeaveRequestAlreadyReviewed {
                id,
                status: request.status.to_string(),
            });
        }

        request.status = decision.status();
        request.reviewed_by = Some(reviewer.to_string());
        request.review_comment = comment;
        request.reviewed_at = Some(self.clock.now());

        let balance = if request.consumes_balance() {
            let policy = self.policy.current();
            let hire_date = self
                .store
                .fetch_employee(&request.employee_id)?
                .and_then(|employee| employee.hire_date);
            // The store still holds this request as pending.
            let used = self.store.fetch_used_leave_days(&request.employee_id)?
                + Decimal::from(request.days);
            Some(calculate_accrual(
                &request.employee_id,
                hire_date,
                self.today(),
                used,
                &policy,
            )?)
        } else {
            None
        };
        self.store.commit_review(&request, balance.as_ref())?;

        info!(
            request_id = %request.id,
            employee_id = %request.employee_id,
            status = %request.status,
            reviewer = %reviewer,
            "Leave request reviewed"
        );

        Ok(request)
    }

    /// Returns a leave request by id.
    ///
    /// # Errors
    ///
    /// Returns `LeaveRequestNotFound` for an unknown id.
    pub fn get_leave_request(&self, id: Uuid) -> EngineResult<LeaveRequest> {
        self.store
            .fetch_leave_request(id)?
            .ok_or(EngineError::LeaveRequestNotFound { id })
    }

    /// Lists leave requests oldest first, optionally narrowed to one
    /// employee and one status.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if `employee_id` names an unknown
    /// employee.
    pub fn list_leave_requests(
        &self,
        employee_id: Option<&str>,
        status: Option<LeaveStatus>,
    ) -> EngineResult<Vec<LeaveRequest>> {
        if let Some(employee_id) = employee_id {
            self.require_employee(employee_id)?;
        }
        let mut requests = self.store.fetch_leave_requests(employee_id)?;
        if let Some(status) = status {
            requests.retain(|request| request.status == status);
        }
        Ok(requests)
    }

    /// Counts leave requests by status, optionally for one employee.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if `employee_id` names an unknown
    /// employee.
    pub fn leave_statistics(&self, employee_id: Option<&str>) -> EngineResult<LeaveStatistics> {
        let requests = self.list_leave_requests(employee_id, None)?;
        Ok(LeaveStatistics::tally(&requests))
    }

    /// Replaces the leave policy and recalculates every balance under it.
    ///
    /// The new version becomes visible to readers only after the store has
    /// committed it together with the recalculated balances.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPolicy` for out-of-range settings (nothing changes),
    /// or `PolicyRecalculationFailure` if the pass fails (the previous
    /// version stays committed).
    pub fn update_policy_settings(
        &self,
        settings: LeavePolicySettings,
    ) -> EngineResult<RecalculationReport> {
        settings.validate()?;
        let start_time = Instant::now();
        let _writer = self.policy.lock_writer();

        let next = self.policy.current().next(settings, self.clock.now());
        let report = recalculate_all(self.store.as_ref(), &next, self.today())?;
        self.policy.publish(next);

        info!(
            policy_version = report.policy_version,
            duration_us = start_time.elapsed().as_micros() as u64,
            "Leave policy updated"
        );

        Ok(report)
    }

    /// Recalculates every balance under the committed policy.
    ///
    /// # Errors
    ///
    /// Returns `PolicyRecalculationFailure` if the pass fails.
    pub fn recalculate_balances(&self) -> EngineResult<RecalculationReport> {
        let _writer = self.policy.lock_writer();
        let policy = self.policy.current();
        recalculate_all(self.store.as_ref(), &policy, self.today())
    }
}
