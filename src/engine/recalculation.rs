//! Bulk leave balance recalculation.
//!
//! A recalculation pass computes every employee's balance under one policy
//! version and commits the whole batch, together with the policy, in a
//! single store call. Nothing is written unless every balance was computed.

use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::calculation::calculate_accrual;
use crate::config::VersionedPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::LeaveBalance;
use crate::store::{EventStore, Store};

/// Outcome of a successful recalculation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecalculationReport {
    /// The policy version the balances were computed under.
    pub policy_version: u64,
    /// Number of balances committed.
    pub employees: usize,
    /// Employees without a hire date, committed with a zero balance.
    pub without_hire_date: usize,
    /// Wall time of the pass in microseconds.
    pub duration_us: u64,
}

/// Computes the balance of every rostered employee without writing anything.
///
/// # Errors
///
/// Propagates the first store or accrual error encountered.
pub fn stage_balances<S: EventStore + ?Sized>(
    store: &S,
    policy: &VersionedPolicy,
    today: NaiveDate,
) -> EngineResult<Vec<LeaveBalance>> {
    store
        .fetch_roster()?
        .into_iter()
        .map(|entry| {
            let used = store.fetch_used_leave_days(&entry.employee_id)?;
            calculate_accrual(&entry.employee_id, entry.hire_date, today, used, policy)
        })
        .collect()
}

/// Recalculates and commits every balance under `policy`.
///
/// The pass is idempotent: the same roster, leave data, policy and day
/// always produce the same balances.
///
/// # Errors
///
/// Returns `PolicyRecalculationFailure` if staging or the commit fails. The
/// store is left as it was before the call.
pub fn recalculate_all(
    store: &dyn Store,
    policy: &VersionedPolicy,
    today: NaiveDate,
) -> EngineResult<RecalculationReport> {
    let start_time = Instant::now();
    let failure = |e: EngineError| {
        error!(
            policy_version = policy.version,
            error = %e,
            "Balance recalculation failed"
        );
        EngineError::PolicyRecalculationFailure {
            policy_version: policy.version,
            message: e.to_string(),
        }
    };

    let balances = stage_balances(store, policy, today).map_err(failure)?;
    store
        .commit_recalculation(policy, &balances)
        .map_err(failure)?;

    let report = RecalculationReport {
        policy_version: policy.version,
        employees: balances.len(),
        without_hire_date: balances.iter().filter(|b| b.hire_date.is_none()).count(),
        duration_us: start_time.elapsed().as_micros() as u64,
    };

    info!(
        policy_version = report.policy_version,
        employees = report.employees,
        without_hire_date = report.without_hire_date,
        duration_us = report.duration_us,
        "Recalculated leave balances"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LeavePolicySettings;
    use crate::models::RosterEntry;
    use crate::store::InMemoryStore;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn policy() -> VersionedPolicy {
        VersionedPolicy::initial(
            LeavePolicySettings::default(),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    fn seeded_store() -> InMemoryStore {
        let store = InMemoryStore::new(policy());
        store.upsert_employee(RosterEntry::new("emp_001", Some(make_date("2025-01-15"))));
        store.upsert_employee(RosterEntry::new("emp_002", Some(make_date("2025-11-01"))));
        store.upsert_employee(RosterEntry::new("emp_003", None));
        store
    }

    #[test]
    fn test_recalculation_commits_every_balance() {
        let store = seeded_store();
        let next = policy().next(
            LeavePolicySettings {
                monthly_vacation_days: Decimal::from(3),
                ..LeavePolicySettings::default()
            },
            Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
        );

        let report = recalculate_all(&store, &next, make_date("2026-02-01")).unwrap();

        assert_eq!(report.policy_version, 2);
        assert_eq!(report.employees, 3);
        assert_eq!(report.without_hire_date, 1);
        assert_eq!(store.fetch_policy_settings().unwrap().version, 2);

        // 13 months of service, 10 after probation, at 3 days/month.
        let balance = store.fetch_balance("emp_001").unwrap().unwrap();
        assert_eq!(balance.earned, Decimal::from(30));
        assert_eq!(balance.policy_version, 2);
        assert_eq!(
            store.fetch_balance("emp_003").unwrap().unwrap().balance,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_recalculation_is_idempotent() {
        let store = seeded_store();
        let today = make_date("2026-02-01");

        recalculate_all(&store, &policy(), today).unwrap();
        let first: Vec<_> = ["emp_001", "emp_002", "emp_003"]
            .iter()
            .map(|id| store.fetch_balance(id).unwrap())
            .collect();

        recalculate_all(&store, &policy(), today).unwrap();
        let second: Vec<_> = ["emp_001", "emp_002", "emp_003"]
            .iter()
            .map(|id| store.fetch_balance(id).unwrap())
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_roster_commits_policy() {
        let store = InMemoryStore::new(policy());
        let next = policy().next(LeavePolicySettings::default(), Utc::now());

        let report = recalculate_all(&store, &next, make_date("2026-02-01")).unwrap();

        assert_eq!(report.employees, 0);
        assert_eq!(store.fetch_policy_settings().unwrap().version, 2);
    }
}
