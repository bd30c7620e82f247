//! Leave accrual calculation functionality.
//!
//! Vacation accrues per whole calendar month of service once the probation
//! period has passed. Month counting ignores the day of month, so an
//! employee hired on the 31st has a full month of service on the 1st of the
//! following month.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::VersionedPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::LeaveBalance;

/// Returns the whole calendar months between `hire_date` and `today`.
///
/// Future hire dates yield zero.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::months_of_service;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let today = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
/// assert_eq!(months_of_service(hire, today), 9);
/// ```
pub fn months_of_service(hire_date: NaiveDate, today: NaiveDate) -> u32 {
    let months = (today.year() - hire_date.year()) * 12 + today.month() as i32
        - hire_date.month() as i32;
    months.max(0) as u32
}

/// Calculates an employee's leave balance under a policy version.
///
/// # Arguments
///
/// * `employee_id` - The employee the balance is for
/// * `hire_date` - Start of employment; `None` yields an all-zero balance
/// * `today` - The day the balance is computed for
/// * `used` - Days consumed by approved annual leave
/// * `policy` - The committed policy version
///
/// # Formula
///
/// ```text
/// months_service         = (today.year - hire.year) * 12 + (today.month - hire.month)
/// months_after_probation = max(0, months_service - probation_period_months)
/// earned                 = months_after_probation * monthly_vacation_days   (2 dp)
/// balance                = earned - used
/// ```
///
/// The balance may be negative and is never clamped.
///
/// # Errors
///
/// Returns `InvalidPolicy` if the monthly rate is so large that `earned`
/// or `balance` cannot be represented.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::calculate_accrual;
/// use attendance_engine::config::{LeavePolicySettings, VersionedPolicy};
/// use chrono::{NaiveDate, Utc};
/// use rust_decimal::Decimal;
///
/// let policy = VersionedPolicy::initial(LeavePolicySettings::default(), Utc::now());
/// let balance = calculate_accrual(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2025, 1, 15),
///     NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
///     Decimal::from(5),
///     &policy,
/// )
/// .unwrap();
///
/// assert_eq!(balance.months_service, 9);
/// assert_eq!(balance.months_after_probation, 6);
/// assert_eq!(balance.earned, Decimal::from(15));
/// assert_eq!(balance.balance, Decimal::from(10));
/// ```
pub fn calculate_accrual(
    employee_id: &str,
    hire_date: Option<NaiveDate>,
    today: NaiveDate,
    used: Decimal,
    policy: &VersionedPolicy,
) -> EngineResult<LeaveBalance> {
    let Some(hire) = hire_date else {
        return Ok(LeaveBalance {
            employee_id: employee_id.to_string(),
            hire_date: None,
            months_service: 0,
            months_after_probation: 0,
            earned: Decimal::ZERO,
            used: Decimal::ZERO,
            balance: Decimal::ZERO,
            policy_version: policy.version,
            as_of: today,
        });
    };

    let settings = &policy.settings;
    let months_service = months_of_service(hire, today);
    let months_after_probation = months_service.saturating_sub(settings.probation_period_months);

    let earned = Decimal::from(months_after_probation)
        .checked_mul(settings.monthly_vacation_days)
        .ok_or_else(|| overflow(settings.monthly_vacation_days))?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let balance = earned
        .checked_sub(used)
        .ok_or_else(|| overflow(settings.monthly_vacation_days))?;

    Ok(LeaveBalance {
        employee_id: employee_id.to_string(),
        hire_date: Some(hire),
        months_service,
        months_after_probation,
        earned,
        used,
        balance,
        policy_version: policy.version,
        as_of: today,
    })
}

fn overflow(rate: Decimal) -> EngineError {
    EngineError::InvalidPolicy {
        field: "monthly_vacation_days".to_string(),
        message: format!("{} days per month overflows the accrued balance", rate),
    }
}
