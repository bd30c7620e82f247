//! Roster model.
//!
//! The engine does not own employee records. It only needs the identifier
//! and the hire date that drives accrual.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One employee as seen by the accrual calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// The date the employee started employment, if recorded.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
}

impl RosterEntry {
    /// Creates a roster entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::RosterEntry;
    /// use chrono::NaiveDate;
    ///
    /// let entry = RosterEntry::new("emp_001", NaiveDate::from_ymd_opt(2024, 3, 1));
    /// assert!(entry.has_hire_date());
    /// ```
    pub fn new(employee_id: impl Into<String>, hire_date: Option<NaiveDate>) -> Self {
        Self {
            employee_id: employee_id.into(),
            hire_date,
        }
    }

    /// Returns true if the employee has a recorded hire date.
    pub fn has_hire_date(&self) -> bool {
        self.hire_date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_roster_entry() {
        let json = r#"{
            "employee_id": "emp_001",
            "hire_date": "2023-06-01"
        }"#;

        let entry: RosterEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.employee_id, "emp_001");
        assert_eq!(entry.hire_date, NaiveDate::from_ymd_opt(2023, 6, 1));
    }

    #[test]
    fn test_missing_hire_date_defaults_to_none() {
        let entry: RosterEntry = serde_json::from_str(r#"{"employee_id": "emp_002"}"#).unwrap();
        assert!(!entry.has_hire_date());
    }
}
