//! Employee model.
//!
//! This module defines the [`Employee`] struct for representing salaried
//! workers whose attendance drives payroll deductions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TimingConfig;

/// Represents an employee subject to attendance-based payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name, used for report ordering.
    pub name: String,
    /// Contact email address.
    #[serde(default)]
    pub email: Option<String>,
    /// The office the employee is placed in.
    #[serde(default)]
    pub office_id: Option<String>,
    /// The position the employee holds.
    #[serde(default)]
    pub position_id: Option<String>,
    /// Monthly base salary.
    pub monthly_salary: Decimal,
    /// The date the employee joined.
    #[serde(default)]
    pub joining_date: Option<NaiveDate>,
    /// Per-employee timing that takes precedence over office/position timing.
    #[serde(default)]
    pub timing: Option<TimingConfig>,
}

impl Employee {
    /// Returns the office and position pair when both are assigned.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_payroll::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee = Employee {
    ///     id: "EMP001".to_string(),
    ///     name: "Asha Rao".to_string(),
    ///     email: None,
    ///     office_id: Some("OFF1".to_string()),
    ///     position_id: None,
    ///     monthly_salary: Decimal::from(30000),
    ///     joining_date: None,
    ///     timing: None,
    /// };
    /// assert!(employee.placement().is_none());
    ///
    /// employee.position_id = Some("POS1".to_string());
    /// assert_eq!(employee.placement(), Some(("OFF1", "POS1")));
    /// ```
    pub fn placement(&self) -> Option<(&str, &str)> {
        match (&self.office_id, &self.position_id) {
            (Some(office), Some(position)) => Some((office.as_str(), position.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_deserialize_minimal_employee() {
        let json = r#"{
            "id": "EMP001",
            "name": "Asha Rao",
            "monthly_salary": "30000.00"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "EMP001");
        assert_eq!(employee.monthly_salary, Decimal::new(3000000, 2));
        assert!(employee.office_id.is_none());
        assert!(employee.timing.is_none());
        assert!(employee.placement().is_none());
    }

    #[test]
    fn test_deserialize_employee_with_timing_override() {
        let json = r#"{
            "id": "EMP002",
            "name": "Ben Okafor",
            "email": "ben@example.com",
            "office_id": "OFF1",
            "position_id": "POS2",
            "monthly_salary": "45000",
            "joining_date": "2024-04-01",
            "timing": {"duty_hours": "9", "reporting_time": "08:00:00"}
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        let timing = employee.timing.unwrap();
        assert_eq!(timing.duty_minutes(), 540);
        assert_eq!(
            timing.reporting_time,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap()
        );
        assert_eq!(employee.placement(), Some(("OFF1", "POS2")));
    }

    #[test]
    fn test_monthly_salary_serializes_as_string() {
        let employee = Employee {
            id: "EMP003".to_string(),
            name: "Chen Li".to_string(),
            email: None,
            office_id: None,
            position_id: None,
            monthly_salary: Decimal::new(2550050, 2),
            joining_date: None,
            timing: None,
        };

        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["monthly_salary"], "25500.50");
    }
}
