//! Office and position directory models.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An office employees can be placed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Office {
    /// Unique identifier for the office.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A position employees can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Unique identifier for the position.
    pub id: String,
    /// Display title.
    pub title: String,
}

/// Duty timing configured for a position within a specific office.
///
/// Either field may be left out; a missing field falls back to the policy
/// default on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficePositionTiming {
    /// The office this timing applies to.
    pub office_id: String,
    /// The position this timing applies to.
    pub position_id: String,
    /// Expected reporting time.
    #[serde(default)]
    pub reporting_time: Option<NaiveTime>,
    /// Expected duty hours.
    #[serde(default)]
    pub duty_hours: Option<Decimal>,
}

/// An employee joined with their office name and position title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// The employee record.
    #[serde(flatten)]
    pub employee: super::Employee,
    /// Name of the employee's office, when placed.
    pub office_name: Option<String>,
    /// Title of the employee's position, when assigned.
    pub position_title: Option<String>,
}
