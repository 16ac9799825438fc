//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] produced by a payroll
//! computation and the [`PayrollRecord`] it is persisted as.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Day counts for one employee over a period.
///
/// Late days are included in `present_days` as well as `late_days`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceTally {
    /// Days worked beyond half duty, late or not.
    pub present_days: u32,
    /// Days worked half duty or less.
    pub half_days: u32,
    /// Present days that started past the late threshold.
    pub late_days: u32,
    /// Days with a missing punch or no positive time worked.
    pub absent_days: u32,
    /// Penalty days from the longest absence streak beyond the grace period.
    pub excess_leave_days: u32,
}

/// The computed payroll for one employee and period.
///
/// # Example
///
/// ```
/// use attendance_payroll::models::{AttendanceTally, PayrollResult};
/// use rust_decimal::Decimal;
///
/// let result = PayrollResult {
///     employee_id: "EMP001".to_string(),
///     tally: AttendanceTally::default(),
///     working_days: 26,
///     base_salary: Decimal::from(26000),
///     per_day_salary: Decimal::from(1000),
///     total_deductions: Decimal::ZERO,
///     net_salary: Decimal::from(26000),
/// };
/// assert_eq!(result.net_salary, result.base_salary);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The employee the payroll is for.
    pub employee_id: String,
    /// Attendance counts the deduction was computed from.
    #[serde(flatten)]
    pub tally: AttendanceTally,
    /// Working days the salary was prorated over.
    pub working_days: u32,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Base salary divided by working days, rounded to cents.
    pub per_day_salary: Decimal,
    /// Total deduction, rounded to cents.
    pub total_deductions: Decimal,
    /// Base salary less deductions, never below zero.
    pub net_salary: Decimal,
}

/// A persisted payroll row keyed by (employee, month, year).
///
/// Recomputing the same key overwrites every figure and refreshes
/// `updated_at`; `created_at` is kept from the first write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// The employee the row belongs to.
    pub employee_id: String,
    /// Month number (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Present days, late included.
    pub present_days: u32,
    /// Half days.
    pub half_days: u32,
    /// Late days.
    pub late_days: u32,
    /// Absent days.
    pub leaves: u32,
    /// Excess leave penalty days.
    pub excess_leaves: u32,
    /// Total deduction amount.
    pub deductions_amount: Decimal,
    /// Net salary after deductions.
    pub net_salary: Decimal,
    /// When the row was first written.
    pub created_at: DateTime<Utc>,
    /// When the row was last recomputed.
    pub updated_at: DateTime<Utc>,
}

impl PayrollRecord {
    /// Builds a fresh row for `result` in the given month.
    pub fn from_result(result: &PayrollResult, month: u32, year: i32, now: DateTime<Utc>) -> Self {
        Self {
            employee_id: result.employee_id.clone(),
            month,
            year,
            present_days: result.tally.present_days,
            half_days: result.tally.half_days,
            late_days: result.tally.late_days,
            leaves: result.tally.absent_days,
            excess_leaves: result.tally.excess_leave_days,
            deductions_amount: result.total_deductions,
            net_salary: result.net_salary,
            created_at: now,
            updated_at: now,
        }
    }

    /// The upsert key of the row.
    pub fn key(&self) -> (String, u32, i32) {
        (self.employee_id.clone(), self.month, self.year)
    }
}
