//! Payroll computation for one employee.
//!
//! Ties attendance metrics and the deduction calculation together into a
//! [`PayrollResult`].

use serde::{Deserialize, Serialize};

use crate::config::PayrollPolicy;
use crate::error::EngineResult;
use crate::models::{AttendanceRecord, AuditStep, Employee, PayrollResult, TimingConfig};

use super::attendance_metrics::{AttendanceMetrics, calculate_attendance_metrics};
use super::deductions::{DeductionRates, SalaryBreakdown, calculate_deductions};

impl From<&PayrollPolicy> for DeductionRates {
    fn from(policy: &PayrollPolicy) -> Self {
        Self {
            half_day_fraction: policy.half_day_fraction,
            excess_leave_multiplier: policy.excess_leave_multiplier,
        }
    }
}

/// A payroll result together with the intermediate values behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollComputation {
    /// The final payroll figures.
    pub result: PayrollResult,
    /// The timing the records were classified against.
    pub timing: TimingConfig,
    /// Per-day classifications and tallies.
    pub metrics: AttendanceMetrics,
    /// The deduction breakdown.
    pub salary: SalaryBreakdown,
}

impl PayrollComputation {
    /// Every audit step of the computation, in order.
    pub fn audit_steps(&self) -> Vec<AuditStep> {
        let mut steps = self.metrics.audit_steps();
        steps.push(self.salary.audit_step.clone());
        steps
    }
}

/// Computes payroll for one employee over a period.
///
/// # Arguments
///
/// * `employee` - The employee, for id and monthly salary
/// * `records` - The employee's attendance records in the period
/// * `timing` - The employee's resolved duty timing
/// * `working_days` - Working days the salary is prorated over
/// * `policy` - Thresholds and deduction rates
///
/// # Errors
///
/// Fails with a calculation error when the salary arithmetic overflows.
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::compute_payroll;
/// use attendance_payroll::config::PayrollPolicy;
/// use attendance_payroll::models::{AttendanceRecord, Employee, TimingConfig};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "EMP001".to_string(),
///     name: "Asha Rao".to_string(),
///     email: None,
///     office_id: None,
///     position_id: None,
///     monthly_salary: Decimal::from(3000),
///     joining_date: None,
///     timing: None,
/// };
/// let absent = AttendanceRecord {
///     employee_id: "EMP001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     punch_in: None,
///     punch_out: None,
/// };
///
/// let computation = compute_payroll(
///     &employee,
///     &[absent],
///     TimingConfig::default(),
///     30,
///     &PayrollPolicy::default(),
/// )
/// .unwrap();
/// assert_eq!(computation.result.total_deductions, Decimal::from(100));
/// assert_eq!(computation.result.net_salary, Decimal::from(2900));
/// ```
pub fn compute_payroll(
    employee: &Employee,
    records: &[AttendanceRecord],
    timing: TimingConfig,
    working_days: u32,
    policy: &PayrollPolicy,
) -> EngineResult<PayrollComputation> {
    let metrics = calculate_attendance_metrics(records, &timing, policy, 1);

    let salary = calculate_deductions(
        employee.monthly_salary,
        working_days,
        &metrics.tally,
        &DeductionRates::from(policy),
        metrics.next_step(),
    )?;

    let result = PayrollResult {
        employee_id: employee.id.clone(),
        tally: metrics.tally,
        working_days,
        base_salary: salary.base_salary,
        per_day_salary: salary.per_day_salary,
        total_deductions: salary.total_deductions,
        net_salary: salary.net_salary,
    };

    Ok(PayrollComputation {
        result,
        timing,
        metrics,
        salary,
    })
}
