//! Timing resolution.
//!
//! Picks the duty timing an employee is classified against: their own
//! override first, then the timing configured for their office and
//! position, then the policy default.

use crate::models::{Employee, OfficePositionTiming, TimingConfig};

/// Resolves the timing for an employee.
///
/// An office/position entry may set only one of its fields; the other falls
/// back to the default on its own.
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::resolve_timing;
/// use attendance_payroll::models::{Employee, OfficePositionTiming, TimingConfig};
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "EMP001".to_string(),
///     name: "Asha Rao".to_string(),
///     email: None,
///     office_id: Some("OFF1".to_string()),
///     position_id: Some("POS1".to_string()),
///     monthly_salary: Decimal::from(30000),
///     joining_date: None,
///     timing: None,
/// };
/// let entry = OfficePositionTiming {
///     office_id: "OFF1".to_string(),
///     position_id: "POS1".to_string(),
///     reporting_time: NaiveTime::from_hms_opt(10, 0, 0),
///     duty_hours: None,
/// };
///
/// let timing = resolve_timing(&employee, Some(&entry), TimingConfig::default());
/// assert_eq!(timing.reporting_time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
/// assert_eq!(timing.duty_hours, Decimal::from(8));
/// ```
pub fn resolve_timing(
    employee: &Employee,
    office_position: Option<&OfficePositionTiming>,
    default: TimingConfig,
) -> TimingConfig {
    if let Some(timing) = employee.timing {
        return timing;
    }

    match (employee.placement(), office_position) {
        (Some(_), Some(entry)) => TimingConfig {
            duty_hours: entry.duty_hours.unwrap_or(default.duty_hours),
            reporting_time: entry.reporting_time.unwrap_or(default.reporting_time),
        },
        _ => default,
    }
}
