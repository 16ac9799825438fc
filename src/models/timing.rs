//! Duty timing model.
//!
//! A [`TimingConfig`] tells the classifier how long an employee is expected
//! to work and when they are expected to report.

use chrono::NaiveTime;
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Default expected duty duration in hours.
pub const DEFAULT_DUTY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Longest duty day a configuration may declare, in hours.
pub const MAX_DUTY_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Expected duty duration and reporting time for an employee.
///
/// # Example
///
/// ```
/// use attendance_payroll::models::TimingConfig;
/// use chrono::NaiveTime;
///
/// let timing = TimingConfig::default();
/// assert_eq!(timing.duty_minutes(), 480);
/// assert_eq!(timing.half_duty_minutes(), 240);
/// assert_eq!(timing.reporting_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Expected hours on duty per day.
    pub duty_hours: Decimal,
    /// Expected time of day to punch in.
    pub reporting_time: NaiveTime,
}

impl TimingConfig {
    /// Expected duty duration in whole minutes, rounded half away from zero.
    ///
    /// Saturates at `0` or `i64::MAX` when the hours do not fit in minutes.
    pub fn duty_minutes(&self) -> i64 {
        self.duty_hours
            .checked_mul(Decimal::from(60))
            .and_then(|minutes| {
                minutes
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                    .to_i64()
            })
            .unwrap_or(if self.duty_hours.is_sign_negative() {
                0
            } else {
                i64::MAX
            })
    }

    /// Half of the duty duration in whole minutes; an odd minute rounds up.
    pub fn half_duty_minutes(&self) -> i64 {
        self.duty_minutes().saturating_add(1).div_euclid(2)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            duty_hours: DEFAULT_DUTY_HOURS,
            reporting_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}
