//! Salary deduction calculation.
//!
//! This module converts attendance counts into a monetary deduction against
//! the monthly salary prorated over the period's working days.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceTally, AuditStep};

/// Rates applied to each kind of deductible day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRates {
    /// Fraction of the daily salary deducted per half day.
    pub half_day_fraction: Decimal,
    /// Multiple of the daily salary deducted per excess leave day.
    pub excess_leave_multiplier: Decimal,
}

impl Default for DeductionRates {
    fn default() -> Self {
        Self {
            half_day_fraction: Decimal::new(5, 1),
            excess_leave_multiplier: Decimal::TWO,
        }
    }
}

/// The result of a deduction calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Base salary divided by working days, rounded to cents.
    pub per_day_salary: Decimal,
    /// Total deduction, rounded to cents.
    pub total_deductions: Decimal,
    /// Base salary less deductions, floored at zero.
    pub net_salary: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn overflow(component: &str, base_salary: Decimal) -> EngineError {
    EngineError::CalculationError {
        message: format!("{component} overflows for base salary {base_salary}"),
    }
}

/// `days × per_day × factor`, or `None` when the product leaves the decimal range.
fn day_charge(days: u32, per_day: Decimal, factor: Decimal) -> Option<Decimal> {
    Decimal::from(days)
        .checked_mul(per_day)
        .and_then(|amount| amount.checked_mul(factor))
}

/// Calculates the deduction and net salary for a period.
///
/// ```text
/// per_day    = base_salary / working_days         (0 when working_days is 0)
/// deduction  = absent × per_day
///            + half × per_day × half_day_fraction
///            + excess × per_day × excess_leave_multiplier
/// net        = max(0, base_salary − deduction)
/// ```
///
/// The daily rate is carried at full precision; the reported per-day salary,
/// deduction and net salary are rounded to cents, midpoint away from zero.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] when a deduction component does
/// not fit in a `Decimal`.
///
/// # Arguments
///
/// * `base_salary` - The monthly base salary
/// * `working_days` - Working days in the period's month
/// * `tally` - Attendance counts for the period
/// * `rates` - Half day and excess leave rates
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::{calculate_deductions, DeductionRates};
/// use attendance_payroll::models::AttendanceTally;
/// use rust_decimal::Decimal;
///
/// let tally = AttendanceTally {
///     absent_days: 2,
///     half_days: 1,
///     ..AttendanceTally::default()
/// };
/// let result =
///     calculate_deductions(Decimal::from(3000), 30, &tally, &DeductionRates::default(), 1).unwrap();
///
/// assert_eq!(result.per_day_salary, Decimal::from(100));
/// assert_eq!(result.total_deductions, Decimal::from(250));
/// assert_eq!(result.net_salary, Decimal::from(2750));
/// ```
pub fn calculate_deductions(
    base_salary: Decimal,
    working_days: u32,
    tally: &AttendanceTally,
    rates: &DeductionRates,
    step_number: u32,
) -> EngineResult<SalaryBreakdown> {
    let per_day = if working_days == 0 {
        Decimal::ZERO
    } else {
        base_salary
            .checked_div(Decimal::from(working_days))
            .ok_or_else(|| overflow("per-day salary", base_salary))?
    };

    let absent_deduction = day_charge(tally.absent_days, per_day, Decimal::ONE)
        .ok_or_else(|| overflow("absent deduction", base_salary))?;
    let half_day_deduction = day_charge(tally.half_days, per_day, rates.half_day_fraction)
        .ok_or_else(|| overflow("half day deduction", base_salary))?;
    let excess_leave_deduction =
        day_charge(tally.excess_leave_days, per_day, rates.excess_leave_multiplier)
            .ok_or_else(|| overflow("excess leave deduction", base_salary))?;

    let total_deductions = absent_deduction
        .checked_add(half_day_deduction)
        .and_then(|sum| sum.checked_add(excess_leave_deduction))
        .map(to_cents)
        .ok_or_else(|| overflow("total deduction", base_salary))?;
    let net_salary = base_salary
        .checked_sub(total_deductions)
        .map(|net| to_cents(net.max(Decimal::ZERO)))
        .ok_or_else(|| overflow("net salary", base_salary))?;
    let per_day_salary = to_cents(per_day);

    let reasoning = if working_days == 0 {
        "no working days in period, daily rate is zero".to_string()
    } else {
        format!(
            "{} absent, {} half and {} excess leave days at {} per day deduct {} from {}",
            tally.absent_days,
            tally.half_days,
            tally.excess_leave_days,
            per_day_salary.normalize(),
            total_deductions.normalize(),
            base_salary.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "salary_deduction".to_string(),
        rule_name: "Salary Deduction".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "working_days": working_days,
            "absent_days": tally.absent_days,
            "half_days": tally.half_days,
            "excess_leave_days": tally.excess_leave_days,
            "half_day_fraction": rates.half_day_fraction.normalize().to_string(),
            "excess_leave_multiplier": rates.excess_leave_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "per_day_salary": per_day_salary.normalize().to_string(),
            "absent_deduction": to_cents(absent_deduction).normalize().to_string(),
            "half_day_deduction": to_cents(half_day_deduction).normalize().to_string(),
            "excess_leave_deduction": to_cents(excess_leave_deduction).normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string(),
            "net_salary": net_salary.normalize().to_string()
        }),
        reasoning,
    };

    Ok(SalaryBreakdown {
        base_salary,
        per_day_salary,
        total_deductions,
        net_salary,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tally(absent: u32, half: u32, excess: u32) -> AttendanceTally {
        AttendanceTally {
            absent_days: absent,
            half_days: half,
            excess_leave_days: excess,
            ..AttendanceTally::default()
        }
    }

    #[test]
    fn test_absent_and_half_day_deduction() {
        let result = calculate_deductions(
            dec("3000"),
            30,
            &tally(2, 1, 0),
            &DeductionRates::default(),
            1,
        )
        .unwrap();
        assert_eq!(result.per_day_salary, dec("100"));
        assert_eq!(result.total_deductions, dec("250"));
        assert_eq!(result.net_salary, dec("2750"));
    }

    #[test]
    fn test_excess_leave_charged_at_double_rate() {
        // 5 absent, 3 excess: 5 × 100 + 3 × 2 × 100 = 1100
        let result = calculate_deductions(
            dec("3000"),
            30,
            &tally(5, 0, 3),
            &DeductionRates::default(),
            1,
        )
        .unwrap();
        assert_eq!(result.total_deductions, dec("1100"));
        assert_eq!(result.net_salary, dec("1900"));
    }

    #[test]
    fn test_zero_working_days_deducts_nothing() {
        let result = calculate_deductions(
            dec("3000"),
            0,
            &tally(10, 2, 8),
            &DeductionRates::default(),
            1,
        )
        .unwrap();
        assert_eq!(result.per_day_salary, Decimal::ZERO);
        assert_eq!(result.total_deductions, Decimal::ZERO);
        assert_eq!(result.net_salary, dec("3000"));
        assert!(result.audit_step.reasoning.contains("no working days"));
    }

    #[test]
    fn test_net_salary_floored_at_zero() {
        let result = calculate_deductions(
            dec("2600"),
            26,
            &tally(26, 0, 24),
            &DeductionRates::default(),
            1,
        )
        .unwrap();
        assert_eq!(result.total_deductions, dec("7400"));
        assert_eq!(result.net_salary, Decimal::ZERO);
    }

    #[test]
    fn test_amounts_rounded_to_cents() {
        // 1000 / 3 = 333.333...; one absence deducts 333.33
        let result = calculate_deductions(
            dec("1000"),
            3,
            &tally(1, 0, 0),
            &DeductionRates::default(),
            1,
        )
        .unwrap();
        assert_eq!(result.per_day_salary, dec("333.33"));
        assert_eq!(result.total_deductions, dec("333.33"));
        assert_eq!(result.net_salary, dec("666.67"));
    }

    #[test]
    fn test_rounding_applied_after_summing() {
        // Two absences at 333.333... deduct 666.67, not 2 × 333.33
        let result = calculate_deductions(
            dec("1000"),
            3,
            &tally(2, 0, 0),
            &DeductionRates::default(),
            1,
        )
        .unwrap();
        assert_eq!(result.total_deductions, dec("666.67"));
        assert_eq!(result.net_salary, dec("333.33"));
    }

    #[test]
    fn test_custom_rates() {
        let rates = DeductionRates {
            half_day_fraction: dec("0.25"),
            excess_leave_multiplier: dec("3"),
        };
        // 1 half × 25 + 1 excess × 300 = 325
        let result = calculate_deductions(dec("3000"), 30, &tally(0, 1, 1), &rates, 1).unwrap();
        assert_eq!(result.total_deductions, dec("325"));
    }

    #[test]
    fn test_audit_step_records_components() {
        let result = calculate_deductions(
            dec("3000"),
            30,
            &tally(2, 1, 1),
            &DeductionRates::default(),
            9,
        )
        .unwrap();
        assert_eq!(result.audit_step.step_number, 9);
        assert_eq!(result.audit_step.rule_id, "salary_deduction");
        assert_eq!(result.audit_step.output["absent_deduction"], "200");
        assert_eq!(result.audit_step.output["half_day_deduction"], "50");
        assert_eq!(result.audit_step.output["excess_leave_deduction"], "200");
        assert_eq!(result.audit_step.output["total_deductions"], "450");
    }

    #[test]
    fn test_overflowing_deduction_is_an_error() {
        // MAX / 1 day × 2 absences leaves the decimal range
        let result = calculate_deductions(
            Decimal::MAX,
            1,
            &tally(2, 0, 0),
            &DeductionRates::default(),
            1,
        );
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_maximum_salary_without_deductions_is_paid_in_full() {
        let result = calculate_deductions(
            Decimal::MAX,
            26,
            &tally(0, 0, 0),
            &DeductionRates::default(),
            1,
        )
        .unwrap();
        assert_eq!(result.total_deductions, Decimal::ZERO);
        assert_eq!(result.net_salary, Decimal::MAX);
    }

    fn any_salary() -> impl Strategy<Value = Decimal> {
        (any::<u32>(), any::<u32>(), any::<u32>(), 0u32..=28)
            .prop_map(|(lo, mid, hi, scale)| Decimal::from_parts(lo, mid, hi, false, scale))
    }

    proptest! {
        #[test]
        fn prop_net_salary_never_negative(
            salary_cents in 0i64..10_000_000,
            working_days in 0u32..32,
            absent in 0u32..40,
            half in 0u32..40,
            excess in 0u32..40,
        ) {
            let result = calculate_deductions(
                Decimal::new(salary_cents, 2),
                working_days,
                &tally(absent, half, excess),
                &DeductionRates::default(),
                1,
            )
            .unwrap();
            prop_assert!(result.net_salary >= Decimal::ZERO);
            prop_assert!(result.net_salary <= result.base_salary);
            prop_assert!(result.total_deductions >= Decimal::ZERO);
        }

        #[test]
        fn prop_any_salary_never_panics_or_goes_negative(
            salary in any_salary(),
            working_days in 0u32..32,
            absent in 0u32..40,
            half in 0u32..40,
            excess in 0u32..40,
        ) {
            match calculate_deductions(
                salary,
                working_days,
                &tally(absent, half, excess),
                &DeductionRates::default(),
                1,
            ) {
                Ok(result) => {
                    prop_assert!(result.net_salary >= Decimal::ZERO);
                    prop_assert!(result.total_deductions >= Decimal::ZERO);
                }
                Err(err) => {
                    let is_calculation_error = matches!(err, EngineError::CalculationError { .. });
                    prop_assert!(is_calculation_error);
                }
            }
        }
    }
}
