//! Excess leave detection.
//!
//! Consecutive absences beyond a grace period are charged as additional
//! penalty days. Only the single longest absence streak in the period is
//! considered.

use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, DailyStatus};

/// Default number of consecutive absent days tolerated without penalty.
pub const DEFAULT_ABSENCE_GRACE_DAYS: u32 = 2;

/// The result of scanning a period for excess leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcessLeaveDetection {
    /// Length of the longest run of consecutive absent days.
    pub longest_absence_streak: u32,
    /// Days of that run beyond the grace period.
    pub excess_leave_days: u32,
    /// The audit step recording this detection.
    pub audit_step: AuditStep,
}

/// Finds the longest absence streak and the excess over the grace period.
///
/// # Arguments
///
/// * `statuses` - Daily statuses in chronological order
/// * `grace_days` - Consecutive absences tolerated without penalty
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::{detect_excess_leave, DEFAULT_ABSENCE_GRACE_DAYS};
/// use attendance_payroll::models::DailyStatus::{Absent, Present};
///
/// let statuses = [Absent, Absent, Absent, Absent, Absent, Present];
/// let result = detect_excess_leave(&statuses, DEFAULT_ABSENCE_GRACE_DAYS, 1);
///
/// assert_eq!(result.longest_absence_streak, 5);
/// assert_eq!(result.excess_leave_days, 3);
/// ```
pub fn detect_excess_leave(
    statuses: &[DailyStatus],
    grace_days: u32,
    step_number: u32,
) -> ExcessLeaveDetection {
    let (longest, _) = statuses
        .iter()
        .fold((0u32, 0u32), |(longest, current), status| {
            if *status == DailyStatus::Absent {
                let current = current + 1;
                (longest.max(current), current)
            } else {
                (longest, 0)
            }
        });

    let excess_leave_days = longest.saturating_sub(grace_days);

    let reasoning = if excess_leave_days > 0 {
        format!(
            "longest absence streak of {} days exceeds {} day grace by {} days",
            longest, grace_days, excess_leave_days
        )
    } else {
        format!(
            "longest absence streak of {} days is within {} day grace",
            longest, grace_days
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "excess_leave".to_string(),
        rule_name: "Excess Leave Detection".to_string(),
        input: serde_json::json!({
            "statuses": statuses.iter().map(|s| s.code()).collect::<Vec<_>>(),
            "grace_days": grace_days
        }),
        output: serde_json::json!({
            "longest_absence_streak": longest,
            "excess_leave_days": excess_leave_days
        }),
        reasoning,
    };

    ExcessLeaveDetection {
        longest_absence_streak: longest,
        excess_leave_days,
        audit_step,
    }
}
