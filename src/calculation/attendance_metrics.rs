//! Attendance metrics aggregation.
//!
//! Classifies every record of a period in date order, tallies the statuses
//! and scans the ordered statuses for excess leave.

use serde::{Deserialize, Serialize};

use crate::config::PayrollPolicy;
use crate::models::{AttendanceRecord, AttendanceTally, AuditStep, DailyStatus, TimingConfig};

use super::daily_status::{DailyClassification, classify_attendance};
use super::excess_leave::{ExcessLeaveDetection, detect_excess_leave};

/// Classified days and tallies for one employee over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceMetrics {
    /// Counts per status, plus excess leave days.
    pub tally: AttendanceTally,
    /// One classification per record, in date order.
    pub days: Vec<DailyClassification>,
    /// The excess leave scan over `days`.
    pub excess_leave: ExcessLeaveDetection,
}

impl AttendanceMetrics {
    /// All audit steps in order: one per day, then the excess leave scan.
    pub fn audit_steps(&self) -> Vec<AuditStep> {
        self.days
            .iter()
            .map(|d| d.audit_step.clone())
            .chain(std::iter::once(self.excess_leave.audit_step.clone()))
            .collect()
    }

    /// The step number following the last step recorded here.
    pub fn next_step(&self) -> u32 {
        self.excess_leave.audit_step.step_number + 1
    }
}

/// Classifies a period of attendance and tallies the result.
///
/// Records are sorted by date before classification. Every record lands in
/// exactly one of present, late, half day or absent; late days are counted in
/// `present_days` as well as `late_days`.
///
/// # Arguments
///
/// * `records` - The employee's attendance records for the period, any order
/// * `timing` - The employee's resolved duty timing
/// * `policy` - Late threshold and absence grace period
/// * `first_step` - The step number of the first audit step produced
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::calculate_attendance_metrics;
/// use attendance_payroll::config::PayrollPolicy;
/// use attendance_payroll::models::{AttendanceRecord, TimingConfig};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let records: Vec<AttendanceRecord> = (2..=4)
///     .map(|day| AttendanceRecord {
///         employee_id: "EMP001".to_string(),
///         date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
///         punch_in: NaiveTime::from_hms_opt(9, 0, 0),
///         punch_out: NaiveTime::from_hms_opt(17, 0, 0),
///     })
///     .collect();
///
/// let metrics = calculate_attendance_metrics(
///     &records,
///     &TimingConfig::default(),
///     &PayrollPolicy::default(),
///     1,
/// );
/// assert_eq!(metrics.tally.present_days, 3);
/// assert_eq!(metrics.tally.absent_days, 0);
/// ```
pub fn calculate_attendance_metrics(
    records: &[AttendanceRecord],
    timing: &TimingConfig,
    policy: &PayrollPolicy,
    first_step: u32,
) -> AttendanceMetrics {
    let mut sorted: Vec<&AttendanceRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);

    let days: Vec<DailyClassification> = sorted
        .into_iter()
        .zip(first_step..)
        .map(|(record, step)| {
            classify_attendance(record, timing, policy.late_threshold_minutes, step)
        })
        .collect();

    let mut tally = AttendanceTally::default();
    for day in &days {
        if day.status.counts_as_present() {
            tally.present_days += 1;
        }
        match day.status {
            DailyStatus::Present => {}
            DailyStatus::Late => tally.late_days += 1,
            DailyStatus::HalfDay => tally.half_days += 1,
            DailyStatus::Absent => tally.absent_days += 1,
        }
    }

    let statuses: Vec<DailyStatus> = days.iter().map(|d| d.status).collect();
    let excess_leave = detect_excess_leave(
        &statuses,
        policy.absence_grace_days,
        first_step + days.len() as u32,
    );
    tally.excess_leave_days = excess_leave.excess_leave_days;

    AttendanceMetrics {
        tally,
        days,
        excess_leave,
    }
}
