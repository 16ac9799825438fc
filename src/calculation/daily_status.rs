//! Daily status classification.
//!
//! This module classifies a single attendance record as present, late,
//! half day or absent against the employee's duty timing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, AuditStep, DailyStatus, TimingConfig};

/// Default lateness, in minutes past reporting time, from which a day is late.
pub const DEFAULT_LATE_THRESHOLD_MINUTES: i64 = 15;

/// The classification of one attendance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyClassification {
    /// The date of the classified record.
    pub date: NaiveDate,
    /// The derived status.
    pub status: DailyStatus,
    /// Minutes between punches, zero when a punch is missing.
    pub worked_minutes: i64,
    /// Minutes past reporting time at punch-in, zero when punch-in is missing.
    /// Negative for early arrivals.
    pub late_minutes: i64,
    /// The audit step recording this classification.
    pub audit_step: AuditStep,
}

/// Classifies one attendance record.
///
/// Rules are evaluated in a fixed order and the first match wins:
///
/// 1. A missing punch, or a non-positive worked duration, is **absent**.
/// 2. Worked minutes at or below half of duty minutes is a **half day**.
/// 3. A punch-in `late_threshold_minutes` or more past reporting time is **late**.
/// 4. Anything else is **present**.
///
/// # Arguments
///
/// * `record` - The attendance record to classify
/// * `timing` - The employee's duty hours and reporting time
/// * `late_threshold_minutes` - Lateness from which a day counts as late
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::{classify_attendance, DEFAULT_LATE_THRESHOLD_MINUTES};
/// use attendance_payroll::models::{AttendanceRecord, DailyStatus, TimingConfig};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let record = AttendanceRecord {
///     employee_id: "EMP001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     punch_in: NaiveTime::from_hms_opt(9, 15, 0),
///     punch_out: NaiveTime::from_hms_opt(18, 0, 0),
/// };
///
/// let result = classify_attendance(
///     &record,
///     &TimingConfig::default(),
///     DEFAULT_LATE_THRESHOLD_MINUTES,
///     1,
/// );
/// assert_eq!(result.status, DailyStatus::Late);
/// assert_eq!(result.late_minutes, 15);
/// ```
pub fn classify_attendance(
    record: &AttendanceRecord,
    timing: &TimingConfig,
    late_threshold_minutes: i64,
    step_number: u32,
) -> DailyClassification {
    let duty_minutes = timing.duty_minutes();
    let half_duty_minutes = timing.half_duty_minutes();

    let late_minutes = record
        .punch_in
        .map(|punch_in| (punch_in - timing.reporting_time).num_minutes())
        .unwrap_or(0);

    let (status, worked_minutes, reasoning) = match record.worked_minutes() {
        None => (
            DailyStatus::Absent,
            0,
            "punch-in or punch-out missing".to_string(),
        ),
        Some(worked) if worked <= 0 => (
            DailyStatus::Absent,
            worked,
            format!("{} minutes worked is not a positive duration", worked),
        ),
        Some(worked) if worked <= half_duty_minutes => (
            DailyStatus::HalfDay,
            worked,
            format!(
                "{} minutes worked is at or below half duty of {} minutes",
                worked, half_duty_minutes
            ),
        ),
        Some(worked) if late_minutes >= late_threshold_minutes => (
            DailyStatus::Late,
            worked,
            format!(
                "punched in {} minutes after reporting time, threshold is {} minutes",
                late_minutes, late_threshold_minutes
            ),
        ),
        Some(worked) => (
            DailyStatus::Present,
            worked,
            format!(
                "{} minutes worked exceeds half duty of {} minutes, punched in {} minutes from reporting time",
                worked, half_duty_minutes, late_minutes
            ),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "daily_status".to_string(),
        rule_name: "Daily Status Classification".to_string(),
        input: serde_json::json!({
            "date": record.date.to_string(),
            "punch_in": record.punch_in.map(|t| t.to_string()),
            "punch_out": record.punch_out.map(|t| t.to_string()),
            "duty_minutes": duty_minutes,
            "reporting_time": timing.reporting_time.to_string(),
            "late_threshold_minutes": late_threshold_minutes
        }),
        output: serde_json::json!({
            "status": status.code(),
            "worked_minutes": worked_minutes,
            "late_minutes": late_minutes
        }),
        reasoning,
    };

    DailyClassification {
        date: record.date,
        status,
        worked_minutes,
        late_minutes,
        audit_step,
    }
}
