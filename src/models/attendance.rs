//! Attendance record and daily status models.
//!
//! This module contains the raw [`AttendanceRecord`] captured from punch
//! clocks and the [`DailyStatus`] derived from it.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single day's punch-in/punch-out for an employee.
///
/// Either punch may be missing, in which case the day classifies as absent.
///
/// # Example
///
/// ```
/// use attendance_payroll::models::AttendanceRecord;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let record = AttendanceRecord {
///     employee_id: "EMP001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     punch_in: NaiveTime::from_hms_opt(9, 0, 0),
///     punch_out: NaiveTime::from_hms_opt(17, 30, 0),
/// };
/// assert_eq!(record.worked_minutes(), Some(510));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// Time the employee punched in.
    #[serde(default)]
    pub punch_in: Option<NaiveTime>,
    /// Time the employee punched out.
    #[serde(default)]
    pub punch_out: Option<NaiveTime>,
}

impl AttendanceRecord {
    /// Minutes between punch-in and punch-out, truncated toward zero.
    ///
    /// Returns `None` when either punch is missing. The value may be zero or
    /// negative when punch-out is not after punch-in.
    pub fn worked_minutes(&self) -> Option<i64> {
        match (self.punch_in, self.punch_out) {
            (Some(punch_in), Some(punch_out)) => Some((punch_out - punch_in).num_minutes()),
            _ => None,
        }
    }
}

/// The classification of one attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyStatus {
    /// Worked more than half of duty and reported on time.
    Present,
    /// Worked more than half of duty but reported past the late threshold.
    Late,
    /// Worked half of duty or less.
    HalfDay,
    /// Missing a punch, or no positive time worked.
    Absent,
}

impl DailyStatus {
    /// Short code shown in attendance grids.
    ///
    /// ```
    /// use attendance_payroll::models::DailyStatus;
    ///
    /// assert_eq!(DailyStatus::HalfDay.code(), "HD");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            DailyStatus::Present => "P",
            DailyStatus::Late => "L",
            DailyStatus::HalfDay => "HD",
            DailyStatus::Absent => "A",
        }
    }

    /// Whether the day counts toward the present tally. Late days do.
    pub fn counts_as_present(&self) -> bool {
        matches!(self, DailyStatus::Present | DailyStatus::Late)
    }
}
