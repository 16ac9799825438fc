//! Configuration types for payroll computation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{AttendanceRecord, Employee, Office, OfficePositionTiming, Position, TimingConfig};

fn default_late_threshold_minutes() -> i64 {
    15
}

fn default_absence_grace_days() -> u32 {
    2
}

fn default_excess_leave_multiplier() -> Decimal {
    Decimal::TWO
}

fn default_half_day_fraction() -> Decimal {
    Decimal::new(5, 1)
}

fn default_fallback_weekly_off() -> Vec<Weekday> {
    vec![Weekday::Sun]
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}

fn default_bind_addr() -> String {
    "0.0.0.0:5000".to_string()
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Payroll policy from policy.yaml.
///
/// Every value has a default, so an empty file yields the standard policy:
/// 15 minute late threshold, 2 day absence grace, excess leave charged at
/// twice the daily rate, half days charged at half the daily rate.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollPolicy {
    /// Minutes after reporting time from which a punch-in counts as late.
    #[serde(default = "default_late_threshold_minutes")]
    pub late_threshold_minutes: i64,
    /// Consecutive absent days tolerated before excess leave accrues.
    #[serde(default = "default_absence_grace_days")]
    pub absence_grace_days: u32,
    /// Daily-salary multiple charged per excess leave day.
    #[serde(default = "default_excess_leave_multiplier")]
    pub excess_leave_multiplier: Decimal,
    /// Fraction of the daily salary charged per half day.
    #[serde(default = "default_half_day_fraction")]
    pub half_day_fraction: Decimal,
    /// Timing used when neither the employee nor their placement sets one.
    #[serde(default)]
    pub default_timing: TimingConfig,
    /// Weekly off days assumed when the calendar cannot answer.
    #[serde(default = "default_fallback_weekly_off")]
    pub fallback_weekly_off: Vec<Weekday>,
    /// Report page size when the caller gives none.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Largest report page size a caller may ask for.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            late_threshold_minutes: default_late_threshold_minutes(),
            absence_grace_days: default_absence_grace_days(),
            excess_leave_multiplier: default_excess_leave_multiplier(),
            half_day_fraction: default_half_day_fraction(),
            default_timing: TimingConfig::default(),
            fallback_weekly_off: default_fallback_weekly_off(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            server: ServerConfig::default(),
        }
    }
}

/// A named holiday on which no attendance is expected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
}

/// Date window a calendar has been maintained for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CalendarCoverage {
    /// First covered date (inclusive).
    pub from: NaiveDate,
    /// Last covered date (inclusive).
    pub to: NaiveDate,
}

/// Holiday calendar from calendar.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayCalendar {
    /// Days of the week that are never working days.
    #[serde(default)]
    pub weekly_off: Vec<Weekday>,
    /// Listed holidays.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// When set, months not fully inside the window cannot be answered.
    #[serde(default)]
    pub coverage: Option<CalendarCoverage>,
}

impl HolidayCalendar {
    /// Returns the holiday on `date`, if any.
    pub fn holiday_on(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.iter().find(|h| h.date == date)
    }
}

/// Office, position and employee records from directory.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryConfig {
    /// Offices.
    #[serde(default)]
    pub offices: Vec<Office>,
    /// Positions.
    #[serde(default)]
    pub positions: Vec<Position>,
    /// Timing per office and position.
    #[serde(default)]
    pub office_positions: Vec<OfficePositionTiming>,
    /// Employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
}

/// Attendance records from attendance.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceConfig {
    /// Punch records.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

/// The complete payroll configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various
/// YAML files in a configuration directory.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Payroll policy.
    policy: PayrollPolicy,
    /// Working-days calendar.
    calendar: HolidayCalendar,
    /// Directory data the store is seeded with.
    directory: DirectoryConfig,
    /// Attendance records the store is seeded with (sorted by date).
    attendance: Vec<AttendanceRecord>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        policy: PayrollPolicy,
        calendar: HolidayCalendar,
        directory: DirectoryConfig,
        attendance: Vec<AttendanceRecord>,
    ) -> Self {
        let mut sorted_attendance = attendance;
        sorted_attendance.sort_by(|a, b| a.date.cmp(&b.date));
        Self {
            policy,
            calendar,
            directory,
            attendance: sorted_attendance,
        }
    }

    /// Returns the payroll policy.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }

    /// Returns the holiday calendar.
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// Returns the directory seed data.
    pub fn directory(&self) -> &DirectoryConfig {
        &self.directory
    }

    /// Returns the attendance seed data.
    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_empty_policy_uses_defaults() {
        let policy: PayrollPolicy = serde_yaml::from_str("{}").unwrap();
        assert_eq!(policy.late_threshold_minutes, 15);
        assert_eq!(policy.absence_grace_days, 2);
        assert_eq!(policy.excess_leave_multiplier, Decimal::TWO);
        assert_eq!(policy.half_day_fraction, Decimal::new(5, 1));
        assert_eq!(policy.default_timing, TimingConfig::default());
        assert_eq!(policy.fallback_weekly_off, vec![Weekday::Sun]);
        assert_eq!(policy.default_page_size, 10);
        assert_eq!(policy.server.bind_addr, "0.0.0.0:5000");
    }

    #[test]
    fn test_policy_overrides() {
        let yaml = r#"
late_threshold_minutes: 10
absence_grace_days: 3
default_timing:
  duty_hours: "9"
  reporting_time: "08:30:00"
fallback_weekly_off: [Sat, Sun]
server:
  bind_addr: "127.0.0.1:8080"
"#;
        let policy: PayrollPolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy.late_threshold_minutes, 10);
        assert_eq!(policy.absence_grace_days, 3);
        assert_eq!(policy.default_timing.duty_minutes(), 540);
        assert_eq!(
            policy.default_timing.reporting_time,
            NaiveTime::from_hms_opt(8, 30, 0).unwrap()
        );
        assert_eq!(policy.fallback_weekly_off, vec![Weekday::Sat, Weekday::Sun]);
        assert_eq!(policy.server.bind_addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_calendar_holiday_lookup() {
        let yaml = r#"
weekly_off: [Sun]
holidays:
  - date: 2026-01-26
    name: Republic Day
"#;
        let calendar: HolidayCalendar = serde_yaml::from_str(yaml).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 1, 26).unwrap();
        assert_eq!(calendar.holiday_on(date).unwrap().name, "Republic Day");
        assert!(calendar.holiday_on(date.succ_opt().unwrap()).is_none());
        assert!(calendar.coverage.is_none());
    }

    #[test]
    fn test_config_sorts_attendance_by_date() {
        let record = |day: u32| AttendanceRecord {
            employee_id: "EMP001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            punch_in: None,
            punch_out: None,
        };
        let config = PayrollConfig::new(
            PayrollPolicy::default(),
            HolidayCalendar {
                weekly_off: vec![],
                holidays: vec![],
                coverage: None,
            },
            DirectoryConfig::default(),
            vec![record(5), record(2), record(3)],
        );

        let days: Vec<u32> = config
            .attendance()
            .iter()
            .map(|r| chrono::Datelike::day(&r.date))
            .collect();
        assert_eq!(days, vec![2, 3, 5]);
    }
}
