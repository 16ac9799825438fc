//! Calculation logic for the attendance payroll engine.
//!
//! This module contains the pure calculation functions: daily status
//! classification, excess leave detection, salary deduction, working-days
//! resolution, timing resolution, and the aggregation that ties them into a
//! payroll result for one employee. None of them perform I/O.

mod attendance_metrics;
mod daily_status;
mod deductions;
mod excess_leave;
mod payroll;
mod timing;
mod working_days;

pub use attendance_metrics::{AttendanceMetrics, calculate_attendance_metrics};
pub use daily_status::{DEFAULT_LATE_THRESHOLD_MINUTES, DailyClassification, classify_attendance};
pub use deductions::{DeductionRates, SalaryBreakdown, calculate_deductions};
pub use excess_leave::{DEFAULT_ABSENCE_GRACE_DAYS, ExcessLeaveDetection, detect_excess_leave};
pub use payroll::{PayrollComputation, compute_payroll};
pub use timing::resolve_timing;
pub use working_days::{
    WorkingDays, WorkingDaysSource, dates_in_month, fallback_working_days, resolve_working_days,
};
