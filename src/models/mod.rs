//! Core data models for the attendance payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod audit;
mod directory;
mod employee;
mod payroll;
mod timing;

pub use attendance::{AttendanceRecord, DailyStatus};
pub use audit::AuditStep;
pub use directory::{EmployeeProfile, Office, OfficePositionTiming, Position};
pub use employee::Employee;
pub use payroll::{AttendanceTally, PayrollRecord, PayrollResult};
pub use timing::{DEFAULT_DUTY_HOURS, MAX_DUTY_HOURS, TimingConfig};
