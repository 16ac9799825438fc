//! Configuration loading and management for the attendance payroll engine.
//!
//! This module provides functionality to load payroll configuration from YAML
//! files, including the deduction policy, the holiday calendar, and the
//! directory and attendance data the store is seeded with.
//!
//! # Example
//!
//! ```no_run
//! use attendance_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Grace days: {}", config.policy().absence_grace_days);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceConfig, CalendarCoverage, DirectoryConfig, Holiday, HolidayCalendar, PayrollConfig,
    PayrollPolicy, ServerConfig,
};
