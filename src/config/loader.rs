//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{MAX_DUTY_HOURS, TimingConfig};

use super::types::{
    AttendanceConfig, DirectoryConfig, HolidayCalendar, PayrollConfig, PayrollPolicy,
};

/// Loads and provides access to payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query policy, calendar and directory data.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── policy.yaml      # Thresholds, multipliers, default timing, paging
/// ├── calendar.yaml    # Weekly off days, holidays, coverage window
/// ├── directory.yaml   # Offices, positions, timings, employees (optional)
/// └── attendance.yaml  # Punch records (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Late after {} minutes", loader.policy().late_threshold_minutes);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `policy.yaml` or `calendar.yaml` is missing
    /// - Any file contains invalid YAML
    /// - The policy holds a value the engine cannot use
    ///
    /// # Example
    ///
    /// ```no_run
    /// use attendance_payroll::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), attendance_payroll::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PayrollPolicy>(&path.join("policy.yaml"))?;
        let calendar = Self::load_yaml::<HolidayCalendar>(&path.join("calendar.yaml"))?;

        // Seed data files are optional: an engine with no employees is valid.
        let directory = Self::load_optional_yaml::<DirectoryConfig>(&path.join("directory.yaml"))?
            .unwrap_or_default();
        let attendance =
            Self::load_optional_yaml::<AttendanceConfig>(&path.join("attendance.yaml"))?
                .unwrap_or_default();

        Self::from_config(PayrollConfig::new(
            policy,
            calendar,
            directory,
            attendance.attendance,
        ))
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: PayrollConfig) -> EngineResult<Self> {
        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads a YAML file if it exists.
    fn load_optional_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load_yaml(path).map(Some)
    }

    fn validate(config: &PayrollConfig) -> EngineResult<()> {
        let policy = config.policy();

        check_duty_hours("default_timing.duty_hours", policy.default_timing.duty_hours)?;
        if policy.late_threshold_minutes < 0 {
            return Err(invalid("late_threshold_minutes", "must not be negative"));
        }
        if policy.half_day_fraction < Decimal::ZERO || policy.half_day_fraction > Decimal::ONE {
            return Err(invalid("half_day_fraction", "must be between 0 and 1"));
        }
        if policy.excess_leave_multiplier < Decimal::ZERO {
            return Err(invalid("excess_leave_multiplier", "must not be negative"));
        }
        if policy.default_page_size == 0 || policy.max_page_size == 0 {
            return Err(invalid("default_page_size", "page sizes must be at least 1"));
        }
        if policy.default_page_size > policy.max_page_size {
            return Err(invalid("default_page_size", "must not exceed max_page_size"));
        }
        if let Some(coverage) = config.calendar().coverage {
            if coverage.from > coverage.to {
                return Err(invalid("coverage", "from must not be after to"));
            }
        }

        for entry in &config.directory().office_positions {
            if let Some(hours) = entry.duty_hours {
                check_duty_hours(
                    &format!("office_positions[{}/{}].duty_hours", entry.office_id, entry.position_id),
                    hours,
                )?;
            }
        }
        for employee in &config.directory().employees {
            if employee.monthly_salary < Decimal::ZERO {
                return Err(invalid(
                    &format!("employees[{}].monthly_salary", employee.id),
                    "must not be negative",
                ));
            }
            if let Some(timing) = employee.timing {
                check_duty_hours(
                    &format!("employees[{}].timing.duty_hours", employee.id),
                    timing.duty_hours,
                )?;
            }
        }

        Ok(())
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the payroll policy.
    pub fn policy(&self) -> &PayrollPolicy {
        self.config.policy()
    }

    /// Returns the working-days calendar.
    pub fn calendar(&self) -> &HolidayCalendar {
        self.config.calendar()
    }

    /// Returns the policy default timing.
    pub fn default_timing(&self) -> TimingConfig {
        self.config.policy().default_timing
    }
}

fn check_duty_hours(field: &str, hours: Decimal) -> EngineResult<()> {
    if hours <= Decimal::ZERO {
        return Err(invalid(field, "must be greater than zero"));
    }
    if hours > MAX_DUTY_HOURS {
        return Err(invalid(field, "must not exceed 24 hours"));
    }
    Ok(())
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}
