//! Error types for the attendance payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading configuration,
//! reading the data store, or computing payroll.

use thiserror::Error;

/// The main error type for the attendance payroll engine.
///
/// All fallible operations in the engine return this error type, so the
/// HTTP layer can map every failure to a status code in one place.
///
/// # Example
///
/// ```
/// use attendance_payroll::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "EMP404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: EMP404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value the engine cannot use.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// No employee exists with the given identifier.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        employee_id: String,
    },

    /// A year/month pair or date range does not describe a valid period.
    #[error("Invalid period: {message}")]
    InvalidPeriod {
        /// A description of what made the period invalid.
        message: String,
    },

    /// The working-days calendar could not answer for the requested month.
    #[error("Working-days calendar unavailable for {year}-{month:02}: {message}")]
    CalendarUnavailable {
        /// The requested year.
        year: i32,
        /// The requested month (1-12).
        month: u32,
        /// Why the calendar could not answer.
        message: String,
    },

    /// A required request parameter was not supplied.
    #[error("{message}")]
    MissingParameter {
        /// The human-readable message returned to the caller.
        message: String,
    },

    /// A request parameter was supplied with an unusable value.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// The parameter name.
        name: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The data store failed to serve a read or write.
    #[error("Data store error: {message}")]
    StoreError {
        /// A description of the store failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
