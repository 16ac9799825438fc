//! Response types for the payroll API.
//!
//! This module defines the JSON bodies returned by each endpoint, the error
//! body, and the mapping from [`EngineError`] to an HTTP status.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{
    AuditStep, DailyStatus, Employee, Office, PayrollResult, Position, TimingConfig,
};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    error.to_string(),
                ),
            },
            EngineError::EmployeeNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EMPLOYEE_NOT_FOUND", error.to_string()),
            },
            EngineError::MissingParameter { message } => {
                ApiErrorResponse::bad_request(ApiError::new("MISSING_PARAMETER", message))
            }
            EngineError::InvalidParameter { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_PARAMETER", error.to_string()))
            }
            EngineError::InvalidPeriod { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_PERIOD", error.to_string()))
            }
            EngineError::CalendarUnavailable { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CALENDAR_UNAVAILABLE",
                    "Working-days calendar unavailable",
                    error.to_string(),
                ),
            },
            EngineError::StoreError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORE_ERROR", "Data store failure", message),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}

/// One employee's line in a payroll report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Employee name.
    pub name: String,
    /// Employee email, if known.
    pub email: Option<String>,
    /// Office name, when placed.
    pub office_name: Option<String>,
    /// Position title, when assigned.
    pub position_title: Option<String>,
    /// The computed payroll figures.
    #[serde(flatten)]
    pub payroll: PayrollResult,
}

/// Totals over the rows of a report page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Rows on the page.
    pub total_employees: usize,
    /// Sum of net salaries.
    pub total_net_salary: Decimal,
    /// Sum of deductions.
    pub total_deductions: Decimal,
    /// Net amount payable for the page.
    pub net_payroll: Decimal,
    /// Working days the salaries were prorated over.
    pub working_days: u32,
    /// Whether the working days came from the fallback pattern.
    pub working_days_fallback: bool,
}

/// The requested period, echoed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First date (inclusive).
    pub from_date: NaiveDate,
    /// Last date (inclusive).
    pub to_date: NaiveDate,
}

/// Body of the report and generate endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResponse {
    /// Always true on success.
    pub success: bool,
    /// One row per employee on the page.
    pub data: Vec<ReportRow>,
    /// Page totals, absent when the page is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ReportSummary>,
    /// Set when the page is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The requested period.
    pub date_range: DateRange,
}

/// One working day in an employee breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRow {
    /// The working day.
    pub date: NaiveDate,
    /// Derived status.
    pub status: DailyStatus,
    /// Short status code (`P`, `L`, `HD`, `A`).
    pub code: String,
    /// False when no attendance row exists for the day.
    pub recorded: bool,
    /// Punch-in time, if any.
    pub punch_in: Option<NaiveTime>,
    /// Punch-out time, if any.
    pub punch_out: Option<NaiveTime>,
    /// Minutes between punches.
    pub worked_minutes: i64,
    /// Minutes past reporting time at punch-in.
    pub late_minutes: i64,
}

/// Body of the per-employee breakdown endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDetailsResponse {
    /// Always true on success.
    pub success: bool,
    /// The employee.
    pub employee: Employee,
    /// The timing the days were classified against.
    pub timing: TimingConfig,
    /// Working days in the month.
    pub working_days: u32,
    /// Whether the working days came from the fallback pattern.
    pub working_days_fallback: bool,
    /// One row per working day in the period.
    pub daily_rows: Vec<DailyRow>,
    /// Payroll over the daily rows.
    pub summary: PayrollResult,
    /// Every calculation step behind `summary`.
    pub audit_trace: Vec<AuditStep>,
    /// The requested period.
    pub date_range: DateRange,
}

/// Body of the office list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficesResponse {
    /// Always true on success.
    pub success: bool,
    /// Offices ordered by name.
    pub data: Vec<Office>,
}

/// Body of the position list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionsResponse {
    /// Always true on success.
    pub success: bool,
    /// Positions ordered by title.
    pub data: Vec<Position>,
}

/// Body of the attendance-days endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDaysResponse {
    /// Always true on success.
    pub success: bool,
    /// Calendar year.
    pub year: i32,
    /// Month number.
    pub month: u32,
    /// Dates with at least one attendance row, ascending.
    pub days: Vec<NaiveDate>,
}

/// Body of the pending-days endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDaysResponse {
    /// Always true on success.
    pub success: bool,
    /// The employee checked.
    pub employee_id: String,
    /// Calendar year.
    pub year: i32,
    /// Month number.
    pub month: u32,
    /// Working days in the month.
    pub working_days: u32,
    /// Working days with an attendance row.
    pub attendance_recorded: u32,
    /// Working days without an attendance row, ascending.
    pub pending_attendance_dates: Vec<NaiveDate>,
    /// Count of pending dates.
    pub absent_days: u32,
    /// Whether the working days came from the fallback pattern.
    pub working_days_fallback: bool,
}

/// Body of the working-days endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDaysResponse {
    /// Calendar year.
    pub year: i32,
    /// Month number.
    pub month: u32,
    /// Number of working days.
    pub working_days: u32,
    /// Working dates, ascending.
    pub days: Vec<NaiveDate>,
    /// Whether the dates came from the fallback pattern.
    pub fallback: bool,
}
