//! HTTP API module for the attendance payroll engine.
//!
//! This module provides the REST endpoints for payroll reports, per-employee
//! breakdowns, filter data, attendance coverage and working days.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EmployeeDetailsQuery, MonthQuery, PendingDaysQuery, ReportParams, ReportQuery};
pub use response::{
    ApiError, ApiErrorResponse, AttendanceDaysResponse, DailyRow, DateRange,
    EmployeeDetailsResponse, OfficesResponse, PendingDaysResponse, PositionsResponse,
    ReportResponse, ReportRow, ReportSummary, WorkingDaysResponse,
};
pub use state::AppState;
