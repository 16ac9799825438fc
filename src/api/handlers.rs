//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints and the
//! synchronous builders that assemble each response from the store and the
//! calculation functions.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{WorkingDays, compute_payroll, resolve_timing, resolve_working_days};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, Employee, EmployeeProfile, PayrollRecord, TimingConfig,
};

use super::request::{
    EmployeeDetailsQuery, MonthQuery, PendingDaysQuery, ReportParams, ReportQuery,
};
use super::response::{
    ApiError, ApiErrorResponse, AttendanceDaysResponse, DailyRow, DateRange,
    EmployeeDetailsResponse, OfficesResponse, PendingDaysResponse, PositionsResponse,
    ReportResponse, ReportRow, ReportSummary, WorkingDaysResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/payroll/reports", get(reports_handler))
        .route(
            "/api/payroll/employee/:employee_id",
            get(employee_details_handler),
        )
        .route("/api/payroll/offices", get(offices_handler))
        .route("/api/payroll/positions", get(positions_handler))
        .route("/api/payroll/generate", post(generate_handler))
        .route("/api/payroll/attendance-days", get(attendance_days_handler))
        .route("/api/payroll/pending-days", get(pending_days_handler))
        .route("/api/holidays/working-days", get(working_days_handler))
        .with_state(state)
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn query_rejected(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string rejected"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text)).into_response()
}

fn failed(correlation_id: Uuid, err: EngineError, context: &str) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "{}", context
    );
    ApiErrorResponse::from(err).into_response()
}

/// Handler for GET /api/payroll/reports.
async fn reports_handler(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll report request");

    match query {
        Ok(Query(query)) => run_report(&state, correlation_id, query),
        Err(rejection) => query_rejected(correlation_id, rejection),
    }
}

/// Handler for POST /api/payroll/generate.
///
/// Takes the report parameters from an optional JSON body; query string
/// parameters override body fields of the same name.
async fn generate_handler(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll generation request");

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejected(correlation_id, rejection),
    };

    let from_body = if body.iter().all(u8::is_ascii_whitespace) {
        ReportQuery::default()
    } else {
        match serde_json::from_slice::<ReportQuery>(&body) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    error = %err,
                    "JSON body rejected"
                );
                return ApiErrorResponse::bad_request(ApiError::malformed_json(format!(
                    "Invalid JSON body: {}",
                    err
                )))
                .into_response();
            }
        }
    };

    run_report(&state, correlation_id, query.merged_over(from_body))
}

fn run_report(state: &AppState, correlation_id: Uuid, query: ReportQuery) -> Response {
    let start_time = Instant::now();
    let result = query
        .validate(state.config().policy())
        .and_then(|params| build_report(state, &params));

    match result {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                employees = report.data.len(),
                from_date = %report.date_range.from_date,
                to_date = %report.date_range.to_date,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll report completed"
            );
            json_ok(report)
        }
        Err(err) => failed(correlation_id, err, "Payroll report failed"),
    }
}

/// Handler for GET /api/payroll/employee/:employee_id.
async fn employee_details_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<EmployeeDetailsQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Processing employee payroll details request"
    );

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejected(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = query
        .validate()
        .and_then(|(from, to)| build_employee_details(&state, &employee_id, from, to));

    match result {
        Ok(details) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                days = details.daily_rows.len(),
                net_salary = %details.summary.net_salary,
                duration_us = start_time.elapsed().as_micros(),
                "Employee payroll details completed"
            );
            json_ok(details)
        }
        Err(err) => failed(correlation_id, err, "Employee payroll details failed"),
    }
}

/// Handler for GET /api/payroll/offices.
async fn offices_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().offices() {
        Ok(data) => json_ok(OfficesResponse {
            success: true,
            data,
        }),
        Err(err) => failed(correlation_id, err, "Office listing failed"),
    }
}

/// Handler for GET /api/payroll/positions.
async fn positions_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().positions() {
        Ok(data) => json_ok(PositionsResponse {
            success: true,
            data,
        }),
        Err(err) => failed(correlation_id, err, "Position listing failed"),
    }
}

/// Handler for GET /api/payroll/attendance-days.
async fn attendance_days_handler(
    State(state): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejected(correlation_id, rejection),
    };

    let result = query.validate().and_then(|(year, month)| {
        let days = state.store().attendance_dates(None, year, month)?;
        Ok(AttendanceDaysResponse {
            success: true,
            year,
            month,
            days,
        })
    });

    match result {
        Ok(response) => json_ok(response),
        Err(err) => failed(correlation_id, err, "Attendance days lookup failed"),
    }
}

/// Handler for GET /api/payroll/pending-days.
async fn pending_days_handler(
    State(state): State<AppState>,
    query: Result<Query<PendingDaysQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejected(correlation_id, rejection),
    };

    let result = query
        .validate()
        .and_then(|(employee_id, year, month)| {
            build_pending_days(&state, employee_id, year, month)
        });

    match result {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %response.employee_id,
                pending = response.absent_days,
                "Pending attendance days computed"
            );
            json_ok(response)
        }
        Err(err) => failed(correlation_id, err, "Pending attendance days failed"),
    }
}

/// Handler for GET /api/holidays/working-days.
async fn working_days_handler(
    State(state): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejected(correlation_id, rejection),
    };

    match query.validate() {
        Ok((year, month)) => {
            let resolved = month_working_days(&state, year, month);
            json_ok(WorkingDaysResponse {
                year,
                month,
                working_days: resolved.count(),
                fallback: resolved.fallback,
                days: resolved.days,
            })
        }
        Err(err) => failed(correlation_id, err, "Working days lookup failed"),
    }
}

fn month_working_days(state: &AppState, year: i32, month: u32) -> WorkingDays {
    let config = state.config();
    resolve_working_days(
        config.calendar(),
        year,
        month,
        &config.policy().fallback_weekly_off,
    )
}

/// Resolves an employee's timing, looking up their office and position
/// only when they carry no timing of their own.
fn employee_timing(state: &AppState, employee: &Employee) -> EngineResult<TimingConfig> {
    let entry = match (employee.timing, employee.placement()) {
        (None, Some((office_id, position_id))) => {
            state.store().office_position_timing(office_id, position_id)?
        }
        _ => None,
    };
    Ok(resolve_timing(
        employee,
        entry.as_ref(),
        state.config().default_timing(),
    ))
}

/// Builds a report page and upserts one payroll row per employee on it.
///
/// Salaries are prorated over the working days of `from`'s month.
fn build_report(state: &AppState, params: &ReportParams) -> EngineResult<ReportResponse> {
    let store = state.store();
    let policy = state.config().policy();
    let (year, month) = (params.from.year(), params.from.month());
    let date_range = DateRange {
        from_date: params.from,
        to_date: params.to,
    };

    let profiles =
        store.employees_with_attendance(params.from, params.to, &params.filter, params.page)?;
    if profiles.is_empty() {
        return Ok(ReportResponse {
            success: true,
            data: vec![],
            summary: None,
            message: Some("No employees found".to_string()),
            date_range,
        });
    }

    let working_days = month_working_days(state, year, month);
    let now = Utc::now();
    let mut rows = Vec::with_capacity(profiles.len());

    for profile in profiles {
        let EmployeeProfile {
            employee,
            office_name,
            position_title,
        } = profile;

        let records = store.attendance_between(&employee.id, params.from, params.to)?;
        let timing = employee_timing(state, &employee)?;
        let computation =
            compute_payroll(&employee, &records, timing, working_days.count(), policy)?;

        store.upsert_payroll(PayrollRecord::from_result(
            &computation.result,
            month,
            year,
            now,
        ))?;

        rows.push(ReportRow {
            name: employee.name,
            email: employee.email,
            office_name,
            position_title,
            payroll: computation.result,
        });
    }

    let total_net_salary = checked_total(rows.iter().map(|r| r.payroll.net_salary), "net salary")?;
    let total_deductions =
        checked_total(rows.iter().map(|r| r.payroll.total_deductions), "deductions")?;

    Ok(ReportResponse {
        success: true,
        summary: Some(ReportSummary {
            total_employees: rows.len(),
            total_net_salary,
            total_deductions,
            net_payroll: total_net_salary,
            working_days: working_days.count(),
            working_days_fallback: working_days.fallback,
        }),
        data: rows,
        message: None,
        date_range,
    })
}

fn checked_total(mut amounts: impl Iterator<Item = Decimal>, label: &str) -> EngineResult<Decimal> {
    amounts
        .try_fold(Decimal::ZERO, |sum, amount| sum.checked_add(amount))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("total {label} overflows"),
        })
}

/// Builds the per-day breakdown of one employee.
///
/// Every working day of `from`'s month inside `from..=to` gets a row; days
/// without an attendance record are classified absent and flagged as not
/// recorded. The summary is computed over exactly those rows.
fn build_employee_details(
    state: &AppState,
    employee_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> EngineResult<EmployeeDetailsResponse> {
    let store = state.store();
    let employee = store
        .employee(employee_id)?
        .ok_or_else(|| EngineError::EmployeeNotFound {
            employee_id: employee_id.to_string(),
        })?;

    let working_days = month_working_days(state, from.year(), from.month());
    let recorded: HashMap<NaiveDate, AttendanceRecord> = store
        .attendance_between(&employee.id, from, to)?
        .into_iter()
        .map(|r| (r.date, r))
        .collect();

    let records: Vec<AttendanceRecord> = working_days
        .days
        .iter()
        .filter(|d| **d >= from && **d <= to)
        .map(|&date| {
            recorded.get(&date).cloned().unwrap_or_else(|| AttendanceRecord {
                employee_id: employee.id.clone(),
                date,
                punch_in: None,
                punch_out: None,
            })
        })
        .collect();

    let timing = employee_timing(state, &employee)?;
    let computation = compute_payroll(
        &employee,
        &records,
        timing,
        working_days.count(),
        state.config().policy(),
    )?;

    let daily_rows = computation
        .metrics
        .days
        .iter()
        .map(|day| {
            let record = recorded.get(&day.date);
            DailyRow {
                date: day.date,
                status: day.status,
                code: day.status.code().to_string(),
                recorded: record.is_some(),
                punch_in: record.and_then(|r| r.punch_in),
                punch_out: record.and_then(|r| r.punch_out),
                worked_minutes: day.worked_minutes,
                late_minutes: day.late_minutes,
            }
        })
        .collect();

    Ok(EmployeeDetailsResponse {
        success: true,
        audit_trace: computation.audit_steps(),
        summary: computation.result,
        employee,
        timing,
        working_days: working_days.count(),
        working_days_fallback: working_days.fallback,
        daily_rows,
        date_range: DateRange {
            from_date: from,
            to_date: to,
        },
    })
}

/// Lists the working days of a month on which an employee has no record.
fn build_pending_days(
    state: &AppState,
    employee_id: String,
    year: i32,
    month: u32,
) -> EngineResult<PendingDaysResponse> {
    let store = state.store();
    if store.employee(&employee_id)?.is_none() {
        return Err(EngineError::EmployeeNotFound { employee_id });
    }

    let working_days = month_working_days(state, year, month);
    let recorded: HashSet<NaiveDate> = store
        .attendance_dates(Some(&employee_id), year, month)?
        .into_iter()
        .collect();

    let pending: Vec<NaiveDate> = working_days
        .days
        .iter()
        .copied()
        .filter(|d| !recorded.contains(d))
        .collect();
    let pending_count = pending.len() as u32;

    Ok(PendingDaysResponse {
        success: true,
        employee_id,
        year,
        month,
        working_days: working_days.count(),
        attendance_recorded: working_days.count() - pending_count,
        pending_attendance_dates: pending,
        absent_days: pending_count,
        working_days_fallback: working_days.fallback,
    })
}
