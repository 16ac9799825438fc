//! Data store access for the payroll service.
//!
//! Handlers talk to employees, attendance and payroll rows through the
//! [`PayrollStore`] trait. The bundled [`InMemoryStore`] is seeded from the
//! configuration directory.

mod memory;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, Employee, EmployeeProfile, Office, OfficePositionTiming, PayrollRecord,
    Position,
};

pub use memory::InMemoryStore;

/// Optional office and position restrictions for report queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    /// Only employees in this office.
    pub office_id: Option<String>,
    /// Only employees holding this position.
    pub position_id: Option<String>,
}

impl EmployeeFilter {
    /// Whether `employee` passes the filter.
    pub fn matches(&self, employee: &Employee) -> bool {
        let office_ok = self
            .office_id
            .as_ref()
            .is_none_or(|office| employee.office_id.as_ref() == Some(office));
        let position_ok = self
            .position_id
            .as_ref()
            .is_none_or(|position| employee.position_id.as_ref() == Some(position));
        office_ok && position_ok
    }
}

/// A 1-based page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number, starting at 1.
    pub page: u32,
    /// Rows per page.
    pub limit: u32,
}

impl PageRequest {
    /// Rows skipped before this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) as usize * self.limit as usize
    }
}

/// Read and write access to payroll data.
pub trait PayrollStore: Send + Sync {
    /// Employees with at least one attendance record in `from..=to`,
    /// filtered, ordered by name and paginated.
    fn employees_with_attendance(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        filter: &EmployeeFilter,
        page: PageRequest,
    ) -> EngineResult<Vec<EmployeeProfile>>;

    /// Looks up one employee.
    fn employee(&self, employee_id: &str) -> EngineResult<Option<Employee>>;

    /// Timing configured for an office and position pair.
    fn office_position_timing(
        &self,
        office_id: &str,
        position_id: &str,
    ) -> EngineResult<Option<OfficePositionTiming>>;

    /// An employee's attendance records in `from..=to`, ordered by date.
    fn attendance_between(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Distinct dates in a month with at least one attendance record, ascending.
    /// Pass an employee id to restrict to that employee.
    fn attendance_dates(
        &self,
        employee_id: Option<&str>,
        year: i32,
        month: u32,
    ) -> EngineResult<Vec<NaiveDate>>;

    /// All offices ordered by name.
    fn offices(&self) -> EngineResult<Vec<Office>>;

    /// All positions ordered by title.
    fn positions(&self) -> EngineResult<Vec<Position>>;

    /// Inserts or overwrites the payroll row for the record's
    /// (employee, month, year). Returns the row as stored.
    fn upsert_payroll(&self, record: PayrollRecord) -> EngineResult<PayrollRecord>;

    /// Reads a stored payroll row.
    fn payroll(
        &self,
        employee_id: &str,
        month: u32,
        year: i32,
    ) -> EngineResult<Option<PayrollRecord>>;
}
