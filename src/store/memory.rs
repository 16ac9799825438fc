//! In-memory payroll store.

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use chrono::{Datelike, NaiveDate};

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, Employee, EmployeeProfile, Office, OfficePositionTiming, PayrollRecord,
    Position,
};

use super::{EmployeeFilter, PageRequest, PayrollStore};

type PayrollKey = (String, u32, i32);

/// A [`PayrollStore`] holding everything in memory.
///
/// Directory and attendance data are fixed at construction; payroll rows
/// are written by computations and guarded by a lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    offices: Vec<Office>,
    positions: Vec<Position>,
    office_positions: Vec<OfficePositionTiming>,
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
    payroll: RwLock<HashMap<PayrollKey, PayrollRecord>>,
}

impl InMemoryStore {
    /// Creates a store from directory and attendance data.
    pub fn new(
        offices: Vec<Office>,
        positions: Vec<Position>,
        office_positions: Vec<OfficePositionTiming>,
        employees: Vec<Employee>,
        attendance: Vec<AttendanceRecord>,
    ) -> Self {
        let mut attendance = attendance;
        attendance.sort_by(|a, b| a.date.cmp(&b.date));
        Self {
            offices,
            positions,
            office_positions,
            employees,
            attendance,
            payroll: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a store seeded from a loaded configuration.
    pub fn from_config(config: &PayrollConfig) -> Self {
        let directory = config.directory();
        Self::new(
            directory.offices.clone(),
            directory.positions.clone(),
            directory.office_positions.clone(),
            directory.employees.clone(),
            config.attendance().to_vec(),
        )
    }

    fn profile(&self, employee: &Employee) -> EmployeeProfile {
        let office_name = employee.office_id.as_ref().and_then(|id| {
            self.offices
                .iter()
                .find(|o| &o.id == id)
                .map(|o| o.name.clone())
        });
        let position_title = employee.position_id.as_ref().and_then(|id| {
            self.positions
                .iter()
                .find(|p| &p.id == id)
                .map(|p| p.title.clone())
        });
        EmployeeProfile {
            employee: employee.clone(),
            office_name,
            position_title,
        }
    }
}

fn poisoned(table: &str) -> EngineError {
    EngineError::StoreError {
        message: format!("{} table lock poisoned", table),
    }
}

impl PayrollStore for InMemoryStore {
    fn employees_with_attendance(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        filter: &EmployeeFilter,
        page: PageRequest,
    ) -> EngineResult<Vec<EmployeeProfile>> {
        let attending: BTreeSet<&str> = self
            .attendance
            .iter()
            .filter(|r| r.date >= from && r.date <= to)
            .map(|r| r.employee_id.as_str())
            .collect();

        let mut matched: Vec<&Employee> = self
            .employees
            .iter()
            .filter(|e| attending.contains(e.id.as_str()) && filter.matches(e))
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        Ok(matched
            .into_iter()
            .skip(page.offset())
            .take(page.limit as usize)
            .map(|e| self.profile(e))
            .collect())
    }

    fn employee(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
        Ok(self.employees.iter().find(|e| e.id == employee_id).cloned())
    }

    fn office_position_timing(
        &self,
        office_id: &str,
        position_id: &str,
    ) -> EngineResult<Option<OfficePositionTiming>> {
        Ok(self
            .office_positions
            .iter()
            .find(|t| t.office_id == office_id && t.position_id == position_id)
            .cloned())
    }

    fn attendance_between(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        Ok(self
            .attendance
            .iter()
            .filter(|r| r.employee_id == employee_id && r.date >= from && r.date <= to)
            .cloned()
            .collect())
    }

    fn attendance_dates(
        &self,
        employee_id: Option<&str>,
        year: i32,
        month: u32,
    ) -> EngineResult<Vec<NaiveDate>> {
        let dates: BTreeSet<NaiveDate> = self
            .attendance
            .iter()
            .filter(|r| r.date.year() == year && r.date.month() == month)
            .filter(|r| employee_id.is_none_or(|id| r.employee_id == id))
            .map(|r| r.date)
            .collect();
        Ok(dates.into_iter().collect())
    }

    fn offices(&self) -> EngineResult<Vec<Office>> {
        let mut offices = self.offices.clone();
        offices.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(offices)
    }

    fn positions(&self) -> EngineResult<Vec<Position>> {
        let mut positions = self.positions.clone();
        positions.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(positions)
    }

    fn upsert_payroll(&self, record: PayrollRecord) -> EngineResult<PayrollRecord> {
        let mut table = self.payroll.write().map_err(|_| poisoned("payroll"))?;

        let stored = match table.get(&record.key()) {
            Some(existing) => PayrollRecord {
                created_at: existing.created_at,
                ..record
            },
            None => record,
        };
        table.insert(stored.key(), stored.clone());
        Ok(stored)
    }

    fn payroll(
        &self,
        employee_id: &str,
        month: u32,
        year: i32,
    ) -> EngineResult<Option<PayrollRecord>> {
        let table = self.payroll.read().map_err(|_| poisoned("payroll"))?;
        Ok(table
            .get(&(employee_id.to_string(), month, year))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime, Utc};
    use rust_decimal::Decimal;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn employee(id: &str, name: &str, office: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: name.to_string(),
            email: None,
            office_id: Some(office.to_string()),
            position_id: Some("POS1".to_string()),
            monthly_salary: Decimal::from(30000),
            joining_date: None,
            timing: None,
        }
    }

    fn record(employee_id: &str, d: NaiveDate) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: employee_id.to_string(),
            date: d,
            punch_in: NaiveTime::from_hms_opt(9, 0, 0),
            punch_out: NaiveTime::from_hms_opt(17, 0, 0),
        }
    }

    fn store() -> InMemoryStore {
        InMemoryStore::new(
            vec![
                Office {
                    id: "OFF2".to_string(),
                    name: "Pune".to_string(),
                },
                Office {
                    id: "OFF1".to_string(),
                    name: "Bengaluru".to_string(),
                },
            ],
            vec![Position {
                id: "POS1".to_string(),
                title: "Developer".to_string(),
            }],
            vec![],
            vec![
                employee("E3", "Zara", "OFF1"),
                employee("E1", "Anil", "OFF2"),
                employee("E2", "Meera", "OFF1"),
                employee("E4", "Nobody", "OFF1"),
            ],
            vec![
                record("E3", date(5)),
                record("E1", date(2)),
                record("E2", date(3)),
                record("E2", date(2)),
                record("E4", NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()),
            ],
        )
    }

    fn page(page: u32, limit: u32) -> PageRequest {
        PageRequest { page, limit }
    }

    fn ids(profiles: &[EmployeeProfile]) -> Vec<&str> {
        profiles.iter().map(|p| p.employee.id.as_str()).collect()
    }

    #[test]
    fn test_employees_with_attendance_ordered_by_name() {
        let store = store();
        let result = store
            .employees_with_attendance(date(1), date(31), &EmployeeFilter::default(), page(1, 10))
            .unwrap();
        assert_eq!(ids(&result), vec!["E1", "E2", "E3"]);
        assert_eq!(result[0].office_name.as_deref(), Some("Pune"));
        assert_eq!(result[0].position_title.as_deref(), Some("Developer"));
    }

    #[test]
    fn test_employees_with_attendance_filtered_and_paged() {
        let store = store();
        let filter = EmployeeFilter {
            office_id: Some("OFF1".to_string()),
            position_id: None,
        };
        let first = store
            .employees_with_attendance(date(1), date(31), &filter, page(1, 1))
            .unwrap();
        let second = store
            .employees_with_attendance(date(1), date(31), &filter, page(2, 1))
            .unwrap();
        let third = store
            .employees_with_attendance(date(1), date(31), &filter, page(3, 1))
            .unwrap();

        assert_eq!(ids(&first), vec!["E2"]);
        assert_eq!(ids(&second), vec!["E3"]);
        assert!(third.is_empty());
    }

    #[test]
    fn test_employees_with_attendance_respects_range() {
        let store = store();
        let result = store
            .employees_with_attendance(date(4), date(31), &EmployeeFilter::default(), page(1, 10))
            .unwrap();
        assert_eq!(ids(&result), vec!["E3"]);
    }

    #[test]
    fn test_attendance_between_is_date_ordered() {
        let store = store();
        let records = store.attendance_between("E2", date(1), date(31)).unwrap();
        let days: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        assert_eq!(days, vec![date(2), date(3)]);
    }

    #[test]
    fn test_attendance_dates_distinct_and_sorted() {
        let store = store();
        assert_eq!(
            store.attendance_dates(None, 2026, 3).unwrap(),
            vec![date(2), date(3), date(5)]
        );
        assert_eq!(
            store.attendance_dates(Some("E2"), 2026, 3).unwrap(),
            vec![date(2), date(3)]
        );
        assert!(store.attendance_dates(None, 2026, 5).unwrap().is_empty());
    }

    #[test]
    fn test_offices_sorted_by_name() {
        let names: Vec<String> = store().offices().unwrap().into_iter().map(|o| o.name).collect();
        assert_eq!(names, vec!["Bengaluru", "Pune"]);
    }

    #[test]
    fn test_unknown_employee_is_none() {
        assert!(store().employee("E404").unwrap().is_none());
        assert_eq!(store().employee("E1").unwrap().unwrap().name, "Anil");
    }

    #[test]
    fn test_upsert_overwrites_and_keeps_created_at() {
        let store = store();
        let first_at = Utc::now();
        let first = PayrollRecord {
            employee_id: "E1".to_string(),
            month: 3,
            year: 2026,
            present_days: 20,
            half_days: 0,
            late_days: 0,
            leaves: 1,
            excess_leaves: 0,
            deductions_amount: Decimal::from(1000),
            net_salary: Decimal::from(29000),
            created_at: first_at,
            updated_at: first_at,
        };
        store.upsert_payroll(first.clone()).unwrap();

        let second_at = first_at + Duration::minutes(5);
        let second = PayrollRecord {
            leaves: 2,
            deductions_amount: Decimal::from(2000),
            net_salary: Decimal::from(28000),
            created_at: second_at,
            updated_at: second_at,
            ..first
        };
        let stored = store.upsert_payroll(second).unwrap();

        assert_eq!(stored.created_at, first_at);
        assert_eq!(stored.updated_at, second_at);
        assert_eq!(stored.leaves, 2);

        let read = store.payroll("E1", 3, 2026).unwrap().unwrap();
        assert_eq!(read, stored);
        assert!(store.payroll("E1", 4, 2026).unwrap().is_none());
    }
}
