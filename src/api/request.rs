//! Request types for the payroll API.
//!
//! Query strings and JSON bodies deserialize into the loose `*Query` types
//! below, with every field optional. Each type validates itself into the
//! parameters a handler works with, reporting missing or unusable values as
//! [`EngineError`]s.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::PayrollPolicy;
use crate::error::{EngineError, EngineResult};
use crate::store::{EmployeeFilter, PageRequest};

/// Parameters of a payroll report, from the query string or a JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    /// First date of the period (inclusive).
    #[serde(default, alias = "fromDate")]
    pub from_date: Option<NaiveDate>,
    /// Last date of the period (inclusive).
    #[serde(default, alias = "toDate")]
    pub to_date: Option<NaiveDate>,
    /// Office id filter.
    #[serde(default)]
    pub office: Option<String>,
    /// Position id filter.
    #[serde(default)]
    pub position: Option<String>,
    /// Page number, 1-based.
    #[serde(default)]
    pub page: Option<u32>,
    /// Rows per page.
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Validated report parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportParams {
    /// First date of the period.
    pub from: NaiveDate,
    /// Last date of the period.
    pub to: NaiveDate,
    /// Office and position restrictions.
    pub filter: EmployeeFilter,
    /// The page to return.
    pub page: PageRequest,
}

impl ReportQuery {
    /// Fills any field missing here from `fallback`.
    pub fn merged_over(self, fallback: ReportQuery) -> ReportQuery {
        ReportQuery {
            from_date: self.from_date.or(fallback.from_date),
            to_date: self.to_date.or(fallback.to_date),
            office: non_empty(self.office).or(non_empty(fallback.office)),
            position: non_empty(self.position).or(non_empty(fallback.position)),
            page: self.page.or(fallback.page),
            limit: self.limit.or(fallback.limit),
        }
    }

    /// Checks the query against the policy's paging limits.
    pub fn validate(self, policy: &PayrollPolicy) -> EngineResult<ReportParams> {
        let (from, to) = date_range(self.from_date, self.to_date)?;

        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err(invalid_parameter("page", "must be at least 1"));
        }
        let limit = self.limit.unwrap_or(policy.default_page_size);
        if limit == 0 || limit > policy.max_page_size {
            return Err(invalid_parameter(
                "limit",
                &format!("must be between 1 and {}", policy.max_page_size),
            ));
        }

        Ok(ReportParams {
            from,
            to,
            filter: EmployeeFilter {
                office_id: non_empty(self.office),
                position_id: non_empty(self.position),
            },
            page: PageRequest { page, limit },
        })
    }
}

/// Query of the per-employee breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDetailsQuery {
    /// First date of the period (inclusive).
    #[serde(default, alias = "fromDate")]
    pub from_date: Option<NaiveDate>,
    /// Last date of the period (inclusive).
    #[serde(default, alias = "toDate")]
    pub to_date: Option<NaiveDate>,
}

impl EmployeeDetailsQuery {
    /// Returns the validated `(from, to)` range.
    pub fn validate(self) -> EngineResult<(NaiveDate, NaiveDate)> {
        date_range(self.from_date, self.to_date)
    }
}

/// A year and month, as used by the month-scoped endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthQuery {
    /// Calendar year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Month number (1-12).
    #[serde(default)]
    pub month: Option<u32>,
}

impl MonthQuery {
    /// Returns the validated `(year, month)`.
    pub fn validate(self) -> EngineResult<(i32, u32)> {
        match (self.year, self.month) {
            (Some(year), Some(month)) => Ok((year, validate_month(year, month)?)),
            _ => Err(EngineError::MissingParameter {
                message: "year and month are required".to_string(),
            }),
        }
    }
}

/// Query of the pending-days endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDaysQuery {
    /// The employee to check.
    #[serde(default, alias = "employeeId")]
    pub employee_id: Option<String>,
    /// Calendar year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Month number (1-12).
    #[serde(default)]
    pub month: Option<u32>,
}

impl PendingDaysQuery {
    /// Returns the validated `(employee_id, year, month)`.
    pub fn validate(self) -> EngineResult<(String, i32, u32)> {
        match (non_empty(self.employee_id), self.year, self.month) {
            (Some(employee_id), Some(year), Some(month)) => {
                Ok((employee_id, year, validate_month(year, month)?))
            }
            _ => Err(EngineError::MissingParameter {
                message: "employee_id, year and month are required".to_string(),
            }),
        }
    }
}

fn date_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> EngineResult<(NaiveDate, NaiveDate)> {
    let (Some(from), Some(to)) = (from, to) else {
        return Err(EngineError::MissingParameter {
            message: "From date and to date are required".to_string(),
        });
    };
    if from > to {
        return Err(EngineError::InvalidPeriod {
            message: format!("from_date {} is after to_date {}", from, to),
        });
    }
    Ok((from, to))
}

fn validate_month(year: i32, month: u32) -> EngineResult<u32> {
    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        return Err(invalid_parameter(
            "month",
            &format!("{}-{} is not a valid month", year, month),
        ));
    }
    Ok(month)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn invalid_parameter(name: &str, message: &str) -> EngineError {
    EngineError::InvalidParameter {
        name: name.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn march() -> ReportQuery {
        ReportQuery {
            from_date: Some(date(1)),
            to_date: Some(date(31)),
            ..ReportQuery::default()
        }
    }

    #[test]
    fn test_deserialize_report_query_with_aliases() {
        let json = r#"{"fromDate": "2026-03-01", "toDate": "2026-03-31", "page": 2}"#;
        let query: ReportQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.from_date, Some(date(1)));
        assert_eq!(query.to_date, Some(date(31)));
        assert_eq!(query.page, Some(2));
        assert!(query.limit.is_none());
    }

    #[test]
    fn test_report_defaults_from_policy() {
        let params = march().validate(&PayrollPolicy::default()).unwrap();
        assert_eq!(params.page, PageRequest { page: 1, limit: 10 });
        assert_eq!(params.filter, EmployeeFilter::default());
    }

    #[test]
    fn test_missing_dates_rejected() {
        let query = ReportQuery {
            from_date: Some(date(1)),
            ..ReportQuery::default()
        };
        match query.validate(&PayrollPolicy::default()) {
            Err(EngineError::MissingParameter { message }) => {
                assert_eq!(message, "From date and to date are required");
            }
            other => panic!("Expected MissingParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_reversed_range_rejected() {
        let query = ReportQuery {
            from_date: Some(date(31)),
            to_date: Some(date(1)),
            ..ReportQuery::default()
        };
        assert!(matches!(
            query.validate(&PayrollPolicy::default()),
            Err(EngineError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_paging_bounds() {
        let policy = PayrollPolicy::default();

        let zero_page = ReportQuery {
            page: Some(0),
            ..march()
        };
        assert!(matches!(
            zero_page.validate(&policy),
            Err(EngineError::InvalidParameter { name, .. }) if name == "page"
        ));

        let huge_limit = ReportQuery {
            limit: Some(policy.max_page_size + 1),
            ..march()
        };
        assert!(matches!(
            huge_limit.validate(&policy),
            Err(EngineError::InvalidParameter { name, .. }) if name == "limit"
        ));
    }

    #[test]
    fn test_query_wins_over_body() {
        let query = ReportQuery {
            office: Some("OFF-BLR".to_string()),
            page: Some(2),
            ..ReportQuery::default()
        };
        let body = ReportQuery {
            office: Some("OFF-PNQ".to_string()),
            position: Some("POS-DEV".to_string()),
            page: Some(5),
            ..march()
        };

        let merged = query.merged_over(body);
        assert_eq!(merged.from_date, Some(date(1)));
        assert_eq!(merged.office.as_deref(), Some("OFF-BLR"));
        assert_eq!(merged.position.as_deref(), Some("POS-DEV"));
        assert_eq!(merged.page, Some(2));
    }

    #[test]
    fn test_blank_filters_ignored() {
        let query = ReportQuery {
            office: Some(String::new()),
            position: Some("  ".to_string()),
            ..march()
        };
        let params = query.validate(&PayrollPolicy::default()).unwrap();
        assert_eq!(params.filter, EmployeeFilter::default());
    }

    #[test]
    fn test_month_query() {
        let ok = MonthQuery {
            year: Some(2026),
            month: Some(3),
        };
        assert_eq!(ok.validate().unwrap(), (2026, 3));

        let bad = MonthQuery {
            year: Some(2026),
            month: Some(13),
        };
        assert!(matches!(
            bad.validate(),
            Err(EngineError::InvalidParameter { .. })
        ));

        let missing = MonthQuery {
            year: None,
            month: Some(3),
        };
        assert!(matches!(
            missing.validate(),
            Err(EngineError::MissingParameter { .. })
        ));
    }

    #[test]
    fn test_pending_days_query_requires_employee() {
        let query = PendingDaysQuery {
            employee_id: Some(String::new()),
            year: Some(2026),
            month: Some(3),
        };
        assert!(matches!(
            query.validate(),
            Err(EngineError::MissingParameter { .. })
        ));
    }
}
