//! Working-days resolution.
//!
//! Salaries are prorated over the working days of a month. The working days
//! come from a [`WorkingDaysSource`]; when the source cannot answer, the
//! resolver falls back to a fixed weekly pattern so payroll can still run.
//! The fallback is the same for callers that want a count and callers that
//! want the dates: the count is always the length of the date list.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::HolidayCalendar;
use crate::error::{EngineError, EngineResult};

/// Something that can list the working dates of a month.
pub trait WorkingDaysSource {
    /// Returns the working dates of `month` in `year`, ascending.
    fn working_days(&self, year: i32, month: u32) -> EngineResult<Vec<NaiveDate>>;
}

/// The working days of a month and whether they came from the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDays {
    /// Calendar year.
    pub year: i32,
    /// Month number (1-12).
    pub month: u32,
    /// Working dates, ascending.
    pub days: Vec<NaiveDate>,
    /// True when the source failed and the weekly pattern was used instead.
    pub fallback: bool,
}

impl WorkingDays {
    /// Number of working days.
    pub fn count(&self) -> u32 {
        self.days.len() as u32
    }

    /// Whether `date` is one of the working days.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.binary_search(&date).is_ok()
    }
}

/// Returns every date of a month, or an error for an invalid year/month.
pub fn dates_in_month(year: i32, month: u32) -> EngineResult<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| EngineError::InvalidPeriod {
        message: format!("{}-{:02} is not a valid month", year, month),
    })?;

    Ok(first
        .iter_days()
        .take_while(|d| d.month() == month)
        .collect())
}

/// Returns every date of a month that is not one of `weekly_off`.
///
/// An invalid month yields no dates.
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::fallback_working_days;
/// use chrono::Weekday;
///
/// // February 2027 starts on a Monday and has four Sundays.
/// let days = fallback_working_days(2027, 2, &[Weekday::Sun]);
/// assert_eq!(days.len(), 24);
/// ```
pub fn fallback_working_days(year: i32, month: u32, weekly_off: &[Weekday]) -> Vec<NaiveDate> {
    dates_in_month(year, month)
        .map(|dates| {
            dates
                .into_iter()
                .filter(|d| !weekly_off.contains(&d.weekday()))
                .collect()
        })
        .unwrap_or_default()
}

/// Resolves the working days of a month, falling back on source failure.
///
/// # Arguments
///
/// * `source` - Where working days normally come from
/// * `year` - Calendar year
/// * `month` - Month number (1-12)
/// * `fallback_weekly_off` - Weekly off days assumed by the fallback
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::{resolve_working_days, WorkingDaysSource};
/// use attendance_payroll::error::{EngineError, EngineResult};
/// use chrono::{NaiveDate, Weekday};
///
/// struct Offline;
///
/// impl WorkingDaysSource for Offline {
///     fn working_days(&self, year: i32, month: u32) -> EngineResult<Vec<NaiveDate>> {
///         Err(EngineError::CalendarUnavailable {
///             year,
///             month,
///             message: "offline".to_string(),
///         })
///     }
/// }
///
/// let resolved = resolve_working_days(&Offline, 2027, 2, &[Weekday::Sun]);
/// assert!(resolved.fallback);
/// assert_eq!(resolved.count(), 24);
/// ```
pub fn resolve_working_days(
    source: &dyn WorkingDaysSource,
    year: i32,
    month: u32,
    fallback_weekly_off: &[Weekday],
) -> WorkingDays {
    match source.working_days(year, month) {
        Ok(mut days) => {
            days.sort();
            days.dedup();
            WorkingDays {
                year,
                month,
                days,
                fallback: false,
            }
        }
        Err(err) => {
            let days = fallback_working_days(year, month, fallback_weekly_off);
            warn!(
                year,
                month,
                error = %err,
                fallback_days = days.len(),
                "Working-days lookup failed, using fallback"
            );
            WorkingDays {
                year,
                month,
                days,
                fallback: true,
            }
        }
    }
}

impl WorkingDaysSource for HolidayCalendar {
    fn working_days(&self, year: i32, month: u32) -> EngineResult<Vec<NaiveDate>> {
        let dates = dates_in_month(year, month)?;

        if let (Some(coverage), Some(first), Some(last)) =
            (self.coverage, dates.first(), dates.last())
        {
            if *first < coverage.from || *last > coverage.to {
                return Err(EngineError::CalendarUnavailable {
                    year,
                    month,
                    message: format!(
                        "outside calendar coverage {} to {}",
                        coverage.from, coverage.to
                    ),
                });
            }
        }

        Ok(dates
            .into_iter()
            .filter(|d| !self.weekly_off.contains(&d.weekday()))
            .filter(|d| self.holiday_on(*d).is_none())
            .collect())
    }
}
