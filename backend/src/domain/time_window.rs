//! Calendar month windows used to bucket records.
//!
//! Windows always cover whole calendar months; the in-progress month still
//! ends on its last calendar day.

use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::domain::errors::ValidationError;

/// A calendar month, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=9999).contains(&year) {
            return Err(ValidationError::InvalidYear(year.to_string()));
        }
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(month.to_string()));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month before this one, wrapping January into December of the previous year
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last calendar day, accounting for month length and leap years
    pub fn last_day(self) -> NaiveDate {
        let next_month_start = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        next_month_start
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn window(self) -> Period {
        Period {
            start: self.first_day(),
            end: self.last_day(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Closed date interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Month the window starts in
    pub fn year_month(&self) -> YearMonth {
        YearMonth::of(self.start)
    }

    /// Smallest window covering both periods
    pub fn span(&self, other: &Period) -> Period {
        Period {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// First to last day of the given month
pub fn month_window(year: i32, month: u32) -> Result<Period, ValidationError> {
    Ok(YearMonth::new(year, month)?.window())
}

/// Windows for the `n` months ending with the anchor's month, oldest first.
///
/// `n <= 0` yields no windows. `n` is clamped to the months between January
/// of year 1 and the anchor, so the result is bounded whatever the caller passes.
pub fn last_n_months(n: i64, anchor: NaiveDate) -> Vec<Period> {
    let available = (i64::from(anchor.year()) - 1) * 12 + i64::from(anchor.month());
    let count = n.min(available);
    if count <= 0 {
        return Vec::new();
    }

    let mut months = Vec::new();
    let mut current = YearMonth::of(anchor);
    for _ in 0..count {
        months.push(current.window());
        current = current.previous();
    }
    months.reverse();
    months
}
