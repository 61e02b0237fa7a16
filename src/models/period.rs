//! This file defines the `Period` type, a validated year-month pair that
//! selects which calendar month a summary covers.

use std::ops::RangeInclusive;

use time::{Date, Month, OffsetDateTime};

use crate::Error;

/// The earliest year a summary may be requested for.
const MIN_YEAR: i32 = 1900;

/// A validated calendar month, e.g., August 2026.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    year: i32,
    month: Month,
}

impl Period {
    /// Create a period from raw year and month numbers.
    ///
    /// The checks run in a fixed order so the reported reason is
    /// deterministic: the year range first, then the month range, then whether
    /// the pair forms a constructible date.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidPeriod] whose message is
    /// one of "year out of range", "month out of range" or "invalid year-month
    /// combination".
    pub fn new(year: i32, month: i32) -> Result<Self, Error> {
        let max_year = OffsetDateTime::now_utc().year() + 1;

        if !(MIN_YEAR..=max_year).contains(&year) {
            return Err(Error::InvalidPeriod("year out of range".to_string()));
        }

        if !(1..=12).contains(&month) {
            return Err(Error::InvalidPeriod("month out of range".to_string()));
        }

        let month = Month::try_from(month as u8)
            .map_err(|_| Error::InvalidPeriod("invalid year-month combination".to_string()))?;

        // Both components passed their range checks, but the pair is still
        // validated as a whole.
        Date::from_calendar_date(year, month, 1)
            .map_err(|_| Error::InvalidPeriod("invalid year-month combination".to_string()))?;

        Ok(Self { year, month })
    }

    /// The year of the period.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month of the period as a number in `[1, 12]`.
    pub fn month(&self) -> u8 {
        self.month as u8
    }

    /// The inclusive range of dates the period covers, from the first day of
    /// the month to the last.
    pub fn date_range(&self) -> RangeInclusive<Date> {
        // Both calls are infallible for a validated period. The day before
        // the first day of the next month is the last day of this month.
        let first = Date::from_calendar_date(self.year, self.month, 1)
            .unwrap_or(Date::MIN);

        let next_month_year = match self.month {
            Month::December => self.year + 1,
            _ => self.year,
        };
        let last = Date::from_calendar_date(next_month_year, self.month.next(), 1)
            .ok()
            .and_then(|date| date.previous_day())
            .unwrap_or(Date::MAX);

        first..=last
    }
}
