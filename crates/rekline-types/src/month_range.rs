//! Calendar month ranges and month iteration.

use chrono::{Datelike, NaiveDate};
use std::str::FromStr;

use crate::MonthRangeError;

/// A calendar month, displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Month {
    /// Calendar year.
    pub year: i32,
    /// Month of the year, 1-based.
    pub month: u32,
}

impl Month {
    /// Returns the month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the following month.
    #[must_use]
    pub const fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    const fn index(self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// An inclusive range of calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    /// First month (inclusive).
    pub start: Month,
    /// Last month (inclusive).
    pub end: Month,
}

impl MonthRange {
    /// Creates the range of months touched by `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, MonthRangeError> {
        if start > end {
            return Err(MonthRangeError::InvalidRange { start, end });
        }
        Ok(Self {
            start: Month::of(start),
            end: Month::of(end),
        })
    }

    /// Parses a download range label such as `2017-01-01_2023-12-31`.
    ///
    /// # Errors
    ///
    /// Returns an error if the label is malformed or start > end.
    pub fn from_label(label: &str) -> Result<Self, MonthRangeError> {
        let invalid = || MonthRangeError::InvalidLabel(label.to_string());
        let (start, end) = label.split_once('_').ok_or_else(invalid)?;
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").map_err(|_| invalid())?;
        let end = NaiveDate::parse_from_str(end, "%Y-%m-%d").map_err(|_| invalid())?;
        Self::new(start, end)
    }

    /// Returns an iterator over all months in the range.
    #[must_use]
    pub const fn months(&self) -> MonthIterator {
        MonthIterator {
            current: self.start,
            end: self.end,
        }
    }

    /// Returns the number of months in the range.
    #[must_use]
    pub const fn len(&self) -> usize {
        (self.end.index() - self.start.index() + 1) as usize
    }

    /// Always false; a valid range holds at least one month.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl FromStr for MonthRange {
    type Err = MonthRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl std::fmt::Display for MonthRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Iterator over the months of a [`MonthRange`].
#[derive(Debug, Clone)]
pub struct MonthIterator {
    current: Month,
    end: Month,
}

impl Iterator for MonthIterator {
    type Item = Month;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current > self.end {
            return None;
        }

        let result = self.current;
        self.current = self.current.succ();
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end.index() - self.current.index() + 1).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MonthIterator {}
