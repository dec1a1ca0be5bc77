//! Inclusive calendar date ranges
//!
//! Rental periods are whole calendar days with both ends inclusive. Two
//! ranges that touch on a single day overlap: a rental ending on day D
//! conflicts with one starting on day D.

use chrono::NaiveDate;
use serde::Serialize;

use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Fails with `InvalidRange` unless `start < end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start >= end {
            return Err(AppError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// [s1, e1] and [s2, e2] overlap iff s1 <= e2 and s2 <= e1.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Number of billable days: the whole days between start and end.
    pub fn day_count(&self) -> i64 {
        days_between(self.start, self.end)
    }
}

/// Whole days from `start` to `end`; the billing length of a rental period.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}
