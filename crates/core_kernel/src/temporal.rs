//! Billing period and calendar arithmetic
//!
//! The billing engine works in whole calendar months. This module provides
//! the `BillingPeriod` value type plus the date arithmetic the engine needs:
//! due-date derivation with end-of-month clamping, grace deadlines, and
//! iteration over period ranges.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Invalid period range: {start} is after {end}")]
    InvalidRange { start: String, end: String },
}

/// A calendar billing period: one (month, year) pair for which dues are owed
///
/// Periods are totally ordered chronologically, so `BillingPeriod` can be
/// used directly as a map/set key and compared with `<`/`>`.
///
/// The month is guaranteed to be in 1-12: fields are private and both
/// construction and deserialization route through [`BillingPeriod::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawBillingPeriod")]
pub struct BillingPeriod {
    year: i32,
    month: u32,
}

/// Unvalidated wire shape for [`BillingPeriod`] deserialization
#[derive(Deserialize)]
struct RawBillingPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawBillingPeriod> for BillingPeriod {
    type Error = TemporalError;

    fn try_from(raw: RawBillingPeriod) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month)
    }
}

impl BillingPeriod {
    /// Creates a new billing period, validating the month
    pub fn new(year: i32, month: u32) -> Result<Self, TemporalError> {
        if !(1..=12).contains(&month) {
            return Err(TemporalError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// Calendar year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Calendar month, 1-12
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the period containing the given date
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the next calendar period
    pub fn next(&self) -> Self {
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

    /// Returns the first day of this period
    pub fn first_day(&self) -> NaiveDate {
        // month is validated at construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("BillingPeriod holds a valid month")
    }

    /// Returns the last day of this period
    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    /// Returns the number of days in this period's month
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Derives the due date for this period from a billing day-of-month
    ///
    /// If `billing_day` exceeds the number of days in the month, the due
    /// date clamps to the last day of the month (billing day 30 in February
    /// falls due on Feb 28, or Feb 29 in leap years).
    pub fn due_date(&self, billing_day: u32) -> NaiveDate {
        let day = billing_day.min(self.days_in_month()).max(1);
        NaiveDate::from_ymd_opt(self.year, self.month, day)
            .expect("clamped day is valid for this month")
    }

    /// Returns an iterator over periods from `self` through `end`, inclusive
    ///
    /// Empty when `end` precedes `self`.
    pub fn through(self, end: BillingPeriod) -> impl Iterator<Item = BillingPeriod> {
        let mut current = self;
        std::iter::from_fn(move || {
            if current > end {
                return None;
            }
            let out = current;
            current = current.next();
            Some(out)
        })
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Returns the deadline after which a late penalty may accrue
///
/// The penalty deadline is the due date plus the grace period; a statement
/// becomes overdue only when the evaluation date is strictly after it.
pub fn grace_deadline(due_date: NaiveDate, grace_period_days: u16) -> NaiveDate {
    due_date + Duration::days(i64::from(grace_period_days))
}

/// Returns true if `as_of` is strictly past the due date plus grace period
pub fn is_past_grace(due_date: NaiveDate, grace_period_days: u16, as_of: NaiveDate) -> bool {
    as_of > grace_deadline(due_date, grace_period_days)
}
