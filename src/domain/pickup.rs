//! Pickup date options offered for a session.
//!
//! Dates are generated once when a session starts and stay fixed until the
//! order is completed or cancelled.

use super::models::PickupSchedule;
use chrono::{Local, NaiveDate};
use std::collections::HashSet;
use std::fmt::{self, Write};
use tracing::warn;

/// Used when the configured pattern cannot label the offered dates.
pub const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Labels `days` consecutive dates starting at `start`.
///
/// Fails when the pattern asks for fields a calendar date does not have,
/// such as `%H` or `%z`.
pub fn format_labels(start: NaiveDate, days: u32, date_format: &str) -> Result<Vec<String>, fmt::Error> {
    start
        .iter_days()
        .take(days as usize)
        .map(|date| {
            let mut label = String::new();
            write!(label, "{}", date.format(date_format))?;
            Ok(label)
        })
        .collect()
}

pub fn has_duplicate_labels(labels: &[String]) -> bool {
    let mut seen = HashSet::new();
    labels.iter().any(|label| !seen.insert(label))
}

/// Source of "today" for generating pickup dates.
pub trait Clock: fmt::Debug {
    fn today(&self) -> NaiveDate;
}

/// Reads the local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Ordered pickup date labels, earliest (same-day) first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PickupOptions {
    dates: Vec<String>,
}

impl PickupOptions {
    /// Labels `schedule.days` consecutive dates starting at `start`.
    ///
    /// Labels are always distinct. A pattern that cannot render a date, or
    /// that gives two dates the same label, is replaced by
    /// [`FALLBACK_DATE_FORMAT`]; configuration loading rejects such patterns
    /// up front.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use cupcake::domain::{PickupOptions, PickupSchedule};
    ///
    /// let start = NaiveDate::from_ymd_opt(2021, 7, 21).unwrap();
    /// let options = PickupOptions::generate(start, &PickupSchedule::default());
    /// assert_eq!(options.as_slice()[0], "Wed Jul 21");
    /// assert_eq!(options.len(), 4);
    /// ```
    pub fn generate(start: NaiveDate, schedule: &PickupSchedule) -> Self {
        match format_labels(start, schedule.days, &schedule.date_format) {
            Ok(dates) if !has_duplicate_labels(&dates) => Self { dates },
            result => {
                warn!(
                    date_format = %schedule.date_format,
                    renders = result.is_ok(),
                    "pickup date format unusable, falling back to {}",
                    FALLBACK_DATE_FORMAT
                );
                let dates = start
                    .iter_days()
                    .take(schedule.days as usize)
                    .map(|date| date.format(FALLBACK_DATE_FORMAT).to_string())
                    .collect();
                Self { dates }
            }
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn contains(&self, date: &str) -> bool {
        self.dates.iter().any(|d| d == date)
    }

    pub fn position(&self, date: &str) -> Option<usize> {
        self.dates.iter().position(|d| d == date)
    }

    /// True when `date` is the earliest offered date.
    pub fn is_same_day(&self, date: &str) -> bool {
        self.dates.first().is_some_and(|first| first == date)
    }
}
