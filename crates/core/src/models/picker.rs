use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::CoreError;

/// Bounds and default of a base-date input control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatePicker {
    pub min: NaiveDate,
    pub max: NaiveDate,
    pub default: NaiveDate,
}

impl DatePicker {
    /// Build a picker, keeping `default` inside `[min, max]`.
    ///
    /// If `max < min` (today is before the provider's history starts) the
    /// range collapses to `min`.
    pub fn new(min: NaiveDate, max: NaiveDate, default: NaiveDate) -> Self {
        let max = max.max(min);
        Self {
            min,
            max,
            default: default.clamp(min, max),
        }
    }

    /// Snap a user-supplied date into the selectable range.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.min, self.max)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.min && date <= self.max
    }

    /// Reject a date outside the selectable range.
    pub fn validate(&self, date: NaiveDate) -> Result<NaiveDate, CoreError> {
        if self.contains(date) {
            Ok(date)
        } else {
            Err(CoreError::InvalidDateSelection {
                date: date.to_string(),
                min: self.min.to_string(),
                max: self.max.to_string(),
            })
        }
    }
}
