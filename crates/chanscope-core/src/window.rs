//! The date-bounded slice of a channel feed a run collects.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A channel and the inclusive `[start, end]` interval to collect from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionWindow {
    pub channel_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CollectionWindow {
    /// Builds a window, rejecting `start > end`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidWindow`] when `start` is after `end`.
    pub fn new(
        channel_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, ConfigError> {
        if start > end {
            return Err(ConfigError::InvalidWindow { start, end });
        }
        Ok(Self::new_unchecked(channel_id, start, end))
    }

    /// Builds a window without validating the bounds. An inverted window
    /// matches no posts.
    #[must_use]
    pub fn new_unchecked(
        channel_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            start,
            end,
        }
    }

    /// Whole calendar month in UTC: the first instant of day 1 through
    /// 23:59:59 of the last day.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMonth`] if `month` is not in `1..=12`
    /// or the year is out of chrono's range.
    pub fn month(
        channel_id: impl Into<String>,
        year: i32,
        month: u32,
    ) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidMonth { year, month };

        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;
        let last = next_first.pred_opt().ok_or_else(invalid)?;

        let start = Utc.from_utc_datetime(&first.and_hms_opt(0, 0, 0).ok_or_else(invalid)?);
        let end = Utc.from_utc_datetime(&last.and_hms_opt(23, 59, 59).ok_or_else(invalid)?);

        Self::new(channel_id, start, end)
    }

    /// True when `timestamp` falls within `[start, end]`, bounds included.
    #[must_use]
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }

    /// Number of UTC calendar dates the window touches, counting both ends.
    ///
    /// A window of `2025-05-01T00:00:00Z..=2025-05-31T23:59:59Z` spans 31 days.
    /// Inverted windows report `0`.
    #[must_use]
    pub fn day_span(&self) -> i64 {
        if self.start > self.end {
            return 0;
        }
        (self.end.date_naive() - self.start.date_naive()).num_days() + 1
    }
}
