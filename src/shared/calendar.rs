//! Calendar-day windows used by list filters.
//!
//! A date filter such as `dueDate=2026-03-01` matches every record whose
//! timestamp falls on that calendar day in the configured UTC offset. The
//! window is half-open: it includes local midnight and excludes the
//! following midnight.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone, Utc};
use thiserror::Error;

const SECONDS_PER_MINUTE: i32 = 60;

/// Errors returned while building calendars or day windows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalendarError {
    /// The configured offset is outside the ±24h range chrono accepts.
    #[error("UTC offset of {0} minutes is out of range")]
    InvalidOffset(i32),

    /// The requested date cannot be represented as a UTC window.
    #[error("date {0} is out of range")]
    DateOutOfRange(NaiveDate),
}

/// Timezone used to interpret calendar dates in filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    offset: FixedOffset,
}

impl Calendar {
    /// Calendar whose days start at UTC midnight.
    #[must_use]
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Creates a calendar with days aligned to the given offset east of UTC.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidOffset`] when the offset is not
    /// strictly within one day of UTC.
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, CalendarError> {
        minutes
            .checked_mul(SECONDS_PER_MINUTE)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self { offset })
            .ok_or(CalendarError::InvalidOffset(minutes))
    }

    /// Returns the configured offset.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Returns the UTC instants bounding `date` in this calendar.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DateOutOfRange`] at the edges of chrono's
    /// representable range.
    pub fn day_window(&self, date: NaiveDate) -> Result<DayWindow, CalendarError> {
        let local_midnight = date.and_time(NaiveTime::MIN);
        let start = self
            .offset
            .from_local_datetime(&local_midnight)
            .single()
            .map(|instant| instant.with_timezone(&Utc))
            .ok_or(CalendarError::DateOutOfRange(date))?;
        let end = start
            .checked_add_signed(TimeDelta::days(1))
            .ok_or(CalendarError::DateOutOfRange(date))?;
        Ok(DayWindow { start, end })
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

/// Half-open UTC interval covering one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DayWindow {
    /// Inclusive lower bound.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive upper bound.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns `true` when `instant` falls inside the window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Returns `true` when `instant` is present and inside the window.
    #[must_use]
    pub fn contains_opt(&self, instant: Option<DateTime<Utc>>) -> bool {
        instant.is_some_and(|value| self.contains(value))
    }
}
