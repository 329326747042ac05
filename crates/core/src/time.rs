//! Julian Date time axis shared by every model in the workspace.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::constants::{DAYS_PER_JULIAN_YEAR, JD_J2000, JD_UNIX_EPOCH, SECONDS_PER_DAY};

/// Errors raised while converting between Julian Dates and calendar dates.
#[derive(Debug, Error, PartialEq)]
pub enum TimeError {
    #[error("julian date {0} is outside the representable calendar range")]
    OutOfRange(f64),
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidCalendarDate { year: i32, month: u32, day: u32 },
    #[error("unable to parse `{0}` as YYYY-MM-DD or RFC 3339")]
    Parse(String),
}

/// Convert days to seconds.
#[inline]
pub fn days_to_seconds(days: f64) -> f64 {
    days * SECONDS_PER_DAY
}

/// Convert seconds to days.
#[inline]
pub fn seconds_to_days(seconds: f64) -> f64 {
    seconds / SECONDS_PER_DAY
}

/// Continuous time as a Julian Date (days).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct JulianDate(f64);

impl JulianDate {
    /// The J2000.0 epoch.
    pub const J2000: JulianDate = JulianDate(JD_J2000);

    pub const fn new(days: f64) -> Self {
        Self(days)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Standard conversion from a UTC instant.
    pub fn from_date(date: DateTime<Utc>) -> Self {
        let seconds = date.timestamp() as f64 + f64::from(date.timestamp_subsec_nanos()) * 1.0e-9;
        Self(JD_UNIX_EPOCH + seconds_to_days(seconds))
    }

    /// Convert back to a UTC instant (millisecond precision).
    pub fn to_date(self) -> Result<DateTime<Utc>, TimeError> {
        if !self.0.is_finite() {
            return Err(TimeError::OutOfRange(self.0));
        }
        let millis = (days_to_seconds(self.0 - JD_UNIX_EPOCH) * 1_000.0).round();
        if millis.abs() >= i64::MAX as f64 {
            return Err(TimeError::OutOfRange(self.0));
        }
        let millis = millis as i64;
        let secs = millis.div_euclid(1_000);
        let nanos = (millis.rem_euclid(1_000) * 1_000_000) as u32;
        DateTime::from_timestamp(secs, nanos).ok_or(TimeError::OutOfRange(self.0))
    }

    /// Midnight UTC of the given proleptic Gregorian calendar day.
    pub fn from_calendar(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or(TimeError::InvalidCalendarDate { year, month, day })?;
        Ok(Self::from_date(date.and_utc()))
    }

    /// Parse `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
    pub fn parse(input: &str) -> Result<Self, TimeError> {
        let trimmed = input.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(Self::from_date(midnight.and_utc()));
            }
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| Self::from_date(dt.with_timezone(&Utc)))
            .map_err(|_| TimeError::Parse(input.to_string()))
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self::from_date(Utc::now())
    }

    /// Julian Date for a decimal year measured in Julian years from J2000
    /// (`2000.0` is J2000.0 itself).
    pub fn from_decimal_year(year: f64) -> Self {
        Self(JD_J2000 + (year - 2000.0) * DAYS_PER_JULIAN_YEAR)
    }

    /// Inverse of [`JulianDate::from_decimal_year`].
    pub fn decimal_year(self) -> f64 {
        2000.0 + self.years_since_j2000()
    }

    /// Julian years elapsed since J2000.0 (negative before it).
    pub fn years_since_j2000(self) -> f64 {
        (self.0 - JD_J2000) / DAYS_PER_JULIAN_YEAR
    }

    /// Days from `earlier` to `self`.
    pub fn days_since(self, earlier: JulianDate) -> f64 {
        self.0 - earlier.0
    }

    pub fn add_days(self, days: f64) -> Self {
        Self(self.0 + days)
    }

    pub fn add_years(self, years: f64) -> Self {
        Self(self.0 + years * DAYS_PER_JULIAN_YEAR)
    }
}

impl From<DateTime<Utc>> for JulianDate {
    fn from(date: DateTime<Utc>) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.4}", self.0)
    }
}
