use crate::ClockError;
use log::debug;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const NANOS_PER_MICRO: f64 = 1000.0;
const MICROS_PER_MILLI: f64 = 1000.0;
const MILLIS_PER_SEC: f64 = 1000.0;
const SECS_PER_MIN: f64 = 60.0;
const MINS_PER_HOUR: f64 = 60.0;
const HOURS_PER_DAY: f64 = 24.0;
const DAYS_PER_WEEK: f64 = 7.0;
const DAYS_PER_YEAR: f64 = 365.24;
const MONTHS_PER_YEAR: f64 = 12.0;

/// Output unit for elapsed-time conversions.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Precision {
    #[default]
    Nanoseconds = 0,
    Microseconds = 1,
    Milliseconds = 2,
    Seconds = 3,
    Minutes = 4,
    Hours = 5,
    Days = 6,
    Weeks = 7,
    Months = 8,
    Years = 9,
}

impl Precision {
    pub const ALL: [Precision; 10] = [
        Self::Nanoseconds,
        Self::Microseconds,
        Self::Milliseconds,
        Self::Seconds,
        Self::Minutes,
        Self::Hours,
        Self::Days,
        Self::Weeks,
        Self::Months,
        Self::Years,
    ];

    /// Maps a raw selector to a unit. Out-of-range selectors fall back to
    /// nanoseconds; use `Precision::try_from` to reject them instead.
    pub fn from_raw(raw: u8) -> Self {
        Self::try_from(raw).unwrap_or_else(|_| {
            debug!("precision selector {raw} out of range, using nanoseconds");
            Self::Nanoseconds
        })
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "µs",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "min",
            Self::Hours => "h",
            Self::Days => "d",
            Self::Weeks => "w",
            Self::Months => "mo",
            Self::Years => "y",
        }
    }

    pub fn convert(&self, duration: Duration) -> f64 {
        convert_duration(duration, *self)
    }
}

impl TryFrom<u8> for Precision {
    type Error = ClockError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(raw))
            .copied()
            .ok_or(ClockError::InvalidPrecision(raw))
    }
}

impl FromStr for Precision {
    type Err = ClockError;

    fn from_str(input: &str) -> Result<Precision, Self::Err> {
        let lower = input.trim().to_lowercase();
        match lower.as_ref() {
            "ns" | "nanos" | "nanoseconds" => Ok(Self::Nanoseconds),
            "us" | "µs" | "micros" | "microseconds" => Ok(Self::Microseconds),
            "ms" | "millis" | "milliseconds" => Ok(Self::Milliseconds),
            "s" | "secs" | "seconds" => Ok(Self::Seconds),
            "min" | "mins" | "minutes" => Ok(Self::Minutes),
            "h" | "hours" => Ok(Self::Hours),
            "d" | "days" => Ok(Self::Days),
            "w" | "weeks" => Ok(Self::Weeks),
            "mo" | "months" => Ok(Self::Months),
            "y" | "years" => Ok(Self::Years),
            _ => Err(ClockError::UnknownPrecision(input.to_string())),
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        out.write_str(self.suffix())
    }
}

fn micros(nanos: f64) -> f64 {
    nanos / NANOS_PER_MICRO
}

fn millis(nanos: f64) -> f64 {
    micros(nanos) / MICROS_PER_MILLI
}

fn secs(nanos: f64) -> f64 {
    millis(nanos) / MILLIS_PER_SEC
}

fn mins(nanos: f64) -> f64 {
    secs(nanos) / SECS_PER_MIN
}

fn hours(nanos: f64) -> f64 {
    mins(nanos) / MINS_PER_HOUR
}

fn days(nanos: f64) -> f64 {
    hours(nanos) / HOURS_PER_DAY
}

fn weeks(nanos: f64) -> f64 {
    days(nanos) / DAYS_PER_WEEK
}

fn years(nanos: f64) -> f64 {
    days(nanos) / DAYS_PER_YEAR
}

fn months(nanos: f64) -> f64 {
    years(nanos) / MONTHS_PER_YEAR
}

/// Converts a nanosecond count into `precision` units.
///
/// Each unit is reached by dividing down its own chain
/// (ns → µs → ms → s → min → h → d, then d → w or d → y → mo), so only the
/// divisions the requested unit needs are performed. A year is 365.24 days
/// and a month is a twelfth of that.
pub fn convert_nanos(nanos: u64, precision: Precision) -> f64 {
    let nanos = nanos as f64;
    match precision {
        Precision::Nanoseconds => nanos,
        Precision::Microseconds => micros(nanos),
        Precision::Milliseconds => millis(nanos),
        Precision::Seconds => secs(nanos),
        Precision::Minutes => mins(nanos),
        Precision::Hours => hours(nanos),
        Precision::Days => days(nanos),
        Precision::Weeks => weeks(nanos),
        Precision::Months => months(nanos),
        Precision::Years => years(nanos),
    }
}

/// Same as [`convert_nanos`], saturating durations past `u64::MAX` nanoseconds.
pub fn convert_duration(duration: Duration, precision: Precision) -> f64 {
    let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
    convert_nanos(nanos, precision)
}

/// [`convert_nanos`] with a raw selector; unknown selectors yield nanoseconds.
pub fn convert_raw(nanos: u64, raw: u8) -> f64 {
    convert_nanos(nanos, Precision::from_raw(raw))
}
