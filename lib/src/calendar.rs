//! Calendar-time rendering with strftime patterns.
//!
//! Patterns use chrono's strftime syntax. Specifiers chrono does not know
//! (`%Q`, a lone trailing `%`, ...) are copied to the output unchanged, so
//! rendering never fails.
use crate::ClockError;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use log::warn;
use serde_derive::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

/// Longest specifier body after `%`, as in `%:::z`.
const MAX_SPEC_LEN: usize = 4;

/// Timezone a [`CalendarFormatter`] renders in.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Whatever the host reports as local time.
    #[default]
    Local,
    Utc,
    /// Fixed offset east of UTC, in seconds.
    Fixed(i32),
}

#[derive(Debug, Clone, Copy)]
enum Offset {
    Local,
    Utc,
    Fixed(FixedOffset),
}

/// Renders the current wall-clock time in a chosen zone.
#[derive(Debug, Clone, Copy)]
pub struct CalendarFormatter {
    offset: Offset,
}

impl CalendarFormatter {
    pub fn new(zone: Zone) -> Result<Self, ClockError> {
        let offset = match zone {
            Zone::Local => Offset::Local,
            Zone::Utc => Offset::Utc,
            Zone::Fixed(secs) => {
                Offset::Fixed(FixedOffset::east_opt(secs).ok_or(ClockError::InvalidOffset(secs))?)
            }
        };
        Ok(Self { offset })
    }

    pub fn local() -> Self {
        Self {
            offset: Offset::Local,
        }
    }

    pub fn utc() -> Self {
        Self {
            offset: Offset::Utc,
        }
    }

    pub fn format_now(&self, pattern: &str) -> String {
        match self.offset {
            Offset::Local => format_at(&Local::now(), pattern),
            Offset::Utc => format_at(&Utc::now(), pattern),
            Offset::Fixed(offset) => format_at(&Utc::now().with_timezone(&offset), pattern),
        }
    }
}

impl Default for CalendarFormatter {
    fn default() -> Self {
        Self::local()
    }
}

/// Current local time rendered with `pattern`.
///
/// The result depends on the host's timezone setting; use
/// [`CalendarFormatter`] with an explicit [`Zone`] for stable output.
pub fn format_now(pattern: &str) -> String {
    format_at(&Local::now(), pattern)
}

pub fn format_at<Tz>(at: &DateTime<Tz>, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut rest = pattern;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match specifier(rest) {
            Some((spec, items)) => {
                let mark = out.len();
                if write!(out, "{}", at.format_with_items(items.iter())).is_err() {
                    warn!("failed to render {spec:?}, keeping it verbatim");
                    out.truncate(mark);
                    out.push_str(spec);
                }
                rest = &rest[spec.len()..];
            }
            None => {
                out.push('%');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Shortest specifier at the start of `input` (which begins with `%`) that
/// chrono parses without error, with its parsed items.
fn specifier(input: &str) -> Option<(&str, Vec<Item<'_>>)> {
    input
        .char_indices()
        .skip(1)
        .take(MAX_SPEC_LEN)
        .map(|(i, c)| &input[..i + c.len_utf8()])
        .find_map(|spec| {
            let items: Vec<Item<'_>> = StrftimeItems::new(spec).collect();
            let valid = !items.is_empty() && !items.iter().any(|item| matches!(item, Item::Error));
            valid.then_some((spec, items))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_instant() -> DateTime<Utc> {
        let naive = NaiveDate::from_ymd_opt(2023, 5, 4)
            .unwrap()
            .and_hms_opt(13, 7, 9)
            .unwrap();
        DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc)
    }

    #[test]
    fn renders_common_tokens() {
        let at = fixed_instant();
        assert_eq!(format_at(&at, "%Y-%m-%d %H:%M:%S"), "2023-05-04 13:07:09");
        assert_eq!(format_at(&at, "%F"), "2023-05-04");
        assert_eq!(format_at(&at, "day %j of %Y"), "day 124 of 2023");
    }

    #[test]
    fn padding_modifiers_and_offsets() {
        let at = fixed_instant();
        assert_eq!(format_at(&at, "%-m/%-d"), "5/4");
        assert_eq!(format_at(&at, "%:z"), "+00:00");
        assert_eq!(format_at(&at, "%.3f"), ".000");
    }

    #[test]
    fn malformed_tokens_pass_through() {
        let at = fixed_instant();
        assert_eq!(format_at(&at, "%Q %d"), "%Q 04");
        assert_eq!(format_at(&at, "100%"), "100%");
        assert_eq!(format_at(&at, "%%Y"), "%Y");
        assert_eq!(format_at(&at, "%-"), "%-");
        assert_eq!(format_at(&at, ""), "");
    }

    #[test]
    fn non_ascii_literals_survive() {
        let at = fixed_instant();
        assert_eq!(format_at(&at, "→ %H時%M分"), "→ 13時07分");
        assert_eq!(format_at(&at, "%é"), "%é");
    }

    #[test]
    fn fixed_zone_shifts_hour() {
        let at = fixed_instant().with_timezone(&FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(format_at(&at, "%H:%M %z"), "15:07 +0200");
    }

    #[test]
    fn rejects_out_of_range_offset() {
        assert!(CalendarFormatter::new(Zone::Fixed(3600)).is_ok());
        assert!(matches!(
            CalendarFormatter::new(Zone::Fixed(86_400)),
            Err(ClockError::InvalidOffset(86_400))
        ));
    }

    #[test]
    fn day_pattern_is_stable_between_close_calls() {
        let formatter = CalendarFormatter::utc();
        let a = formatter.format_now("%Y-%m-%d");
        let b = formatter.format_now("%Y-%m-%d");
        let c = formatter.format_now("%Y-%m-%d");
        // a midnight rollover can split at most one pair
        assert!(a == b || b == c);
        assert_eq!(a.len(), "2023-05-04".len());
    }

    #[test]
    fn local_format_has_stable_shape() {
        let a = format_now("%Y-%m-%d %H");
        let b = CalendarFormatter::local().format_now("%Y-%m-%d %H");
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn fixed_zone_formatter_uses_offset() {
        let formatter = CalendarFormatter::new(Zone::Fixed(-5 * 3600)).unwrap();
        assert_eq!(formatter.format_now("%z"), "-0500");
    }
}
