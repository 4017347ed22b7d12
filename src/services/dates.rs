//! Date slot parsing.
//!
//! The platform normally sends RFC 3339 timestamps, but typed input and other
//! agents send plain dates or words like "tomorrow". Everything resolves to a
//! calendar date relative to `today`.
//!
//! A timestamp carries the user's UTC offset, so "today" for the range checks
//! is taken in that offset rather than on the server's UTC calendar.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, Utc, Weekday};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%A, %d %B %Y",
    "%A %d %B %Y",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("Unrecognized date: {0:?}")]
    Unrecognized(String),
}

impl DateParseError {
    /// Reply asking the user to restate the date
    pub fn user_message(&self) -> &'static str {
        crate::services::replies::INVALID_DATE
    }
}

/// Requested day together with the user's current day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDate {
    pub date: NaiveDate,
    pub today: NaiveDate,
}

impl TargetDate {
    /// No date slot: today on the UTC calendar
    pub fn today(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        Self { date: today, today }
    }
}

/// Resolve a date slot as of `now`.
///
/// For RFC 3339 input both days are read in the slot's own offset; anything
/// else is relative to the UTC date.
pub fn resolve_target_date(input: &str, now: DateTime<Utc>) -> Result<TargetDate, DateParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input.trim()) {
        return Ok(TargetDate {
            date: dt.date_naive(),
            today: now.with_timezone(dt.offset()).date_naive(),
        });
    }

    let today = now.date_naive();
    parse_target_date(input, today).map(|date| TargetDate { date, today })
}

/// Resolve a date slot value to a calendar date
pub fn parse_target_date(input: &str, today: NaiveDate) -> Result<NaiveDate, DateParseError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if let Some(date) = parse_relative(&lower, today) {
        return Ok(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        // The offset is the user's; keep their calendar day.
        return Ok(dt.date_naive());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt.date());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    Err(DateParseError::Unrecognized(trimmed.to_string()))
}

fn parse_relative(lower: &str, today: NaiveDate) -> Option<NaiveDate> {
    match lower {
        "today" | "tonight" | "now" => return Some(today),
        "tomorrow" => return today.checked_add_days(Days::new(1)),
        "day after tomorrow" | "the day after tomorrow" => {
            return today.checked_add_days(Days::new(2));
        }
        _ => {}
    }

    let weekday_name = lower
        .strip_prefix("next ")
        .or_else(|| lower.strip_prefix("this "))
        .or_else(|| lower.strip_prefix("on "))
        .unwrap_or(lower);
    let weekday: Weekday = weekday_name.parse().ok()?;
    let ahead = (7 + weekday.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
    today.checked_add_days(Days::new(u64::from(ahead)))
}
