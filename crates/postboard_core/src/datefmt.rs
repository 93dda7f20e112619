//! ISO-8601 date parsing and display formatting.
//!
//! # Responsibility
//! - Parse date and date-time strings with or without an explicit offset.
//! - Resolve the display zone from the input, a fixed minute offset or the
//!   local zone.
//! - Render `YYYY-MM-DD` with an optional time and zone suffix.
//!
//! # Invariants
//! - Input without an offset is interpreted as UTC and reported as a notice.
//! - An explicit input offset always wins over `offset_minutes`.
//! - Offsets must lie strictly within one day.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MINUTES_PER_DAY: u32 = 24 * 60;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
];

/// Non-fatal interpretation notes produced while formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateNotice {
    /// Input had no time part; midnight UTC was assumed.
    DateOnly,
    /// Input had a time but no offset; UTC was assumed.
    MissingTimezone,
    /// The configured minute offset was applied to an offset-less input.
    OffsetApplied(i32),
}

impl Display for DateNotice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateOnly => write!(f, "input is a date only; treating time as 00:00:00 UTC"),
            Self::MissingTimezone => write!(f, "input has no timezone; treating it as UTC"),
            Self::OffsetApplied(minutes) => {
                write!(f, "input has no timezone; applying offset of {minutes} minutes")
            }
        }
    }
}

/// Date formatting failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFormatError {
    InvalidDate(String),
    InvalidOffset(i32),
}

impl Display for DateFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => write!(
                f,
                "invalid date `{value}`; expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS[+HH:MM]"
            ),
            Self::InvalidOffset(minutes) => {
                write!(f, "invalid timezone offset: {minutes} minutes")
            }
        }
    }
}

impl Error for DateFormatError {}

/// Result of parsing one input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDate {
    pub datetime: DateTime<FixedOffset>,
    /// Whether the input carried its own offset.
    pub explicit_offset: bool,
    pub notice: Option<DateNotice>,
}

/// Formatting options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRequest {
    /// Date string to format; `None` formats `now`.
    pub input: Option<String>,
    /// Append `HH:MM:SS` and the zone to the output.
    pub include_time: bool,
    /// Fixed display offset in minutes east of UTC.
    pub offset_minutes: Option<i32>,
}

/// Formatted output plus the notices raised on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedDate {
    pub text: String,
    pub notices: Vec<DateNotice>,
}

/// Parses `YYYY-MM-DD` or an ISO-8601 date-time, with or without offset.
///
/// Offsets may be `Z`, `+HH:MM` or `+HHMM`. Surrounding whitespace is not
/// accepted.
///
/// Returns `None` when no supported shape matches.
pub fn parse_date_string(value: &str) -> Option<ParsedDate> {
    if value.trim() != value {
        return None;
    }
    let utc = FixedOffset::east_opt(0)?;
    let zulu;
    let value = match value.strip_suffix('Z') {
        Some(rest) => {
            zulu = format!("{rest}+00:00");
            zulu.as_str()
        }
        None => value,
    };

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(ParsedDate {
            datetime,
            explicit_offset: true,
            notice: None,
        });
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(datetime) = DateTime::parse_from_str(value, format) {
            return Some(ParsedDate {
                datetime,
                explicit_offset: true,
                notice: None,
            });
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(ParsedDate {
                datetime: utc.from_utc_datetime(&naive),
                explicit_offset: false,
                notice: Some(DateNotice::MissingTimezone),
            });
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0)?;
        return Some(ParsedDate {
            datetime: utc.from_utc_datetime(&naive),
            explicit_offset: false,
            notice: Some(DateNotice::DateOnly),
        });
    }

    None
}

/// Formats `request.input` (or `now`) for display.
///
/// # Errors
/// - `InvalidDate` when the input string cannot be parsed.
/// - `InvalidOffset` when an applied offset is one day or more.
pub fn format_date(
    request: &DateRequest,
    now: DateTime<Utc>,
) -> Result<FormattedDate, DateFormatError> {
    let mut notices = Vec::new();

    let zoned = match request.input.as_deref() {
        Some(input) => {
            let parsed = parse_date_string(input)
                .ok_or_else(|| DateFormatError::InvalidDate(input.to_string()))?;
            notices.extend(parsed.notice);
            match request.offset_minutes {
                Some(minutes) if !parsed.explicit_offset => {
                    let zone = fixed_offset(minutes)?;
                    notices.push(DateNotice::OffsetApplied(minutes));
                    parsed.datetime.with_timezone(&zone)
                }
                _ => parsed.datetime,
            }
        }
        None => match request.offset_minutes {
            Some(minutes) => now.with_timezone(&fixed_offset(minutes)?),
            None => {
                let local = now.with_timezone(&Local);
                local.with_timezone(local.offset())
            }
        },
    };

    for notice in &notices {
        match notice {
            DateNotice::OffsetApplied(minutes) => {
                info!("event=date_format module=datefmt status=notice offset_minutes={minutes}")
            }
            other => warn!("event=date_format module=datefmt status=notice notice={other:?}"),
        }
    }

    Ok(FormattedDate {
        text: render(&zoned, request.include_time),
        notices,
    })
}

fn fixed_offset(minutes: i32) -> Result<FixedOffset, DateFormatError> {
    if minutes.unsigned_abs() >= MINUTES_PER_DAY {
        return Err(DateFormatError::InvalidOffset(minutes));
    }
    FixedOffset::east_opt(minutes * 60).ok_or(DateFormatError::InvalidOffset(minutes))
}

fn render(datetime: &DateTime<FixedOffset>, include_time: bool) -> String {
    if !include_time {
        return datetime.format("%Y-%m-%d").to_string();
    }
    format!(
        "{} {}{}",
        datetime.format("%Y-%m-%d %H:%M:%S"),
        zone_label(datetime.offset()),
        datetime.format("%z")
    )
}

/// `UTC` for a zero offset, `UTC+HH:MM` / `UTC-HH:MM` otherwise.
fn zone_label(offset: &FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    if seconds == 0 {
        return "UTC".to_string();
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.abs() / 60;
    format!("UTC{sign}{:02}:{:02}", minutes / 60, minutes % 60)
}
