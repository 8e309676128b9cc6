use std::{fmt::Display, ops::Deref, str::FromStr};

use chrono::{NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// This is the standard way of converting a record timestamp to a string in moodlog.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats epoch seconds in `tz`. Timestamps outside chrono's range are printed raw.
pub fn format_timestamp_in<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    match tz.timestamp_opt(timestamp, 0).single() {
        Some(v) => v.format(TIMESTAMP_FORMAT).to_string(),
        None => timestamp.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid time format. Please enter in HH:MM (24-hour format).")]
pub struct ClockTimeError;

/// 24-hour `HH:MM` wall-clock time. Keeps the exact text that was entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(String);

impl ClockTime {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Accepts exactly two digits, a colon and two digits, with hour 0-23 and minute 0-59.
pub fn parse_clock_time(input: &str) -> Result<ClockTime, ClockTimeError> {
    let bytes = input.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(ClockTimeError);
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(ClockTimeError);
    }
    let hour = u32::from(digits[0] - b'0') * 10 + u32::from(digits[1] - b'0');
    let minute = u32::from(digits[2] - b'0') * 10 + u32::from(digits[3] - b'0');
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or(ClockTimeError)?;
    Ok(ClockTime(input.to_owned()))
}

impl FromStr for ClockTime {
    type Err = ClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_clock_time(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ClockTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_clock_time(&value)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.0
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for ClockTime {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
