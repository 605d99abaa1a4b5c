use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MINUTES_PER_HOUR: u16 = 60;
pub const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;

/// Hint shown to callers when a time string is rejected.
pub const ACCEPTED_TIME_FORMATS: &str = "use formats like 10:30 AM, 2.15 PM or 14:30";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("Time input is empty")]
    EmptyInput,

    #[error("Malformed number in time input: {0:?}")]
    MalformedNumber(String),

    #[error("Time out of range: hour {hour}, minute {minute}")]
    InvalidRange { hour: i64, minute: i64 },
}

/// Minutes since midnight, always in `0..MINUTES_PER_DAY`.
///
/// The only ways to obtain one are [`TimeOfDay::parse`] (and the `FromStr` /
/// serde impls that delegate to it), so an unchecked value never reaches the
/// scheduling code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

impl TimeOfDay {
    /// Parse a human-entered time such as `"14:30"`, `"2.30 pm"` or `"9 AM"`.
    ///
    /// Whitespace around the input is ignored. When an `AM`/`PM` marker appears
    /// anywhere (case-insensitively) every alphabetic character is dropped and the
    /// 12-hour adjustment is applied to the remaining `H[:MM]` / `H[.MM]`.
    pub fn parse(raw: &str) -> Result<Self, TimeParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TimeParseError::EmptyInput);
        }

        let upper = trimmed.to_ascii_uppercase();
        let has_am = upper.contains("AM");
        let has_pm = upper.contains("PM");

        let digits: String = if has_am || has_pm {
            trimmed.chars().filter(|c| !c.is_alphabetic()).collect()
        } else {
            trimmed.to_string()
        };

        let (hour_part, minute_part) = match digits.find(':').or_else(|| digits.find('.')) {
            Some(pos) => (&digits[..pos], Some(&digits[pos + 1..])),
            None => (digits.as_str(), None),
        };

        let mut hour = parse_segment(hour_part)?;
        let minute = match minute_part {
            Some(segment) => parse_segment(segment)?,
            None => 0,
        };

        if hour < 0 || !(0..i64::from(MINUTES_PER_HOUR)).contains(&minute) {
            return Err(TimeParseError::InvalidRange { hour, minute });
        }

        // With both markers present, 12 reads as AM and every other hour as PM.
        let meridiem = match (has_am, has_pm) {
            (true, _) if hour == 12 => Some(Meridiem::Am),
            (_, true) => Some(Meridiem::Pm),
            (true, false) => Some(Meridiem::Am),
            (false, false) => None,
        };
        hour = match (meridiem, hour) {
            (Some(Meridiem::Am), 12) => 0,
            (Some(Meridiem::Pm), 1..=11) => hour + 12,
            // 0 with a marker is passed through untouched.
            _ => hour,
        };

        if !(0..24).contains(&hour) {
            return Err(TimeParseError::InvalidRange { hour, minute });
        }

        // Both components are range-checked above, so the total fits in u16.
        Ok(Self((hour * 60 + minute) as u16))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / MINUTES_PER_HOUR
    }

    pub fn minute(self) -> u16 {
        self.0 % MINUTES_PER_HOUR
    }

    /// 12-hour rendering, e.g. `"1:05 PM"`.
    pub fn to_12_hour_string(self) -> String {
        let suffix = if self.hour() < 12 { "AM" } else { "PM" };
        let hour = match self.hour() % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", hour, self.minute(), suffix)
    }
}

fn parse_segment(segment: &str) -> Result<i64, TimeParseError> {
    let segment = segment.trim();
    let unsigned = segment.strip_prefix(['+', '-']).unwrap_or(segment);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeParseError::MalformedNumber(segment.to_string()));
    }
    // Digits only at this point, so a failed parse means the value overflowed.
    Ok(segment.parse::<i64>().unwrap_or(if segment.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}
