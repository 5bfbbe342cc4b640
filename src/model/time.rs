use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};

/// Number of minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A span of time within a teaching day, stored as absolute minutes since the
/// midnight that starts the day.
///
/// The end may lie beyond [`MINUTES_PER_DAY`] when the range crosses midnight:
/// `2330-0030` is held as `1410..1470`, so every comparison works on a single
/// monotonic axis. The wall-clock form is restored on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeRange {
    start: u32,
    end: u32,
}

impl TimeRange {
    /// Builds a range from wall-clock minutes. An end earlier than the start is
    /// taken to fall on the following day.
    pub fn new(start: u32, end: u32) -> Self {
        let start = start % MINUTES_PER_DAY;
        let end = end % MINUTES_PER_DAY;
        let end = if end < start {
            end + MINUTES_PER_DAY
        } else {
            end
        };
        Self { start, end }
    }

    /// Parses the `HHMM-HHMM` form used throughout exported timetables.
    pub fn parse(value: &str) -> Result<Self> {
        let (start, end) = value
            .trim()
            .split_once('-')
            .ok_or_else(|| ToolError::time_range(value, "expected two times joined by '-'"))?;
        let start = parse_clock(value, start)?;
        let end = parse_clock(value, end)?;
        Ok(Self::new(start, end))
    }

    /// Start of the range in minutes since midnight.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// End of the range in absolute minutes; exceeds a day when crossing midnight.
    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn duration(&self) -> u32 {
        self.end - self.start
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end > MINUTES_PER_DAY
    }

    pub(crate) fn extend_to(&mut self, end: u32) {
        self.end = self.end.max(end);
    }

    /// The same range moved onto the following day's axis.
    pub(crate) fn next_day(&self) -> Self {
        Self {
            start: self.start + MINUTES_PER_DAY,
            end: self.end + MINUTES_PER_DAY,
        }
    }
}

fn parse_clock(value: &str, token: &str) -> Result<u32> {
    let token = token.trim();
    if token.len() != 4 || !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ToolError::time_range(
            value,
            format!("'{token}' is not a four digit 24-hour time"),
        ));
    }

    let hours: u32 = token[..2]
        .parse()
        .map_err(|_| ToolError::time_range(value, format!("bad hour in '{token}'")))?;
    let minutes: u32 = token[2..]
        .parse()
        .map_err(|_| ToolError::time_range(value, format!("bad minute in '{token}'")))?;

    if hours >= 24 || minutes >= 60 {
        return Err(ToolError::time_range(
            value,
            format!("'{token}' is outside the 24-hour clock"),
        ));
    }

    Ok(hours * 60 + minutes)
}

fn write_clock(f: &mut fmt::Formatter<'_>, minutes: u32) -> fmt::Result {
    let minutes = minutes % MINUTES_PER_DAY;
    write!(f, "{:02}{:02}", minutes / 60, minutes % 60)
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_clock(f, self.start)?;
        f.write_str("-")?;
        write_clock(f, self.end)
    }
}

impl FromStr for TimeRange {
    type Err = ToolError;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for TimeRange {
    type Error = ToolError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<TimeRange> for String {
    fn from(range: TimeRange) -> Self {
        range.to_string()
    }
}
