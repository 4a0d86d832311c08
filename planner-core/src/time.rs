//! Naive `HH:MM` clock times.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PlannerError, PlannerResult};

/// Shortest task the planner accepts, in minutes.
pub const MIN_TASK_MINUTES: i32 = 120;

static CLOCK_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:2[0-3]|[01][0-9]):[0-5][0-9]$").expect("valid regex"));

/// A 24-hour wall-clock time with minute precision and no timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(ClockTime { hour, minute })
    }

    /// Parse a strict two-digit `HH:MM` string.
    pub fn parse(s: &str) -> PlannerResult<Self> {
        if !CLOCK_TIME.is_match(s) {
            return Err(PlannerError::InvalidTime(s.to_string()));
        }
        let (h, m) = s.split_at(2);
        let hour = h.parse().map_err(|_| PlannerError::InvalidTime(s.to_string()))?;
        let minute = m[1..]
            .parse()
            .map_err(|_| PlannerError::InvalidTime(s.to_string()))?;
        Ok(ClockTime { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> i32 {
        i32::from(self.hour) * 60 + i32::from(self.minute)
    }

    /// Signed same-day distance from `self` to `other`, in minutes.
    pub fn minutes_until(&self, other: ClockTime) -> i32 {
        other.minutes() - self.minutes()
    }
}

impl FromStr for ClockTime {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClockTime::parse(s)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
