//! Month arithmetic for the calendar view.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};

use crate::error::PlannerError;

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Number of years offered by the year selector, centred on the viewed year.
const YEAR_SPAN: i32 = 10;

/// Years that have a four-digit ISO form.
pub const MIN_YEAR: i32 = 0;
pub const MAX_YEAR: i32 = 9999;

/// A calendar month: the unit the client fetches and displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    /// 1-based
    month: u32,
}

impl Period {
    /// `None` unless `month` is 1..=12 and `year` is within `MIN_YEAR..=MAX_YEAR`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        Some(Period { year, month })
    }

    /// The month containing `date`, clamped to the supported years.
    pub fn containing(date: NaiveDate) -> Self {
        Period {
            year: date.year().clamp(MIN_YEAR, MAX_YEAR),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month as usize - 1]
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("period is always a valid month")
    }

    pub fn last_day(&self) -> NaiveDate {
        (28..=31)
            .rev()
            .find_map(|day| self.day(day))
            .unwrap_or_else(|| self.first_day())
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last_day();
        self.first_day().iter_days().take_while(move |d| *d <= last)
    }

    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The following month; stays put at the last supported month.
    pub fn next(&self) -> Self {
        let next = if self.month == 12 {
            Period::new(self.year + 1, 1)
        } else {
            Period::new(self.year, self.month + 1)
        };
        next.unwrap_or(*self)
    }

    /// The preceding month; stays put at the first supported month.
    pub fn prev(&self) -> Self {
        let prev = if self.month == 1 {
            Period::new(self.year - 1, 12)
        } else {
            Period::new(self.year, self.month - 1)
        };
        prev.unwrap_or(*self)
    }

    /// Same year, different month. `None` when `month` is not 1..=12.
    pub fn with_month(&self, month: u32) -> Option<Self> {
        Period::new(self.year, month)
    }

    pub fn with_year(&self, year: i32) -> Option<Self> {
        Period::new(year, self.month)
    }

    /// Years offered by the year selector: `year - 5 ..= year + 4`.
    pub fn year_options(&self) -> Vec<i32> {
        let first = self.year - YEAR_SPAN / 2;
        (first..first + YEAR_SPAN).collect()
    }

    /// Prefix shared by every ISO date inside this month, e.g. `"2025-03-"`.
    pub fn date_prefix(&self) -> String {
        format!("{self}-")
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PlannerError::InvalidPeriod(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(err)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(err());
        }
        let year = year.parse().map_err(|_| err())?;
        let month = month.parse().map_err(|_| err())?;
        Period::new(year, month).ok_or_else(err)
    }
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, PlannerError> {
    if s.len() != 10 {
        return Err(PlannerError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .filter(|d| (MIN_YEAR..=MAX_YEAR).contains(&d.year()))
        .ok_or_else(|| PlannerError::InvalidDate(s.to_string()))
}

/// ISO `YYYY-MM-DD` form of a date, the way tasks store it.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Sunday-first month grid: blank cells up to the first weekday, then one cell per day.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub period: Period,
    pub cells: Vec<Option<NaiveDate>>,
}

impl MonthGrid {
    pub fn new(period: Period) -> Self {
        let leading = period.first_day().weekday().num_days_from_sunday() as usize;
        let mut cells = vec![None; leading];
        cells.extend(period.days().map(Some));
        MonthGrid { period, cells }
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_none()).count()
    }

    /// Rows of seven cells; the last row is padded with blanks.
    pub fn weeks(&self) -> Vec<[Option<NaiveDate>; 7]> {
        self.cells
            .chunks(7)
            .map(|chunk| {
                let mut week = [None; 7];
                week[..chunk.len()].copy_from_slice(chunk);
                week
            })
            .collect()
    }
}
