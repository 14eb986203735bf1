//! Month and weekday selections applied to trip data.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;

use crate::error::TripError;
use crate::trips::Trip;

/// Months covered by the bikeshare datasets, January through June.
pub const MONTH_NAMES: [&str; 6] = ["January", "February", "March", "April", "May", "June"];

/// Weekdays in natural order, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Canonical (title case) name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Calendar name of a month number, if it is a real month.
pub fn month_name(month: u32) -> Option<&'static str> {
    const ALL: [&str; 12] = [
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
    ALL.get(month.checked_sub(1)? as usize).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    /// Month number, always within `1..=6`.
    Month(u32),
}

impl MonthFilter {
    /// Builds a filter from a month number, rejecting months outside the data range.
    pub fn from_number(month: u32) -> Result<Self, TripError> {
        if (1..=MONTH_NAMES.len() as u32).contains(&month) {
            Ok(MonthFilter::Month(month))
        } else {
            Err(TripError::InvalidMonth(month.to_string()))
        }
    }

    pub fn matches(&self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(m) => *m == month,
        }
    }
}

impl FromStr for MonthFilter {
    type Err = TripError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        let idx = MONTH_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TripError::InvalidMonth(s.to_string()))?;
        MonthFilter::from_number(idx as u32 + 1)
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("All"),
            MonthFilter::Month(m) => f.write_str(month_name(*m).unwrap_or("Unknown")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Day(Weekday),
}

impl DayFilter {
    pub fn matches(&self, day: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(d) => *d == day,
        }
    }
}

impl FromStr for DayFilter {
    type Err = TripError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("all") {
            return Ok(DayFilter::All);
        }
        // chrono's own parser also takes "mon", "tue", ...; only full names are accepted here.
        WEEKDAYS
            .iter()
            .copied()
            .find(|day| weekday_name(*day).eq_ignore_ascii_case(wanted))
            .map(DayFilter::Day)
            .ok_or_else(|| TripError::InvalidDay(s.to_string()))
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("All"),
            DayFilter::Day(d) => f.write_str(weekday_name(*d)),
        }
    }
}

/// The month/day restriction for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl Selection {
    pub fn new(month: MonthFilter, day: DayFilter) -> Self {
        Self { month, day }
    }

    /// Parses a selection from user-supplied month and day strings.
    pub fn parse(month: &str, day: &str) -> Result<Self, TripError> {
        Ok(Self {
            month: month.parse()?,
            day: day.parse()?,
        })
    }

    pub fn matches(&self, trip: &Trip) -> bool {
        self.month.matches(trip.month) && self.day.matches(trip.weekday)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "month/s: {}, day/s: {}", self.month, self.day)
    }
}
