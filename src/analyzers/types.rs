//! Result records produced by the aggregators.

use serde::Serialize;

/// Most frequent travel times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    /// Month number, 1 = January.
    pub popular_month: u32,
    pub popular_day: String,
    /// Hour of day, 0-23.
    pub popular_hour: u32,
}

/// Most frequent stations and station pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub common_start: String,
    pub common_end: String,
    /// `"<start> to <end>"`
    pub common_trip: String,
}

/// A whole number of seconds split into hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hms {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Hms {
    pub fn from_seconds(total: u64) -> Self {
        let (minutes, seconds) = (total / 60, total % 60);
        let (hours, minutes) = (minutes / 60, minutes % 60);
        Hms {
            hours,
            minutes,
            seconds,
        }
    }

    pub fn as_seconds(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

/// Total and mean trip duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationStats {
    pub total_seconds: u64,
    pub total: Hms,
    pub average_seconds: u64,
    pub average: Hms,
}

/// Number of trips for one category value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn new(value: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// Birth year range and mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub common: i32,
}

/// Rider breakdown. Optional parts are `None` when the city's dataset has
/// no such column (or no values in it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<CategoryCount>,
    pub genders: Option<Vec<CategoryCount>>,
    pub birth_years: Option<BirthYearStats>,
}

/// One aggregator's result together with how long it took.
#[derive(Debug, Clone, Serialize)]
pub struct Section<T> {
    #[serde(flatten)]
    pub stats: T,
    pub elapsed_secs: f64,
}

/// Every aggregate for one city and selection.
#[derive(Debug, Clone, Serialize)]
pub struct CityReport {
    pub city: String,
    pub month: String,
    pub day: String,
    pub trips: usize,
    pub time: Section<TimeStats>,
    pub stations: Section<StationStats>,
    pub durations: Section<DurationStats>,
    pub users: Section<UserStats>,
}
