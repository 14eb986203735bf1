//! Trip records, loaded datasets, and filtered views over them.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

use crate::error::{Result, TripError};
use crate::filter::Selection;

/// Optional columns that only some cities' datasets carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Column {
    Gender,
    BirthYear,
}

impl Column {
    /// Header name of the column in the CSV resource.
    pub fn header(&self) -> &'static str {
        match self {
            Column::Gender => "Gender",
            Column::BirthYear => "Birth Year",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Which optional columns a dataset's header carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Columns {
    pub gender: bool,
    pub birth_year: bool,
}

impl Columns {
    /// Probes a CSV header for the optional columns.
    pub fn from_headers(headers: &csv::StringRecord) -> Self {
        let has = |c: Column| headers.iter().any(|h| h.trim() == c.header());
        Self {
            gender: has(Column::Gender),
            birth_year: has(Column::BirthYear),
        }
    }

    pub fn has(&self, column: Column) -> bool {
        match column {
            Column::Gender => self.gender,
            Column::BirthYear => self.birth_year,
        }
    }

    /// Fails with [`TripError::MissingOptionalColumn`] when `column` is absent.
    pub fn require(&self, column: Column) -> Result<()> {
        if self.has(column) {
            Ok(())
        } else {
            Err(TripError::MissingOptionalColumn(column))
        }
    }
}

/// One bikeshare trip with its derived time fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    /// Trip length in seconds.
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    // derived from start_time
    pub month: u32,
    pub weekday: Weekday,
    pub hour: u32,
}

impl Trip {
    pub fn new(
        start_time: NaiveDateTime,
        trip_duration: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Self {
        Trip {
            start_time,
            trip_duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
        }
    }

    /// Set rider metadata (user type, gender and birth year)
    pub fn with_rider(
        mut self,
        user_type: Option<&str>,
        gender: Option<&str>,
        birth_year: Option<i32>,
    ) -> Self {
        self.user_type = user_type.map(str::to_string);
        self.gender = gender.map(str::to_string);
        self.birth_year = birth_year;
        self
    }
}

/// All trips loaded for one city. Read-only once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    city: String,
    columns: Columns,
    trips: Vec<Trip>,
}

impl Dataset {
    pub fn new(city: impl Into<String>, columns: Columns, trips: Vec<Trip>) -> Self {
        Self {
            city: city.into(),
            columns,
            trips,
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn columns(&self) -> Columns {
        self.columns
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// A view over every trip.
    pub fn view(&self) -> TripView<'_> {
        TripView {
            columns: self.columns,
            rows: self.trips.iter().collect(),
        }
    }

    /// The trips matching `selection`, in source order.
    pub fn filter(&self, selection: &Selection) -> TripView<'_> {
        self.view().filter(selection)
    }

    /// Consumes the dataset, keeping only trips matching `selection`.
    pub fn into_filtered(mut self, selection: &Selection) -> Dataset {
        self.trips.retain(|trip| selection.matches(trip));
        self
    }
}

/// An order-preserving subset of a [`Dataset`]; the filtered table the
/// aggregators consume.
#[derive(Debug, Clone)]
pub struct TripView<'a> {
    columns: Columns,
    rows: Vec<&'a Trip>,
}

impl<'a> TripView<'a> {
    pub fn filter(&self, selection: &Selection) -> TripView<'a> {
        TripView {
            columns: self.columns,
            rows: self
                .rows
                .iter()
                .copied()
                .filter(|trip| selection.matches(trip))
                .collect(),
        }
    }

    pub fn columns(&self) -> Columns {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Trip> + '_ {
        self.rows.iter().copied()
    }

    /// Fails with [`TripError::EmptyDataset`] when there is nothing to aggregate.
    pub fn require_rows(&self) -> Result<()> {
        if self.rows.is_empty() {
            Err(TripError::EmptyDataset)
        } else {
            Ok(())
        }
    }

    /// Up to `len` trips starting at `offset`; empty once past the end.
    pub fn page(&self, offset: usize, len: usize) -> &[&'a Trip] {
        let start = offset.min(self.rows.len());
        let end = offset.saturating_add(len).min(self.rows.len());
        &self.rows[start..end]
    }
}
