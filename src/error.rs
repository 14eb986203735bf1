//! Error types for loading and analyzing trip data.

use std::path::PathBuf;
use thiserror::Error;

use crate::trips::Column;

/// All errors produced while loading, filtering, or aggregating trips.
#[derive(Error, Debug)]
pub enum TripError {
    /// The requested city is not a key of the dataset source.
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// The CSV resource for a city could not be opened or read.
    #[error("Could not read trip data from {path}: {source}")]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A row's start time did not match any accepted timestamp format.
    #[error("Malformed start time {value:?} on line {line} of {path}")]
    MalformedTimestamp {
        path: PathBuf,
        line: u64,
        value: String,
    },

    /// A row could not be decoded (e.g. a non-numeric trip duration).
    #[error("Malformed row on line {line} of {path}: {source}")]
    MalformedRow {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// A required column is missing from the CSV header.
    #[error("Required column {column:?} not found in {path}")]
    MissingColumn { path: PathBuf, column: &'static str },

    /// An aggregate was requested over zero trips.
    #[error("No trips match the selected filters")]
    EmptyDataset,

    /// An optional column is not present in this city's dataset.
    #[error("{0} data is not available for this dataset")]
    MissingOptionalColumn(Column),

    /// A month filter was neither "all" nor a supported month name.
    #[error("Invalid month: {0:?} (expected january..june or all)")]
    InvalidMonth(String),

    /// A day filter was neither "all" nor a weekday name.
    #[error("Invalid day: {0:?} (expected monday..sunday or all)")]
    InvalidDay(String),

    /// The dataset source configuration could not be loaded.
    #[error("Invalid dataset configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, TripError>;
