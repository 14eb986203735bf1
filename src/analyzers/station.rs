use crate::analyzers::types::StationStats;
use crate::analyzers::utility::mode;
use crate::error::{Result, TripError};
use crate::trips::TripView;

/// Joins a start and end station into a single trip key.
pub const TRIP_SEPARATOR: &str = " to ";

pub fn trip_key(start: &str, end: &str) -> String {
    format!("{start}{TRIP_SEPARATOR}{end}")
}

/// Splits a trip key back into `(start, end)`.
///
/// Exact only when the start station name does not itself contain the separator.
pub fn split_trip_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(TRIP_SEPARATOR)
}

/// Most common start station, end station and start-to-end trip in `view`.
///
/// # Errors
///
/// [`TripError::EmptyDataset`] if `view` has no trips.
pub fn station_stats(view: &TripView) -> Result<StationStats> {
    view.require_rows()?;

    let common_start =
        mode(view.iter().map(|t| t.start_station.as_str())).ok_or(TripError::EmptyDataset)?;
    let common_end =
        mode(view.iter().map(|t| t.end_station.as_str())).ok_or(TripError::EmptyDataset)?;
    let common_trip = mode(view.iter().map(|t| trip_key(&t.start_station, &t.end_station)))
        .ok_or(TripError::EmptyDataset)?;

    Ok(StationStats {
        common_start: common_start.to_string(),
        common_end: common_end.to_string(),
        common_trip,
    })
}
