use crate::analyzers::types::{DurationStats, Hms};
use crate::analyzers::utility::mean;
use crate::error::Result;
use crate::trips::TripView;

/// Total and mean trip duration of the trips in `view`.
///
/// The total is rounded to the nearest second; the mean is rounded half to
/// even before both are split into hours, minutes and seconds.
///
/// # Errors
///
/// [`crate::error::TripError::EmptyDataset`] if `view` has no trips.
pub fn duration_stats(view: &TripView) -> Result<DurationStats> {
    view.require_rows()?;

    let durations: Vec<f64> = view.iter().map(|t| t.trip_duration).collect();
    let total: f64 = durations.iter().sum();
    let average = mean(&durations);

    let total_seconds = whole_seconds(total.round());
    let average_seconds = whole_seconds(average.round_ties_even());

    Ok(DurationStats {
        total_seconds,
        total: Hms::from_seconds(total_seconds),
        average_seconds,
        average: Hms::from_seconds(average_seconds),
    })
}

fn whole_seconds(value: f64) -> u64 {
    // float-to-int casts saturate, so negative or NaN input lands on 0
    value as u64
}
