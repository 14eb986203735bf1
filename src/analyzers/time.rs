use crate::analyzers::types::TimeStats;
use crate::analyzers::utility::mode;
use crate::error::{Result, TripError};
use crate::filter::{WEEKDAYS, weekday_name};
use crate::trips::TripView;

/// Most popular month, weekday and start hour of the trips in `view`.
///
/// # Errors
///
/// [`TripError::EmptyDataset`] if `view` has no trips.
pub fn time_stats(view: &TripView) -> Result<TimeStats> {
    view.require_rows()?;

    let popular_month = mode(view.iter().map(|t| t.month)).ok_or(TripError::EmptyDataset)?;
    // Monday = 0, so ties resolve in calendar order
    let popular_day = mode(view.iter().map(|t| t.weekday.num_days_from_monday()))
        .ok_or(TripError::EmptyDataset)?;
    let popular_hour = mode(view.iter().map(|t| t.hour)).ok_or(TripError::EmptyDataset)?;

    Ok(TimeStats {
        popular_month,
        popular_day: weekday_name(WEEKDAYS[popular_day as usize]).to_string(),
        popular_hour,
    })
}
