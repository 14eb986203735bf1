use std::time::Instant;

use tracing::{debug, info, info_span};

use crate::analyzers::duration::duration_stats;
use crate::analyzers::station::station_stats;
use crate::analyzers::time::time_stats;
use crate::analyzers::types::{CityReport, Section};
use crate::analyzers::users::user_stats;
use crate::error::Result;
use crate::filter::Selection;
use crate::trips::TripView;

/// Runs all four aggregators over `view` and collects their results.
///
/// The aggregators are independent; the first error (e.g. an empty
/// selection) is returned.
pub fn analyze(city: &str, selection: &Selection, view: &TripView) -> Result<CityReport> {
    info!(city, %selection, trips = view.len(), "Analyzing trips");

    Ok(CityReport {
        city: city.to_string(),
        month: selection.month.to_string(),
        day: selection.day.to_string(),
        trips: view.len(),
        time: timed("time_stats", || time_stats(view))?,
        stations: timed("station_stats", || station_stats(view))?,
        durations: timed("duration_stats", || duration_stats(view))?,
        users: timed("user_stats", || user_stats(view))?,
    })
}

/// Runs one aggregator inside a tracing span and records its wall time.
fn timed<T>(name: &'static str, run: impl FnOnce() -> Result<T>) -> Result<Section<T>> {
    let span = info_span!("aggregate", name);
    let _enter = span.enter();

    let start = Instant::now();
    let stats = run()?;
    let elapsed_secs = start.elapsed().as_secs_f64();
    debug!(elapsed_secs, "Aggregate computed");

    Ok(Section {
        stats,
        elapsed_secs,
    })
}
