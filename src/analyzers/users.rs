use tracing::debug;

use crate::analyzers::types::{BirthYearStats, CategoryCount, UserStats};
use crate::analyzers::utility::{mode, value_counts};
use crate::error::{Result, TripError};
use crate::trips::{Column, TripView};

/// Counts of user types and, where the dataset has them, genders and birth
/// year statistics.
///
/// A missing `Gender` or `Birth Year` column is not an error: the
/// corresponding field is `None`. Blank cells are not counted.
///
/// # Errors
///
/// [`TripError::EmptyDataset`] if `view` has no trips.
pub fn user_stats(view: &TripView) -> Result<UserStats> {
    view.require_rows()?;

    let user_types = counts(view.iter().filter_map(|t| t.user_type.as_deref()));
    let genders = optional(gender_counts(view))?;
    let birth_years = optional(birth_year_stats(view))?.flatten();

    Ok(UserStats {
        user_types,
        genders,
        birth_years,
    })
}

fn counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<CategoryCount> {
    value_counts(values.filter(|v| !v.trim().is_empty()))
        .into_iter()
        .map(|(value, count)| CategoryCount::new(value, count))
        .collect()
}

fn gender_counts(view: &TripView) -> Result<Vec<CategoryCount>> {
    view.columns().require(Column::Gender)?;
    Ok(counts(view.iter().filter_map(|t| t.gender.as_deref())))
}

/// `Ok(None)` when the column exists but every selected row is blank.
fn birth_year_stats(view: &TripView) -> Result<Option<BirthYearStats>> {
    view.columns().require(Column::BirthYear)?;

    let years: Vec<i32> = view.iter().filter_map(|t| t.birth_year).collect();
    let (Some(earliest), Some(latest), Some(common)) = (
        years.iter().min().copied(),
        years.iter().max().copied(),
        mode(years.iter().copied()),
    ) else {
        debug!("No birth years in selection");
        return Ok(None);
    };

    Ok(Some(BirthYearStats {
        earliest,
        latest,
        common,
    }))
}

/// Turns a missing optional column into `None`; every other error propagates.
fn optional<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(TripError::MissingOptionalColumn(column)) => {
            debug!(%column, "Optional column not in dataset");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
