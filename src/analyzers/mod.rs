//! Trip aggregation.
//!
//! Each aggregator reduces a filtered [`crate::trips::TripView`] to a small
//! summary record; [`analyzer::analyze`] runs all of them for a report.

pub mod analyzer;
pub mod duration;
pub mod station;
pub mod time;
pub mod types;
pub mod users;
pub mod utility;
