//! CSV loader for bikeshare trip data.
//!
//! Reads a city's trip file (optionally gzip-compressed), derives the month,
//! weekday and hour of every trip, and probes which optional rider columns
//! the file carries.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::{ErrorKind, ReaderBuilder, StringRecord, Trim};
use flate2::read::GzDecoder;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::DatasetSource;
use crate::error::{Result, TripError};
use crate::filter::Selection;
use crate::trips::{Columns, Dataset, Trip};

/// Columns every city's dataset must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Start Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];

/// Accepted layouts for the `Start Time` column.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// A single row deserialized from a city CSV file.
#[derive(Debug, Deserialize)]
struct TripRow {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    // stored as a float ("1985.0") in the source files
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

/// Parses a start timestamp in any of the accepted formats.
pub fn parse_start_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Loads every trip for `city`.
///
/// # Errors
///
/// [`TripError::UnknownCity`] if the city is not configured,
/// [`TripError::ResourceUnavailable`] if the file cannot be read, and
/// [`TripError::MalformedTimestamp`] / [`TripError::MalformedRow`] for rows
/// that cannot be decoded. Bad rows are never skipped.
#[tracing::instrument(skip(source))]
pub fn load_dataset(source: &DatasetSource, city: &str) -> Result<Dataset> {
    let path = source.resolve(city)?;
    let city = city.trim().to_lowercase();
    let (columns, trips) = read_trips(path)?;

    info!(
        rows = trips.len(),
        gender = columns.gender,
        birth_year = columns.birth_year,
        "Trip data loaded"
    );
    Ok(Dataset::new(city, columns, trips))
}

/// Loads the trips for `city` and keeps only those matching `selection`.
pub fn load_data(source: &DatasetSource, city: &str, selection: &Selection) -> Result<Dataset> {
    let dataset = load_dataset(source, city)?;
    let total = dataset.len();
    let filtered = dataset.into_filtered(selection);
    debug!(total, kept = filtered.len(), %selection, "Trip data filtered");
    Ok(filtered)
}

/// Reads and decodes all trip rows of one CSV resource.
pub fn read_trips(path: &Path) -> Result<(Columns, Vec<Trip>)> {
    let unavailable = |source: csv::Error| TripError::ResourceUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|e| unavailable(e.into()))?;
    let is_gzip = path.extension().and_then(|e| e.to_str()) == Some("gz");
    debug!(path = %path.display(), is_gzip, "Opening trip data");

    let reader: Box<dyn Read> = if is_gzip {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let mut rdr = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);
    let headers = rdr.headers().map_err(unavailable)?.clone();
    check_required(path, &headers)?;
    let columns = Columns::from_headers(&headers);

    let mut trips = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|source| row_error(path, source))?;
        let line = record.position().map_or(0, |p| p.line());

        let row: TripRow =
            record
                .deserialize(Some(&headers))
                .map_err(|source| TripError::MalformedRow {
                    path: path.to_path_buf(),
                    line,
                    source,
                })?;

        let start_time =
            parse_start_time(&row.start_time).ok_or_else(|| TripError::MalformedTimestamp {
                path: path.to_path_buf(),
                line,
                value: row.start_time.clone(),
            })?;

        let trip = Trip::new(start_time, row.trip_duration, row.start_station, row.end_station)
            .with_rider(
                row.user_type.as_deref(),
                row.gender.as_deref(),
                row.birth_year.and_then(whole_year),
            );
        trips.push(trip);
    }

    Ok((columns, trips))
}

/// Birth years arrive as floats; `nan`, infinities and fractional or
/// out-of-range values count as missing.
fn whole_year(value: f64) -> Option<i32> {
    let in_range = (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&value);
    (in_range && value.fract() == 0.0).then_some(value as i32)
}

fn check_required(path: &Path, headers: &StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(TripError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }
    Ok(())
}

/// I/O failures mean the resource is unusable; anything else is a bad row.
fn row_error(path: &Path, source: csv::Error) -> TripError {
    match source.kind() {
        ErrorKind::Io(_) => TripError::ResourceUnavailable {
            path: path.to_path_buf(),
            source,
        },
        _ => TripError::MalformedRow {
            path: path.to_path_buf(),
            line: source.position().map_or(0, |p| p.line()),
            source,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike, Weekday};
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str =
        ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year";

    fn write_city(dir: &TempDir, file: &str, content: &str) -> DatasetSource {
        std::fs::write(dir.path().join(file), content).unwrap();
        let config = dir.path().join("cities.json");
        std::fs::write(&config, format!(r#"{{"testville": "{file}"}}"#)).unwrap();
        DatasetSource::load(&config).unwrap()
    }

    #[test]
    fn test_parse_start_time_formats() {
        let t = parse_start_time("2017-06-23 15:09:32").unwrap();
        assert_eq!((t.month(), t.day(), t.hour()), (6, 23, 15));
        assert!(parse_start_time("2017-06-23T15:09:32").is_some());
        assert!(parse_start_time("2017-06-23 15:09:32.250").is_some());
        assert!(parse_start_time("23/06/2017").is_none());
        assert!(parse_start_time("").is_none());
    }

    #[test]
    fn test_load_dataset_with_demographics() {
        let dir = tempfile::tempdir().unwrap();
        let csv = format!(
            "{HEADER}\n\
             0,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0\n\
             1,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Customer,,\n"
        );
        let source = write_city(&dir, "testville.csv", &csv);

        let ds = load_dataset(&source, "Testville").unwrap();
        assert_eq!(ds.city(), "testville");
        assert_eq!(ds.len(), 2);
        assert!(ds.columns().gender);
        assert!(ds.columns().birth_year);

        let first = &ds.trips()[0];
        assert_eq!(first.weekday, Weekday::Fri);
        assert_eq!(first.trip_duration, 321.0);
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992));

        let second = &ds.trips()[1];
        assert_eq!(second.user_type.as_deref(), Some("Customer"));
        assert_eq!(second.gender, None);
        assert_eq!(second.birth_year, None);
    }

    #[test]
    fn test_unusable_birth_years_are_missing() {
        let dir = tempfile::tempdir().unwrap();
        let csv = format!(
            "{HEADER}\n\
             0,2017-01-02 08:00:00,,60,A,B,Subscriber,Male,nan\n\
             1,2017-01-02 09:00:00,,60,A,B,Subscriber,Male,inf\n\
             2,2017-01-02 10:00:00,,60,A,B,Subscriber,Male,1985.5\n\
             3,2017-01-02 11:00:00,,60,A,B,Subscriber,Male,1985.0\n"
        );
        let source = write_city(&dir, "testville.csv", &csv);

        let ds = load_dataset(&source, "testville").unwrap();
        let years: Vec<_> = ds.trips().iter().map(|t| t.birth_year).collect();
        assert_eq!(years, vec![None, None, None, Some(1985)]);
    }

    #[test]
    fn test_whole_year() {
        assert_eq!(whole_year(1992.0), Some(1992));
        assert_eq!(whole_year(f64::NAN), None);
        assert_eq!(whole_year(f64::NEG_INFINITY), None);
        assert_eq!(whole_year(1e12), None);
    }

    #[test]
    fn test_load_dataset_without_optional_columns() {
        let dir = tempfile::tempdir().unwrap();
        let csv = ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n\
                   0,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber\n";
        let source = write_city(&dir, "testville.csv", csv);

        let ds = load_dataset(&source, "testville").unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.columns(), Columns::default());
        assert_eq!(ds.trips()[0].gender, None);
    }

    #[test]
    fn test_load_gzip_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let csv = format!("{HEADER}\n0,2017-01-01 00:07:57,2017-01-01 00:20:53,776,A,B,Subscriber,Female,1980.0\n");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(csv.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();

        std::fs::write(dir.path().join("testville.csv.gz"), compressed).unwrap();
        let config = dir.path().join("cities.json");
        std::fs::write(&config, r#"{"testville": "testville.csv.gz"}"#).unwrap();
        let source = DatasetSource::load(&config).unwrap();

        let ds = load_dataset(&source, "testville").unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.trips()[0].birth_year, Some(1980));
    }

    #[test]
    fn test_load_data_applies_selection() {
        let dir = tempfile::tempdir().unwrap();
        let csv = format!(
            "{HEADER}\n\
             0,2017-01-02 08:00:00,,60,A,B,Subscriber,,\n\
             1,2017-03-06 08:00:00,,60,A,B,Subscriber,,\n\
             2,2017-03-07 08:00:00,,60,A,B,Subscriber,,\n"
        );
        let source = write_city(&dir, "testville.csv", &csv);

        let march_mondays = load_data(&source, "testville", &Selection::parse("march", "monday").unwrap()).unwrap();
        assert_eq!(march_mondays.len(), 1);
        assert_eq!(march_mondays.trips()[0].month, 3);
    }

    #[test]
    fn test_malformed_timestamp_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let csv = format!(
            "{HEADER}\n\
             0,2017-01-02 08:00:00,,60,A,B,Subscriber,,\n\
             1,not a time,,60,A,B,Subscriber,,\n"
        );
        let source = write_city(&dir, "testville.csv", &csv);

        match load_dataset(&source, "testville") {
            Err(TripError::MalformedTimestamp { line, value, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "not a time");
            }
            other => panic!("expected MalformedTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_duration_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let csv = format!("{HEADER}\n0,2017-01-02 08:00:00,,sixty,A,B,Subscriber,,\n");
        let source = write_city(&dir, "testville.csv", &csv);

        assert!(matches!(
            load_dataset(&source, "testville"),
            Err(TripError::MalformedRow { line: 2, .. })
        ));
    }

    #[test]
    fn test_missing_required_column() {
        let dir = tempfile::tempdir().unwrap();
        let csv = ",Start Time,Trip Duration,Start Station,User Type\n0,2017-01-02 08:00:00,60,A,Subscriber\n";
        let source = write_city(&dir, "testville.csv", csv);

        assert!(matches!(
            load_dataset(&source, "testville"),
            Err(TripError::MissingColumn { column: "End Station", .. })
        ));
    }

    #[test]
    fn test_unknown_city_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = DatasetSource::builtin(dir.path());

        assert!(matches!(
            load_dataset(&source, "atlantis"),
            Err(TripError::UnknownCity(_))
        ));
        assert!(matches!(
            load_dataset(&source, "chicago"),
            Err(TripError::ResourceUnavailable { .. })
        ));
    }
}
