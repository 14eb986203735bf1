use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, TripError};

/// Cities shipped with the bikeshare project and their CSV file names.
pub const BUILTIN_CITIES: &[(&str, &str)] = &[
    ("chicago", "chicago.csv"),
    ("new york city", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

/// Maps city names to the CSV resource holding their trips.
///
/// Either the built-in table resolved against a data directory, or a plain
/// JSON object on disk:
/// ```json
/// {
///   "chicago": "chicago.csv",
///   "boston": "/srv/bikeshare/boston.csv.gz"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DatasetSource {
    entries: BTreeMap<String, PathBuf>,
}

impl DatasetSource {
    /// The three built-in cities, with files looked up in `data_dir`.
    pub fn builtin(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        let entries = BUILTIN_CITIES
            .iter()
            .map(|(city, file)| (city.to_string(), data_dir.join(file)))
            .collect();
        Self { entries }
    }

    /// Loads the mapping from a JSON file at `path`.
    ///
    /// Relative resource paths are resolved against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| TripError::InvalidConfig(format!("{}: {e}", path.display())))?;
        let raw: BTreeMap<String, PathBuf> = serde_json::from_str(&content)
            .map_err(|e| TripError::InvalidConfig(format!("{}: {e}", path.display())))?;
        if raw.is_empty() {
            return Err(TripError::InvalidConfig(format!(
                "{}: no cities configured",
                path.display()
            )));
        }

        let base = path.parent().unwrap_or(Path::new("."));
        let entries = raw
            .into_iter()
            .map(|(city, file)| (normalize(&city), base.join(file)))
            .collect();
        Ok(Self { entries })
    }

    /// Returns the resource path for `city` (case-insensitive).
    pub fn resolve(&self, city: &str) -> Result<&Path> {
        self.entries
            .get(&normalize(city))
            .map(PathBuf::as_path)
            .ok_or_else(|| TripError::UnknownCity(city.trim().to_string()))
    }

    pub fn contains(&self, city: &str) -> bool {
        self.entries.contains_key(&normalize(city))
    }

    /// Configured city names in sorted order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn normalize(city: &str) -> String {
    city.trim().to_lowercase()
}
