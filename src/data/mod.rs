//! Auxiliary JSON data files for the about page (honors and travel)

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ContentError, Result};

pub const HONORS_FILE: &str = "honors.json";
pub const TRAVEL_FILE: &str = "travel.json";

/// Visited places for the travel maps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelData {
    pub details: TravelDetails,
}

/// Places keyed by display name: countries for `world`, provinces for `china`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelDetails {
    pub world: IndexMap<String, Visit>,
    pub china: IndexMap<String, Visit>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub visits: u32,
    #[serde(default)]
    pub description: String,
}

impl TravelData {
    pub fn len(&self) -> usize {
        self.details.world.len() + self.details.china.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Load `honors.json` from the data directory.
///
/// Entries are passed through as-is for the about page. A missing file is
/// an empty list.
pub fn load_honors<P: AsRef<Path>>(data_dir: P) -> Result<Vec<Value>> {
    let path = data_dir.as_ref().join(HONORS_FILE);
    load_json(path, "no honors will be listed")
}

/// Load `travel.json` from the data directory. A missing file has no places.
pub fn load_travel<P: AsRef<Path>>(data_dir: P) -> Result<TravelData> {
    let path = data_dir.as_ref().join(TRAVEL_FILE);
    load_json(path, "the travel maps will be empty")
}

fn load_json<T: DeserializeOwned + Default>(path: PathBuf, when_missing: &str) -> Result<T> {
    if !path.is_file() {
        tracing::warn!("{:?} not found, {}", path, when_missing);
        return Ok(T::default());
    }

    let content = fs::read_to_string(&path).map_err(|e| ContentError::read(&path, e))?;
    serde_json::from_str(&content).map_err(|e| ContentError::Data {
        path,
        message: e.to_string(),
    })
}
