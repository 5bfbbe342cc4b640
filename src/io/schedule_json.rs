use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::model::{DEFAULT_LOCATION, RawObservation, Schedule, Weekday};

#[derive(Debug, Deserialize)]
struct DocumentEntry {
    #[serde(default)]
    location: Option<String>,
    day: Weekday,
    time: String,
    #[serde(rename = "class", alias = "details")]
    label: String,
}

type ModuleEntries = BTreeMap<String, Vec<DocumentEntry>>;

/// Key wrapping the module mapping in the schedule document.
const WRAPPER_KEY: &str = "Module Schedules";

/// Writes the schedule document as pretty-printed JSON.
pub fn write_schedule(path: &Path, schedule: &Schedule) -> Result<()> {
    let json = serde_json::to_string_pretty(schedule)?;
    fs::write(path, json)?;
    Ok(())
}

/// Reads a schedule document, merged or not, as a flat list of observations.
///
/// Accepts the wrapped `{"Module Schedules": {...}}` form as well as a bare
/// module mapping, and `details` in place of `class`. Times are left
/// unvalidated so consolidation can report the bad ones.
pub fn read_observations(path: &Path) -> Result<Vec<RawObservation>> {
    let source = fs::read_to_string(path)?;
    parse_observations(&source)
}

pub(crate) fn parse_observations(source: &str) -> Result<Vec<RawObservation>> {
    let mut document: Value = serde_json::from_str(source)?;
    let wrapped = document
        .as_object_mut()
        .and_then(|object| object.remove(WRAPPER_KEY));
    let modules: ModuleEntries = serde_json::from_value(wrapped.unwrap_or(document))?;

    let observations = modules
        .into_iter()
        .flat_map(|(module, entries)| {
            entries.into_iter().map(move |entry| RawObservation {
                module: module.clone(),
                location: entry
                    .location
                    .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
                day: entry.day,
                time: entry.time,
                label: entry.label,
            })
        })
        .collect();

    Ok(observations)
}
