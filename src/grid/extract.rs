use tracing::{debug, trace};

use crate::catalog::{MatchMode, ModuleCatalog};
use crate::grid::Grid;
use crate::grid::classify::{CellClassifier, CellKind, MarkerClassifier};
use crate::model::{DEFAULT_LOCATION, RawObservation, Weekday};

/// Substring that marks a venue row in the exported timetable.
pub const DEFAULT_LOCATION_MARKER: &str = "BIUST -";

/// Settings for walking a timetable grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Modules to report; cells mentioning anything else are ignored.
    pub catalog: ModuleCatalog,
    pub match_mode: MatchMode,
    pub location_marker: String,
    /// Rows containing any of these are never treated as venue rows.
    pub excluded_markers: Vec<String>,
    /// Location given to classes seen before the first venue row.
    pub default_location: String,
}

impl ExtractConfig {
    pub fn new(catalog: ModuleCatalog) -> Self {
        Self {
            catalog,
            match_mode: MatchMode::default(),
            location_marker: DEFAULT_LOCATION_MARKER.to_string(),
            excluded_markers: vec!["Semester".to_string()],
            default_location: DEFAULT_LOCATION.to_string(),
        }
    }

    pub fn classifier(&self) -> MarkerClassifier {
        MarkerClassifier::new(self.location_marker.clone(), self.excluded_markers.clone())
    }
}

/// Extracts observations using the marker classifier described by `config`.
pub fn extract(grid: &Grid, config: &ExtractConfig) -> Vec<RawObservation> {
    extract_with(grid, config, &config.classifier())
}

/// Walks the grid row by row and emits one observation per catalogued module
/// per class cell.
///
/// The first cell of a row decides its role. A venue row sets the location for
/// the rows below it; a time-slot row contributes its day cells. A row holding
/// day headings remaps columns to days; until one is seen, columns 1 to 5 are
/// Monday to Friday.
pub fn extract_with<C>(grid: &Grid, config: &ExtractConfig, classifier: &C) -> Vec<RawObservation>
where
    C: CellClassifier + ?Sized,
{
    let mut columns: Vec<(usize, Weekday)> = Weekday::ALL
        .into_iter()
        .enumerate()
        .map(|(index, day)| (index + 1, day))
        .collect();
    let mut location = config.default_location.clone();
    let mut observations = Vec::new();

    for (row_index, row) in grid.rows().iter().enumerate() {
        let first = row.first().map(String::as_str).unwrap_or("");
        match classifier.classify(first) {
            CellKind::LocationMarker => {
                location = first.to_string();
                debug!(row = row_index, %location, "entered venue");
                continue;
            }
            CellKind::TimeSlot => {}
            _ => {
                let headers = day_headers(row, classifier);
                if !headers.is_empty() {
                    trace!(row = row_index, columns = headers.len(), "remapped day columns");
                    columns = headers;
                }
                continue;
            }
        }

        for &(col, day) in &columns {
            let text = grid.cell(row_index, col);
            // Class labels may start with a digit and hold a hyphen.
            if !matches!(classifier.classify(text), CellKind::Data | CellKind::TimeSlot) {
                continue;
            }

            for module in config.catalog.matches(text, config.match_mode) {
                observations.push(RawObservation {
                    module: module.to_string(),
                    location: location.clone(),
                    day,
                    time: first.to_string(),
                    label: text.to_string(),
                });
            }
        }
    }

    debug!(
        rows = grid.row_count(),
        observations = observations.len(),
        "extracted observations from grid"
    );
    observations
}

fn day_headers<C>(row: &[String], classifier: &C) -> Vec<(usize, Weekday)>
where
    C: CellClassifier + ?Sized,
{
    row.iter()
        .enumerate()
        .filter_map(|(col, text)| match classifier.classify(text) {
            CellKind::DayHeader(day) => Some((col, day)),
            _ => None,
        })
        .collect()
}
