//! End-to-end pipelines behind the command-line subcommands.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::consolidate::{ConsolidateOptions, Consolidation, consolidate};
use crate::error::Result;
use crate::grid::{ExtractConfig, Grid, extract};
use crate::io::{csv_grid, excel_read, schedule_json};

/// Counts reported after a schedule has been written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub modules: usize,
    pub sessions: usize,
    pub observations: usize,
    pub malformed: usize,
}

impl RunSummary {
    fn from_consolidation(consolidation: &Consolidation) -> Self {
        Self {
            modules: consolidation.schedule.module_count(),
            sessions: consolidation.schedule.session_count(),
            observations: consolidation.observations,
            malformed: consolidation.malformed.len(),
        }
    }
}

/// Builds the consolidated schedule document from an Excel timetable.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display(), ?sheet)
)]
pub fn excel_to_schedule(
    input: &Path,
    output: &Path,
    sheet: Option<&str>,
    config: &ExtractConfig,
    options: &ConsolidateOptions,
) -> Result<RunSummary> {
    let grid = excel_read::read_grid(input, sheet)?;
    info!(rows = grid.row_count(), "read timetable grid from workbook");
    grid_to_schedule(&grid, output, config, options)
}

/// Builds the consolidated schedule document from a CSV export.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn csv_to_schedule(
    input: &Path,
    output: &Path,
    config: &ExtractConfig,
    options: &ConsolidateOptions,
) -> Result<RunSummary> {
    let grid = csv_grid::read_csv_grid(input)?;
    info!(rows = grid.row_count(), "read timetable grid from CSV");
    grid_to_schedule(&grid, output, config, options)
}

/// Re-merges an existing schedule document, such as one written before slots
/// were combined.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn consolidate_document(
    input: &Path,
    output: &Path,
    options: &ConsolidateOptions,
) -> Result<RunSummary> {
    let observations = schedule_json::read_observations(input)?;
    info!(observations = observations.len(), "read schedule document");
    write_consolidated(consolidate(observations, options), output)
}

/// Converts a worksheet to CSV with merged cells flattened. Returns the
/// number of rows written.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display(), ?sheet)
)]
pub fn excel_to_csv(input: &Path, output: &Path, sheet: Option<&str>) -> Result<usize> {
    let grid = excel_read::read_grid(input, sheet)?;
    let rows = csv_grid::write_csv_grid(output, &grid)?;
    info!(rows, "wrote flattened grid");
    Ok(rows)
}

#[instrument(level = "debug", skip_all, fields(output = %output.display()))]
fn grid_to_schedule(
    grid: &Grid,
    output: &Path,
    config: &ExtractConfig,
    options: &ConsolidateOptions,
) -> Result<RunSummary> {
    let observations = extract(grid, config);
    info!(
        observations = observations.len(),
        catalog = config.catalog.len(),
        "extracted module observations"
    );
    write_consolidated(consolidate(observations, options), output)
}

fn write_consolidated(consolidation: Consolidation, output: &Path) -> Result<RunSummary> {
    let summary = RunSummary::from_consolidation(&consolidation);
    if summary.malformed > 0 {
        warn!(
            malformed = summary.malformed,
            "some observations were skipped because their time range could not be read"
        );
    }

    schedule_json::write_schedule(output, &consolidation.schedule)?;
    debug!(?summary, "schedule written");
    info!(
        modules = summary.modules,
        sessions = summary.sessions,
        "consolidated schedule"
    );
    Ok(summary)
}
