use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::error::{Result, ToolError};
use crate::grid::{Grid, MergedRegion};

/// Reads one worksheet of an `.xlsx` timetable into a text grid.
///
/// The first sheet is used when `sheet` is `None`. Cell positions keep their
/// worksheet coordinates, and merged blocks are flattened so that every
/// covered cell repeats the anchor's text.
pub fn read_grid(path: &Path, sheet: Option<&str>) -> Result<Grid> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|candidate| candidate.as_str() == name)
            .cloned()
            .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{name}'")))?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ToolError::InvalidWorkbook("workbook has no sheets".to_string()))?,
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut grid = range_to_grid(&range);

    workbook.load_merged_regions()?;
    let regions: Vec<MergedRegion> = workbook
        .merged_regions_by_sheet(&sheet_name)
        .into_iter()
        .map(|(_, _, dimensions)| MergedRegion {
            start: (dimensions.start.0 as usize, dimensions.start.1 as usize),
            end: (dimensions.end.0 as usize, dimensions.end.1 as usize),
        })
        .collect();

    debug!(
        sheet = %sheet_name,
        rows = grid.row_count(),
        merged_regions = regions.len(),
        "read worksheet"
    );

    grid.flatten_merged(&regions);
    Ok(grid)
}

fn range_to_grid(range: &Range<Data>) -> Grid {
    let (row_offset, col_offset) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![String::new(); col_offset];
        cells.extend(row.iter().map(cell_to_string));
        rows.push(cells);
    }

    Grid::new(rows)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(value) => value.clone(),
        Data::Float(value) => value.to_string(),
        Data::Int(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
