use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::Result;
use crate::grid::Grid;

/// Reads a delimited export of the timetable. No row is treated as a header
/// and rows may differ in length.
pub fn read_csv_grid(path: &Path) -> Result<Grid> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Grid::new(rows))
}

/// Writes the grid as CSV, padding every row to the grid's width. Returns the
/// number of rows written.
pub fn write_csv_grid(path: &Path, grid: &Grid) -> Result<usize> {
    let width = grid.width();
    let mut writer = WriterBuilder::new().from_path(path)?;

    for row in grid.rows() {
        let mut cells: Vec<&str> = row.iter().map(String::as_str).collect();
        cells.resize(width, "");
        writer.write_record(&cells)?;
    }

    writer.flush()?;
    Ok(grid.row_count())
}
