//! Text grid of an exported timetable and the logic that walks it.

pub mod classify;
pub mod extract;

pub use classify::{CellClassifier, CellKind, MarkerClassifier};
pub use extract::{ExtractConfig, extract, extract_with};

/// A block of cells merged into one in the source spreadsheet. Both corners
/// are inclusive `(row, column)` positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedRegion {
    pub start: (usize, usize),
    pub end: (usize, usize),
}

/// Rows of trimmed cell text. Rows may differ in length; a missing cell reads
/// as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|cell| cell.trim().to_string()).collect())
            .collect();
        Self { rows }
    }

    /// Convenience constructor for literal grids.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Writes a cell, growing the grid when the position lies outside it.
    pub fn set(&mut self, row: usize, col: usize, value: impl Into<String>) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, String::new());
        }
        cells[col] = value.into();
    }

    /// Copies each region's top-left value into every cell it covers.
    ///
    /// Spreadsheet readers only report a value for the anchor of a merged
    /// block; after flattening, a class drawn across two time slots reads the
    /// same in both.
    pub fn flatten_merged(&mut self, regions: &[MergedRegion]) {
        for region in regions {
            let (top, left) = region.start;
            let (bottom, right) = region.end;
            if bottom < top || right < left {
                continue;
            }

            let value = self.cell(top, left).to_string();
            if value.is_empty() {
                continue;
            }

            for row in top..=bottom {
                for col in left..=right {
                    self.set(row, col, value.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_trimmed_and_missing_cells_read_empty() {
        let grid = Grid::from_rows([vec!["  0800-0850 ", "MATH 101"], vec!["x"]]);
        assert_eq!(grid.cell(0, 0), "0800-0850");
        assert_eq!(grid.cell(1, 1), "");
        assert_eq!(grid.cell(9, 9), "");
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.row_count(), 2);
    }

    #[test]
    fn flattening_fills_vertical_and_horizontal_blocks() {
        let mut grid = Grid::from_rows([
            vec!["BIUST - HALL", "", ""],
            vec!["0800-0850", "MATH 101 Lecture", ""],
            vec!["0850-0940", "", ""],
        ]);

        grid.flatten_merged(&[
            MergedRegion {
                start: (0, 0),
                end: (0, 2),
            },
            MergedRegion {
                start: (1, 1),
                end: (2, 1),
            },
        ]);

        assert_eq!(grid.cell(0, 2), "BIUST - HALL");
        assert_eq!(grid.cell(2, 1), "MATH 101 Lecture");
        assert_eq!(grid.cell(2, 2), "");
    }

    #[test]
    fn flattening_grows_grid_to_cover_region() {
        let mut grid = Grid::from_rows([vec!["0800-0850", "PHYS 101"]]);
        grid.flatten_merged(&[MergedRegion {
            start: (0, 1),
            end: (1, 3),
        }]);

        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.cell(1, 3), "PHYS 101");
        assert_eq!(grid.cell(1, 0), "");
    }
}
