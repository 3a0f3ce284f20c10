// Core grid type for level layouts

use crate::level::spawn::{SpawnPoint, SPAWN_MARKER};

/// A rectangular grid of single-character tile symbols.
///
/// Grids are immutable once constructed; transforms such as
/// [`translate`](crate::level::translate::translate) and
/// [`with_spawn_marker`](Grid::with_spawn_marker) produce new grids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<char>>,
}

impl Grid {
    /// Build a grid from row strings, validating that all rows have equal length.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> GridResult<Self> {
        let rows: Vec<Vec<char>> = rows
            .iter()
            .map(|r| r.as_ref().chars().collect())
            .collect();

        if let Some(first) = rows.first() {
            let expected = first.len();
            for (index, row) in rows.iter().enumerate() {
                if row.len() != expected {
                    return Err(GridError::Ragged {
                        row: index,
                        expected,
                        found: row.len(),
                    });
                }
            }
        }

        Ok(Self { rows })
    }

    /// Parse a dataset cell into a grid.
    ///
    /// Two encodings are accepted:
    /// - a JSON array of strings, one string per row: `["----", "XXXX"]`
    /// - bare newline-separated rows
    ///
    /// Parsing is strict: malformed JSON or a non-string element is a
    /// [`GridError::Format`], never evaluated as anything else.
    pub fn parse(cell: &str) -> GridResult<Self> {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return Ok(Self { rows: Vec::new() });
        }

        if trimmed.starts_with('[') {
            let rows: Vec<String> = serde_json::from_str(trimmed)
                .map_err(|e| GridError::Format(e.to_string()))?;
            return Self::from_rows(&rows);
        }

        let rows: Vec<&str> = trimmed.lines().map(|l| l.trim_end_matches('\r')).collect();
        Self::from_rows(&rows)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (0 for an empty grid)
    pub fn col_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Tile at (row, col), or None when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Produce a new grid with the spawn marker written at the given cell.
    ///
    /// Out-of-bounds points leave the grid unchanged; the caller obtains the
    /// point from [`find_spawn`](crate::level::spawn::find_spawn) on this grid,
    /// so in practice the cell is always valid.
    pub fn with_spawn_marker(&self, spawn: SpawnPoint) -> Self {
        let mut rows = self.rows.clone();
        if let Some(cell) = rows.get_mut(spawn.row).and_then(|r| r.get_mut(spawn.col)) {
            *cell = SPAWN_MARKER;
        }
        Self { rows }
    }

    /// Apply a per-cell mapping, preserving shape
    pub(crate) fn map_cells(&self, f: impl Fn(char) -> char) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|&c| f(c)).collect())
                .collect(),
        }
    }

    /// Render each row as a string, in order
    pub fn to_lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.iter().collect()).collect()
    }
}

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

/// Error types for grid construction and parsing
#[derive(Debug)]
pub enum GridError {
    /// Rows have unequal lengths
    Ragged {
        /// Index of the offending row
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of the offending row
        found: usize,
    },

    /// Dataset cell is not a valid grid encoding
    Format(String),
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "Ragged grid: row {} has length {} (expected {})",
                row, found, expected
            ),
            GridError::Format(msg) => write!(f, "Grid format error: {}", msg),
        }
    }
}

impl std::error::Error for GridError {}
