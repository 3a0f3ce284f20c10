//! Deterministic spawn point placement.
//!
//! The simulator drops the player at the cell holding the spawn marker. The
//! locator scans columns left to right and, within each column, rows bottom-up,
//! so ground-level entry points in the leftmost traversable column win over
//! aerial ones.

use serde::{Deserialize, Serialize};

use crate::level::grid::Grid;

/// Tile symbol denoting traversable open space in the simulator vocabulary
pub const OPEN_SPACE: char = '-';

/// Tile symbol marking the player's spawn cell
pub const SPAWN_MARKER: char = 'M';

/// A (row, column) coordinate identifying the spawn cell within a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Row index, 0 at the top
    pub row: usize,

    /// Column index, 0 at the left
    pub col: usize,
}

/// Find the first valid spawn cell in a translated grid.
///
/// Returns `None` when no cell in the grid is open space (including empty
/// grids and grids with zero-length rows). Callers treat that as a warning,
/// not an error: serialization proceeds without a marker and the simulator
/// falls back to its default start.
pub fn find_spawn(grid: &Grid) -> Option<SpawnPoint> {
    let rows = grid.row_count();
    let cols = grid.col_count();

    for col in 0..cols {
        for row in (0..rows).rev() {
            if grid.get(row, col) == Some(OPEN_SPACE) {
                return Some(SpawnPoint { row, col });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prefers_bottom_of_leftmost_open_column() {
        let grid = Grid::from_rows(&["--", "-X"]).unwrap();
        assert_eq!(find_spawn(&grid), Some(SpawnPoint { row: 1, col: 0 }));
    }

    #[test]
    fn test_skips_fully_solid_columns() {
        // column 0 is solid, column 1 open only at the top
        let grid = Grid::from_rows(&["X-", "XX"]).unwrap();
        assert_eq!(find_spawn(&grid), Some(SpawnPoint { row: 0, col: 1 }));
    }

    #[test]
    fn test_all_solid_grid() {
        let grid = Grid::from_rows(&["XX", "XX"]).unwrap();
        assert_eq!(find_spawn(&grid), None);
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::from_rows::<&str>(&[]).unwrap();
        assert_eq!(find_spawn(&grid), None);
    }

    #[test]
    fn test_zero_width_rows() {
        let grid = Grid::from_rows(&["", ""]).unwrap();
        assert_eq!(find_spawn(&grid), None);
    }
}
