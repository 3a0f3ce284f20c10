//! Map file serialization for the external simulator.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::level::grid::Grid;

/// Write a grid to the simulator's on-disk map format.
///
/// One line per row, newline-separated, trailing newline. Missing parent
/// directories are created. The file handle is flushed and closed before this
/// returns, so the simulator can be invoked on the path immediately.
pub fn write_map_file(grid: &Grid, path: &Path) -> WriteResult<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    for line in grid.to_lines() {
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
    }
    file.flush()?;

    Ok(path.to_path_buf())
}

/// Result type for map file writes
pub type WriteResult<T> = Result<T, WriteError>;

/// Error type for map file writes
#[derive(Debug)]
pub struct WriteError(std::io::Error);

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Map write error: {}", self.0)
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<std::io::Error> for WriteError {
    fn from(err: std::io::Error) -> Self {
        WriteError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_writes_rows_with_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("levels").join("map.txt");

        let grid = Grid::from_rows(&["-M-", "XXX"]).unwrap();
        let written = write_map_file(&grid, &path).unwrap();

        assert_eq!(written, path);
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "-M-\nXXX\n");
    }

    #[test]
    fn test_empty_grid_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.txt");

        let grid = Grid::from_rows::<&str>(&[]).unwrap();
        write_map_file(&grid, &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}
