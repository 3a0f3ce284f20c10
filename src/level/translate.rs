//! Tile vocabulary translation.
//!
//! The generator emits levels in its own tile vocabulary; the simulator expects
//! a slightly different one. The mapping is fixed and total: symbols without an
//! entry pass through unchanged, so unknown future tiles survive translation.

use crate::level::grid::Grid;

/// Map a single source-vocabulary tile to the simulator vocabulary.
///
/// Only four symbols change meaning; everything else is identity:
/// - `!` (coin question block) becomes `Q`
/// - `(` and `)` (pipe tops with plant) become `T`
/// - `x` (path filler) becomes `S`
/// - `N` (unused) becomes `-` (open space)
pub fn translate_tile(tile: char) -> char {
    match tile {
        '!' => 'Q',
        '(' | ')' => 'T',
        'x' => 'S',
        'N' => '-',
        other => other,
    }
}

/// Translate a whole grid into the simulator vocabulary.
///
/// Pure: no reordering, no shape change, input grid untouched.
pub fn translate(grid: &Grid) -> Grid {
    grid.map_cells(translate_tile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_remapped_tiles() {
        assert_eq!(translate_tile('!'), 'Q');
        assert_eq!(translate_tile('('), 'T');
        assert_eq!(translate_tile(')'), 'T');
        assert_eq!(translate_tile('x'), 'S');
        assert_eq!(translate_tile('N'), '-');
    }

    #[test]
    fn test_identity_tiles() {
        for tile in ['-', 'o', 'X', '#', 'S', 'C', 'U', '?', '1', '2', 'g', 'G',
                     'k', 'K', 'r', 'R', 'y', 'B', 'b', '<', '>', '[', ']', 'Y'] {
            assert_eq!(translate_tile(tile), tile);
        }
    }

    #[test]
    fn test_unknown_tiles_pass_through() {
        assert_eq!(translate_tile('z'), 'z');
        assert_eq!(translate_tile('@'), '@');
    }

    #[test]
    fn test_translate_preserves_shape() {
        let grid = Grid::from_rows(&["!N(", "x-)"]).unwrap();
        let out = translate(&grid);
        assert_eq!(out.row_count(), grid.row_count());
        assert_eq!(out.col_count(), grid.col_count());
        assert_eq!(out.to_lines(), vec!["Q-T", "S-T"]);
    }
}
