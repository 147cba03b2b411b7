//! The board: an immutable wall/floor grid parsed from text.

use std::collections::HashMap;
use std::fmt;

use rand::Rng;

use crate::{BoardError, Cell, Coordinate, Dimensions};

/// The default 10x10 arena: a full enclosure with a 2x2 wall fragment in
/// the middle. Used whenever a game is created without an explicit board.
pub const DEFAULT_BOARD_TEXT: &str = "\
##########
#        #
#        #
#        #
#   ##   #
#   ##   #
#        #
#        #
#        #
##########
";

/// An immutable grid of [`Cell`]s.
///
/// Invariants, established at parse time and never revisited:
/// - rectangular: every row has the same length;
/// - fully enclosed: the entire outer border is wall;
/// - at least one floor cell exists.
///
/// Construction is the only fallible operation; every query afterwards is
/// total. The board is shared freely by value (it is cloned into each
/// game's state) and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Row-major cell matrix.
    cells: Vec<Vec<Cell>>,
    /// `(row, col) -> cell` lookup, one entry per cell of the matrix.
    lookup: HashMap<Coordinate, Cell>,
    dimensions: Dimensions,
    /// Every floor coordinate, in row-major order. Non-empty by the
    /// walkability invariant; backs the uniform random pick.
    floor_cells: Vec<Coordinate>,
}

impl Board {
    /// Parses a board from its text representation.
    ///
    /// Each line is a row; `#` is wall and every other character
    /// (including space) is floor. Leading and trailing empty lines are
    /// trimmed. Validation reports the first failure in a fixed order:
    /// [`BoardError::NonRectangular`], then [`BoardError::NotEnclosed`],
    /// then [`BoardError::Unwalkable`].
    pub fn parse(text: &str) -> Result<Board, BoardError> {
        let lines: Vec<&str> = text.lines().collect();
        let start = lines.iter().position(|l| !l.trim().is_empty());
        let end = lines.iter().rposition(|l| !l.trim().is_empty());
        let rows: &[&str] = match (start, end) {
            (Some(s), Some(e)) => &lines[s..=e],
            _ => &[],
        };

        let cells: Vec<Vec<Cell>> = rows
            .iter()
            .map(|line| {
                line.chars()
                    .map(|ch| if ch == '#' { Cell::Wall } else { Cell::Floor })
                    .collect()
            })
            .collect();

        Self::validate(&cells)?;

        let dimensions = Dimensions {
            rows: cells.len(),
            cols: cells.first().map_or(0, Vec::len),
        };

        let mut lookup = HashMap::new();
        let mut floor_cells = Vec::new();
        for (row, cells_in_row) in cells.iter().enumerate() {
            for (col, cell) in cells_in_row.iter().enumerate() {
                let coord = Coordinate::new(row, col);
                lookup.insert(coord, *cell);
                if cell.is_floor() {
                    floor_cells.push(coord);
                }
            }
        }

        Ok(Board {
            cells,
            lookup,
            dimensions,
            floor_cells,
        })
    }

    fn validate(cells: &[Vec<Cell>]) -> Result<(), BoardError> {
        let expected = cells.first().map_or(0, Vec::len);
        for (row, cells_in_row) in cells.iter().enumerate() {
            if cells_in_row.len() != expected {
                return Err(BoardError::NonRectangular {
                    row,
                    len: cells_in_row.len(),
                    expected,
                });
            }
        }

        let last_row = cells.len().saturating_sub(1);
        for (row, cells_in_row) in cells.iter().enumerate() {
            let last_col = cells_in_row.len().saturating_sub(1);
            for (col, cell) in cells_in_row.iter().enumerate() {
                let on_border =
                    row == 0 || row == last_row || col == 0 || col == last_col;
                if on_border && cell.is_floor() {
                    return Err(BoardError::NotEnclosed { row, col });
                }
            }
        }

        let has_floor = cells
            .iter()
            .any(|row| row.iter().any(|cell| cell.is_floor()));
        if !has_floor {
            return Err(BoardError::Unwalkable);
        }

        Ok(())
    }

    /// Returns `true` iff `coord` is inside the board and is a floor cell.
    /// Out-of-bounds coordinates are simply not walkable.
    pub fn walkable(&self, coord: Coordinate) -> bool {
        self.lookup.get(&coord).copied().is_some_and(Cell::is_floor)
    }

    /// Returns `true` iff `a` and `b` are 4-connected neighbors.
    ///
    /// A cell counts as its own neighbor, so a "move" to the current
    /// position is reachable (and a no-op). The relation is symmetric.
    pub fn neighbors(&self, a: Coordinate, b: Coordinate) -> bool {
        let row_delta = a.row.abs_diff(b.row);
        let col_delta = a.col.abs_diff(b.col);
        row_delta + col_delta <= 1
    }

    /// Picks a uniformly random floor cell.
    ///
    /// The RNG is injected so callers (and tests) control determinism;
    /// the board itself holds no randomness.
    pub fn random_walkable_cell(&self, rng: &mut impl Rng) -> Coordinate {
        self.floor_cells[rng.random_range(0..self.floor_cells.len())]
    }

    /// The in-bounds 3x3 Moore neighborhood centered on `center`,
    /// including the center itself. Out-of-bounds coordinates are
    /// omitted; walls are included (filtering victims by position is the
    /// caller's concern, and walls never hold players).
    pub fn blast_radius(&self, center: Coordinate) -> Vec<Coordinate> {
        let mut radius = Vec::with_capacity(9);
        let row_lo = center.row.saturating_sub(1);
        let col_lo = center.col.saturating_sub(1);
        for row in row_lo..=center.row + 1 {
            for col in col_lo..=center.col + 1 {
                if row < self.dimensions.rows && col < self.dimensions.cols {
                    radius.push(Coordinate::new(row, col));
                }
            }
        }
        radius
    }

    /// Board dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// The row-major cell matrix.
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// The `(row, col) -> cell` lookup map. Its key set covers every cell
    /// of the board exactly once.
    pub fn cell_map(&self) -> &HashMap<Coordinate, Cell> {
        &self.lookup
    }
}

/// The default arena from [`DEFAULT_BOARD_TEXT`].
impl Default for Board {
    fn default() -> Self {
        Board::parse(DEFAULT_BOARD_TEXT).expect("default board text is valid")
    }
}

/// Renders the board back to its text form: one line per row, `#` for
/// wall, space for floor, a trailing newline after each row. Parsing the
/// output yields an equal board.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                f.write_str(if cell.is_floor() { " " } else { "#" })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    const SMALL: &str = "\
#####
#   #
# # #
#####
";

    #[test]
    fn test_parse_valid_board() {
        let board = Board::parse(SMALL).unwrap();
        assert_eq!(board.dimensions(), Dimensions { rows: 4, cols: 5 });
        assert_eq!(board.cells()[0][0], Cell::Wall);
        assert_eq!(board.cells()[1][1], Cell::Floor);
        assert_eq!(board.cells()[2][2], Cell::Wall);
    }

    #[test]
    fn test_parse_maps_non_hash_characters_to_floor() {
        let board = Board::parse("####\n#.x#\n####").unwrap();
        assert!(board.walkable(Coordinate::new(1, 1)));
        assert!(board.walkable(Coordinate::new(1, 2)));
    }

    #[test]
    fn test_parse_trims_surrounding_empty_lines() {
        let padded = format!("\n\n{SMALL}\n\n");
        assert_eq!(Board::parse(&padded).unwrap(), Board::parse(SMALL).unwrap());
    }

    #[test]
    fn test_parse_non_rectangular() {
        let result = Board::parse("#####\n#  #\n#####");
        assert!(matches!(
            result,
            Err(BoardError::NonRectangular { row: 1, len: 4, expected: 5 })
        ));
    }

    #[test]
    fn test_parse_not_enclosed_border_gap() {
        // Hole in the right border of the middle row.
        let result = Board::parse("#####\n#    \n#####");
        assert!(matches!(
            result,
            Err(BoardError::NotEnclosed { row: 1, col: 4 })
        ));
    }

    #[test]
    fn test_parse_no_floor() {
        assert_eq!(Board::parse("###\n###\n###"), Err(BoardError::Unwalkable));
        assert_eq!(Board::parse(""), Err(BoardError::Unwalkable));
    }

    #[test]
    fn test_rectangularity_reported_before_enclosure() {
        // Both defects present; the row-length mismatch wins.
        let result = Board::parse("## \n# \n###");
        assert!(matches!(result, Err(BoardError::NonRectangular { .. })));
    }

    #[test]
    fn test_render_round_trips() {
        let board = Board::parse(SMALL).unwrap();
        assert_eq!(board.to_string(), SMALL);
        assert_eq!(Board::parse(&board.to_string()).unwrap(), board);
    }

    #[test]
    fn test_default_board_shape() {
        let board = Board::default();
        assert_eq!(board.dimensions(), Dimensions { rows: 10, cols: 10 });
        // Interior wall fragment.
        assert!(!board.walkable(Coordinate::new(4, 4)));
        assert!(!board.walkable(Coordinate::new(5, 5)));
        // Plenty of open floor.
        assert!(board.walkable(Coordinate::new(1, 1)));
        assert!(board.walkable(Coordinate::new(8, 8)));
    }

    #[test]
    fn test_walkable_out_of_bounds_is_false() {
        let board = Board::parse(SMALL).unwrap();
        assert!(!board.walkable(Coordinate::new(99, 0)));
        assert!(!board.walkable(Coordinate::new(0, 99)));
    }

    #[test]
    fn test_neighbors_adjacent_and_self() {
        let board = Board::parse(SMALL).unwrap();
        let a = Coordinate::new(1, 1);
        assert!(board.neighbors(a, a), "a cell is its own neighbor");
        assert!(board.neighbors(a, Coordinate::new(1, 2)));
        assert!(board.neighbors(a, Coordinate::new(2, 1)));
        // Diagonal is not 4-connected.
        assert!(!board.neighbors(a, Coordinate::new(2, 2)));
        // Two steps away on one axis.
        assert!(!board.neighbors(a, Coordinate::new(1, 3)));
    }

    #[test]
    fn test_neighbors_is_symmetric() {
        let board = Board::parse(SMALL).unwrap();
        let coords: Vec<Coordinate> = (0..4)
            .flat_map(|r| (0..5).map(move |c| Coordinate::new(r, c)))
            .collect();
        for &a in &coords {
            for &b in &coords {
                assert_eq!(board.neighbors(a, b), board.neighbors(b, a));
            }
        }
    }

    #[test]
    fn test_blast_radius_interior() {
        let board = Board::default();
        let radius = board.blast_radius(Coordinate::new(2, 3));
        assert_eq!(radius.len(), 9);
        assert!(radius.contains(&Coordinate::new(2, 3)), "includes center");
        assert!(radius.contains(&Coordinate::new(1, 2)));
        assert!(radius.contains(&Coordinate::new(3, 4)));
        assert!(!radius.contains(&Coordinate::new(2, 5)));
    }

    #[test]
    fn test_blast_radius_clipped_at_origin() {
        let board = Board::default();
        let radius = board.blast_radius(Coordinate::new(0, 0));
        // Only the 2x2 block inside the board survives clipping.
        assert_eq!(radius.len(), 4);
        assert!(radius.contains(&Coordinate::new(0, 0)));
        assert!(radius.contains(&Coordinate::new(1, 1)));
    }

    #[test]
    fn test_blast_radius_clipped_at_far_edge() {
        let board = Board::default();
        let radius = board.blast_radius(Coordinate::new(9, 9));
        assert_eq!(radius.len(), 4);
    }

    #[test]
    fn test_random_walkable_cell_is_always_floor() {
        let board = Board::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let coord = board.random_walkable_cell(&mut rng);
            assert!(board.walkable(coord));
        }
    }

    #[test]
    fn test_random_walkable_cell_deterministic_with_seed() {
        let board = Board::default();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(
                board.random_walkable_cell(&mut a),
                board.random_walkable_cell(&mut b)
            );
        }
    }

    #[test]
    fn test_cell_map_covers_every_cell() {
        let board = Board::parse(SMALL).unwrap();
        let dims = board.dimensions();
        assert_eq!(board.cell_map().len(), dims.rows * dims.cols);
    }
}
