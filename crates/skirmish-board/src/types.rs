//! Core grid vocabulary: cells, coordinates, directions, dimensions.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A single grid square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    /// Impassable. Players can never occupy a wall.
    Wall,
    /// Open ground. Any number of players may stand on the same floor cell.
    Floor,
}

impl Cell {
    /// Returns `true` for [`Cell::Floor`].
    pub fn is_floor(self) -> bool {
        matches!(self, Cell::Floor)
    }
}

// ---------------------------------------------------------------------------
// Coordinate
// ---------------------------------------------------------------------------

/// A `(row, col)` grid position with a top-left origin.
///
/// `(0, 0)` is the top-left corner of the board in storage order. Display
/// code may choose a different visual origin (the text renderer prints row
/// 0 last, so pictures read bottom-left-up), but every API in the engine
/// speaks this coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    /// Row index, 0 at the top.
    pub row: usize,
    /// Column index, 0 at the left.
    pub col: usize,
}

impl Coordinate {
    /// Creates a coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The 4-neighbor of this coordinate in the given direction.
    ///
    /// Returns `None` when the step would leave the non-negative grid
    /// (moving up from row 0 or left from column 0). On an enclosed board
    /// that can only happen for positions on the border, which are walls
    /// and never hold a player — but callers still get a total function.
    pub fn step(self, dir: Direction) -> Option<Coordinate> {
        let (row, col) = match dir {
            Direction::Up => (self.row.checked_sub(1)?, self.col),
            Direction::Down => (self.row + 1, self.col),
            Direction::Left => (self.row, self.col.checked_sub(1)?),
            Direction::Right => (self.row, self.col + 1),
        };
        Some(Coordinate { row, col })
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// A cardinal movement direction.
///
/// Directions are expressed in storage coordinates: `Up` decreases the
/// row index, `Down` increases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Dimensions
// ---------------------------------------------------------------------------

/// Board dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_moves_one_cell_on_one_axis() {
        let c = Coordinate::new(3, 4);
        assert_eq!(c.step(Direction::Up), Some(Coordinate::new(2, 4)));
        assert_eq!(c.step(Direction::Down), Some(Coordinate::new(4, 4)));
        assert_eq!(c.step(Direction::Left), Some(Coordinate::new(3, 3)));
        assert_eq!(c.step(Direction::Right), Some(Coordinate::new(3, 5)));
    }

    #[test]
    fn test_step_off_grid_returns_none() {
        assert_eq!(Coordinate::new(0, 5).step(Direction::Up), None);
        assert_eq!(Coordinate::new(5, 0).step(Direction::Left), None);
    }

    #[test]
    fn test_coordinate_serializes_with_named_fields() {
        let json = serde_json::to_value(Coordinate::new(1, 2)).unwrap();
        assert_eq!(json["row"], 1);
        assert_eq!(json["col"], 2);
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        let json = serde_json::to_string(&Direction::Up).unwrap();
        assert_eq!(json, "\"up\"");
    }

    #[test]
    fn test_cell_is_floor() {
        assert!(Cell::Floor.is_floor());
        assert!(!Cell::Wall.is_floor());
    }
}
