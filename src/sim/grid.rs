//! Grid geometry: cells and directions
//!
//! Cells are integer coordinates with `(0, 0)` in the top-left corner and
//! `y` growing downward.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A board cell `(x, y)`
pub type Cell = IVec2;

/// One of the four unit moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed iteration order, used wherever ties must break deterministically
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit offset of one step in this direction
    #[inline]
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Direction of a unit offset, if it is one
    pub fn from_delta(delta: IVec2) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.delta() == delta)
    }
}

/// Whether `cell` lies on a board of side `size`
#[inline]
pub fn in_bounds(cell: Cell, size: i32) -> bool {
    cell.x >= 0 && cell.y >= 0 && cell.x < size && cell.y < size
}

/// Manhattan distance between two cells
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}

/// Stable row-major ordering for snapshots
pub fn sort_cells(cells: &mut [Cell]) {
    cells.sort_by_key(|c| (c.y, c.x));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites_cancel() {
        for dir in Direction::ALL {
            assert_eq!(dir.delta() + dir.opposite().delta(), IVec2::ZERO);
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_from_delta() {
        assert_eq!(Direction::from_delta(IVec2::new(1, 0)), Some(Direction::Right));
        assert_eq!(Direction::from_delta(IVec2::new(0, -1)), Some(Direction::Up));
        assert_eq!(Direction::from_delta(IVec2::new(1, 1)), None);
    }

    #[test]
    fn test_bounds() {
        assert!(in_bounds(IVec2::new(0, 0), 64));
        assert!(in_bounds(IVec2::new(63, 63), 64));
        assert!(!in_bounds(IVec2::new(-1, 0), 64));
        assert!(!in_bounds(IVec2::new(0, 64), 64));
    }

    #[test]
    fn test_sort_cells_row_major() {
        let mut cells = vec![IVec2::new(3, 1), IVec2::new(0, 2), IVec2::new(1, 1)];
        sort_cells(&mut cells);
        assert_eq!(cells, vec![IVec2::new(1, 1), IVec2::new(3, 1), IVec2::new(0, 2)]);
        assert_eq!(manhattan(IVec2::new(1, 1), IVec2::new(4, -1)), 5);
    }
}
