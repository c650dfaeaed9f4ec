//! Square grid coordinates for the battle board
//!
//! Movement is 8-directional: diagonals cost the same as straight steps.

use serde::{Deserialize, Serialize};

use crate::battle::constants::{BOARD_HEIGHT, BOARD_WIDTH};

/// Cell on the battle board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: number of king moves between two cells
    pub fn distance(&self, other: &Self) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    /// True if the two cells touch, diagonals included
    pub fn is_adjacent(&self, other: &Self) -> bool {
        self != other && self.distance(other) == 1
    }

    /// Inside the 27x21 battle board
    pub fn in_bounds(&self) -> bool {
        self.x >= 0 && self.x < BOARD_WIDTH && self.y >= 0 && self.y < BOARD_HEIGHT
    }

    /// Row-major index into a dense board array
    pub fn index(&self) -> Option<usize> {
        self.in_bounds().then(|| (self.y * BOARD_WIDTH + self.x) as usize)
    }

    /// All 8 neighbors in a fixed order: straight steps first, then diagonals.
    ///
    /// The order is part of the pathfinder's tie-breaking, keep it stable.
    pub fn neighbors(&self) -> [GridCoord; 8] {
        GridDirection::all().map(|d| {
            let (dx, dy) = d.offset();
            GridCoord::new(self.x + dx, self.y + dy)
        })
    }
}

impl std::fmt::Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Step directions on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridDirection {
    West,
    East,
    North,
    South,
    NorthWest,
    SouthWest,
    NorthEast,
    SouthEast,
}

impl GridDirection {
    /// (dx, dy) for one step; north is y - 1
    pub fn offset(&self) -> (i32, i32) {
        match self {
            GridDirection::West => (-1, 0),
            GridDirection::East => (1, 0),
            GridDirection::North => (0, -1),
            GridDirection::South => (0, 1),
            GridDirection::NorthWest => (-1, -1),
            GridDirection::SouthWest => (-1, 1),
            GridDirection::NorthEast => (1, -1),
            GridDirection::SouthEast => (1, 1),
        }
    }

    /// All directions, in neighbor expansion order
    pub fn all() -> [GridDirection; 8] {
        [
            GridDirection::West,
            GridDirection::East,
            GridDirection::North,
            GridDirection::South,
            GridDirection::NorthWest,
            GridDirection::SouthWest,
            GridDirection::NorthEast,
            GridDirection::SouthEast,
        ]
    }
}
