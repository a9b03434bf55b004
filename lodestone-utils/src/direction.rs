//! Direction enum representing the six cardinal directions.

use serde::{Deserialize, Serialize};

use crate::math::Axis;
use crate::types::BlockPos;

/// The six cardinal directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Negative Y direction.
    Down,
    /// Positive Y direction.
    Up,
    /// Negative Z direction.
    North,
    /// Positive Z direction.
    South,
    /// Negative X direction.
    West,
    /// Positive X direction.
    East,
}

impl Direction {
    /// All six directions, in neighbor-update order.
    pub const ALL: [Direction; 6] = [
        Direction::West,
        Direction::East,
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
    ];

    /// The four horizontal directions.
    pub const HORIZONTAL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    /// Returns the block position offset for this direction.
    #[must_use]
    pub const fn offset(&self) -> (i32, i32, i32) {
        match self {
            Direction::Down => (0, -1, 0),
            Direction::Up => (0, 1, 0),
            Direction::North => (0, 0, -1),
            Direction::South => (0, 0, 1),
            Direction::West => (-1, 0, 0),
            Direction::East => (1, 0, 0),
        }
    }

    /// Returns the block position relative to the given position in this direction.
    #[must_use]
    pub const fn relative(&self, pos: &BlockPos) -> BlockPos {
        let (dx, dy, dz) = self.offset();
        pos.offset(dx, dy, dz)
    }

    /// Returns the axis this direction is on.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        match self {
            Direction::Down | Direction::Up => Axis::Y,
            Direction::North | Direction::South => Axis::Z,
            Direction::West | Direction::East => Axis::X,
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(&self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// Returns whether this direction is horizontal (not up or down).
    #[must_use]
    pub const fn is_horizontal(&self) -> bool {
        matches!(
            self,
            Direction::North | Direction::South | Direction::East | Direction::West
        )
    }

    /// Rotates this direction 90 degrees clockwise around the Y axis.
    ///
    /// Vertical directions are unchanged.
    #[must_use]
    pub const fn rotate_y_clockwise(&self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
            other => *other,
        }
    }

    /// Rotates this direction 90 degrees counter-clockwise around the Y axis.
    ///
    /// Vertical directions are unchanged.
    #[must_use]
    pub const fn rotate_y_counter_clockwise(&self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
            other => *other,
        }
    }

    /// The two horizontal directions perpendicular to this one.
    ///
    /// Only meaningful for horizontal directions; vertical directions
    /// return themselves twice.
    #[must_use]
    pub const fn perpendiculars(&self) -> [Direction; 2] {
        [self.rotate_y_clockwise(), self.rotate_y_counter_clockwise()]
    }

    /// Returns the direction name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Direction::Down => "down",
            Direction::Up => "up",
            Direction::North => "north",
            Direction::South => "south",
            Direction::West => "west",
            Direction::East => "east",
        }
    }
}
