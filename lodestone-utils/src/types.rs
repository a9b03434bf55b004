//! Position types for the sparse block grid.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::math::Vector3;

/// A block position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockPos(pub Vector3<i32>);

impl std::hash::Hash for BlockPos {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_i64(self.as_i64());
    }
}

impl BlockPos {
    const PACKED_HORIZONTAL_LEN: u32 = 26;
    const PACKED_Y_LEN: u32 = 12;
    const X_OFFSET: u32 = Self::PACKED_HORIZONTAL_LEN + Self::PACKED_Y_LEN; // 38
    const Z_OFFSET: u32 = Self::PACKED_Y_LEN; // 12
    const PACKED_X_MASK: i64 = (1i64 << Self::PACKED_HORIZONTAL_LEN) - 1;
    const PACKED_Y_MASK: i64 = (1i64 << Self::PACKED_Y_LEN) - 1;
    const PACKED_Z_MASK: i64 = (1i64 << Self::PACKED_HORIZONTAL_LEN) - 1;

    /// Creates a new `BlockPos` with the given coordinates.
    #[must_use]
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// Converts the `BlockPos` to an `i64`.
    /// Layout: X (26 bits, offset 38) | Z (26 bits, offset 12) | Y (12 bits, offset 0)
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        let x = self.0.x as i64;
        let y = self.0.y as i64;
        let z = self.0.z as i64;
        ((x & Self::PACKED_X_MASK) << Self::X_OFFSET)
            | ((z & Self::PACKED_Z_MASK) << Self::Z_OFFSET)
            | (y & Self::PACKED_Y_MASK)
    }

    /// Creates a `BlockPos` from an `i64`.
    /// Layout: X (26 bits, offset 38) | Z (26 bits, offset 12) | Y (12 bits, offset 0)
    #[must_use]
    pub const fn from_i64(value: i64) -> Self {
        let x = value >> Self::X_OFFSET;
        let y = value & Self::PACKED_Y_MASK;
        let z = (value >> Self::Z_OFFSET) & Self::PACKED_Z_MASK;

        // Sign extend the values
        let x = (x << (64 - Self::PACKED_HORIZONTAL_LEN)) >> (64 - Self::PACKED_HORIZONTAL_LEN);
        let y = (y << (64 - Self::PACKED_Y_LEN)) >> (64 - Self::PACKED_Y_LEN);
        let z = (z << (64 - Self::PACKED_HORIZONTAL_LEN)) >> (64 - Self::PACKED_HORIZONTAL_LEN);

        Self(Vector3::new(x as i32, y as i32, z as i32))
    }

    /// Returns a new `BlockPos` offset by the given amounts.
    #[must_use]
    pub const fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self(self.0.add_raw(dx, dy, dz))
    }

    /// Returns the block position one cell away in the given direction.
    #[must_use]
    pub const fn relative(&self, direction: Direction) -> Self {
        direction.relative(self)
    }

    /// Returns the six adjacent block positions, in neighbor-update order.
    #[must_use]
    pub fn adjacent(&self) -> [BlockPos; 6] {
        Direction::ALL.map(|dir| dir.relative(self))
    }

    /// Returns the x coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.0.x
    }

    /// Returns the y coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.0.y
    }

    /// Returns the z coordinate.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.0.z
    }
}

impl Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<(i32, i32, i32)> for BlockPos {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}
