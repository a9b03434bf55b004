//! Shared math and position types for the lodestone simulation kernel.

pub mod direction;
pub mod math;
pub mod types;

pub use direction::Direction;
pub use math::{Axis, Vector3};
pub use types::BlockPos;
