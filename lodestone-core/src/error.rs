//! Boundary errors surfaced to kernel callers.

use lodestone_utils::BlockPos;
use thiserror::Error;

/// Errors returned by the mutation entry points and snapshot restore.
///
/// Every variant is raised before any state change, so a failed call leaves
/// the world untouched.
#[derive(Debug, Error)]
pub enum WorldError {
    /// A block was placed into a cell that already holds a block (or the
    /// implicit head cell of an extended piston).
    #[error("position {0} is already occupied")]
    PositionOccupied(BlockPos),

    /// A button was pressed while it was still pressed.
    #[error("button at {0} is already pressed")]
    ButtonAlreadyPressed(BlockPos),

    /// A snapshot failed validation on restore.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}
