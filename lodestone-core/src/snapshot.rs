//! Serializable world snapshots and the URL-safe share encoding.
//!
//! A snapshot is a plain value object: the tick counter, every block with
//! its full mutable state, and the pending future schedule. Blocks and
//! schedule positions are sorted by packed position key, so serializing a
//! restored snapshot reproduces the original structure exactly.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use lodestone_utils::BlockPos;

use crate::blocks::Block;
use crate::error::WorldError;
use crate::grid::Grid;
use crate::world::World;
use crate::world::tick_scheduler::TickScheduler;

/// Query parameter name for share links.
pub const SHARE_PARAM: &str = "grid";

/// A point-in-time capture of the whole simulation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Tick counter at capture time.
    pub tick: u64,
    /// Every block, sorted by packed position key.
    pub blocks: Vec<Block>,
    /// Pending future schedule, sorted by tick.
    pub schedule: Vec<ScheduleEntry>,
}

/// One future-schedule entry: the positions to enqueue at a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// The tick the positions come due.
    pub tick: u64,
    /// Positions to enqueue, sorted by packed key.
    pub positions: Vec<BlockPos>,
}

impl World {
    /// Captures the current state as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let mut blocks: Vec<Block> = self.grid.all_blocks().cloned().collect();
        blocks.sort_unstable_by_key(|b| b.pos.as_i64());
        let schedule = self
            .scheduler
            .future_entries()
            .map(|(tick, set)| {
                let mut positions: Vec<BlockPos> = set.iter().copied().collect();
                positions.sort_unstable_by_key(BlockPos::as_i64);
                ScheduleEntry { tick, positions }
            })
            .collect();
        Snapshot {
            tick: self.tick,
            blocks,
            schedule,
        }
    }

    /// Restores a world from a snapshot without running any updates.
    ///
    /// Schedule entries pointing at cells that no longer hold a block are
    /// accepted: at runtime a wake-up for a vacated cell is a normal no-op,
    /// and restore must behave identically.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::MalformedSnapshot`] for duplicate block
    /// positions or schedule entries at or before the captured tick.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, WorldError> {
        let mut seen = FxHashSet::default();
        for block in &snapshot.blocks {
            if !seen.insert(block.pos) {
                return Err(WorldError::MalformedSnapshot(format!(
                    "two blocks share position {}",
                    block.pos
                )));
            }
        }
        for entry in &snapshot.schedule {
            if entry.tick <= snapshot.tick {
                return Err(WorldError::MalformedSnapshot(format!(
                    "schedule entry at tick {} is not after the captured tick {}",
                    entry.tick, snapshot.tick
                )));
            }
        }

        let mut scheduler = TickScheduler::new();
        scheduler.restore_future(
            snapshot
                .schedule
                .into_iter()
                .map(|entry| (entry.tick, entry.positions)),
        );
        log::debug!(
            "restored snapshot at tick {} with {} blocks",
            snapshot.tick,
            snapshot.blocks.len()
        );
        Ok(Self {
            grid: Grid::from_blocks(snapshot.blocks),
            scheduler,
            tick: snapshot.tick,
        })
    }
}

/// Encodes a snapshot as the URL-safe base64 value for the [`SHARE_PARAM`]
/// query parameter.
#[must_use]
pub fn encode_share(snapshot: &Snapshot) -> String {
    let json = serde_json::to_vec(snapshot).expect("snapshot serialization is infallible");
    URL_SAFE_NO_PAD.encode(json)
}

/// Decodes a [`SHARE_PARAM`] value back into a snapshot.
///
/// # Errors
///
/// Returns [`WorldError::MalformedSnapshot`] for invalid base64 or JSON.
pub fn decode_share(value: &str) -> Result<Snapshot, WorldError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|e| WorldError::MalformedSnapshot(format!("invalid base64: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| WorldError::MalformedSnapshot(format!("invalid snapshot JSON: {e}")))
}
