//! Scheduled update system for deterministic block mechanics.
//!
//! Two structures cooperate: an in-tick *update queue* of positions needing
//! re-evaluation during the current drain, and a *future schedule* mapping
//! absolute tick numbers to the positions that must be enqueued when that
//! tick is reached. Buttons, repeaters, comparators, torches, observers,
//! pistons, and pressure plates all arm wake-ups here; the target block's own
//! scheduled fields stay authoritative, so a wake-up for a cell whose event
//! was cancelled (or whose block is gone) is a harmless no-op.
//!
//! Drain batches are sorted by packed position key, so a replayed world
//! processes positions in the same order.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use lodestone_utils::BlockPos;

/// Update queue plus future schedule.
#[derive(Debug, Default)]
pub struct TickScheduler {
    queue: FxHashSet<BlockPos>,
    future: BTreeMap<u64, FxHashSet<BlockPos>>,
}

impl TickScheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a single position into the update queue.
    pub fn enqueue(&mut self, pos: BlockPos) {
        self.queue.insert(pos);
    }

    /// Inserts a position and all six of its neighbors into the update queue.
    pub fn trigger(&mut self, pos: BlockPos) {
        self.queue.insert(pos);
        for neighbor in pos.adjacent() {
            self.queue.insert(neighbor);
        }
    }

    /// Schedules a wake-up for `pos` at the given future tick.
    pub fn schedule(&mut self, tick: u64, pos: BlockPos) {
        self.future.entry(tick).or_default().insert(pos);
    }

    /// Moves every position scheduled at or before `tick` into the update
    /// queue.
    pub fn drain_due(&mut self, tick: u64) {
        while let Some(entry) = self.future.first_entry() {
            if *entry.key() > tick {
                break;
            }
            let positions = entry.remove();
            self.queue.extend(positions);
        }
    }

    /// Takes the current queue contents as a sorted batch, leaving the queue
    /// empty for re-population by the updates themselves.
    pub fn take_batch(&mut self) -> Vec<BlockPos> {
        let mut batch: Vec<BlockPos> = self.queue.drain().collect();
        batch.sort_unstable_by_key(BlockPos::as_i64);
        batch
    }

    /// Whether the update queue is empty.
    #[must_use]
    pub fn queue_is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Iterates over the future schedule, for snapshotting.
    pub fn future_entries(&self) -> impl Iterator<Item = (u64, &FxHashSet<BlockPos>)> {
        self.future.iter().map(|(tick, set)| (*tick, set))
    }

    /// Rebuilds the future schedule from snapshot entries.
    pub fn restore_future(&mut self, entries: impl IntoIterator<Item = (u64, Vec<BlockPos>)>) {
        self.future.clear();
        for (tick, positions) in entries {
            self.future.entry(tick).or_default().extend(positions);
        }
    }
}
