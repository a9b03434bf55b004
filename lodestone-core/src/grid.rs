//! Sparse block grid: the primary source of truth for the world.
//!
//! All placement, removal, and movement flow through the grid. Every mutation
//! is recorded in a change journal; the simulation driver drains the journal
//! to fan the changes out as neighbor updates and observer notifications, so
//! the map borrow always ends before neighbors are touched.

use rustc_hash::FxHashMap;

use lodestone_utils::{BlockPos, Direction};

use crate::blocks::{Block, BlockKind};

/// Mapping from position to block, plus the mutation journal.
#[derive(Debug, Default)]
pub struct Grid {
    blocks: FxHashMap<BlockPos, Block>,
    changed: Vec<BlockPos>,
}

impl Grid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a grid directly from blocks, without journaling. Used by
    /// snapshot restore, which must not run updates.
    #[must_use]
    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
        Self {
            blocks: blocks.into_iter().map(|b| (b.pos, b)).collect(),
            changed: Vec::new(),
        }
    }

    /// Returns the block at the given position, if any.
    #[must_use]
    pub fn get(&self, pos: BlockPos) -> Option<&Block> {
        self.blocks.get(&pos)
    }

    /// Returns the block kind at the given position, if any.
    #[must_use]
    pub fn kind(&self, pos: BlockPos) -> Option<&BlockKind> {
        self.blocks.get(&pos).map(|b| &b.kind)
    }

    /// Returns a mutable reference to the block kind at the given position.
    ///
    /// Field mutations made through this are not journaled; the caller is
    /// responsible for marking the cell changed when the mutation is
    /// observable.
    #[must_use]
    pub fn kind_mut(&mut self, pos: BlockPos) -> Option<&mut BlockKind> {
        self.blocks.get_mut(&pos).map(|b| &mut b.kind)
    }

    /// Returns whether the cell holds a block.
    #[must_use]
    pub fn is_occupied(&self, pos: BlockPos) -> bool {
        self.blocks.contains_key(&pos)
    }

    /// Returns the base position of an extended piston whose implicit head
    /// occupies the given cell, if any.
    #[must_use]
    pub fn piston_head_at(&self, pos: BlockPos) -> Option<BlockPos> {
        for dir in Direction::ALL {
            let base = pos.relative(dir);
            if let Some(BlockKind::Piston(p) | BlockKind::StickyPiston(p)) = self.kind(base)
                && p.extended
                && base.relative(p.facing) == pos
            {
                return Some(base);
            }
        }
        None
    }

    /// Inserts a block at its own position. The cell must be empty.
    pub fn insert(&mut self, block: Block) {
        let pos = block.pos;
        debug_assert!(
            !self.blocks.contains_key(&pos),
            "insert into occupied cell {pos}"
        );
        self.blocks.insert(pos, block);
        self.changed.push(pos);
    }

    /// Removes and returns the block at the given position, if any.
    pub fn remove(&mut self, pos: BlockPos) -> Option<Block> {
        let removed = self.blocks.remove(&pos);
        if removed.is_some() {
            self.changed.push(pos);
        }
        removed
    }

    /// Moves a block between cells, preserving its identity. The move is
    /// atomic: the source is vacated, the block's position field is updated,
    /// and the block is inserted at the destination. The destination must be
    /// empty.
    pub fn move_block(&mut self, from: BlockPos, to: BlockPos) {
        debug_assert!(!self.blocks.contains_key(&to), "move into occupied cell {to}");
        if let Some(mut block) = self.blocks.remove(&from) {
            block.pos = to;
            self.blocks.insert(to, block);
            self.changed.push(from);
            self.changed.push(to);
        }
    }

    /// Iterates over all blocks in the grid.
    pub fn all_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Number of blocks in the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the grid holds no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Drains the mutation journal.
    pub fn take_changes(&mut self) -> Vec<BlockPos> {
        std::mem::take(&mut self.changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut grid = Grid::new();
        let pos = BlockPos::new(1, 2, 3);
        grid.insert(Block::solid(pos));
        assert!(grid.is_occupied(pos));
        assert_eq!(grid.get(pos).map(|b| b.pos), Some(pos));
        assert_eq!(grid.take_changes(), vec![pos]);
    }

    #[test]
    fn remove_journals_only_when_present() {
        let mut grid = Grid::new();
        let pos = BlockPos::new(0, 0, 0);
        assert!(grid.remove(pos).is_none());
        assert!(grid.take_changes().is_empty());

        grid.insert(Block::solid(pos));
        grid.take_changes();
        assert!(grid.remove(pos).is_some());
        assert_eq!(grid.take_changes(), vec![pos]);
    }

    #[test]
    fn move_updates_position_field() {
        let mut grid = Grid::new();
        let from = BlockPos::new(0, 0, 0);
        let to = BlockPos::new(1, 0, 0);
        grid.insert(Block::observer(from, Direction::Up));
        grid.take_changes();

        grid.move_block(from, to);
        assert!(!grid.is_occupied(from));
        assert_eq!(grid.get(to).map(|b| b.pos), Some(to));
        assert_eq!(grid.take_changes(), vec![from, to]);
    }

    #[test]
    fn head_cell_is_found_for_extended_piston() {
        let mut grid = Grid::new();
        let base = BlockPos::new(0, 0, 0);
        let mut piston = Block::piston(base, Direction::East);
        if let BlockKind::Piston(p) = &mut piston.kind {
            p.extended = true;
        }
        grid.insert(piston);

        assert_eq!(grid.piston_head_at(BlockPos::new(1, 0, 0)), Some(base));
        assert_eq!(grid.piston_head_at(BlockPos::new(0, 1, 0)), None);
        assert_eq!(grid.piston_head_at(BlockPos::new(-1, 0, 0)), None);
    }
}
