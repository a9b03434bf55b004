//! Per-variant update procedures.
//!
//! [`update_block`] is the single dispatch point the drain loop calls for
//! every queued position. Each procedure samples the pure queries in
//! [`crate::power`], commits any state change, and marks the cell changed so
//! neighbors re-enqueue and observers notice. Procedures must be idempotent
//! when their inputs are unchanged; that is what makes the drain converge.

pub mod comparator;
pub mod dust;
pub mod interactables;
pub mod observer;
pub mod piston;
pub mod repeater;
pub mod solid;
pub mod torch;

use lodestone_utils::{BlockPos, Direction};

use crate::blocks::{BlockKind, BlockTag};
use crate::world::World;

/// Runs the per-variant update for the block at `pos`, followed by the
/// structural drop check and the quasi-connectivity re-check of a piston
/// directly beneath the updated cell.
pub(crate) fn update_block(world: &mut World, pos: BlockPos) {
    if let Some(tag) = world.grid.kind(pos).map(BlockKind::tag) {
        match tag {
            BlockTag::Solid | BlockTag::Slime => solid::update(world, pos),
            BlockTag::Dust => dust::update(world, pos),
            BlockTag::Button => interactables::update_button(world, pos),
            BlockTag::Torch => torch::update(world, pos),
            BlockTag::Repeater => repeater::update(world, pos),
            BlockTag::Comparator => comparator::update(world, pos),
            BlockTag::Observer => observer::update(world, pos),
            BlockTag::Piston | BlockTag::StickyPiston => piston::update(world, pos),
            BlockTag::PressurePlate => interactables::update_plate(world, pos),
            BlockTag::RedstoneBlock | BlockTag::Lever => {}
        }

        if world
            .grid
            .get(pos)
            .is_some_and(|b| b.should_drop(&world.grid))
        {
            log::debug!("removing unsupported {tag:?} at {pos}");
            world.grid.remove(pos);
        }
    }

    let below = pos.relative(Direction::Down);
    if matches!(
        world.grid.kind(below),
        Some(BlockKind::Piston(_) | BlockKind::StickyPiston(_))
    ) {
        piston::update(world, below);
    }
}
