//! Dust signal recomputation.

use lodestone_utils::{BlockPos, Direction};

use crate::blocks::BlockKind;
use crate::power;
use crate::world::World;

pub(crate) fn update(world: &mut World, pos: BlockPos) {
    let Some(BlockKind::Dust(d)) = world.grid.kind(pos) else {
        return;
    };
    let dust = *d;
    let new_signal = power::dust_signal(&world.grid, pos, &dust);
    if dust.signal == new_signal {
        return;
    }

    if let Some(BlockKind::Dust(d)) = world.grid.kind_mut(pos) {
        d.signal = new_signal;
    }
    world.mark_changed(pos);
    enqueue_step_neighbors(world, pos);
}

/// Re-enqueues dust at the eight diagonal-Y offsets, so step-up and
/// step-down runs see the change.
pub(crate) fn enqueue_step_neighbors(world: &mut World, pos: BlockPos) {
    for dir in Direction::HORIZONTAL {
        let side = pos.relative(dir);
        world.scheduler.enqueue(side.relative(Direction::Up));
        world.scheduler.enqueue(side.relative(Direction::Down));
    }
}
