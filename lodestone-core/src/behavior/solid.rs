//! Power-state tracking for conducting blocks (solid and slime).

use lodestone_utils::BlockPos;

use crate::blocks::{BlockKind, PowerState};
use crate::power;
use crate::world::World;

pub(crate) fn update(world: &mut World, pos: BlockPos) {
    let new = if power::receives_strong_power(&world.grid, pos) {
        PowerState::StronglyPowered
    } else if power::receives_weak_power(&world.grid, pos) {
        PowerState::WeaklyPowered
    } else {
        PowerState::Unpowered
    };

    let Some(BlockKind::Solid(s) | BlockKind::Slime(s)) = world.grid.kind_mut(pos) else {
        return;
    };
    let changed = s.power != new;
    s.power = new;
    if changed {
        world.mark_changed(pos);
    }
}
