//! Scheduled updates for buttons and pressure plates.
//!
//! Presses, lever flips, and entity counts are committed by the world's
//! interaction entry points; these updates only handle the timed parts:
//! button auto-release and plate deactivation checks.

use lodestone_utils::BlockPos;

use crate::blocks::BlockKind;
use crate::world::World;

pub(crate) fn update_button(world: &mut World, pos: BlockPos) {
    let now = world.current_tick();
    let Some(BlockKind::Button(b)) = world.grid.kind_mut(pos) else {
        return;
    };
    let mut changed = false;
    if b.pressed
        && let Some(release) = b.scheduled_release
        && release <= now
    {
        b.pressed = false;
        b.scheduled_release = None;
        changed = true;
    }
    if changed {
        world.mark_changed(pos);
    }
}

pub(crate) fn update_plate(world: &mut World, pos: BlockPos) {
    let now = world.current_tick();
    let Some(BlockKind::PressurePlate(p)) = world.grid.kind_mut(pos) else {
        return;
    };
    let mut changed = false;
    let mut arm = None;
    if let Some(check) = p.scheduled_check
        && check <= now
    {
        p.scheduled_check = None;
        if p.entity_count > 0 {
            // Still occupied: stay active and look again later.
            let due = now + p.variant.check_delay();
            p.scheduled_check = Some(due);
            arm = Some(due);
        } else if p.active {
            p.active = false;
            changed = true;
        }
    }
    if let Some(due) = arm {
        world.schedule(due, pos);
    }
    if changed {
        world.mark_changed(pos);
    }
}
