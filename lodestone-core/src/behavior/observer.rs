//! Observer pulse start/end handling.
//!
//! Pulse scheduling itself happens in the world driver's observer
//! notification, which fires for every grid change; this update only commits
//! pulse edges that have come due.

use lodestone_utils::BlockPos;

use crate::blocks::BlockKind;
use crate::world::World;

pub(crate) fn update(world: &mut World, pos: BlockPos) {
    let now = world.current_tick();
    let Some(BlockKind::Observer(o)) = world.grid.kind_mut(pos) else {
        return;
    };
    let mut changed = false;
    if let Some(start) = o.scheduled_pulse_start
        && start <= now
    {
        o.scheduled_pulse_start = None;
        if !o.output_on {
            o.output_on = true;
            changed = true;
        }
    }
    if let Some(end) = o.scheduled_pulse_end
        && end <= now
    {
        o.scheduled_pulse_end = None;
        if o.output_on {
            o.output_on = false;
            changed = true;
        }
    }
    if changed {
        world.mark_changed(pos);
    }
}
