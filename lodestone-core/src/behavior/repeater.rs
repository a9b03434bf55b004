//! Repeater input tracking, side locking, delay, and pulse extension.

use lodestone_utils::BlockPos;

use crate::blocks::{BlockKind, ScheduledFlip};
use crate::power;
use crate::world::World;

pub(crate) fn update(world: &mut World, pos: BlockPos) {
    let now = world.current_tick();
    let Some(BlockKind::Repeater(r)) = world.grid.kind(pos) else {
        return;
    };
    let facing = r.facing;
    let powered_now = power::repeater_powered(&world.grid, pos, facing);
    let locked_now = power::repeater_locked(&world.grid, pos, facing);

    let Some(BlockKind::Repeater(r)) = world.grid.kind_mut(pos) else {
        return;
    };
    let mut changed = r.powered != powered_now || r.locked != locked_now;
    r.powered = powered_now;
    r.locked = locked_now;

    let mut arm = None;
    if locked_now {
        // Frozen: the output holds and pending changes are discarded.
        r.scheduled_output = None;
    } else {
        if let Some(flip) = r.scheduled_output
            && flip.tick <= now
        {
            r.scheduled_output = None;
            if r.output_on != flip.on {
                r.output_on = flip.on;
                changed = true;
            }
            // The output stays on for at least one full delay, even when the
            // input has already dropped again.
            if flip.on && !powered_now {
                let off = ScheduledFlip {
                    tick: now + u64::from(r.delay),
                    on: false,
                };
                r.scheduled_output = Some(off);
                arm = Some(off.tick);
            }
        }

        // A pending turn-off is cancelled when the input rises again before
        // it fires.
        if let Some(flip) = r.scheduled_output
            && !flip.on
            && powered_now
            && r.output_on
        {
            r.scheduled_output = None;
        }

        if r.scheduled_output.is_none() {
            if powered_now != r.output_on {
                let flip = ScheduledFlip {
                    tick: now + u64::from(r.delay),
                    on: powered_now,
                };
                r.scheduled_output = Some(flip);
                arm = Some(flip.tick);
            }
        }
    }

    if let Some(due) = arm {
        world.schedule(due, pos);
    }
    if changed {
        world.mark_changed(pos);
    }
}
