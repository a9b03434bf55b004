//! Comparator comparison/subtraction with side inputs and 2-tick delay.

use lodestone_utils::BlockPos;

use crate::blocks::{BlockKind, ComparatorMode, ScheduledSignal, COMPARATOR_DELAY};
use crate::power;
use crate::world::World;

pub(crate) fn update(world: &mut World, pos: BlockPos) {
    let now = world.current_tick();
    let Some(BlockKind::Comparator(c)) = world.grid.kind(pos) else {
        return;
    };
    let facing = c.facing;
    let mode = c.mode;
    let rear = power::comparator_rear(&world.grid, pos, facing);
    let left = power::comparator_side(&world.grid, pos, facing.rotate_y_counter_clockwise());
    let right = power::comparator_side(&world.grid, pos, facing.rotate_y_clockwise());
    let strongest_side = left.max(right);
    let target = match mode {
        ComparatorMode::Comparison => {
            if rear >= strongest_side {
                rear
            } else {
                0
            }
        }
        ComparatorMode::Subtraction => rear.saturating_sub(strongest_side),
    };

    let Some(BlockKind::Comparator(c)) = world.grid.kind_mut(pos) else {
        return;
    };
    c.rear = rear;
    c.left = left;
    c.right = right;

    let mut changed = false;
    let mut arm = None;
    if let Some(pending) = c.scheduled_output
        && pending.tick <= now
    {
        c.scheduled_output = None;
        // Fire on the live value; a 1-tick blip has settled back by now and
        // produces no output change.
        if c.output_signal != target {
            c.output_signal = target;
            changed = true;
        }
    }
    if c.output_signal != target && c.scheduled_output.is_none() {
        let due = now + COMPARATOR_DELAY;
        c.scheduled_output = Some(ScheduledSignal {
            tick: due,
            signal: target,
        });
        arm = Some(due);
    }

    if let Some(due) = arm {
        world.schedule(due, pos);
    }
    if changed {
        world.mark_changed(pos);
    }
}
