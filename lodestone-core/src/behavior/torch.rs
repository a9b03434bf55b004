//! Redstone torch inversion, toggle delay, and burnout.
//!
//! A torch is lit unless its attachment is a weakly powered conducting block
//! (or a redstone block, which keeps it unconditionally unlit). State flips
//! run two ticks after the input change. Eight flips inside a 60-tick window
//! burn the torch out; a burned-out torch stays unlit.

use lodestone_utils::BlockPos;

use crate::blocks::{BlockKind, BURNOUT_TOGGLES, BURNOUT_WINDOW, TORCH_TOGGLE_DELAY};
use crate::power;
use crate::world::World;

pub(crate) fn update(world: &mut World, pos: BlockPos) {
    let now = world.current_tick();
    let Some(BlockKind::Torch(t)) = world.grid.kind(pos) else {
        return;
    };
    let attach_pos = pos.relative(t.attached_face);
    let should_be_lit = match world.grid.kind(attach_pos) {
        Some(BlockKind::RedstoneBlock) => false,
        Some(k) if k.is_conducting() => !power::receives_weak_power(&world.grid, attach_pos),
        // A missing or non-conducting attachment is trivially lit; the drop
        // check decides whether the torch survives at all.
        _ => true,
    };

    let Some(BlockKind::Torch(t)) = world.grid.kind_mut(pos) else {
        return;
    };
    if t.burned_out {
        t.scheduled_toggle = None;
        return;
    }

    let mut changed = false;
    let mut arm = None;
    if let Some(due) = t.scheduled_toggle
        && due <= now
    {
        t.scheduled_toggle = None;
        // The input may have settled back before the flip came due.
        if t.lit != should_be_lit {
            t.state_change_times
                .retain(|&flip| now.saturating_sub(flip) < BURNOUT_WINDOW);
            t.state_change_times.push(now);
            if t.state_change_times.len() >= BURNOUT_TOGGLES {
                t.lit = false;
                t.burned_out = true;
                log::debug!("torch at {pos} burned out");
            } else {
                t.lit = should_be_lit;
            }
            changed = true;
        }
    } else if t.scheduled_toggle.is_none() && t.lit != should_be_lit {
        let due = now + TORCH_TOGGLE_DELAY;
        t.scheduled_toggle = Some(due);
        arm = Some(due);
    }

    if let Some(due) = arm {
        world.schedule(due, pos);
    }
    if changed {
        world.mark_changed(pos);
    }
}
