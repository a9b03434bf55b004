//! Piston state machine and multi-block push/pull mechanics.
//!
//! Activation is quasi-connected (the cell above the base counts) and is
//! re-checked both on the piston's own updates and whenever the cell above it
//! updates. Extension and retraction each take three ticks; a deactivation
//! inside the first tick of an extension aborts it, with any push still
//! landing and the sticky pull suppressed for the cycle.

use std::cmp::Reverse;

use rustc_hash::FxHashSet;

use lodestone_utils::{BlockPos, Direction, Vector3};

use crate::blocks::{BlockKind, PistonState, PUSH_LIMIT};
use crate::grid::Grid;
use crate::power;
use crate::world::World;

pub(crate) fn update(world: &mut World, pos: BlockPos) {
    let now = world.current_tick();
    let sticky = match world.grid.kind(pos) {
        Some(BlockKind::Piston(_)) => false,
        Some(BlockKind::StickyPiston(_)) => true,
        _ => return,
    };
    let Some(BlockKind::Piston(p) | BlockKind::StickyPiston(p)) = world.grid.kind(pos) else {
        return;
    };
    let state = *p;
    let activated = power::piston_activated(&world.grid, pos, state.facing);

    match (state.extended, state.activation_tick) {
        // Retracted and idle.
        (false, None) => {
            if activated {
                set_state(world, pos, |p| {
                    p.activation_tick = Some(now + 1);
                    p.short_pulse = false;
                });
                world.schedule(now + 3, pos);
            }
        }
        // Extending.
        (false, Some(activation_tick)) => {
            if !activated && now <= activation_tick {
                // Short pulse: the extension aborts, but the push lands.
                let pushed = try_push(world, pos, state.facing);
                set_state(world, pos, |p| {
                    p.activation_tick = None;
                    p.short_pulse = true;
                });
                log::debug!(
                    "piston at {pos} aborted extension on a short pulse (pushed: {pushed})"
                );
            } else if now >= activation_tick + 2 {
                if try_push(world, pos, state.facing) {
                    set_state(world, pos, |p| {
                        p.activation_tick = None;
                        p.extended = true;
                    });
                    world.mark_changed(pos);
                } else {
                    set_state(world, pos, |p| p.activation_tick = None);
                    log::debug!("piston at {pos}: push rejected");
                }
            }
        }
        // Extended and idle.
        (true, None) => {
            if !activated {
                set_state(world, pos, |p| p.activation_tick = Some(now + 1));
                world.schedule(now + 3, pos);
            }
        }
        // Retracting.
        (true, Some(activation_tick)) => {
            if now >= activation_tick + 2 {
                let suppress_pull = state.short_pulse;
                set_state(world, pos, |p| {
                    p.activation_tick = None;
                    p.extended = false;
                    p.short_pulse = false;
                });
                world.mark_changed(pos);
                if sticky && !suppress_pull {
                    try_pull(world, pos, state.facing);
                }
            }
        }
    }
}

fn set_state(world: &mut World, pos: BlockPos, f: impl FnOnce(&mut PistonState)) {
    if let Some(BlockKind::Piston(p) | BlockKind::StickyPiston(p)) = world.grid.kind_mut(pos) {
        f(p);
    }
}

/// Attempts the push in front of the piston. Returns `false` when the path
/// is blocked, the cluster is over the limit, or the cluster would include
/// the piston itself. An empty front cell pushes nothing and succeeds.
pub(crate) fn try_push(world: &mut World, pos: BlockPos, facing: Direction) -> bool {
    let Some(cluster) = collect_cluster(&world.grid, pos, facing) else {
        return false;
    };

    let (dx, dy, dz) = facing.offset();
    let axis = Vector3::new(dx, dy, dz);
    let mut ordered = cluster;
    // Farthest first, so every move lands in a vacated or crushable cell.
    ordered.sort_unstable_by_key(|p| (Reverse(p.0.dot(&axis)), p.as_i64()));

    for from in ordered {
        let to = from.relative(facing);
        if let Some(crushed) = world.grid.get(to) {
            debug_assert!(crushed.kind.is_destructible(), "push into {to} blocked");
            log::debug!("piston push crushes {:?} at {to}", crushed.kind.tag());
            world.grid.remove(to);
        }
        let is_observer = matches!(world.grid.kind(from), Some(BlockKind::Observer(_)));
        world.grid.move_block(from, to);
        world.rearm_scheduled(to);
        if is_observer {
            world.pulse_observer(to);
        }
    }
    true
}

/// Collects the contiguous movable cluster in front of the piston.
///
/// Traversal follows the facing direction through movable blocks; slime
/// additionally adheres to its six neighbors. Cells reached through the
/// movement path must be passable (empty, movable, or destructible); cells
/// reached only through slime adhesion are simply let go when they are not
/// movable.
fn collect_cluster(grid: &Grid, piston_pos: BlockPos, facing: Direction) -> Option<Vec<BlockPos>> {
    let mut cluster = Vec::new();
    let mut seen = FxHashSet::default();
    let mut stack = vec![(piston_pos.relative(facing), true)];

    while let Some((cell, via_path)) = stack.pop() {
        if seen.contains(&cell) {
            continue;
        }
        if cell == piston_pos {
            if via_path {
                return None;
            }
            continue;
        }
        match grid.kind(cell) {
            None => {
                // The implicit head of an extended piston blocks the path.
                if via_path && grid.piston_head_at(cell).is_some() {
                    return None;
                }
            }
            Some(kind) if kind.is_movable() => {
                seen.insert(cell);
                cluster.push(cell);
                if cluster.len() > PUSH_LIMIT {
                    return None;
                }
                stack.push((cell.relative(facing), true));
                if matches!(kind, BlockKind::Slime(_)) {
                    for dir in Direction::ALL {
                        stack.push((cell.relative(dir), false));
                    }
                }
            }
            // Crushed when a pushed block lands on it; never joins the
            // cluster and is not traversed through.
            Some(kind) if kind.is_destructible() => {}
            Some(_) => {
                if via_path {
                    return None;
                }
            }
        }
    }
    Some(cluster)
}

/// Pulls the block two cells out back into the vacated head cell, if it is
/// movable.
fn try_pull(world: &mut World, pos: BlockPos, facing: Direction) {
    let head = pos.relative(facing);
    let target = head.relative(facing);
    debug_assert!(!world.grid.is_occupied(head), "head cell {head} occupied");
    if matches!(world.grid.kind(target), Some(k) if k.is_movable()) {
        let is_observer = matches!(world.grid.kind(target), Some(BlockKind::Observer(_)));
        world.grid.move_block(target, head);
        world.rearm_scheduled(head);
        if is_observer {
            world.pulse_observer(head);
        }
    }
}
