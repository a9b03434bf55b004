//! The simulation driver.
//!
//! [`World`] owns the grid and the scheduler exclusively. Every mutation
//! entry point commits its change, enqueues the appropriate updates, and
//! drains the queue to convergence before returning; `tick` is the only
//! primitive that advances time. There is no parallelism and no reentrancy.

pub mod tick_scheduler;

use lodestone_utils::{BlockPos, Direction};

use crate::behavior;
use crate::blocks::{Block, BlockKind, DustShape, PlateVariant};
use crate::error::WorldError;
use crate::grid::Grid;

use self::tick_scheduler::TickScheduler;

/// Entity counts a host supplies for a pressure plate cell.
///
/// Stone plates count only mobs; every other variant counts all entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityCounts {
    /// All entities on the cell.
    pub all: u32,
    /// Mobs on the cell.
    pub mobs: u32,
}

/// The simulation world: sparse grid, scheduler, and tick counter.
#[derive(Debug, Default)]
pub struct World {
    pub(crate) grid: Grid,
    pub(crate) scheduler: TickScheduler,
    pub(crate) tick: u64,
}

impl World {
    /// Creates an empty world at tick 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current game tick.
    #[must_use]
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Returns the block at the given position, if any.
    #[must_use]
    pub fn get(&self, pos: BlockPos) -> Option<&Block> {
        self.grid.get(pos)
    }

    /// Iterates over all blocks in the world.
    pub fn all_blocks(&self) -> impl Iterator<Item = &Block> {
        self.grid.all_blocks()
    }

    /// Read access to the grid, for the pure queries in [`crate::power`].
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Places a block at its position.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PositionOccupied`] when the cell holds a block
    /// or is the implicit head cell of an extended piston.
    pub fn place(&mut self, block: Block) -> Result<(), WorldError> {
        let pos = block.pos;
        if self.grid.is_occupied(pos) || self.grid.piston_head_at(pos).is_some() {
            return Err(WorldError::PositionOccupied(pos));
        }
        log::debug!("placing {:?} at {pos}", block.kind.tag());
        self.grid.insert(block);
        self.run_to_quiescence();
        Ok(())
    }

    /// Removes the block at the given position. A no-op on an empty cell.
    pub fn remove(&mut self, pos: BlockPos) {
        if let Some(removed) = self.grid.remove(pos) {
            log::debug!("removed {:?} at {pos}", removed.kind.tag());
            self.run_to_quiescence();
        }
    }

    /// Dispatches a right-click interaction by block kind: levers toggle,
    /// dust flips shape, repeaters cycle delay, comparators switch mode,
    /// buttons press. Returns `Ok(false)` for non-interactable blocks.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ButtonAlreadyPressed`] for a pressed button.
    pub fn interact(&mut self, pos: BlockPos) -> Result<bool, WorldError> {
        let now = self.tick;
        let mut arm = None;
        let mut dust_shape_changed = false;
        match self.grid.kind_mut(pos) {
            Some(BlockKind::Lever(l)) => l.on = !l.on,
            Some(BlockKind::Dust(d)) => {
                d.shape = match d.shape {
                    DustShape::Cross => DustShape::Dot,
                    DustShape::Dot => DustShape::Cross,
                };
                dust_shape_changed = true;
            }
            Some(BlockKind::Repeater(r)) => r.cycle_delay(),
            Some(BlockKind::Comparator(c)) => {
                c.mode = match c.mode {
                    crate::blocks::ComparatorMode::Comparison => {
                        crate::blocks::ComparatorMode::Subtraction
                    }
                    crate::blocks::ComparatorMode::Subtraction => {
                        crate::blocks::ComparatorMode::Comparison
                    }
                };
            }
            Some(BlockKind::Button(b)) => {
                if b.pressed {
                    return Err(WorldError::ButtonAlreadyPressed(pos));
                }
                b.pressed = true;
                let release = now + b.variant.ticks_to_stay_pressed();
                b.scheduled_release = Some(release);
                arm = Some(release);
            }
            _ => return Ok(false),
        }

        if let Some(release) = arm {
            self.scheduler.schedule(release, pos);
        }
        self.mark_changed(pos);
        if dust_shape_changed {
            // Connection topology changed; step-up/step-down runs must see it.
            behavior::dust::enqueue_step_neighbors(self, pos);
        }
        self.run_to_quiescence();
        Ok(true)
    }

    /// Updates a pressure plate's entity count. Stone plates read the mob
    /// count, all other variants the total. On a 0 -> positive edge the plate
    /// activates and arms its deactivation check. Returns `false` when the
    /// cell does not hold a plate.
    pub fn set_entity_count(&mut self, pos: BlockPos, counts: EntityCounts) -> bool {
        let now = self.tick;
        let Some(BlockKind::PressurePlate(p)) = self.grid.kind_mut(pos) else {
            return false;
        };
        let count = match p.variant {
            PlateVariant::Stone => counts.mobs,
            _ => counts.all,
        };
        if p.entity_count == count {
            return true;
        }
        let was = p.entity_count;
        p.entity_count = count;
        let mut arm = None;
        if was == 0 && count > 0 && !p.active {
            p.active = true;
            let due = now + p.variant.check_delay();
            p.scheduled_check = Some(due);
            arm = Some(due);
        }

        if let Some(due) = arm {
            self.scheduler.schedule(due, pos);
        }
        self.mark_changed(pos);
        self.run_to_quiescence();
        true
    }

    /// Advances time by `ticks` game ticks, draining each tick's scheduled
    /// updates to convergence.
    pub fn tick(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick += 1;
            self.scheduler.drain_due(self.tick);
            self.run_to_quiescence();
        }
    }

    /// Enqueues the cell and its neighbors and notifies adjacent observers.
    /// Called for every observable state change.
    pub(crate) fn mark_changed(&mut self, pos: BlockPos) {
        self.scheduler.trigger(pos);
        self.notify_observers(pos);
    }

    /// Arms a scheduler wake-up for a block's pending event.
    pub(crate) fn schedule(&mut self, tick: u64, pos: BlockPos) {
        debug_assert!(tick > self.tick, "wake-up for {pos} at past tick {tick}");
        self.scheduler.schedule(tick, pos);
    }

    /// Re-arms scheduler wake-ups for the pending events of a block that a
    /// piston just moved to `pos`; the entries at its old cell are stale
    /// no-ops. Overdue events are enqueued directly.
    pub(crate) fn rearm_scheduled(&mut self, pos: BlockPos) {
        let mut due: Vec<u64> = Vec::new();
        match self.grid.kind(pos) {
            Some(BlockKind::Observer(o)) => {
                due.extend(o.scheduled_pulse_start);
                due.extend(o.scheduled_pulse_end);
            }
            Some(BlockKind::Piston(p) | BlockKind::StickyPiston(p)) => {
                due.extend(p.activation_tick.map(|at| at + 2));
            }
            _ => {}
        }
        for tick in due {
            if tick > self.tick {
                self.scheduler.schedule(tick, pos);
            } else {
                self.scheduler.enqueue(pos);
            }
        }
    }

    /// Schedules a detection pulse on the observer at `pos`, unless one is
    /// already pending. Redundant triggers during a drain are safe.
    pub(crate) fn pulse_observer(&mut self, pos: BlockPos) {
        let now = self.tick;
        let mut arm = None;
        if let Some(BlockKind::Observer(o)) = self.grid.kind_mut(pos)
            && !o.pulse_pending()
        {
            let start = now + 2;
            let end = now + 4;
            o.scheduled_pulse_start = Some(start);
            o.scheduled_pulse_end = Some(end);
            arm = Some((start, end));
        }
        if let Some((start, end)) = arm {
            self.scheduler.schedule(start, pos);
            self.scheduler.schedule(end, pos);
        }
    }

    /// Drains the update queue, re-flushing grid changes between rounds,
    /// until nothing is left to process.
    fn run_to_quiescence(&mut self) {
        loop {
            self.flush_grid_changes();
            let batch = self.scheduler.take_batch();
            if batch.is_empty() {
                break;
            }
            for pos in batch {
                behavior::update_block(self, pos);
                self.flush_grid_changes();
            }
        }
    }

    /// Fans journaled grid mutations out as triggers and observer
    /// notifications.
    fn flush_grid_changes(&mut self) {
        loop {
            let changes = self.grid.take_changes();
            if changes.is_empty() {
                break;
            }
            for pos in changes {
                self.scheduler.trigger(pos);
                self.notify_observers(pos);
            }
        }
    }

    fn notify_observers(&mut self, changed: BlockPos) {
        for dir in Direction::ALL {
            let n = changed.relative(dir);
            let watching = matches!(
                self.grid.kind(n),
                Some(BlockKind::Observer(o)) if n.relative(o.facing) == changed
            );
            if watching {
                self.pulse_observer(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{ButtonVariant, ComparatorMode};
    use crate::power;

    fn pos(x: i32, y: i32, z: i32) -> BlockPos {
        BlockPos::new(x, y, z)
    }

    fn place_all(world: &mut World, blocks: impl IntoIterator<Item = Block>) {
        for block in blocks {
            world.place(block).expect("placement failed");
        }
    }

    fn dust_signal_at(world: &World, p: BlockPos) -> u8 {
        match world.get(p).map(|b| &b.kind) {
            Some(BlockKind::Dust(d)) => d.signal,
            other => panic!("expected dust at {p}, found {other:?}"),
        }
    }

    fn piston_extended(world: &World, p: BlockPos) -> bool {
        match world.get(p).map(|b| &b.kind) {
            Some(BlockKind::Piston(s) | BlockKind::StickyPiston(s)) => s.extended,
            other => panic!("expected piston at {p}, found {other:?}"),
        }
    }

    #[test]
    fn scenario_signal_decay_line() {
        let mut world = World::new();
        place_all(
            &mut world,
            [
                Block::solid(pos(0, 0, 0)),
                Block::lever(pos(1, 0, 0), Direction::West),
                Block::solid(pos(2, -1, 0)),
                Block::solid(pos(3, -1, 0)),
                Block::solid(pos(4, -1, 0)),
                Block::dust(pos(2, 0, 0)),
                Block::dust(pos(3, 0, 0)),
                Block::dust(pos(4, 0, 0)),
            ],
        );

        world.interact(pos(1, 0, 0)).expect("lever toggle");
        assert_eq!(dust_signal_at(&world, pos(2, 0, 0)), 15);
        assert_eq!(dust_signal_at(&world, pos(3, 0, 0)), 14);
        assert_eq!(dust_signal_at(&world, pos(4, 0, 0)), 13);

        world.interact(pos(1, 0, 0)).expect("lever toggle");
        assert_eq!(dust_signal_at(&world, pos(2, 0, 0)), 0);
        assert_eq!(dust_signal_at(&world, pos(3, 0, 0)), 0);
        assert_eq!(dust_signal_at(&world, pos(4, 0, 0)), 0);
    }

    #[test]
    fn scenario_piston_push_limit() {
        let mut world = World::new();
        let piston = pos(1, 0, 0);
        place_all(
            &mut world,
            [
                Block::solid(pos(1, -1, 0)),
                Block::piston(piston, Direction::East),
                Block::lever(pos(1, 1, 0), Direction::Down),
            ],
        );
        for x in 2..=13 {
            world.place(Block::solid(pos(x, 0, 0))).expect("row solid");
        }

        world.interact(pos(1, 1, 0)).expect("lever on");
        world.tick(4);
        assert!(piston_extended(&world, piston));
        // The twelve solids moved one cell east.
        assert!(world.get(pos(2, 0, 0)).is_none());
        assert!(world.get(pos(14, 0, 0)).is_some());

        world.interact(pos(1, 1, 0)).expect("lever off");
        world.tick(4);
        assert!(!piston_extended(&world, piston));

        // A thirteenth block makes the push fail.
        world.place(Block::solid(pos(2, 0, 0))).expect("13th solid");
        world.interact(pos(1, 1, 0)).expect("lever on");
        world.tick(4);
        assert!(!piston_extended(&world, piston));
        assert!(world.get(pos(2, 0, 0)).is_some());
    }

    #[test]
    fn scenario_repeater_lock() {
        let mut world = World::new();
        let main = pos(2, 0, 0);
        let locking = pos(2, 0, 1);
        place_all(
            &mut world,
            [
                Block::solid(pos(2, -1, 0)),
                Block::repeater(main, Direction::East),
                Block::solid(pos(2, -1, 1)),
                Block::repeater(locking, Direction::North),
                Block::solid(pos(2, -1, 2)),
                Block::lever(pos(2, 0, 2), Direction::Down),
                Block::solid(pos(1, -1, 0)),
                Block::lever(pos(1, 0, 0), Direction::Down),
            ],
        );

        world.interact(pos(2, 0, 2)).expect("drive locking repeater");
        world.tick(3);
        let Some(BlockKind::Repeater(m)) = world.get(main).map(|b| &b.kind) else {
            panic!("main repeater missing");
        };
        assert!(m.locked);

        world.interact(pos(1, 0, 0)).expect("drive main input");
        world.tick(3);
        let Some(BlockKind::Repeater(m)) = world.get(main).map(|b| &b.kind) else {
            panic!("main repeater missing");
        };
        assert!(m.powered);
        assert!(!m.output_on, "locked repeater output must stay frozen");
    }

    #[test]
    fn scenario_torch_burnout() {
        let mut world = World::new();
        let torch = pos(0, 1, 0);
        place_all(
            &mut world,
            [
                Block::solid(pos(-2, -1, 0)),
                Block::lever(pos(-2, 0, 0), Direction::Down),
                Block::solid(pos(-1, -1, 0)),
                Block::repeater(pos(-1, 0, 0), Direction::East),
                Block::solid(pos(0, 0, 0)),
                Block::torch(torch, Direction::Down),
            ],
        );

        for _ in 0..9 {
            world.interact(pos(-2, 0, 0)).expect("lever on");
            world.tick(4);
            world.interact(pos(-2, 0, 0)).expect("lever off");
            world.tick(4);
        }

        let Some(BlockKind::Torch(t)) = world.get(torch).map(|b| &b.kind) else {
            panic!("torch missing");
        };
        assert!(t.burned_out);
        assert!(!t.lit);
    }

    #[test]
    fn scenario_observer_pulse_from_piston_movement() {
        let mut world = World::new();
        let piston = pos(0, 0, 0);
        place_all(
            &mut world,
            [
                Block::piston(piston, Direction::East),
                Block::observer(pos(1, 0, 0), Direction::South),
                Block::solid(pos(-2, 1, 0)),
                Block::lever(pos(-1, 1, 0), Direction::West),
            ],
        );

        // The lever only reaches the cell above the piston.
        world.interact(pos(-1, 1, 0)).expect("lever on");
        world.tick(4);
        assert!(piston_extended(&world, piston));
        assert!(world.get(pos(1, 0, 0)).is_none());
        let Some(BlockKind::Observer(o)) = world.get(pos(2, 0, 0)).map(|b| &b.kind) else {
            panic!("observer was not pushed to (2,0,0)");
        };
        assert!(!o.output_on);

        world.tick(2);
        let Some(BlockKind::Observer(o)) = world.get(pos(2, 0, 0)).map(|b| &b.kind) else {
            panic!("observer missing");
        };
        assert!(o.output_on, "moved observer must emit its detection pulse");
    }

    #[test]
    fn scenario_comparator_subtraction() {
        let mut world = World::new();
        let comparator = pos(0, 0, 0);
        place_all(
            &mut world,
            [Block::solid(pos(0, -1, 0)), Block::comparator(comparator, Direction::East)],
        );
        world.interact(comparator).expect("switch to subtraction");
        place_all(
            &mut world,
            [
                Block::redstone_block(pos(-1, 0, 0)),
                Block::redstone_block(pos(0, 0, 1)),
            ],
        );

        world.tick(2);
        let Some(BlockKind::Comparator(c)) = world.get(comparator).map(|b| &b.kind) else {
            panic!("comparator missing");
        };
        assert_eq!(c.mode, ComparatorMode::Subtraction);
        assert_eq!(c.output_signal, 0);
    }

    #[test]
    fn comparator_comparison_passes_rear_through() {
        let mut world = World::new();
        let comparator = pos(0, 0, 0);
        place_all(
            &mut world,
            [
                Block::solid(pos(0, -1, 0)),
                Block::comparator(comparator, Direction::East),
                Block::redstone_block(pos(-1, 0, 0)),
            ],
        );
        world.tick(2);
        let Some(BlockKind::Comparator(c)) = world.get(comparator).map(|b| &b.kind) else {
            panic!("comparator missing");
        };
        assert_eq!(c.output_signal, 15);
    }

    #[test]
    fn place_into_occupied_cell_errors() {
        let mut world = World::new();
        world.place(Block::solid(pos(0, 0, 0))).expect("first");
        let err = world.place(Block::dust(pos(0, 0, 0))).unwrap_err();
        assert!(matches!(err, WorldError::PositionOccupied(p) if p == pos(0, 0, 0)));
    }

    #[test]
    fn place_into_extended_piston_head_errors() {
        let mut world = World::new();
        place_all(
            &mut world,
            [
                Block::piston(pos(0, 0, 0), Direction::East),
                Block::lever(pos(0, 1, 0), Direction::Down),
            ],
        );
        world.interact(pos(0, 1, 0)).expect("lever on");
        world.tick(4);
        assert!(piston_extended(&world, pos(0, 0, 0)));

        let err = world.place(Block::solid(pos(1, 0, 0))).unwrap_err();
        assert!(matches!(err, WorldError::PositionOccupied(p) if p == pos(1, 0, 0)));
    }

    #[test]
    fn button_presses_release_and_reject_double_press() {
        let mut world = World::new();
        let button = pos(1, 0, 0);
        place_all(
            &mut world,
            [
                Block::solid(pos(0, 0, 0)),
                Block::button(button, ButtonVariant::Stone, Direction::West),
            ],
        );

        world.interact(button).expect("press");
        assert!(power::receives_strong_power(world.grid(), pos(0, 0, 0)));
        let err = world.interact(button).unwrap_err();
        assert!(matches!(err, WorldError::ButtonAlreadyPressed(p) if p == button));

        world.tick(19);
        let Some(BlockKind::Button(b)) = world.get(button).map(|b| &b.kind) else {
            panic!("button missing");
        };
        assert!(b.pressed);

        world.tick(1);
        let Some(BlockKind::Button(b)) = world.get(button).map(|b| &b.kind) else {
            panic!("button missing");
        };
        assert!(!b.pressed, "stone button releases after 20 ticks");
        assert!(!power::receives_strong_power(world.grid(), pos(0, 0, 0)));
    }

    #[test]
    fn lever_toggled_twice_in_one_tick_is_a_noop_downstream() {
        let mut world = World::new();
        place_all(
            &mut world,
            [
                Block::solid(pos(2, 0, 0)),
                Block::lever(pos(1, 0, 0), Direction::East),
                Block::solid(pos(0, -1, 0)),
                Block::dust(pos(0, 0, 0)),
            ],
        );

        world.interact(pos(1, 0, 0)).expect("on");
        world.interact(pos(1, 0, 0)).expect("off");
        assert_eq!(dust_signal_at(&world, pos(0, 0, 0)), 0);
        let Some(BlockKind::Lever(l)) = world.get(pos(1, 0, 0)).map(|b| &b.kind) else {
            panic!("lever missing");
        };
        assert!(!l.on);
    }

    #[test]
    fn heavy_plate_scales_output_and_deactivates_after_check() {
        let mut world = World::new();
        let plate = pos(0, 0, 0);
        place_all(
            &mut world,
            [
                Block::solid(pos(0, -1, 0)),
                Block::pressure_plate(plate, PlateVariant::Heavy),
            ],
        );

        assert!(world.set_entity_count(plate, EntityCounts { all: 25, mobs: 0 }));
        let Some(BlockKind::PressurePlate(p)) = world.get(plate).map(|b| &b.kind) else {
            panic!("plate missing");
        };
        assert!(p.active);
        assert_eq!(power::plate_signal(p), 3);
        assert!(power::receives_strong_power(world.grid(), pos(0, -1, 0)));

        // Emptying the cell only deactivates at the next scheduled check.
        assert!(world.set_entity_count(plate, EntityCounts::default()));
        let Some(BlockKind::PressurePlate(p)) = world.get(plate).map(|b| &b.kind) else {
            panic!("plate missing");
        };
        assert!(p.active);

        world.tick(10);
        let Some(BlockKind::PressurePlate(p)) = world.get(plate).map(|b| &b.kind) else {
            panic!("plate missing");
        };
        assert!(!p.active);
        assert!(!power::receives_strong_power(world.grid(), pos(0, -1, 0)));
    }

    #[test]
    fn stone_plate_counts_only_mobs() {
        let mut world = World::new();
        let plate = pos(0, 0, 0);
        place_all(
            &mut world,
            [
                Block::solid(pos(0, -1, 0)),
                Block::pressure_plate(plate, PlateVariant::Stone),
            ],
        );

        world.set_entity_count(plate, EntityCounts { all: 4, mobs: 0 });
        let Some(BlockKind::PressurePlate(p)) = world.get(plate).map(|b| &b.kind) else {
            panic!("plate missing");
        };
        assert!(!p.active);

        world.set_entity_count(plate, EntityCounts { all: 4, mobs: 2 });
        let Some(BlockKind::PressurePlate(p)) = world.get(plate).map(|b| &b.kind) else {
            panic!("plate missing");
        };
        assert!(p.active);
    }

    #[test]
    fn sticky_piston_pulls_block_back() {
        let mut world = World::new();
        let piston = pos(0, 0, 0);
        place_all(
            &mut world,
            [
                Block::sticky_piston(piston, Direction::East),
                Block::solid(pos(1, 0, 0)),
                Block::lever(pos(0, 1, 0), Direction::Down),
            ],
        );

        world.interact(pos(0, 1, 0)).expect("lever on");
        world.tick(4);
        assert!(piston_extended(&world, piston));
        assert!(world.get(pos(2, 0, 0)).is_some());

        world.interact(pos(0, 1, 0)).expect("lever off");
        world.tick(4);
        assert!(!piston_extended(&world, piston));
        assert!(world.get(pos(1, 0, 0)).is_some(), "block pulled into head cell");
        assert!(world.get(pos(2, 0, 0)).is_none());
    }

    #[test]
    fn short_pulse_drops_the_pushed_block() {
        let mut world = World::new();
        let piston = pos(0, 0, 0);
        place_all(
            &mut world,
            [
                Block::sticky_piston(piston, Direction::East),
                Block::solid(pos(1, 0, 0)),
                Block::lever(pos(0, 1, 0), Direction::Down),
            ],
        );

        // Toggling on and off inside the same tick aborts the extension: the
        // push lands, the piston never extends, and nothing is pulled back.
        world.interact(pos(0, 1, 0)).expect("lever on");
        world.interact(pos(0, 1, 0)).expect("lever off");
        world.tick(4);
        assert!(!piston_extended(&world, piston));
        assert!(world.get(pos(1, 0, 0)).is_none());
        assert!(world.get(pos(2, 0, 0)).is_some(), "pushed block was dropped");
    }

    #[test]
    fn repeater_output_rises_after_its_delay() {
        let mut world = World::new();
        let repeater = pos(1, 0, 0);
        place_all(
            &mut world,
            [
                Block::solid(pos(0, -1, 0)),
                Block::lever(pos(0, 0, 0), Direction::Down),
                Block::solid(pos(1, -1, 0)),
                Block::repeater(repeater, Direction::East),
            ],
        );
        world.interact(repeater).expect("cycle delay to 4");

        world.interact(pos(0, 0, 0)).expect("lever on");
        world.tick(3);
        let Some(BlockKind::Repeater(r)) = world.get(repeater).map(|b| &b.kind) else {
            panic!("repeater missing");
        };
        assert!(r.powered);
        assert!(!r.output_on);

        world.tick(1);
        let Some(BlockKind::Repeater(r)) = world.get(repeater).map(|b| &b.kind) else {
            panic!("repeater missing");
        };
        assert!(r.output_on, "delay-4 repeater turns on at t+4");
    }

    #[test]
    fn unsupported_dust_drops_when_support_vanishes() {
        let mut world = World::new();
        place_all(
            &mut world,
            [Block::solid(pos(0, 0, 0)), Block::dust(pos(0, 1, 0))],
        );
        assert!(world.get(pos(0, 1, 0)).is_some());

        world.remove(pos(0, 0, 0));
        assert!(world.get(pos(0, 1, 0)).is_none());
    }

    #[test]
    fn piston_crushes_fragile_blocks_in_its_path() {
        let mut world = World::new();
        let piston = pos(0, 0, 0);
        place_all(
            &mut world,
            [
                Block::piston(piston, Direction::East),
                Block::solid(pos(1, 0, 0)),
                Block::solid(pos(2, -1, 0)),
                Block::dust(pos(2, 0, 0)),
                Block::lever(pos(0, 1, 0), Direction::Down),
            ],
        );

        world.interact(pos(0, 1, 0)).expect("lever on");
        world.tick(4);
        assert!(piston_extended(&world, piston));
        let Some(BlockKind::Solid(_)) = world.get(pos(2, 0, 0)).map(|b| &b.kind) else {
            panic!("solid should have replaced the crushed dust");
        };
    }

    #[test]
    fn interacting_with_a_solid_returns_false() {
        let mut world = World::new();
        world.place(Block::solid(pos(0, 0, 0))).expect("solid");
        assert!(!world.interact(pos(0, 0, 0)).expect("no-op"));
        assert!(!world.interact(pos(9, 9, 9)).expect("empty cell"));
    }
}
