//! Pure power and signal queries over the grid.
//!
//! Nothing in this module mutates state; the per-variant update procedures
//! sample these queries and commit the results. Keeping inference separate
//! from mutation keeps re-entrancy tractable and lets tests build a grid and
//! assert query results without running the loop.

use smallvec::SmallVec;

use lodestone_utils::{BlockPos, Direction};

use crate::blocks::{BlockKind, DustShape, DustState, PlateState, PlateVariant, MAX_SIGNAL};
use crate::grid::Grid;

/// Signal a plate emits, by variant and entity count.
#[must_use]
pub fn plate_signal(plate: &PlateState) -> u8 {
    if !plate.active {
        return 0;
    }
    match plate.variant {
        PlateVariant::Wood | PlateVariant::Stone => MAX_SIGNAL,
        PlateVariant::Light => plate.entity_count.min(u32::from(MAX_SIGNAL)) as u8,
        PlateVariant::Heavy => plate
            .entity_count
            .div_ceil(10)
            .min(u32::from(MAX_SIGNAL)) as u8,
    }
}

/// Signal the block at `source` contributes to `target` through directional
/// outputs only: repeater front, observer back, comparator front.
#[must_use]
pub fn outputs_to(grid: &Grid, source: BlockPos, target: BlockPos) -> u8 {
    match grid.kind(source) {
        Some(BlockKind::Repeater(r)) if r.output_on && source.relative(r.facing) == target => {
            MAX_SIGNAL
        }
        Some(BlockKind::Observer(o))
            if o.output_on && source.relative(o.facing.opposite()) == target =>
        {
            MAX_SIGNAL
        }
        Some(BlockKind::Comparator(c)) if source.relative(c.facing) == target => c.output_signal,
        _ => 0,
    }
}

/// Whether the cell receives strong power: attached on-lever/pressed-button,
/// a directional output, a lit torch directly below, or an active plate
/// directly above.
#[must_use]
pub fn receives_strong_power(grid: &Grid, pos: BlockPos) -> bool {
    for dir in Direction::ALL {
        let n = pos.relative(dir);
        match grid.kind(n) {
            Some(BlockKind::Lever(l)) if l.on && n.relative(l.attached_face) == pos => {
                return true;
            }
            Some(BlockKind::Button(b)) if b.pressed && n.relative(b.attached_face) == pos => {
                return true;
            }
            _ => {
                if outputs_to(grid, n, pos) > 0 {
                    return true;
                }
            }
        }
    }
    if let Some(BlockKind::Torch(t)) = grid.kind(pos.relative(Direction::Down))
        && t.lit
    {
        return true;
    }
    if let Some(BlockKind::PressurePlate(p)) = grid.kind(pos.relative(Direction::Up))
        && plate_signal(p) > 0
    {
        return true;
    }
    false
}

/// Whether the cell receives weak power: strong power, an adjacent source,
/// dust pointing at it, a lit torch beside it, or dust sitting on top of it.
#[must_use]
pub fn receives_weak_power(grid: &Grid, pos: BlockPos) -> bool {
    if receives_strong_power(grid, pos) {
        return true;
    }
    for dir in Direction::ALL {
        let n = pos.relative(dir);
        match grid.kind(n) {
            Some(BlockKind::Dust(d)) if d.signal >= 1 && dust_points_at(grid, n, d, pos) => {
                return true;
            }
            // Strong powering through the cell above the torch is handled
            // above; the attachment never receives power from its torch.
            Some(BlockKind::Torch(t)) if t.lit && n.relative(t.attached_face) != pos => {
                return true;
            }
            Some(BlockKind::Lever(l)) if l.on => return true,
            Some(BlockKind::Button(b)) if b.pressed => return true,
            _ => {}
        }
    }
    if let Some(BlockKind::Dust(d)) = grid.kind(pos.relative(Direction::Up))
        && d.signal >= 1
    {
        return true;
    }
    false
}

/// Whether any adjacent source delivers a full 15 to this cell.
#[must_use]
pub fn has_full_signal(grid: &Grid, pos: BlockPos) -> bool {
    for dir in Direction::ALL {
        let n = pos.relative(dir);
        match grid.kind(n) {
            Some(BlockKind::Lever(l)) if l.on => return true,
            Some(BlockKind::Button(b)) if b.pressed => return true,
            Some(BlockKind::Torch(t)) if t.lit && n.relative(t.attached_face) != pos => {
                return true;
            }
            Some(BlockKind::RedstoneBlock) => return true,
            Some(BlockKind::PressurePlate(p)) if plate_signal(p) == MAX_SIGNAL => return true,
            Some(BlockKind::Solid(s) | BlockKind::Slime(s)) if s.power.is_strong() => {
                return true;
            }
            _ => {
                if outputs_to(grid, n, pos) == MAX_SIGNAL {
                    return true;
                }
            }
        }
    }
    false
}

/// General signal strength presented by the cell at `pos` to a directional
/// component at `pos + facing` (the repeater/comparator rear-input scale).
#[must_use]
pub fn signal_toward(grid: &Grid, pos: BlockPos, facing: Direction) -> u8 {
    match grid.kind(pos) {
        Some(BlockKind::Dust(d)) => d.signal,
        Some(BlockKind::RedstoneBlock) => MAX_SIGNAL,
        Some(BlockKind::Repeater(r)) if r.facing == facing => {
            if r.output_on {
                MAX_SIGNAL
            } else {
                0
            }
        }
        Some(BlockKind::Comparator(c)) if c.facing == facing => c.output_signal,
        Some(BlockKind::Observer(o)) if o.facing == facing.opposite() => {
            if o.output_on {
                MAX_SIGNAL
            } else {
                0
            }
        }
        Some(BlockKind::Torch(t)) if t.lit => MAX_SIGNAL,
        Some(BlockKind::Lever(l)) if l.on => MAX_SIGNAL,
        Some(BlockKind::Button(b)) if b.pressed => MAX_SIGNAL,
        Some(BlockKind::PressurePlate(p)) => plate_signal(p),
        Some(BlockKind::Solid(s) | BlockKind::Slime(s)) if s.power.is_powered() => MAX_SIGNAL,
        _ => 0,
    }
}

/// Effective dust connections at `pos`, over the four horizontal directions.
///
/// Dot-shaped dust has zero effective connections.
#[must_use]
pub fn dust_connections(grid: &Grid, pos: BlockPos, dust: &DustState) -> SmallVec<[Direction; 4]> {
    let mut connections = SmallVec::new();
    if dust.shape == DustShape::Dot {
        return connections;
    }
    for dir in Direction::HORIZONTAL {
        let n = pos.relative(dir);
        match grid.kind(n) {
            Some(BlockKind::Dust(_) | BlockKind::Lever(_) | BlockKind::Torch(_)) => {
                connections.push(dir);
            }
            Some(BlockKind::Repeater(r)) if r.facing.axis() == dir.axis() => {
                connections.push(dir);
            }
            Some(BlockKind::Comparator(c)) if c.facing.axis() == dir.axis() => {
                connections.push(dir);
            }
            Some(BlockKind::Observer(o)) if o.facing == dir => connections.push(dir),
            other => {
                let conducting = matches!(
                    other,
                    Some(BlockKind::Solid(_) | BlockKind::Slime(_))
                );
                if conducting {
                    // Step-up, unless the cell above this dust caps it.
                    let above_self = grid.kind(pos.relative(Direction::Up));
                    if is_dust(grid, n.relative(Direction::Up))
                        && !above_self.is_some_and(BlockKind::is_conducting)
                    {
                        connections.push(dir);
                    }
                } else {
                    // Step-down, unless the block in between blocks downward.
                    let blocks_down = matches!(other, Some(BlockKind::Observer(_)));
                    if !blocks_down && is_dust(grid, n.relative(Direction::Down)) {
                        connections.push(dir);
                    }
                }
            }
        }
    }
    connections
}

/// Whether the dust at `dust_pos` points at `target` for power delivery.
///
/// Requires a same-level horizontal adjacency and a cross shape; a cross with
/// zero connections points all four ways.
#[must_use]
pub fn dust_points_at(grid: &Grid, dust_pos: BlockPos, dust: &DustState, target: BlockPos) -> bool {
    if dust.shape != DustShape::Cross {
        return false;
    }
    let Some(dir) = Direction::HORIZONTAL
        .into_iter()
        .find(|d| dust_pos.relative(*d) == target)
    else {
        return false;
    };
    let connections = dust_connections(grid, dust_pos, dust);
    connections.is_empty() || connections.contains(&dir)
}

/// Signal the dust at `pos` should carry: 15 beside a full source, otherwise
/// one less than the best dust-connected neighbor.
#[must_use]
pub fn dust_signal(grid: &Grid, pos: BlockPos, dust: &DustState) -> u8 {
    if has_full_signal(grid, pos) {
        return MAX_SIGNAL;
    }
    let mut best = 0u8;
    for dir in dust_connections(grid, pos, dust) {
        let n = pos.relative(dir);
        // A connection resolves to dust on the same level, one step up
        // (over a solid), or one step down.
        let neighbor_signal = match grid.kind(n) {
            Some(BlockKind::Dust(d)) => d.signal,
            Some(k) if k.is_conducting() => dust_signal_at(grid, n.relative(Direction::Up)),
            _ => dust_signal_at(grid, n.relative(Direction::Down)),
        };
        best = best.max(neighbor_signal);
    }
    best.saturating_sub(1)
}

/// Whether the rear input of a repeater at `pos` facing `facing` is powered.
#[must_use]
pub fn repeater_powered(grid: &Grid, pos: BlockPos, facing: Direction) -> bool {
    let rear = pos.relative(facing.opposite());
    signal_toward(grid, rear, facing) > 0
        || has_full_signal(grid, rear)
        || receives_weak_power(grid, rear)
}

/// Whether a repeater at `pos` facing `facing` is locked by a side
/// repeater or comparator pointing into it.
#[must_use]
pub fn repeater_locked(grid: &Grid, pos: BlockPos, facing: Direction) -> bool {
    for side in facing.perpendiculars() {
        let s = pos.relative(side);
        match grid.kind(s) {
            Some(BlockKind::Repeater(r)) if r.output_on && s.relative(r.facing) == pos => {
                return true;
            }
            Some(BlockKind::Comparator(c))
                if c.output_signal > 0 && s.relative(c.facing) == pos =>
            {
                return true;
            }
            _ => {}
        }
    }
    false
}

/// Rear input strength of a comparator at `pos` facing `facing`.
#[must_use]
pub fn comparator_rear(grid: &Grid, pos: BlockPos, facing: Direction) -> u8 {
    signal_toward(grid, pos.relative(facing.opposite()), facing)
}

/// Side input strength of a comparator at `pos` from the cell toward `side`.
///
/// Only dust, redstone blocks, and directional outputs aimed at the
/// comparator contribute from the sides.
#[must_use]
pub fn comparator_side(grid: &Grid, pos: BlockPos, side: Direction) -> u8 {
    let s = pos.relative(side);
    match grid.kind(s) {
        Some(BlockKind::Dust(d)) => d.signal,
        Some(BlockKind::RedstoneBlock) => MAX_SIGNAL,
        _ => outputs_to(grid, s, pos),
    }
}

/// Whether a piston at `pos` facing `facing` is activated, evaluating both
/// the piston's own cell and the cell directly above it (quasi-connectivity).
///
/// Input through the piston's own front face is excluded.
#[must_use]
pub fn piston_activated(grid: &Grid, pos: BlockPos, facing: Direction) -> bool {
    activation_at(grid, pos, Some(facing)) || activation_at(grid, pos.relative(Direction::Up), None)
}

fn activation_at(grid: &Grid, cell: BlockPos, excluded_face: Option<Direction>) -> bool {
    for dir in Direction::ALL {
        if excluded_face == Some(dir) {
            continue;
        }
        let n = cell.relative(dir);
        match grid.kind(n) {
            Some(BlockKind::Torch(t)) if t.lit && n.relative(t.attached_face) != cell => {
                return true;
            }
            Some(BlockKind::Lever(l)) if l.on => return true,
            Some(BlockKind::Button(b)) if b.pressed => return true,
            Some(BlockKind::PressurePlate(p)) if plate_signal(p) > 0 => return true,
            Some(BlockKind::RedstoneBlock) => return true,
            Some(BlockKind::Solid(s) | BlockKind::Slime(s)) if s.power.is_powered() => {
                return true;
            }
            Some(BlockKind::Dust(d))
                if d.signal >= 1
                    && (n.relative(Direction::Down) == cell
                        || dust_points_at(grid, n, d, cell)) =>
            {
                return true;
            }
            _ => {
                if outputs_to(grid, n, cell) > 0 {
                    return true;
                }
            }
        }
    }
    false
}

fn is_dust(grid: &Grid, pos: BlockPos) -> bool {
    matches!(grid.kind(pos), Some(BlockKind::Dust(_)))
}

fn dust_signal_at(grid: &Grid, pos: BlockPos) -> u8 {
    match grid.kind(pos) {
        Some(BlockKind::Dust(d)) => d.signal,
        _ => 0,
    }
}
