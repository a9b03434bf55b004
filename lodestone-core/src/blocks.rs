//! The block catalog: a closed sum of the thirteen circuit component kinds.
//!
//! Every block carries its position and per-variant mutable state. Structural
//! validity (`should_drop`) lives here; signal semantics live in [`crate::power`]
//! and the per-variant update procedures in [`crate::behavior`].

use serde::{Deserialize, Serialize};

use lodestone_utils::{BlockPos, Direction};

use crate::grid::Grid;

/// Maximum dust/comparator signal strength.
pub const MAX_SIGNAL: u8 = 15;

/// Largest cluster of blocks a piston can push.
pub const PUSH_LIMIT: usize = 12;

/// Game ticks between a torch input change and its state flip.
pub const TORCH_TOGGLE_DELAY: u64 = 2;

/// Game ticks between a comparator input change and its output change.
pub const COMPARATOR_DELAY: u64 = 2;

/// Toggle count that burns a torch out.
pub const BURNOUT_TOGGLES: usize = 8;

/// Window, in game ticks, over which torch toggles are counted for burnout.
pub const BURNOUT_WINDOW: u64 = 60;

/// Power level of a conducting block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerState {
    /// Not powered; does not keep torches off or activate components.
    #[default]
    Unpowered,
    /// Powered, but cannot retransmit 15 to adjacent dust.
    WeaklyPowered,
    /// Powered as a source; adjacent dust reads 15.
    StronglyPowered,
}

impl PowerState {
    /// Whether the block is powered at all (weakly or strongly).
    #[must_use]
    pub const fn is_powered(&self) -> bool {
        !matches!(self, PowerState::Unpowered)
    }

    /// Whether the block is powered as a source.
    #[must_use]
    pub const fn is_strong(&self) -> bool {
        matches!(self, PowerState::StronglyPowered)
    }
}

/// Rendered/connective shape of a dust cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DustShape {
    /// Connects by topology; with zero connections it points all four ways.
    #[default]
    Cross,
    /// A centered point with no effective connections.
    Dot,
}

/// Button material, which determines how long a press lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonVariant {
    /// Releases after 20 game ticks.
    Stone,
    /// Releases after 30 game ticks.
    Wood,
}

impl ButtonVariant {
    /// Game ticks a press lasts before auto-release.
    #[must_use]
    pub const fn ticks_to_stay_pressed(&self) -> u64 {
        match self {
            ButtonVariant::Stone => 20,
            ButtonVariant::Wood => 30,
        }
    }
}

/// Pressure plate variant, which determines output scaling and check cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlateVariant {
    /// Binary output; counts all entities.
    Wood,
    /// Binary output; counts only mobs.
    Stone,
    /// Output `min(count, 15)`.
    Light,
    /// Output `min(ceil(count / 10), 15)`.
    Heavy,
}

impl PlateVariant {
    /// Game ticks between deactivation checks.
    #[must_use]
    pub const fn check_delay(&self) -> u64 {
        match self {
            PlateVariant::Wood | PlateVariant::Stone => 20,
            PlateVariant::Light | PlateVariant::Heavy => 10,
        }
    }
}

/// Comparator operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparatorMode {
    /// Output `rear` if `rear >= max(left, right)`, else 0.
    #[default]
    Comparison,
    /// Output `max(0, rear - max(left, right))`.
    Subtraction,
}

/// A pending repeater output flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledFlip {
    /// Tick at which the flip comes due.
    pub tick: u64,
    /// Target output state.
    pub on: bool,
}

/// A pending comparator output change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSignal {
    /// Tick at which the change comes due.
    pub tick: u64,
    /// Target output signal at scheduling time.
    pub signal: u8,
}

/// State of a solid (or slime) conducting block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SolidState {
    /// Current power level, recomputed on update.
    pub power: PowerState,
}

/// State of a dust cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DustState {
    /// Signal strength 0..=15.
    pub signal: u8,
    /// Cross or dot, toggled by interaction.
    pub shape: DustShape,
}

/// State of a lever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeverState {
    /// Direction from the lever to its support block.
    pub attached_face: Direction,
    /// Whether the lever is switched on.
    pub on: bool,
}

/// State of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonState {
    /// Stone or wood.
    pub variant: ButtonVariant,
    /// Direction from the button to its support block.
    pub attached_face: Direction,
    /// Whether the button is currently pressed.
    pub pressed: bool,
    /// Tick of the pending auto-release, if pressed.
    pub scheduled_release: Option<u64>,
}

/// State of a redstone torch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorchState {
    /// Direction from the torch to its attachment block.
    pub attached_face: Direction,
    /// Whether the torch is lit.
    pub lit: bool,
    /// Tick of the pending inversion flip, if any.
    pub scheduled_toggle: Option<u64>,
    /// Timestamps of recent state flips, for burnout detection.
    pub state_change_times: Vec<u64>,
    /// Set once the burnout threshold trips; the torch stays unlit.
    pub burned_out: bool,
}

/// State of a repeater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeaterState {
    /// Output direction.
    pub facing: Direction,
    /// Delay in game ticks: 2, 4, 6, or 8.
    pub delay: u8,
    /// Whether the rear input is powered.
    pub powered: bool,
    /// Whether a side repeater/comparator freezes the output.
    pub locked: bool,
    /// Whether the output is on.
    pub output_on: bool,
    /// Pending output flip, if any.
    pub scheduled_output: Option<ScheduledFlip>,
}

impl RepeaterState {
    /// Cycles the delay 2 -> 4 -> 6 -> 8 -> 2.
    pub const fn cycle_delay(&mut self) {
        self.delay = if self.delay >= 8 { 2 } else { self.delay + 2 };
    }
}

/// State of a comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparatorState {
    /// Output direction.
    pub facing: Direction,
    /// Comparison or subtraction.
    pub mode: ComparatorMode,
    /// Last sampled rear input.
    pub rear: u8,
    /// Last sampled left side input.
    pub left: u8,
    /// Last sampled right side input.
    pub right: u8,
    /// Current output signal 0..=15.
    pub output_signal: u8,
    /// Pending output change, if any.
    pub scheduled_output: Option<ScheduledSignal>,
}

/// State of an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserverState {
    /// Direction of the observed cell; output emerges from the opposite face.
    pub facing: Direction,
    /// Whether the detection pulse is currently emitting.
    pub output_on: bool,
    /// Tick at which the pending pulse starts.
    pub scheduled_pulse_start: Option<u64>,
    /// Tick at which the pending pulse ends.
    pub scheduled_pulse_end: Option<u64>,
}

impl ObserverState {
    /// Whether a detection pulse is already scheduled.
    #[must_use]
    pub const fn pulse_pending(&self) -> bool {
        self.scheduled_pulse_start.is_some() || self.scheduled_pulse_end.is_some()
    }
}

/// State of a piston or sticky piston.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PistonState {
    /// Direction the head extends toward.
    pub facing: Direction,
    /// Whether the head currently occupies the front cell.
    pub extended: bool,
    /// Set while a transition is in flight; completion is two ticks later.
    pub activation_tick: Option<u64>,
    /// Set when an extension was aborted by a short pulse; suppresses the
    /// sticky pull for the cycle.
    pub short_pulse: bool,
}

/// State of a pressure plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateState {
    /// Plate material/weight class.
    pub variant: PlateVariant,
    /// Entity count supplied by the host.
    pub entity_count: u32,
    /// Whether the plate is emitting.
    pub active: bool,
    /// Tick of the pending deactivation check, if armed.
    pub scheduled_check: Option<u64>,
}

/// Discriminant-only view of [`BlockKind`], for dispatch and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum BlockTag {
    Solid,
    Slime,
    RedstoneBlock,
    Dust,
    Lever,
    Button,
    Torch,
    Repeater,
    Comparator,
    Observer,
    Piston,
    StickyPiston,
    PressurePlate,
}

/// The closed sum of block kinds with their mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockKind {
    /// Opaque conducting block.
    Solid(SolidState),
    /// Conducting block that makes piston clusters cohesive.
    Slime(SolidState),
    /// Always-on power source.
    RedstoneBlock,
    /// Signal wire.
    Dust(DustState),
    /// Toggleable source attached to a face.
    Lever(LeverState),
    /// Momentary source attached to a face.
    Button(ButtonState),
    /// Inverting source attached to a face.
    Torch(TorchState),
    /// Directional diode with configurable delay and side locking.
    Repeater(RepeaterState),
    /// Directional comparison/subtraction element.
    Comparator(ComparatorState),
    /// Change detector emitting a 2-tick pulse out of its back.
    Observer(ObserverState),
    /// Pushes blocks when activated.
    Piston(PistonState),
    /// Pushes blocks when activated and pulls one back on retraction.
    StickyPiston(PistonState),
    /// Weighted source atop a solid.
    PressurePlate(PlateState),
}

impl BlockKind {
    /// Returns the discriminant tag for this kind.
    #[must_use]
    pub const fn tag(&self) -> BlockTag {
        match self {
            BlockKind::Solid(_) => BlockTag::Solid,
            BlockKind::Slime(_) => BlockTag::Slime,
            BlockKind::RedstoneBlock => BlockTag::RedstoneBlock,
            BlockKind::Dust(_) => BlockTag::Dust,
            BlockKind::Lever(_) => BlockTag::Lever,
            BlockKind::Button(_) => BlockTag::Button,
            BlockKind::Torch(_) => BlockTag::Torch,
            BlockKind::Repeater(_) => BlockTag::Repeater,
            BlockKind::Comparator(_) => BlockTag::Comparator,
            BlockKind::Observer(_) => BlockTag::Observer,
            BlockKind::Piston(_) => BlockTag::Piston,
            BlockKind::StickyPiston(_) => BlockTag::StickyPiston,
            BlockKind::PressurePlate(_) => BlockTag::PressurePlate,
        }
    }

    /// Whether this block conducts power (solid-like). Slime counts as solid
    /// everywhere except piston cohesion.
    #[must_use]
    pub const fn is_conducting(&self) -> bool {
        matches!(self, BlockKind::Solid(_) | BlockKind::Slime(_))
    }

    /// Whether a piston can push this block.
    #[must_use]
    pub const fn is_movable(&self) -> bool {
        match self {
            BlockKind::Solid(_)
            | BlockKind::Slime(_)
            | BlockKind::RedstoneBlock
            | BlockKind::Observer(_) => true,
            BlockKind::Piston(p) | BlockKind::StickyPiston(p) => !p.extended,
            _ => false,
        }
    }

    /// Whether a piston push destroys this block instead of being blocked.
    #[must_use]
    pub const fn is_destructible(&self) -> bool {
        matches!(
            self,
            BlockKind::Dust(_)
                | BlockKind::Lever(_)
                | BlockKind::Repeater(_)
                | BlockKind::Torch(_)
                | BlockKind::Button(_)
                | BlockKind::PressurePlate(_)
                | BlockKind::Comparator(_)
        )
    }
}

/// A block in the grid: a position plus per-kind state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// The cell this block occupies.
    pub pos: BlockPos,
    /// The kind and its mutable state.
    #[serde(flatten)]
    pub kind: BlockKind,
}

#[allow(missing_docs)]
impl Block {
    #[must_use]
    pub const fn new(pos: BlockPos, kind: BlockKind) -> Self {
        Self { pos, kind }
    }

    #[must_use]
    pub const fn solid(pos: BlockPos) -> Self {
        Self::new(pos, BlockKind::Solid(SolidState::new()))
    }

    #[must_use]
    pub const fn slime(pos: BlockPos) -> Self {
        Self::new(pos, BlockKind::Slime(SolidState::new()))
    }

    #[must_use]
    pub const fn redstone_block(pos: BlockPos) -> Self {
        Self::new(pos, BlockKind::RedstoneBlock)
    }

    #[must_use]
    pub const fn dust(pos: BlockPos) -> Self {
        Self::new(
            pos,
            BlockKind::Dust(DustState {
                signal: 0,
                shape: DustShape::Cross,
            }),
        )
    }

    #[must_use]
    pub const fn lever(pos: BlockPos, attached_face: Direction) -> Self {
        Self::new(
            pos,
            BlockKind::Lever(LeverState {
                attached_face,
                on: false,
            }),
        )
    }

    #[must_use]
    pub const fn button(pos: BlockPos, variant: ButtonVariant, attached_face: Direction) -> Self {
        Self::new(
            pos,
            BlockKind::Button(ButtonState {
                variant,
                attached_face,
                pressed: false,
                scheduled_release: None,
            }),
        )
    }

    #[must_use]
    pub const fn torch(pos: BlockPos, attached_face: Direction) -> Self {
        Self::new(
            pos,
            BlockKind::Torch(TorchState {
                attached_face,
                lit: true,
                scheduled_toggle: None,
                state_change_times: Vec::new(),
                burned_out: false,
            }),
        )
    }

    #[must_use]
    pub const fn repeater(pos: BlockPos, facing: Direction) -> Self {
        Self::new(
            pos,
            BlockKind::Repeater(RepeaterState {
                facing,
                delay: 2,
                powered: false,
                locked: false,
                output_on: false,
                scheduled_output: None,
            }),
        )
    }

    #[must_use]
    pub const fn comparator(pos: BlockPos, facing: Direction) -> Self {
        Self::new(
            pos,
            BlockKind::Comparator(ComparatorState {
                facing,
                mode: ComparatorMode::Comparison,
                rear: 0,
                left: 0,
                right: 0,
                output_signal: 0,
                scheduled_output: None,
            }),
        )
    }

    #[must_use]
    pub const fn observer(pos: BlockPos, facing: Direction) -> Self {
        Self::new(
            pos,
            BlockKind::Observer(ObserverState {
                facing,
                output_on: false,
                scheduled_pulse_start: None,
                scheduled_pulse_end: None,
            }),
        )
    }

    #[must_use]
    pub const fn piston(pos: BlockPos, facing: Direction) -> Self {
        Self::new(pos, BlockKind::Piston(PistonState::new(facing)))
    }

    #[must_use]
    pub const fn sticky_piston(pos: BlockPos, facing: Direction) -> Self {
        Self::new(pos, BlockKind::StickyPiston(PistonState::new(facing)))
    }

    #[must_use]
    pub const fn pressure_plate(pos: BlockPos, variant: PlateVariant) -> Self {
        Self::new(
            pos,
            BlockKind::PressurePlate(PlateState {
                variant,
                entity_count: 0,
                active: false,
                scheduled_check: None,
            }),
        )
    }

    /// Whether this block's support or attachment is absent or of a
    /// disallowed type. Invalid blocks are removed during the drain in which
    /// they became invalid.
    #[must_use]
    pub fn should_drop(&self, grid: &Grid) -> bool {
        let conducting_below = || {
            grid.kind(self.pos.relative(Direction::Down))
                .is_some_and(BlockKind::is_conducting)
        };
        match &self.kind {
            BlockKind::Solid(_)
            | BlockKind::Slime(_)
            | BlockKind::RedstoneBlock
            | BlockKind::Observer(_)
            | BlockKind::Piston(_)
            | BlockKind::StickyPiston(_) => false,
            BlockKind::Dust(_)
            | BlockKind::Repeater(_)
            | BlockKind::Comparator(_)
            | BlockKind::PressurePlate(_) => !conducting_below(),
            BlockKind::Lever(l) => {
                !matches!(
                    grid.kind(self.pos.relative(l.attached_face)),
                    Some(
                        BlockKind::Solid(_)
                            | BlockKind::Slime(_)
                            | BlockKind::Piston(_)
                            | BlockKind::StickyPiston(_)
                    )
                )
            }
            BlockKind::Button(b) => {
                !matches!(
                    grid.kind(self.pos.relative(b.attached_face)),
                    Some(BlockKind::Solid(_) | BlockKind::Slime(_))
                )
            }
            BlockKind::Torch(t) => {
                let support = grid.kind(self.pos.relative(t.attached_face));
                match (t.attached_face, support) {
                    // Never attaches to the bottom of anything.
                    (Direction::Up, _) | (_, None) => true,
                    // Piston tops are valid supports; sides are not.
                    (face, Some(BlockKind::Piston(_) | BlockKind::StickyPiston(_))) => {
                        face != Direction::Down
                    }
                    (
                        _,
                        Some(
                            BlockKind::Solid(_) | BlockKind::Slime(_) | BlockKind::RedstoneBlock,
                        ),
                    ) => false,
                    (_, Some(_)) => true,
                }
            }
        }
    }
}

impl SolidState {
    /// An unpowered conducting block.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            power: PowerState::Unpowered,
        }
    }
}

impl PistonState {
    /// A retracted piston facing the given direction.
    #[must_use]
    pub const fn new(facing: Direction) -> Self {
        Self {
            facing,
            extended: false,
            activation_tick: None,
            short_pulse: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeater_delay_cycles() {
        let Block {
            kind: BlockKind::Repeater(mut r),
            ..
        } = Block::repeater(BlockPos::new(0, 0, 0), Direction::East)
        else {
            unreachable!()
        };
        assert_eq!(r.delay, 2);
        r.cycle_delay();
        assert_eq!(r.delay, 4);
        r.cycle_delay();
        r.cycle_delay();
        assert_eq!(r.delay, 8);
        r.cycle_delay();
        assert_eq!(r.delay, 2);
    }

    #[test]
    fn movable_and_destructible_sets_are_disjoint() {
        let pos = BlockPos::new(0, 0, 0);
        let blocks = [
            Block::solid(pos),
            Block::slime(pos),
            Block::redstone_block(pos),
            Block::dust(pos),
            Block::lever(pos, Direction::Down),
            Block::button(pos, ButtonVariant::Stone, Direction::West),
            Block::torch(pos, Direction::Down),
            Block::repeater(pos, Direction::East),
            Block::comparator(pos, Direction::East),
            Block::observer(pos, Direction::Up),
            Block::piston(pos, Direction::East),
            Block::sticky_piston(pos, Direction::East),
            Block::pressure_plate(pos, PlateVariant::Heavy),
        ];
        for block in &blocks {
            assert!(
                !(block.kind.is_movable() && block.kind.is_destructible()),
                "{:?} is both movable and destructible",
                block.kind.tag()
            );
        }
        assert_eq!(blocks.iter().filter(|b| b.kind.is_movable()).count(), 6);
        assert_eq!(
            blocks.iter().filter(|b| b.kind.is_destructible()).count(),
            7
        );
    }

    #[test]
    fn extended_piston_is_immovable() {
        let mut piston = Block::piston(BlockPos::new(0, 0, 0), Direction::East);
        assert!(piston.kind.is_movable());
        if let BlockKind::Piston(p) = &mut piston.kind {
            p.extended = true;
        }
        assert!(!piston.kind.is_movable());
    }
}
