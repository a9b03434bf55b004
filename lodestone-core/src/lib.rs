//! # Lodestone Core
//!
//! Deterministic, tick-based simulation kernel for a voxel-world redstone
//! circuitry subset. The [`world::World`] driver owns a sparse block grid and
//! a tick scheduler; each call to [`world::World::tick`] advances time and
//! propagates signal, power, mechanical, and structural changes to quiescence.

pub mod behavior;
pub mod blocks;
pub mod error;
pub mod grid;
pub mod power;
pub mod snapshot;
pub mod world;

pub use blocks::{Block, BlockKind};
pub use error::WorldError;
pub use snapshot::Snapshot;
pub use world::{EntityCounts, World};
