//! This module contains math related utilities.
pub mod vector3;

pub use vector3::{Axis, Vector3};
