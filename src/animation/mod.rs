//! Per-frame animation of the tulip
//!
//! The flower leans toward the pointer: each tick the lean target is derived
//! from the pointer's horizontal position and the live rotation creeps toward it.

mod swing;

pub use swing::{AnimationController, SwingParams, SwingState};
