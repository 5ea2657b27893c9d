//! Tempo Clock - the rescaling core of the time virtualization engine
//!
//! This crate implements:
//! - `VirtualClock<T>`: per-source rebasing state and rescaling math
//! - `ClockRegistry`: the four owned clocks and discontinuity-free rate changes

pub mod clock;
pub mod registry;

pub use clock::*;
pub use registry::*;
