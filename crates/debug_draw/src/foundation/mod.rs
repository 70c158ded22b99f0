//! Foundation utilities shared across the crate
//!
//! Low-level building blocks with no dependency on the draw pipeline:
//! math type aliases, color constants, and small geometric helpers.

pub mod math;
