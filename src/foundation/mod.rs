//! Raster buffers, frame timing types, the error taxonomy and shared pixel math.

/// Buffers, canvas and timing primitives.
pub mod core;
/// Error taxonomy.
pub mod error;
pub(crate) mod math;
pub(crate) mod sample;
