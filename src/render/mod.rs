//! Frame rendering: placement, the single-frame pipeline and sequence rendering into sinks.

/// Cover-scaled placement of the base image.
pub mod geometry;
/// Single-frame pipeline and the [`Renderer`](pipeline::Renderer) session.
pub mod pipeline;
/// Multi-frame rendering with cooperative cancellation.
pub mod sequence;
/// Frame sink trait and built-in sinks.
pub mod sink;
