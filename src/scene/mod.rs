//! Per-render parameter snapshots and the explicit animation clock.

/// Procedural drift sampled from elapsed time.
pub mod animation;
/// The settings snapshot and its enums.
pub mod settings;
