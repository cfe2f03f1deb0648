//! Camera-frame foreground classification and compositing.

/// Letterboxing and keyed compositing of camera frames.
pub mod camera;
/// Segmenter trait, the heuristic classifier and its handle.
pub mod classifier;
