//! vlab synthesizes stylized raster images on the CPU.
//!
//! A render takes a base photo, an optional pattern photo and an optional camera frame, and runs
//! them through a fixed stage order:
//!
//! - cover-scaled placement under zoom, rotation and pan
//! - brand gradient mapping with stochastic accents
//! - strip smear and slice displacement glitches, then scanlines
//! - 2-way, 4-way or 8-way symmetry tiling
//! - emblem compositing
//! - optional keyed camera composite
//!
//! Use [`render`] for a one-shot frame, or a [`Renderer`] to reuse the parsed emblem and a
//! [`SegmenterHandle`] across frames and to stream a sequence into a [`FrameSink`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Buffers, timing types, errors.
pub mod foundation;
/// Pixel stages.
pub mod effects;
/// Placement and the render driver.
pub mod render;
/// Settings and the animation clock.
pub mod scene;
/// Camera segmentation and compositing.
pub mod segment;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, FrameRange, Point, RasterBuffer, Rect, SourceImage,
    Vec2,
};
pub use crate::foundation::error::{VlabError, VlabResult};

pub use crate::render::pipeline::{RenderInputs, Renderer, render};
pub use crate::render::sequence::{CancelToken, SequenceSpec, SequenceStats};
pub use crate::render::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::scene::animation::AnimationParams;
pub use crate::scene::settings::{AnimationOffset, Geometry, OverlayMode, Settings, SymmetryMode};
pub use crate::segment::classifier::{
    HeuristicSegmenter, SegmentationResult, Segmenter, SegmenterHandle,
};
