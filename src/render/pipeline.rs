use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::effects::color::map_colors;
use crate::effects::emblem::Emblem;
use crate::effects::glitch::{apply_displacement, apply_pixel_sort};
use crate::effects::overlay::apply_overlay;
use crate::effects::scanlines::apply_scanlines;
use crate::effects::symmetry::compose;
use crate::foundation::core::{Canvas, RasterBuffer, SourceImage};
use crate::foundation::error::VlabResult;
use crate::render::geometry::place;
use crate::scene::settings::{Geometry, Settings};
use crate::segment::camera::{FALLBACK_OPACITY, composite_camera};
use crate::segment::classifier::{SegmentationResult, SegmenterHandle};

/// Caller-owned images for one render.
#[derive(Clone, Copy, Debug)]
pub struct RenderInputs<'a> {
    /// Base photo, placed under the full geometry.
    pub base: &'a SourceImage,
    /// Optional pattern photo for texture and detail blending.
    pub pattern: Option<&'a SourceImage>,
    /// Optional camera frame composited over the background.
    pub camera: Option<&'a RasterBuffer>,
}

impl<'a> RenderInputs<'a> {
    /// Inputs with only a base image.
    pub fn new(base: &'a SourceImage) -> Self {
        Self {
            base,
            pattern: None,
            camera: None,
        }
    }

    /// Attach a pattern image.
    pub fn with_pattern(mut self, pattern: &'a SourceImage) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Attach a camera frame.
    pub fn with_camera(mut self, camera: &'a RasterBuffer) -> Self {
        self.camera = Some(camera);
        self
    }
}

/// Render one frame with a fresh [`Renderer`] and an entropy-seeded generator.
///
/// Output is straight-alpha RGBA8, row-major, top-to-bottom.
pub fn render(
    base: &SourceImage,
    pattern: Option<&SourceImage>,
    camera: Option<&RasterBuffer>,
    settings: &Settings,
    out_w: u32,
    out_h: u32,
) -> VlabResult<RasterBuffer> {
    let inputs = RenderInputs {
        base,
        pattern,
        camera,
    };
    Renderer::new()?.render(&inputs, settings, out_w, out_h)
}

/// Reusable render session: the parsed emblem plus a segmenter handle.
///
/// Holds no per-frame mutable state, so one renderer can drive a whole animation.
#[derive(Debug)]
pub struct Renderer {
    emblem: Emblem,
    segmenter: SegmenterHandle,
}

impl Renderer {
    /// Renderer with an initialized heuristic segmenter.
    pub fn new() -> VlabResult<Self> {
        let mut segmenter = SegmenterHandle::heuristic();
        segmenter.init()?;
        Self::with_segmenter(segmenter)
    }

    /// Renderer around a caller-managed segmenter handle.
    pub fn with_segmenter(segmenter: SegmenterHandle) -> VlabResult<Self> {
        Ok(Self {
            emblem: Emblem::new()?,
            segmenter,
        })
    }

    /// Borrow the segmenter handle.
    pub fn segmenter(&self) -> &SegmenterHandle {
        &self.segmenter
    }

    /// Mutably borrow the segmenter handle, e.g. to shut it down.
    pub fn segmenter_mut(&mut self) -> &mut SegmenterHandle {
        &mut self.segmenter
    }

    /// Render using the thread-local entropy source.
    pub fn render(
        &self,
        inputs: &RenderInputs<'_>,
        settings: &Settings,
        out_w: u32,
        out_h: u32,
    ) -> VlabResult<RasterBuffer> {
        self.render_with_rng(inputs, settings, out_w, out_h, &mut rand::rng())
    }

    /// Render drawing all randomness from `rng`. A seeded `rng` gives byte-identical output.
    #[tracing::instrument(level = "debug", skip(self, inputs, settings, rng))]
    pub fn render_with_rng<R>(
        &self,
        inputs: &RenderInputs<'_>,
        settings: &Settings,
        out_w: u32,
        out_h: u32,
        rng: &mut R,
    ) -> VlabResult<RasterBuffer>
    where
        R: Rng + ?Sized,
    {
        let canvas = Canvas::new(out_w, out_h)?;
        let settings = settings.sanitized()?;
        let camera = inputs.camera.filter(|_| settings.camera_enabled);
        let mut stage_rng = StdRng::seed_from_u64(rng.random());

        let (background, mask) = rayon::join(
            || self.background(inputs, &settings, canvas, &mut stage_rng),
            || camera.and_then(|frame| self.segment(frame)),
        );
        let mut out = background?;

        if let Some(frame) = camera {
            if mask.is_none() {
                tracing::warn!(
                    opacity = FALLBACK_OPACITY,
                    "segmentation unavailable, drawing raw camera frame"
                );
            }
            timed("camera", || composite_camera(&mut out, frame, mask.as_ref()))?;
        }
        Ok(out)
    }

    fn segment(&self, frame: &RasterBuffer) -> Option<SegmentationResult> {
        timed("segment", || self.segmenter.segment(frame))
    }

    fn background(
        &self,
        inputs: &RenderInputs<'_>,
        settings: &Settings,
        canvas: Canvas,
        rng: &mut StdRng,
    ) -> VlabResult<RasterBuffer> {
        let mut buf = RasterBuffer::new(canvas.width, canvas.height)?;
        timed("place", || place(&mut buf, inputs.base, settings.effective_geometry()));

        let pattern = match inputs.pattern {
            Some(src) => {
                let mut p = RasterBuffer::new(canvas.width, canvas.height)?;
                let geometry = Geometry {
                    zoom: settings.zoom,
                    ..Geometry::default()
                };
                timed("place_pattern", || place(&mut p, src, geometry));
                Some(p)
            }
            None => None,
        };

        timed("color", || map_colors(&mut buf, settings, pattern.as_ref(), rng))?;
        timed("pixel_sort", || {
            apply_pixel_sort(&mut buf, settings.pixel_sort_threshold, rng)
        });
        timed("displacement", || {
            apply_displacement(&mut buf, settings.distortion_x, settings.distortion_y, rng)
        });
        timed("scanlines", || apply_scanlines(&mut buf, settings.scanlines));

        let mut out = RasterBuffer::new(canvas.width, canvas.height)?;
        timed("symmetry", || compose(&mut out, &buf, settings.symmetry, settings.mirror))?;
        timed("overlay", || {
            apply_overlay(&mut out, &self.emblem, settings.overlay, settings.overlay_scale)
        })?;
        Ok(out)
    }
}

fn timed<T>(stage: &'static str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    tracing::debug!(stage, elapsed_us = start.elapsed().as_micros() as u64, "stage done");
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
