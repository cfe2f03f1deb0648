use rayon::prelude::*;

use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{VlabError, VlabResult};
use crate::foundation::math::to_u8;

const SAMPLE_FRACTION: f64 = 0.1;
const MAX_SAMPLE: u32 = 100;
const SUBJECT_MIN_BRIGHTNESS: f32 = 50.0;
const SUBJECT_MAX_BRIGHTNESS: f32 = 200.0;
const EDGE_FALLOFF: f32 = 60.0;
const EDGE_FADE: f32 = 0.3;

/// Per-pixel foreground alpha for one camera frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentationResult {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl SegmentationResult {
    /// Wrap an alpha plane; its length must be `width * height`.
    pub fn new(width: u32, height: u32, alpha: Vec<u8>) -> VlabResult<Self> {
        if alpha.len() != (width as usize) * (height as usize) {
            return Err(VlabError::invalid_dimensions(format!(
                "segmentation mask expects {} values for {width}x{height}, got {}",
                (width as usize) * (height as usize),
                alpha.len()
            )));
        }
        Ok(Self { width, height, alpha })
    }

    /// Mask width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major alpha plane.
    pub fn alpha(&self) -> &[u8] {
        &self.alpha
    }

    /// Alpha at `(x, y)`. Panics when out of bounds.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.alpha[(y as usize) * (self.width as usize) + (x as usize)]
    }
}

/// Any foreground/background classifier that can run on a camera frame.
pub trait Segmenter: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Prepare internal state. Called once by [`SegmenterHandle::init`].
    fn init(&mut self) -> VlabResult<()> {
        Ok(())
    }

    /// Release internal state. Called by [`SegmenterHandle::shutdown`].
    fn shutdown(&mut self) {}

    /// Classify `frame`. `None` means no result is available for this frame.
    fn segment(&self, frame: &RasterBuffer) -> Option<SegmentationResult>;
}

/// Color-statistics classifier.
///
/// Estimates a subject color from a centered sample patch, then keys out pixels that are very
/// bright, very dark, or far from the subject color and unsaturated. This is a cheap heuristic
/// and misclassifies under non-uniform lighting.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicSegmenter;

impl HeuristicSegmenter {
    /// Mean RGB of mid-brightness pixels in the centered sample patch.
    pub fn subject_color(frame: &RasterBuffer) -> Option<[f32; 3]> {
        let (w, h) = (frame.width(), frame.height());
        let size = ((f64::from(w) * SAMPLE_FRACTION).floor() as u32).min(MAX_SAMPLE);
        let x0 = (w / 2).saturating_sub(size / 2);
        let y0 = (h / 2).saturating_sub(size / 2);

        let mut sum = [0.0f64; 3];
        let mut count = 0u64;
        for y in y0..(y0 + size).min(h) {
            for x in x0..(x0 + size).min(w) {
                let px = frame.pixel(x, y);
                let b = brightness(px);
                if b > SUBJECT_MIN_BRIGHTNESS && b < SUBJECT_MAX_BRIGHTNESS {
                    for c in 0..3 {
                        sum[c] += f64::from(px[c]);
                    }
                    count += 1;
                }
            }
        }
        if count == 0 {
            return None;
        }
        let n = count as f64;
        Some([(sum[0] / n) as f32, (sum[1] / n) as f32, (sum[2] / n) as f32])
    }

    /// Foreground alpha for one pixel given the subject color.
    pub fn classify_pixel(px: [u8; 4], subject: [f32; 3]) -> u8 {
        let b = brightness(px);
        let (r, g, bl) = (f32::from(px[0]), f32::from(px[1]), f32::from(px[2]));
        let dist = ((r - subject[0]).powi(2)
            + (g - subject[1]).powi(2)
            + (bl - subject[2]).powi(2))
        .sqrt();
        let max = r.max(g).max(bl);
        let min = r.min(g).min(bl);
        let sat = if max == 0.0 { 0.0 } else { (max - min) / max };

        let background = b > 220.0
            || b < 25.0
            || (dist > 80.0 && sat < 0.3)
            || (b > 180.0 && sat < 0.2);
        if background {
            return 0;
        }
        let edge = (dist / EDGE_FALLOFF).min(1.0);
        to_u8(255.0 * (1.0 - edge * EDGE_FADE))
    }

    /// Classify every pixel of `frame`. A patch with no mid-brightness samples yields an
    /// all-background mask.
    pub fn classify(frame: &RasterBuffer) -> SegmentationResult {
        let (w, h) = (frame.width(), frame.height());
        let mut alpha = vec![0u8; (w as usize) * (h as usize)];

        match Self::subject_color(frame) {
            Some(subject) => {
                alpha
                    .par_chunks_exact_mut(w as usize)
                    .zip(frame.data().par_chunks_exact(frame.stride()))
                    .for_each(|(out, row)| {
                        for (a, px) in out.iter_mut().zip(row.chunks_exact(4)) {
                            *a = Self::classify_pixel([px[0], px[1], px[2], px[3]], subject);
                        }
                    });
            }
            None => tracing::debug!("no subject samples; treating frame as background"),
        }
        SegmentationResult {
            width: w,
            height: h,
            alpha,
        }
    }
}

impl Segmenter for HeuristicSegmenter {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn segment(&self, frame: &RasterBuffer) -> Option<SegmentationResult> {
        Some(Self::classify(frame))
    }
}

fn brightness(px: [u8; 4]) -> f32 {
    (f32::from(px[0]) + f32::from(px[1]) + f32::from(px[2])) / 3.0
}

/// Caller-owned segmenter with an explicit lifecycle.
///
/// Segmentation is only available between [`init`](Self::init) and
/// [`shutdown`](Self::shutdown); otherwise [`segment`](Self::segment) returns `None` and the
/// camera composite falls back to the raw frame.
pub struct SegmenterHandle {
    inner: Box<dyn Segmenter>,
    ready: bool,
}

impl SegmenterHandle {
    /// Wrap a segmenter. The handle starts uninitialized.
    pub fn new(inner: Box<dyn Segmenter>) -> Self {
        Self {
            inner,
            ready: false,
        }
    }

    /// Handle around [`HeuristicSegmenter`].
    pub fn heuristic() -> Self {
        Self::new(Box::new(HeuristicSegmenter))
    }

    /// Initialize the segmenter. Idempotent.
    pub fn init(&mut self) -> VlabResult<()> {
        if self.ready {
            return Ok(());
        }
        self.inner.init()?;
        self.ready = true;
        tracing::debug!(segmenter = self.inner.name(), "segmenter initialized");
        Ok(())
    }

    /// Release the segmenter. Later calls to `segment` return `None` until re-initialized.
    pub fn shutdown(&mut self) {
        if self.ready {
            self.inner.shutdown();
            self.ready = false;
            tracing::debug!(segmenter = self.inner.name(), "segmenter shut down");
        }
    }

    /// `true` between `init` and `shutdown`.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Segment `frame` when initialized.
    pub fn segment(&self, frame: &RasterBuffer) -> Option<SegmentationResult> {
        if !self.ready {
            return None;
        }
        self.inner.segment(frame)
    }
}

impl std::fmt::Debug for SegmenterHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmenterHandle")
            .field("segmenter", &self.inner.name())
            .field("ready", &self.ready)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segment/classifier.rs"]
mod tests;
