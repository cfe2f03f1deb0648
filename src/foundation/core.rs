use crate::foundation::error::{VlabError, VlabResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Absolute 0-based frame index in sequence space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// Inclusive range start.
    pub start: FrameIndex,
    /// Exclusive range end.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> VlabResult<Self> {
        if start.0 > end.0 {
            return Err(VlabError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Return `true` when the range has no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> VlabResult<Self> {
        if den == 0 {
            return Err(VlabError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(VlabError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert a frame index to elapsed seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Largest accepted edge length; the vector rasterizer works in `u16` space.
    pub const MAX_EDGE: u32 = u16::MAX as u32;

    /// Create a validated, non-empty canvas.
    pub fn new(width: u32, height: u32) -> VlabResult<Self> {
        if width == 0 || height == 0 {
            return Err(VlabError::invalid_dimensions(format!(
                "canvas must have non-zero area, got {width}x{height}"
            )));
        }
        if width > Self::MAX_EDGE || height > Self::MAX_EDGE {
            return Err(VlabError::invalid_dimensions(format!(
                "canvas edges must be <= {}, got {width}x{height}",
                Self::MAX_EDGE
            )));
        }
        Ok(Self { width, height })
    }

    /// Size of the short edge.
    pub fn min_edge(self) -> u32 {
        self.width.min(self.height)
    }

    /// Center point in pixel space.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// A fixed-size grid of straight-alpha RGBA8 samples, row-major, top-to-bottom.
///
/// This is the unit of work for every pipeline stage. Stages either mutate a buffer in place or
/// return a fresh buffer they exclusively own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    canvas: Canvas,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Allocate a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> VlabResult<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Allocate a buffer with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> VlabResult<Self> {
        let canvas = Canvas::new(width, height)?;
        let len = byte_len(canvas)?;
        let mut data = vec![0u8; len];
        if rgba != [0, 0, 0, 0] {
            for px in data.chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
        Ok(Self { canvas, data })
    }

    /// Wrap an existing RGBA8 byte vector.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> VlabResult<Self> {
        let canvas = Canvas::new(width, height)?;
        let expected = byte_len(canvas)?;
        if data.len() != expected {
            return Err(VlabError::invalid_image(format!(
                "expected {expected} rgba8 bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self { canvas, data })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Borrow the raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutably borrow the raw RGBA8 bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        (self.canvas.width as usize) * 4
    }

    /// Read one pixel. Panics when out of bounds, like slice indexing.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = self.index(x, y);
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Overwrite one pixel. Panics when out of bounds, like slice indexing.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = self.index(x, y);
        self.data[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Borrow a single row of pixels.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = (y as usize) * stride;
        &self.data[start..start + stride]
    }

    /// Set every pixel to `rgba`.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Return `true` when both buffers share dimensions.
    pub fn same_size(&self, other: &Self) -> bool {
        self.canvas == other.canvas
    }

    /// Copy `other` into `self`; both must share dimensions.
    pub fn copy_from(&mut self, other: &Self) -> VlabResult<()> {
        if !self.same_size(other) {
            return Err(VlabError::invalid_dimensions(format!(
                "copy_from expects equal sizes, got {}x{} and {}x{}",
                self.width(),
                self.height(),
                other.width(),
                other.height()
            )));
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.canvas.width && y < self.canvas.height,
            "pixel ({x},{y}) outside {}x{}",
            self.canvas.width,
            self.canvas.height
        );
        ((y as usize) * (self.canvas.width as usize) + (x as usize)) * 4
    }
}

/// A decoded caller-owned source photo. Read-only to the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    raster: RasterBuffer,
}

impl SourceImage {
    /// Wrap straight-alpha RGBA8 pixels.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> VlabResult<Self> {
        if width == 0 || height == 0 {
            return Err(VlabError::invalid_image(format!(
                "source image must have non-zero area, got {width}x{height}"
            )));
        }
        Ok(Self {
            raster: RasterBuffer::from_rgba(width, height, data)?,
        })
    }

    /// Use an existing raster as a source image.
    pub fn from_raster(raster: RasterBuffer) -> Self {
        Self { raster }
    }

    /// Decode an encoded image (PNG, JPEG, ...) from memory.
    pub fn decode(bytes: &[u8]) -> VlabResult<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| VlabError::invalid_image(format!("decode failed: {e}")))?;
        Self::from_dynamic(img)
    }

    /// Convert an already-decoded [`image::DynamicImage`].
    pub fn from_dynamic(img: image::DynamicImage) -> VlabResult<Self> {
        let rgba = img.to_rgba8();
        let (w, h) = rgba.dimensions();
        Self::from_rgba(w, h, rgba.into_raw())
    }

    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Borrow the decoded pixels.
    pub fn raster(&self) -> &RasterBuffer {
        &self.raster
    }
}

fn byte_len(canvas: Canvas) -> VlabResult<usize> {
    (canvas.width as usize)
        .checked_mul(canvas.height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| VlabError::invalid_dimensions("raster buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
