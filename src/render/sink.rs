use crate::foundation::core::{Fps, FrameIndex, RasterBuffer};
use crate::foundation::error::VlabResult;

/// Configuration provided to a [`FrameSink`] at the start of a sequence render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Playback rate of the sequence.
    pub fps: Fps,
}

/// Consumer of rendered frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order, between
/// one `begin` and one `end`. `end` is also called when a render is cancelled or a frame fails.
pub trait FrameSink {
    /// Called once before the first frame.
    fn begin(&mut self, cfg: SinkConfig) -> VlabResult<()>;
    /// Receive one finished frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &RasterBuffer) -> VlabResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> VlabResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    finished: bool,
    /// Frames in sequence order.
    pub frames: Vec<(FrameIndex, RasterBuffer)>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Config received by the last `begin`.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// `true` once `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> VlabResult<()> {
        self.cfg = Some(cfg);
        self.finished = false;
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &RasterBuffer) -> VlabResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> VlabResult<()> {
        self.finished = true;
        Ok(())
    }
}
