use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::Rng;

use crate::foundation::core::{Fps, FrameIndex, FrameRange};
use crate::foundation::error::{VlabError, VlabResult};
use crate::render::pipeline::{RenderInputs, Renderer};
use crate::render::sink::{FrameSink, SinkConfig};
use crate::scene::animation::AnimationParams;
use crate::scene::settings::Settings;

/// Cooperative cancellation flag shared between a sequence render and its controller.
///
/// Clones share the same flag. Cancellation is observed between frames.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create an un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// `true` once [`cancel`](Self::cancel) has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What to render for a frame sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SequenceSpec {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Frame rate used to turn frame indices into elapsed time.
    pub fps: Fps,
    /// Frames to render.
    pub range: FrameRange,
    /// Camera drift sampled per frame.
    pub animation: AnimationParams,
}

/// Summary of a sequence render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SequenceStats {
    /// Frames in the requested range.
    pub frames_total: u64,
    /// Frames rendered and delivered to the sink.
    pub frames_rendered: u64,
    /// `true` when the render stopped early on cancellation.
    pub cancelled: bool,
}

impl Renderer {
    /// Render `spec.range` frame by frame into `sink`.
    ///
    /// Each frame replaces `settings.animation` with the drift at that frame's timestamp. The
    /// token is checked before every frame. Once `begin` succeeds the sink is always closed with
    /// `end`, also when a frame fails; a frame error takes precedence over an `end` error.
    #[tracing::instrument(skip_all, fields(start = spec.range.start.0, end = spec.range.end.0))]
    pub fn render_sequence<R>(
        &self,
        inputs: &RenderInputs<'_>,
        settings: &Settings,
        spec: &SequenceSpec,
        sink: &mut dyn FrameSink,
        cancel: &CancelToken,
        rng: &mut R,
    ) -> VlabResult<SequenceStats>
    where
        R: Rng + ?Sized,
    {
        if spec.range.is_empty() {
            return Err(VlabError::validation("sequence range must be non-empty"));
        }

        let mut stats = SequenceStats {
            frames_total: spec.range.len_frames(),
            ..SequenceStats::default()
        };
        sink.begin(SinkConfig {
            width: spec.width,
            height: spec.height,
            fps: spec.fps,
        })?;

        let rendered = self.render_frames(inputs, settings, spec, sink, cancel, rng, &mut stats);
        let ended = sink.end();
        rendered?;
        ended?;
        Ok(stats)
    }

    #[allow(clippy::too_many_arguments)]
    fn render_frames<R>(
        &self,
        inputs: &RenderInputs<'_>,
        settings: &Settings,
        spec: &SequenceSpec,
        sink: &mut dyn FrameSink,
        cancel: &CancelToken,
        rng: &mut R,
        stats: &mut SequenceStats,
    ) -> VlabResult<()>
    where
        R: Rng + ?Sized,
    {
        let mut frame_settings = settings.clone();
        for f in spec.range.start.0..spec.range.end.0 {
            if cancel.is_cancelled() {
                stats.cancelled = true;
                tracing::info!(
                    frame = f,
                    rendered = stats.frames_rendered,
                    "sequence render cancelled"
                );
                break;
            }
            let idx = FrameIndex(f);
            frame_settings.animation = Some(spec.animation.offset_at_frame(spec.fps, idx));
            let frame = self.render_with_rng(inputs, &frame_settings, spec.width, spec.height, rng)?;
            sink.push_frame(idx, &frame)?;
            stats.frames_rendered += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sequence.rs"]
mod tests;
