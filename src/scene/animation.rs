use std::f64::consts::TAU;

use crate::foundation::core::{Fps, FrameIndex, Vec2};
use crate::scene::settings::AnimationOffset;

/// Oscillation frequency at `speed = 50`.
const BASE_HZ: f64 = 0.25;

/// Parameters of the procedural camera drift used for animated renders.
///
/// The drift is a pure function of elapsed time; there are no timers inside the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationParams {
    /// Oscillation speed, `0..=100`.
    pub speed: f64,
    /// Oscillation amplitude, `0..=100`.
    pub intensity: f64,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            speed: 50.0,
            intensity: 30.0,
        }
    }
}

impl AnimationParams {
    /// Sample the drift at `elapsed_secs`.
    pub fn offset_at(&self, elapsed_secs: f64) -> AnimationOffset {
        let speed = sanitize(self.speed);
        let amount = sanitize(self.intensity) / 100.0;
        if speed == 0.0 || amount == 0.0 || !elapsed_secs.is_finite() {
            return AnimationOffset::default();
        }

        let phase = TAU * BASE_HZ * (speed / 50.0) * elapsed_secs;
        AnimationOffset {
            rotation_deg: amount * 30.0 * phase.sin(),
            zoom: amount * 0.2 * (0.5 * phase).sin(),
            pan: Vec2::new(
                amount * 10.0 * (0.7 * phase).sin(),
                amount * 10.0 * (1.3 * phase).sin(),
            ),
        }
    }

    /// Sample the drift at a frame of a sequence.
    pub fn offset_at_frame(&self, fps: Fps, frame: FrameIndex) -> AnimationOffset {
        self.offset_at(fps.frames_to_secs(frame.0))
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 100.0) } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/animation.rs"]
mod tests;
