use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Vec2;
use crate::foundation::error::{VlabError, VlabResult};

/// Symmetry tiling applied after the glitch stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymmetryMode {
    /// Raw glitch, no symmetry.
    Off,
    /// Passthrough with an optional half-opacity horizontal mirror.
    TwoWay,
    /// Mirrored quadrants ("carpet").
    #[default]
    FourWay,
    /// Eight 45° wedges, alternately flipped.
    EightWay,
}

impl SymmetryMode {
    /// Map a legacy segment count (`0`, `2`, `4`, `8`) to a mode.
    pub fn from_segments(segments: u8) -> VlabResult<Self> {
        match segments {
            0 => Ok(Self::Off),
            2 => Ok(Self::TwoWay),
            4 => Ok(Self::FourWay),
            8 => Ok(Self::EightWay),
            other => Err(VlabError::validation(format!(
                "symmetry segments must be 0, 2, 4 or 8, got {other}"
            ))),
        }
    }
}

/// Emblem compositing mode. Exactly one is active per render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayMode {
    /// No emblem.
    None,
    /// Near-white emblem over the frame.
    Watermark,
    /// Keep frame content only inside the emblem.
    MaskPositive,
    /// Punch the emblem out of the frame.
    #[default]
    MaskNegative,
    /// Accent-colored emblem with a soft glow.
    AccentGlow,
    /// Six rotated, offset passes with alternating blend modes.
    Warped,
}

/// Per-instant geometry deltas, combined additively with the static settings.
#[derive(Clone, Copy, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationOffset {
    /// Extra rotation in degrees.
    pub rotation_deg: f64,
    /// Extra zoom (added to `Settings::zoom`).
    pub zoom: f64,
    /// Extra pan in percent of the destination size.
    pub pan: Vec2,
}

impl AnimationOffset {
    /// Return `true` when every delta is zero.
    pub fn is_zero(&self) -> bool {
        self.rotation_deg == 0.0 && self.zoom == 0.0 && self.pan == Vec2::ZERO
    }
}

/// Immutable parameter snapshot for one render pass.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Contrast, `0..=200`.
    pub contrast: f32,
    /// Brightness, `0..=200`; 100 is neutral.
    pub brightness: f32,
    /// Maximum horizontal slice displacement in pixels, `0..=100`.
    pub distortion_x: f32,
    /// Maximum vertical slice displacement in pixels, `0..=100`.
    pub distortion_y: f32,
    /// Pixel-sort intensity, `0..=100`; runs `floor(n/2)` smear iterations.
    pub pixel_sort_threshold: f32,
    /// Noise amount, `0..=100`; drives random accent speckles in midtones.
    pub noise_amount: f32,
    /// Scanline intensity, `0..=100`.
    pub scanlines: f32,
    /// Blend between corrected photo (0) and full brand gradient map (100).
    pub color_mix: f32,
    /// Probability (percent) of accent injection in highlights.
    pub accent_percent: f32,
    /// How much of the pattern's raw color is blended in after mapping.
    pub pattern_texture_mix: f32,
    /// How much the pattern's luma modulates the base before mapping.
    pub pattern_detail_mix: f32,
    /// Symmetry tiling.
    pub symmetry: SymmetryMode,
    /// Mirror overlay for [`SymmetryMode::TwoWay`].
    pub mirror: bool,
    /// Zoom factor, `> 0`.
    pub zoom: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
    /// Horizontal pan in percent of the destination width, `-100..=100`.
    pub pan_x: f64,
    /// Vertical pan in percent of the destination height, `-100..=100`.
    pub pan_y: f64,
    /// Emblem mode.
    pub overlay: OverlayMode,
    /// Emblem scale relative to the short edge, `0.1..=2.0`.
    pub overlay_scale: f64,
    /// Optional animation deltas for the current instant.
    pub animation: Option<AnimationOffset>,
    /// Composite the camera frame (when one is supplied) over the background.
    pub camera_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            contrast: 130.0,
            brightness: 100.0,
            distortion_x: 0.0,
            distortion_y: 0.0,
            pixel_sort_threshold: 0.0,
            noise_amount: 15.0,
            scanlines: 0.0,
            color_mix: 100.0,
            accent_percent: 0.0,
            pattern_texture_mix: 0.0,
            pattern_detail_mix: 0.0,
            symmetry: SymmetryMode::FourWay,
            mirror: true,
            zoom: 1.0,
            rotation_deg: 0.0,
            pan_x: 0.0,
            pan_y: 0.0,
            overlay: OverlayMode::MaskNegative,
            overlay_scale: 0.8,
            animation: None,
            camera_enabled: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> VlabResult<Self> {
        serde_json::from_str(s).map_err(|e| VlabError::serde(e.to_string()))
    }

    /// Read and parse a JSON settings file.
    pub fn from_path(path: impl AsRef<Path>) -> VlabResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> VlabResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| VlabError::serde(e.to_string()))
    }

    /// Reject values no amount of clamping can repair.
    pub fn validate(&self) -> VlabResult<()> {
        let scalars = [
            ("contrast", self.contrast),
            ("brightness", self.brightness),
            ("distortion_x", self.distortion_x),
            ("distortion_y", self.distortion_y),
            ("pixel_sort_threshold", self.pixel_sort_threshold),
            ("noise_amount", self.noise_amount),
            ("scanlines", self.scanlines),
            ("color_mix", self.color_mix),
            ("accent_percent", self.accent_percent),
            ("pattern_texture_mix", self.pattern_texture_mix),
            ("pattern_detail_mix", self.pattern_detail_mix),
        ];
        for (name, v) in scalars {
            if !v.is_finite() {
                return Err(VlabError::validation(format!("{name} must be finite")));
            }
        }
        let geometry = [
            ("rotation_deg", self.rotation_deg),
            ("pan_x", self.pan_x),
            ("pan_y", self.pan_y),
            ("overlay_scale", self.overlay_scale),
        ];
        for (name, v) in geometry {
            if !v.is_finite() {
                return Err(VlabError::validation(format!("{name} must be finite")));
            }
        }
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(VlabError::validation("zoom must be finite and > 0"));
        }
        if let Some(anim) = &self.animation {
            if !anim.rotation_deg.is_finite()
                || !anim.zoom.is_finite()
                || !anim.pan.x.is_finite()
                || !anim.pan.y.is_finite()
            {
                return Err(VlabError::validation("animation offset must be finite"));
            }
        }
        Ok(())
    }

    /// Validate, then clamp every ranged field into its documented range.
    pub fn sanitized(&self) -> VlabResult<Self> {
        self.validate()?;
        let pct = |v: f32| v.clamp(0.0, 100.0);
        Ok(Self {
            contrast: self.contrast.clamp(0.0, 200.0),
            brightness: self.brightness.clamp(0.0, 200.0),
            distortion_x: pct(self.distortion_x),
            distortion_y: pct(self.distortion_y),
            pixel_sort_threshold: pct(self.pixel_sort_threshold),
            noise_amount: pct(self.noise_amount),
            scanlines: pct(self.scanlines),
            color_mix: pct(self.color_mix),
            accent_percent: pct(self.accent_percent),
            pattern_texture_mix: pct(self.pattern_texture_mix),
            pattern_detail_mix: pct(self.pattern_detail_mix),
            symmetry: self.symmetry,
            mirror: self.mirror,
            zoom: self.zoom,
            rotation_deg: self.rotation_deg,
            pan_x: self.pan_x.clamp(-100.0, 100.0),
            pan_y: self.pan_y.clamp(-100.0, 100.0),
            overlay: self.overlay,
            overlay_scale: self.overlay_scale.clamp(0.1, 2.0),
            animation: self.animation,
            camera_enabled: self.camera_enabled,
        })
    }

    /// Geometry after adding the animation deltas.
    pub fn effective_geometry(&self) -> Geometry {
        let anim = self.animation.unwrap_or_default();
        Geometry {
            zoom: (self.zoom + anim.zoom).max(MIN_ANIMATED_ZOOM),
            rotation_deg: self.rotation_deg + anim.rotation_deg,
            pan_x: self.pan_x + anim.pan.x,
            pan_y: self.pan_y + anim.pan.y,
        }
    }
}

const MIN_ANIMATED_ZOOM: f64 = 0.05;

/// Resolved placement parameters for the base image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Zoom factor (> 0).
    pub zoom: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
    /// Horizontal pan in percent of width.
    pub pan_x: f64,
    /// Vertical pan in percent of height.
    pub pan_y: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            rotation_deg: 0.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/settings.rs"]
mod tests;
