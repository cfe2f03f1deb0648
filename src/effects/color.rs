use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{VlabError, VlabResult};
use crate::foundation::math::{lerp, luma, to_u8};
use crate::scene::settings::Settings;

/// Corporate blue, `#3253EE`.
pub const BRAND_BLUE: [u8; 3] = [0x32, 0x53, 0xEE];
/// Neon lime accent, `#B4FF00`.
pub const BRAND_LIME: [u8; 3] = [0xB4, 0xFF, 0x00];
/// Highlight white.
pub const BRAND_WHITE: [u8; 3] = [0xFF, 0xFF, 0xFF];
/// Soft black used at the bottom of the shadow ramp.
pub const SOFT_BLACK: [u8; 3] = [5, 5, 5];
/// Near-black fill behind symmetry figures, `#050505`.
pub const BACKGROUND: [u8; 4] = [5, 5, 5, 255];

const SHADOW_LUMA: f32 = 50.0;
const HIGHLIGHT_LUMA: f32 = 180.0;
const NOISE_MIN_LUMA: f32 = 100.0;
const ACCENT_MIN_LUMA: f32 = 220.0;

/// Contrast curve factor: `259(c+255) / (255(259-c))`.
pub fn contrast_factor(contrast: f32) -> f32 {
    (259.0 * (contrast + 255.0)) / (255.0 * (259.0 - contrast))
}

/// Per-render constants derived from [`Settings`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorParams {
    /// Output of [`contrast_factor`].
    pub contrast_factor: f32,
    /// `brightness - 100`, added after the contrast curve.
    pub brightness_offset: f32,
    /// Gradient-map blend, `0..=1`.
    pub mix: f32,
    /// Pattern luma modulation strength, `0..=1`.
    pub detail_mix: f32,
    /// Pattern color blend after mapping, `0..=1`.
    pub texture_mix: f32,
    /// Noise percent, `0..=100`.
    pub noise_amount: f32,
    /// Highlight accent percent, `0..=100`.
    pub accent_percent: f32,
}

impl ColorParams {
    /// Derive mapping constants from a settings snapshot.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            contrast_factor: contrast_factor(settings.contrast),
            brightness_offset: settings.brightness - 100.0,
            mix: settings.color_mix / 100.0,
            detail_mix: settings.pattern_detail_mix / 100.0,
            texture_mix: settings.pattern_texture_mix / 100.0,
            noise_amount: settings.noise_amount,
            accent_percent: settings.accent_percent,
        }
    }

    fn is_stochastic(&self) -> bool {
        self.mix > 0.0 && (self.noise_amount > 0.0 || self.accent_percent > 0.0)
    }
}

/// Gradient-map a luma value to the brand palette (shadow ramp, blue mids, white highlights).
pub fn gradient_target(l: f32) -> [f32; 3] {
    if l < SHADOW_LUMA {
        let t = l / SHADOW_LUMA;
        let mut out = [0.0f32; 3];
        for (c, o) in out.iter_mut().enumerate() {
            *o = f32::from(SOFT_BLACK[c]) * (1.0 - t) + f32::from(BRAND_BLUE[c]) * 0.2 * t;
        }
        out
    } else if l < HIGHLIGHT_LUMA {
        BRAND_BLUE.map(f32::from)
    } else {
        BRAND_WHITE.map(f32::from)
    }
}

/// Recolor `buf` in place.
///
/// Pixels are independent, so rows run in parallel. Each row draws its accent noise from a
/// `StdRng` seeded by `rng`; a seeded `rng` therefore reproduces the exact output.
pub fn map_colors<R>(
    buf: &mut RasterBuffer,
    settings: &Settings,
    pattern: Option<&RasterBuffer>,
    rng: &mut R,
) -> VlabResult<()>
where
    R: Rng + ?Sized,
{
    if let Some(p) = pattern {
        if !p.same_size(buf) {
            return Err(VlabError::invalid_dimensions(format!(
                "pattern {}x{} does not match destination {}x{}",
                p.width(),
                p.height(),
                buf.width(),
                buf.height()
            )));
        }
    }

    let params = ColorParams::from_settings(settings);
    let rows = buf.height() as usize;
    let seeds: Vec<Option<u64>> = if params.is_stochastic() {
        (0..rows).map(|_| Some(rng.random::<u64>())).collect()
    } else {
        vec![None; rows]
    };
    let stride = buf.stride();

    buf.data_mut()
        .par_chunks_exact_mut(stride)
        .zip(seeds.into_par_iter())
        .enumerate()
        .for_each(|(y, (row, seed))| {
            let mut row_rng = seed.map(StdRng::seed_from_u64);
            let pat_row = pattern.map(|p| p.row(y as u32));
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let pat_px = pat_row.map(|r| &r[x * 4..x * 4 + 4]);
                map_pixel(px, pat_px, &params, row_rng.as_mut());
            }
        });
    Ok(())
}

fn map_pixel(px: &mut [u8], pattern: Option<&[u8]>, p: &ColorParams, rng: Option<&mut StdRng>) {
    let mut c = [0.0f32; 3];
    for (i, v) in c.iter_mut().enumerate() {
        let corrected = p.contrast_factor * (f32::from(px[i]) - 128.0) + 128.0 + p.brightness_offset;
        *v = corrected.clamp(0.0, 255.0);
    }

    if let Some(s) = pattern {
        if p.detail_mix > 0.0 {
            let sl = luma(f32::from(s[0]), f32::from(s[1]), f32::from(s[2]));
            let factor = 1.0 + ((sl - 128.0) / 128.0) * p.detail_mix;
            for v in &mut c {
                *v *= factor;
            }
        }
    }

    let l = luma(c[0], c[1], c[2]);

    let mut out = c;
    if p.mix > 0.0 {
        let target = if accent_hit(rng, l, p.noise_amount, p.accent_percent) {
            BRAND_LIME.map(f32::from)
        } else {
            gradient_target(l)
        };
        for i in 0..3 {
            out[i] = lerp(c[i], target[i], p.mix);
        }
    }

    if let Some(s) = pattern {
        if p.texture_mix > 0.0 {
            for i in 0..3 {
                out[i] = lerp(out[i], f32::from(s[i]), p.texture_mix);
            }
        }
    }

    for i in 0..3 {
        px[i] = to_u8(out[i]);
    }
}

fn accent_hit(rng: Option<&mut StdRng>, l: f32, noise_amount: f32, accent_percent: f32) -> bool {
    let Some(rng) = rng else {
        return false;
    };
    if noise_amount > 0.0 {
        let roll = rng.random::<f32>() * 100.0;
        if roll < noise_amount * 0.5 && l > NOISE_MIN_LUMA {
            return true;
        }
    }
    l > ACCENT_MIN_LUMA && accent_percent > 0.0 && rng.random::<f32>() * 100.0 < accent_percent
}

#[cfg(test)]
#[path = "../../tests/unit/effects/color.rs"]
mod tests;
