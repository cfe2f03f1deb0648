use std::f64::consts::TAU;

use rayon::prelude::*;

use crate::effects::blur::blur_mask;
use crate::effects::color::{BRAND_BLUE, BRAND_LIME};
use crate::effects::composite::{BlendMode, blend, destination_in, destination_out, over};
use crate::effects::emblem::{Coverage, Emblem};
use crate::foundation::core::{Affine, RasterBuffer};
use crate::foundation::error::VlabResult;
use crate::scene::settings::OverlayMode;

const WATERMARK_OPACITY: f32 = 0.95;
const GLOW_OPACITY: f32 = 0.8;
const GLOW_SIGMA: f32 = 20.0;
const WARP_PASSES: u32 = 6;
const WARP_ROTATION: f64 = 0.35;
const WARP_DRIFT: f64 = 0.02;
const WARP_STROKE_OPACITY: f32 = 0.9;

/// Draw the emblem onto `dest` using `mode`, centered and sized to `scale` of the short edge.
#[tracing::instrument(level = "debug", skip(dest, emblem))]
pub fn apply_overlay(
    dest: &mut RasterBuffer,
    emblem: &Emblem,
    mode: OverlayMode,
    scale: f64,
) -> VlabResult<()> {
    let canvas = dest.canvas();
    let placement = Emblem::placement(canvas, scale);

    match mode {
        OverlayMode::None => {}
        OverlayMode::MaskPositive => {
            let mask = emblem.coverage(canvas, placement, Coverage::Fill)?;
            apply_with_mask(dest, &mask, destination_in);
        }
        OverlayMode::MaskNegative => {
            let mask = emblem.coverage(canvas, placement, Coverage::Fill)?;
            apply_with_mask(dest, &mask, destination_out);
        }
        OverlayMode::Watermark => {
            let mask = emblem.coverage(canvas, placement, Coverage::Fill)?;
            apply_with_mask(dest, &mask, |px, cov| {
                over(px, [255, 255, 255, cov], WATERMARK_OPACITY)
            });
        }
        OverlayMode::AccentGlow => {
            let mask = emblem.coverage(canvas, placement, Coverage::Fill)?;
            let glow = blur_mask(&mask, canvas.width, canvas.height, GLOW_SIGMA)?;
            let lime = |a: u8| [BRAND_LIME[0], BRAND_LIME[1], BRAND_LIME[2], a];
            apply_with_mask(dest, &glow, |px, g| over(px, lime(g), GLOW_OPACITY));
            apply_with_mask(dest, &mask, |px, cov| over(px, lime(cov), 1.0));
        }
        OverlayMode::Warped => {
            let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
            for i in 0..WARP_PASSES {
                let t = f64::from(i) / f64::from(WARP_PASSES - 1);
                let mode = if i % 2 == 0 {
                    BlendMode::Screen
                } else {
                    BlendMode::Overlay
                };
                // Rotation is about the canvas origin, after the drift translation.
                let drift = ((TAU * t).sin() * w * WARP_DRIFT, (TAU * t).cos() * h * WARP_DRIFT);
                let transform = Affine::translate(drift)
                    * Affine::rotate((t - 0.5) * WARP_ROTATION)
                    * Emblem::placement(canvas, scale * (0.8 + 0.15 * f64::from(i)));

                let opacity = 0.25 + 0.1 * i as f32;
                let fill = emblem.coverage(canvas, transform, Coverage::Fill)?;
                apply_with_mask(dest, &fill, |px, cov| {
                    blend(px, [BRAND_BLUE[0], BRAND_BLUE[1], BRAND_BLUE[2], cov], opacity, mode)
                });

                if i == WARP_PASSES - 1 {
                    let edge = emblem.coverage(canvas, transform, Coverage::Stroke(2.0 * scale))?;
                    apply_with_mask(dest, &edge, |px, cov| {
                        blend(
                            px,
                            [BRAND_LIME[0], BRAND_LIME[1], BRAND_LIME[2], cov],
                            WARP_STROKE_OPACITY,
                            mode,
                        )
                    });
                }
            }
        }
    }
    Ok(())
}

fn apply_with_mask<F>(dest: &mut RasterBuffer, mask: &[u8], f: F)
where
    F: Fn([u8; 4], u8) -> [u8; 4] + Sync,
{
    dest.data_mut()
        .par_chunks_exact_mut(4)
        .zip(mask.par_iter())
        .for_each(|(px, &cov)| {
            let out = f([px[0], px[1], px[2], px[3]], cov);
            px.copy_from_slice(&out);
        });
}

#[cfg(test)]
#[path = "../../tests/unit/effects/overlay.rs"]
mod tests;
