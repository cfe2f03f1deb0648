use rayon::prelude::*;

use crate::effects::composite::over;
use crate::foundation::core::RasterBuffer;

const BAND_OPACITY: f32 = 0.5;

/// Distance between band starts for a given intensity.
pub fn scanline_step(intensity: f32) -> u32 {
    let raw = (400.0 / (intensity * 4.0 + 1.0)).floor();
    (raw as u32).max(2)
}

/// Darken horizontal bands with 50% black. Bands are `step / 2` pixels thick; for odd steps the
/// trailing half row is drawn at half coverage.
pub fn apply_scanlines(buf: &mut RasterBuffer, intensity: f32) {
    if intensity <= 0.0 {
        return;
    }
    let step = scanline_step(intensity);
    let full_rows = step / 2;
    let has_partial = step % 2 == 1;
    let stride = buf.stride();

    buf.data_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let phase = y as u32 % step;
            let coverage = if phase < full_rows {
                1.0
            } else if has_partial && phase == full_rows {
                0.5
            } else {
                return;
            };
            for px in row.chunks_exact_mut(4) {
                let dst = [px[0], px[1], px[2], px[3]];
                px.copy_from_slice(&over(dst, [0, 0, 0, 255], BAND_OPACITY * coverage));
            }
        });
}

#[cfg(test)]
#[path = "../../tests/unit/effects/scanlines.rs"]
mod tests;
