use std::f64::consts::TAU;

use rayon::prelude::*;

use crate::effects::color::BACKGROUND;
use crate::effects::composite::over;
use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{VlabError, VlabResult};
use crate::foundation::sample::sample_bilinear;
use crate::scene::settings::SymmetryMode;

const MIRROR_OPACITY: f32 = 0.5;
const WEDGES: u32 = 8;

/// Centered square crop of `processed` used by the 4-way and 8-way figures.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Crop {
    x0: f64,
    y0: f64,
    size: f64,
}

impl Crop {
    fn centered(w: u32, h: u32) -> Self {
        let size = f64::from(w.min(h));
        Self {
            x0: (f64::from(w) - size) / 2.0,
            y0: (f64::from(h) - size) / 2.0,
            size,
        }
    }
}

/// Tile `processed` into `dest` according to `mode`.
///
/// `Off` copies. `TwoWay` copies and, with `mirror`, lays a half-opacity horizontal mirror on top.
/// `FourWay` and `EightWay` fill with the background color, then draw the mirrored figure built
/// from the centered square crop.
pub fn compose(
    dest: &mut RasterBuffer,
    processed: &RasterBuffer,
    mode: SymmetryMode,
    mirror: bool,
) -> VlabResult<()> {
    if !dest.same_size(processed) {
        return Err(VlabError::invalid_dimensions(format!(
            "symmetry expects equal sizes, got {}x{} and {}x{}",
            dest.width(),
            dest.height(),
            processed.width(),
            processed.height()
        )));
    }

    match mode {
        SymmetryMode::Off => dest.copy_from(processed)?,
        SymmetryMode::TwoWay => {
            dest.copy_from(processed)?;
            if mirror {
                mirror_over(dest, processed);
            }
        }
        SymmetryMode::FourWay => {
            let crop = Crop::centered(processed.width(), processed.height());
            let (w, h) = (f64::from(dest.width()), f64::from(dest.height()));
            // The crop's top-left quadrant is stretched onto a `w/2 x h/2` quadrant.
            let sx = crop.size / w;
            let sy = crop.size / h;
            for_each_pixel(dest, |u, v| {
                let u = if u > w / 2.0 { w - u } else { u };
                let v = if v > h / 2.0 { h - v } else { v };
                let px = sample_bilinear(processed, crop.x0 + u * sx, crop.y0 + v * sy);
                over(BACKGROUND, px, 1.0)
            });
        }
        SymmetryMode::EightWay => {
            let crop = Crop::centered(processed.width(), processed.height());
            let center = dest.canvas().center();
            for_each_pixel(dest, |u, v| {
                let (lx, ly) = wedge_local(u - center.x, v - center.y);
                let cx = lx;
                let cy = ly + crop.size / 2.0;
                if cx < 0.0 || cx > crop.size || cy < 0.0 || cy > crop.size {
                    return BACKGROUND;
                }
                let px = sample_bilinear(processed, crop.x0 + cx, crop.y0 + cy);
                over(BACKGROUND, px, 1.0)
            });
        }
    }
    Ok(())
}

/// Map a point relative to the figure center into the local frame of its 45° wedge.
///
/// Wedge `i` is drawn rotated by `i * 45°` and flipped vertically on odd `i`, so its local frame
/// is recovered by undoing exactly that transform. Whole quarter turns are removed first with
/// exact coordinate swaps, which keeps the figure bit-exact under 90° rotation.
fn wedge_local(dx: f64, dy: f64) -> (f64, f64) {
    let (rx, ry) = match quarter(dx, dy) {
        0 => (dx, dy),
        1 => (dy, -dx),
        2 => (-dx, -dy),
        _ => (-dy, dx),
    };

    let slice = TAU / f64::from(WEDGES);
    // `j` in {-1, 0, 1}: the wedge within the quarter.
    let j = (ry.atan2(rx) / slice).round();
    let (s, c) = (-j * slice).sin_cos();
    let lx = rx * c - ry * s;
    let ly = rx * s + ry * c;
    if j != 0.0 { (lx, -ly) } else { (lx, ly) }
}

/// Which quarter turn (`[-45°, 45°)` is 0, counting toward +y) holds the point.
fn quarter(x: f64, y: f64) -> u8 {
    if x > 0.0 && -x <= y && y < x {
        0
    } else if y > 0.0 && -y < x && x <= y {
        1
    } else if x < 0.0 && x < y && y <= -x {
        2
    } else if y < 0.0 && y <= x && x < -y {
        3
    } else {
        0
    }
}

fn mirror_over(dest: &mut RasterBuffer, processed: &RasterBuffer) {
    let w = processed.width();
    let stride = dest.stride();
    dest.data_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let src_row = processed.row(y as u32);
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let mx = (w as usize - 1 - x) * 4;
                let src = [src_row[mx], src_row[mx + 1], src_row[mx + 2], src_row[mx + 3]];
                let out = over([px[0], px[1], px[2], px[3]], src, MIRROR_OPACITY);
                px.copy_from_slice(&out);
            }
        });
}

/// Overwrite every pixel with `f(center_x, center_y)`, rows in parallel.
fn for_each_pixel<F>(dest: &mut RasterBuffer, f: F)
where
    F: Fn(f64, f64) -> [u8; 4] + Sync,
{
    let stride = dest.stride();
    dest.data_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let v = y as f64 + 0.5;
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                px.copy_from_slice(&f(x as f64 + 0.5, v));
            }
        });
}

#[cfg(test)]
#[path = "../../tests/unit/effects/symmetry.rs"]
mod tests;
