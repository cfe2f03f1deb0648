use rand::Rng;

use crate::effects::composite::over;
use crate::foundation::core::RasterBuffer;

const DISPLACEMENT_SLICES: u32 = 20;
const MAX_STRIP_OFFSET: f64 = 25.0;

/// Randomized strip smear. Runs `floor(threshold / 2)` iterations.
///
/// Each iteration picks a band at a random row with a random height of up to 5% of the buffer,
/// then either stretches a single column of that band across up to half the width, or redraws
/// the whole band shifted by up to 25 pixels. Every blit reads from a snapshot of the band taken
/// before it is written.
#[tracing::instrument(level = "trace", skip(buf, rng))]
pub fn apply_pixel_sort<R>(buf: &mut RasterBuffer, threshold: f32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let cycles = (threshold.max(0.0) / 2.0).floor() as u32;
    let (w, h) = (buf.width(), buf.height());

    for _ in 0..cycles {
        let y = rng.random_range(0..h);
        let stretch = (rng.random::<f64>() * f64::from(w) * 0.5).floor() as u32;
        let band_h = ((rng.random::<f64>() * f64::from(h) * 0.05).floor() as u32).max(1);
        let rows = y..(y + band_h).min(h);

        if rng.random::<f64>() > 0.5 {
            let x = rng.random_range(0..w);
            let end = (x + stretch).min(w);
            for row in rows {
                let src = buf.pixel(x, row);
                for dx in x..end {
                    let out = over(buf.pixel(dx, row), src, 1.0);
                    buf.set_pixel(dx, row, out);
                }
            }
        } else {
            let offset = ((rng.random::<f64>() - 0.5) * 2.0 * MAX_STRIP_OFFSET).round() as i64;
            let band = snapshot_rows(buf, rows.start, rows.end);
            blit_rows(buf, &band, rows.start, offset, 0);
        }
    }
}

/// Split the buffer into 20 horizontal slices and redraw each at an independent random offset
/// in `[-distortion_x, distortion_x] x [-distortion_y, distortion_y]`.
///
/// All slices read from one snapshot of the buffer taken before the first slice is drawn.
#[tracing::instrument(level = "trace", skip(buf, rng))]
pub fn apply_displacement<R>(
    buf: &mut RasterBuffer,
    distortion_x: f32,
    distortion_y: f32,
    rng: &mut R,
) where
    R: Rng + ?Sized,
{
    if distortion_x <= 0.0 && distortion_y <= 0.0 {
        return;
    }
    let h = buf.height();
    let snapshot = buf.clone();
    let slice_h = f64::from(h) / f64::from(DISPLACEMENT_SLICES);
    let (max_x, max_y) = (f64::from(distortion_x.max(0.0)), f64::from(distortion_y.max(0.0)));

    for i in 0..DISPLACEMENT_SLICES {
        let dx = ((rng.random::<f64>() - 0.5) * 2.0 * max_x).round() as i64;
        let dy = ((rng.random::<f64>() - 0.5) * 2.0 * max_y).round() as i64;
        let start = (f64::from(i) * slice_h).floor() as u32;
        let end = ((f64::from(i + 1) * slice_h).floor() as u32).min(h);
        if start >= end {
            continue;
        }
        let band = snapshot_range(&snapshot, start, end);
        blit_rows(buf, band, start, dx, dy);
    }
}

fn snapshot_rows(buf: &RasterBuffer, start: u32, end: u32) -> Vec<u8> {
    snapshot_range(buf, start, end).to_vec()
}

fn snapshot_range(buf: &RasterBuffer, start: u32, end: u32) -> &[u8] {
    let stride = buf.stride();
    &buf.data()[start as usize * stride..end as usize * stride]
}

/// Source-over `band` (whole rows starting at `top`) into `dst`, shifted by `(dx, dy)`.
fn blit_rows(dst: &mut RasterBuffer, band: &[u8], top: u32, dx: i64, dy: i64) {
    let (w, h) = (i64::from(dst.width()), i64::from(dst.height()));
    let stride = dst.stride();
    for (r, src_row) in band.chunks_exact(stride).enumerate() {
        let ty = i64::from(top) + r as i64 + dy;
        if ty < 0 || ty >= h {
            continue;
        }
        for sx in 0..w {
            let tx = sx + dx;
            if tx < 0 || tx >= w {
                continue;
            }
            let i = sx as usize * 4;
            let src = [src_row[i], src_row[i + 1], src_row[i + 2], src_row[i + 3]];
            let (tx, ty) = (tx as u32, ty as u32);
            let out = over(dst.pixel(tx, ty), src, 1.0);
            dst.set_pixel(tx, ty, out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/glitch.rs"]
mod tests;
