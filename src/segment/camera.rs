use rayon::prelude::*;

use crate::effects::composite::over;
use crate::foundation::core::{RasterBuffer, Rect};
use crate::foundation::error::{VlabError, VlabResult};
use crate::foundation::math::mul_div255_u8;
use crate::foundation::sample::sample_bilinear;
use crate::segment::classifier::SegmentationResult;

/// Opacity of the raw frame when no segmentation is available.
pub const FALLBACK_OPACITY: f32 = 0.9;

/// Largest centered rect with the frame's aspect ratio that fits inside the destination.
pub fn fit_rect(frame_w: u32, frame_h: u32, dest_w: u32, dest_h: u32) -> Rect {
    let (fw, fh) = (f64::from(frame_w), f64::from(frame_h));
    let (dw, dh) = (f64::from(dest_w), f64::from(dest_h));
    let scale = (dw / fw).min(dh / fh);
    let (w, h) = (fw * scale, fh * scale);
    let x0 = (dw - w) / 2.0;
    let y0 = (dh - h) / 2.0;
    Rect::new(x0, y0, x0 + w, y0 + h)
}

/// Letterbox `frame` into `dest` and source-over it, keyed by `mask` when present.
///
/// Without a mask the whole frame is drawn at [`FALLBACK_OPACITY`].
pub fn composite_camera(
    dest: &mut RasterBuffer,
    frame: &RasterBuffer,
    mask: Option<&SegmentationResult>,
) -> VlabResult<()> {
    if let Some(m) = mask {
        if m.width() != frame.width() || m.height() != frame.height() {
            return Err(VlabError::invalid_dimensions(format!(
                "mask {}x{} does not match camera frame {}x{}",
                m.width(),
                m.height(),
                frame.width(),
                frame.height()
            )));
        }
    }

    let rect = fit_rect(frame.width(), frame.height(), dest.width(), dest.height());
    let scale = rect.width() / f64::from(frame.width());
    let opacity = if mask.is_some() { 1.0 } else { FALLBACK_OPACITY };
    let (fw, fh) = (frame.width(), frame.height());
    let stride = dest.stride();

    dest.data_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let v = y as f64 + 0.5;
            if v < rect.y0 || v >= rect.y1 {
                return;
            }
            let sy = (v - rect.y0) / scale;
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let u = x as f64 + 0.5;
                if u < rect.x0 || u >= rect.x1 {
                    continue;
                }
                let sx = (u - rect.x0) / scale;
                let mut src = sample_bilinear(frame, sx, sy);
                if let Some(m) = mask {
                    let mx = (sx.floor() as u32).min(fw - 1);
                    let my = (sy.floor() as u32).min(fh - 1);
                    src[3] = mul_div255_u8(u16::from(src[3]), u16::from(m.alpha_at(mx, my)));
                }
                let out = over([px[0], px[1], px[2], px[3]], src, opacity);
                px.copy_from_slice(&out);
            }
        });
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/segment/camera.rs"]
mod tests;
