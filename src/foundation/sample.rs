use crate::foundation::core::RasterBuffer;

/// Bilinear sample at a continuous position where pixel `i` has its center at `i + 0.5`.
///
/// Positions outside the buffer clamp to the nearest edge. Channels are interpolated with
/// alpha weighting so transparent neighbours do not bleed their color.
pub(crate) fn sample_bilinear(buf: &RasterBuffer, x: f64, y: f64) -> [u8; 4] {
    let w = buf.width();
    let h = buf.height();
    let fx = (x - 0.5).clamp(0.0, f64::from(w - 1));
    let fy = (y - 0.5).clamp(0.0, f64::from(h - 1));

    let x0 = fx.floor() as u32;
    let y0 = fy.floor() as u32;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let tx = (fx - f64::from(x0)) as f32;
    let ty = (fy - f64::from(y0)) as f32;

    let taps = [
        (buf.pixel(x0, y0), (1.0 - tx) * (1.0 - ty)),
        (buf.pixel(x1, y0), tx * (1.0 - ty)),
        (buf.pixel(x0, y1), (1.0 - tx) * ty),
        (buf.pixel(x1, y1), tx * ty),
    ];

    let mut acc = [0.0f32; 4];
    for (px, wgt) in taps {
        if wgt == 0.0 {
            continue;
        }
        let a = f32::from(px[3]) * wgt;
        acc[0] += f32::from(px[0]) * a;
        acc[1] += f32::from(px[1]) * a;
        acc[2] += f32::from(px[2]) * a;
        acc[3] += a;
    }
    if acc[3] <= 0.0 {
        return [0, 0, 0, 0];
    }
    [
        crate::foundation::math::to_u8(acc[0] / acc[3]),
        crate::foundation::math::to_u8(acc[1] / acc[3]),
        crate::foundation::math::to_u8(acc[2] / acc[3]),
        crate::foundation::math::to_u8(acc[3]),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/sample.rs"]
mod tests;
