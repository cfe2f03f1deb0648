use crate::foundation::math::{mul_div255_u8, to_u8};

/// A straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Separable blend function applied where source and destination overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Plain source-over.
    #[default]
    Normal,
    /// `s + d - s*d`.
    Screen,
    /// Multiply in dark destination areas, screen in light ones.
    Overlay,
}

impl BlendMode {
    fn apply(self, s: f32, d: f32) -> f32 {
        match self {
            Self::Normal => s,
            Self::Screen => s + d - s * d,
            Self::Overlay => {
                if d <= 0.5 {
                    2.0 * s * d
                } else {
                    1.0 - 2.0 * (1.0 - s) * (1.0 - d)
                }
            }
        }
    }
}

/// Composite `src` over `dst` using `mode` on the overlapping region.
///
/// Works in straight alpha: `a = sa + da(1-sa)` and
/// `c·a = sc·sa(1-da) + dc·da(1-sa) + B(sc,dc)·sa·da`.
pub fn blend(dst: Rgba8, src: Rgba8, opacity: f32, mode: BlendMode) -> Rgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let sa = f32::from(src[3]) / 255.0 * opacity;
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let sc = f32::from(src[i]) / 255.0;
        let dc = f32::from(dst[i]) / 255.0;
        let premul = sc * sa * (1.0 - da) + dc * da * (1.0 - sa) + mode.apply(sc, dc) * sa * da;
        out[i] = to_u8(premul / out_a * 255.0);
    }
    out[3] = to_u8(out_a * 255.0);
    out
}

/// Source-over at `opacity`.
pub fn over(dst: Rgba8, src: Rgba8, opacity: f32) -> Rgba8 {
    blend(dst, src, opacity, BlendMode::Normal)
}

/// Keep `dst` only where `coverage` is set (destination-in).
pub fn destination_in(dst: Rgba8, coverage: u8) -> Rgba8 {
    [
        dst[0],
        dst[1],
        dst[2],
        mul_div255_u8(u16::from(dst[3]), u16::from(coverage)),
    ]
}

/// Erase `dst` where `coverage` is set (destination-out).
pub fn destination_out(dst: Rgba8, coverage: u8) -> Rgba8 {
    destination_in(dst, 255 - coverage)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
