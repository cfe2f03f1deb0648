use crate::foundation::core::{Affine, BezPath, Canvas};
use crate::foundation::error::{VlabError, VlabResult};

/// Native width of the emblem path in path units.
pub const EMBLEM_WIDTH: f64 = 231.0;
/// Native height of the emblem path in path units.
pub const EMBLEM_HEIGHT: f64 = 123.0;

const EMBLEM_SVG: &str = "M177.342 0L113.341 37.6405L49.3449 0H0V33.446H24.9079L72.6891 61.5485\
L25.0779 89.5539H0V123H49.5149L113.341 85.4566L177.173 123L231 123V89.554L201.605 89.5539\
L153.993 61.5485L201.775 33.446L231 33.446V6.96101e-05L177.342 0Z";

/// How a path is turned into coverage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Coverage {
    /// Nonzero fill.
    Fill,
    /// Stroke of the given width in device pixels.
    Stroke(f64),
}

/// The crossing "X" glyph.
#[derive(Clone, Debug)]
pub struct Emblem {
    path: BezPath,
}

impl Emblem {
    /// Parse the built-in emblem path.
    pub fn new() -> VlabResult<Self> {
        let path = BezPath::from_svg(EMBLEM_SVG)
            .map_err(|e| VlabError::validation(format!("emblem path: {e}")))?;
        Ok(Self { path })
    }

    /// The emblem outline in native units.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Centered placement at `scale * min_edge / EMBLEM_WIDTH`.
    pub fn placement(canvas: Canvas, scale: f64) -> Affine {
        let s = f64::from(canvas.min_edge()) / EMBLEM_WIDTH * scale;
        Affine::translate(canvas.center().to_vec2())
            * Affine::scale(s)
            * Affine::translate((-EMBLEM_WIDTH / 2.0, -EMBLEM_HEIGHT / 2.0))
    }

    /// Rasterize the emblem under `transform` into a per-pixel coverage mask (`0..=255`).
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn coverage(
        &self,
        canvas: Canvas,
        transform: Affine,
        mode: Coverage,
    ) -> VlabResult<Vec<u8>> {
        let w = u16::try_from(canvas.width)
            .map_err(|_| VlabError::invalid_dimensions("emblem canvas width exceeds u16"))?;
        let h = u16::try_from(canvas.height)
            .map_err(|_| VlabError::invalid_dimensions("emblem canvas height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        match mode {
            Coverage::Fill => {
                ctx.set_transform(affine_to_cpu(transform));
                ctx.fill_path(&bezpath_to_cpu(&self.path));
            }
            Coverage::Stroke(width) => {
                // Stroke in device space so the width is not scaled with the glyph.
                let mut device = self.path.clone();
                device.apply_affine(transform);
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
                ctx.stroke_path(&bezpath_to_cpu(&device));
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        Ok(pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect())
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/emblem.rs"]
mod tests;
