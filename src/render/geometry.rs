use rayon::prelude::*;

use crate::foundation::core::{Affine, Canvas, Point, RasterBuffer, SourceImage, Vec2};
use crate::foundation::sample::sample_bilinear;
use crate::scene::settings::Geometry;

/// Source-to-destination transform for placing `src_w x src_h` into `dest`.
///
/// The image is centered, scaled to cover the destination (`max(dw/sw, dh/sh) * zoom`), then
/// rotated about the pan-shifted center.
pub fn placement_transform(dest: Canvas, src_w: u32, src_h: u32, geometry: Geometry) -> Affine {
    let dw = f64::from(dest.width);
    let dh = f64::from(dest.height);
    let sw = f64::from(src_w);
    let sh = f64::from(src_h);

    let scale = (dw / sw).max(dh / sh) * geometry.zoom;
    let pivot = Vec2::new(
        dw / 2.0 + geometry.pan_x / 100.0 * dw,
        dh / 2.0 + geometry.pan_y / 100.0 * dh,
    );

    Affine::translate(pivot)
        * Affine::rotate(geometry.rotation_deg.to_radians())
        * Affine::scale(scale)
        * Affine::translate((-sw / 2.0, -sh / 2.0))
}

/// Draw `src` into `dest`, overwriting every destination pixel.
///
/// Destination pixels whose preimage falls outside the source take the nearest edge sample, so
/// rotated or panned placements still cover the whole frame.
pub fn place(dest: &mut RasterBuffer, src: &SourceImage, geometry: Geometry) {
    let canvas = dest.canvas();
    let inv = placement_transform(canvas, src.width(), src.height(), geometry).inverse();
    let stride = dest.stride();
    let raster = src.raster();

    dest.data_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let cy = y as f64 + 0.5;
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let p = inv * Point::new(x as f64 + 0.5, cy);
                px.copy_from_slice(&sample_bilinear(raster, p.x, p.y));
            }
        });

    tracing::trace!(
        w = canvas.width,
        h = canvas.height,
        zoom = geometry.zoom,
        rotation = geometry.rotation_deg,
        "placed source"
    );
}

#[cfg(test)]
#[path = "../../tests/unit/render/geometry.rs"]
mod tests;
