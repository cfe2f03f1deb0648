use super::*;

fn frame() -> RasterBuffer {
    RasterBuffer::filled(120, 80, [60, 70, 80, 255]).unwrap()
}

fn center(buf: &RasterBuffer) -> [u8; 4] {
    buf.pixel(buf.width() / 2, buf.height() / 2)
}

#[test]
fn none_leaves_buffer_unchanged() {
    let emblem = Emblem::new().unwrap();
    let mut buf = frame();
    apply_overlay(&mut buf, &emblem, OverlayMode::None, 0.8).unwrap();
    assert_eq!(buf, frame());
}

#[test]
fn mask_negative_punches_out_the_emblem() {
    let emblem = Emblem::new().unwrap();
    let mut buf = frame();
    apply_overlay(&mut buf, &emblem, OverlayMode::MaskNegative, 0.8).unwrap();
    assert_eq!(center(&buf)[3], 0);
    assert_eq!(buf.pixel(0, 0), [60, 70, 80, 255]);
}

#[test]
fn mask_positive_keeps_only_the_emblem() {
    let emblem = Emblem::new().unwrap();
    let mut buf = frame();
    apply_overlay(&mut buf, &emblem, OverlayMode::MaskPositive, 0.8).unwrap();
    assert_eq!(center(&buf), [60, 70, 80, 255]);
    assert_eq!(buf.pixel(0, 0)[3], 0);
}

#[test]
fn watermark_is_near_white_inside() {
    let emblem = Emblem::new().unwrap();
    let mut buf = frame();
    apply_overlay(&mut buf, &emblem, OverlayMode::Watermark, 0.8).unwrap();
    let px = center(&buf);
    assert!(px[0] > 240 && px[1] > 240 && px[2] > 240, "{px:?}");
    assert_eq!(buf.pixel(0, 0), [60, 70, 80, 255]);
}

#[test]
fn accent_glow_is_lime_with_soft_halo() {
    let emblem = Emblem::new().unwrap();
    let mut buf = RasterBuffer::filled(200, 200, [0, 0, 0, 255]).unwrap();
    apply_overlay(&mut buf, &emblem, OverlayMode::AccentGlow, 0.5).unwrap();
    assert_eq!(center(&buf), [BRAND_LIME[0], BRAND_LIME[1], BRAND_LIME[2], 255]);

    // Just outside the glyph's horizontal extent the halo tints the frame green.
    let outside = buf.pixel(100 - 50 - 6, 100);
    assert!(outside[1] > 0, "{outside:?}");
    assert_eq!(buf.pixel(0, 0), [0, 0, 0, 255]);
}

#[test]
fn warped_tints_the_center() {
    let emblem = Emblem::new().unwrap();
    let mut buf = frame();
    apply_overlay(&mut buf, &emblem, OverlayMode::Warped, 0.8).unwrap();
    assert_ne!(center(&buf), [60, 70, 80, 255]);
    assert_eq!(center(&buf)[3], 255);
}
