use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    assert_eq!(over(dst, [200, 200, 200, 200], 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [255, 255, 255, 0], 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255], 1.0), [255, 0, 0, 255]);
}

#[test]
fn over_dst_transparent_returns_src() {
    assert_eq!(over([0, 0, 0, 0], [100, 110, 120, 200], 1.0), [100, 110, 120, 200]);
}

#[test]
fn half_opacity_over_opaque_averages() {
    let out = over([0, 0, 0, 255], [200, 100, 50, 255], 0.5);
    assert_eq!(out, [100, 50, 25, 255]);
}

#[test]
fn screen_brightens_overlay_contrasts() {
    let dst = [64, 192, 128, 255];
    let src = [128, 128, 128, 255];
    let s = blend(dst, src, 1.0, BlendMode::Screen);
    assert!(s[0] > 64 && s[1] > 192);

    let o = blend(dst, src, 1.0, BlendMode::Overlay);
    // 2*s*d for dark destination, 1-2(1-s)(1-d) for light.
    assert_eq!(o[0], to_u8(2.0 * (128.0 / 255.0) * (64.0 / 255.0) * 255.0));
    assert_eq!(o[3], 255);
}

#[test]
fn blend_over_transparent_dst_keeps_source_color() {
    let out = blend([0, 0, 0, 0], [50, 83, 238, 255], 0.25, BlendMode::Screen);
    assert_eq!(&out[..3], &[50, 83, 238]);
    assert_eq!(out[3], 64);
}

#[test]
fn destination_ops_scale_alpha() {
    let px = [10, 20, 30, 200];
    assert_eq!(destination_in(px, 255), px);
    assert_eq!(destination_in(px, 0), [10, 20, 30, 0]);
    assert_eq!(destination_out(px, 255), [10, 20, 30, 0]);
    assert_eq!(destination_out(px, 0), px);
}
