use super::*;

#[test]
fn step_formula() {
    assert_eq!(scanline_step(1.0), 80);
    assert_eq!(scanline_step(10.0), 9);
    assert_eq!(scanline_step(100.0), 2);
}

#[test]
fn zero_intensity_is_noop() {
    let mut buf = RasterBuffer::filled(8, 8, [200, 200, 200, 255]).unwrap();
    let before = buf.clone();
    apply_scanlines(&mut buf, 0.0);
    assert_eq!(buf, before);
}

#[test]
fn even_step_alternates_dark_and_clear_rows() {
    let mut buf = RasterBuffer::filled(4, 8, [200, 200, 200, 255]).unwrap();
    apply_scanlines(&mut buf, 100.0);
    for y in 0..8 {
        let expect = if y % 2 == 0 { [100, 100, 100, 255] } else { [200, 200, 200, 255] };
        assert_eq!(buf.pixel(1, y), expect, "row {y}");
    }
}

#[test]
fn odd_step_has_half_coverage_edge_row() {
    // intensity 10 -> step 9, four full rows then one quarter-dark row.
    let mut buf = RasterBuffer::filled(2, 9, [200, 200, 200, 255]).unwrap();
    apply_scanlines(&mut buf, 10.0);
    assert_eq!(buf.pixel(0, 3), [100, 100, 100, 255]);
    assert_eq!(buf.pixel(0, 4), [150, 150, 150, 255]);
    assert_eq!(buf.pixel(0, 5), [200, 200, 200, 255]);
}
