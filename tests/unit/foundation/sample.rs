use super::*;

#[test]
fn solid_buffer_samples_exactly() {
    let buf = RasterBuffer::filled(5, 4, [128, 128, 128, 255]).unwrap();
    for (x, y) in [(0.0, 0.0), (2.3, 1.7), (4.99, 3.99), (-10.0, 50.0)] {
        assert_eq!(sample_bilinear(&buf, x, y), [128, 128, 128, 255]);
    }
}

#[test]
fn pixel_centers_return_that_pixel() {
    let mut buf = RasterBuffer::filled(2, 1, [0, 0, 0, 255]).unwrap();
    buf.set_pixel(1, 0, [200, 100, 50, 255]);
    assert_eq!(sample_bilinear(&buf, 1.5, 0.5), [200, 100, 50, 255]);
    assert_eq!(sample_bilinear(&buf, 0.5, 0.5), [0, 0, 0, 255]);
}

#[test]
fn midpoint_blends_neighbours() {
    let mut buf = RasterBuffer::filled(2, 1, [0, 0, 0, 255]).unwrap();
    buf.set_pixel(1, 0, [200, 200, 200, 255]);
    assert_eq!(sample_bilinear(&buf, 1.0, 0.5), [100, 100, 100, 255]);
}

#[test]
fn transparent_neighbour_does_not_bleed_color() {
    let mut buf = RasterBuffer::filled(2, 1, [0, 0, 0, 0]).unwrap();
    buf.set_pixel(1, 0, [200, 40, 10, 255]);
    let px = sample_bilinear(&buf, 1.0, 0.5);
    assert_eq!(&px[..3], &[200, 40, 10]);
    assert_eq!(px[3], 128);
}
