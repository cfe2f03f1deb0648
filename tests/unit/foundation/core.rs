use super::*;

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert_eq!(r.len_frames(), 3);
    assert!(!r.is_empty());
}

#[test]
fn fps_validates_and_converts() {
    assert!(Fps::new(30, 0).is_err());
    assert!(Fps::new(0, 1).is_err());
    let fps = Fps::new(30, 1).unwrap();
    assert!((fps.frames_to_secs(15) - 0.5).abs() < 1e-12);
}

#[test]
fn zero_area_buffer_is_invalid_dimensions() {
    let err = RasterBuffer::new(0, 10).unwrap_err();
    assert!(matches!(err, VlabError::InvalidDimensions(_)));
    let err = RasterBuffer::new(10, 0).unwrap_err();
    assert!(matches!(err, VlabError::InvalidDimensions(_)));
}

#[test]
fn oversized_canvas_is_rejected() {
    assert!(Canvas::new(70_000, 10).is_err());
}

#[test]
fn from_rgba_checks_length() {
    let err = RasterBuffer::from_rgba(2, 2, vec![0u8; 15]).unwrap_err();
    assert!(matches!(err, VlabError::InvalidImage(_)));
    assert!(RasterBuffer::from_rgba(2, 2, vec![0u8; 16]).is_ok());
}

#[test]
fn pixel_accessors_are_row_major() {
    let mut buf = RasterBuffer::filled(3, 2, [1, 2, 3, 255]).unwrap();
    buf.set_pixel(2, 1, [9, 9, 9, 9]);
    assert_eq!(buf.pixel(2, 1), [9, 9, 9, 9]);
    assert_eq!(&buf.data()[20..24], &[9, 9, 9, 9]);
    assert_eq!(buf.row(0), &[1, 2, 3, 255, 1, 2, 3, 255, 1, 2, 3, 255]);
}

#[test]
fn source_image_decode_rejects_garbage() {
    let err = SourceImage::decode(b"definitely not a png").unwrap_err();
    assert!(matches!(err, VlabError::InvalidImage(_)));
}

#[test]
fn source_image_decodes_png_bytes() {
    let img = image::RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    let src = SourceImage::decode(&bytes).unwrap();
    assert_eq!((src.width(), src.height()), (4, 3));
    assert_eq!(src.raster().pixel(3, 2), [10, 20, 30, 255]);
}

#[test]
fn copy_from_requires_equal_size() {
    let mut a = RasterBuffer::new(2, 2).unwrap();
    let b = RasterBuffer::filled(3, 2, [1, 1, 1, 1]).unwrap();
    assert!(a.copy_from(&b).is_err());
}
