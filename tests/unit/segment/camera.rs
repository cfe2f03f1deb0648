use super::*;

#[test]
fn fit_by_height_for_wide_destination() {
    let r = fit_rect(100, 100, 300, 150);
    assert_eq!(r, Rect::new(75.0, 0.0, 225.0, 150.0));
}

#[test]
fn fit_by_width_for_tall_destination() {
    let r = fit_rect(200, 100, 100, 200);
    assert_eq!(r, Rect::new(0.0, 75.0, 100.0, 125.0));
}

#[test]
fn fallback_draws_frame_at_ninety_percent() {
    let mut dest = RasterBuffer::filled(40, 20, [0, 0, 0, 255]).unwrap();
    let frame = RasterBuffer::filled(20, 20, [200, 100, 0, 255]).unwrap();
    composite_camera(&mut dest, &frame, None).unwrap();
    assert_eq!(dest.pixel(20, 10), [180, 90, 0, 255]);
    // Letterbox bars stay untouched.
    assert_eq!(dest.pixel(5, 10), [0, 0, 0, 255]);
    assert_eq!(dest.pixel(35, 10), [0, 0, 0, 255]);
}

#[test]
fn mask_keys_out_background_pixels() {
    let mut dest = RasterBuffer::filled(10, 10, [0, 0, 255, 255]).unwrap();
    let frame = RasterBuffer::filled(10, 10, [255, 0, 0, 255]).unwrap();
    let mut alpha = vec![0u8; 100];
    for v in alpha.iter_mut().take(50) {
        *v = 255;
    }
    let mask = SegmentationResult::new(10, 10, alpha).unwrap();
    composite_camera(&mut dest, &frame, Some(&mask)).unwrap();
    assert_eq!(dest.pixel(3, 2), [255, 0, 0, 255]);
    assert_eq!(dest.pixel(3, 8), [0, 0, 255, 255]);
}

#[test]
fn mismatched_mask_is_rejected() {
    let mut dest = RasterBuffer::new(10, 10).unwrap();
    let frame = RasterBuffer::new(10, 10).unwrap();
    let mask = SegmentationResult::new(5, 5, vec![0; 25]).unwrap();
    let err = composite_camera(&mut dest, &frame, Some(&mask)).unwrap_err();
    assert!(matches!(err, VlabError::InvalidDimensions(_)));
}
