use super::*;

#[test]
fn non_positive_sigma_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6];
    assert_eq!(blur_mask(&src, 3, 2, 0.0).unwrap(), src);
    assert_eq!(radius_for_sigma(-1.0), 0);
}

#[test]
fn constant_mask_is_identity() {
    let src = vec![90u8; 12 * 7];
    assert_eq!(blur_mask(&src, 12, 7, 2.0).unwrap(), src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (15u32, 15u32);
    let mut src = vec![0u8; (w * h) as usize];
    src[(7 * w + 7) as usize] = 255;

    let out = blur_mask(&src, w, h, 1.0).unwrap();
    assert!(out.iter().filter(|&&v| v != 0).count() > 1);
    assert!(out[(7 * w + 7) as usize] < 255);

    let sum: u32 = out.iter().map(|&v| u32::from(v)).sum();
    assert!((sum as i32 - 255).abs() <= 12, "sum {sum}");
}

#[test]
fn length_mismatch_is_rejected() {
    let err = blur_mask(&[0u8; 5], 2, 2, 1.0).unwrap_err();
    assert!(matches!(err, VlabError::InvalidDimensions(_)));
}
