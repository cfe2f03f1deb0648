use super::*;

#[test]
fn defaults_match_stock_look() {
    let s = Settings::default();
    assert_eq!(s.contrast, 130.0);
    assert_eq!(s.brightness, 100.0);
    assert_eq!(s.color_mix, 100.0);
    assert_eq!(s.symmetry, SymmetryMode::FourWay);
    assert_eq!(s.overlay, OverlayMode::MaskNegative);
    assert!(s.mirror);
}

#[test]
fn partial_json_takes_defaults() {
    let s = Settings::from_json_str(r#"{ "symmetry": "eight_way", "overlay": "accent_glow" }"#)
        .unwrap();
    assert_eq!(s.symmetry, SymmetryMode::EightWay);
    assert_eq!(s.overlay, OverlayMode::AccentGlow);
    assert_eq!(s.contrast, 130.0);
}

#[test]
fn json_round_trips_animation_offset() {
    let s = Settings {
        animation: Some(AnimationOffset {
            rotation_deg: 3.0,
            zoom: 0.1,
            pan: Vec2::new(1.0, -2.0),
        }),
        ..Settings::default()
    };
    let back = Settings::from_json_str(&s.to_json_string().unwrap()).unwrap();
    assert_eq!(back, s);
}

#[test]
fn malformed_json_is_serde_error() {
    let err = Settings::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, VlabError::Serde(_)));
}

#[test]
fn unreadable_settings_file_is_io_error_not_validation() {
    let err = Settings::from_path("target/no_such_dir/settings.json").unwrap_err();
    assert!(matches!(err, VlabError::Other(_)), "{err:?}");
    let msg = format!("{err:#}");
    assert!(!msg.starts_with("validation error"), "{msg}");
    assert!(msg.contains("no_such_dir"), "{msg}");
}

#[test]
fn sanitized_clamps_percentages() {
    let s = Settings {
        color_mix: 250.0,
        noise_amount: -5.0,
        contrast: 400.0,
        pan_x: -300.0,
        overlay_scale: 9.0,
        ..Settings::default()
    }
    .sanitized()
    .unwrap();
    assert_eq!(s.color_mix, 100.0);
    assert_eq!(s.noise_amount, 0.0);
    assert_eq!(s.contrast, 200.0);
    assert_eq!(s.pan_x, -100.0);
    assert_eq!(s.overlay_scale, 2.0);
}

#[test]
fn non_positive_zoom_is_rejected() {
    for zoom in [0.0, -1.0, f64::NAN] {
        let s = Settings {
            zoom,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(VlabError::Validation(_))));
    }
}

#[test]
fn non_finite_scalar_is_rejected() {
    let s = Settings {
        scanlines: f32::INFINITY,
        ..Settings::default()
    };
    assert!(s.validate().is_err());
}

#[test]
fn effective_geometry_adds_animation_deltas() {
    let s = Settings {
        zoom: 1.2,
        rotation_deg: 10.0,
        pan_x: 5.0,
        pan_y: -5.0,
        animation: Some(AnimationOffset {
            rotation_deg: 2.5,
            zoom: -0.2,
            pan: Vec2::new(1.0, 1.0),
        }),
        ..Settings::default()
    };
    let g = s.effective_geometry();
    assert!((g.zoom - 1.0).abs() < 1e-12);
    assert_eq!(g.rotation_deg, 12.5);
    assert_eq!(g.pan_x, 6.0);
    assert_eq!(g.pan_y, -4.0);
}

#[test]
fn animated_zoom_is_floored() {
    let s = Settings {
        zoom: 0.1,
        animation: Some(AnimationOffset {
            zoom: -5.0,
            ..AnimationOffset::default()
        }),
        ..Settings::default()
    };
    assert!(s.effective_geometry().zoom > 0.0);
}

#[test]
fn legacy_segment_counts_map_to_modes() {
    assert_eq!(SymmetryMode::from_segments(0).unwrap(), SymmetryMode::Off);
    assert_eq!(SymmetryMode::from_segments(2).unwrap(), SymmetryMode::TwoWay);
    assert_eq!(SymmetryMode::from_segments(4).unwrap(), SymmetryMode::FourWay);
    assert_eq!(SymmetryMode::from_segments(8).unwrap(), SymmetryMode::EightWay);
    assert!(SymmetryMode::from_segments(3).is_err());
}
