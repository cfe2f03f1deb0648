use super::*;

fn gradient(w: u32, h: u32) -> RasterBuffer {
    let mut buf = RasterBuffer::new(w, h).unwrap();
    for y in 0..h {
        for x in 0..w {
            buf.set_pixel(x, y, [(x * 9 % 256) as u8, (y * 13 % 256) as u8, ((x + y) * 3 % 256) as u8, 255]);
        }
    }
    buf
}

#[test]
fn off_copies_input() {
    let processed = gradient(17, 11);
    let mut dest = RasterBuffer::new(17, 11).unwrap();
    compose(&mut dest, &processed, SymmetryMode::Off, true).unwrap();
    assert_eq!(dest, processed);
}

#[test]
fn two_way_without_mirror_copies_input() {
    let processed = gradient(12, 12);
    let mut dest = RasterBuffer::new(12, 12).unwrap();
    compose(&mut dest, &processed, SymmetryMode::TwoWay, false).unwrap();
    assert_eq!(dest, processed);
}

#[test]
fn two_way_mirror_blends_flipped_copy_at_half_opacity() {
    let processed = gradient(10, 4);
    let mut dest = RasterBuffer::new(10, 4).unwrap();
    compose(&mut dest, &processed, SymmetryMode::TwoWay, true).unwrap();
    let expect = over(processed.pixel(2, 1), processed.pixel(7, 1), 0.5);
    assert_eq!(dest.pixel(2, 1), expect);
}

#[test]
fn four_way_is_mirror_symmetric() {
    for (w, h) in [(40, 30), (31, 31), (25, 40)] {
        let processed = gradient(w, h);
        let mut dest = RasterBuffer::new(w, h).unwrap();
        compose(&mut dest, &processed, SymmetryMode::FourWay, false).unwrap();
        for y in 0..h {
            for x in 0..w {
                let px = dest.pixel(x, y);
                assert_eq!(px, dest.pixel(w - 1 - x, y), "{w}x{h} horizontal at ({x},{y})");
                assert_eq!(px, dest.pixel(x, h - 1 - y), "{w}x{h} vertical at ({x},{y})");
            }
        }
    }
}

#[test]
fn four_way_of_uniform_crop_is_uniform() {
    let processed = RasterBuffer::filled(40, 20, [90, 120, 30, 255]).unwrap();
    let mut dest = RasterBuffer::new(40, 20).unwrap();
    compose(&mut dest, &processed, SymmetryMode::FourWay, false).unwrap();
    assert!(dest.data().chunks_exact(4).all(|px| px == [90, 120, 30, 255]));
}

#[test]
fn eight_way_has_quarter_turn_symmetry() {
    let n = 32;
    let processed = gradient(n, n);
    let mut dest = RasterBuffer::new(n, n).unwrap();
    compose(&mut dest, &processed, SymmetryMode::EightWay, false).unwrap();
    for y in 0..n {
        for x in 0..n {
            assert_eq!(dest.pixel(x, y), dest.pixel(n - 1 - y, x), "at ({x},{y})");
        }
    }
}

#[test]
fn eight_way_fills_outside_figure_with_background() {
    let processed = RasterBuffer::filled(60, 10, [200, 40, 40, 255]).unwrap();
    let mut dest = RasterBuffer::new(60, 10).unwrap();
    compose(&mut dest, &processed, SymmetryMode::EightWay, false).unwrap();
    assert_eq!(dest.pixel(0, 0), BACKGROUND);
    assert_eq!(dest.pixel(59, 9), BACKGROUND);
    assert_eq!(dest.pixel(30, 5), [200, 40, 40, 255]);
}

#[test]
fn wedge_local_flips_odd_wedges() {
    let slice = TAU / 8.0;
    // Just inside wedge 1 and just inside wedge 0, mirrored across their shared edge.
    let r = 10.0;
    let a = (slice / 2.0) + 0.1;
    let b = (slice / 2.0) - 0.1;
    let (ax, ay) = wedge_local(r * a.cos(), r * a.sin());
    let (bx, by) = wedge_local(r * b.cos(), r * b.sin());
    assert!((ax - bx).abs() < 1e-9);
    assert!((ay - by).abs() < 1e-9);
}

#[test]
fn size_mismatch_is_rejected() {
    let processed = gradient(4, 4);
    let mut dest = RasterBuffer::new(5, 4).unwrap();
    assert!(compose(&mut dest, &processed, SymmetryMode::Off, false).is_err());
}
