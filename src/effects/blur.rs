use rayon::prelude::*;

use crate::foundation::error::{VlabError, VlabResult};

/// Gaussian-blur a single-channel `u8` mask with edge clamping.
///
/// Weights are quantized to Q16 and renormalized so a constant mask stays constant.
pub fn blur_mask(src: &[u8], width: u32, height: u32, sigma: f32) -> VlabResult<Vec<u8>> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| VlabError::invalid_dimensions("blur mask size overflow"))?;
    if src.len() != expected {
        return Err(VlabError::invalid_dimensions(format!(
            "blur_mask expects {expected} bytes for {width}x{height}, got {}",
            src.len()
        )));
    }
    let radius = radius_for_sigma(sigma);
    if radius == 0 || expected == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected];
    let mut out = vec![0u8; expected];
    horizontal_pass(src, &mut tmp, width, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

/// Three-sigma support, rounded up.
pub fn radius_for_sigma(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (sigma * 3.0).ceil() as u32
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> VlabResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(VlabError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(VlabError::validation("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|&wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    dst.par_chunks_exact_mut(width as usize)
        .zip(src.par_chunks_exact(width as usize))
        .for_each(|(out_row, in_row)| {
            for x in 0..w {
                let mut acc = 0u64;
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                    acc += u64::from(kw) * u64::from(in_row[sx as usize]);
                }
                out_row[x as usize] = q16_to_u8(acc);
            }
        });
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as usize;
    let h = height as i32;
    dst.par_chunks_exact_mut(w)
        .enumerate()
        .for_each(|(y, out_row)| {
            let y = y as i32;
            for (x, out) in out_row.iter_mut().enumerate() {
                let mut acc = 0u64;
                for (ki, &kw) in k.iter().enumerate() {
                    let sy = (y + ki as i32 - radius).clamp(0, h - 1) as usize;
                    acc += u64::from(kw) * u64::from(src[sy * w + x]);
                }
                *out = q16_to_u8(acc);
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
