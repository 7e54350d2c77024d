//! Perspective warp of RGBA frames with bilinear sampling.
use super::rgba::{ImageRgba8, RgbaImage, CHANNELS};
use crate::homography::{invert_homography, HomographyError};
use nalgebra::{Matrix3, Vector3};

const BORDER: [u8; CHANNELS] = [0; CHANNELS];

/// Warps `src` through `h` (source → destination coordinates) into a
/// `width × height` image.
///
/// Every destination pixel is pulled back through `h⁻¹` and sampled
/// bilinearly. Samples outside the source read as transparent black.
pub fn warp_perspective(
    src: &ImageRgba8<'_>,
    h: &Matrix3<f64>,
    width: usize,
    height: usize,
) -> Result<RgbaImage, HomographyError> {
    let inv = invert_homography(h)?;
    let mut out = RgbaImage::new(width, height);
    for y in 0..height {
        let row = out.row_bytes_mut(y);
        for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let v = inv * Vector3::new(x as f64, y as f64, 1.0);
            if v[2].abs() <= f64::EPSILON {
                continue;
            }
            let (sx, sy) = (v[0] / v[2], v[1] / v[2]);
            if let Some(sample) = sample_bilinear(src, sx, sy) {
                px.copy_from_slice(&sample);
            }
        }
    }
    Ok(out)
}

/// Bilinear sample at `(x, y)`; `None` when all four taps are outside.
pub fn sample_bilinear(src: &ImageRgba8<'_>, x: f64, y: f64) -> Option<[u8; CHANNELS]> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    let x0 = x.floor();
    let y0 = y.floor();
    let (fx, fy) = (x - x0, y - y0);
    let (x0, y0) = (x0 as i64, y0 as i64);
    let (w, h) = (src.w as i64, src.h as i64);
    if x0 + 1 < 0 || y0 + 1 < 0 || x0 >= w || y0 >= h {
        return None;
    }

    let tap = |xi: i64, yi: i64| -> [u8; CHANNELS] {
        if xi < 0 || yi < 0 || xi >= w || yi >= h {
            BORDER
        } else {
            src.pixel(xi as usize, yi as usize)
        }
    };
    let p00 = tap(x0, y0);
    let p10 = tap(x0 + 1, y0);
    let p01 = tap(x0, y0 + 1);
    let p11 = tap(x0 + 1, y0 + 1);

    let mut out = [0u8; CHANNELS];
    for c in 0..CHANNELS {
        let top = p00[c] as f64 * (1.0 - fx) + p10[c] as f64 * fx;
        let bottom = p01[c] as f64 * (1.0 - fx) + p11[c] as f64 * fx;
        let v = top * (1.0 - fy) + bottom * fy;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    Some(out)
}
