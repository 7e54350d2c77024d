//! Separable smoothing filters with replicate-border handling.
use super::f32::ImageF32;
use super::traits::{ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters. Taps are applied in
/// left-to-right order around the centre tap.
pub trait SeparableFilter {
    fn taps(&self) -> &[f32];
}

/// Normalised odd-length Gaussian kernel.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    taps: Vec<f32>,
    sigma: f64,
}

impl GaussianKernel {
    /// Kernel of `size` taps (forced odd, at least 1).
    ///
    /// A non-positive `sigma` is derived from the size as
    /// `0.3 * ((size - 1) / 2 - 1) + 0.8`, the usual rule for box-sized
    /// Gaussian windows.
    pub fn new(size: usize, sigma: f64) -> Self {
        let size = size.max(1) | 1;
        let sigma = if sigma > 0.0 {
            sigma
        } else {
            0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8
        };
        let half = (size / 2) as f64;
        let scale = -0.5 / (sigma * sigma);
        let raw: Vec<f64> = (0..size)
            .map(|i| {
                let d = i as f64 - half;
                (scale * d * d).exp()
            })
            .collect();
        let sum: f64 = raw.iter().sum();
        let taps = raw.iter().map(|v| (v / sum) as f32).collect();
        Self { taps, sigma }
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Applies `filter` horizontally then vertically. Samples outside the image
/// replicate the nearest edge pixel.
pub fn separable_blur<F: SeparableFilter + ?Sized>(src: &ImageF32, filter: &F) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    let taps = filter.taps();
    let mut tmp = ImageF32::new(w, h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 || taps.is_empty() {
        return out;
    }
    let half = (taps.len() / 2) as isize;
    let clamp = |v: isize, n: usize| v.clamp(0, n as isize - 1) as usize;

    for y in 0..h {
        let row = src.row(y);
        let dst = tmp.row_mut(y);
        for (x, d) in dst.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                acc += t * row[clamp(x as isize + k as isize - half, w)];
            }
            *d = acc;
        }
    }

    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                acc += t * tmp.get(x, clamp(y as isize + k as isize - half, h));
            }
            out.set(x, y, acc);
        }
    }
    out
}
