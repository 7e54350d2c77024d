//! Gaussian-weighted adaptive thresholding.
//!
//! Each pixel is compared against the Gaussian mean of its `block × block`
//! neighbourhood minus a constant: `src > mean - c` marks the pixel as
//! background paper (255) for a binary result, or as foreground ink when the
//! output is inverted. The mean is rounded to 8 bits before comparison.
use super::f32::ImageF32;
use super::filters::{separable_blur, GaussianKernel};
use super::gray::GrayImage;
use super::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug)]
pub struct AdaptiveThreshold {
    kernel: GaussianKernel,
    c: f64,
    invert: bool,
}

impl AdaptiveThreshold {
    pub fn new(block_size: usize, c: f64) -> Self {
        Self {
            kernel: GaussianKernel::new(block_size, 0.0),
            c,
            invert: false,
        }
    }

    /// Swap 0 and 255 in the output so dark strokes become foreground.
    pub fn inverted(mut self) -> Self {
        self.invert = true;
        self
    }

    pub fn apply<V: ImageView<Pixel = u8>>(&self, src: &V) -> GrayImage {
        let mean = separable_blur(&ImageF32::from_u8(src), &self.kernel);
        let delta = self.c.ceil() as i32;
        let (on, off) = if self.invert { (0, 255) } else { (255, 0) };
        let mut out = GrayImage::new(src.width(), src.height());
        for (y, row) in src.rows().enumerate() {
            let means = mean.row(y);
            for ((d, &s), &m) in out.row_mut(y).iter_mut().zip(row).zip(means) {
                let m = m.round().clamp(0.0, 255.0) as i32;
                *d = if s as i32 - m > -delta { on } else { off };
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke_image() -> GrayImage {
        // White page with a 2-px dark vertical stroke at x = 10..12.
        let (w, h) = (24, 16);
        let mut data = vec![255u8; w * h];
        for y in 0..h {
            data[y * w + 10] = 0;
            data[y * w + 11] = 0;
        }
        GrayImage::from_raw(w, h, data).unwrap()
    }

    #[test]
    fn inverted_threshold_marks_dark_strokes() {
        let out = AdaptiveThreshold::new(11, 5.0).inverted().apply(&stroke_image());
        for y in 0..16 {
            assert_eq!(out.get(10, y), 255);
            assert_eq!(out.get(11, y), 255);
            assert_eq!(out.get(0, y), 0);
            assert_eq!(out.get(20, y), 0);
        }
    }

    #[test]
    fn binary_threshold_keeps_paper_white() {
        let out = AdaptiveThreshold::new(11, 5.0).apply(&stroke_image());
        assert_eq!(out.get(3, 3), 255);
        assert_eq!(out.get(10, 3), 0);
    }

    #[test]
    fn uniform_image_is_all_background() {
        let img = GrayImage::from_raw(8, 8, vec![128; 64]).unwrap();
        let out = AdaptiveThreshold::new(11, 5.0).inverted().apply(&img);
        assert_eq!(out.count_foreground(), 0);
    }
}
