//! Color conversions between camera RGBA frames and 8-bit gray.
use super::gray::GrayImage;
use super::rgba::{ImageRgba8, RgbaImage, CHANNELS};
use super::traits::{ImageView, ImageViewMut};

// BT.601 luma weights in 14-bit fixed point (sum = 1 << 14).
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const SHIFT: u32 = 14;

#[inline]
fn luma(px: &[u8]) -> u8 {
    let sum = px[0] as u32 * R_WEIGHT + px[1] as u32 * G_WEIGHT + px[2] as u32 * B_WEIGHT;
    ((sum + (1 << (SHIFT - 1))) >> SHIFT) as u8
}

/// `0.299 R + 0.587 G + 0.114 B`, rounded; alpha is ignored.
pub fn rgba_to_gray(src: &ImageRgba8<'_>) -> GrayImage {
    let mut out = GrayImage::new(src.w, src.h);
    for y in 0..src.h {
        let row = src.row_bytes(y);
        for (dst, px) in out.row_mut(y).iter_mut().zip(row.chunks_exact(CHANNELS)) {
            *dst = luma(px);
        }
    }
    out
}

/// Replicates gray into the color channels with opaque alpha.
pub fn gray_to_rgba(src: &GrayImage) -> RgbaImage {
    let mut out = RgbaImage::new(src.width(), src.height());
    for (y, row) in src.rows().enumerate() {
        let dst = out.row_bytes_mut(y);
        for (px, &v) in dst.chunks_exact_mut(CHANNELS).zip(row) {
            px.copy_from_slice(&[v, v, v, u8::MAX]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_use_bt601_weights() {
        let data = [
            255, 0, 0, 255, //
            0, 255, 0, 255, //
            0, 0, 255, 255, //
            255, 255, 255, 0,
        ];
        let view = ImageRgba8::from_raw(4, 1, &data).unwrap();
        let gray = rgba_to_gray(&view);
        assert_eq!(gray.as_raw(), &[76, 150, 29, 255]);
    }

    #[test]
    fn gray_expands_to_opaque_rgba() {
        let gray = GrayImage::from_raw(2, 1, vec![10, 200]).unwrap();
        let rgba = gray_to_rgba(&gray);
        assert_eq!(rgba.as_raw(), &[10, 10, 10, 255, 200, 200, 200, 255]);
    }
}
