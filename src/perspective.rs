//! Perspective correction of a detected board (full analysis only).
//!
//! The four outer corners are mapped onto the full `W × H` frame, the source
//! image is warped through that mapping, and every cell is re-projected so
//! the returned geometry lives in rectified coordinates. The warped image is
//! binarised for downstream digit recognition.
use crate::detector::ThresholdParams;
use crate::homography::{
    apply_homography, canonical_corners, perspective_transform, HomographyError,
};
use crate::image::color::{gray_to_rgba, rgba_to_gray};
use crate::image::warp::warp_perspective;
use crate::image::{ImageRgba8, RgbaImage};
use crate::types::{CellRect, Corners, Grid, GRID_CELLS};
use nalgebra::Matrix3;

/// Rectified board.
#[derive(Clone, Debug)]
pub struct Rectification {
    /// Source → rectified homography.
    pub transform: Matrix3<f64>,
    /// Cells in rectified coordinates.
    pub cells: Grid,
    /// Corners read off the rectified cells.
    pub corners: Corners,
    /// Thresholded, perspective-corrected frame.
    pub image: RgbaImage,
}

/// Re-projects each cell's top-left and bottom-right through `h`.
///
/// `None` when any point lands at infinity.
pub fn project_grid(h: &Matrix3<f64>, grid: &Grid) -> Option<Grid> {
    let mut projected = Vec::with_capacity(GRID_CELLS * GRID_CELLS);
    for cell in grid.iter() {
        let top_left = apply_homography(h, cell.top_left())?;
        let bottom_right = apply_homography(h, cell.bottom_right())?;
        projected.push(CellRect::from_corners(top_left, bottom_right));
    }
    Some(Grid::from_fn(|row, col| projected[row * GRID_CELLS + col]))
}

/// Gray → adaptive threshold (paper white, ink black) → RGBA.
pub fn binarize_rectified(image: &RgbaImage, threshold: &ThresholdParams) -> RgbaImage {
    let gray = rgba_to_gray(&image.as_view());
    gray_to_rgba(&threshold.to_threshold().apply(&gray))
}

/// Maps the board bounded by `corners` onto the whole `frame`.
pub fn rectify_board(
    frame: &ImageRgba8<'_>,
    cells: &Grid,
    corners: &Corners,
    threshold: &ThresholdParams,
) -> Result<Rectification, HomographyError> {
    let target = canonical_corners(frame.w as f64, frame.h as f64);
    let transform = perspective_transform(corners, &target)?;
    let warped = warp_perspective(frame, &transform, frame.w, frame.h)?;
    let cells = project_grid(&transform, cells).ok_or(HomographyError::Degenerate)?;
    let corners = cells.corners();
    Ok(Rectification {
        transform,
        cells,
        corners,
        image: binarize_rectified(&warped, threshold),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::rgba::CHANNELS;
    use crate::types::Point;

    fn square_grid(origin: f64, step: f64) -> Grid {
        Grid::from_fn(|row, col| {
            CellRect::from_corners(
                Point::new(origin + step * col as f64, origin + step * row as f64),
                Point::new(origin + step * (col + 1) as f64, origin + step * (row + 1) as f64),
            )
        })
    }

    fn white(w: usize, h: usize) -> Vec<u8> {
        vec![255u8; w * h * CHANNELS]
    }

    #[test]
    fn inner_board_is_stretched_to_the_frame() {
        let (w, h) = (120, 120);
        let data = white(w, h);
        let frame = ImageRgba8::from_raw(w, h, &data).unwrap();
        let grid = square_grid(15.0, 10.0);
        let rect = rectify_board(&frame, &grid, &grid.corners(), &ThresholdParams::default())
            .unwrap();

        let expected = canonical_corners(w as f64, h as f64);
        for (c, e) in rect.corners.iter().zip(expected.iter()) {
            assert!(c.distance(e) < 1e-3, "{c:?} vs {e:?}");
        }
        let cell = rect.cells.cell(4, 4);
        assert!((cell.width() - w as f64 / 9.0).abs() < 1e-3);
        assert_eq!(rect.image.width(), w);
        assert_eq!(rect.image.height(), h);
    }

    #[test]
    fn rectified_image_is_binary_rgba() {
        let (w, h) = (90, 90);
        let mut data = white(w, h);
        for y in 40..50 {
            for x in 0..w {
                let i = (y * w + x) * CHANNELS;
                data[i..i + 3].copy_from_slice(&[0, 0, 0]);
            }
        }
        let frame = ImageRgba8::from_raw(w, h, &data).unwrap();
        let grid = square_grid(0.0, 10.0);
        let rect = rectify_board(&frame, &grid, &grid.corners(), &ThresholdParams::default())
            .unwrap();
        for px in rect.image.as_raw().chunks_exact(CHANNELS) {
            assert!(px[0] == 0 || px[0] == 255);
            assert_eq!(px[0], px[1]);
            assert_eq!(px[3], 255);
        }
        // Edge of the dark band is ink, the paper far from it is white.
        assert_eq!(rect.image.pixel(45, 40)[0], 0);
        assert_eq!(rect.image.pixel(45, 10)[0], 255);
    }

    #[test]
    fn collapsed_corners_fail() {
        let data = white(20, 20);
        let frame = ImageRgba8::from_raw(20, 20, &data).unwrap();
        let grid = square_grid(0.0, 0.0);
        let corners = grid.corners();
        assert!(rectify_board(&frame, &grid, &corners, &ThresholdParams::default()).is_err());
    }
}
