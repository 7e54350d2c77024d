//! Projective transforms between the detected board and the rectified frame.
//!
//! - `perspective_transform`: exact homography from four correspondences.
//! - `apply_homography_points`: map points, failing on points sent to infinity.
//! - `canonical_corners`: target rectangle in board corner order.
use crate::types::{Corners, Point};
use nalgebra::{Matrix3, SMatrix, SVector, Vector3};
use thiserror::Error;

const EPS: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HomographyError {
    #[error("point correspondences are degenerate (collinear or repeated corners)")]
    Degenerate,
    #[error("homography is not invertible")]
    NotInvertible,
}

/// Corners of the `width × height` target rectangle in board order:
/// `(0,0), (W,0), (W,H), (0,H)`.
pub fn canonical_corners(width: f64, height: f64) -> Corners {
    [
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(width, height),
        Point::new(0.0, height),
    ]
}

/// Homography `H` with `dst[i] ~ H * src[i]`, normalised so `H[(2,2)] = 1`.
///
/// Solves the 8×8 linear system of the four correspondences directly; with
/// exactly four points the mapping is exact, so no least-squares fit is
/// needed.
pub fn perspective_transform(
    src: &[Point; 4],
    dst: &[Point; 4],
) -> Result<Matrix3<f64>, HomographyError> {
    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();
    for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
        let r0 = 2 * i;
        let r1 = 2 * i + 1;

        // Row r0: [ x  y  1  0  0  0 -x*u -y*u ] = u
        a[(r0, 0)] = s.x;
        a[(r0, 1)] = s.y;
        a[(r0, 2)] = 1.0;
        a[(r0, 6)] = -s.x * d.x;
        a[(r0, 7)] = -s.y * d.x;
        b[r0] = d.x;

        // Row r1: [ 0  0  0  x  y  1 -x*v -y*v ] = v
        a[(r1, 3)] = s.x;
        a[(r1, 4)] = s.y;
        a[(r1, 5)] = 1.0;
        a[(r1, 6)] = -s.x * d.y;
        a[(r1, 7)] = -s.y * d.y;
        b[r1] = d.y;
    }

    let h = a.lu().solve(&b).ok_or(HomographyError::Degenerate)?;
    let m = Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0);
    if !m.iter().all(|v| v.is_finite()) || m.determinant().abs() <= EPS {
        return Err(HomographyError::Degenerate);
    }
    Ok(m)
}

/// Inverse homography, renormalised so the bottom-right entry is one.
pub fn invert_homography(h: &Matrix3<f64>) -> Result<Matrix3<f64>, HomographyError> {
    let inv = h.try_inverse().ok_or(HomographyError::NotInvertible)?;
    let scale = inv[(2, 2)];
    if scale.abs() > EPS {
        Ok(inv / scale)
    } else {
        Ok(inv)
    }
}

/// Maps a single point; `None` when it lands on the line at infinity.
#[inline]
pub fn apply_homography(h: &Matrix3<f64>, p: Point) -> Option<Point> {
    let v = h * Vector3::new(p.x, p.y, 1.0);
    let w = v[2];
    if !w.is_finite() || w.abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
        return None;
    }
    Some(Point::new(v[0] / w, v[1] / w))
}

pub fn apply_homography_points(h: &Matrix3<f64>, pts: &[Point]) -> Option<Vec<Point>> {
    pts.iter().map(|&p| apply_homography(h, p)).collect()
}
