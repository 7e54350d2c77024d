//! Cell lattice from ten horizontal and ten vertical boundary lines.
//!
//! Cell `(row, col)` spans from the intersection of `horizontal[row]` with
//! `vertical[col]` to the intersection of `horizontal[row + 1]` with
//! `vertical[col + 1]`. Neighbouring cells share boundary lines and therefore
//! share their boundary coordinates exactly.
use crate::types::{CellRect, Grid, Line, Point, GRID_LINES};

/// Angle added to both lines before intersecting.
///
/// Keeps `sin θ` away from zero for lines whose normal is exactly on the x
/// axis. Changing it shifts every corner slightly, so it stays fixed.
pub const THETA_NUDGE: f64 = 1e-4;

/// Intersection of two polar lines.
///
/// Solves `x·cosθᵢ + y·sinθᵢ = rhoᵢ` for both lines after nudging each angle
/// by [`THETA_NUDGE`]. The inputs are not modified.
pub fn intersect(a: &Line, b: &Line) -> Point {
    let t1 = a.theta + THETA_NUDGE;
    let t2 = b.theta + THETA_NUDGE;
    let (s1, c1) = t1.sin_cos();
    let (s2, c2) = t2.sin_cos();

    let x = (b.rho / s2 - a.rho / s1) / (c2 / s2 - c1 / s1);
    let y = (a.rho - x * c1) / s1;
    Point::new(x, y)
}

/// Builds the 9×9 cell matrix from rho-sorted boundary lines.
pub fn build_grid(horizontal: &[Line; GRID_LINES], vertical: &[Line; GRID_LINES]) -> Grid {
    Grid::from_fn(|row, col| {
        let top_left = intersect(&horizontal[row], &vertical[col]);
        let bottom_right = intersect(&horizontal[row + 1], &vertical[col + 1]);
        CellRect::from_corners(top_left, bottom_right)
    })
}
