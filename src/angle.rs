//! Angle utilities for polar lines.
use crate::types::{Axis, Line};
use std::f64::consts::{FRAC_PI_2, PI};

/// Folds a negative-rho line onto its equivalent with non-negative rho.
///
/// `(rho, θ)` and `(-rho, θ - π)` describe the same line, so a vertical
/// stroke reported near θ ≈ π with negative rho lands near θ ≈ 0.
#[inline]
pub fn normalize_polar(line: Line) -> Line {
    if line.rho < 0.0 {
        Line::new(-line.rho, line.theta - PI)
    } else {
        line
    }
}

/// Reference normal angle for lines running along `axis`.
#[inline]
pub fn axis_normal(axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => FRAC_PI_2,
        Axis::Vertical => 0.0,
    }
}

/// Unsigned deviation of a normalized line's angle from the axis normal.
#[inline]
pub fn axis_deviation(line: &Line, axis: Axis) -> f64 {
    (line.theta - axis_normal(axis)).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn negative_rho_is_folded() {
        let line = normalize_polar(Line::new(-20.0, PI - 0.01));
        assert!(approx_eq(line.rho, 20.0));
        assert!(approx_eq(line.theta, -0.01));
    }

    #[test]
    fn positive_rho_is_untouched() {
        let line = Line::new(35.0, 1.2);
        assert_eq!(normalize_polar(line), line);
    }

    #[test]
    fn deviation_is_measured_from_axis_normal() {
        let line = Line::new(10.0, FRAC_PI_2 + 0.1);
        assert!(approx_eq(axis_deviation(&line, Axis::Horizontal), 0.1));
        let line = Line::new(10.0, -0.2);
        assert!(approx_eq(axis_deviation(&line, Axis::Vertical), 0.2));
    }
}
