//! Angle-based split of raw detections into horizontal and vertical sets.
use crate::angle::{axis_deviation, normalize_polar};
use crate::types::{Axis, Line};
use serde::Serialize;

/// Candidate lines per axis, each sorted ascending by rho.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ClassifiedLines {
    pub horizontal: Vec<Line>,
    pub vertical: Vec<Line>,
}

impl ClassifiedLines {
    pub fn axis(&self, axis: Axis) -> &[Line] {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }
}

/// Sorts lines ascending by rho.
pub fn sort_by_rho(lines: &mut [Line]) {
    lines.sort_by(|a, b| {
        a.rho
            .partial_cmp(&b.rho)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Splits `lines` into horizontal and vertical candidates.
///
/// Each line is first folded to non-negative rho; it is then vertical when
/// `|θ| < angle_tolerance` and horizontal when `|θ - π/2| < angle_tolerance`.
/// Lines matching neither axis are dropped.
pub fn classify_lines(lines: &[Line], angle_tolerance: f64) -> ClassifiedLines {
    let mut out = ClassifiedLines::default();
    for &raw in lines {
        let line = normalize_polar(raw);
        if !line.rho.is_finite() || !line.theta.is_finite() {
            continue;
        }
        if axis_deviation(&line, Axis::Vertical) < angle_tolerance {
            out.vertical.push(line);
        } else if axis_deviation(&line, Axis::Horizontal) < angle_tolerance {
            out.horizontal.push(line);
        }
    }
    sort_by_rho(&mut out.horizontal);
    sort_by_rho(&mut out.vertical);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn splits_by_angle_and_sorts() {
        let lines = [
            Line::new(120.0, FRAC_PI_2),
            Line::new(40.0, 0.05),
            Line::new(10.0, FRAC_PI_2 - 0.1),
            Line::new(5.0, 0.0),
            Line::new(70.0, FRAC_PI_4),
        ];
        let split = classify_lines(&lines, 0.3);
        let h: Vec<f64> = split.horizontal.iter().map(|l| l.rho).collect();
        let v: Vec<f64> = split.vertical.iter().map(|l| l.rho).collect();
        assert_eq!(h, vec![10.0, 120.0]);
        assert_eq!(v, vec![5.0, 40.0]);
    }

    #[test]
    fn negative_rho_vertical_is_kept() {
        let split = classify_lines(&[Line::new(-30.0, PI - 0.02)], 0.3);
        assert_eq!(split.vertical.len(), 1);
        assert!((split.vertical[0].rho - 30.0).abs() < 1e-12);
        assert!((split.vertical[0].theta + 0.02).abs() < 1e-12);
        assert!(split.horizontal.is_empty());
    }

    #[test]
    fn diagonal_lines_are_dropped() {
        let split = classify_lines(&[Line::new(50.0, FRAC_PI_4)], 0.3);
        assert!(split.horizontal.is_empty());
        assert!(split.vertical.is_empty());
    }
}
