//! Voting and peak extraction.
//!
//! Accumulator layout
//! - `angle_bins × rho_bins` cells, padded by one zero cell on every side so
//!   the neighbour comparisons need no bounds checks.
//! - `rho_bins = round((2·(W + H) + 1) / rho_resolution)`; bin `r` maps back
//!   to `rho = (r - (rho_bins - 1) / 2) · rho_resolution`.
//!
//! A bin is a peak when its votes exceed the threshold, are strictly greater
//! than the lower rho/theta neighbours and at least the upper ones, so a
//! plateau yields exactly one peak.
//!
//! Strokes wider than one pixel also vote for slightly tilted lines that pass
//! through them, and those form separate local maxima a few bins away. Peaks
//! are therefore suppressed a second time in line space: walking from the
//! strongest, a peak is dropped when a kept line at a similar angle crosses
//! it or runs within `suppression_distance` of it inside the frame.
use super::options::HoughOptions;
use super::LineDetector;
use crate::image::{ImageU8, ImageView};
use crate::types::{Line, Point};
use std::f64::consts::{FRAC_PI_2, PI};

/// Precomputed Hough transform for a fixed accumulator layout.
#[derive(Clone, Debug)]
pub struct HoughTransform {
    options: HoughOptions,
    /// `cos θₙ / rho_resolution`
    cos_table: Vec<f64>,
    /// `sin θₙ / rho_resolution`
    sin_table: Vec<f64>,
}

struct Accumulator {
    votes: Vec<u32>,
    angle_bins: usize,
    rho_bins: usize,
}

impl Accumulator {
    #[inline]
    fn stride(&self) -> usize {
        self.rho_bins + 2
    }

    #[inline]
    fn index(&self, angle: usize, rho: usize) -> usize {
        (angle + 1) * self.stride() + rho + 1
    }

    fn is_peak(&self, base: usize, threshold: u32) -> bool {
        let v = self.votes[base];
        let s = self.stride();
        v > threshold
            && v > self.votes[base - 1]
            && v >= self.votes[base + 1]
            && v > self.votes[base - s]
            && v >= self.votes[base + s]
    }
}

impl HoughTransform {
    pub fn new(options: HoughOptions) -> Self {
        let bins = options.angle_bins();
        let inv_rho = if options.rho_resolution > 0.0 {
            1.0 / options.rho_resolution
        } else {
            1.0
        };
        let (sin_table, cos_table): (Vec<f64>, Vec<f64>) = (0..bins)
            .map(|n| {
                let (s, c) = (n as f64 * options.theta_resolution).sin_cos();
                (s * inv_rho, c * inv_rho)
            })
            .unzip();
        Self {
            options,
            cos_table,
            sin_table,
        }
    }

    fn rho_bins(&self, w: usize, h: usize) -> usize {
        let res = if self.options.rho_resolution > 0.0 {
            self.options.rho_resolution
        } else {
            1.0
        };
        ((((w + h) * 2 + 1) as f64 / res).round() as usize).max(1)
    }

    fn accumulate(&self, binary: &ImageU8<'_>) -> Accumulator {
        let angle_bins = self.cos_table.len();
        let rho_bins = self.rho_bins(binary.width(), binary.height());
        let mut acc = Accumulator {
            votes: vec![0; (angle_bins + 2) * (rho_bins + 2)],
            angle_bins,
            rho_bins,
        };
        let center = ((rho_bins - 1) / 2) as i64;
        for (y, row) in binary.rows().enumerate() {
            for (x, _) in row.iter().enumerate().filter(|&(_, &v)| v != 0) {
                let (xf, yf) = (x as f64, y as f64);
                for n in 0..angle_bins {
                    let r = (xf * self.cos_table[n] + yf * self.sin_table[n]).round() as i64 + center;
                    if r < 0 || r as usize >= rho_bins {
                        continue;
                    }
                    let idx = acc.index(n, r as usize);
                    acc.votes[idx] += 1;
                }
            }
        }
        acc
    }

    /// Runs the transform and returns peaks ordered by decreasing votes.
    pub fn detect(&self, binary: ImageU8<'_>) -> Vec<Line> {
        if binary.width() == 0 || binary.height() == 0 {
            return Vec::new();
        }
        let acc = self.accumulate(&binary);
        let threshold = self.options.vote_threshold;

        let mut peaks: Vec<(u32, usize, usize)> = Vec::new();
        for n in 0..acc.angle_bins {
            for r in 0..acc.rho_bins {
                let base = acc.index(n, r);
                if acc.is_peak(base, threshold) {
                    peaks.push((acc.votes[base], n, r));
                }
            }
        }
        peaks.sort_by(|a, b| b.0.cmp(&a.0).then((a.1, a.2).cmp(&(b.1, b.2))));

        let center = ((acc.rho_bins - 1) / 2) as f64;
        let res = self.options.rho_resolution;
        let step = self.options.theta_resolution;
        let candidates = peaks
            .into_iter()
            .map(|(_, n, r)| Line::new((r as f64 - center) * res, n as f64 * step));
        self.suppress_duplicates(candidates, binary.width() as f64, binary.height() as f64)
    }

    fn suppress_duplicates(
        &self,
        candidates: impl Iterator<Item = Line>,
        width: f64,
        height: f64,
    ) -> Vec<Line> {
        let mut kept: Vec<Line> = Vec::new();
        for line in candidates {
            if !kept.iter().any(|strong| self.duplicates(strong, &line, width, height)) {
                kept.push(line);
            }
        }
        kept
    }

    /// `weak` repeats `strong` when the angles are close and the two lines
    /// cross, or come within `suppression_distance`, inside the frame.
    fn duplicates(&self, strong: &Line, weak: &Line, width: f64, height: f64) -> bool {
        let weak = align_with(strong.theta, *weak);
        if (weak.theta - strong.theta).abs() > self.options.suppression_angle {
            return false;
        }
        let Some((p, q)) = clip_to_frame(strong, width, height) else {
            return false;
        };
        let (sin, cos) = weak.theta.sin_cos();
        let dp = p.x * cos + p.y * sin - weak.rho;
        let dq = q.x * cos + q.y * sin - weak.rho;
        dp * dq <= 0.0 || dp.abs().min(dq.abs()) <= self.options.suppression_distance
    }
}

/// Re-expresses `line` with its normal angle within `π/2` of `theta`, using
/// `(rho, θ) ≡ (-rho, θ ± π)`.
fn align_with(theta: f64, line: Line) -> Line {
    let delta = line.theta - theta;
    if delta > FRAC_PI_2 {
        Line::new(-line.rho, line.theta - PI)
    } else if delta < -FRAC_PI_2 {
        Line::new(-line.rho, line.theta + PI)
    } else {
        line
    }
}

/// End points of the part of `line` inside `[0, width] × [0, height]`.
fn clip_to_frame(line: &Line, width: f64, height: f64) -> Option<(Point, Point)> {
    let (sin, cos) = line.theta.sin_cos();
    let origin = (line.rho * cos, line.rho * sin);
    let dir = (-sin, cos);
    let mut t_min = f64::NEG_INFINITY;
    let mut t_max = f64::INFINITY;
    for (start, step, extent) in [(origin.0, dir.0, width), (origin.1, dir.1, height)] {
        if step.abs() < 1e-12 {
            if start < 0.0 || start > extent {
                return None;
            }
            continue;
        }
        let (a, b) = (-start / step, (extent - start) / step);
        t_min = t_min.max(a.min(b));
        t_max = t_max.min(a.max(b));
    }
    let at = |t: f64| Point::new(origin.0 + t * dir.0, origin.1 + t * dir.1);
    (t_min <= t_max).then(|| (at(t_min), at(t_max)))
}

impl LineDetector for HoughTransform {
    fn detect_lines(&self, binary: ImageU8<'_>) -> Vec<Line> {
        self.detect(binary)
    }
}
