use serde::Deserialize;
use std::f64::consts::PI;

/// Accumulator layout and peak threshold for [`HoughTransform`](super::HoughTransform).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HoughOptions {
    /// Distance resolution of the accumulator in pixels.
    pub rho_resolution: f64,
    /// Angular resolution of the accumulator in radians.
    pub theta_resolution: f64,
    /// Minimum votes for a bin to be reported.
    pub vote_threshold: u32,
    /// Largest angle difference in radians at which a weaker peak can be a
    /// duplicate of a stronger one.
    pub suppression_angle: f64,
    /// A weaker peak whose line comes within this many pixels of a stronger
    /// line inside the frame is dropped, as is one that crosses it there.
    pub suppression_distance: f64,
}

impl Default for HoughOptions {
    fn default() -> Self {
        Self {
            rho_resolution: 1.0,
            theta_resolution: PI / 360.0,
            vote_threshold: 130,
            suppression_angle: 0.3,
            suppression_distance: 6.0,
        }
    }
}

impl HoughOptions {
    /// Number of angle bins covering `[0, π)`.
    pub fn angle_bins(&self) -> usize {
        if self.theta_resolution > 0.0 {
            ((PI / self.theta_resolution).round() as usize).max(1)
        } else {
            1
        }
    }
}
