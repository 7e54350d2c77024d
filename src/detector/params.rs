//! Parameter types configuring the detector stages.
//!
//! Defaults reproduce the tuning the detector ships with: a 0.3 rad angular
//! window around each axis, an 8 px merge distance for near-duplicate lines,
//! a Hough threshold of 130 votes at `π/360` resolution, and an 11 px
//! Gaussian adaptive threshold with offset 5.

use crate::error::{Error, Result};
use crate::hough::HoughOptions;
use crate::image::threshold::AdaptiveThreshold;
use crate::types::GRID_CELLS;
use serde::Deserialize;

/// Detector-wide parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Maximum deviation (radians) of a line normal from an axis normal.
    pub angle_tolerance: f64,
    /// Rho gap under which neighbouring lines are merged.
    pub merge_tolerance: MergeTolerance,
    /// Line detector accumulator layout and vote threshold.
    pub hough: HoughOptions,
    /// Adaptive threshold used for the line detector input and for the
    /// rectified output image.
    pub threshold: ThresholdParams,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            angle_tolerance: 0.3,
            merge_tolerance: MergeTolerance::default(),
            hough: HoughOptions::default(),
            threshold: ThresholdParams::default(),
        }
    }
}

impl DetectorParams {
    /// Rejects values the detector cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(self.angle_tolerance > 0.0) {
            return Err(Error::Config(format!(
                "angle_tolerance must be positive, got {}",
                self.angle_tolerance
            )));
        }
        let merge = match self.merge_tolerance {
            MergeTolerance::Pixels(v) | MergeTolerance::CellFraction(v) => v,
        };
        if !(merge >= 0.0) {
            return Err(Error::Config(format!(
                "merge_tolerance must be non-negative, got {merge}"
            )));
        }
        if self.threshold.block_size < 3 {
            return Err(Error::Config(format!(
                "threshold.block_size must be at least 3, got {}",
                self.threshold.block_size
            )));
        }
        let hough = &self.hough;
        if !(hough.rho_resolution > 0.0) || !(hough.theta_resolution > 0.0) {
            return Err(Error::Config(
                "hough resolutions must be positive".to_string(),
            ));
        }
        if !(hough.suppression_angle >= 0.0) || !(hough.suppression_distance >= 0.0) {
            return Err(Error::Config(
                "hough suppression window must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Distance below which two rho-adjacent lines count as one.
///
/// A fixed pixel distance suits a known capture resolution; a fraction of
/// the nominal cell size (`min(W, H) / 9`) keeps the behaviour stable across
/// resolutions.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeTolerance {
    Pixels(f64),
    CellFraction(f64),
}

impl Default for MergeTolerance {
    fn default() -> Self {
        MergeTolerance::Pixels(8.0)
    }
}

impl MergeTolerance {
    /// Tolerance in pixels for a `width × height` frame.
    pub fn pixels(&self, width: usize, height: usize) -> f64 {
        match *self {
            MergeTolerance::Pixels(px) => px,
            MergeTolerance::CellFraction(f) => f * width.min(height) as f64 / GRID_CELLS as f64,
        }
    }
}

/// Gaussian adaptive threshold settings.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThresholdParams {
    /// Odd neighbourhood size in pixels.
    pub block_size: usize,
    /// Offset subtracted from the local mean.
    pub c: f64,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            block_size: 11,
            c: 5.0,
        }
    }
}

impl ThresholdParams {
    pub fn to_threshold(&self) -> AdaptiveThreshold {
        AdaptiveThreshold::new(self.block_size, self.c)
    }
}
