#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod homography;
pub mod image;
pub mod runtime;
pub mod types;

// Pipeline stages, public for callers that bring their own line detector.
pub mod angle;
pub mod config;
pub mod grid;
pub mod hough;
pub mod lines;
pub mod perspective;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector, line-list reconstruction and results.
pub use crate::detector::{reconstruct_grid, DetectorParams, GridDetector, GridGeometry};
pub use crate::types::{
    CellRect, Corners, DetectionResult, Grid, GridDetection, Line, Point, GRID_CELLS, GRID_LINES,
};

// Runtime lifecycle and the line-detector seam.
pub use crate::hough::{HoughOptions, HoughTransform, LineDetector};
pub use crate::runtime::{RuntimeState, VisionRuntime};

// High-level diagnostics returned by the detector.
pub use crate::diagnostics::{DetectionReport, PipelineTrace};
pub use crate::error::DetectionFailure;

// Convenience homography helpers that are generally useful.
pub use crate::homography::{apply_homography_points, perspective_transform};

pub mod prelude {
    pub use crate::detector::{DetectorParams, GridDetector, MergeTolerance};
    pub use crate::diagnostics::DetectionReport;
    pub use crate::hough::LineDetector;
    pub use crate::runtime::VisionRuntime;
    pub use crate::types::{DetectionResult, Grid, Line, Point};
}
