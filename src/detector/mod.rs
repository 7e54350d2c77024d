//! Grid detector turning camera frames into sudoku board geometry.
//!
//! Overview
//! - Converts the RGBA frame to gray and applies an inverted Gaussian
//!   adaptive threshold so grid strokes become foreground.
//! - Runs the runtime's Hough transform to obtain `(rho, theta)` lines.
//! - Splits lines into horizontal and vertical candidates, merges
//!   near-duplicates, and selects the ten evenly spaced boundary lines per
//!   axis.
//! - Intersects the two line sets into a 9×9 cell matrix whose outer cells
//!   give the board corners.
//! - With full analysis, maps the corners onto the whole frame, warps and
//!   binarises the image, and re-projects the cells.
//!
//! Modules
//! - [`params`] – configuration types used by the detector and the demo.
//! - `pipeline` – the frame-level [`GridDetector`].
//! - `reconstruct` – the line-list entry point [`reconstruct_grid`].
//!
//! Key Ideas
//! - Every failure collapses to `NotFound`; the reason is kept in the
//!   diagnostics trace only.
//! - The nominal spacing is estimated past the middle of the line list,
//!   away from the board border and surrounding clutter.

pub mod params;
mod pipeline;
mod reconstruct;

pub use params::{DetectorParams, MergeTolerance, ThresholdParams};
pub use pipeline::GridDetector;
pub use reconstruct::{reconstruct_grid, GridGeometry};
