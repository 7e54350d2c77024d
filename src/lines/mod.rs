//! Line-list stages that turn raw Hough detections into the ten boundary
//! lines of each axis.
//!
//! - [`classify`]: fold negative rho and split lines into horizontal and
//!   vertical candidates, each sorted by rho.
//! - [`cluster`]: merge near-duplicate detections of the same physical line.
//! - [`select`]: find the contiguous, evenly spaced run of grid lines.

pub mod classify;
pub mod cluster;
pub mod select;

pub use classify::{classify_lines, sort_by_rho, ClassifiedLines};
pub use cluster::{cluster_lines, group_runs};
pub use select::{nominal_spacing, select_grid_lines, SelectionFailure};
