//! Lattice construction from the selected boundary lines.
//!
//! - [`builder`]: polar line intersection and the 9×9 cell matrix.

pub mod builder;

pub use builder::{build_grid, intersect, THETA_NUDGE};
