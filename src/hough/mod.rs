//! Standard Hough transform producing `(rho, theta)` line candidates.
//!
//! - [`options`]: accumulator resolution, vote threshold and the duplicate
//!   suppression window.
//! - [`transform`]: trig tables, voting, peak extraction and suppression.
//!
//! The [`LineDetector`] trait is the seam between the grid reconstruction
//! and whatever produces lines; [`HoughTransform`] is the built-in one.

pub mod options;
pub mod transform;

pub use options::HoughOptions;
pub use transform::HoughTransform;

use crate::image::ImageU8;
use crate::types::Line;

/// Produces polar lines from a binary, edge-emphasised image.
///
/// Implementations return lines with `theta ∈ [0, π)` satisfying
/// `x·cosθ + y·sinθ = rho`, in no particular order.
pub trait LineDetector {
    fn detect_lines(&self, binary: ImageU8<'_>) -> Vec<Line>;
}

impl<T: LineDetector + ?Sized> LineDetector for &T {
    fn detect_lines(&self, binary: ImageU8<'_>) -> Vec<Line> {
        (**self).detect_lines(binary)
    }
}
