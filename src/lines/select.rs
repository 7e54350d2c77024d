//! Selection of the evenly spaced run of grid lines.
//!
//! The nominal cell spacing is taken from the gap between the two lines just
//! past the middle of the clustered list, where stray detections (board
//! border, text, table edges) are least likely. A synthetic line one spacing
//! beyond the last detection lets the final gap be scored like any other,
//! which also recovers a grid whose last boundary line was missed.
use crate::types::{Line, GRID_LINES};
use std::ops::Range;

/// Why no run of grid lines could be selected on an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionFailure {
    /// Fewer clustered lines than the grid needs.
    TooFewLines(usize),
    /// No contiguous run of the required length has uniform spacing.
    NoConsistentRun,
}

/// Nominal spacing estimated around the middle of a rho-sorted list.
///
/// Returns `None` when the list is too short to have two lines past the
/// centre index.
pub fn nominal_spacing(lines: &[Line]) -> Option<f64> {
    let center = lines.len().div_ceil(2);
    let (a, b) = (lines.get(center)?, lines.get(center + 1)?);
    Some(b.rho.abs() - a.rho.abs())
}

/// Finds the first window `[begin, end)` of `required` lines whose
/// consecutive rho gaps all lie within `spacing / 4` of `spacing`.
fn find_uniform_run(lines: &[Line], spacing: f64, required: usize) -> Option<Range<usize>> {
    let tolerance = spacing / 4.0;
    let mut window = 0..0;
    for (i, pair) in lines.windows(2).enumerate() {
        let gap = pair[1].rho.abs() - pair[0].rho.abs();
        if (gap - spacing).abs() < tolerance {
            window.end = i + 2;
        } else {
            window = i + 1..i + 2;
        }
        if window.len() >= required {
            return Some(window);
        }
    }
    None
}

/// Selects the run of [`GRID_LINES`] evenly spaced lines from a clustered,
/// rho-sorted list.
///
/// The returned run may end on the synthetic trailing line when the last
/// physical boundary was not detected.
pub fn select_grid_lines(clustered: &[Line]) -> Result<Vec<Line>, SelectionFailure> {
    if clustered.len() < GRID_LINES {
        return Err(SelectionFailure::TooFewLines(clustered.len()));
    }
    let spacing = nominal_spacing(clustered).ok_or(SelectionFailure::NoConsistentRun)?;
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(SelectionFailure::NoConsistentRun);
    }

    let mut extended = Vec::with_capacity(clustered.len() + 1);
    extended.extend_from_slice(clustered);
    if let Some(last) = clustered.last() {
        extended.push(Line::new(last.rho + spacing, last.theta));
    }

    let run = find_uniform_run(&extended, spacing, GRID_LINES)
        .ok_or(SelectionFailure::NoConsistentRun)?;
    Ok(extended[run].to_vec())
}
