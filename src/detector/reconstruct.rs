//! Line-list entry point: raw `(rho, theta)` detections to a 9×9 cell grid.
//!
//! Stages run in order and stop at the first axis that cannot produce ten
//! evenly spaced boundary lines:
//! 1. classify into horizontal / vertical candidates (rho-sorted),
//! 2. cluster near-duplicates per axis,
//! 3. select the uniform run of ten lines per axis,
//! 4. intersect the two runs into cells.
use super::params::DetectorParams;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{InputDescriptor, PipelineTrace};
use crate::error::DetectionFailure;
use crate::grid::build_grid;
use crate::lines::{
    classify_lines, cluster_lines, nominal_spacing, select_grid_lines, SelectionFailure,
};
use crate::runtime::RuntimeState;
use crate::types::{Axis, Corners, Grid, Line, GRID_LINES};
use log::debug;
use serde::Serialize;
use std::time::Instant;

/// Grid recovered from a line list, before any perspective correction.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridGeometry {
    /// Horizontal boundaries, top to bottom.
    pub horizontal: [Line; GRID_LINES],
    /// Vertical boundaries, left to right.
    pub vertical: [Line; GRID_LINES],
    pub cells: Grid,
    pub corners: Corners,
}

/// Reconstructs the grid from lines produced by any line detector.
///
/// `width` and `height` describe the frame the lines were detected in; they
/// only matter when the merge tolerance is relative to the cell size.
pub fn reconstruct_grid(
    lines: &[Line],
    width: usize,
    height: usize,
    params: &DetectorParams,
) -> Result<GridGeometry, DetectionFailure> {
    let input = InputDescriptor {
        width,
        height,
        full_analysis: false,
    };
    let mut trace = PipelineTrace::new(input, RuntimeState::Ready);
    reconstruct_traced(lines, params, &mut trace)
}

/// [`reconstruct_grid`] recording stage counts and timings into `trace`.
pub(crate) fn reconstruct_traced(
    lines: &[Line],
    params: &DetectorParams,
    trace: &mut PipelineTrace,
) -> Result<GridGeometry, DetectionFailure> {
    let classified = trace
        .timings
        .measure("classify", || classify_lines(lines, params.angle_tolerance));
    for axis in [Axis::Horizontal, Axis::Vertical] {
        trace.axis_mut(axis).classified = classified.axis(axis).len();
    }

    let tolerance = params
        .merge_tolerance
        .pixels(trace.input.width, trace.input.height);
    let (horizontal, vertical) = trace.timings.measure("cluster", || {
        (
            cluster_lines(classified.axis(Axis::Horizontal), tolerance),
            cluster_lines(classified.axis(Axis::Vertical), tolerance),
        )
    });
    trace.horizontal.clustered = horizontal.len();
    trace.vertical.clustered = vertical.len();
    debug!(
        "clustered {} horizontal / {} vertical lines (merge tolerance {:.2} px)",
        horizontal.len(),
        vertical.len(),
        tolerance
    );

    let start = Instant::now();
    let selected = select_axis(Axis::Horizontal, &horizontal, trace)
        .and_then(|h| select_axis(Axis::Vertical, &vertical, trace).map(|v| (h, v)));
    trace.timings.push("select", elapsed_ms(start));
    let (horizontal, vertical) = selected?;

    let cells = trace
        .timings
        .measure("build", || build_grid(&horizontal, &vertical));
    let corners = cells.corners();
    Ok(GridGeometry {
        horizontal,
        vertical,
        cells,
        corners,
    })
}

fn select_axis(
    axis: Axis,
    clustered: &[Line],
    trace: &mut PipelineTrace,
) -> Result<[Line; GRID_LINES], DetectionFailure> {
    let stage = trace.axis_mut(axis);
    stage.spacing = nominal_spacing(clustered);
    let run = select_grid_lines(clustered).map_err(|e| {
        let failure = match e {
            SelectionFailure::TooFewLines(found) => DetectionFailure::InsufficientLines {
                axis,
                found,
                required: GRID_LINES,
            },
            SelectionFailure::NoConsistentRun => DetectionFailure::NoConsistentSpacing {
                axis,
                required: GRID_LINES,
            },
        };
        debug!("{failure}");
        failure
    })?;
    stage.selected = run.len();
    <[Line; GRID_LINES]>::try_from(run).map_err(|run| {
        debug!("{axis} run has {} lines, need {GRID_LINES}", run.len());
        DetectionFailure::NoConsistentSpacing {
            axis,
            required: GRID_LINES,
        }
    })
}
