use super::TimingBreakdown;
use crate::error::DetectionFailure;
use crate::runtime::RuntimeState;
use crate::types::{Axis, DetectionResult};
use serde::Serialize;

/// Result produced by [`GridDetector::detect_with_diagnostics`](crate::GridDetector::detect_with_diagnostics).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub result: DetectionResult,
    pub trace: PipelineTrace,
}

/// What happened inside one detector run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub runtime: RuntimeState,
    /// Lines returned by the line detector before classification.
    pub raw_lines: usize,
    pub horizontal: AxisTrace,
    pub vertical: AxisTrace,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<DetectionFailure>,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub full_analysis: bool,
}

/// Line counts through classify → cluster → select for one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisTrace {
    pub classified: usize,
    pub clustered: usize,
    pub selected: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
}

impl PipelineTrace {
    pub fn new(input: InputDescriptor, runtime: RuntimeState) -> Self {
        Self {
            input,
            runtime,
            raw_lines: 0,
            horizontal: AxisTrace::default(),
            vertical: AxisTrace::default(),
            failure: None,
            timings: TimingBreakdown::default(),
        }
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut AxisTrace {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    pub fn axis(&self, axis: Axis) -> &AxisTrace {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    /// One-line summary used by the demo binary's log output.
    pub fn summary(&self) -> String {
        let counts = |axis: Axis| {
            let t = self.axis(axis);
            format!("{}→{}→{}", t.classified, t.clustered, t.selected)
        };
        format!(
            "{}x{} raw={} h={} v={} total={:.2}ms{}",
            self.input.width,
            self.input.height,
            self.raw_lines,
            counts(Axis::Horizontal),
            counts(Axis::Vertical),
            self.timings.total_ms,
            self.failure
                .as_ref()
                .map(|f| format!(" failure=\"{f}\""))
                .unwrap_or_default()
        )
    }
}
