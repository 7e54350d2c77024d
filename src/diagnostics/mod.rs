//! Diagnostics data model returned alongside detection results.
//!
//! [`DetectionReport`] bundles the caller-facing [`DetectionResult`](crate::DetectionResult)
//! with a [`PipelineTrace`]: line counts per axis and stage, the reason a
//! frame produced no grid, and per-stage timings. Everything serialises to
//! camelCase JSON for the demo tooling.

pub mod pipeline;
pub mod timing;

pub use pipeline::{AxisTrace, DetectionReport, InputDescriptor, PipelineTrace};
pub use timing::{StageTiming, TimingBreakdown};
