//! Detector pipeline driving grid detection end-to-end.
//!
//! [`GridDetector`] takes an RGBA camera frame and returns either the board
//! (`Found`) or nothing (`NotFound`). Internally it binarises the frame,
//! runs the runtime's line detector, rebuilds the grid from the lines and,
//! for full analysis, rectifies the board.
//!
//! Typical usage:
//! ```no_run
//! use sudoku_grid::{DetectorParams, GridDetector};
//!
//! # fn example(width: usize, height: usize, rgba: &[u8]) -> sudoku_grid::error::Result<()> {
//! let detector = GridDetector::new(DetectorParams::default())?;
//! detector.runtime().initialize();
//! let report = detector.detect_with_diagnostics(width, height, rgba, true);
//! if let Some(corners) = report.result.corners() {
//!     println!("top-left corner: {:?}", corners[0]);
//! }
//! # Ok(())
//! # }
//! ```
use super::params::DetectorParams;
use super::reconstruct::reconstruct_traced;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{DetectionReport, InputDescriptor, PipelineTrace};
use crate::error::{self, DetectionFailure};
use crate::hough::LineDetector;
use crate::image::color::rgba_to_gray;
use crate::image::rgba::CHANNELS;
use crate::image::{GrayImage, ImageRgba8};
use crate::perspective::rectify_board;
use crate::runtime::VisionRuntime;
use crate::types::{DetectionResult, GridDetection};
use log::{debug, warn};
use std::sync::Arc;
use std::time::Instant;

/// Sudoku grid detector.
///
/// Stateless between calls; the shared [`VisionRuntime`] is read-only once
/// ready, so one detector can serve frames from several threads.
#[derive(Debug)]
pub struct GridDetector {
    params: DetectorParams,
    runtime: Arc<VisionRuntime>,
}

impl GridDetector {
    /// Detector with its own, not yet initialised, runtime.
    ///
    /// Fails with [`Error::Config`](crate::error::Error::Config) when
    /// `params` do not pass [`DetectorParams::validate`].
    pub fn new(params: DetectorParams) -> error::Result<Self> {
        let runtime = Arc::new(VisionRuntime::new(params.hough));
        Self::with_runtime(params, runtime)
    }

    /// Detector sharing an existing runtime.
    pub fn with_runtime(
        params: DetectorParams,
        runtime: Arc<VisionRuntime>,
    ) -> error::Result<Self> {
        params.validate()?;
        Ok(Self { params, runtime })
    }

    pub fn runtime(&self) -> &Arc<VisionRuntime> {
        &self.runtime
    }

    pub fn is_ready(&self) -> bool {
        self.runtime.is_ready()
    }

    /// Detects the board in an RGBA frame (`pixels.len() == width * height * 4`).
    ///
    /// With `full_analysis == false` only the corners are returned; otherwise
    /// the cells and the rectified image are filled in too. Any failure,
    /// including an uninitialised runtime, yields `NotFound`.
    pub fn detect_grid(
        &self,
        width: usize,
        height: usize,
        pixels: &[u8],
        full_analysis: bool,
    ) -> DetectionResult {
        self.detect_with_diagnostics(width, height, pixels, full_analysis)
            .result
    }

    /// Same as [`detect_grid`](Self::detect_grid), plus a trace of the run.
    pub fn detect_with_diagnostics(
        &self,
        width: usize,
        height: usize,
        pixels: &[u8],
        full_analysis: bool,
    ) -> DetectionReport {
        match self.runtime.line_detector() {
            Some(detector) => self.detect_grid_with(detector, width, height, pixels, full_analysis),
            None => {
                debug!("GridDetector::detect runtime not ready");
                let mut trace = self.start_trace(width, height, full_analysis);
                trace.failure = Some(DetectionFailure::RuntimeNotReady);
                DetectionReport {
                    result: DetectionResult::NotFound,
                    trace,
                }
            }
        }
    }

    /// Runs the pipeline with a caller-supplied line detector instead of the
    /// runtime's Hough transform.
    pub fn detect_grid_with<D: LineDetector + ?Sized>(
        &self,
        detector: &D,
        width: usize,
        height: usize,
        pixels: &[u8],
        full_analysis: bool,
    ) -> DetectionReport {
        debug!(
            "GridDetector::detect start w={} h={} full_analysis={}",
            width, height, full_analysis
        );
        let total_start = Instant::now();
        let mut trace = self.start_trace(width, height, full_analysis);
        let result = match self.run(detector, pixels, &mut trace) {
            Ok(detection) => DetectionResult::Found(detection),
            Err(failure) => {
                debug!("GridDetector::detect no grid: {failure}");
                trace.failure = Some(failure);
                DetectionResult::NotFound
            }
        };
        trace.timings.total_ms = elapsed_ms(total_start);
        DetectionReport { result, trace }
    }

    fn start_trace(&self, width: usize, height: usize, full_analysis: bool) -> PipelineTrace {
        let input = InputDescriptor {
            width,
            height,
            full_analysis,
        };
        PipelineTrace::new(input, self.runtime.state())
    }

    fn run<D: LineDetector + ?Sized>(
        &self,
        detector: &D,
        pixels: &[u8],
        trace: &mut PipelineTrace,
    ) -> Result<GridDetection, DetectionFailure> {
        let (width, height) = (trace.input.width, trace.input.height);
        let frame = ImageRgba8::from_raw(width, height, pixels).ok_or_else(|| {
            let expected = width.saturating_mul(height).saturating_mul(CHANNELS);
            warn!(
                "GridDetector::detect pixel buffer has {} bytes, expected {} for {}x{} RGBA",
                pixels.len(),
                expected,
                width,
                height
            );
            DetectionFailure::InvalidBuffer {
                expected,
                actual: pixels.len(),
            }
        })?;

        let binary = trace
            .timings
            .measure("preprocess", || self.binarize(&frame));
        let lines = trace
            .timings
            .measure("hough", || detector.detect_lines(binary.as_view()));
        trace.raw_lines = lines.len();
        debug!("GridDetector::detect {} raw lines", lines.len());

        let geometry = reconstruct_traced(&lines, &self.params, trace)?;
        if !trace.input.full_analysis {
            return Ok(GridDetection {
                corners: geometry.corners,
                cells: None,
                corrected_image: None,
            });
        }

        let start = Instant::now();
        let rectified = rectify_board(
            &frame,
            &geometry.cells,
            &geometry.corners,
            &self.params.threshold,
        );
        trace.timings.push("rectify", elapsed_ms(start));
        let rectified = rectified.map_err(|e| {
            debug!("GridDetector::detect rectification failed: {e}");
            DetectionFailure::DegenerateTransform
        })?;
        Ok(GridDetection {
            corners: rectified.corners,
            cells: Some(rectified.cells),
            corrected_image: Some(rectified.image),
        })
    }

    /// Binary image handed to the line detector: gray, then an inverted
    /// adaptive threshold so grid strokes are foreground.
    pub fn binarize(&self, frame: &ImageRgba8<'_>) -> GrayImage {
        let gray = rgba_to_gray(frame);
        self.params.threshold.to_threshold().inverted().apply(&gray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageU8;
    use crate::types::Line;
    use std::f64::consts::FRAC_PI_2;

    /// Line detector returning a fixed board regardless of the image.
    struct FixedLines(Vec<Line>);

    impl LineDetector for FixedLines {
        fn detect_lines(&self, _binary: ImageU8<'_>) -> Vec<Line> {
            self.0.clone()
        }
    }

    fn board(step: f64) -> FixedLines {
        let mut lines: Vec<Line> = (0..10).map(|i| Line::new(step * i as f64, FRAC_PI_2)).collect();
        lines.extend((0..10).map(|i| Line::new(step * i as f64, 0.0)));
        FixedLines(lines)
    }

    /// `[50, 450]²` board on a 500 × 500 frame, rotated by `angle` about the
    /// frame centre.
    fn tilted_board(angle: f64) -> FixedLines {
        let (s, c) = angle.sin_cos();
        let offsets: Vec<f64> = (0..10).map(|i| -200.0 + 400.0 / 9.0 * i as f64).collect();
        let mut lines: Vec<Line> = offsets
            .iter()
            .map(|d| Line::new(250.0 * (c - s) + d, FRAC_PI_2 + angle))
            .collect();
        lines.extend(offsets.iter().map(|d| Line::new(250.0 * (c + s) + d, angle)));
        FixedLines(lines)
    }

    fn frame(w: usize, h: usize) -> Vec<u8> {
        vec![255u8; w * h * CHANNELS]
    }

    #[test]
    fn uninitialised_runtime_reports_not_found() {
        let detector = GridDetector::new(DetectorParams::default()).unwrap();
        let report = detector.detect_with_diagnostics(4, 4, &frame(4, 4), false);
        assert!(!report.result.is_found());
        assert_eq!(report.trace.failure, Some(DetectionFailure::RuntimeNotReady));
        assert!(!detector.is_ready());
    }

    #[test]
    fn short_buffer_is_rejected() {
        let detector = GridDetector::new(DetectorParams::default()).unwrap();
        let report = detector.detect_grid_with(&board(50.0), 10, 10, &[0u8; 12], false);
        assert!(!report.result.is_found());
        assert_eq!(
            report.trace.failure,
            Some(DetectionFailure::InvalidBuffer {
                expected: 400,
                actual: 12
            })
        );
    }

    #[test]
    fn corners_only_without_full_analysis() {
        let detector = GridDetector::new(DetectorParams::default()).unwrap();
        let pixels = frame(450, 450);
        let report = detector.detect_grid_with(&board(50.0), 450, 450, &pixels, false);
        let detection = report.result.detection().expect("found");
        assert!(detection.cells.is_none());
        assert!(detection.corrected_image.is_none());
        assert!(detection.corners[2].distance(&crate::types::Point::new(450.0, 450.0)) < 0.1);
        assert!(report.trace.timings.stage("rectify").is_none());
    }

    #[test]
    fn full_analysis_fills_cells_and_image() {
        let detector = GridDetector::new(DetectorParams::default()).unwrap();
        let pixels = frame(180, 180);
        let report = detector.detect_grid_with(&board(18.0), 180, 180, &pixels, true);
        let detection = report.result.detection().expect("found");
        let cells = detection.cells.as_ref().expect("cells");
        assert!((cells.cell(0, 0).width() - 20.0).abs() < 0.05);
        let image = detection.corrected_image.as_ref().expect("image");
        assert_eq!((image.width(), image.height()), (180, 180));
        let labels: Vec<_> = report.trace.timings.stages.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            ["preprocess", "hough", "classify", "cluster", "select", "build", "rectify"]
        );
        assert_eq!(report.trace.raw_lines, 20);
    }

    #[test]
    fn tilted_board_rectifies_to_even_cells() {
        let detector = GridDetector::new(DetectorParams::default()).unwrap();
        let pixels = frame(500, 500);
        let report = detector.detect_grid_with(&tilted_board(0.08), 500, 500, &pixels, true);
        let detection = report
            .result
            .detection()
            .unwrap_or_else(|| panic!("no grid: {}", report.trace.summary()));
        let cells = detection.cells.as_ref().expect("cells");

        let centre = cells.cell(4, 4);
        let side = 500.0 / 9.0;
        assert!((centre.width() - side).abs() < 0.25, "{centre:?}");
        assert!((centre.height() - side).abs() < 0.25, "{centre:?}");
        assert!((centre.left - 4.0 * side).abs() < 0.5, "{centre:?}");
        assert!((centre.top - 4.0 * side).abs() < 0.5, "{centre:?}");

        let [tl, tr, br, bl] = detection.corners;
        assert!(tl.distance(&crate::types::Point::new(0.0, 0.0)) < 0.5, "{tl:?}");
        assert!(br.distance(&crate::types::Point::new(500.0, 500.0)) < 0.5, "{br:?}");
        assert!(tl.x < tr.x && bl.x < br.x);
        assert!(tl.y < bl.y && tr.y < br.y);
    }

    #[test]
    fn invalid_params_are_rejected_at_construction() {
        let mut params = DetectorParams::default();
        params.threshold.block_size = 0;
        assert!(matches!(
            GridDetector::new(params.clone()),
            Err(crate::error::Error::Config(_))
        ));

        params = DetectorParams::default();
        params.hough.theta_resolution = 0.0;
        let runtime = Arc::new(VisionRuntime::new(params.hough));
        assert!(GridDetector::with_runtime(params, runtime).is_err());
    }
}
