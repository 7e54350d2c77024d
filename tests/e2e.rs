mod common;

use common::init_logging;
use common::synthetic_image::{blank_rgba, render_board_rgba, BoardLayout};
use std::sync::Arc;
use sudoku_grid::{
    DetectionFailure, DetectionResult, DetectorParams, GridDetector, Point, RuntimeState,
    VisionRuntime,
};

fn layout() -> BoardLayout {
    BoardLayout {
        width: 500,
        height: 500,
        origin: 25,
        spacing: 50,
        thickness: 3,
    }
}

fn square_board(spacing: usize, thickness: usize) -> BoardLayout {
    BoardLayout {
        width: 10 * spacing,
        height: 10 * spacing,
        origin: spacing / 2,
        spacing,
        thickness,
    }
}

fn ready_detector() -> GridDetector {
    let params = DetectorParams::default();
    let runtime = Arc::new(VisionRuntime::ready(params.hough));
    GridDetector::with_runtime(params, runtime).expect("default params are valid")
}

#[test]
fn rendered_board_is_found_through_hough() {
    init_logging();
    let board = layout();
    let pixels = render_board_rgba(&board);
    let detector = ready_detector();

    let report = detector.detect_with_diagnostics(board.width, board.height, &pixels, false);
    let corners = report
        .result
        .corners()
        .unwrap_or_else(|| panic!("expected a grid, trace: {}", report.trace.summary()));

    let (near, far) = (board.origin as f64, board.far_edge() as f64);
    let expected = [
        Point::new(near, near),
        Point::new(far, near),
        Point::new(far, far),
        Point::new(near, far),
    ];
    for (c, e) in corners.iter().zip(expected.iter()) {
        assert!(c.distance(e) < 5.0, "corner {c:?} too far from {e:?}");
    }
    assert_eq!(report.trace.horizontal.selected, 10);
    assert_eq!(report.trace.vertical.selected, 10);
    assert!(report.trace.raw_lines >= 20);
    assert!(report.result.cells().is_none());
}

#[test]
fn stroke_width_does_not_split_lines() {
    init_logging();
    let detector = ready_detector();
    for spacing in [50, 60] {
        for thickness in [1, 3, 5] {
            let board = square_board(spacing, thickness);
            let pixels = render_board_rgba(&board);
            let report =
                detector.detect_with_diagnostics(board.width, board.height, &pixels, false);
            let corners = report.result.corners().unwrap_or_else(|| {
                panic!(
                    "no grid for spacing {spacing}, stroke {thickness}: {}",
                    report.trace.summary()
                )
            });
            let (near, far) = (board.origin as f64, board.far_edge() as f64);
            let expected = [
                Point::new(near, near),
                Point::new(far, near),
                Point::new(far, far),
                Point::new(near, far),
            ];
            for (c, e) in corners.iter().zip(expected.iter()) {
                assert!(
                    c.distance(e) < 6.0,
                    "spacing {spacing}, stroke {thickness}: corner {c:?} vs {e:?}"
                );
            }
            assert_eq!(report.trace.vertical.selected, 10, "{}", report.trace.summary());
            assert_eq!(report.trace.horizontal.selected, 10, "{}", report.trace.summary());
        }
    }
}

#[test]
fn full_analysis_rectifies_the_board() {
    init_logging();
    let board = layout();
    let pixels = render_board_rgba(&board);
    let detector = ready_detector();

    let result = detector.detect_grid(board.width, board.height, &pixels, true);
    let detection = result.into_detection().expect("expected a grid");

    // Corners land on the frame corners after rectification.
    let frame = [
        Point::new(0.0, 0.0),
        Point::new(500.0, 0.0),
        Point::new(500.0, 500.0),
        Point::new(0.0, 500.0),
    ];
    for (c, e) in detection.corners.iter().zip(frame.iter()) {
        assert!(c.distance(e) < 1e-3, "corner {c:?} vs {e:?}");
    }

    let cells = detection.cells.expect("cells");
    let cell = 500.0 / 9.0;
    for row in 0..9 {
        for col in 0..9 {
            let c = cells.cell(row, col);
            assert!((c.width() - cell).abs() < 4.0, "cell ({row},{col}) = {c:?}");
            assert!((c.height() - cell).abs() < 4.0, "cell ({row},{col}) = {c:?}");
        }
    }

    let image = detection.corrected_image.expect("rectified image");
    assert_eq!((image.width(), image.height()), (500, 500));
    assert!(image
        .as_raw()
        .chunks_exact(4)
        .all(|px| (px[0] == 0 || px[0] == 255) && px[3] == 255));
    // Paper in the middle of a cell stays white.
    let mid = (cell * 4.5) as usize;
    assert_eq!(image.pixel(mid, mid)[0], 255);
}

#[test]
fn runtime_not_ready_reports_not_found() {
    init_logging();
    let board = layout();
    let pixels = render_board_rgba(&board);
    let detector = GridDetector::new(DetectorParams::default()).expect("valid params");

    assert!(!detector.is_ready());
    let report = detector.detect_with_diagnostics(board.width, board.height, &pixels, true);
    assert!(matches!(report.result, DetectionResult::NotFound));
    assert_eq!(report.trace.runtime, RuntimeState::Uninitialized);
    assert_eq!(report.trace.failure, Some(DetectionFailure::RuntimeNotReady));
}

#[test]
fn background_initialisation_enables_detection() {
    init_logging();
    let board = layout();
    let pixels = render_board_rgba(&board);
    let runtime = Arc::new(VisionRuntime::new(DetectorParams::default().hough));
    let detector = GridDetector::with_runtime(DetectorParams::default(), Arc::clone(&runtime))
        .expect("valid params");

    VisionRuntime::spawn_initialization(runtime)
        .join()
        .expect("initialisation thread");
    assert!(detector.is_ready());
    assert!(detector
        .detect_grid(board.width, board.height, &pixels, false)
        .is_found());
}

#[test]
fn blank_frame_has_no_grid() {
    init_logging();
    let detector = ready_detector();
    let report = detector.detect_with_diagnostics(200, 150, &blank_rgba(200, 150), true);
    assert!(!report.result.is_found());
    assert!(matches!(
        report.trace.failure,
        Some(DetectionFailure::InsufficientLines { found: 0, .. })
    ));
}

#[test]
fn mismatched_buffer_has_no_grid() {
    init_logging();
    let detector = ready_detector();
    let result = detector.detect_grid(100, 100, &blank_rgba(100, 99), false);
    assert!(!result.is_found());
}

#[test]
fn report_serialises_to_json() {
    init_logging();
    let board = layout();
    let pixels = render_board_rgba(&board);
    let report = ready_detector().detect_with_diagnostics(board.width, board.height, &pixels, true);
    let json = serde_json::to_value(&report).expect("serialise");
    assert_eq!(json["result"]["status"], "found");
    assert_eq!(json["result"]["corners"].as_array().map(|a| a.len()), Some(4));
    assert_eq!(json["trace"]["input"]["fullAnalysis"], true);
    assert!(json["trace"]["timings"]["stages"].as_array().is_some());
}
