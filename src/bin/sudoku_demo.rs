use log::info;
use std::env;
use std::path::PathBuf;
use sudoku_grid::config::{load_config, RuntimeConfig};
use sudoku_grid::diagnostics::DetectionReport;
use sudoku_grid::error::{Error, Result};
use sudoku_grid::image::io::{load_rgba_image, save_gray_png, save_rgba_png, write_json_file};
use sudoku_grid::GridDetector;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage(program: &str) -> String {
    format!("Usage: {program} <config.json>")
}

fn run() -> Result<()> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "sudoku_demo".to_string());
    let config_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| Error::Config(usage(&program)))?;
    let config = load_config(&config_path)?;

    let frame = load_rgba_image(&config.input)?;
    let detector = GridDetector::new(config.params.clone())?;
    detector.runtime().initialize();

    let report = detector.detect_with_diagnostics(
        frame.width(),
        frame.height(),
        frame.as_raw(),
        config.full_analysis,
    );
    print_text_summary(&report);
    info!("{}", report.trace.summary());

    write_outputs(&config, &detector, &frame, &report)
}

fn print_text_summary(report: &DetectionReport) {
    println!("Detection summary");
    println!("  found: {}", report.result.is_found());
    if let Some(corners) = report.result.corners() {
        for (name, c) in ["top-left", "top-right", "bottom-right", "bottom-left"]
            .iter()
            .zip(corners.iter())
        {
            println!("  {name}: ({:.1}, {:.1})", c.x, c.y);
        }
    }
    if let Some(failure) = &report.trace.failure {
        println!("  reason: {failure}");
    }
    println!("  latency_ms: {:.3}", report.trace.timings.total_ms);
    for stage in &report.trace.timings.stages {
        println!("    {:<10} {:>8.3} ms", stage.label, stage.elapsed_ms);
    }
}

fn write_outputs(
    config: &RuntimeConfig,
    detector: &GridDetector,
    frame: &sudoku_grid::image::RgbaImage,
    report: &DetectionReport,
) -> Result<()> {
    if let Some(path) = &config.output.json_out {
        write_json_file(path, report)?;
        println!("JSON report written to {}", path.display());
    }
    if let Some(path) = &config.output.rectified_png {
        match report.result.corrected_image() {
            Some(image) => {
                save_rgba_png(image, path)?;
                println!("Rectified board written to {}", path.display());
            }
            None => println!("No rectified board to write"),
        }
    }
    if let Some(path) = &config.output.binary_png {
        save_gray_png(&detector.binarize(&frame.as_view()), path)?;
        println!("Binary image written to {}", path.display());
    }
    Ok(())
}
