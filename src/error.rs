//! Error types.
//!
//! [`DetectionFailure`] explains why a frame produced no grid; it never
//! escapes [`GridDetector::detect_grid`](crate::GridDetector::detect_grid),
//! which collapses it into [`DetectionResult::NotFound`](crate::DetectionResult).
//! [`Error`] covers file and configuration handling used by the demo tooling.
use crate::types::Axis;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Reason a frame yielded no grid.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DetectionFailure {
    #[error("vision runtime is not initialised yet")]
    RuntimeNotReady,
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    InvalidBuffer { expected: usize, actual: usize },
    #[error("only {found} clustered {axis} lines, need {required}")]
    InsufficientLines {
        axis: Axis,
        found: usize,
        required: usize,
    },
    #[error("no evenly spaced run of {required} {axis} lines")]
    NoConsistentSpacing { axis: Axis, required: usize },
    #[error("board corners do not define a usable perspective transform")]
    DegenerateTransform,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("image error in {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("buffer size does not match image dimensions for {}", .path.display())]
    BufferSize { path: PathBuf },
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
