//! JSON configuration for the demo binary.
//!
//! ```json
//! {
//!   "input": "board.jpg",
//!   "full_analysis": true,
//!   "output": { "json_out": "out/report.json", "rectified_png": "out/board.png" },
//!   "params": { "merge_tolerance": { "cell_fraction": 0.16 } }
//! }
//! ```
//! Every section except `input` is optional.
use crate::detector::DetectorParams;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to write the diagnostics report.
    pub json_out: Option<PathBuf>,
    /// Where to write the rectified, thresholded board.
    pub rectified_png: Option<PathBuf>,
    /// Where to write the binary image the line detector ran on.
    pub binary_png: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input: PathBuf,
    #[serde(default = "default_full_analysis")]
    pub full_analysis: bool,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub params: DetectorParams,
}

fn default_full_analysis() -> bool {
    true
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: RuntimeConfig = serde_json::from_str(&contents).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    config.params.validate()?;
    Ok(config)
}
