//! File helpers for frames and JSON reports.
//!
//! - `load_rgba_image`: read a PNG/JPEG into an owned RGBA buffer.
//! - `save_rgba_png` / `save_gray_png`: write buffers back to disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{GrayImage, ImageView, RgbaImage};
use crate::error::{Error, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert it to 8-bit RGBA.
pub fn load_rgba_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)
        .map_err(|source| Error::Image {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgba8();
    let (w, h) = (img.width() as usize, img.height() as usize);
    RgbaImage::from_raw(w, h, img.into_raw()).ok_or_else(|| Error::BufferSize {
        path: path.to_path_buf(),
    })
}

pub fn save_rgba_png(buffer: &RgbaImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let image = image::RgbaImage::from_raw(
        buffer.width() as u32,
        buffer.height() as u32,
        buffer.as_raw().to_vec(),
    )
    .ok_or_else(|| Error::BufferSize {
        path: path.to_path_buf(),
    })?;
    image.save(path).map_err(|source| Error::Image {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_gray_png(buffer: &GrayImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let image = image::GrayImage::from_raw(
        buffer.width() as u32,
        buffer.height() as u32,
        buffer.as_raw().to_vec(),
    )
    .ok_or_else(|| Error::BufferSize {
        path: path.to_path_buf(),
    })?;
    image.save(path).map_err(|source| Error::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
