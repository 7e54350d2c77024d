//! Image buffers and the small filter chain around line detection.
//!
//! - [`ImageU8`] / [`GrayImage`]: borrowed and owned 8-bit grayscale.
//! - [`ImageF32`]: float scratch buffer used by the blur stage.
//! - [`ImageRgba8`] / [`RgbaImage`]: borrowed and owned interleaved RGBA.
//! - [`color`], [`filters`], [`threshold`], [`warp`]: conversions, separable
//!   Gaussian blur, adaptive thresholding and perspective warping.
//! - [`io`]: file helpers used by the demo binary.

pub mod color;
pub mod f32;
pub mod filters;
pub mod gray;
pub mod io;
pub mod rgba;
pub mod threshold;
pub mod traits;
pub mod warp;

pub use self::f32::ImageF32;
pub use self::gray::{GrayImage, ImageU8};
pub use self::rgba::{ImageRgba8, RgbaImage};
pub use self::traits::{ImageView, ImageViewMut, Rows};
