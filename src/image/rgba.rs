//! Interleaved 4-channel 8-bit images, the format camera frames arrive in.

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// Borrowed tightly packed RGBA frame.
#[derive(Clone, Copy, Debug)]
pub struct ImageRgba8<'a> {
    pub w: usize,
    pub h: usize,
    pub data: &'a [u8],
}

impl<'a> ImageRgba8<'a> {
    /// Wraps a caller buffer; `None` unless `data.len() == w * h * 4`.
    pub fn from_raw(w: usize, h: usize, data: &'a [u8]) -> Option<Self> {
        let expected = w.checked_mul(h)?.checked_mul(CHANNELS)?;
        (data.len() == expected).then_some(Self { w, h, data })
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; CHANNELS] {
        let i = (y * self.w + x) * CHANNELS;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Row `y` as raw interleaved bytes.
    #[inline]
    pub fn row_bytes(&self, y: usize) -> &'a [u8] {
        let start = y * self.w * CHANNELS;
        &self.data[start..start + self.w * CHANNELS]
    }
}

/// Owned tightly packed RGBA buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaImage {
    /// Fully transparent black image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * CHANNELS],
        }
    }

    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height * CHANNELS).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_view(&self) -> ImageRgba8<'_> {
        ImageRgba8 {
            w: self.width,
            h: self.height,
            data: &self.data,
        }
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; CHANNELS] {
        self.as_view().pixel(x, y)
    }

    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, px: [u8; CHANNELS]) {
        let i = (y * self.width + x) * CHANNELS;
        self.data[i..i + CHANNELS].copy_from_slice(&px);
    }

    /// Mutable row `y` as raw interleaved bytes.
    #[inline]
    pub fn row_bytes_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.width * CHANNELS;
        let end = start + self.width * CHANNELS;
        &mut self.data[start..end]
    }
}
