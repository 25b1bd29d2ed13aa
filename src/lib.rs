#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod format;
pub mod histogram;
pub mod palette;
pub mod pixel;
pub mod remap;

pub use error::FormatError;
pub use format::{ChannelField, TargetFormat};
pub use histogram::Histogram;
pub use palette::{Palette, PALETTE_SIZE};
pub use pixel::Rgb565;

use alloc::vec::Vec;

/// Quantization result: the packed palette and the rewritten index buffer.
#[derive(Debug)]
pub struct QuantizeResult {
    palette: Palette,
    indices: Vec<u8>,
}

impl QuantizeResult {
    /// The 192-entry palette, packed for the target device.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The palette index assigned to each source pixel.
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Take ownership of both parts.
    pub fn into_parts(self) -> (Palette, Vec<u8>) {
        (self.palette, self.indices)
    }
}

/// Quantize an RGB565 image to a 192-entry palette and rewrite it as an
/// 8-bit palette-indexed buffer.
///
/// One-call pipeline over [`Histogram`], [`Palette::build`] and
/// [`remap::remap_pixels`]. Use those directly to accumulate a partitioned
/// sweep ([`Histogram::merge`]) or to remap per frame without reallocating
/// ([`remap::remap_into`]). Infallible: every 16-bit value is a valid
/// pixel, and the target format was already validated at construction.
pub fn quantize(pixels: &[u16], format: &TargetFormat) -> QuantizeResult {
    // 1. Sweep every pixel into the two bucket grids.
    let mut histogram = Histogram::new();
    for &pixel in pixels {
        histogram.observe(Rgb565::new(pixel));
    }

    // 2. Select, correct, average and pack the palette.
    let palette = Palette::build(&histogram, format);

    // 3. Rewrite the image through the finished palette.
    let indices = remap::remap_pixels(pixels, &palette);

    QuantizeResult { palette, indices }
}
