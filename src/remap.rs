extern crate alloc;
use alloc::vec::Vec;

use crate::palette::Palette;
use crate::pixel::Rgb565;

/// Rewrite an RGB565 pixel stream as 8-bit palette indices.
pub fn remap_pixels(pixels: &[u16], palette: &Palette) -> Vec<u8> {
    pixels
        .iter()
        .map(|&p| palette.index_of(Rgb565::new(p)))
        .collect()
}

/// Rewrite into a caller-owned buffer of the same length.
///
/// The allocation-free form for display refresh loops that rewrite every
/// frame through an already-built palette.
pub fn remap_into(pixels: &[u16], palette: &Palette, indices: &mut [u8]) {
    assert_eq!(pixels.len(), indices.len());
    for (dst, &p) in indices.iter_mut().zip(pixels) {
        *dst = palette.index_of(Rgb565::new(p));
    }
}
