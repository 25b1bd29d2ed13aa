use octoquant::histogram::{coarse_key, fine_key, parent_key};
use octoquant::{Histogram, Palette, Rgb565, TargetFormat, PALETTE_SIZE};

// ===================== Key derivation =====================

#[test]
fn parent_of_fine_equals_coarse_for_every_pixel() {
    // The two key-derivation paths must agree over the whole 16-bit input
    // space: truncating a pixel's fine key is the same as deriving its
    // coarse key directly.
    for raw in 0..=u16::MAX {
        let pixel = Rgb565::new(raw);
        assert_eq!(
            parent_key(fine_key(pixel)),
            coarse_key(pixel),
            "pixel {raw:#06x}"
        );
    }
}

// ===================== Lookup totality =====================

#[test]
fn lookup_is_total_and_in_range() {
    let palette = build_noise_palette(4096);
    for raw in 0..=u16::MAX {
        let pixel = Rgb565::new(raw);
        let index = palette.index_of(pixel);
        assert!((index as usize) < PALETTE_SIZE);
        match palette.fine_map()[fine_key(pixel) as usize] {
            Some(assigned) => assert_eq!(index, assigned),
            None => assert_eq!(index, coarse_key(pixel) as u8),
        }
    }
}

// ===================== Determinism =====================

#[test]
fn build_is_idempotent() {
    let mut hist = Histogram::new();
    for &p in &noise_pixels(2000) {
        hist.observe(Rgb565::new(p));
    }
    let format = TargetFormat::vga_dac();
    let first = Palette::build(&hist, &format);
    let second = Palette::build(&hist, &format);
    assert_eq!(first, second);
}

#[test]
fn observation_order_is_irrelevant() {
    let pixels = noise_pixels(3000);
    let mut reversed = pixels.clone();
    reversed.reverse();
    let mut interleaved: Vec<u16> = pixels.iter().step_by(2).copied().collect();
    interleaved.extend(pixels.iter().skip(1).step_by(2));

    let format = TargetFormat::vga_dac();
    let reference = build_palette(&pixels, &format);
    assert_eq!(build_palette(&reversed, &format), reference);
    assert_eq!(build_palette(&interleaved, &format), reference);
}

#[test]
fn merged_partitions_match_single_sweep() {
    let pixels = noise_pixels(5000);
    let format = TargetFormat::vga_dac();
    let reference = build_palette(&pixels, &format);

    let mut merged = Histogram::new();
    for chunk in pixels.chunks(1701) {
        let mut part = Histogram::new();
        for &p in chunk {
            part.observe(Rgb565::new(p));
        }
        merged.merge(&part);
    }
    assert_eq!(merged.total_pixels(), pixels.len() as u64);
    assert_eq!(Palette::build(&merged, &format), reference);
}

// ===================== Helper functions =====================

/// Deterministic pseudo-random pixels via Knuth's multiplicative hash.
fn noise_pixels(count: usize) -> Vec<u16> {
    (0..count)
        .map(|i| ((i as u32).wrapping_mul(2654435761) >> 13) as u16)
        .collect()
}

fn build_palette(pixels: &[u16], format: &TargetFormat) -> Palette {
    let mut hist = Histogram::new();
    for &p in pixels {
        hist.observe(Rgb565::new(p));
    }
    Palette::build(&hist, format)
}

fn build_noise_palette(count: usize) -> Palette {
    build_palette(&noise_pixels(count), &TargetFormat::vga_dac())
}
