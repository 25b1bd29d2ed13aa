extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use crate::format::TargetFormat;
use crate::histogram::{
    coarse_key, fine_key, parent_key, Bucket, Histogram, COARSE_BUCKETS, FINE_BUCKETS,
};
use crate::pixel::Rgb565;

/// Number of fine buckets promoted to their own palette entries.
pub const FINE_ENTRIES: usize = 128;
/// Total palette size: 64 coarse entries plus 128 promoted fine entries.
pub const PALETTE_SIZE: usize = COARSE_BUCKETS + FINE_ENTRIES;

/// The finished palette for one image: 192 packed device-format entries and
/// the fine-bucket map used for constant-time pixel queries.
///
/// Entries `[0,63]` average the corrected coarse buckets in coarse-key
/// order; entries `[64,191]` average the 128 most-populated fine buckets in
/// selection order. The palette is an explicitly owned value — built once
/// per image, then read-only, so any number of concurrent readers may query
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<u32>,
    fine_map: Vec<Option<u8>>,
}

impl Palette {
    /// Build the palette from a finished accumulation sweep.
    ///
    /// Runs the selection sort, the parent-correction pass and both
    /// averaging passes on internal copies, leaving the histogram
    /// untouched; building twice from the same state yields an identical
    /// palette. Equal bucket populations break toward the lower bucket key,
    /// so selection is deterministic.
    pub fn build(histogram: &Histogram, format: &TargetFormat) -> Self {
        // 1. Rank the fine buckets by population, most popular first.
        let ranked = ranked_fine(histogram);
        let selected = &ranked[..FINE_ENTRIES];

        // 2. Subtract every selected bucket from its coarse parent, so no
        //    pixel is averaged at both granularities. All 128 subtractions
        //    land before any averaging; several selected buckets can share
        //    one parent.
        let coarse = corrected_coarse(histogram, selected);

        // 3. Coarse averages fill entries 0..64 in coarse-key order.
        let mut entries = Vec::with_capacity(PALETTE_SIZE);
        for bucket in &coarse {
            entries.push(format.pack(bucket.mean()));
        }

        // 4. Fine averages fill entries 64..192 in selection order, from
        //    their original uncorrected sums; the map records each promoted
        //    bucket's slot.
        let mut fine_map = vec![None; FINE_BUCKETS];
        for (rank, bucket) in selected.iter().enumerate() {
            entries.push(format.pack(bucket.mean()));
            fine_map[bucket.key as usize] = Some((COARSE_BUCKETS + rank) as u8);
        }

        Self { entries, fine_map }
    }

    /// Palette index for a pixel, in `[0,191]`.
    ///
    /// A fine-map hit returns the promoted entry directly; otherwise the
    /// pixel falls back to its coarse bucket, whose key doubles as the
    /// palette index. Total over all 16-bit inputs, O(1), allocation-free.
    #[inline]
    pub fn index_of(&self, pixel: Rgb565) -> u8 {
        match self.fine_map[fine_key(pixel) as usize] {
            Some(index) => index,
            None => coarse_key(pixel) as u8,
        }
    }

    /// The packed entries, ready to load into the device's palette
    /// registers. Always [`PALETTE_SIZE`] long.
    pub fn entries(&self) -> &[u32] {
        &self.entries
    }

    /// The fine-bucket map, indexed by fine key. Assigned entries hold
    /// palette indices in `[64,191]`; exactly 128 are assigned.
    pub fn fine_map(&self) -> &[Option<u8>] {
        &self.fine_map
    }
}

/// Copy of the fine grid ordered by population descending, lower key first
/// among equals.
fn ranked_fine(histogram: &Histogram) -> Vec<Bucket> {
    let mut ranked = histogram.fine().to_vec();
    ranked.sort_unstable_by(|a, b| b.count.cmp(&a.count).then(a.key.cmp(&b.key)));
    ranked
}

/// Copy of the coarse grid with every selected fine bucket's count and sums
/// subtracted from its parent. Afterward each coarse bucket represents only
/// pixels that fell into unselected fine buckets.
fn corrected_coarse(histogram: &Histogram, selected: &[Bucket]) -> Vec<Bucket> {
    let mut coarse = histogram.coarse().to_vec();
    for bucket in selected {
        let parent = &mut coarse[parent_key(bucket.key) as usize];
        parent.count -= bucket.count;
        parent.r_sum -= bucket.r_sum;
        parent.g_sum -= bucket.g_sum;
        parent.b_sum -= bucket.b_sum;
    }
    coarse
}
