use rgb::RGB;

use crate::error::FormatError;
use crate::pixel::Rgb565;

/// One channel's position inside a packed palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelField {
    /// Field width in bits (1..=8).
    pub bits: u32,
    /// Bit offset of the field's least significant bit.
    pub shift: u32,
}

impl ChannelField {
    pub const fn new(bits: u32, shift: u32) -> Self {
        Self { bits, shift }
    }

    const fn mask(self) -> u32 {
        (1u32 << self.bits) - 1
    }

    /// Convert a raw source channel value to this field's width and place
    /// it at the field offset. Widening shifts left, narrowing shifts
    /// right; no rounding.
    fn place(self, value: u8, source_bits: u32) -> u32 {
        let scaled = if self.bits >= source_bits {
            (value as u32) << (self.bits - source_bits)
        } else {
            (value as u32) >> (source_bits - self.bits)
        };
        (scaled & self.mask()) << self.shift
    }

    fn extract(self, entry: u32) -> u8 {
        ((entry >> self.shift) & self.mask()) as u8
    }
}

/// Destination palette register layout: where each channel's field sits in
/// a packed palette entry, and how wide one entry is.
///
/// Validated once at construction, so packing itself is total — a layout
/// whose field widths don't add up to the entry width is rejected here,
/// never discovered per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetFormat {
    r: ChannelField,
    g: ChannelField,
    b: ChannelField,
    entry_bits: u32,
}

impl TargetFormat {
    /// Build and validate a layout. The three field widths must sum to
    /// `entry_bits`, every field must lie inside the entry, and fields must
    /// not overlap.
    pub fn new(
        r: ChannelField,
        g: ChannelField,
        b: ChannelField,
        entry_bits: u32,
    ) -> Result<Self, FormatError> {
        if entry_bits > 32 {
            return Err(FormatError::EntryTooWide(entry_bits));
        }
        for (channel, field) in [("red", r), ("green", g), ("blue", b)] {
            if field.bits == 0 {
                return Err(FormatError::EmptyField { channel });
            }
            if field.bits > 8 {
                return Err(FormatError::FieldTooWide {
                    channel,
                    bits: field.bits,
                });
            }
            if field.shift + field.bits > entry_bits {
                return Err(FormatError::FieldOutOfRange {
                    channel,
                    bits: field.bits,
                    shift: field.shift,
                    entry: entry_bits,
                });
            }
        }
        let fields = r.bits + g.bits + b.bits;
        if fields != entry_bits {
            return Err(FormatError::WidthMismatch {
                fields,
                entry: entry_bits,
            });
        }
        for (first, a, second, b_) in [
            ("red", r, "green", g),
            ("red", r, "blue", b),
            ("green", g, "blue", b),
        ] {
            if (a.mask() << a.shift) & (b_.mask() << b_.shift) != 0 {
                return Err(FormatError::FieldOverlap { first, second });
            }
        }
        Ok(Self {
            r,
            g,
            b,
            entry_bits,
        })
    }

    /// The 6:6:6 layout of the classic VGA DAC: 18 significant bits, red in
    /// the top field. [`unpack`](TargetFormat::unpack) yields the three
    /// 6-bit values a driver writes to the DAC registers.
    pub const fn vga_dac() -> Self {
        Self {
            r: ChannelField::new(6, 12),
            g: ChannelField::new(6, 6),
            b: ChannelField::new(6, 0),
            entry_bits: 18,
        }
    }

    /// The 5:6:5 layout of a 16-bit entry, matching the source encoding.
    pub const fn rgb565() -> Self {
        Self {
            r: ChannelField::new(5, 11),
            g: ChannelField::new(6, 5),
            b: ChannelField::new(5, 0),
            entry_bits: 16,
        }
    }

    /// Pack averaged channel components (at their native 5/6/5-bit source
    /// widths) into one palette entry.
    pub fn pack(&self, components: RGB<u8>) -> u32 {
        self.r.place(components.r, Rgb565::R_BITS)
            | self.g.place(components.g, Rgb565::G_BITS)
            | self.b.place(components.b, Rgb565::B_BITS)
    }

    /// The per-channel register values stored in a packed entry.
    pub fn unpack(&self, entry: u32) -> RGB<u8> {
        RGB {
            r: self.r.extract(entry),
            g: self.g.extract(entry),
            b: self.b.extract(entry),
        }
    }

    /// Total width of one packed entry in bits.
    pub fn entry_bits(&self) -> u32 {
        self.entry_bits
    }
}
