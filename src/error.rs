use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("channel widths sum to {fields} bits but the entry is {entry} bits wide")]
    WidthMismatch { fields: u32, entry: u32 },

    #[error("entry width {0} exceeds the 32-bit packing limit")]
    EntryTooWide(u32),

    #[error("{channel} field cannot be zero bits wide")]
    EmptyField { channel: &'static str },

    #[error("{channel} field is {bits} bits wide; register fields are at most 8")]
    FieldTooWide { channel: &'static str, bits: u32 },

    #[error("{channel} field ({bits} bits at offset {shift}) lies outside the {entry}-bit entry")]
    FieldOutOfRange {
        channel: &'static str,
        bits: u32,
        shift: u32,
        entry: u32,
    },

    #[error("{first} and {second} fields overlap")]
    FieldOverlap {
        first: &'static str,
        second: &'static str,
    },
}
