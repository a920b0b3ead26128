//! Prefix-coded palette indices.
//!
//! Each index is written as a fixed-width length prefix followed by the index
//! bits without their leading one. Lengths that do not fit in the prefix are
//! extended with a unary run of one-bits closed by a zero-bit. A prefix of 0 is
//! never produced here; it is reserved for the run-length escape read by the
//! plane decoder.

use thiserror::Error;

use super::bitstream::{BitReader, BitWriter};
use crate::constants::{NARROW_PREFIX_BITS, WIDE_PREFIX_BITS, WIDE_PREFIX_PALETTE_SIZE};

/// Longest index payload (bits after the implicit leading one) a u32 index can carry.
const MAX_PAYLOAD_BITS: u32 = 31;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexCodeError {
    #[error("prefix 0 is reserved for run-length escapes")]
    ReservedPrefix,
    #[error("code length {0} exceeds 32 bits")]
    CodeTooLong(u32),
    #[error("prefix {prefix} does not fit a {prefix_width} bit field")]
    PrefixOutOfRange { prefix: u32, prefix_width: u32 },
}

/// Prefix width a decoder uses for a palette of `palette_size` entries.
pub fn prefix_width(palette_size: usize) -> u32 {
    if palette_size < WIDE_PREFIX_PALETTE_SIZE {
        NARROW_PREFIX_BITS
    } else {
        WIDE_PREFIX_BITS
    }
}

/// Largest payload length the prefix field expresses without a unary escape.
/// `prefix_width` is one of the two widths `prefix_width()` returns.
pub(crate) fn loop_threshold(prefix_width: u32) -> u32 {
    (1 << prefix_width) - 2
}

/// Number of bits in the minimal binary form of `index`, with 0 taking one bit.
pub fn code_length(index: u32) -> u32 {
    if index < 2 {
        1
    } else {
        u32::BITS - index.leading_zeros()
    }
}

pub(crate) fn write_index(writer: &mut BitWriter, index: u32, prefix_width: u32) {
    let threshold = loop_threshold(prefix_width);
    let length = code_length(index);

    writer.write_bits(length.min(threshold + 1), prefix_width);

    if length == 1 {
        writer.write_bits(index, 1);
        return;
    }

    let payload_bits = length - 1;
    if payload_bits >= threshold {
        writer.write_ones(payload_bits - threshold);
        writer.write_bool(false);
    }
    writer.write_bits(index & !(1 << payload_bits), payload_bits);
}

/// Decodes the rest of an index whose `prefix` has already been consumed.
pub(crate) fn read_index(reader: &mut BitReader, prefix: u32, prefix_width: u32) -> Result<u32, IndexCodeError> {
    let threshold = loop_threshold(prefix_width);
    if prefix > threshold + 1 {
        return Err(IndexCodeError::PrefixOutOfRange { prefix, prefix_width });
    }

    match prefix {
        0 => Err(IndexCodeError::ReservedPrefix),
        1 => Ok(reader.read_bits(1)),
        _ => {
            let mut payload_bits = prefix - 1;
            if payload_bits >= threshold {
                while reader.read_bool() {
                    payload_bits += 1;
                    if payload_bits > MAX_PAYLOAD_BITS {
                        return Err(IndexCodeError::CodeTooLong(payload_bits + 1));
                    }
                }
            }
            Ok((1 << payload_bits) | reader.read_bits(payload_bits))
        }
    }
}
