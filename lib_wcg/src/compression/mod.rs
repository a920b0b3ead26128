pub mod bitstream;
pub mod index_code;
pub mod palette;
pub mod plane;

use std::collections::TryReserveError;

use bitstream::{BitReader, BitWriter};
use index_code::{read_index, write_index, IndexCodeError};
use log::{debug, warn};
use palette::{count_distinct, Palette};
use plane::{CompressedPlane, PlaneFormatError};
use thiserror::Error;

use crate::constants::{MAX_PALETTE_SIZE, MIN_RUN_LENGTH, RUN_COUNT_BITS, WIDE_PREFIX_BITS, WIDE_PREFIX_PALETTE_SIZE};

#[derive(Error, Debug)]
pub enum CompressionError {
    #[error("Palette overflow: {0} distinct values do not fit the 16-bit palette count")]
    PaletteOverflow(usize),
    #[error("Plane of {0} samples is too large for a block")]
    PlaneTooLarge(usize),
    #[error("Cannot allocate a plane of {samples} samples")]
    AllocationFailed {
        samples: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("Plane block framing failed")]
    Framing(#[from] PlaneFormatError),
}

/// Reasons a plane's symbol stream stops early. Never fatal for an image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    #[error("run-length escape followed by another escape at bit {position}")]
    DoubleEscape { position: usize },
    #[error("malformed index code at bit {position}")]
    MalformedCode {
        position: usize,
        #[source]
        source: IndexCodeError,
    },
    #[error("palette index {index} out of range for palette of {palette_size} entries")]
    IndexOutOfRange { index: u32, palette_size: usize },
    #[error("bitstream exhausted inside the symbol at bit {position}")]
    Exhausted { position: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    /// Pad every palette past 4096 entries like the engine's own tooling,
    /// which forces the 4 bit prefix. When off, the exact palette is written
    /// and the prefix width follows from its size.
    pub pad_palette: bool,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self { pad_palette: true }
    }
}

/// Result of decoding one plane. `samples` always has the requested length;
/// positions after `decoded` are zero when `error` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompressedPlane {
    pub samples: Vec<u16>,
    pub decoded: usize,
    pub error: Option<SymbolError>,
}

pub fn compress_plane(samples: &[u16], options: &EncoderOptions) -> Result<CompressedPlane, CompressionError> {
    let plane_size = plane_size(samples.len())?;

    let prefix_width = if options.pad_palette {
        WIDE_PREFIX_BITS
    } else {
        let distinct = count_distinct(samples);
        if distinct > MAX_PALETTE_SIZE {
            return Err(CompressionError::PaletteOverflow(distinct));
        }
        index_code::prefix_width(distinct)
    };
    debug!("Compressing plane of {} samples, prefix width {}", samples.len(), prefix_width);

    let mut palette = Palette::new();
    let mut writer = BitWriter::with_capacity(samples.len() / 2);
    for &sample in samples {
        let index = palette.index_of(sample);
        write_index(&mut writer, index, prefix_width);
    }

    if palette.len() > MAX_PALETTE_SIZE {
        return Err(CompressionError::PaletteOverflow(palette.len()));
    }
    debug!(
        "Plane palette: {} distinct values, {} code bits",
        palette.len(),
        writer.bit_len()
    );

    let palette = if options.pad_palette {
        palette.into_padded_entries(WIDE_PREFIX_PALETTE_SIZE)
    } else if palette.is_empty() {
        // An empty count is unreadable; one dummy entry keeps the block valid.
        vec![0]
    } else {
        palette.into_entries()
    };

    Ok(CompressedPlane {
        plane_size,
        palette,
        bitstream: writer.finish(),
    })
}

/// Byte size of a plane as stored in its block header.
fn plane_size(sample_count: usize) -> Result<u32, CompressionError> {
    sample_count
        .checked_mul(2)
        .and_then(|bytes| u32::try_from(bytes).ok())
        .ok_or(CompressionError::PlaneTooLarge(sample_count))
}

/// Decodes `sample_count` samples, keeping whatever precedes a damaged symbol.
/// Fails only when the sample buffer cannot be allocated.
pub fn decompress_plane(block: &CompressedPlane, sample_count: usize) -> Result<DecompressedPlane, CompressionError> {
    let prefix_width = index_code::prefix_width(block.palette.len());
    debug!(
        "Decompressing plane: {} samples, palette {} entries, prefix width {}",
        sample_count,
        block.palette.len(),
        prefix_width
    );

    let mut samples = Vec::new();
    samples
        .try_reserve_exact(sample_count)
        .map_err(|source| CompressionError::AllocationFailed {
            samples: sample_count,
            source,
        })?;
    let mut reader = BitReader::new(&block.bitstream);
    let error = decode_symbols(&mut reader, &block.palette, prefix_width, sample_count, &mut samples).err();

    let decoded = samples.len();
    if let Some(ref e) = error {
        warn!(
            "Plane decoding stopped after {} of {} samples: {}",
            decoded, sample_count, e
        );
    }
    samples.resize(sample_count, 0);

    Ok(DecompressedPlane {
        samples,
        decoded,
        error,
    })
}

fn decode_symbols(
    reader: &mut BitReader,
    palette: &[u16],
    prefix_width: u32,
    sample_count: usize,
    output: &mut Vec<u16>,
) -> Result<(), SymbolError> {
    while output.len() < sample_count {
        let position = reader.position();
        let symbol = read_symbol(reader, prefix_width);
        if reader.overrun() {
            return Err(SymbolError::Exhausted { position });
        }
        let (repeat, index) = symbol?;

        let value = *palette
            .get(index as usize)
            .ok_or(SymbolError::IndexOutOfRange {
                index,
                palette_size: palette.len(),
            })?;

        let run = repeat.min(sample_count - output.len());
        output.extend(std::iter::repeat(value).take(run));
    }
    Ok(())
}

/// Reads one `(repeat, palette index)` symbol, including any run-length escape.
fn read_symbol(reader: &mut BitReader, prefix_width: u32) -> Result<(usize, u32), SymbolError> {
    let position = reader.position();
    let mut repeat = 1;
    let mut prefix = reader.read_bits(prefix_width);

    if prefix == 0 {
        repeat = reader.read_bits(RUN_COUNT_BITS) as usize + MIN_RUN_LENGTH;
        prefix = reader.read_bits(prefix_width);
        if prefix == 0 {
            return Err(SymbolError::DoubleEscape { position });
        }
    }

    let index = read_index(reader, prefix, prefix_width)
        .map_err(|source| SymbolError::MalformedCode { position, source })?;
    Ok((repeat, index))
}
