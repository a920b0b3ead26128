use std::collections::TryReserveError;

use super::format::{invert_alpha, scatter_plane, Header, PlaneKind, WcgImage};
use crate::compression::plane::{CompressedPlane, PlaneFormatError};
use crate::compression::{decompress_plane, CompressionError, SymbolError};
use crate::constants::{BYTES_PER_PIXEL, DEPTH, MAGIC_HEADER, MAX_DECODED_BYTES};
use log::{debug, error, info, warn};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid format or header")]
    InvalidHeader,
    #[error("Truncated header: expected {expected} bytes, got {available}")]
    TruncatedHeader { expected: usize, available: usize },
    #[error("Failed to parse header")]
    HeaderParsingFailed(#[from] bincode::Error),
    #[error("Image dimensions {width}x{height} are too large")]
    DimensionOverflow { width: u32, height: u32 },
    #[error("Cannot allocate {bytes} bytes for the decoded image")]
    OutOfMemory {
        bytes: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("Failed to decode {plane}")]
    PlaneDecode {
        plane: PlaneKind,
        #[source]
        source: CompressionError,
    },
    #[error("Malformed {plane}")]
    PlaneFormat {
        plane: PlaneKind,
        #[source]
        source: PlaneFormatError,
    },
}

/// Parses and checks the file header.
pub fn read_header(encoded_data: &[u8]) -> Result<Header, DecodeError> {
    if !encoded_data.starts_with(&MAGIC_HEADER) {
        error!("Invalid format or missing magic number in header");
        return Err(DecodeError::InvalidHeader);
    }
    if encoded_data.len() < Header::SIZE {
        error!("Truncated header: {} bytes", encoded_data.len());
        return Err(DecodeError::TruncatedHeader {
            expected: Header::SIZE,
            available: encoded_data.len(),
        });
    }

    let header: Header = bincode::deserialize(&encoded_data[..Header::SIZE])?;
    debug!(
        "Header read: width={} height={} depth={}",
        header.width, header.height, header.depth
    );
    if header.depth != DEPTH {
        warn!("Unexpected depth {}, decoding as {}", header.depth, DEPTH);
    }
    Ok(header)
}

/// Reads the header and both compressed plane blocks without decoding pixels.
pub fn read_blocks(encoded_data: &[u8]) -> Result<(Header, [CompressedPlane; 2]), DecodeError> {
    let header = read_header(encoded_data)?;
    let mut input = &encoded_data[Header::SIZE..];

    let mut read_block = |plane: PlaneKind| {
        CompressedPlane::read_from(&mut input).map_err(|source| {
            error!("Failed to read {}: {}", plane, source);
            DecodeError::PlaneFormat { plane, source }
        })
    };
    let high = read_block(PlaneKind::High)?;
    let low = read_block(PlaneKind::Low)?;

    if !input.is_empty() {
        debug!("Ignoring {} trailing bytes", input.len());
    }
    Ok((header, [high, low]))
}

pub fn decode(encoded_data: &[u8]) -> Result<WcgImage, DecodeError> {
    info!("Starting decoding");

    let (header, blocks) = read_blocks(encoded_data)?;
    let Some((pixel_count, byte_len)) = header
        .pixel_count()
        .and_then(|count| count.checked_mul(BYTES_PER_PIXEL).map(|len| (count, len)))
        .filter(|&(_, len)| len <= MAX_DECODED_BYTES)
    else {
        error!("Image dimensions too large: {}x{}", header.width, header.height);
        return Err(DecodeError::DimensionOverflow {
            width: header.width,
            height: header.height,
        });
    };

    let mut bgra_data = Vec::new();
    bgra_data.try_reserve_exact(byte_len).map_err(|source| {
        error!("Cannot allocate {} bytes for {}x{}", byte_len, header.width, header.height);
        DecodeError::OutOfMemory { bytes: byte_len, source }
    })?;
    bgra_data.resize(byte_len, 0);
    let mut damage: Vec<(PlaneKind, SymbolError)> = Vec::new();

    for (kind, block) in PlaneKind::ORDER.into_iter().zip(&blocks) {
        let plane = decompress_plane(block, pixel_count).map_err(|source| {
            error!("Failed to decode {}: {}", kind, source);
            DecodeError::PlaneDecode { plane: kind, source }
        })?;
        debug!("Decoded {}: {} of {} samples", kind, plane.decoded, pixel_count);
        scatter_plane(&mut bgra_data, kind, &plane.samples);
        if let Some(e) = plane.error {
            damage.push((kind, e));
        }
    }

    invert_alpha(&mut bgra_data);

    if damage.is_empty() {
        info!("Decoding completed successfully");
    } else {
        for (kind, e) in &damage {
            warn!("{} is incomplete: {}", kind, e);
        }
        info!("Decoding completed with {} damaged plane(s)", damage.len());
    }

    Ok(WcgImage::new(header.width, header.height, bgra_data))
}
