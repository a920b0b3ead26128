use log::{debug, error, info};
use thiserror::Error;

use super::format::{split_planes, Header, PlaneKind};
use crate::compression::plane::PlaneFormatError;
use crate::compression::{compress_plane, CompressionError, EncoderOptions};
use crate::constants::BYTES_PER_PIXEL;

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Invalid pixel data length: expected {expected} bytes for {width}x{height}, got {actual}")]
    InvalidPixelDataLength {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("Failed to compress {plane}")]
    CompressionFailed {
        plane: PlaneKind,
        #[source]
        source: CompressionError,
    },
    #[error("Failed to write header")]
    HeaderWriteFailed(#[from] bincode::Error),
}

/// Encodes row-major BGRA pixels with the default options.
pub fn encode(width: u32, height: u32, bgra_data: &[u8]) -> Result<Vec<u8>, EncodingError> {
    encode_with_options(width, height, bgra_data, &EncoderOptions::default())
}

pub fn encode_with_options(
    width: u32,
    height: u32,
    bgra_data: &[u8],
    options: &EncoderOptions,
) -> Result<Vec<u8>, EncodingError> {
    info!("Starting encoding");

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|count| count.checked_mul(BYTES_PER_PIXEL));
    if expected != Some(bgra_data.len()) {
        error!(
            "Pixel data of {} bytes does not match {}x{}",
            bgra_data.len(),
            width,
            height
        );
        return Err(EncodingError::InvalidPixelDataLength {
            width,
            height,
            expected: expected.unwrap_or(usize::MAX),
            actual: bgra_data.len(),
        });
    }

    let mut encoded_data: Vec<u8> = Vec::with_capacity(Header::SIZE + bgra_data.len() / 2);

    // Step 1: Write header
    bincode::serialize_into(&mut encoded_data, &Header::new(width, height))?;
    debug!("Header written: width={} height={}", width, height);

    // Step 2: Split pixels into planes, alpha inverted
    let (high, low) = split_planes(bgra_data);

    // Step 3: Compress high plane first, then low
    for (kind, samples) in [(PlaneKind::High, &high), (PlaneKind::Low, &low)] {
        let block = compress_plane(samples, options)
            .map_err(|source| EncodingError::CompressionFailed { plane: kind, source })?;
        block
            .write_to(&mut encoded_data)
            .map_err(|source: PlaneFormatError| EncodingError::CompressionFailed {
                plane: kind,
                source: source.into(),
            })?;
        debug!("{} written: {} bytes", kind, block.encoded_len());
    }

    info!(
        "Encoding completed successfully: {} bytes for {} pixels",
        encoded_data.len(),
        bgra_data.len() / BYTES_PER_PIXEL
    );
    Ok(encoded_data)
}
