use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::MAX_PALETTE_SIZE;

#[derive(Error, Debug)]
pub enum PlaneFormatError {
    #[error("Malformed plane block header")]
    Header(#[from] bincode::Error),
    #[error("Plane block declares an empty palette")]
    EmptyPalette,
    #[error("Unexpected end of data while reading palette: expected {expected} bytes, got {available}")]
    TruncatedPalette { expected: usize, available: usize },
    #[error("Palette of {0} entries does not fit the 16-bit count field")]
    PaletteTooLarge(usize),
    #[error("Bitstream of {0} bytes does not fit the 32-bit length field")]
    BitstreamTooLarge(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaneHeader {
    /// Uncompressed plane size in bytes, two per sample. Informational only.
    pub plane_size: u32,
    pub bitstream_len: u32,
    pub palette_count: u16,
    pub reserved: u16,
}

impl PlaneHeader {
    pub const SIZE: usize = 12;
}

/// One compressed plane as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedPlane {
    pub plane_size: u32,
    pub palette: Vec<u16>,
    pub bitstream: Vec<u8>,
}

impl CompressedPlane {
    pub fn header(&self) -> Result<PlaneHeader, PlaneFormatError> {
        if self.palette.len() > MAX_PALETTE_SIZE {
            return Err(PlaneFormatError::PaletteTooLarge(self.palette.len()));
        }
        let bitstream_len = u32::try_from(self.bitstream.len())
            .map_err(|_| PlaneFormatError::BitstreamTooLarge(self.bitstream.len()))?;

        Ok(PlaneHeader {
            plane_size: self.plane_size,
            bitstream_len,
            palette_count: self.palette.len() as u16,
            reserved: 0,
        })
    }

    pub fn encoded_len(&self) -> usize {
        PlaneHeader::SIZE + self.palette.len() * 2 + self.bitstream.len()
    }

    pub fn write_to(&self, output: &mut Vec<u8>) -> Result<(), PlaneFormatError> {
        let header = self.header()?;
        output.reserve(self.encoded_len());
        bincode::serialize_into(&mut *output, &header)?;

        for entry in &self.palette {
            output.extend_from_slice(&entry.to_le_bytes());
        }
        output.extend_from_slice(&self.bitstream);

        debug!(
            "Plane block written: palette {} entries, bitstream {} bytes",
            header.palette_count, header.bitstream_len
        );
        Ok(())
    }

    /// Reads one block from the front of `input`, advancing it past the block.
    ///
    /// A bitstream cut short by the end of `input` is accepted as-is; the plane
    /// decoder handles the missing tail.
    pub fn read_from(input: &mut &[u8]) -> Result<Self, PlaneFormatError> {
        let header = read_header(input)?;
        let data: &[u8] = *input;

        let palette_bytes = header.palette_count as usize * 2;
        if data.len() < palette_bytes {
            error!(
                "Unexpected end of data while reading palette: expected {} bytes, got {}",
                palette_bytes,
                data.len()
            );
            return Err(PlaneFormatError::TruncatedPalette {
                expected: palette_bytes,
                available: data.len(),
            });
        }
        let (palette_data, rest) = data.split_at(palette_bytes);
        let palette: Vec<u16> = palette_data
            .chunks_exact(2)
            .map(|entry| u16::from_le_bytes([entry[0], entry[1]]))
            .collect();

        let declared = header.bitstream_len as usize;
        if rest.len() < declared {
            warn!(
                "Bitstream truncated: declared {} bytes, only {} available",
                declared,
                rest.len()
            );
        }
        let (bitstream, rest) = rest.split_at(declared.min(rest.len()));
        *input = rest;

        Ok(Self {
            plane_size: header.plane_size,
            palette,
            bitstream: bitstream.to_vec(),
        })
    }
}

/// Reads and validates a block header, advancing `input`.
pub fn read_header(input: &mut &[u8]) -> Result<PlaneHeader, PlaneFormatError> {
    let header: PlaneHeader = bincode::deserialize_from(&mut *input).map_err(|e| {
        error!("Truncated plane block header");
        PlaneFormatError::Header(e)
    })?;
    debug!("Plane block header: {:?}", header);

    if header.palette_count == 0 {
        error!("Plane block declares an empty palette");
        return Err(PlaneFormatError::EmptyPalette);
    }
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_block() -> CompressedPlane {
        CompressedPlane {
            plane_size: 8,
            palette: vec![0x1E28, 0x0000],
            bitstream: vec![0xAA, 0x55, 0x0F],
        }
    }

    #[test]
    fn test_block_layout() {
        let mut output = Vec::new();
        sample_block().write_to(&mut output).unwrap();

        assert_eq!(
            output,
            vec![
                8, 0, 0, 0, // plane size
                3, 0, 0, 0, // bitstream length
                2, 0, // palette count
                0, 0, // reserved
                0x28, 0x1E, 0x00, 0x00, // palette
                0xAA, 0x55, 0x0F, // bitstream
            ]
        );
        assert_eq!(output.len(), sample_block().encoded_len());
    }

    #[test]
    fn test_block_read_advances_input() {
        let mut output = Vec::new();
        sample_block().write_to(&mut output).unwrap();
        output.extend_from_slice(&[1, 2, 3]);

        let mut input = output.as_slice();
        let block = CompressedPlane::read_from(&mut input).unwrap();
        assert_eq!(block, sample_block());
        assert_eq!(input, &[1, 2, 3]);
    }

    #[test]
    fn test_block_truncated_header() {
        let mut input: &[u8] = &[1, 0, 0, 0, 3, 0];
        assert!(matches!(
            CompressedPlane::read_from(&mut input),
            Err(PlaneFormatError::Header(_))
        ));
    }

    #[test]
    fn test_block_empty_palette() {
        let mut input: &[u8] = &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            CompressedPlane::read_from(&mut input),
            Err(PlaneFormatError::EmptyPalette)
        ));
    }

    #[test]
    fn test_block_truncated_palette() {
        let mut output = Vec::new();
        sample_block().write_to(&mut output).unwrap();
        output.truncate(PlaneHeader::SIZE + 3);

        let mut input = output.as_slice();
        assert!(matches!(
            CompressedPlane::read_from(&mut input),
            Err(PlaneFormatError::TruncatedPalette {
                expected: 4,
                available: 3
            })
        ));
    }

    #[test]
    fn test_block_truncated_bitstream_is_tolerated() {
        let mut output = Vec::new();
        sample_block().write_to(&mut output).unwrap();
        output.pop();

        let mut input = output.as_slice();
        let block = CompressedPlane::read_from(&mut input).unwrap();
        assert_eq!(block.bitstream, vec![0xAA, 0x55]);
        assert!(input.is_empty());
    }

    #[test]
    fn test_block_palette_too_large() {
        let block = CompressedPlane {
            plane_size: 0,
            palette: vec![0; MAX_PALETTE_SIZE + 1],
            bitstream: Vec::new(),
        };
        let mut output = Vec::new();
        assert!(matches!(
            block.write_to(&mut output),
            Err(PlaneFormatError::PaletteTooLarge(65536))
        ));
        assert!(output.is_empty());
    }
}
