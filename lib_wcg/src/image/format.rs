use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{BYTES_PER_PIXEL, DEPTH, HEADER_RESERVED_A, HEADER_RESERVED_B, MAGIC_HEADER};

/// Fixed 16 byte file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub magic: [u8; 2],
    pub reserved_a: u16,
    pub depth: u16,
    pub reserved_b: u16,
    pub width: u32,
    pub height: u32,
}

impl Header {
    pub const SIZE: usize = 16;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            magic: MAGIC_HEADER,
            reserved_a: HEADER_RESERVED_A,
            depth: DEPTH,
            reserved_b: HEADER_RESERVED_B,
            width,
            height,
        }
    }

    /// Pixels per plane, or `None` if it does not fit in memory.
    pub fn pixel_count(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }
}

/// Which half of each BGRA pixel a compressed block carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneKind {
    /// Bytes 2 and 3 (R, A). Always stored first.
    High,
    /// Bytes 0 and 1 (B, G).
    Low,
}

impl PlaneKind {
    pub const ORDER: [PlaneKind; 2] = [PlaneKind::High, PlaneKind::Low];

    /// Offset of the plane's first byte within a pixel.
    pub fn byte_offset(self) -> usize {
        match self {
            PlaneKind::High => 2,
            PlaneKind::Low => 0,
        }
    }
}

impl fmt::Display for PlaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaneKind::High => write!(f, "high (RA) plane"),
            PlaneKind::Low => write!(f, "low (BG) plane"),
        }
    }
}

/// A decoded image: row-major BGRA, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WcgImage {
    pub width: u32,
    pub height: u32,
    pub bgra_data: Vec<u8>,
}

impl WcgImage {
    pub fn new(width: u32, height: u32, bgra_data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            bgra_data,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let px = self.bgra_data.get(offset..offset + BYTES_PER_PIXEL)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Splits BGRA pixels into the high and low 16-bit planes.
///
/// The alpha byte is complemented on the way into the high plane, as the
/// format stores inverted alpha. `bgra` itself is left untouched.
pub fn split_planes(bgra: &[u8]) -> (Vec<u16>, Vec<u16>) {
    bgra.chunks_exact(BYTES_PER_PIXEL)
        .map(|px| {
            (
                u16::from_le_bytes([px[2], px[3] ^ 0xFF]),
                u16::from_le_bytes([px[0], px[1]]),
            )
        })
        .unzip()
}

/// Writes a plane's samples into their byte slots of `bgra`.
pub fn scatter_plane(bgra: &mut [u8], kind: PlaneKind, samples: &[u16]) {
    let offset = kind.byte_offset();
    for (px, sample) in bgra.chunks_exact_mut(BYTES_PER_PIXEL).zip(samples) {
        px[offset..offset + 2].copy_from_slice(&sample.to_le_bytes());
    }
}

/// Restores stored alpha to straight alpha, once per pixel.
pub fn invert_alpha(bgra: &mut [u8]) {
    for px in bgra.chunks_exact_mut(BYTES_PER_PIXEL) {
        px[3] ^= 0xFF;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let bytes = bincode::serialize(&Header::new(640, 480)).unwrap();
        assert_eq!(
            bytes,
            vec![
                b'W', b'G', 0x71, 0x02, // magic, reserved
                32, 0, 0x00, 0x40, // depth, reserved
                0x80, 0x02, 0, 0, // width
                0xE0, 0x01, 0, 0, // height
            ]
        );
        assert_eq!(bytes.len(), Header::SIZE);
    }

    #[test]
    fn test_split_planes() {
        let bgra = [10, 20, 30, 40, 1, 2, 3, 255];
        let (high, low) = split_planes(&bgra);
        assert_eq!(high, vec![u16::from_le_bytes([30, 215]), 3]);
        assert_eq!(low, vec![u16::from_le_bytes([10, 20]), u16::from_le_bytes([1, 2])]);
        assert_eq!(bgra, [10, 20, 30, 40, 1, 2, 3, 255]);
    }

    #[test]
    fn test_scatter_and_invert_restore_pixels() {
        let bgra = vec![10, 20, 30, 40, 1, 2, 3, 255, 0, 0, 0, 0];
        let (high, low) = split_planes(&bgra);

        let mut restored = vec![0; bgra.len()];
        scatter_plane(&mut restored, PlaneKind::High, &high);
        scatter_plane(&mut restored, PlaneKind::Low, &low);
        invert_alpha(&mut restored);
        assert_eq!(restored, bgra);
    }

    #[test]
    fn test_pixel_lookup() {
        let image = WcgImage::new(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(image.pixel(1, 0), Some([5, 6, 7, 8]));
        assert_eq!(image.pixel(2, 0), None);
        assert_eq!(image.pixel(0, 1), None);
    }
}
