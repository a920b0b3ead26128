pub const FORMAT_NAME: &str = "WCG image";
pub const FILE_EXT: &str = "wcg";

pub const MAGIC_HEADER: [u8; 2] = *b"WG";
/// Bits per pixel stored in the header. Always 32 (BGRA).
pub const DEPTH: u16 = 32;
pub const HEADER_RESERVED_A: u16 = 0x0271;
pub const HEADER_RESERVED_B: u16 = 0x4000;

/// Bytes per pixel in the decoded buffer.
pub const BYTES_PER_PIXEL: usize = 4;
/// Largest decoded pixel buffer accepted, the engine's own array limit.
pub const MAX_DECODED_BYTES: usize = i32::MAX as usize;

/// Palettes with at least this many entries use the wide (4 bit) prefix.
pub const WIDE_PREFIX_PALETTE_SIZE: usize = 0x1000;
pub const NARROW_PREFIX_BITS: u32 = 3;
pub const WIDE_PREFIX_BITS: u32 = 4;

/// Width of the repeat count that follows a run-length escape.
pub const RUN_COUNT_BITS: u32 = 4;
pub const MIN_RUN_LENGTH: usize = 2;

/// The on-wire palette count is a u16.
pub const MAX_PALETTE_SIZE: usize = u16::MAX as usize;
