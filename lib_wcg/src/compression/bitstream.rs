//! MSB-first bit packing over in-memory byte buffers.

/// Accumulates bits most-significant first and packs them into bytes.
#[derive(Debug, Default)]
pub struct BitWriter {
    output: Vec<u8>,
    /// Pending bits, right-aligned. Never holds more than 7 bits between calls.
    pending: u64,
    pending_bits: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Appends the low `bit_count` bits of `value`, highest of those bits first.
    pub fn write_bits(&mut self, value: u32, bit_count: u32) {
        debug_assert!(bit_count <= 32, "bit_count {} out of range", bit_count);
        if bit_count == 0 {
            return;
        }

        let mask = (1u64 << bit_count) - 1;
        self.pending = (self.pending << bit_count) | (value as u64 & mask);
        self.pending_bits += bit_count;

        while self.pending_bits >= 8 {
            self.pending_bits -= 8;
            self.output.push((self.pending >> self.pending_bits) as u8);
        }
        self.pending &= (1u64 << self.pending_bits) - 1;
    }

    pub fn write_bool(&mut self, bit: bool) {
        self.write_bits(bit as u32, 1);
    }

    /// Writes `count` one-bits.
    pub fn write_ones(&mut self, mut count: u32) {
        while count > 0 {
            let chunk = count.min(32);
            self.write_bits(u32::MAX, chunk);
            count -= chunk;
        }
    }

    /// Total number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.output.len() * 8 + self.pending_bits as usize
    }

    /// Zero-pads the trailing partial byte and returns the packed bytes.
    pub fn finish(mut self) -> Vec<u8> {
        if self.pending_bits > 0 {
            let padding = 8 - self.pending_bits;
            self.output.push((self.pending << padding) as u8);
        }
        self.output
    }
}

/// Reads bits most-significant first from a byte slice.
///
/// Reading past the end never fails: missing bits read as zero and the reader
/// remembers that it overran, so callers can tell real zeros from padding.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
    overrun: bool,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            overrun: false,
        }
    }

    /// Consumes the next `bit_count` bits (at most 32) as an unsigned integer.
    pub fn read_bits(&mut self, bit_count: u32) -> u32 {
        debug_assert!(bit_count <= 32, "bit_count {} out of range", bit_count);

        let mut value = 0u32;
        let mut remaining = bit_count;

        while remaining > 0 {
            let Some(&byte) = self.data.get(self.position >> 3) else {
                self.overrun = true;
                value = value.checked_shl(remaining).unwrap_or(0);
                self.position += remaining as usize;
                break;
            };

            let available = 8 - (self.position & 7) as u32;
            let take = available.min(remaining);
            let bits = (byte as u32 >> (available - take)) & ((1u32 << take) - 1);

            value = (value << take) | bits;
            self.position += take as usize;
            remaining -= take;
        }

        value
    }

    pub fn read_bool(&mut self) -> bool {
        self.read_bits(1) == 1
    }

    /// Bit offset of the next read. May exceed the data length after an overrun.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn bits_remaining(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.position)
    }

    /// True once any read has asked for bits beyond the end of the data.
    pub fn overrun(&self) -> bool {
        self.overrun
    }
}
