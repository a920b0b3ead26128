#![allow(dead_code)]

/// Deterministic xorshift generator so fixtures are identical on every run.
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    pub fn next_u8(&mut self) -> u8 {
        (self.next_u32() >> 24) as u8
    }
}

/// BGRA noise with every byte random.
pub fn random_bgra(width: u32, height: u32, seed: u32) -> Vec<u8> {
    let mut rng = SimpleRng::new(seed);
    (0..width as usize * height as usize * 4)
        .map(|_| rng.next_u8())
        .collect()
}

/// Opaque horizontal/vertical gradient, few distinct values per plane.
pub fn gradient_bgra(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let gx = (x * 255 / width.max(1)) as u8;
            let gy = (y * 255 / height.max(1)) as u8;
            data.extend_from_slice(&[gx, gy, gx ^ gy, 255]);
        }
    }
    data
}

/// Sprite-like image: a few colors, transparent background.
pub fn sprite_bgra(width: u32, height: u32) -> Vec<u8> {
    const COLORS: [[u8; 4]; 4] = [
        [0, 0, 0, 0],
        [32, 64, 200, 255],
        [250, 250, 250, 255],
        [10, 120, 40, 128],
    ];
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let color = COLORS[((x / 3 + y / 2) % 4) as usize];
            data.extend_from_slice(&color);
        }
    }
    data
}

/// Offset of the first plane block inside an encoded file.
pub const FIRST_BLOCK_OFFSET: usize = 16;
pub const BLOCK_HEADER_SIZE: usize = 12;

pub fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

pub fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// (palette offset, palette count, bitstream offset, bitstream length) of the block at `offset`.
pub fn block_layout(data: &[u8], offset: usize) -> (usize, usize, usize, usize) {
    let bitstream_len = read_u32(data, offset + 4) as usize;
    let palette_count = read_u16(data, offset + 8) as usize;
    let palette_offset = offset + BLOCK_HEADER_SIZE;
    let bitstream_offset = palette_offset + palette_count * 2;
    (palette_offset, palette_count, bitstream_offset, bitstream_len)
}
