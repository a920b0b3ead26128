use std::collections::HashMap;

/// Distinct 16-bit plane values in first-seen order.
///
/// Indices are dense: the n-th distinct value encountered gets index n.
#[derive(Debug, Default, Clone)]
pub struct Palette {
    entries: Vec<u16>,
    lookup: HashMap<u16, u32>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of `value`, assigning the next free index on first sight.
    pub fn index_of(&mut self, value: u16) -> u32 {
        if let Some(&index) = self.lookup.get(&value) {
            return index;
        }

        let index = self.entries.len() as u32;
        self.entries.push(value);
        self.lookup.insert(value, index);
        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[u16] {
        &self.entries
    }

    /// Consumes the palette, appending zero entries until it holds more than
    /// `min_len` values.
    pub fn into_padded_entries(mut self, min_len: usize) -> Vec<u16> {
        if self.entries.len() <= min_len {
            self.entries.resize(min_len + 1, 0);
        }
        self.entries
    }

    pub fn into_entries(self) -> Vec<u16> {
        self.entries
    }
}

/// Number of distinct values in `samples`.
pub fn count_distinct(samples: &[u16]) -> usize {
    let mut seen = vec![false; 1 << 16];
    let mut count = 0;
    for &sample in samples {
        let slot = &mut seen[sample as usize];
        if !*slot {
            *slot = true;
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_first_seen_order() {
        let mut palette = Palette::new();
        let indices: Vec<u32> = [500, 7, 500, 9, 7, 0]
            .iter()
            .map(|&value| palette.index_of(value))
            .collect();

        assert_eq!(indices, vec![0, 1, 0, 2, 1, 3]);
        assert_eq!(palette.entries(), &[500, 7, 9, 0]);
        assert_eq!(palette.len(), 4);
    }

    #[test]
    fn test_palette_empty() {
        let palette = Palette::new();
        assert!(palette.is_empty());
        assert!(palette.into_entries().is_empty());
    }

    #[test]
    fn test_palette_padding() {
        let mut palette = Palette::new();
        palette.index_of(0x1234);
        palette.index_of(0x5678);

        let padded = palette.into_padded_entries(0x1000);
        assert_eq!(padded.len(), 0x1001);
        assert_eq!(&padded[..2], &[0x1234, 0x5678]);
        assert!(padded[2..].iter().all(|&entry| entry == 0));
    }

    #[test]
    fn test_palette_padding_keeps_large_palettes() {
        let mut palette = Palette::new();
        for value in 0..5000u16 {
            palette.index_of(value);
        }
        let padded = palette.into_padded_entries(0x1000);
        assert_eq!(padded.len(), 5000);
    }

    #[test]
    fn test_palette_deterministic() {
        let samples: Vec<u16> = (0..2000u32).map(|i| ((i * 7919) % 613) as u16).collect();

        let build = || {
            let mut palette = Palette::new();
            let indices: Vec<u32> = samples.iter().map(|&s| palette.index_of(s)).collect();
            (palette.into_entries(), indices)
        };

        assert_eq!(build(), build());
    }

    #[test]
    fn test_count_distinct() {
        assert_eq!(count_distinct(&[]), 0);
        assert_eq!(count_distinct(&[3, 3, 3]), 1);
        assert_eq!(count_distinct(&[0, 65535, 0, 1]), 3);
    }
}
