const WORD_BITS: usize = 64;

/// Flat bit buffer, one bit per cell, packed into `u64` words.
///
/// Bit `i` lives in word `i / 64` at position `i % 64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBitStore {
    len: usize,
    words: Vec<u64>,
}

impl PackedBitStore {
    /// Create a store of `len` bits, all zero.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            words: vec![0u64; len.div_ceil(WORD_BITS)],
        }
    }

    /// Number of bits in the store.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read bit `index`.
    #[track_caller]
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.bounds_check(index);
        self.words[index / WORD_BITS] >> (index % WORD_BITS) & 1 != 0
    }

    /// Write bit `index` and return the value it held before.
    #[track_caller]
    #[inline]
    pub fn set(&mut self, index: usize, bit: bool) -> bool {
        self.bounds_check(index);
        let word = &mut self.words[index / WORD_BITS];
        let mask = 1u64 << (index % WORD_BITS);
        let prev = *word & mask != 0;
        if bit {
            *word |= mask;
        } else {
            *word &= !mask;
        }
        prev
    }

    /// Number of set bits.
    ///
    /// Bits past `len` in the last word are never set, so whole words can be counted.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[track_caller]
    #[inline]
    fn bounds_check(&self, index: usize) {
        assert!(
            index < self.len,
            "bit index {index} out of range for store of {} bits",
            self.len
        );
    }
}
