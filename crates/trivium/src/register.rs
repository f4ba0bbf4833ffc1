//! The 288-bit Trivium shift register and its cell addressing.

/// Number of register cells, numbered 1 through 288 per the cipher
/// specification.
pub(crate) const STATE_BITS: usize = 288;

const WORD_BITS: usize = 64;
const WORDS: usize = 5;

/// The register occupies 5 * 64 = 320 bits of storage; the 32 physical bits
/// past cell 288 are kept at zero by masking every shift.
const TAIL_MASK: u64 = u64::MAX << (WORDS * WORD_BITS - STATE_BITS);

/// Resolves a 1-based cell index to its backing word and the shift (from the
/// word's least-significant end) at which the cell lives. Cell 1 is the
/// most-significant bit of word 0.
///
/// Shared by the read and write paths so the index arithmetic exists in
/// exactly one place.
///
/// # Panics
///
/// Panics if `index` is outside `1..=288`. An out-of-range index can only
/// come from a wrong tap constant, so it is treated as a fatal defect rather
/// than a recoverable error.
#[inline]
fn locate(index: usize) -> (usize, u32) {
    assert!(
        (1..=STATE_BITS).contains(&index),
        "register cell index out of range: {index}"
    );
    let offset = index - 1;
    (offset / WORD_BITS, (WORD_BITS - 1 - offset % WORD_BITS) as u32)
}

/// The Trivium register: 288 logical cells s1..s288 packed into five 64-bit
/// words, most-significant bit first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Register {
    words: [u64; WORDS],
}

impl Register {
    /// Returns a register with every cell cleared.
    pub(crate) fn zeroed() -> Self {
        Self { words: [0; WORDS] }
    }

    /// Returns the value (0 or 1) of cell `index`.
    #[inline]
    pub(crate) fn bit(&self, index: usize) -> u64 {
        let (word, shift) = locate(index);
        (self.words[word] >> shift) & 1
    }

    /// Overwrites cell `index` with the lowest bit of `bit`.
    #[inline]
    pub(crate) fn set_bit(&mut self, index: usize, bit: u64) {
        let (word, shift) = locate(index);
        self.words[word] = (self.words[word] & !(1u64 << shift)) | ((bit & 1) << shift);
    }

    /// Moves every cell up by one position (cell i becomes cell i + 1),
    /// dropping cell 288 and inserting the lowest bit of `bit` at cell 1.
    ///
    /// The tail mask keeps the 32 unused bits of the last word at zero so the
    /// dropped cell never lingers in storage.
    #[inline]
    pub(crate) fn shift_in(&mut self, bit: u64) {
        let w = &mut self.words;
        w[4] = ((w[4] >> 1) | (w[3] << (WORD_BITS - 1))) & TAIL_MASK;
        w[3] = (w[3] >> 1) | (w[2] << (WORD_BITS - 1));
        w[2] = (w[2] >> 1) | (w[1] << (WORD_BITS - 1));
        w[1] = (w[1] >> 1) | (w[0] << (WORD_BITS - 1));
        w[0] = (w[0] >> 1) | ((bit & 1) << (WORD_BITS - 1));
    }

    /// Low 32 bits of the last word, exposed for the tail invariant tests.
    #[cfg(test)]
    pub(crate) fn tail_bits(&self) -> u64 {
        self.words[4] & !TAIL_MASK
    }
}
