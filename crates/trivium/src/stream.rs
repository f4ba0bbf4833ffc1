//! The Trivium keystream generator: key/IV loading, warm-up, and clocking.

use crate::key::{Iv, Key};
use crate::register::Register;

/// Number of warm-up clocks run during initialization (4 x 288). The warm-up
/// outputs are discarded; they dissipate the structured loading pattern
/// before any bit is handed out as keystream.
const WARM_UP_CLOCKS: usize = 4 * 288;

/// Trivium keystream generator.
///
/// Built from an 80-bit [`Key`] and 80-bit [`Iv`]; by the time [`Trivium::new`]
/// returns, the register has already been clocked 1152 times, so the first bit
/// out of [`Trivium::next_bit`] is the first bit of the actual keystream.
///
/// A generator is a one-way cursor: it cannot be rewound or reseeded. To
/// restart a stream, construct a fresh generator from the same key and IV.
/// Production methods take `&mut self`, so a live generator cannot be shared
/// across threads without external synchronization.
#[derive(Clone)]
pub struct Trivium {
    register: Register,
}

impl Trivium {
    /// Builds a generator from `key` and `iv` and runs the warm-up phase.
    pub fn new(key: Key, iv: Iv) -> Self {
        let mut stream = Self::loaded(&key, &iv);
        for _ in 0..WARM_UP_CLOCKS {
            stream.next_bit();
        }
        stream
    }

    /// Loads key and IV into a fresh register without warming it up.
    ///
    /// Key bits fill cells 1..=80 and IV bits fill cells 94..=173, both taken
    /// most-significant bit of byte 0 first; cells 286..=288 are set to 1 and
    /// everything else stays zero.
    fn loaded(key: &Key, iv: &Iv) -> Self {
        let mut register = Register::zeroed();
        load_bits(&mut register, 1, &key.0);
        load_bits(&mut register, 94, &iv.0);
        for cell in 286..=288 {
            register.set_bit(cell, 1);
        }
        Self { register }
    }

    /// Advances the register by one clock and returns the keystream bit
    /// (0 or 1) produced by that clock.
    pub fn next_bit(&mut self) -> u8 {
        let r = &self.register;
        let t1 = r.bit(66) ^ r.bit(93);
        let t2 = r.bit(162) ^ r.bit(177);
        let t3 = r.bit(243) ^ r.bit(288);

        // The output taps are read before the feedback terms are folded in
        // and before any cell moves.
        let z = t1 ^ t2 ^ t3;

        let t1 = t1 ^ (r.bit(91) & r.bit(92)) ^ r.bit(171);
        let t2 = t2 ^ (r.bit(175) & r.bit(176)) ^ r.bit(264);
        let t3 = t3 ^ (r.bit(286) & r.bit(287)) ^ r.bit(69);

        // Shift the whole register one cell up, then splice the captured
        // feedback bits at the heads of the three sub-registers: t3 at cell 1
        // (via the shift itself), t1 at cell 94, t2 at cell 178.
        self.register.shift_in(t3);
        self.register.set_bit(94, t1);
        self.register.set_bit(178, t2);

        z as u8
    }

    /// Produces the next keystream byte: eight clocks, with the n-th bit
    /// produced landing in bit position n of the result (LSB first).
    pub fn next_byte(&mut self) -> u8 {
        let mut byte = 0u8;
        for n in 0..8 {
            byte |= self.next_bit() << n;
        }
        byte
    }

    /// XORs the next `data.len()` keystream bytes into `data` in place.
    ///
    /// Running a second generator with the same key and IV over the output
    /// restores the original bytes, so this one operation serves for both
    /// encryption and decryption.
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            *byte ^= self.next_byte();
        }
    }
}

/// Loads `bytes` into consecutive cells starting at `first_cell`, taking the
/// bits of each byte most-significant first.
///
/// Placement goes through the single cell-addressing path, so an input byte
/// that straddles two backing words keeps its bits in order.
fn load_bits(register: &mut Register, first_cell: usize, bytes: &[u8; 10]) {
    for (n, cell) in (first_cell..first_cell + 8 * bytes.len()).enumerate() {
        let bit = (bytes[n / 8] >> (7 - n % 8)) & 1;
        register.set_bit(cell, u64::from(bit));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// First 64 keystream bytes for the all-zero key and IV: the published
    /// Trivium test vector under MSB-first key/IV loading and LSB-first byte
    /// packing.
    const ZERO_KEY_ZERO_IV_KEYSTREAM: &str = "fbe0bf265859051b517a2e4e239fc97f\
                                              563203161907cf2de7a8790fa1b2e9cd\
                                              f75292030268b7382b4c1a759aa2599a\
                                              285549986e74805903801a4cb5a5d4f2";

    fn zero_stream() -> Trivium {
        Trivium::new(Key::from([0u8; 10]), Iv::from([0u8; 10]))
    }

    #[test]
    fn matches_published_zero_key_zero_iv_vector() {
        let expected = hex::decode(ZERO_KEY_ZERO_IV_KEYSTREAM).expect("valid hex");
        let mut stream = zero_stream();
        let produced: Vec<u8> = (0..expected.len()).map(|_| stream.next_byte()).collect();
        assert_eq!(produced, expected);
    }

    #[test]
    fn matches_reference_hello_ciphertext() {
        // Known-answer test carried over from the reference implementation:
        // key 00000000000010000000, zero IV, plaintext "hello".
        let key = Key::from([0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00]);
        let mut stream = Trivium::new(key, Iv::from([0u8; 10]));
        let mut data = *b"hello";
        stream.apply_keystream(&mut data);
        assert_eq!(data, hex::decode("9f804f6861").unwrap().as_slice());
    }

    #[test]
    fn same_key_and_iv_give_identical_streams() {
        let key = Key::from([0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a]);
        let iv = Iv::from([0x0a, 0x09, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
        let mut first = Trivium::new(key, iv);
        let mut second = Trivium::new(key, iv);
        for step in 0..2048 {
            assert_eq!(first.next_bit(), second.next_bit(), "diverged at bit {step}");
        }
        for step in 0..256 {
            assert_eq!(first.next_byte(), second.next_byte(), "diverged at byte {step}");
        }
    }

    #[test]
    fn byte_production_is_eight_bits_packed_lsb_first() {
        let mut by_bytes = zero_stream();
        let mut by_bits = by_bytes.clone();
        for _ in 0..128 {
            let mut packed = 0u8;
            for n in 0..8 {
                packed |= by_bits.next_bit() << n;
            }
            assert_eq!(by_bytes.next_byte(), packed);
        }
        // Both paths must leave the register in the same state.
        assert_eq!(by_bytes.next_byte(), by_bits.next_byte());
    }

    #[test]
    fn flipping_one_key_bit_changes_the_stream() {
        let iv = Iv::from([0u8; 10]);
        let mut base = Trivium::new(Key::from([0u8; 10]), iv);
        let mut flipped = Trivium::new(Key::from([0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0]), iv);
        let base_bytes: Vec<u8> = (0..16).map(|_| base.next_byte()).collect();
        let flipped_bytes: Vec<u8> = (0..16).map(|_| flipped.next_byte()).collect();
        assert_ne!(base_bytes, flipped_bytes);
        // Regression anchor for the flipped stream.
        assert_eq!(
            flipped_bytes,
            hex::decode("5d492e77f8fe62d769c6a142056be936").unwrap()
        );
    }

    #[test]
    fn warm_up_output_is_never_exposed() {
        // A register that skipped the warm-up would emit a different first
        // byte (0x07 for the all-zero key and IV); the public constructor
        // must only ever hand out post-warm-up keystream.
        let key = Key::from([0u8; 10]);
        let iv = Iv::from([0u8; 10]);
        let mut raw = Trivium::loaded(&key, &iv);
        assert_eq!(raw.next_byte(), 0x07);
        assert_eq!(zero_stream().next_byte(), 0xfb);
    }

    #[test]
    fn loading_places_only_key_iv_and_tail_ones() {
        let key = Key::from([0xffu8; 10]);
        let iv = Iv::from([0xffu8; 10]);
        let stream = Trivium::loaded(&key, &iv);
        for cell in 1..=288 {
            let expected = match cell {
                1..=80 | 94..=173 | 286..=288 => 1,
                _ => 0,
            };
            assert_eq!(stream.register.bit(cell), expected, "cell {cell}");
        }
    }

    #[test]
    fn apply_keystream_round_trips_random_messages() {
        use rand::RngCore;

        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let mut key_bytes = [0u8; 10];
            let mut iv_bytes = [0u8; 10];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut iv_bytes);
            let mut message = vec![0u8; (rng.next_u32() % 512) as usize];
            rng.fill_bytes(&mut message);

            let mut data = message.clone();
            Trivium::new(Key::from(key_bytes), Iv::from(iv_bytes)).apply_keystream(&mut data);
            Trivium::new(Key::from(key_bytes), Iv::from(iv_bytes)).apply_keystream(&mut data);
            assert_eq!(data, message);
        }
    }

    #[test]
    fn distinct_ivs_give_distinct_streams() {
        let key = Key::from([0x5au8; 10]);
        let mut with_zero_iv = Trivium::new(key, Iv::from([0u8; 10]));
        let mut with_one_iv = Trivium::new(key, Iv::from([0, 0, 0, 0, 0, 0, 0, 0, 0, 1]));
        let a: Vec<u8> = (0..16).map(|_| with_zero_iv.next_byte()).collect();
        let b: Vec<u8> = (0..16).map(|_| with_one_iv.next_byte()).collect();
        assert_ne!(a, b);
    }
}
