//! CityHash32, by Geoff Pike and Jyrki Alakuijala.
//!
//! A 32-bit non-cryptographic hash.  The input is dispatched on its length
//! to one of four strategies, all built from the same few murmur3-derived
//! primitives.  Words are always read little-endian, so the digest is the
//! same on every host.

// Primes between 2^63 and 2^64, reserved for the 64-bit variant.  Nothing in
// the 32-bit path uses them.
pub const K0: u64 = 0xc3a5c85c97cb3127;
pub const K1: u64 = 0xb492b66fbe98f273;
pub const K2: u64 = 0x9ae16a3b2f90404f;

// Magic numbers for 32-bit hashing, copied from murmur3.
pub const C1: u32 = 0xcc9e2d51;
pub const C2: u32 = 0x1b873593;

const MUR_ADD: u32 = 0xe6546b64;

/// Size of one main-loop chunk, in bytes.
pub const CHUNK_SIZE: usize = 20;

/// Hashes `data` to a 32-bit digest.
pub fn hash32(data: &[u8]) -> u32 {
    let len = data.len();
    if len <= 24 {
        if len <= 12 {
            if len <= 4 {
                hash32_0_to_4(data)
            } else {
                hash32_5_to_12(data)
            }
        } else {
            hash32_13_to_24(data)
        }
    } else {
        hash32_25_plus(data)
    }
}

/// Hashes the first `length` bytes of `buffer`.
///
/// Panics if `buffer` holds fewer than `length` bytes.  The digest is the
/// same as `hash32(&buffer[..length])`.
pub fn digest32(buffer: &[u8], length: usize) -> u32 {
    assert!(
        length <= buffer.len(),
        "digest length {} exceeds buffer of {} bytes",
        length,
        buffer.len()
    );
    hash32(&buffer[..length])
}

/// Like `digest32()`, but reports an out-of-range `length` as an error.
pub fn try_digest32(buffer: &[u8], length: usize) -> Result<u32, crate::DigestError> {
    match buffer.get(..length) {
        Some(data) => Ok(hash32(data)),
        None => Err(crate::DigestError::LengthOutOfBounds {
            length: length,
            available: buffer.len(),
        }),
    }
}

//-------------------------------------------------------------
// Primitives.

/// Reads the little-endian word at byte offset `i`.
///
/// No alignment is required.  `i + 4` must not exceed `data.len()`.
#[inline(always)]
pub fn fetch32(data: &[u8], i: usize) -> u32 {
    u32::from_le_bytes(data[i..(i + 4)].try_into().unwrap())
}

/// Rotates right by `shift`, which must be less than 32.
#[inline(always)]
pub fn rotate32(val: u32, shift: u32) -> u32 {
    debug_assert!(shift < 32);
    val.rotate_right(shift)
}

/// The murmur3 32-bit finalizer.
#[inline(always)]
pub fn fmix(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

/// Folds the word `a` into the accumulator `h`.
#[inline(always)]
pub fn mur(mut a: u32, mut h: u32) -> u32 {
    a = a.wrapping_mul(C1);
    a = rotate32(a, 17);
    a = a.wrapping_mul(C2);
    h ^= a;
    h = rotate32(h, 19);
    h.wrapping_mul(5).wrapping_add(MUR_ADD)
}

/// Pre-scrambles a word before it's absorbed in the main loop.
#[inline(always)]
fn scramble(w: u32) -> u32 {
    rotate32(w.wrapping_mul(C1), 17).wrapping_mul(C2)
}

#[inline(always)]
fn rotate_mul5(h: u32, shift: u32) -> u32 {
    rotate32(h, shift).wrapping_mul(5).wrapping_add(MUR_ADD)
}

/// Cycles the state: `a` takes `c`, `b` takes `a`, `c` takes `b`.
#[inline(always)]
pub fn permute3(a: &mut u32, b: &mut u32, c: &mut u32) {
    std::mem::swap(a, b);
    std::mem::swap(a, c);
}

//-------------------------------------------------------------
// Length brackets.

fn hash32_0_to_4(data: &[u8]) -> u32 {
    let mut b: u32 = 0;
    let mut c: u32 = 9;
    for &byte in data {
        // Bytes are folded in as signed values.
        let v = byte as i8 as u32;
        b = b.wrapping_mul(C1).wrapping_add(v);
        c ^= b;
    }
    fmix(mur(b, mur(data.len() as u32, c)))
}

fn hash32_5_to_12(data: &[u8]) -> u32 {
    let len = data.len();
    let mut a = len as u32;
    let mut b = (len as u32).wrapping_mul(5);
    let mut c: u32 = 9;
    let d = b;

    a = a.wrapping_add(fetch32(data, 0));
    b = b.wrapping_add(fetch32(data, len - 4));
    c = c.wrapping_add(fetch32(data, (len >> 1) & 4));

    fmix(mur(c, mur(b, mur(a, d))))
}

fn hash32_13_to_24(data: &[u8]) -> u32 {
    let len = data.len();
    let a = fetch32(data, (len >> 1) - 4);
    let b = fetch32(data, 4);
    let c = fetch32(data, len - 8);
    let d = fetch32(data, len >> 1);
    let e = fetch32(data, 0);
    let f = fetch32(data, len - 4);
    let h = len as u32;

    fmix(mur(f, mur(e, mur(d, mur(c, mur(b, mur(a, h)))))))
}

/// Number of 20-byte chunks the main loop consumes for a `len`-byte input.
///
/// Only meaningful for `len > 24`.  The remaining tail bytes are covered by
/// the tail seeding instead.
#[inline]
pub(crate) fn main_loop_rounds(len: usize) -> usize {
    (len - 1) / CHUNK_SIZE
}

/// Main-loop state, in the order the reference names it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct State {
    pub h: u32,
    pub g: u32,
    pub f: u32,
}

impl State {
    /// Seeds the state from the length and the last 20 bytes of `data`.
    pub(crate) fn from_tail(data: &[u8]) -> State {
        let len = data.len();
        let mut h = len as u32;
        let mut g = C1.wrapping_mul(len as u32);
        let mut f = g;

        let a0 = scramble(fetch32(data, len - 4));
        let a1 = scramble(fetch32(data, len - 8));
        let a2 = scramble(fetch32(data, len - 16));
        let a3 = scramble(fetch32(data, len - 12));
        let a4 = scramble(fetch32(data, len - 20));

        h ^= a0;
        h = rotate_mul5(h, 19);
        h ^= a2;
        h = rotate_mul5(h, 19);
        g ^= a1;
        g = rotate_mul5(g, 19);
        g ^= a3;
        g = rotate_mul5(g, 19);
        f = f.wrapping_add(a4);
        f = rotate_mul5(f, 19);

        State { h: h, g: g, f: f }
    }

    /// Absorbs one 20-byte chunk.
    pub(crate) fn round(&mut self, chunk: &[u8]) {
        debug_assert!(chunk.len() >= CHUNK_SIZE);

        let a0 = scramble(fetch32(chunk, 0));
        let a1 = fetch32(chunk, 4);
        let a2 = scramble(fetch32(chunk, 8));
        let a3 = scramble(fetch32(chunk, 12));
        let a4 = fetch32(chunk, 16);

        let State { mut h, mut g, mut f } = *self;

        h ^= a0;
        h = rotate_mul5(h, 18);
        f = f.wrapping_add(a1);
        f = rotate32(f, 19);
        f = f.wrapping_mul(C1);
        g = g.wrapping_add(a2);
        g = rotate_mul5(g, 18);
        h ^= a3.wrapping_add(a1);
        h = rotate_mul5(h, 19);
        g ^= a4;
        // The byte swaps are part of the hash, not an endianness fix.
        g = g.swap_bytes().wrapping_mul(5);
        h = h.wrapping_add(a4.wrapping_mul(5));
        h = h.swap_bytes();
        f = f.wrapping_add(a0);
        permute3(&mut f, &mut h, &mut g);

        *self = State { h: h, g: g, f: f };
    }

    pub(crate) fn finish(self) -> u32 {
        let State { mut h, mut g, mut f } = self;

        g = rotate32(g, 11).wrapping_mul(C1);
        g = rotate32(g, 17).wrapping_mul(C1);
        f = rotate32(f, 11).wrapping_mul(C1);
        f = rotate32(f, 17).wrapping_mul(C1);
        h = rotate_mul5(h.wrapping_add(g), 19);
        h = rotate32(h, 17).wrapping_mul(C1);
        h = rotate_mul5(h.wrapping_add(f), 19);
        h = rotate32(h, 17).wrapping_mul(C1);

        h
    }
}

fn hash32_25_plus(data: &[u8]) -> u32 {
    let mut state = State::from_tail(data);
    for chunk in data
        .chunks_exact(CHUNK_SIZE)
        .take(main_loop_rounds(data.len()))
    {
        state.round(chunk);
    }
    state.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_by_zero_is_identity() {
        for v in [0u32, 1, 0x80000000, 0xdeadbeef, u32::MAX] {
            assert_eq!(rotate32(v, 0), v);
        }
    }

    #[test]
    fn rotate_is_right_rotation() {
        assert_eq!(rotate32(1, 1), 0x80000000);
        assert_eq!(rotate32(0x12345678, 8), 0x78123456);
        assert_eq!(rotate32(0x12345678, 31), 0x2468acf0);
    }

    #[test]
    fn fmix_fixed_points() {
        assert_eq!(fmix(0), 0);
        assert_eq!(fmix(1), 0x514e28b7);
    }

    #[test]
    fn mur_of_zero() {
        // Zero word leaves h alone until the rotate and multiply-add.
        assert_eq!(mur(0, 0), MUR_ADD);
        assert_eq!(mur(0, 1), rotate32(1, 19).wrapping_mul(5).wrapping_add(MUR_ADD));
    }

    #[test]
    fn fetch_is_little_endian_at_any_offset() {
        let data = [0x01u8, 0x02, 0x03, 0x04, 0x05, 0x06];
        assert_eq!(fetch32(&data, 0), 0x04030201);
        assert_eq!(fetch32(&data, 1), 0x05040302);
        assert_eq!(fetch32(&data, 2), 0x06050403);
    }

    #[test]
    fn fetch_matches_both_host_orders() {
        // The big-endian branch reads the raw word and swaps it. Simulate
        // both branches explicitly and check they agree with the loader.
        let data = [0xa1u8, 0xb2, 0xc3, 0xd4, 0xe5];
        for i in 0..2 {
            let bytes: [u8; 4] = data[i..(i + 4)].try_into().unwrap();
            let little_host = u32::from_le_bytes(bytes);
            let big_host = u32::from_be_bytes(bytes).swap_bytes();
            assert_eq!(fetch32(&data, i), little_host);
            assert_eq!(fetch32(&data, i), big_host);
        }
    }

    #[test]
    #[should_panic]
    fn fetch_past_end_panics() {
        fetch32(&[0u8; 4], 1);
    }

    #[test]
    fn permute3_cycles() {
        let (mut f, mut h, mut g) = (1, 2, 3);
        permute3(&mut f, &mut h, &mut g);
        assert_eq!((f, h, g), (3, 1, 2));
    }

    #[test]
    fn empty_input() {
        assert_eq!(hash32(&[]), fmix(mur(0, mur(0, 9))));
        assert_eq!(hash32(&[]), 0xdc56d17a);
    }

    #[test]
    fn bracket_formulas() {
        let data: Vec<u8> = (0..1024u32).map(|i| (i * 37 + 11) as u8).collect();

        // Byte-fold.
        for len in [1usize, 4] {
            let mut b = 0u32;
            let mut c = 9u32;
            for &byte in &data[..len] {
                b = b.wrapping_mul(C1).wrapping_add(byte as i8 as i32 as u32);
                c ^= b;
            }
            assert_eq!(hash32(&data[..len]), fmix(mur(b, mur(len as u32, c))));
        }

        // Quad-word blend.
        for len in [5usize, 12] {
            let s = &data[..len];
            let l = len as u32;
            let a = l.wrapping_add(fetch32(s, 0));
            let b = l.wrapping_mul(5).wrapping_add(fetch32(s, len - 4));
            let c = 9u32.wrapping_add(fetch32(s, (len >> 1) & 4));
            let d = l.wrapping_mul(5);
            assert_eq!(hash32(s), fmix(mur(c, mur(b, mur(a, d)))));
        }

        // Six-word blend.
        for len in [13usize, 24] {
            let s = &data[..len];
            let mut h = len as u32;
            for off in [(len >> 1) - 4, 4, len - 8, len >> 1, 0, len - 4] {
                h = mur(fetch32(s, off), h);
            }
            assert_eq!(hash32(s), fmix(h));
        }

        // Main loop.
        for len in [25usize, 44, 1000] {
            let s = &data[..len];
            let mut state = State::from_tail(s);
            for i in 0..main_loop_rounds(len) {
                state.round(&s[(i * CHUNK_SIZE)..]);
            }
            assert_eq!(hash32(s), state.finish());
        }
    }

    #[test]
    fn main_loop_round_counts() {
        assert_eq!(main_loop_rounds(25), 1);
        assert_eq!(main_loop_rounds(41), 2);
        assert_eq!(main_loop_rounds(44), 2);
        assert_eq!(main_loop_rounds(1000), 49);
        for len in 25..2000 {
            // Every round's chunk must lie inside the input.
            assert!(main_loop_rounds(len) * CHUNK_SIZE <= len);
            assert!(main_loop_rounds(len) >= 1);
        }
    }

    #[test]
    fn main_loop_reads_tail_words() {
        // For a 25-byte input the tail words sit at 21, 17, 9, 13 and 5.
        // Changing byte 24 (only covered by the word at 21) must change
        // the digest even though no chunk reaches it.
        let mut data = [7u8; 25];
        let before = hash32(&data);
        data[24] ^= 1;
        assert_ne!(before, hash32(&data));
    }

    #[test]
    fn digest32_hashes_prefix() {
        let data = b"hello, world";
        assert_eq!(digest32(data, 5), hash32(b"hello"));
        assert_eq!(digest32(data, 0), hash32(&[]));
        assert_eq!(digest32(&[], 0), 0xdc56d17a);
    }

    #[test]
    #[should_panic(expected = "exceeds buffer")]
    fn digest32_rejects_short_buffer() {
        digest32(b"abc", 4);
    }

    #[test]
    fn try_digest32_reports_short_buffer() {
        assert_eq!(try_digest32(b"abcd", 4).unwrap(), hash32(b"abcd"));
        assert_eq!(
            try_digest32(b"abc", 10),
            Err(crate::DigestError::LengthOutOfBounds {
                length: 10,
                available: 3
            })
        );
    }
}
