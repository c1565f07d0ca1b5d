use crate::city32;

pub const IN_SIZE_BYTES: usize = 64 / 8;
pub const OUT_SIZE_BYTES: usize = 32 / 8;
pub const DIGEST_SIZE_BYTES: usize = 32 / 8;

/// The murmur3-style combiner, without a finalizer.
///
/// Input is the word followed by the accumulator.  This shows how little
/// one `mur()` call diffuses on its own, which is why every bracket ends in
/// `fmix()`.
pub fn mix_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    assert!(in_bytes.len() == IN_SIZE_BYTES);
    assert!(out_bytes.len() == OUT_SIZE_BYTES);

    let a = city32::fetch32(in_bytes, 0);
    let h = city32::fetch32(in_bytes, 4);
    out_bytes.copy_from_slice(&u32::to_le_bytes(city32::mur(a, h)));
}
