use crate::city32::hash32;

/// Input sizes worth charting: both ends of each length bracket, plus a
/// few main-loop sizes.
pub const BRACKET_SIZES: &[usize] = &[1, 4, 5, 12, 13, 24, 25, 44, 64];

pub const OUT_SIZE_BYTES: usize = 32 / 8;
pub const DIGEST_SIZE_BYTES: usize = 32 / 8;

/// The complete CityHash32 digest.  Unlike the other mixers this takes any
/// input size, since the length picks the code path being measured.
pub fn mix_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    assert!(out_bytes.len() == OUT_SIZE_BYTES);

    out_bytes.copy_from_slice(&u32::to_le_bytes(hash32(in_bytes)));
}
