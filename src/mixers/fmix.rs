use crate::city32;

pub const IN_SIZE_BYTES: usize = 32 / 8;
pub const OUT_SIZE_BYTES: usize = 32 / 8;
pub const DIGEST_SIZE_BYTES: usize = 32 / 8;

/// The murmur3 finalizer that ends every short-input bracket.
pub fn mix_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    assert!(in_bytes.len() == IN_SIZE_BYTES);
    assert!(out_bytes.len() == OUT_SIZE_BYTES);

    let h = city32::fetch32(in_bytes, 0);
    out_bytes.copy_from_slice(&u32::to_le_bytes(city32::fmix(h)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixes_one_word() {
        let mut out = [0u8; OUT_SIZE_BYTES];
        mix_input(&1u32.to_le_bytes(), &mut out);
        assert_eq!(u32::from_le_bytes(out), 0x514e28b7);
    }
}
