use crate::city32::{State, CHUNK_SIZE};

pub const IN_SIZE_BYTES: usize = CHUNK_SIZE;
pub const OUT_SIZE_BYTES: usize = 96 / 8;
pub const DIGEST_SIZE_BYTES: usize = 32 / 8;

// Arbitrary fixed starting state, so only the chunk varies.
const START: State = State {
    h: 0x6cfd5fc3,
    g: 0x3eb025ed,
    f: 0x22db8460,
};

/// One round of the main loop: a 20-byte chunk absorbed into the (h, g, f)
/// state, without tail seeding or finalization.
pub fn mix_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    assert!(in_bytes.len() == IN_SIZE_BYTES);
    assert!(out_bytes.len() == OUT_SIZE_BYTES);

    let mut state = START;
    state.round(in_bytes);

    // Copy the mixed state to the output.
    out_bytes[0..4].copy_from_slice(&u32::to_le_bytes(state.h));
    out_bytes[4..8].copy_from_slice(&u32::to_le_bytes(state.g));
    out_bytes[8..12].copy_from_slice(&u32::to_le_bytes(state.f));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_word_depends_on_the_chunk() {
        let zero = [0u8; IN_SIZE_BYTES];
        let mut ones = [0u8; IN_SIZE_BYTES];
        ones[0] = 1;
        ones[4] = 1;
        ones[16] = 1;

        let mut a = [0u8; OUT_SIZE_BYTES];
        let mut b = [0u8; OUT_SIZE_BYTES];
        mix_input(&zero, &mut a);
        mix_input(&ones, &mut b);
        for i in 0..3 {
            assert_ne!(a[(i * 4)..(i * 4 + 4)], b[(i * 4)..(i * 4 + 4)]);
        }
    }
}
