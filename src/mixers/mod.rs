//! Pieces of CityHash32 wrapped as fixed-size block mixers, so their
//! diffusion can be measured with `stats::compute_stats()`.
//!
//! Every module exposes the same shape: `IN_SIZE_BYTES`, `OUT_SIZE_BYTES`,
//! `DIGEST_SIZE_BYTES` and a `mix_input(in_bytes, out_bytes)` function.

pub mod city32;
pub mod city32_round;
pub mod fmix;
pub mod mur;
