//! CityHash32: a fast, non-cryptographic 32-bit hash for hash tables,
//! checksums and sharding keys.
//!
//! ```
//! assert_eq!(cityhash32::hash32(b""), 0xdc56d17a);
//! assert_eq!(cityhash32::digest32(b"abcdef", 3), cityhash32::hash32(b"abc"));
//! ```
//!
//! Not suitable where an attacker chooses the input.
//!
//! The `stats` and `mixers` modules measure how well the digest and its
//! building blocks diffuse their input.  See the `mix_bias` binary.

pub mod city32;
pub mod error;
pub mod hasher;
pub mod mixers;
pub mod stats;

pub use city32::{digest32, hash32, try_digest32};
pub use error::DigestError;
pub use hasher::{BuildCity32Hasher, City32HashMap, City32HashSet, City32Hasher};
