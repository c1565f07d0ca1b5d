//! `std::hash` integration, for using CityHash32 as a `HashMap` hasher.
//!
//! CityHash32 isn't incremental, so the hasher buffers everything written to
//! it and hashes the whole buffer in `finish()`.  That makes it a poor fit
//! for large keys, but for the short keys hash tables usually see it's fine.
//!
//! Integers are written little-endian (and `usize` as a `u64`), so a key
//! hashes the same on every host.
//!
//! NOT DoS-resistant: only use it for trusted keys.

use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasherDefault, Hasher};

use crate::city32::hash32;

#[derive(Debug, Clone, Default)]
pub struct City32Hasher {
    buf: Vec<u8>,
}

impl City32Hasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// The 32-bit digest of everything written so far.
    pub fn finish32(&self) -> u32 {
        hash32(&self.buf)
    }
}

impl Hasher for City32Hasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.buf.push(i);
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.write(&i.to_le_bytes());
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.write(&i.to_le_bytes());
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.write(&i.to_le_bytes());
    }

    #[inline]
    fn write_u128(&mut self, i: u128) {
        self.write(&i.to_le_bytes());
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.write_u64(i as u64);
    }

    /// The digest repeated in both halves.  Hash tables take their control
    /// bits from the top of the hash, so those must not be left zero.
    #[inline]
    fn finish(&self) -> u64 {
        let h = self.finish32() as u64;
        (h << 32) | h
    }
}

pub type BuildCity32Hasher = BuildHasherDefault<City32Hasher>;
pub type City32HashMap<K, V> = HashMap<K, V, BuildCity32Hasher>;
pub type City32HashSet<T> = HashSet<T, BuildCity32Hasher>;
