// Copyright (C) 2020-2026 Andy Kurnia.

// Fast insecure non-cryptographic hash, tuned for prime-product keys.
// Products of small primes share low factors, so fold the halves and
// multiply to spread them before the table masks the low bits.

#[derive(Default)]
pub struct ProductHasher(u64);

impl std::hash::Hasher for ProductHasher {
    #[inline(always)]
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0.rotate_left(5) ^ (b as u64)).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        }
    }

    #[inline(always)]
    fn write_u64(&mut self, x: u64) {
        self.0 = (self.0 ^ x).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        self.0 ^= self.0 >> 29;
    }

    #[inline(always)]
    fn write_u128(&mut self, x: u128) {
        self.write_u64((x as u64) ^ ((x >> 64) as u64).rotate_left(23));
    }
}

pub type ProductHasherDefault = std::hash::BuildHasherDefault<ProductHasher>;
pub type MyHashMap<K, V> = std::collections::HashMap<K, V, ProductHasherDefault>;
pub type MyHashSet<T> = std::collections::HashSet<T, ProductHasherDefault>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::{BuildHasher, Hasher};

    #[test]
    fn nearby_products_spread() {
        let build = ProductHasherDefault::default();
        let a = build.hash_one(3u128 * 23);
        let b = build.hash_one(3u128 * 29);
        assert_ne!(a & 0xff, b & 0xff);
        let mut h = ProductHasher::default();
        h.write(b"AH");
        assert_ne!(h.finish(), 0);
    }
}
