// Copyright (C) 2020-2026 Andy Kurnia.

use super::alphabet;

// Unique factorization makes these injective over letter multisets.
pub type Product = u128;
// Leave tables only ever see a rack's worth of tiles.
pub type LeaveKey = u64;

pub const EMPTY: Product = 1;

// None if the product does not fit.
#[inline(always)]
pub fn product_of(alphabet: &alphabet::Alphabet, tiles: &[u8]) -> Option<Product> {
    tiles.iter().try_fold(EMPTY, |acc, &tile| {
        acc.checked_mul(alphabet.prime(tile) as Product)
    })
}

// tally[t] copies of tile t. Blanks (t = 0) count with the blank prime.
#[inline(always)]
pub fn leave_key_of(alphabet: &alphabet::Alphabet, tally: &[u8]) -> Option<LeaveKey> {
    let mut key: LeaveKey = 1;
    for (tile, &count) in (0u8..).zip(tally) {
        for _ in 0..count {
            key = key.checked_mul(alphabet.prime(tile) as LeaveKey)?;
        }
    }
    Some(key)
}

#[inline(always)]
pub fn times(product: Product, alphabet: &alphabet::Alphabet, tile: u8) -> Product {
    product * alphabet.prime(tile) as Product
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anagrams_share_products() {
        let alphabet = alphabet::make_english_alphabet();
        // AH and HA
        assert_eq!(product_of(&alphabet, &[1, 8]), product_of(&alphabet, &[8, 1]));
        assert_eq!(product_of(&alphabet, &[1, 8]), Some(3 * 23));
        assert_ne!(product_of(&alphabet, &[1, 1]), product_of(&alphabet, &[2]));
        assert_eq!(product_of(&alphabet, &[]), Some(EMPTY));
    }

    #[test]
    fn fifteen_zs_fit_but_many_more_do_not() {
        let alphabet = alphabet::make_english_alphabet();
        assert!(product_of(&alphabet, &[26; 15]).is_some());
        assert!(product_of(&alphabet, &[26; 25]).is_none());
    }

    #[test]
    fn leave_keys_reject_overflow() {
        let alphabet = alphabet::make_english_alphabet();
        let mut tally = vec![0u8; alphabet.len() as usize];
        tally[0] = 1;
        tally[17] = 1;
        assert_eq!(leave_key_of(&alphabet, &tally), Some(2 * 61));
        tally[26] = 12;
        assert_eq!(leave_key_of(&alphabet, &tally), None);
    }
}
