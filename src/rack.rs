// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, product};
use product::Product;

// A multiset of rack tiles, as a tally indexed by tile (0 = blank).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rack {
    tally: Box<[u8]>,
    len: u8,
}

impl Rack {
    pub fn new(alphabet: &alphabet::Alphabet) -> Self {
        Self {
            tally: vec![0u8; alphabet.len() as usize].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn from_tiles(alphabet: &alphabet::Alphabet, tiles: &[u8]) -> Self {
        let mut ret = Self::new(alphabet);
        ret.set_tiles(tiles);
        ret
    }

    pub fn set_tiles(&mut self, tiles: &[u8]) {
        self.tally.iter_mut().for_each(|m| *m = 0);
        for &tile in tiles {
            self.tally[tile as usize] += 1;
        }
        self.len = tiles.len() as u8;
    }

    #[inline(always)]
    pub fn tally(&self) -> &[u8] {
        &self.tally
    }

    #[inline(always)]
    pub fn len(&self) -> u8 {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn num_blanks(&self) -> u8 {
        self.tally[alphabet::BLANK as usize]
    }

    // bit t set iff the rack holds a non-blank t.
    pub fn letter_bits(&self) -> u64 {
        (1u8..)
            .zip(&self.tally[1..])
            .filter(|&(_, &count)| count > 0)
            .fold(0u64, |acc, (tile, _)| acc | (1 << tile))
    }

    // Face values of all tiles, highest first.
    pub fn values_descending(&self, alphabet: &alphabet::Alphabet) -> Vec<i16> {
        let mut v = (0u8..)
            .zip(self.tally.iter())
            .flat_map(|(tile, &count)| {
                std::iter::repeat_n(alphabet.score(tile) as i16, count as usize)
            })
            .collect::<Vec<_>>();
        v.sort_unstable_by(|a, b| b.cmp(a));
        v
    }

    // Calls back once per distinct sub-multiset of the non-blank tiles with
    // exactly size tiles, with its product and its tally.
    pub fn for_each_subset<F: FnMut(Product, &[u8])>(
        &self,
        alphabet: &alphabet::Alphabet,
        size: u8,
        mut f: F,
    ) {
        let mut chosen = vec![0u8; self.tally.len()];
        for_each_subset_of_tally(alphabet, &self.tally, size, &mut chosen, &mut f);
    }
}

pub fn for_each_subset_of_tally<F: FnMut(Product, &[u8])>(
    alphabet: &alphabet::Alphabet,
    tally: &[u8],
    size: u8,
    chosen: &mut [u8],
    f: &mut F,
) {
    struct Env<'a, F: FnMut(Product, &[u8])> {
        alphabet: &'a alphabet::Alphabet<'a>,
        tally: &'a [u8],
        chosen: &'a mut [u8],
        f: &'a mut F,
    }

    fn pick<F: FnMut(Product, &[u8])>(env: &mut Env<F>, tile: usize, remaining: u8, p: Product) {
        if remaining == 0 {
            (env.f)(p, env.chosen);
            return;
        }
        if tile >= env.tally.len() {
            return;
        }
        let available = env.tally[tile].min(remaining);
        let prime = env.alphabet.prime(tile as u8) as Product;
        let mut q = p;
        for _ in 0..available {
            q *= prime;
        }
        // most copies first, so products come out in a fixed order
        for count in (0..=available).rev() {
            env.chosen[tile] = count;
            pick(env, tile + 1, remaining - count, q);
            q /= prime;
        }
        env.chosen[tile] = 0;
    }

    chosen.iter_mut().for_each(|m| *m = 0);
    let num_letters = tally[1..].iter().map(|&c| c as u16).sum::<u16>();
    if size as u16 > num_letters {
        return;
    }
    pick(
        &mut Env {
            alphabet,
            tally,
            chosen,
            f,
        },
        1,
        size,
        product::EMPTY,
    );
}
