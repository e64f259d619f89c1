// Copyright (C) 2020-2026 Andy Kurnia.

use super::alphabet;
use rand::prelude::*;

// Tiles are drawn from the end.
pub struct Bag(pub Vec<u8>);

impl Bag {
    pub fn new(alphabet: &alphabet::Alphabet) -> Bag {
        let mut bag = Vec::with_capacity(alphabet.num_tiles() as usize);
        for tile in 0..alphabet.len() {
            for _ in 0..alphabet.freq(tile) {
                bag.push(tile);
            }
        }
        Bag(bag)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn shuffle(&mut self, rng: &mut dyn RngCore) {
        self.0.shuffle(rng);
    }

    pub fn pop(&mut self) -> Option<u8> {
        self.0.pop()
    }

    // Draws until the rack holds rack_size tiles or the bag runs out.
    pub fn replenish(&mut self, rack: &mut Vec<u8>, rack_size: usize) {
        let num_drawn = rack_size.saturating_sub(rack.len()).min(self.0.len());
        rack.extend(self.0.drain(self.0.len() - num_drawn..).rev());
    }

    // Each tile goes to a uniformly random position, the rest keep their order.
    pub fn put_back(&mut self, rng: &mut dyn RngCore, tiles: &[u8]) {
        for &tile in tiles {
            let pos = rng.random_range(0..=self.0.len());
            self.0.insert(pos, tile);
        }
    }
}

impl Clone for Bag {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }

    #[inline(always)]
    fn clone_from(&mut self, source: &Self) {
        self.0.clone_from(&source.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;

    fn tally_of(tiles: &[u8]) -> [u8; 27] {
        let mut tally = [0u8; 27];
        for &tile in tiles {
            tally[tile as usize] += 1;
        }
        tally
    }

    #[test]
    fn full_distribution() {
        let alphabet = alphabet::make_english_alphabet();
        let bag = Bag::new(&alphabet);
        assert_eq!(bag.len(), 100);
        let tally = tally_of(&bag.0);
        for tile in 0..alphabet.len() {
            assert_eq!(tally[tile as usize], alphabet.freq(tile));
        }
    }

    #[test]
    fn draws_and_puts_back_the_same_tiles() {
        let alphabet = alphabet::make_english_alphabet();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut bag = Bag::new(&alphabet);
        bag.shuffle(&mut rng);
        let before = tally_of(&bag.0);
        let mut rack = Vec::new();
        bag.replenish(&mut rack, 7);
        assert_eq!(rack.len(), 7);
        assert_eq!(bag.len(), 93);
        bag.put_back(&mut rng, &rack);
        assert_eq!(tally_of(&bag.0), before);

        let mut short = Bag(vec![1, 2]);
        let mut rack = vec![5];
        short.replenish(&mut rack, 7);
        assert_eq!(rack, [5, 2, 1]);
        assert!(short.is_empty());
    }
}
