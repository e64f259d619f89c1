// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, bites, fash, product};
use product::Product;

// A run of entries in one of the flat lists.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Span {
    pub offset: u32,
    pub len: u32,
}

impl Span {
    #[inline(always)]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset as usize..(self.offset as usize + self.len as usize)
    }
}

// Three product-keyed maps over flat lists:
// - words: full multiset -> words spelling it.
// - blanks: multiset missing one tile -> letters that complete some word.
// - pairs: multiset missing two tiles -> letter pairs (x <= y) that do.
// Absent products have no entry, never an empty span.
pub struct AnagramIndex {
    pub(crate) primes: Box<[u8]>,
    pub(crate) words: Box<[bites::Bites]>,
    pub(crate) blank_fillers: Box<[u8]>,
    pub(crate) pair_fillers: Box<[[u8; 2]]>,
    pub(crate) word_spans: fash::MyHashMap<Product, Span>,
    pub(crate) blank_spans: fash::MyHashMap<Product, Span>,
    pub(crate) pair_spans: fash::MyHashMap<Product, Span>,
}

enum Fillers<'a> {
    Done,
    Single(std::slice::Iter<'a, u8>),
    Pair(std::slice::Iter<'a, [u8; 2]>),
}

// Concatenation of word groups, by filler ascending then group order.
pub struct WordRange<'a> {
    index: &'a AnagramIndex,
    base: Product,
    fillers: Fillers<'a>,
    current: std::slice::Iter<'a, bites::Bites>,
}

impl<'a> Iterator for WordRange<'a> {
    type Item = &'a bites::Bites;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(word) = self.current.next() {
                return Some(word);
            }
            let completed = match &mut self.fillers {
                Fillers::Done => return None,
                Fillers::Single(it) => self.index.times(self.base, *it.next()?),
                Fillers::Pair(it) => {
                    let &[x, y] = it.next()?;
                    self.index.times(self.index.times(self.base, x), y)
                }
            };
            self.current = self.index.group(completed).iter();
        }
    }
}

impl AnagramIndex {
    pub(crate) fn new_empty(alphabet: &alphabet::Alphabet) -> Self {
        Self {
            primes: (0..alphabet.len()).map(|tile| alphabet.prime(tile)).collect(),
            words: Box::new([]),
            blank_fillers: Box::new([]),
            pair_fillers: Box::new([]),
            word_spans: Default::default(),
            blank_spans: Default::default(),
            pair_spans: Default::default(),
        }
    }

    #[inline(always)]
    fn times(&self, product: Product, tile: u8) -> Product {
        product * self.primes[tile as usize] as Product
    }

    #[inline(always)]
    pub fn product_of(&self, tiles: &[u8]) -> Option<Product> {
        tiles.iter().try_fold(product::EMPTY, |acc, &tile| {
            acc.checked_mul(self.primes[(tile & !alphabet::BLANK_MARK) as usize] as Product)
        })
    }

    // Words spelling exactly this multiset.
    #[inline(always)]
    pub fn group(&self, product: Product) -> &[bites::Bites] {
        match self.word_spans.get(&product) {
            Some(span) => &self.words[span.range()],
            None => &[],
        }
    }

    #[inline(always)]
    pub fn blanks(&self, product: Product) -> &[u8] {
        match self.blank_spans.get(&product) {
            Some(span) => &self.blank_fillers[span.range()],
            None => &[],
        }
    }

    #[inline(always)]
    pub fn double_blanks(&self, product: Product) -> &[[u8; 2]] {
        match self.pair_spans.get(&product) {
            Some(span) => &self.pair_fillers[span.range()],
            None => &[],
        }
    }

    // Words whose multiset is this one plus num_wildcards more letters.
    pub fn words(&self, product: Product, num_wildcards: u8) -> WordRange<'_> {
        let (fillers, current) = match num_wildcards {
            0 => (Fillers::Done, self.group(product).iter()),
            1 => (Fillers::Single(self.blanks(product).iter()), Default::default()),
            2 => (Fillers::Pair(self.double_blanks(product).iter()), Default::default()),
            _ => (Fillers::Done, Default::default()),
        };
        WordRange {
            index: self,
            base: product,
            fillers,
            current,
        }
    }

    // tiles may carry the blank mark, it is ignored.
    pub fn contains_word(&self, tiles: &[u8]) -> bool {
        match self.product_of(tiles) {
            Some(p) => self.group(p).iter().any(|word| {
                word.len() == tiles.len()
                    && word
                        .iter()
                        .zip(tiles)
                        .all(|(&w, &t)| w == t & !alphabet::BLANK_MARK)
            }),
            None => false,
        }
    }

    #[inline(always)]
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    #[inline(always)]
    pub fn all_words(&self) -> &[bites::Bites] {
        &self.words
    }

    // Every key of the word map, ascending.
    pub fn word_products(&self) -> Vec<Product> {
        let mut v = self.word_spans.keys().copied().collect::<Vec<_>>();
        v.sort_unstable();
        v
    }

    pub fn blank_products(&self) -> Vec<Product> {
        let mut v = self.blank_spans.keys().copied().collect::<Vec<_>>();
        v.sort_unstable();
        v
    }

    pub fn double_blank_products(&self) -> Vec<Product> {
        let mut v = self.pair_spans.keys().copied().collect::<Vec<_>>();
        v.sort_unstable();
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn words_of(index: &AnagramIndex, product: Product, b: u8) -> Vec<String> {
        let alphabet = alphabet::make_english_alphabet();
        index
            .words(product, b)
            .map(|w| alphabet.fmt_word(w))
            .collect()
    }

    #[test]
    fn ah_ha_ham() {
        let alphabet = alphabet::make_english_alphabet();
        let index = test_support::index_of(&["AH", "HA", "HAM"]);
        let p = |s: &str| product::product_of(&alphabet, &test_support::tiles(s)).unwrap();
        assert_eq!(words_of(&index, p("AH"), 0), ["AH", "HA"]);
        assert_eq!(words_of(&index, p("AHM"), 0), ["HAM"]);
        assert_eq!(index.blanks(p("A")), &[8]);
        assert_eq!(index.double_blanks(p("")), &[[1, 8]]);
        assert_eq!(words_of(&index, p("A"), 1), ["AH", "HA"]);
        assert_eq!(words_of(&index, p("M"), 2), ["HAM"]);
        assert_eq!(words_of(&index, p(""), 2), ["AH", "HA"]);
        assert!(words_of(&index, p("Z"), 1).is_empty());
        assert!(words_of(&index, p("A"), 3).is_empty());
    }

    #[test]
    fn single_blank_is_complete_and_sound() {
        let alphabet = alphabet::make_english_alphabet();
        let index = test_support::small_index();
        for &q in &index.blank_products() {
            let found = index.words(q, 1).copied().collect::<Vec<_>>();
            assert!(!found.is_empty());
            for w in index.all_words() {
                let pw = product::product_of(&alphabet, w).unwrap();
                let fits = pw % q == 0 && (1..alphabet.len()).any(|t| pw / q == alphabet.prime(t) as Product);
                assert_eq!(found.contains(w), fits, "{}", alphabet.fmt_word(w));
            }
        }
    }

    #[test]
    fn double_blank_is_complete_and_sound() {
        let alphabet = alphabet::make_english_alphabet();
        let index = test_support::small_index();
        let pair_primes = (1..alphabet.len())
            .flat_map(|x| (x..alphabet.len()).map(move |y| (x, y)))
            .map(|(x, y)| alphabet.prime(x) as Product * alphabet.prime(y) as Product)
            .collect::<Vec<_>>();
        for &q in &index.double_blank_products() {
            let found = index.words(q, 2).copied().collect::<Vec<_>>();
            for w in index.all_words() {
                let pw = product::product_of(&alphabet, w).unwrap();
                let fits = pw % q == 0 && pair_primes.contains(&(pw / q));
                assert_eq!(found.contains(w), fits, "{}", alphabet.fmt_word(w));
            }
            // each word appears once
            let mut deduped = found.clone();
            deduped.sort();
            deduped.dedup();
            assert_eq!(deduped.len(), found.len());
        }
    }

    #[test]
    fn exact_groups_match_multisets() {
        let alphabet = alphabet::make_english_alphabet();
        let index = test_support::small_index();
        for w in index.all_words() {
            let mut sorted_w = w[..].to_vec();
            sorted_w.sort_unstable();
            let pw = product::product_of(&alphabet, w).unwrap();
            for v in index.group(pw) {
                let mut sorted_v = v[..].to_vec();
                sorted_v.sort_unstable();
                assert_eq!(sorted_v, sorted_w);
            }
            assert!(index.contains_word(w));
        }
        assert!(!index.contains_word(&test_support::tiles("QZ")));
        assert!(index.contains_word(&[17, 0x80 | 9]));
    }
}
