// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, anagram, bites, fash, product};
use product::Product;

// Flattens product -> entries into one list plus spans, keys ascending.
fn flatten<T: Copy>(
    mut grouped: fash::MyHashMap<Product, Vec<T>>,
) -> (Box<[T]>, fash::MyHashMap<Product, anagram::Span>) {
    let mut keys = grouped.keys().copied().collect::<Vec<_>>();
    keys.sort_unstable();
    let mut flat = Vec::with_capacity(grouped.values().map(Vec::len).sum());
    let mut spans = fash::MyHashMap::default();
    spans.reserve(keys.len());
    for key in keys {
        if let Some(entries) = grouped.remove(&key) {
            spans.insert(
                key,
                anagram::Span {
                    offset: flat.len() as u32,
                    len: entries.len() as u32,
                },
            );
            flat.extend_from_slice(&entries);
        }
    }
    (flat.into_boxed_slice(), spans)
}

// Single pass: each word contributes its own group entry, every distinct
// one-tile removal and every distinct unordered two-tile removal.
pub fn build_index(
    alphabet: &alphabet::Alphabet,
    machine_words: &[bites::Bites],
) -> anagram::AnagramIndex {
    let t0 = std::time::Instant::now();
    let mut seen = fash::MyHashSet::<bites::Bites>::default();
    let mut word_groups = fash::MyHashMap::<Product, Vec<bites::Bites>>::default();
    let mut blank_groups = fash::MyHashMap::<Product, Vec<u8>>::default();
    let mut pair_groups = fash::MyHashMap::<Product, Vec<[u8; 2]>>::default();
    let mut distinct = Vec::new();
    let mut num_skipped = 0usize;

    for word in machine_words {
        if word.is_empty() || !seen.insert(*word) {
            continue;
        }
        let Some(p) = product::product_of(alphabet, word) else {
            num_skipped += 1;
            log::warn!(
                "skipping {}, its product does not fit",
                alphabet.fmt_word(word)
            );
            continue;
        };
        word_groups.entry(p).or_default().push(*word);

        // (tile, count) sorted by tile
        distinct.clear();
        let mut sorted_word = *word;
        sorted_word.as_mut_slice().sort_unstable();
        for &tile in sorted_word.iter() {
            match distinct.last_mut() {
                Some((t, count)) if *t == tile => *count += 1,
                _ => distinct.push((tile, 1u8)),
            }
        }

        for (i, &(x, x_count)) in distinct.iter().enumerate() {
            let px = alphabet.prime(x) as Product;
            let without_x = p / px;
            blank_groups.entry(without_x).or_default().push(x);
            if x_count >= 2 {
                pair_groups
                    .entry(without_x / px)
                    .or_default()
                    .push([x, x]);
            }
            for &(y, _) in &distinct[i + 1..] {
                pair_groups
                    .entry(without_x / alphabet.prime(y) as Product)
                    .or_default()
                    .push([x, y]);
            }
        }
    }

    for letters in blank_groups.values_mut() {
        letters.sort_unstable();
        letters.dedup();
    }
    for pairs in pair_groups.values_mut() {
        pairs.sort_unstable();
        pairs.dedup();
    }

    let mut index = anagram::AnagramIndex::new_empty(alphabet);
    (index.words, index.word_spans) = flatten(word_groups);
    (index.blank_fillers, index.blank_spans) = flatten(blank_groups);
    (index.pair_fillers, index.pair_spans) = flatten(pair_groups);
    log::info!(
        "built anagram index: {} words ({} skipped), {} anagram sets, {} one-blank keys, {} two-blank keys in {:?}",
        index.words.len(),
        num_skipped,
        index.word_spans.len(),
        index.blank_spans.len(),
        index.pair_spans.len(),
        t0.elapsed()
    );
    index
}
