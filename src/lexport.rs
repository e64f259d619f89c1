// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, anagram, bites, build, error, fash, product};
use product::Product;

pub static MAGIC: &[u8; 4] = b"KANA";

// One word per line. Blank lines are ignored.
pub fn read_text_words(
    alphabet: &alphabet::Alphabet,
    giant_string: &str,
) -> error::Returns<Vec<bites::Bites>> {
    let mut machine_words = Vec::new();
    let mut v = Vec::new();
    for (line_num, s) in (1..).zip(giant_string.lines()) {
        let s = s.trim_end_matches('\r');
        if s.is_empty() {
            continue;
        }
        v.clear();
        for c in s.chars() {
            match alphabet.letter_of(c) {
                Some(tile) => v.push(tile),
                None => {
                    crate::return_error!(
                        BadTile,
                        format!("line {}: invalid tile {:?} in {:?}", line_num, c, s)
                    );
                }
            }
        }
        match bites::Bites::try_from(&v[..]) {
            Ok(word) => machine_words.push(word),
            Err(e) => {
                crate::return_error!(WordTooLong, format!("line {}: {}", line_num, e));
            }
        }
    }
    Ok(machine_words)
}

pub fn build_from_text(
    alphabet: &alphabet::Alphabet,
    giant_string: &str,
) -> error::Returns<anagram::AnagramIndex> {
    Ok(build::build_index(
        alphabet,
        &read_text_words(alphabet, giant_string)?,
    ))
}

fn write_u32(bin: &mut Vec<u8>, x: u32) {
    bin.extend_from_slice(&x.to_le_bytes());
}

fn write_spans(bin: &mut Vec<u8>, spans: &fash::MyHashMap<Product, anagram::Span>) {
    let mut keys = spans.keys().copied().collect::<Vec<_>>();
    keys.sort_unstable();
    write_u32(bin, keys.len() as u32);
    for key in keys {
        let span = spans[&key];
        bin.extend_from_slice(&key.to_le_bytes());
        write_u32(bin, span.offset);
        write_u32(bin, span.len);
    }
}

// magic, then six records, each a u32 count followed by its elements:
// words (u8 len + tiles), blank fillers (u8), filler pairs (2 x u8),
// word spans, blank spans, pair spans (u128 product, u32 offset, u32 len).
pub fn to_bytes(index: &anagram::AnagramIndex) -> Vec<u8> {
    let mut bin = Vec::new();
    bin.extend_from_slice(MAGIC);
    write_u32(&mut bin, index.words.len() as u32);
    for word in index.words.iter() {
        bin.push(word.len() as u8);
        bin.extend_from_slice(word);
    }
    write_u32(&mut bin, index.blank_fillers.len() as u32);
    bin.extend_from_slice(&index.blank_fillers);
    write_u32(&mut bin, index.pair_fillers.len() as u32);
    for pair in index.pair_fillers.iter() {
        bin.extend_from_slice(pair);
    }
    write_spans(&mut bin, &index.word_spans);
    write_spans(&mut bin, &index.blank_spans);
    write_spans(&mut bin, &index.pair_spans);
    bin
}

struct Reader<'a> {
    buf: &'a [u8],
    r: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize, what: &str) -> error::Returns<&'a [u8]> {
        if self.buf.len() - self.r < n {
            crate::return_error!(
                BadRecord,
                format!("truncated {} at byte {}", what, self.r)
            );
        }
        let ret = &self.buf[self.r..self.r + n];
        self.r += n;
        Ok(ret)
    }

    fn u8(&mut self, what: &str) -> error::Returns<u8> {
        Ok(self.take(1, what)?[0])
    }

    fn u32(&mut self, what: &str) -> error::Returns<u32> {
        let b = self.take(4, what)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn u128(&mut self, what: &str) -> error::Returns<u128> {
        let mut b = [0u8; 16];
        b.copy_from_slice(self.take(16, what)?);
        Ok(u128::from_le_bytes(b))
    }

    // Counts come from the file, so do not preallocate beyond what the file can hold.
    fn count(&mut self, what: &str, min_element_size: usize) -> error::Returns<usize> {
        let n = self.u32(what)? as usize;
        if n.saturating_mul(min_element_size) > self.buf.len() - self.r {
            crate::return_error!(
                BadRecord,
                format!("{} claims {} entries past end of input", what, n)
            );
        }
        Ok(n)
    }

    fn tile(&mut self, alphabet_len: u8, what: &str) -> error::Returns<u8> {
        let tile = self.u8(what)?;
        if tile == 0 || tile >= alphabet_len {
            crate::return_error!(BadRecord, format!("{} has invalid tile {}", what, tile));
        }
        Ok(tile)
    }

    fn spans(
        &mut self,
        what: &str,
        list_len: usize,
    ) -> error::Returns<fash::MyHashMap<Product, anagram::Span>> {
        let n = self.count(what, 24)?;
        let mut spans = fash::MyHashMap::default();
        spans.reserve(n);
        for _ in 0..n {
            let key = self.u128(what)?;
            let span = anagram::Span {
                offset: self.u32(what)?,
                len: self.u32(what)?,
            };
            if span.len == 0 || span.offset as usize + span.len as usize > list_len {
                crate::return_error!(
                    BadRecord,
                    format!("{} has span {:?} outside list of {}", what, span, list_len)
                );
            }
            if spans.insert(key, span).is_some() {
                crate::return_error!(BadRecord, format!("{} repeats product {}", what, key));
            }
        }
        Ok(spans)
    }
}

// Every word must spell its key, and every filler must complete its key into
// some word group.
fn check_products(index: &anagram::AnagramIndex) -> error::Returns<()> {
    for (&key, span) in index.word_spans.iter() {
        for word in index.words[span.range()].iter() {
            if index.product_of(word) != Some(key) {
                crate::return_error!(
                    BadRecord,
                    format!("word spans: word of length {} is not product {}", word.len(), key)
                );
            }
        }
    }
    for (&key, span) in index.blank_spans.iter() {
        for &tile in index.blank_fillers[span.range()].iter() {
            match index.product_of(&[tile]).and_then(|p| key.checked_mul(p)) {
                Some(completed) if index.word_spans.contains_key(&completed) => {}
                _ => {
                    crate::return_error!(
                        BadRecord,
                        format!("blank spans: tile {} does not complete product {}", tile, key)
                    );
                }
            }
        }
    }
    for (&key, span) in index.pair_spans.iter() {
        for &[x, y] in index.pair_fillers[span.range()].iter() {
            match index.product_of(&[x, y]).and_then(|p| key.checked_mul(p)) {
                Some(completed) if x <= y && index.word_spans.contains_key(&completed) => {}
                _ => {
                    crate::return_error!(
                        BadRecord,
                        format!("pair spans: tiles {} {} do not complete product {}", x, y, key)
                    );
                }
            }
        }
    }
    Ok(())
}

pub fn from_bytes(
    alphabet: &alphabet::Alphabet,
    buf: &[u8],
) -> error::Returns<anagram::AnagramIndex> {
    let mut reader = Reader { buf, r: 0 };
    if reader.take(MAGIC.len(), "magic")? != MAGIC {
        crate::return_error!(BadRecord, "not an anagram index".into());
    }
    let alphabet_len = alphabet.len();
    let mut index = anagram::AnagramIndex::new_empty(alphabet);

    let num_words = reader.count("words", 2)?;
    let mut words = Vec::with_capacity(num_words);
    let mut v = Vec::new();
    for _ in 0..num_words {
        let len = reader.u8("word length")?;
        v.clear();
        for _ in 0..len {
            v.push(reader.tile(alphabet_len, "word")?);
        }
        match bites::Bites::try_from(&v[..]) {
            Ok(word) => words.push(word),
            Err(e) => {
                crate::return_error!(BadRecord, format!("word record: {}", e));
            }
        }
    }
    index.words = words.into_boxed_slice();

    let num_blank_fillers = reader.count("blank fillers", 1)?;
    let mut blank_fillers = Vec::with_capacity(num_blank_fillers);
    for _ in 0..num_blank_fillers {
        blank_fillers.push(reader.tile(alphabet_len, "blank fillers")?);
    }
    index.blank_fillers = blank_fillers.into_boxed_slice();

    let num_pair_fillers = reader.count("pair fillers", 2)?;
    let mut pair_fillers = Vec::with_capacity(num_pair_fillers);
    for _ in 0..num_pair_fillers {
        pair_fillers.push([
            reader.tile(alphabet_len, "pair fillers")?,
            reader.tile(alphabet_len, "pair fillers")?,
        ]);
    }
    index.pair_fillers = pair_fillers.into_boxed_slice();

    index.word_spans = reader.spans("word spans", index.words.len())?;
    index.blank_spans = reader.spans("blank spans", index.blank_fillers.len())?;
    index.pair_spans = reader.spans("pair spans", index.pair_fillers.len())?;
    if reader.r != buf.len() {
        crate::return_error!(
            BadRecord,
            format!("{} trailing bytes", buf.len() - reader.r)
        );
    }
    check_products(&index)?;
    log::info!(
        "loaded anagram index: {} words, {} anagram sets",
        index.words.len(),
        index.word_spans.len()
    );
    Ok(index)
}

// Binary if it starts with the magic, else a text word list.
pub fn load_index(
    alphabet: &alphabet::Alphabet,
    path: &str,
) -> error::Returns<anagram::AnagramIndex> {
    let t0 = std::time::Instant::now();
    let buf = match std::fs::read(path) {
        Ok(buf) => buf,
        Err(e) => {
            crate::return_error!(Io, format!("cannot read {}: {}", path, e));
        }
    };
    let index = if buf.starts_with(MAGIC) {
        from_bytes(alphabet, &buf)?
    } else {
        match std::str::from_utf8(&buf) {
            Ok(giant_string) => build_from_text(alphabet, giant_string)?,
            Err(e) => {
                crate::return_error!(BadTile, format!("{} is not utf-8: {}", path, e));
            }
        }
    };
    log::info!("{} loaded in {:?}", path, t0.elapsed());
    Ok(index)
}
