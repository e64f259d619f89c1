// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, anagram, bites, build, matrix};

pub static SMALL_WORDS: &[&str] = &[
    "AH", "HA", "HAM", "HAMS", "SHAM", "MASH", "AHS", "HAS", "ASH", "ALL", "BALL", "CALL", "TALL",
    "QI", "QIS", "AI", "BI", "DI", "GI", "HI", "KI", "LI", "MI", "OI", "PI", "SI", "TI", "XI",
    "AA", "AB", "AD", "AE", "AG", "AL", "AM", "AN", "AR", "AS", "AT", "AW", "AX", "AY", "BA",
    "BE", "DA", "DE", "DO", "ED", "EH", "EL", "EM", "EN", "ER", "ES", "EX", "FA", "GO", "HE",
    "HM", "HO", "ID", "IF", "IN", "IS", "IT", "JO", "KA", "LA", "LO", "MA", "ME", "MO", "MU",
    "NA", "NE", "NO", "NU", "OD", "OE", "OF", "OH", "OM", "ON", "OP", "OR", "OS", "OW", "OX",
    "OY", "PA", "PE", "PO", "RE", "SH", "SO", "TA", "TO", "UH", "UM", "UN", "UP", "US", "UT",
    "WE", "WO", "XU", "YA", "YE", "YO", "ZA", "CAT", "CATS", "ACT", "ACTS", "SCAT", "CAST",
    "TACT", "TACTS", "QAT", "QATS", "ZAS", "LUZ", "LUZZ", "VIVIFIC", "RETAINS", "STAINER",
    "NASTIER", "RETINAS", "ANESTRI", "RATINES", "ZEST", "JEST", "QUIZ", "OXO", "TAX", "SAX",
    "AXE", "AXES", "EAT", "TEA", "ATE", "ETA", "SEAT", "EATS", "EAST", "TEAS", "SATE", "SEA",
    "TEN", "NET", "NETS", "NEST", "SENT", "TENS", "ONE", "EON", "NOES", "NOSE", "ONES", "TONE",
    "NOTE", "NOTES", "STONE", "TONES", "ONSET", "SETON", "STENO",
];

// Uppercase letters, '?' for the blank, lowercase for a blank designated as that letter.
pub fn tiles(s: &str) -> Vec<u8> {
    let alphabet = alphabet::make_english_alphabet();
    s.chars()
        .map(|c| {
            if c.is_ascii_lowercase() {
                alphabet::BLANK_MARK | alphabet.letter_of(c.to_ascii_uppercase()).unwrap()
            } else {
                alphabet.rack_tile_of(c).unwrap()
            }
        })
        .collect()
}

pub fn index_of(words: &[&str]) -> anagram::AnagramIndex {
    let alphabet = alphabet::make_english_alphabet();
    let machine_words = words
        .iter()
        .map(|w| bites::Bites::try_from(&tiles(w)[..]).unwrap())
        .collect::<Vec<_>>();
    build::build_index(&alphabet, &machine_words)
}

pub fn small_index() -> anagram::AnagramIndex {
    index_of(SMALL_WORDS)
}

// Writes the word over whatever is there.
pub fn place_word(
    board_tiles: &mut [u8],
    dim: matrix::Dim,
    down: bool,
    row: i8,
    col: i8,
    word: &str,
) {
    let (lane, idx) = if down { (col, row) } else { (row, col) };
    let strider = dim.lane(down, lane);
    for (i, tile) in (idx..).zip(tiles(word)) {
        board_tiles[strider.at(i)] = tile;
    }
}
