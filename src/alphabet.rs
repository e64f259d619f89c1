// Copyright (C) 2020-2026 Andy Kurnia.

pub struct Tile<'a> {
    label: &'a str,
    blank_label: &'a str,
    freq: u8,
    score: i8,
    is_vowel: bool,
    prime: u8,
}

// Tile 0 is the blank. Board tiles use 0x80 | t for a blank designated as t.
pub struct Alphabet<'a> {
    tiles: &'a [Tile<'a>],
    num_tiles: u16,
}

pub const BLANK: u8 = 0;
pub const BLANK_MARK: u8 = 0x80;

impl<'a> Alphabet<'a> {
    #[inline(always)]
    pub fn len(&self) -> u8 {
        self.tiles.len() as u8
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, idx: u8) -> &'a Tile<'a> {
        &self.tiles[idx as usize]
    }

    #[inline(always)]
    pub fn num_tiles(&self) -> u16 {
        self.num_tiles
    }

    #[inline(always)]
    pub fn from_board(&self, idx: u8) -> Option<&'a str> {
        let c = idx & !BLANK_MARK;
        if c == 0 || c >= self.len() {
            None
        } else if idx & BLANK_MARK == 0 {
            Some(self.get(c).label)
        } else {
            Some(self.get(c).blank_label)
        }
    }

    #[inline(always)]
    pub fn from_rack(&self, idx: u8) -> Option<&'a str> {
        if idx >= self.len() {
            None
        } else {
            Some(self.get(idx).label)
        }
    }

    // Board blanks score as the blank, not as the letter they stand for.
    #[inline(always)]
    pub fn score(&self, idx: u8) -> i8 {
        if idx & BLANK_MARK != 0 {
            self.get(BLANK).score
        } else {
            self.get(idx).score
        }
    }

    #[inline(always)]
    pub fn is_vowel(&self, idx: u8) -> bool {
        self.get(idx & !BLANK_MARK).is_vowel
    }

    #[inline(always)]
    pub fn freq(&self, idx: u8) -> u8 {
        self.get(idx).freq
    }

    // Blank-designated board tiles contribute the prime of the letter they stand for.
    #[inline(always)]
    pub fn prime(&self, idx: u8) -> u8 {
        self.get(idx & !BLANK_MARK).prime
    }

    // Matches letters only, never the blank.
    pub fn letter_of(&self, c: char) -> Option<u8> {
        let mut buf = [0u8; 4];
        let s: &str = c.encode_utf8(&mut buf);
        (1..self.len()).find(|&tile| self.get(tile).label == s)
    }

    // Like letter_of, but also accepts the blank label.
    pub fn rack_tile_of(&self, c: char) -> Option<u8> {
        let mut buf = [0u8; 4];
        let s: &str = c.encode_utf8(&mut buf);
        (0..self.len()).find(|&tile| self.get(tile).label == s)
    }

    pub fn fmt_rack(&self, rack: &[u8]) -> String {
        rack.iter()
            .filter_map(|&tile| self.from_rack(tile))
            .collect()
    }

    // 0 (play-through) is shown as '.'.
    pub fn fmt_word(&self, word: &[u8]) -> String {
        word.iter()
            .map(|&tile| self.from_board(tile).unwrap_or("."))
            .collect()
    }
}

pub fn make_english_alphabet<'a>() -> Alphabet<'a> {
    Alphabet {
        tiles: &[
            Tile {
                label: "?",
                blank_label: "?",
                freq: 2,
                score: 0,
                is_vowel: false,
                prime: 2,
            },
            Tile {
                label: "A",
                blank_label: "a",
                freq: 9,
                score: 1,
                is_vowel: true,
                prime: 3,
            },
            Tile {
                label: "B",
                blank_label: "b",
                freq: 2,
                score: 3,
                is_vowel: false,
                prime: 5,
            },
            Tile {
                label: "C",
                blank_label: "c",
                freq: 2,
                score: 3,
                is_vowel: false,
                prime: 7,
            },
            Tile {
                label: "D",
                blank_label: "d",
                freq: 4,
                score: 2,
                is_vowel: false,
                prime: 11,
            },
            Tile {
                label: "E",
                blank_label: "e",
                freq: 12,
                score: 1,
                is_vowel: true,
                prime: 13,
            },
            Tile {
                label: "F",
                blank_label: "f",
                freq: 2,
                score: 4,
                is_vowel: false,
                prime: 17,
            },
            Tile {
                label: "G",
                blank_label: "g",
                freq: 3,
                score: 2,
                is_vowel: false,
                prime: 19,
            },
            Tile {
                label: "H",
                blank_label: "h",
                freq: 2,
                score: 4,
                is_vowel: false,
                prime: 23,
            },
            Tile {
                label: "I",
                blank_label: "i",
                freq: 9,
                score: 1,
                is_vowel: true,
                prime: 29,
            },
            Tile {
                label: "J",
                blank_label: "j",
                freq: 1,
                score: 8,
                is_vowel: false,
                prime: 31,
            },
            Tile {
                label: "K",
                blank_label: "k",
                freq: 1,
                score: 5,
                is_vowel: false,
                prime: 37,
            },
            Tile {
                label: "L",
                blank_label: "l",
                freq: 4,
                score: 1,
                is_vowel: false,
                prime: 41,
            },
            Tile {
                label: "M",
                blank_label: "m",
                freq: 2,
                score: 3,
                is_vowel: false,
                prime: 43,
            },
            Tile {
                label: "N",
                blank_label: "n",
                freq: 6,
                score: 1,
                is_vowel: false,
                prime: 47,
            },
            Tile {
                label: "O",
                blank_label: "o",
                freq: 8,
                score: 1,
                is_vowel: true,
                prime: 53,
            },
            Tile {
                label: "P",
                blank_label: "p",
                freq: 2,
                score: 3,
                is_vowel: false,
                prime: 59,
            },
            Tile {
                label: "Q",
                blank_label: "q",
                freq: 1,
                score: 10,
                is_vowel: false,
                prime: 61,
            },
            Tile {
                label: "R",
                blank_label: "r",
                freq: 6,
                score: 1,
                is_vowel: false,
                prime: 67,
            },
            Tile {
                label: "S",
                blank_label: "s",
                freq: 4,
                score: 1,
                is_vowel: false,
                prime: 71,
            },
            Tile {
                label: "T",
                blank_label: "t",
                freq: 6,
                score: 1,
                is_vowel: false,
                prime: 73,
            },
            Tile {
                label: "U",
                blank_label: "u",
                freq: 4,
                score: 1,
                is_vowel: true,
                prime: 79,
            },
            Tile {
                label: "V",
                blank_label: "v",
                freq: 2,
                score: 4,
                is_vowel: false,
                prime: 83,
            },
            Tile {
                label: "W",
                blank_label: "w",
                freq: 2,
                score: 4,
                is_vowel: false,
                prime: 89,
            },
            Tile {
                label: "X",
                blank_label: "x",
                freq: 1,
                score: 8,
                is_vowel: false,
                prime: 97,
            },
            Tile {
                label: "Y",
                blank_label: "y",
                freq: 2,
                score: 4,
                is_vowel: false,
                prime: 101,
            },
            Tile {
                label: "Z",
                blank_label: "z",
                freq: 1,
                score: 10,
                is_vowel: false,
                prime: 103,
            },
        ],
        num_tiles: 100,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primes_are_distinct_and_increasing() {
        let alphabet = make_english_alphabet();
        for tile in 1..alphabet.len() {
            assert!(alphabet.prime(tile) > alphabet.prime(tile - 1));
        }
        assert_eq!(alphabet.prime(0x80 | 5), alphabet.prime(5));
    }

    #[test]
    fn distribution_adds_up() {
        let alphabet = make_english_alphabet();
        let total = (0..alphabet.len())
            .map(|tile| alphabet.freq(tile) as u16)
            .sum::<u16>();
        assert_eq!(total, alphabet.num_tiles());
    }

    #[test]
    fn board_blanks_score_zero() {
        let alphabet = make_english_alphabet();
        assert_eq!(alphabet.score(17), 10);
        assert_eq!(alphabet.score(0x80 | 17), 0);
        assert_eq!(alphabet.from_board(0x80 | 17), Some("q"));
        assert_eq!(alphabet.from_board(0), None);
    }

    #[test]
    fn reads_letters() {
        let alphabet = make_english_alphabet();
        assert_eq!(alphabet.letter_of('A'), Some(1));
        assert_eq!(alphabet.letter_of('Z'), Some(26));
        assert_eq!(alphabet.letter_of('?'), None);
        assert_eq!(alphabet.rack_tile_of('?'), Some(0));
        assert_eq!(alphabet.letter_of('a'), None);
        assert_eq!(alphabet.fmt_word(&[8, 0, 0x80 | 13]), "H.m");
    }
}
