// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, anagram, matrix, product};
use product::Product;

// bits: tiles that may go here. score: face value of the perpendicular
// word excluding this square.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CrossSet {
    pub bits: u64,
    pub score: i16,
}

// No perpendicular neighbour, so no cross word is formed.
pub const UNCONSTRAINED: u64 = !0;

impl CrossSet {
    pub const OPEN: CrossSet = CrossSet {
        bits: UNCONSTRAINED,
        score: 0,
    };

    #[inline(always)]
    pub fn is_constrained(&self) -> bool {
        self.bits != UNCONSTRAINED
    }

    #[inline(always)]
    pub fn allows(&self, tile: u8) -> bool {
        self.bits & (1 << (tile & !alphabet::BLANK_MARK)) != 0
    }
}

// Per square and play orientation. The entry for across plays reflects the
// vertical word through the square and vice versa.
#[derive(Clone)]
pub struct CrossCache {
    dim: matrix::Dim,
    for_across_plays: Box<[CrossSet]>,
    for_down_plays: Box<[CrossSet]>,
    word_buffer: Vec<u8>,
}

impl CrossCache {
    pub fn new(dim: matrix::Dim) -> Self {
        Self {
            dim,
            for_across_plays: vec![CrossSet::OPEN; dim.area()].into_boxed_slice(),
            for_down_plays: vec![CrossSet::OPEN; dim.area()].into_boxed_slice(),
            word_buffer: Vec::with_capacity(std::cmp::max(dim.rows, dim.cols) as usize),
        }
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    // Indexed by board square.
    #[inline(always)]
    pub fn for_plays(&self, down: bool) -> &[CrossSet] {
        if down {
            &self.for_down_plays
        } else {
            &self.for_across_plays
        }
    }

    #[inline(always)]
    pub fn get(&self, down: bool, square: usize) -> CrossSet {
        self.for_plays(down)[square]
    }

    pub fn cache_crosses_and_scores(
        &mut self,
        alphabet: &alphabet::Alphabet,
        index: &anagram::AnagramIndex,
        board_tiles: &[u8],
    ) {
        for row in 0..self.dim.rows {
            for col in 0..self.dim.cols {
                self.recompute_square(alphabet, index, board_tiles, row, col);
            }
        }
    }

    // board_tiles already has the play on it. Only runs touching a new tile
    // can change, so only the empty squares ending those runs are redone.
    pub fn update_after_play(
        &mut self,
        alphabet: &alphabet::Alphabet,
        index: &anagram::AnagramIndex,
        board_tiles: &[u8],
        down: bool,
        lane: i8,
        idx: i8,
        word: &[u8],
    ) {
        for (i, &tile) in (idx..).zip(word) {
            if tile == 0 {
                continue;
            }
            let (row, col) = self.dim.row_col_of(down, lane, i);
            let square = self.dim.at_row_col(row, col);
            self.for_across_plays[square] = CrossSet::OPEN;
            self.for_down_plays[square] = CrossSet::OPEN;
            for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                let (mut r, mut c) = (row + dr, col + dc);
                while self.dim.contains(r, c) && board_tiles[self.dim.at_row_col(r, c)] != 0 {
                    r += dr;
                    c += dc;
                }
                if self.dim.contains(r, c) {
                    self.recompute_square(alphabet, index, board_tiles, r, c);
                }
            }
        }
    }

    fn recompute_square(
        &mut self,
        alphabet: &alphabet::Alphabet,
        index: &anagram::AnagramIndex,
        board_tiles: &[u8],
        row: i8,
        col: i8,
    ) {
        let square = self.dim.at_row_col(row, col);
        if board_tiles[square] != 0 {
            self.for_across_plays[square] = CrossSet::OPEN;
            self.for_down_plays[square] = CrossSet::OPEN;
            return;
        }
        // across plays see the vertical word
        self.for_across_plays[square] =
            self.compute(alphabet, index, board_tiles, true, col, row);
        self.for_down_plays[square] =
            self.compute(alphabet, index, board_tiles, false, row, col);
    }

    // Cross word runs along lane in direction down, with the hole at idx.
    fn compute(
        &mut self,
        alphabet: &alphabet::Alphabet,
        index: &anagram::AnagramIndex,
        board_tiles: &[u8],
        down: bool,
        lane: i8,
        idx: i8,
    ) -> CrossSet {
        let strider = self.dim.lane(down, lane);
        let mut start = idx;
        while start > 0 && board_tiles[strider.at(start - 1)] != 0 {
            start -= 1;
        }
        let mut end = idx + 1;
        while end < strider.len() && board_tiles[strider.at(end)] != 0 {
            end += 1;
        }
        if end - start == 1 {
            return CrossSet::OPEN;
        }

        self.word_buffer.clear();
        let mut score = 0i16;
        let mut p: Option<Product> = Some(product::EMPTY);
        for i in start..end {
            let b = board_tiles[strider.at(i)];
            if i == idx {
                self.word_buffer.push(0);
                continue;
            }
            score += alphabet.score(b) as i16;
            p = p.and_then(|p| p.checked_mul(alphabet.prime(b) as Product));
            self.word_buffer.push(b & !alphabet::BLANK_MARK);
        }

        let mut bits = 0u64;
        if let Some(p) = p {
            let hole = (idx - start) as usize;
            // the blank map already knows which tiles complete some word
            for &tile in index.blanks(p) {
                self.word_buffer[hole] = tile;
                let completed = p * alphabet.prime(tile) as Product;
                if index
                    .group(completed)
                    .iter()
                    .any(|word| word[..] == self.word_buffer[..])
                {
                    bits |= 1 << tile;
                }
            }
        }
        CrossSet { bits, score }
    }
}
