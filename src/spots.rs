// Copyright (C) 2020-2026 Andy Kurnia.

use super::{cross_cache, movegen, rack};

// A place where num_tiles new tiles form a main word spanning start..end
// along the lane. Board tiles inside that range are played through.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Spot {
    pub down: bool,
    pub lane: i8,
    pub start: i8,
    pub end: i8,
    pub num_tiles: i8,
    // no play here scores more than this
    pub max_score: i16,
}

impl Spot {
    // (row, col) of the first square of the main word.
    #[inline(always)]
    pub fn row_col(&self) -> (i8, i8) {
        if self.down {
            (self.start, self.lane)
        } else {
            (self.lane, self.start)
        }
    }

    #[inline(always)]
    pub fn len(&self) -> i8 {
        self.end - self.start
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Appends every spot for exactly num_tiles tiles in one orientation.
// Each spot is identified by its first new tile, so none repeats.
pub fn find_spots(
    board_snapshot: &movegen::BoardSnapshot,
    cross_cache: &cross_cache::CrossCache,
    rack: &rack::Rack,
    num_tiles: i8,
    down: bool,
    spots: &mut Vec<Spot>,
) {
    if num_tiles <= 0 || num_tiles as u8 > rack.len() {
        return;
    }
    let board_tiles = board_snapshot.board_tiles;
    let game_config = board_snapshot.game_config;
    let alphabet = game_config.alphabet();
    let board_layout = game_config.board_layout();
    let premiums = board_layout.premiums();
    let dim = board_layout.dim();
    let board_is_empty = board_tiles.iter().all(|&tile| tile == 0);
    if board_is_empty && down {
        // first move is only generated across
        return;
    }
    let star = dim.at_row_col(board_layout.star_row(), board_layout.star_col());
    let rack_bits = rack.letter_bits();
    let has_blank = rack.num_blanks() > 0;
    let values = rack.values_descending(alphabet);
    let cross_sets = cross_cache.for_plays(down);
    let bonus = game_config.num_played_bonus(num_tiles);
    let mut coefficients = Vec::with_capacity(num_tiles as usize);

    for lane in 0..dim.num_lanes(down) {
        let strider = dim.lane(down, lane);
        let len = strider.len();
        for first in 0..len {
            if board_tiles[strider.at(first)] != 0 {
                continue;
            }
            let mut start = first;
            let mut through_score = 0i16;
            while start > 0 && board_tiles[strider.at(start - 1)] != 0 {
                start -= 1;
                through_score += alphabet.score(board_tiles[strider.at(start)]) as i16;
            }
            let mut touches = start < first;
            let mut covers_star = false;
            let mut word_multiplier = 1i16;
            let mut cross_score = 0i16;
            let mut num_placed = 0;
            let mut idx = first;
            let mut legal = true;
            coefficients.clear();
            while num_placed < num_tiles {
                if idx >= len {
                    legal = false;
                    break;
                }
                let square = strider.at(idx);
                let b = board_tiles[square];
                idx += 1;
                if b != 0 {
                    through_score += alphabet.score(b) as i16;
                    touches = true;
                    continue;
                }
                let cross_set = cross_sets[square];
                let premium = premiums[square];
                let tile_multiplier = premium.tile_multiplier as i16;
                if cross_set.is_constrained() {
                    if cross_set.bits == 0 || (cross_set.bits & rack_bits == 0 && !has_blank) {
                        legal = false;
                        break;
                    }
                    touches = true;
                    cross_score += cross_set.score * premium.word_multiplier as i16;
                    // (own multiplier, cross word multiplier), main word multiplier comes later
                    coefficients.push((
                        tile_multiplier,
                        tile_multiplier * premium.word_multiplier as i16,
                    ));
                } else {
                    coefficients.push((tile_multiplier, 0));
                }
                covers_star |= square == star;
                word_multiplier *= premium.word_multiplier as i16;
                num_placed += 1;
            }
            if !legal {
                continue;
            }
            while idx < len && board_tiles[strider.at(idx)] != 0 {
                through_score += alphabet.score(board_tiles[strider.at(idx)]) as i16;
                touches = true;
                idx += 1;
            }
            if idx - start < 2 {
                continue;
            }
            if board_is_empty {
                if !covers_star {
                    continue;
                }
            } else if !touches {
                continue;
            }
            if down
                && num_tiles == 1
                && cross_cache.get(true, strider.at(first)).is_constrained()
            {
                // the across spot for this square already makes both words
                continue;
            }

            let mut weights = coefficients
                .iter()
                .map(|&(own, cross)| own * word_multiplier + cross)
                .collect::<Vec<_>>();
            weights.sort_unstable_by(|a, b| b.cmp(a));
            let max_score = weights
                .iter()
                .zip(values.iter())
                .map(|(w, v)| w * v)
                .sum::<i16>()
                + through_score * word_multiplier
                + cross_score
                + bonus;
            spots.push(Spot {
                down,
                lane,
                start,
                end: idx,
                num_tiles,
                max_score,
            });
        }
    }
}
