// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, cross_cache, movegen};

#[inline(always)]
pub fn equity(score: i16, leave_value: f32) -> f32 {
    score as f32 + leave_value
}

// Generator scoring: the layout for premiums, the cross cache for the
// perpendicular words. word has 0 for played-through squares.
pub fn score_place(
    board_snapshot: &movegen::BoardSnapshot,
    cross_cache: &cross_cache::CrossCache,
    down: bool,
    lane: i8,
    idx: i8,
    word: &[u8],
) -> i16 {
    let game_config = board_snapshot.game_config;
    let alphabet = game_config.alphabet();
    let board_layout = game_config.board_layout();
    let premiums = board_layout.premiums();
    let strider = board_layout.dim().lane(down, lane);
    let cross_sets = cross_cache.for_plays(down);
    let mut main_score = 0i16;
    let mut word_multiplier = 1i16;
    let mut perpendicular_score = 0i16;
    let mut num_played = 0i8;
    for (i, &tile) in (idx..).zip(word) {
        let square = strider.at(i);
        if tile == 0 {
            main_score += alphabet.score(board_snapshot.board_tiles[square]) as i16;
            continue;
        }
        let premium = premiums[square];
        // blanks carry the mark, so they score as the blank
        let tile_value = alphabet.score(tile) as i16 * premium.tile_multiplier as i16;
        main_score += tile_value;
        word_multiplier *= premium.word_multiplier as i16;
        let cross_set = cross_sets[square];
        if cross_set.is_constrained() {
            perpendicular_score +=
                (cross_set.score + tile_value) * premium.word_multiplier as i16;
        }
        num_played += 1;
    }
    main_score * word_multiplier + perpendicular_score + game_config.num_played_bonus(num_played)
}

pub struct PlayScorer {
    word_buffer: Vec<u8>,
}

impl PlayScorer {
    pub fn new() -> Self {
        Self {
            word_buffer: Vec::new(),
        }
    }

    // Every word formed is known and the tiles fit on the board as given.
    // Does not look at the rack.
    pub fn play_is_valid(
        &mut self,
        board_snapshot: &movegen::BoardSnapshot,
        play: &movegen::Play,
    ) -> bool {
        let (down, lane, idx, word) = match play {
            movegen::Play::Exchange { .. } => return true,
            movegen::Play::Place {
                down,
                lane,
                idx,
                word,
                ..
            } => (*down, *lane, *idx, &word[..]),
        };
        let game_config = board_snapshot.game_config;
        let board_layout = game_config.board_layout();
        let dim = board_layout.dim();
        let board_tiles = board_snapshot.board_tiles;
        let index = board_snapshot.index;
        if lane < 0 || lane >= dim.num_lanes(down) || idx < 0 {
            return false;
        }
        let strider = dim.lane(down, lane);
        let end = idx as isize + word.len() as isize;
        if word.len() < 2 || end > strider.len() as isize {
            return false;
        }
        let end = end as i8;
        if (idx > 0 && board_tiles[strider.at(idx - 1)] != 0)
            || (end < strider.len() && board_tiles[strider.at(end)] != 0)
        {
            return false;
        }

        let board_is_empty = board_tiles.iter().all(|&tile| tile == 0);
        let star = dim.at_row_col(board_layout.star_row(), board_layout.star_col());
        let mut num_played = 0;
        let mut connected = false;
        self.word_buffer.clear();
        for (i, &tile) in (idx..).zip(word) {
            let b = board_tiles[strider.at(i)];
            if (tile == 0) == (b == 0) {
                return false;
            }
            if tile == 0 {
                connected = true;
                self.word_buffer.push(b);
            } else {
                num_played += 1;
                connected |= board_is_empty && strider.at(i) == star;
                self.word_buffer.push(tile);
            }
        }
        if num_played == 0 || !index.contains_word(&self.word_buffer) {
            return false;
        }

        for (i, &tile) in (idx..).zip(word) {
            if tile == 0 {
                continue;
            }
            let perpendicular_strider = dim.lane(!down, i);
            let mut j = lane;
            while j > 0 && board_tiles[perpendicular_strider.at(j - 1)] != 0 {
                j -= 1;
            }
            self.word_buffer.clear();
            for k in j..perpendicular_strider.len() {
                let b = if k == lane {
                    tile
                } else {
                    board_tiles[perpendicular_strider.at(k)]
                };
                if b == 0 {
                    break;
                }
                self.word_buffer.push(b);
            }
            if self.word_buffer.len() >= 2 {
                connected = true;
                if !index.contains_word(&self.word_buffer) {
                    return false;
                }
            }
        }
        connected
    }

    // Independent of the cross cache: walks the board around each tile.
    // Assumes the play is valid.
    pub fn recount_score(
        &mut self,
        board_snapshot: &movegen::BoardSnapshot,
        play: &movegen::Play,
    ) -> i16 {
        let game_config = board_snapshot.game_config;

        let mut recounted_score = 0;
        match &play {
            movegen::Play::Exchange { .. } => {}
            movegen::Play::Place {
                down,
                lane,
                idx,
                word,
                ..
            } => {
                let alphabet = game_config.alphabet();
                let board_layout = game_config.board_layout();
                let premiums = board_layout.premiums();
                let dim = board_layout.dim();
                let strider = dim.lane(*down, *lane);
                let mut num_played = 0;

                {
                    let mut word_multiplier = 1;
                    let mut word_score = 0i16;
                    for (i, &tile) in (*idx..).zip(word.iter()) {
                        let strider_at_i = strider.at(i);
                        let premium = premiums[strider_at_i];
                        let (placed_tile, tile_multiplier) = if tile != 0 {
                            num_played += 1;
                            word_multiplier *= premium.word_multiplier;
                            (tile, premium.tile_multiplier)
                        } else {
                            (board_snapshot.board_tiles[strider_at_i], 1)
                        };
                        word_score += alphabet.score(placed_tile) as i16 * tile_multiplier as i16;
                    }
                    recounted_score += word_score * word_multiplier as i16;
                }

                for (i, &tile) in (*idx..).zip(word.iter()) {
                    if tile == 0 {
                        continue;
                    }
                    let perpendicular_strider = dim.lane(!*down, i);
                    let mut j = *lane;
                    while j > 0 && board_snapshot.board_tiles[perpendicular_strider.at(j - 1)] != 0
                    {
                        j -= 1;
                    }
                    let perpendicular_strider_len = perpendicular_strider.len();
                    if j == *lane
                        && (j + 1 >= perpendicular_strider_len
                            || board_snapshot.board_tiles[perpendicular_strider.at(j + 1)] == 0)
                    {
                        // no perpendicular tile
                        continue;
                    }
                    let mut word_multiplier = 1;
                    let mut word_score = 0i16;
                    for j in j..perpendicular_strider_len {
                        let perpendicular_strider_at_j = perpendicular_strider.at(j);
                        let premium = premiums[perpendicular_strider_at_j];
                        let (placed_tile, tile_multiplier) = if j == *lane {
                            word_multiplier *= premium.word_multiplier;
                            (tile, premium.tile_multiplier)
                        } else {
                            (board_snapshot.board_tiles[perpendicular_strider_at_j], 1)
                        };
                        if placed_tile == 0 {
                            break;
                        }
                        word_score += alphabet.score(placed_tile) as i16 * tile_multiplier as i16;
                    }
                    recounted_score += word_score * word_multiplier as i16;
                }
                recounted_score += game_config.num_played_bonus(num_played);
            }
        };

        recounted_score
    }
}

impl Default for PlayScorer {
    fn default() -> Self {
        Self::new()
    }
}

// Tiles a play takes from the rack, blanks as the blank.
pub fn tiles_used(play: &movegen::Play) -> impl Iterator<Item = u8> + '_ {
    let tiles: &[u8] = match play {
        movegen::Play::Exchange { tiles } => tiles,
        movegen::Play::Place { word, .. } => word,
    };
    let is_place = matches!(play, movegen::Play::Place { .. });
    tiles.iter().filter_map(move |&tile| {
        if is_place && tile == 0 {
            None
        } else if tile & alphabet::BLANK_MARK != 0 {
            Some(alphabet::BLANK)
        } else {
            Some(tile)
        }
    })
}
