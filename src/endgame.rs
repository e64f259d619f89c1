// Copyright (C) 2020-2026 Andy Kurnia.

// Depth-limited two-player endgame search, for when both racks are known.

use super::{anagram, cross_cache, game_config, leaves, movegen, play_scorer};

// Best line found for the side to move.
#[derive(Clone, Debug)]
pub struct Solution {
    // spread gained from here on, for the side to move
    pub value: i16,
    pub play: movegen::Play,
}

// per-ply. The generator's cross cache doubles as this node's saved state.
struct PlyBuffer {
    move_generator: movegen::MoveGenerator,
    candidates: Vec<movegen::Play>,
    placed: Vec<usize>,
}

pub struct EndgameSolver<'a> {
    game_config: &'a game_config::GameConfig<'a>,
    index: &'a anagram::AnagramIndex,
    no_leaves: leaves::Leaves,
    max_width: usize,
    board_tiles: Vec<u8>,
    // matches board_tiles at every node
    cross_cache: cross_cache::CrossCache,
    racks: [Vec<u8>; 2],
    ply_buffers: Vec<PlyBuffer>,
    num_nodes: u64,
}

impl<'a> EndgameSolver<'a> {
    // max_width caps the placements tried per node, highest scores first.
    pub fn new(
        game_config: &'a game_config::GameConfig<'a>,
        index: &'a anagram::AnagramIndex,
        max_width: usize,
    ) -> Self {
        Self {
            game_config,
            index,
            no_leaves: leaves::Leaves::empty(),
            max_width: max_width.max(1),
            board_tiles: Vec::new(),
            cross_cache: cross_cache::CrossCache::new(game_config.board_layout().dim()),
            racks: [Vec::new(), Vec::new()],
            ply_buffers: Vec::new(),
            num_nodes: 0,
        }
    }

    #[inline(always)]
    pub fn num_nodes(&self) -> u64 {
        self.num_nodes
    }

    // racks[0] is the side to move. Needs 2 players.
    pub fn solve(&mut self, board_tiles: &[u8], racks: [&[u8]; 2], max_depth: u8) -> Solution {
        self.board_tiles.clear();
        self.board_tiles.extend_from_slice(board_tiles);
        self.cross_cache.cache_crosses_and_scores(
            self.game_config.alphabet(),
            self.index,
            &self.board_tiles,
        );
        for (dst, src) in self.racks.iter_mut().zip(racks) {
            dst.clear();
            dst.extend_from_slice(src);
        }
        self.num_nodes = 0;
        let (value, play) = self.negamax(max_depth.max(1), 0, i32::MIN + 1, i32::MAX, false);
        log::debug!(
            "endgame: depth {} searched {} nodes, value {}",
            max_depth,
            self.num_nodes,
            value
        );
        Solution {
            value: value as i16,
            play: play.unwrap_or_else(movegen::Play::pass),
        }
    }

    fn rack_value(&self, who: usize) -> i32 {
        let alphabet = self.game_config.alphabet();
        self.racks[who]
            .iter()
            .map(|&tile| alphabet.score(tile) as i32)
            .sum()
    }

    fn negamax(
        &mut self,
        depth: u8,
        who: usize,
        mut alpha: i32,
        beta: i32,
        opponent_passed: bool,
    ) -> (i32, Option<movegen::Play>) {
        self.num_nodes += 1;
        // each side loses what it holds if play stops here
        let stop_value = self.rack_value(who ^ 1) - self.rack_value(who);
        if depth == 0 {
            return (stop_value, None);
        }

        let mut ply_buffer = self.ply_buffers.pop().unwrap_or_else(|| PlyBuffer {
            move_generator: movegen::MoveGenerator::new(self.game_config),
            candidates: Vec::new(),
            placed: Vec::new(),
        });
        ply_buffer
            .move_generator
            .cross_cache_mut()
            .clone_from(&self.cross_cache);
        ply_buffer.move_generator.gen_moves(&movegen::GenMovesParams {
            board_snapshot: &movegen::BoardSnapshot {
                board_tiles: &self.board_tiles,
                game_config: self.game_config,
                index: self.index,
                leaves: &self.no_leaves,
            },
            rack: &self.racks[who],
            bag_len: 0,
            record: movegen::RecordMode::All,
            include_exchanges: false,
            recompute_crosses: false,
        });
        ply_buffer.candidates.clear();
        ply_buffer.candidates.extend(
            ply_buffer
                .move_generator
                .moves()
                .iter()
                .filter(|valued_move| !valued_move.play.is_pass())
                .take(self.max_width)
                .map(|valued_move| valued_move.play.clone()),
        );

        let dim = self.game_config.board_layout().dim();
        let opponent_rack_value = self.rack_value(who ^ 1);
        let mut best_value = i32::MIN;
        let mut best_play = None;
        for candidate in ply_buffer.candidates.iter() {
            let movegen::Play::Place {
                down,
                lane,
                idx,
                word,
                score,
            } = candidate
            else {
                continue;
            };
            let saved_rack = self.racks[who].clone();
            for tile in play_scorer::tiles_used(candidate) {
                if let Some(pos) = self.racks[who].iter().rposition(|&t| t == tile) {
                    self.racks[who].swap_remove(pos);
                }
            }
            ply_buffer.placed.clear();
            let strider = dim.lane(*down, *lane);
            for (i, &tile) in (*idx..).zip(word.iter()) {
                if tile != 0 {
                    let square = strider.at(i);
                    self.board_tiles[square] = tile;
                    ply_buffer.placed.push(square);
                }
            }
            let score = *score as i32;
            let value = if self.racks[who].is_empty() {
                // going out collects twice the other rack
                score + 2 * opponent_rack_value
            } else {
                self.cross_cache.update_after_play(
                    self.game_config.alphabet(),
                    self.index,
                    &self.board_tiles,
                    *down,
                    *lane,
                    *idx,
                    word,
                );
                let value = score
                    - self
                        .negamax(
                            depth - 1,
                            who ^ 1,
                            score.saturating_sub(beta),
                            score.saturating_sub(alpha),
                            false,
                        )
                        .0;
                self.cross_cache
                    .clone_from(ply_buffer.move_generator.cross_cache());
                value
            };
            for &square in ply_buffer.placed.iter() {
                self.board_tiles[square] = 0;
            }
            self.racks[who] = saved_rack;
            if value > best_value {
                best_value = value;
                best_play = Some(candidate.clone());
            }
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }

        if alpha < beta {
            // passing twice in a row ends the game
            let pass_value = if opponent_passed {
                stop_value
            } else {
                -self.negamax(depth - 1, who ^ 1, -beta, -alpha, true).0
            };
            if pass_value > best_value {
                best_value = pass_value;
                best_play = Some(movegen::Play::pass());
            }
        }

        self.ply_buffers.push(ply_buffer);
        (best_value, best_play)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn goes_out_when_it_can() {
        let game_config = game_config::make_english_game_config();
        let dim = game_config.board_layout().dim();
        let index = test_support::small_index();
        let mut board_tiles = vec![0u8; dim.area()];
        test_support::place_word(&mut board_tiles, dim, false, 7, 7, "QI");
        let mut solver = EndgameSolver::new(&game_config, &index, 20);
        let s = test_support::tiles("S");
        let zz = test_support::tiles("ZZ");
        let solution = solver.solve(&board_tiles, [&s, &zz], 3);
        // QIS for 12, plus twice the ZZ left over
        assert_eq!(solution.value, 12 + 2 * 20);
        match &solution.play {
            movegen::Play::Place { word, score, .. } => {
                assert_eq!(*score, 12);
                assert_eq!(word.iter().filter(|&&t| t != 0).count(), 1);
            }
            movegen::Play::Exchange { .. } => panic!("expected QIS"),
        }
        assert!(solver.num_nodes() > 0);
    }

    #[test]
    fn stuck_racks_pass_out() {
        let game_config = game_config::make_english_game_config();
        let dim = game_config.board_layout().dim();
        let index = test_support::small_index();
        let mut board_tiles = vec![0u8; dim.area()];
        test_support::place_word(&mut board_tiles, dim, false, 7, 7, "QI");
        let mut solver = EndgameSolver::new(&game_config, &index, 20);
        let vv = test_support::tiles("VV");
        let j = test_support::tiles("J");
        let solution = solver.solve(&board_tiles, [&vv, &j], 4);
        assert!(solution.play.is_pass());
        // each loses their own rack: -8 for VV, +8 for the J
        assert_eq!(solution.value, 8 - 8);
        let solution = solver.solve(&board_tiles, [&j, &vv], 4);
        assert_eq!(solution.value, 0);

        let z = test_support::tiles("Z");
        let solution = solver.solve(&board_tiles, [&vv, &z], 4);
        assert_eq!(solution.value, 10 - 8);
    }

    #[test]
    fn searches_return_legal_plays() {
        let game_config = game_config::make_english_game_config();
        let dim = game_config.board_layout().dim();
        let index = test_support::small_index();
        let mut board_tiles = vec![0u8; dim.area()];
        test_support::place_word(&mut board_tiles, dim, false, 7, 7, "NOTE");
        let mut solver = EndgameSolver::new(&game_config, &index, 8);
        let mine = test_support::tiles("SAT");
        let theirs = test_support::tiles("EH");
        let shallow = solver.solve(&board_tiles, [&mine, &theirs], 1);
        let deep = solver.solve(&board_tiles, [&mine, &theirs], 3);
        // NOTES for 6 and 2 less on the rack beats passing
        assert!(!shallow.play.is_pass());
        assert!(shallow.value >= 6 + 3);
        let mut play_scorer = play_scorer::PlayScorer::new();
        let board_snapshot = movegen::BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            index: &index,
            leaves: &leaves::Leaves::empty(),
        };
        assert!(play_scorer.play_is_valid(&board_snapshot, &deep.play));
    }

    #[test]
    fn crosses_are_restored_after_search() {
        let game_config = game_config::make_english_game_config();
        let dim = game_config.board_layout().dim();
        let index = test_support::small_index();
        let mut board_tiles = vec![0u8; dim.area()];
        test_support::place_word(&mut board_tiles, dim, false, 7, 7, "NOTE");
        let mut rebuilt = cross_cache::CrossCache::new(dim);
        rebuilt.cache_crosses_and_scores(game_config.alphabet(), &index, &board_tiles);
        let mut solver = EndgameSolver::new(&game_config, &index, 8);
        let mine = test_support::tiles("SAT");
        let theirs = test_support::tiles("EHS");
        let solution = solver.solve(&board_tiles, [&mine, &theirs], 4);
        assert!(solver.num_nodes() > 1);
        assert_eq!(solver.board_tiles, board_tiles);
        assert_eq!(solver.cross_cache.for_plays(false), rebuilt.for_plays(false));
        assert_eq!(solver.cross_cache.for_plays(true), rebuilt.for_plays(true));
        // each searched line was generated from up to date crosses
        let mut play_scorer = play_scorer::PlayScorer::new();
        let board_snapshot = movegen::BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            index: &index,
            leaves: &leaves::Leaves::empty(),
        };
        assert!(play_scorer.play_is_valid(&board_snapshot, &solution.play));
        if let movegen::Play::Place { score, .. } = &solution.play {
            assert_eq!(*score, play_scorer.recount_score(&board_snapshot, &solution.play));
        }
    }
}
