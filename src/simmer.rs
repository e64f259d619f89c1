// Copyright (C) 2020-2026 Andy Kurnia.

use super::{anagram, cross_cache, game_config, game_state, leaves, movegen, play_scorer, stats};
use rand::prelude::*;

fn set_rack_tally_from_leave(rack_tally: &mut [u8], rack: &[u8], play: &movegen::Play) {
    rack_tally.iter_mut().for_each(|m| *m = 0);
    rack.iter().for_each(|&tile| rack_tally[tile as usize] += 1);
    play_scorer::tiles_used(play).for_each(|tile| rack_tally[tile as usize] -= 1);
}

pub struct Candidate {
    pub play_index: usize,
    pub stats: stats::Stats,
}

// Plays candidates forward greedily for a few plies against redrawn
// opponent racks, from the point of view of the player to move.
pub struct Simmer<'a> {
    index: &'a anagram::AnagramIndex,
    leaves: &'a leaves::Leaves,

    // prepare() sets/resets these
    initial_game_state: game_state::GameState<'a>,
    initial_cross_cache: cross_cache::CrossCache,
    pub initial_score_spread: i16,
    num_sim_plies: usize,

    // simulate() simulates a single iteration and sets these
    game_state: game_state::GameState<'a>,
    last_seen_leave_values: Box<[f32]>,
    final_scores: Box<[i16]>,

    // simulate() reuses these internally
    move_generator: movegen::MoveGenerator,
    rack_tally: Box<[u8]>,
    opponent_rack_lens: Box<[usize]>,
}

impl<'a> Simmer<'a> {
    pub fn new(
        game_config: &'a game_config::GameConfig,
        index: &'a anagram::AnagramIndex,
        leaves: &'a leaves::Leaves,
    ) -> Self {
        let num_players = game_config.num_players() as usize;
        Self {
            index,
            leaves,
            initial_game_state: game_state::GameState::new(game_config),
            initial_cross_cache: cross_cache::CrossCache::new(game_config.board_layout().dim()),
            initial_score_spread: 0,
            num_sim_plies: 0,
            game_state: game_state::GameState::new(game_config),
            last_seen_leave_values: vec![0.0f32; num_players].into_boxed_slice(),
            final_scores: vec![0; num_players].into_boxed_slice(),
            move_generator: movegen::MoveGenerator::new(game_config),
            rack_tally: vec![0u8; game_config.alphabet().len() as usize].into_boxed_slice(),
            opponent_rack_lens: vec![0; num_players].into_boxed_slice(),
        }
    }

    pub fn prepare(&mut self, game_state: &game_state::GameState<'a>, num_sim_plies: usize) {
        self.initial_game_state.clone_from(game_state);
        self.initial_cross_cache.cache_crosses_and_scores(
            game_state.game_config.alphabet(),
            self.index,
            &game_state.board_tiles,
        );
        self.initial_score_spread = game_state.current_player().score
            - (0..)
                .zip(game_state.players.iter())
                .filter(|&(i, _)| i != game_state.turn)
                .map(|(_, player)| player.score)
                .max()
                .unwrap_or(0);
        self.num_sim_plies = num_sim_plies;
    }

    #[inline(always)]
    pub fn take_candidates(num_plays: usize) -> Vec<Candidate> {
        (0..num_plays)
            .map(|play_index| Candidate {
                play_index,
                stats: stats::Stats::new(),
            })
            .collect()
    }

    // The player to move cannot see the other racks, so they are redrawn.
    pub fn prepare_iteration(&mut self, rng: &mut dyn RngCore) {
        let initial_turn = self.initial_game_state.turn as usize;
        let game_state = &mut self.initial_game_state;
        for (i, player) in game_state.players.iter_mut().enumerate() {
            if i != initial_turn {
                self.opponent_rack_lens[i] = player.rack.len();
                game_state.bag.0.extend_from_slice(&player.rack);
                player.rack.clear();
            }
        }
        game_state.bag.shuffle(rng);
        for (i, player) in game_state.players.iter_mut().enumerate() {
            if i != initial_turn {
                game_state
                    .bag
                    .replenish(&mut player.rack, self.opponent_rack_lens[i]);
            }
        }
    }

    fn apply(&mut self, rng: &mut dyn RngCore, play: &movegen::Play) {
        set_rack_tally_from_leave(
            &mut self.rack_tally,
            &self.game_state.current_player().rack,
            play,
        );
        let game_config = self.game_state.game_config;
        let alphabet = game_config.alphabet();
        self.last_seen_leave_values[self.game_state.turn as usize] =
            self.leaves.value_of_tally(alphabet, &self.rack_tally);
        // candidates come from the same rack, so this only fails on a bug
        if let Err(err) = self.game_state.play(rng, play) {
            panic!("simulated play {:?} does not fit the rack: {}", play, err);
        }
        if let movegen::Play::Place {
            down,
            lane,
            idx,
            word,
            ..
        } = play
        {
            self.move_generator.cross_cache_mut().update_after_play(
                alphabet,
                self.index,
                &self.game_state.board_tiles,
                *down,
                *lane,
                *idx,
                word,
            );
        }
    }

    // true iff the game ended
    pub fn simulate(&mut self, rng: &mut dyn RngCore, candidate_play: &movegen::Play) -> bool {
        self.game_state.clone_from(&self.initial_game_state);
        self.move_generator
            .cross_cache_mut()
            .clone_from(&self.initial_cross_cache);
        self.last_seen_leave_values
            .iter_mut()
            .for_each(|m| *m = 0.0);
        let mut next_play = movegen::Play::pass();
        for ply in 0..=self.num_sim_plies {
            if ply == 0 {
                next_play.clone_from(candidate_play);
            } else {
                let game_state = &self.game_state;
                self.move_generator.gen_moves(&movegen::GenMovesParams {
                    board_snapshot: &movegen::BoardSnapshot {
                        board_tiles: &game_state.board_tiles,
                        game_config: game_state.game_config,
                        index: self.index,
                        leaves: self.leaves,
                    },
                    rack: &game_state.current_player().rack,
                    bag_len: game_state.bag.len(),
                    record: movegen::RecordMode::Best,
                    include_exchanges: true,
                    recompute_crosses: false,
                });
                next_play.clone_from(&self.move_generator.moves()[0].play);
            }
            self.apply(rng, &next_play);
            match self.game_state.check_game_ended(&mut self.final_scores) {
                game_state::CheckGameEnded::NotEnded => {}
                _ => {
                    // leaves are now part of the final scores
                    for (player, &final_score) in
                        self.game_state.players.iter_mut().zip(self.final_scores.iter())
                    {
                        player.score = final_score;
                    }
                    self.last_seen_leave_values
                        .iter_mut()
                        .for_each(|m| *m = 0.0);
                    return true;
                }
            }
            self.game_state.next_turn();
        }
        false
    }

    // Own score and leave minus the best opponent's, relative to the start.
    pub fn final_equity_spread(&self) -> f32 {
        let initial_turn = self.initial_game_state.turn;
        let mut best_opponent_equity = f32::NEG_INFINITY;
        for (i, player) in (0..).zip(self.game_state.players.iter()) {
            if i != initial_turn {
                let opponent_equity = player.score as f32 + self.last_seen_leave_values[i as usize];
                if opponent_equity > best_opponent_equity {
                    best_opponent_equity = opponent_equity;
                }
            }
        }
        let mut this_equity = self.game_state.players[initial_turn as usize].score as f32
            + self.last_seen_leave_values[initial_turn as usize];
        if best_opponent_equity != f32::NEG_INFINITY {
            this_equity -= best_opponent_equity;
        }
        this_equity - self.initial_score_spread as f32
    }
}
