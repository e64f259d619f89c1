// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, bag, error, game_config, movegen, play_scorer};
use rand::prelude::*;

fn use_tiles<II: IntoIterator<Item = u8>>(
    rack: &mut Vec<u8>,
    tiles_iter: II,
) -> error::Returns<()> {
    for tile in tiles_iter {
        match rack.iter().rposition(|&t| t == tile) {
            Some(pos) => {
                rack.swap_remove(pos);
            }
            None => {
                return_error!(BadTile, format!("tile {} is not on the rack", tile));
            }
        }
    }
    Ok(())
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GamePlayer {
    pub score: i16,
    pub rack: Vec<u8>,
}

impl GamePlayer {
    pub fn rack_value(&self, alphabet: &alphabet::Alphabet) -> i16 {
        self.rack
            .iter()
            .map(|&tile| alphabet.score(tile) as i16)
            .sum()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CheckGameEnded {
    NotEnded,
    PlayedOut,
    ZeroScores,
}

// Everything GameState::play changed, to put it back.
pub struct UndoRecord {
    turn: u8,
    zero_turns: u8,
    score: i16,
    rack: Vec<u8>,
    bag: Vec<u8>,
    placed: Vec<usize>,
}

pub struct GameState<'a> {
    pub game_config: &'a game_config::GameConfig<'a>,
    pub players: Box<[GamePlayer]>,
    pub board_tiles: Box<[u8]>,
    pub bag: bag::Bag,
    pub turn: u8,
    // consecutive turns scoring nothing
    pub zero_turns: u8,
}

impl Clone for GameState<'_> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            game_config: self.game_config,
            players: self.players.clone(),
            board_tiles: self.board_tiles.clone(),
            bag: self.bag.clone(),
            turn: self.turn,
            zero_turns: self.zero_turns,
        }
    }

    #[inline(always)]
    fn clone_from(&mut self, source: &Self) {
        self.game_config = source.game_config;
        self.players.clone_from(&source.players);
        self.board_tiles.clone_from(&source.board_tiles);
        self.bag.clone_from(&source.bag);
        self.turn = source.turn;
        self.zero_turns = source.zero_turns;
    }
}

impl<'a> GameState<'a> {
    pub fn new(game_config: &'a game_config::GameConfig) -> Self {
        let rack_size = game_config.rack_size() as usize;
        Self {
            game_config,
            players: (0..game_config.num_players())
                .map(|_| GamePlayer {
                    score: 0,
                    rack: Vec::with_capacity(rack_size),
                })
                .collect(),
            board_tiles: vec![0u8; game_config.board_layout().dim().area()].into_boxed_slice(),
            bag: bag::Bag::new(game_config.alphabet()),
            turn: 0,
            zero_turns: 0,
        }
    }

    // Fresh game: empty board, shuffled full bag, full racks.
    pub fn reset_and_draw_tiles(&mut self, rng: &mut dyn RngCore) {
        self.board_tiles.iter_mut().for_each(|m| *m = 0);
        self.bag = bag::Bag::new(self.game_config.alphabet());
        self.bag.shuffle(rng);
        let rack_size = self.game_config.rack_size() as usize;
        for player in self.players.iter_mut() {
            player.score = 0;
            player.rack.clear();
            self.bag.replenish(&mut player.rack, rack_size);
        }
        self.turn = 0;
        self.zero_turns = 0;
    }

    #[inline(always)]
    pub fn current_player(&self) -> &GamePlayer {
        &self.players[self.turn as usize]
    }

    // Applies the play for the player to move, without passing the turn.
    // The rack is left untouched if it lacks a tile.
    pub fn play(
        &mut self,
        rng: &mut dyn RngCore,
        play: &movegen::Play,
    ) -> error::Returns<UndoRecord> {
        let rack_size = self.game_config.rack_size() as usize;
        let current_player = &mut self.players[self.turn as usize];
        let mut new_rack = current_player.rack.clone();
        use_tiles(&mut new_rack, play_scorer::tiles_used(play))?;
        let mut undo_record = UndoRecord {
            turn: self.turn,
            zero_turns: self.zero_turns,
            score: current_player.score,
            rack: std::mem::replace(&mut current_player.rack, new_rack),
            bag: self.bag.0.clone(),
            placed: Vec::new(),
        };
        match play {
            movegen::Play::Exchange { tiles } => {
                if !tiles.is_empty() {
                    self.bag.replenish(&mut current_player.rack, rack_size);
                    self.bag.put_back(rng, tiles);
                }
            }
            movegen::Play::Place {
                down,
                lane,
                idx,
                word,
                score,
            } => {
                let strider = self.game_config.board_layout().dim().lane(*down, *lane);
                for (i, &tile) in (*idx..).zip(word.iter()) {
                    if tile != 0 {
                        let square = strider.at(i);
                        self.board_tiles[square] = tile;
                        undo_record.placed.push(square);
                    }
                }
                current_player.score += score;
                self.bag.replenish(&mut current_player.rack, rack_size);
            }
        }
        if play.score() == 0 {
            self.zero_turns = self.zero_turns.saturating_add(1);
        } else {
            self.zero_turns = 0;
        }
        Ok(undo_record)
    }

    // Reverses the latest play (and any next_turn after it).
    pub fn undo(&mut self, undo_record: UndoRecord) {
        for square in undo_record.placed {
            self.board_tiles[square] = 0;
        }
        self.turn = undo_record.turn;
        self.zero_turns = undo_record.zero_turns;
        let player = &mut self.players[self.turn as usize];
        player.score = undo_record.score;
        player.rack = undo_record.rack;
        self.bag.0 = undo_record.bag;
    }

    pub fn next_turn(&mut self) {
        let num_players = self.players.len() as u8;
        self.turn += 1;
        self.turn -= num_players & -((self.turn >= num_players) as i8) as u8;
    }

    // final_scores is filled in when the game has ended.
    pub fn check_game_ended(&self, final_scores: &mut [i16]) -> CheckGameEnded {
        let alphabet = self.game_config.alphabet();
        let played_out = if self.bag.is_empty() {
            self.players.iter().position(|player| player.rack.is_empty())
        } else {
            None
        };
        let ret = if played_out.is_some() {
            CheckGameEnded::PlayedOut
        } else if self.zero_turns >= self.game_config.num_zeros_to_end() {
            CheckGameEnded::ZeroScores
        } else {
            return CheckGameEnded::NotEnded;
        };
        let mut total_rack_value = 0;
        for (final_score, player) in final_scores.iter_mut().zip(self.players.iter()) {
            let rack_value = player.rack_value(alphabet);
            total_rack_value += rack_value;
            *final_score = player.score - rack_value;
        }
        if let Some(winner) = played_out {
            final_scores[winner] += total_rack_value;
        }
        ret
    }
}
