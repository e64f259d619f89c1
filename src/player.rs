// Copyright (C) 2020-2026 Andy Kurnia.

use super::{anagram, endgame, game_config, game_state, leaves, movegen, simmer};
use rand::prelude::*;

// What a player may look at. Opponent racks are in game_state, strategies
// that should not peek (everything but the endgame) redraw them.
pub struct Position<'a> {
    pub game_state: &'a game_state::GameState<'a>,
    pub index: &'a anagram::AnagramIndex,
    pub leaves: &'a leaves::Leaves,
}

impl<'a> Position<'a> {
    #[inline(always)]
    pub fn game_config(&self) -> &'a game_config::GameConfig<'a> {
        self.game_state.game_config
    }

    #[inline(always)]
    pub fn board_snapshot(&self) -> movegen::BoardSnapshot<'a> {
        movegen::BoardSnapshot {
            board_tiles: &self.game_state.board_tiles,
            game_config: self.game_state.game_config,
            index: self.index,
            leaves: self.leaves,
        }
    }

    #[inline(always)]
    pub fn rack(&self) -> &'a [u8] {
        &self.game_state.current_player().rack
    }
}

pub trait Player {
    // history is every play so far, oldest first.
    fn choose_best_move(&mut self, history: &[movegen::Play], position: &Position) -> movegen::Play;
}

fn gen_moves_for<'m>(
    move_generator: &'m mut Option<movegen::MoveGenerator>,
    position: &Position,
    record: movegen::RecordMode,
) -> &'m movegen::MoveGenerator {
    let move_generator =
        move_generator.get_or_insert_with(|| movegen::MoveGenerator::new(position.game_config()));
    move_generator.gen_moves(&movegen::GenMovesParams {
        board_snapshot: &position.board_snapshot(),
        rack: position.rack(),
        bag_len: position.game_state.bag.len(),
        record,
        include_exchanges: true,
        recompute_crosses: true,
    });
    move_generator
}

// Highest equity now.
#[derive(Default)]
pub struct Greedy {
    move_generator: Option<movegen::MoveGenerator>,
}

impl Player for Greedy {
    fn choose_best_move(&mut self, _history: &[movegen::Play], position: &Position) -> movegen::Play {
        let move_generator =
            gen_moves_for(&mut self.move_generator, position, movegen::RecordMode::Best);
        move_generator.moves()[0].play.clone()
    }
}

pub struct Passer;

impl Player for Passer {
    fn choose_best_move(&mut self, _history: &[movegen::Play], _position: &Position) -> movegen::Play {
        movegen::Play::pass()
    }
}

// Rolls the top candidates forward and keeps the best mean spread.
pub struct Simmer {
    pub num_candidates: usize,
    pub num_plies: usize,
    pub num_iterations: usize,
    rng: rand_chacha::ChaCha20Rng,
    move_generator: Option<movegen::MoveGenerator>,
}

impl Simmer {
    // No seed means a fresh one from the thread rng.
    pub fn new(
        num_candidates: usize,
        num_plies: usize,
        num_iterations: usize,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => rand_chacha::ChaCha20Rng::seed_from_u64(seed),
            None => rand_chacha::ChaCha20Rng::from_rng(&mut rand::rng()),
        };
        Self {
            num_candidates: num_candidates.max(1),
            num_plies,
            num_iterations,
            rng,
            move_generator: None,
        }
    }
}

impl Player for Simmer {
    fn choose_best_move(&mut self, _history: &[movegen::Play], position: &Position) -> movegen::Play {
        let move_generator =
            gen_moves_for(&mut self.move_generator, position, movegen::RecordMode::All);
        let plays = move_generator
            .moves()
            .iter()
            .take(self.num_candidates)
            .map(|valued_move| valued_move.play.clone())
            .collect::<Vec<_>>();
        if plays.len() <= 1 || self.num_iterations == 0 {
            return plays.into_iter().next().unwrap_or_else(movegen::Play::pass);
        }

        let mut simmer = simmer::Simmer::new(position.game_config(), position.index, position.leaves);
        simmer.prepare(position.game_state, self.num_plies);
        let mut candidates = simmer::Simmer::take_candidates(plays.len());
        for sim_iter in 1..=self.num_iterations {
            simmer.prepare_iteration(&mut self.rng);
            for candidate in candidates.iter_mut() {
                simmer.simulate(&mut self.rng, &plays[candidate.play_index]);
                candidate
                    .stats
                    .update(simmer.final_equity_spread() as f64);
            }
            if sim_iter >= 16 && sim_iter % 16 == 0 {
                // 95% confidence interval
                let z = 1.96;
                let low_bar = candidates
                    .iter()
                    .map(|candidate| candidate.stats.ci_max(-z))
                    .fold(f64::NEG_INFINITY, f64::max);
                candidates.retain(|candidate| candidate.stats.ci_max(z) >= low_bar);
                if candidates.len() < 2 {
                    break;
                }
            }
        }
        log::debug!(
            "simmed {} candidates, {} survived",
            plays.len(),
            candidates.len()
        );

        let mut best = &candidates[0];
        for candidate in candidates.iter().skip(1) {
            if candidate.stats.mean() > best.stats.mean() {
                best = candidate;
            }
        }
        plays[best.play_index].clone()
    }
}

// Solves the endgame exactly enough once the bag is empty, greedy before.
pub struct Endgame {
    pub max_depth: u8,
    pub max_width: usize,
    greedy: Greedy,
}

impl Endgame {
    pub fn new(max_depth: u8, max_width: usize) -> Self {
        Self {
            max_depth,
            max_width,
            greedy: Greedy::default(),
        }
    }
}

impl Player for Endgame {
    fn choose_best_move(&mut self, history: &[movegen::Play], position: &Position) -> movegen::Play {
        let game_state = position.game_state;
        if !game_state.bag.is_empty() || game_state.players.len() != 2 {
            return self.greedy.choose_best_move(history, position);
        }
        let mut solver =
            endgame::EndgameSolver::new(position.game_config(), position.index, self.max_width);
        let turn = game_state.turn as usize;
        let solution = solver.solve(
            &game_state.board_tiles,
            [
                &game_state.players[turn].rack,
                &game_state.players[turn ^ 1].rack,
            ],
            self.max_depth,
        );
        solution.play
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum Predicate {
    BagEmpty,
    BagAtMost { n: usize },
    Always,
}

impl Predicate {
    pub fn holds(&self, position: &Position) -> bool {
        match self {
            Predicate::BagEmpty => position.game_state.bag.is_empty(),
            Predicate::BagAtMost { n } => position.game_state.bag.len() <= *n,
            Predicate::Always => true,
        }
    }
}

// The first rule that holds decides who plays.
pub struct Specialized {
    pub rules: Vec<(Predicate, Box<dyn Player>)>,
    pub fallback: Box<dyn Player>,
}

impl Player for Specialized {
    fn choose_best_move(&mut self, history: &[movegen::Play], position: &Position) -> movegen::Play {
        for (predicate, player) in self.rules.iter_mut() {
            if predicate.holds(position) {
                return player.choose_best_move(history, position);
            }
        }
        self.fallback.choose_best_move(history, position)
    }
}
