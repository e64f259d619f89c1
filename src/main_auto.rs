// Copyright (C) 2020-2026 Andy Kurnia.

use kanagram::{anagram, error, game_config, game_state, leaves, lexport, player, registry, stats};
use rand::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[path = "main_auto/scoring_checker.rs"]
mod scoring_checker;

// Per worker, merged at the end.
#[derive(Default)]
struct Tally {
    num_games: u64,
    wins: [u64; 2],
    draws: u64,
    // player 0's final score minus player 1's
    spread: stats::Stats,
    num_checked: u64,
    num_failed: u64,
}

impl Tally {
    fn merge(&mut self, other: &Tally) {
        self.num_games += other.num_games;
        self.wins[0] += other.wins[0];
        self.wins[1] += other.wins[1];
        self.draws += other.draws;
        self.spread.update_bulk(&other.spread);
        self.num_checked += other.num_checked;
        self.num_failed += other.num_failed;
    }
}

struct Shared {
    config: registry::TournamentConfig,
    game_config: game_config::GameConfig<'static>,
    index: anagram::AnagramIndex,
    leaves: leaves::Leaves,
    next_game: AtomicU64,
}

// Returns the final scores by entrant (not by seat).
fn play_game(
    shared: &Shared,
    entrants: &mut [Box<dyn player::Player>; 2],
    first: usize,
    rng: &mut dyn RngCore,
    scoring_checker: &mut scoring_checker::ScoringChecker,
) -> error::Returns<[i16; 2]> {
    let mut game_state = game_state::GameState::new(&shared.game_config);
    game_state.reset_and_draw_tiles(rng);
    let mut history = Vec::new();
    let mut final_scores = [0i16; 2];
    loop {
        let entrant = (game_state.turn as usize + first) % 2;
        let play = {
            let position = player::Position {
                game_state: &game_state,
                index: &shared.index,
                leaves: &shared.leaves,
            };
            let play = entrants[entrant].choose_best_move(&history, &position);
            scoring_checker.check_scoring(&position.board_snapshot(), position.rack(), &play);
            play
        };
        game_state.play(rng, &play)?;
        history.push(play);
        match game_state.check_game_ended(&mut final_scores) {
            game_state::CheckGameEnded::NotEnded => game_state.next_turn(),
            reason => {
                log::debug!("game over after {} turns: {:?}", history.len(), reason);
                break;
            }
        }
    }
    // seat 0 was entrant `first`
    if first == 0 {
        Ok(final_scores)
    } else {
        Ok([final_scores[1], final_scores[0]])
    }
}

fn worker(shared: &Shared, worker_num: usize) -> error::Returns<Tally> {
    let registry = registry::Registry::with_builtin_players();
    let mut entrants = [
        registry.make_player(&shared.config.players[0])?,
        registry.make_player(&shared.config.players[1])?,
    ];
    let mut scoring_checker = scoring_checker::ScoringChecker::new();
    let mut tally = Tally::default();
    loop {
        let game_num = shared.next_game.fetch_add(1, Ordering::Relaxed);
        if game_num >= shared.config.num_games {
            break;
        }
        // seeded games are reproducible whichever worker plays them
        let mut rng = match shared.config.seed {
            Some(seed) => rand_chacha::ChaCha20Rng::seed_from_u64(seed.wrapping_add(game_num)),
            None => rand_chacha::ChaCha20Rng::from_rng(&mut rand::rng()),
        };
        // alternate who goes first
        let first = (game_num % 2) as usize;
        let scores = play_game(shared, &mut entrants, first, &mut rng, &mut scoring_checker)?;
        log::info!(
            "worker {} game {}: {} to {}",
            worker_num,
            game_num,
            scores[0],
            scores[1]
        );
        tally.num_games += 1;
        match scores[0].cmp(&scores[1]) {
            std::cmp::Ordering::Greater => tally.wins[0] += 1,
            std::cmp::Ordering::Less => tally.wins[1] += 1,
            std::cmp::Ordering::Equal => tally.draws += 1,
        }
        tally.spread.update((scores[0] - scores[1]) as f64);
    }
    tally.num_checked = scoring_checker.num_checked;
    tally.num_failed = scoring_checker.num_failed;
    Ok(tally)
}

pub fn main() -> error::Returns<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .map_err(|e| e.to_string())?;
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() != 2 {
        return Err("usage: auto <tournament.json>".into());
    }
    let config = registry::TournamentConfig::from_path(&args[1])?;
    // fail early on bad player specs
    {
        let registry = registry::Registry::with_builtin_players();
        for spec in config.players.iter() {
            registry.make_player(spec)?;
        }
    }

    let game_config = game_config::make_english_game_config();
    let index = lexport::load_index(game_config.alphabet(), &config.words)?;
    let leaves = match &config.leaves {
        Some(path) => leaves::Leaves::from_csv_path(game_config.alphabet(), path)?,
        None => leaves::Leaves::empty(),
    };
    let num_threads = config.num_threads();
    let shared = Arc::new(Shared {
        config,
        game_config,
        index,
        leaves,
        next_game: AtomicU64::new(0),
    });

    let t0 = std::time::Instant::now();
    let mut handles = Vec::with_capacity(num_threads);
    for worker_num in 0..num_threads {
        let shared = Arc::clone(&shared);
        handles.push(std::thread::spawn(move || {
            worker(&shared, worker_num).map_err(|e| e.to_string())
        }));
    }
    let mut total = Tally::default();
    for handle in handles {
        match handle.join() {
            Ok(result) => total.merge(&result?),
            Err(_) => return Err("worker panicked".into()),
        }
    }

    let names = [
        &shared.config.players[0].tag,
        &shared.config.players[1].tag,
    ];
    println!(
        "{} games on {} threads in {:?}",
        total.num_games,
        num_threads,
        t0.elapsed()
    );
    println!(
        "p1 ({}) won {}, p2 ({}) won {}, {} draws",
        names[0], total.wins[0], names[1], total.wins[1], total.draws
    );
    println!(
        "spread for p1: mean {:.2}, sd {:.2}",
        total.spread.mean(),
        total.spread.standard_deviation()
    );
    println!(
        "scoring checker: {} plays, {} mismatches",
        total.num_checked, total.num_failed
    );
    if total.num_failed != 0 {
        return Err(format!("{} plays failed the scoring checker", total.num_failed).into());
    }
    Ok(())
}
