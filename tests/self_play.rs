// Copyright (C) 2020-2026 Andy Kurnia.

mod common;

use kanagram::player::Player;
use kanagram::{game_config, game_state, leaves, movegen, play_scorer, player, registry};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

fn num_tiles_in_play(game_state: &game_state::GameState) -> usize {
    game_state.bag.len()
        + game_state
            .players
            .iter()
            .map(|player| player.rack.len())
            .sum::<usize>()
        + game_state.board_tiles.iter().filter(|&&t| t != 0).count()
}

// Plays one game to the end, checking every move on the way.
fn play_out(
    entrants: &mut [Box<dyn player::Player>; 2],
    seed: u64,
) -> (game_state::CheckGameEnded, [i16; 2], usize) {
    let game_config = game_config::make_english_game_config();
    let index = common::english_index();
    let leaves =
        leaves::Leaves::from_csv_reader(game_config.alphabet(), "?,25\nS,8\nQ,-7\nQU,1\n".as_bytes())
            .unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut game_state = game_state::GameState::new(&game_config);
    game_state.reset_and_draw_tiles(&mut rng);
    let mut play_scorer = play_scorer::PlayScorer::new();
    let mut history = Vec::new();
    let mut final_scores = [0i16; 2];
    loop {
        let play = {
            let position = player::Position {
                game_state: &game_state,
                index: &index,
                leaves: &leaves,
            };
            let play = entrants[game_state.turn as usize].choose_best_move(&history, &position);
            let board_snapshot = position.board_snapshot();
            assert!(
                play_scorer.play_is_valid(&board_snapshot, &play),
                "{}",
                play.fmt(&board_snapshot)
            );
            assert_eq!(
                play_scorer.recount_score(&board_snapshot, &play),
                play.score(),
                "{}",
                play.fmt(&board_snapshot)
            );
            play
        };
        game_state.play(&mut rng, &play).unwrap();
        assert_eq!(num_tiles_in_play(&game_state), 100);
        history.push(play);
        assert!(history.len() < 200, "game does not end");
        match game_state.check_game_ended(&mut final_scores) {
            game_state::CheckGameEnded::NotEnded => game_state.next_turn(),
            reason => return (reason, final_scores, history.len()),
        }
    }
}

#[test]
fn greedy_games_end_with_consistent_scores() {
    for seed in 0..3 {
        let mut entrants: [Box<dyn player::Player>; 2] = [
            Box::new(player::Greedy::default()),
            Box::new(player::Greedy::default()),
        ];
        let (reason, final_scores, num_turns) = play_out(&mut entrants, seed);
        assert_ne!(reason, game_state::CheckGameEnded::NotEnded);
        assert!(num_turns >= 2);
        // final scores can only go down by what is left on a rack
        assert!(final_scores.iter().all(|&score| score >= -200));
    }
}

#[test]
fn the_same_seed_replays_the_same_game() {
    let mut a: [Box<dyn player::Player>; 2] = [
        Box::new(player::Greedy::default()),
        Box::new(player::Greedy::default()),
    ];
    let mut b: [Box<dyn player::Player>; 2] = [
        Box::new(player::Greedy::default()),
        Box::new(player::Greedy::default()),
    ];
    assert_eq!(play_out(&mut a, 42), play_out(&mut b, 42));
}

#[test]
fn passing_loses_to_playing() {
    let mut entrants: [Box<dyn player::Player>; 2] =
        [Box::new(player::Greedy::default()), Box::new(player::Passer)];
    let (_, final_scores, _) = play_out(&mut entrants, 7);
    assert!(final_scores[0] > final_scores[1]);
}

#[test]
fn registry_players_finish_games() {
    let config = registry::TournamentConfig::from_json_str(
        r#"{
          "words": "unused",
          "num_games": 1,
          "seed": 5,
          "players": [
            { "tag": "specialized",
              "params": {
                "rules": [
                  { "when": { "tag": "bag_empty" },
                    "player": { "tag": "endgame", "params": { "max_depth": 2, "max_width": 4 } } },
                  { "when": { "tag": "bag_at_most", "n": 20 },
                    "player": { "tag": "simmer",
                                "params": { "num_candidates": 3, "num_plies": 1,
                                            "num_iterations": 8, "seed": 1 } } }
                ],
                "fallback": { "tag": "greedy" } } },
            { "tag": "greedy" }
          ]
        }"#,
    )
    .unwrap();
    let registry = registry::Registry::with_builtin_players();
    let mut entrants = [
        registry.make_player(&config.players[0]).unwrap(),
        registry.make_player(&config.players[1]).unwrap(),
    ];
    let (reason, _, _) = play_out(&mut entrants, 11);
    assert_ne!(reason, game_state::CheckGameEnded::NotEnded);
}

#[test]
fn generated_moves_recount_on_a_busy_board() {
    let game_config = game_config::make_english_game_config();
    let index = common::english_index();
    let leaves = leaves::Leaves::empty();
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let mut game_state = game_state::GameState::new(&game_config);
    game_state.reset_and_draw_tiles(&mut rng);
    let mut greedy = player::Greedy::default();
    // fill the board a bit
    for _ in 0..6 {
        let play = {
            let position = player::Position {
                game_state: &game_state,
                index: &index,
                leaves: &leaves,
            };
            greedy.choose_best_move(&[], &position)
        };
        game_state.play(&mut rng, &play).unwrap();
        game_state.next_turn();
    }

    let board_snapshot = movegen::BoardSnapshot {
        board_tiles: &game_state.board_tiles,
        game_config: &game_config,
        index: &index,
        leaves: &leaves,
    };
    let mut move_generator = movegen::MoveGenerator::new(&game_config);
    let mut play_scorer = play_scorer::PlayScorer::new();
    for rack in [[0u8, 0, 5, 19, 20, 1, 14], [1, 5, 9, 15, 21, 19, 20]] {
        move_generator.gen_moves(&movegen::GenMovesParams {
            board_snapshot: &board_snapshot,
            rack: &rack,
            bag_len: game_state.bag.len(),
            record: movegen::RecordMode::All,
            include_exchanges: false,
            recompute_crosses: true,
        });
        let moves = move_generator.moves();
        assert!(moves.len() > 1);
        for pair in moves.windows(2) {
            assert!(pair[0].equity >= pair[1].equity);
        }
        for valued_move in moves.iter() {
            assert!(play_scorer.play_is_valid(&board_snapshot, &valued_move.play));
            assert_eq!(
                play_scorer.recount_score(&board_snapshot, &valued_move.play),
                valued_move.play.score()
            );
        }
    }
}
