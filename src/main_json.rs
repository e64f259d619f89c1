// Copyright (C) 2020-2026 Andy Kurnia.

use kanagram::{error, game_config, leaves, lexport, movegen, return_error};

// tile numbering follows alphabet order.
// rack: array of numbers. 0 for blank, 1 for A.
// board: 2D array of numbers. 0 for empty, 1 for A, -1 for blank-as-A.
// words: word list (one per line) or binary index.
// leaves: optional rack,value csv.
// count: maximum number of moves returned.
#[derive(serde::Deserialize)]
struct Question {
    words: String,
    #[serde(default)]
    leaves: Option<String>,
    rack: Vec<u8>,
    #[serde(rename = "board")]
    board_tiles: Vec<Vec<i8>>,
    #[serde(rename = "count")]
    max_gen: usize,
}

// note: only this representation uses -1i8 for blank-as-A (in "board" input
// and "word" response for "action":"play"). everywhere else, use 0x81u8.

fn take_from_tally(
    available_tally: &mut [u8],
    game_config: &game_config::GameConfig,
    tile: u8,
) -> error::Returns<()> {
    if available_tally[tile as usize] > 0 {
        available_tally[tile as usize] -= 1;
        Ok(())
    } else {
        return_error!(
            BadTile,
            format!(
                "too many tile {} (bag contains only {})",
                tile,
                game_config.alphabet().freq(tile),
            )
        );
    }
}

pub fn main() -> error::Returns<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .map_err(|e| e.to_string())?;
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() != 2 {
        return Err("usage: json <question.json>".into());
    }
    let question = serde_json::from_str::<Question>(&std::fs::read_to_string(&args[1])?)?;

    let game_config = game_config::make_english_game_config();
    let alphabet = game_config.alphabet();
    let alphabet_len_without_blank = alphabet.len() - 1;
    let index = lexport::load_index(alphabet, &question.words)?;
    let leaves = match &question.leaves {
        Some(path) => leaves::Leaves::from_csv_path(alphabet, path)?,
        None => leaves::Leaves::empty(),
    };

    // note: this allocates
    let mut available_tally = (0..alphabet.len())
        .map(|tile| alphabet.freq(tile))
        .collect::<Box<_>>();

    for &tile in &question.rack {
        if tile > alphabet_len_without_blank {
            return_error!(
                BadTile,
                format!(
                    "rack has invalid tile {}, alphabet size is {}",
                    tile, alphabet_len_without_blank
                )
            );
        }
        take_from_tally(&mut available_tally, &game_config, tile)?;
    }
    if question.rack.len() > game_config.rack_size() as usize {
        return_error!(
            BadTile,
            format!("rack has {} tiles", question.rack.len())
        );
    }

    let expected_dim = game_config.board_layout().dim();
    if question.board_tiles.len() != expected_dim.rows as usize {
        return_error!(
            BadTile,
            format!(
                "board: need {} rows, found {} rows",
                expected_dim.rows,
                question.board_tiles.len()
            )
        );
    }
    let mut board_tiles = Vec::with_capacity(expected_dim.area());
    for (row_num, row) in (0..).zip(question.board_tiles.iter()) {
        if row.len() != expected_dim.cols as usize {
            return_error!(
                BadTile,
                format!(
                    "board row {} (0-based): need {} cols, found {} cols",
                    row_num,
                    expected_dim.cols,
                    row.len()
                )
            );
        }
        for (col_num, &signed_tile) in (0..).zip(row) {
            if signed_tile == 0 {
                board_tiles.push(0);
            } else if signed_tile > 0 && signed_tile as u8 <= alphabet_len_without_blank {
                let tile = signed_tile as u8;
                board_tiles.push(tile);
                take_from_tally(&mut available_tally, &game_config, tile)?;
            } else if signed_tile < 0 && signed_tile.unsigned_abs() <= alphabet_len_without_blank {
                // turn -1i8, -2i8 into 0x81u8, 0x82u8
                board_tiles.push(0x80 | signed_tile.unsigned_abs());
                take_from_tally(&mut available_tally, &game_config, 0)?;
            } else {
                return_error!(
                    BadTile,
                    format!(
                        "board row {} col {} (0-based): invalid tile {}, alphabet size is {}",
                        row_num, col_num, signed_tile, alphabet_len_without_blank
                    )
                );
            }
        }
    }

    // unseen tiles are in the bag or on the opponent's rack
    let num_unseen = available_tally.iter().map(|&n| n as usize).sum::<usize>();
    let bag_len = num_unseen.saturating_sub(game_config.rack_size() as usize);

    let board_snapshot = &movegen::BoardSnapshot {
        board_tiles: &board_tiles,
        game_config: &game_config,
        index: &index,
        leaves: &leaves,
    };
    let mut move_generator = movegen::MoveGenerator::new(&game_config);
    move_generator.gen_moves(&movegen::GenMovesParams {
        board_snapshot,
        rack: &question.rack,
        bag_len,
        record: movegen::RecordMode::All,
        include_exchanges: true,
        recompute_crosses: true,
    });
    let plays = &move_generator.moves()[..move_generator.moves().len().min(question.max_gen)];
    log::info!(
        "found {} moves, returning {}",
        move_generator.moves().len(),
        plays.len()
    );
    for play in plays.iter() {
        log::debug!("{} {}", play.equity, play.play.fmt(board_snapshot));
    }

    let mut result = Vec::<serde_json::Value>::with_capacity(plays.len());
    for play in plays.iter() {
        match &play.play {
            movegen::Play::Exchange { tiles } => {
                if tiles.is_empty() {
                    result.push(serde_json::json!({
                        "equity": play.equity,
                        "action": "pass" }));
                } else {
                    // tiles: array of numbers. 0 for blank, 1 for A.
                    result.push(serde_json::json!({
                        "equity": play.equity,
                        "action": "exchange",
                        "tiles": tiles[..] }));
                }
            }
            movegen::Play::Place {
                down,
                lane,
                idx,
                word,
                score,
            } => {
                // turn 0x81u8, 0x82u8 into -1i8, -2i8
                let word_played = word
                    .iter()
                    .map(|&x| {
                        if x & 0x80 != 0 {
                            -((x & !0x80) as i8)
                        } else {
                            x as i8
                        }
                    })
                    .collect::<Vec<i8>>();
                // across plays: down=false, lane=row, idx=col (0-based).
                // down plays: down=true, lane=col, idx=row (0-based).
                // word: 0 for play-through, 1 for A, -1 for blank-as-A.
                result.push(serde_json::json!({
                    "equity": play.equity,
                    "action": "play",
                    "down": down,
                    "lane": lane,
                    "idx": idx,
                    "word": word_played,
                    "score": score }));
            }
        }
    }
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
