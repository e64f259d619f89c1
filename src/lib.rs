// Copyright (C) 2020-2026 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod alphabet;
pub mod anagram;
pub mod bag;
pub mod bites;
pub mod board_layout;
pub mod build;
pub mod cross_cache;
pub mod endgame;
pub mod fash;
pub mod game_config;
pub mod game_state;
pub mod leaves;
pub mod lexport;
pub mod matrix;
pub mod movegen;
pub mod play_scorer;
pub mod player;
pub mod product;
pub mod rack;
pub mod registry;
pub mod simmer;
pub mod spots;
pub mod stats;

#[cfg(test)]
mod test_support;
