// Copyright (C) 2020-2026 Andy Kurnia.

use kanagram::{movegen, play_scorer};

// Recounts every play a player makes, without the cross cache.
pub struct ScoringChecker {
    play_scorer: play_scorer::PlayScorer,
    rack_tally: Vec<u8>,
    pub num_checked: u64,
    pub num_failed: u64,
}

impl ScoringChecker {
    pub fn new() -> Self {
        Self {
            play_scorer: play_scorer::PlayScorer::new(),
            rack_tally: Vec::new(),
            num_checked: 0,
            num_failed: 0,
        }
    }

    // false (and logged) if the play is illegal, misscored, or uses tiles
    // not on the rack.
    pub fn check_scoring(
        &mut self,
        board_snapshot: &movegen::BoardSnapshot,
        rack: &[u8],
        play: &movegen::Play,
    ) -> bool {
        self.num_checked += 1;
        let alphabet = board_snapshot.game_config.alphabet();

        self.rack_tally.clear();
        self.rack_tally.resize(alphabet.len() as usize, 0);
        rack.iter()
            .for_each(|&tile| self.rack_tally[tile as usize] += 1);
        for tile in play_scorer::tiles_used(play) {
            if self.rack_tally[tile as usize] == 0 {
                log::error!(
                    "{} uses {:?}, not on {}",
                    play.fmt(board_snapshot),
                    alphabet.from_rack(tile),
                    alphabet.fmt_rack(rack)
                );
                self.num_failed += 1;
                return false;
            }
            self.rack_tally[tile as usize] -= 1;
        }

        if !self.play_scorer.play_is_valid(board_snapshot, play) {
            log::error!("{} is not a valid play", play.fmt(board_snapshot));
            self.num_failed += 1;
            return false;
        }
        let recounted_score = self.play_scorer.recount_score(board_snapshot, play);
        if recounted_score != play.score() {
            log::error!(
                "{} recounted as {}, difference = {}",
                play.fmt(board_snapshot),
                recounted_score,
                play.score() - recounted_score
            );
            self.num_failed += 1;
            return false;
        }
        true
    }
}
