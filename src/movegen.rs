// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    alphabet, anagram, cross_cache, game_config, leaves, play_scorer, product, rack, spots,
};
use product::Product;

// Only wins when nothing else is possible.
pub const PASS_EQUITY: f32 = -10000.0;

pub struct BoardSnapshot<'a> {
    pub board_tiles: &'a [u8],
    pub game_config: &'a game_config::GameConfig<'a>,
    pub index: &'a anagram::AnagramIndex,
    pub leaves: &'a leaves::Leaves,
}

// Place: word has 0 for played-through squares and 0x80 | t for a blank as t.
// Exchange with no tiles is a pass.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Play {
    Exchange {
        tiles: Box<[u8]>,
    },
    Place {
        down: bool,
        lane: i8,
        idx: i8,
        word: Box<[u8]>,
        score: i16,
    },
}

impl Play {
    #[inline(always)]
    pub fn pass() -> Self {
        Play::Exchange {
            tiles: [][..].into(),
        }
    }

    #[inline(always)]
    pub fn is_pass(&self) -> bool {
        matches!(self, Play::Exchange { tiles } if tiles.is_empty())
    }

    #[inline(always)]
    pub fn score(&self) -> i16 {
        match self {
            Play::Exchange { .. } => 0,
            Play::Place { score, .. } => *score,
        }
    }

    pub fn fmt<'a>(&'a self, board_snapshot: &'a BoardSnapshot<'a>) -> WriteablePlay<'a> {
        WriteablePlay {
            board_snapshot,
            play: self,
        }
    }
}

pub struct WriteablePlay<'a> {
    board_snapshot: &'a BoardSnapshot<'a>,
    play: &'a Play,
}

impl std::fmt::Display for WriteablePlay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let alphabet = self.board_snapshot.game_config.alphabet();
        match self.play {
            Play::Exchange { tiles } => {
                if tiles.is_empty() {
                    write!(f, "pass")?;
                } else {
                    write!(f, "xchg {}", alphabet.fmt_rack(tiles))?;
                }
            }
            Play::Place {
                down,
                lane,
                idx,
                word,
                score,
            } => {
                let dim = self.board_snapshot.game_config.board_layout().dim();
                let strider = dim.lane(*down, *lane);
                if *down {
                    write!(f, "{}{} ", (*lane as u8 + 0x41) as char, idx + 1)?;
                } else {
                    write!(f, "{}{} ", lane + 1, (*idx as u8 + 0x41) as char)?;
                }
                let mut inside = false;
                for (i, &tile) in (*idx..).zip(word.iter()) {
                    if tile == 0 {
                        if !inside {
                            write!(f, "(")?;
                            inside = true;
                        }
                        let b = self.board_snapshot.board_tiles[strider.at(i)];
                        write!(f, "{}", alphabet.from_board(b).unwrap_or("?"))?;
                    } else {
                        if inside {
                            write!(f, ")")?;
                            inside = false;
                        }
                        write!(f, "{}", alphabet.from_board(tile).unwrap_or("?"))?;
                    }
                }
                if inside {
                    write!(f, ")")?;
                }
                write!(f, " {}", score)?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValuedMove {
    pub play: Play,
    pub leave_value: f32,
    pub equity: f32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecordMode {
    // every legal move, the pass and (if allowed) every exchange
    All,
    // only the highest equity, first found wins ties
    Best,
}

pub struct GenMovesParams<'a> {
    pub board_snapshot: &'a BoardSnapshot<'a>,
    pub rack: &'a [u8],
    pub bag_len: usize,
    pub record: RecordMode,
    pub include_exchanges: bool,
    // false iff the cross cache already matches board_tiles
    pub recompute_crosses: bool,
}

struct Recorder<'a> {
    mode: RecordMode,
    plays: &'a mut Vec<ValuedMove>,
}

impl Recorder<'_> {
    #[inline(always)]
    fn best_equity(&self) -> f32 {
        self.plays
            .first()
            .map_or(f32::NEG_INFINITY, |valued_move| valued_move.equity)
    }

    #[inline(always)]
    fn record<MakePlay: FnOnce() -> Play>(
        &mut self,
        equity: f32,
        leave_value: f32,
        make_play: MakePlay,
    ) {
        match self.mode {
            RecordMode::All => {}
            RecordMode::Best => {
                if equity <= self.best_equity() {
                    return;
                }
                self.plays.clear();
            }
        }
        self.plays.push(ValuedMove {
            play: make_play(),
            leave_value,
            equity,
        });
    }
}

// Every distinct non-empty multiset of rack tiles, with what would be kept.
fn gen_exchanges<FoundExchange: FnMut(&[u8], &[u8])>(
    rack_tally: &[u8],
    found_exchange: FoundExchange,
) {
    struct Env<'a, FoundExchange: FnMut(&[u8], &[u8])> {
        found_exchange: FoundExchange,
        leave_tally: &'a mut [u8],
        exchanged: Vec<u8>,
    }

    fn generate<FoundExchange: FnMut(&[u8], &[u8])>(env: &mut Env<FoundExchange>, tile: usize) {
        if tile >= env.leave_tally.len() {
            if !env.exchanged.is_empty() {
                (env.found_exchange)(&env.exchanged, env.leave_tally);
            }
            return;
        }
        let available = env.leave_tally[tile];
        for num_exchanged in 0..=available {
            env.leave_tally[tile] = available - num_exchanged;
            generate(env, tile + 1);
            env.exchanged.push(tile as u8);
        }
        env.exchanged
            .truncate(env.exchanged.len() - (available as usize + 1));
        env.leave_tally[tile] = available;
    }

    let mut leave_tally = rack_tally.to_vec();
    generate(
        &mut Env {
            found_exchange,
            leave_tally: &mut leave_tally,
            exchanged: Vec::new(),
        },
        0,
    );
}

// Marks the blank tiles among the new tiles of word, which spells subset plus
// num_blanks more letters. Calls back once per distinct assignment.
fn resolve_blanks<Found: FnMut(&[u8])>(
    word: &mut [u8],
    subset_tally: &[u8],
    num_blanks: u8,
    new_tally: &mut [u8],
    mut found: Found,
) {
    new_tally.iter_mut().for_each(|m| *m = 0);
    for &tile in word.iter() {
        if tile != 0 {
            new_tally[tile as usize] += 1;
        }
    }
    let mut deficits = [(0u8, 0u8); 2];
    let mut num_deficits = 0;
    let mut total_deficit = 0;
    for (tile, (&have, &need)) in (0u8..).zip(subset_tally.iter().zip(new_tally.iter())) {
        if need > have {
            if num_deficits == deficits.len() {
                panic!(
                    "blank resolution: more than two letters short for {:?} from {:?}",
                    word, subset_tally
                );
            }
            deficits[num_deficits] = (tile, need - have);
            num_deficits += 1;
            total_deficit += need - have;
        }
    }
    if num_deficits == 0 || total_deficit != num_blanks {
        panic!(
            "blank resolution: {} short for {:?} from {:?} with {} blanks",
            total_deficit, word, subset_tally, num_blanks
        );
    }

    let positions_of = |word: &[u8], tile: u8| {
        word.iter()
            .enumerate()
            .filter(|&(_, &w)| w == tile)
            .map(|(i, _)| i)
            .collect::<Vec<_>>()
    };
    match deficits[..num_deficits] {
        [(tile, 1)] => {
            for i in positions_of(word, tile) {
                word[i] |= alphabet::BLANK_MARK;
                found(word);
                word[i] &= !alphabet::BLANK_MARK;
            }
        }
        [(tile, 2)] => {
            let positions = positions_of(word, tile);
            for (a, &i) in positions.iter().enumerate() {
                for &j in &positions[a + 1..] {
                    word[i] |= alphabet::BLANK_MARK;
                    word[j] |= alphabet::BLANK_MARK;
                    found(word);
                    word[i] &= !alphabet::BLANK_MARK;
                    word[j] &= !alphabet::BLANK_MARK;
                }
            }
        }
        [(tile1, 1), (tile2, 1)] => {
            let positions2 = positions_of(word, tile2);
            for i in positions_of(word, tile1) {
                for &j in &positions2 {
                    word[i] |= alphabet::BLANK_MARK;
                    word[j] |= alphabet::BLANK_MARK;
                    found(word);
                    word[i] &= !alphabet::BLANK_MARK;
                    word[j] &= !alphabet::BLANK_MARK;
                }
            }
        }
        _ => panic!(
            "blank resolution: deficits {:?} do not fit {} blanks",
            &deficits[..num_deficits],
            num_blanks
        ),
    }
}

// Every legal placement at this spot. Calls back with the word (0 for
// played-through squares), its score and the tally left on the rack.
pub fn find_words<Found: FnMut(&[u8], i16, &[u8])>(
    board_snapshot: &BoardSnapshot,
    cross_cache: &cross_cache::CrossCache,
    rack: &rack::Rack,
    spot: &spots::Spot,
    mut found: Found,
) {
    let game_config = board_snapshot.game_config;
    let alphabet = game_config.alphabet();
    let index = board_snapshot.index;
    let board_tiles = board_snapshot.board_tiles;
    let strider = game_config.board_layout().dim().lane(spot.down, spot.lane);
    let cross_sets = cross_cache.for_plays(spot.down);

    let Some(through_product) = (spot.start..spot.end).try_fold(product::EMPTY, |acc, i| {
        let b = board_tiles[strider.at(i)];
        if b == 0 {
            Some(acc)
        } else {
            acc.checked_mul(alphabet.prime(b) as Product)
        }
    }) else {
        return;
    };

    let mut word_buffer = vec![0u8; spot.len() as usize];
    let mut new_tally = vec![0u8; alphabet.len() as usize];
    let mut leave_tally = rack.tally().to_vec();
    let max_blanks = rack.num_blanks().min(2).min(spot.num_tiles as u8);
    for num_blanks in 0..=max_blanks {
        rack.for_each_subset(
            alphabet,
            spot.num_tiles as u8 - num_blanks,
            |subset_product, subset_tally| {
                let Some(q) = subset_product.checked_mul(through_product) else {
                    return;
                };
                for (m, (&have, &used)) in leave_tally
                    .iter_mut()
                    .zip(rack.tally().iter().zip(subset_tally))
                {
                    *m = have - used;
                }
                leave_tally[alphabet::BLANK as usize] -= num_blanks;

                'word: for word in index.words(q, num_blanks) {
                    if word.len() != word_buffer.len() {
                        continue;
                    }
                    for (i, &w) in (spot.start..).zip(word.iter()) {
                        let square = strider.at(i);
                        let b = board_tiles[square];
                        let slot = (i - spot.start) as usize;
                        if b != 0 {
                            if b & !alphabet::BLANK_MARK != w {
                                continue 'word;
                            }
                            word_buffer[slot] = 0;
                        } else {
                            if !cross_sets[square].allows(w) {
                                continue 'word;
                            }
                            word_buffer[slot] = w;
                        }
                    }
                    let mut emit = |placed: &[u8]| {
                        let score = play_scorer::score_place(
                            board_snapshot,
                            cross_cache,
                            spot.down,
                            spot.lane,
                            spot.start,
                            placed,
                        );
                        found(placed, score, &leave_tally);
                    };
                    if num_blanks == 0 {
                        emit(&word_buffer[..]);
                    } else {
                        resolve_blanks(
                            &mut word_buffer,
                            subset_tally,
                            num_blanks,
                            &mut new_tally,
                            emit,
                        );
                    }
                }
            },
        );
    }
}

pub struct MoveGenerator {
    pub plays: Vec<ValuedMove>,
    cross_cache: cross_cache::CrossCache,
    rack: rack::Rack,
    spots: Vec<spots::Spot>,
}

impl MoveGenerator {
    pub fn new(game_config: &game_config::GameConfig) -> Self {
        Self {
            plays: Vec::new(),
            cross_cache: cross_cache::CrossCache::new(game_config.board_layout().dim()),
            rack: rack::Rack::new(game_config.alphabet()),
            spots: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn cross_cache(&self) -> &cross_cache::CrossCache {
        &self.cross_cache
    }

    #[inline(always)]
    pub fn cross_cache_mut(&mut self) -> &mut cross_cache::CrossCache {
        &mut self.cross_cache
    }

    // Sorted by descending equity, equal ones in the order found.
    #[inline(always)]
    pub fn moves(&self) -> &[ValuedMove] {
        &self.plays
    }

    pub fn gen_moves(&mut self, params: &GenMovesParams) {
        let board_snapshot = params.board_snapshot;
        let game_config = board_snapshot.game_config;
        let alphabet = game_config.alphabet();
        let leaves = board_snapshot.leaves;
        self.rack.set_tiles(params.rack);
        if params.recompute_crosses {
            self.cross_cache.cache_crosses_and_scores(
                alphabet,
                board_snapshot.index,
                board_snapshot.board_tiles,
            );
        }

        self.plays.clear();
        let mut recorder = Recorder {
            mode: params.record,
            plays: &mut self.plays,
        };
        let rack_leave_value = leaves.value_of_tally(alphabet, self.rack.tally());
        recorder.record(PASS_EQUITY, rack_leave_value, Play::pass);

        if params.include_exchanges && params.bag_len as i16 >= game_config.exchange_min_bag() {
            gen_exchanges(self.rack.tally(), |exchanged, leave_tally| {
                let leave_value = leaves.value_of_tally(alphabet, leave_tally);
                recorder.record(play_scorer::equity(0, leave_value), leave_value, || {
                    Play::Exchange {
                        tiles: exchanged.into(),
                    }
                });
            });
        }

        self.spots.clear();
        for down in [false, true] {
            for num_tiles in 1..=self.rack.len() {
                spots::find_spots(
                    board_snapshot,
                    &self.cross_cache,
                    &self.rack,
                    num_tiles as i8,
                    down,
                    &mut self.spots,
                );
            }
        }
        if params.record == RecordMode::Best {
            // stable, so equal bounds keep board order
            self.spots.sort_by(|a, b| b.max_score.cmp(&a.max_score));
        }

        let max_leave_value = leaves.max_value();
        let mut num_spots_searched = 0;
        for spot in self.spots.iter() {
            if params.record == RecordMode::Best
                && spot.max_score as f32 + max_leave_value <= recorder.best_equity()
            {
                break;
            }
            num_spots_searched += 1;
            find_words(
                board_snapshot,
                &self.cross_cache,
                &self.rack,
                spot,
                |word, score, leave_tally| {
                    let leave_value = leaves.value_of_tally(alphabet, leave_tally);
                    recorder.record(play_scorer::equity(score, leave_value), leave_value, || {
                        Play::Place {
                            down: spot.down,
                            lane: spot.lane,
                            idx: spot.start,
                            word: word.into(),
                            score,
                        }
                    });
                },
            );
        }

        self.plays.sort_by(|a, b| b.equity.total_cmp(&a.equity));
        log::debug!(
            "rack {}: searched {} of {} spots, kept {} moves",
            alphabet.fmt_rack(params.rack),
            num_spots_searched,
            self.spots.len(),
            self.plays.len()
        );
    }
}
