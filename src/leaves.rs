// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, error, fash, product};
use std::str::FromStr;

pub struct Leaves {
    values: fash::MyHashMap<product::LeaveKey, f32>,
    max_value: f32,
}

impl Leaves {
    pub fn empty() -> Self {
        Self {
            values: Default::default(),
            max_value: 0.0,
        }
    }

    // rows are "rack,value" without a header, eg "?EQ,-3.5".
    pub fn from_csv_reader<R: std::io::Read>(
        alphabet: &alphabet::Alphabet,
        reader: R,
    ) -> error::Returns<Self> {
        let mut ret = Self::empty();
        let mut tally = vec![0u8; alphabet.len() as usize];
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        for (row_num, result) in (1..).zip(csv_reader.records()) {
            let record = result?;
            if record.len() != 2 {
                crate::return_error!(
                    BadLeave,
                    format!("row {}: expected 2 fields, got {}", row_num, record.len())
                );
            }
            tally.iter_mut().for_each(|m| *m = 0);
            for c in record[0].trim().chars() {
                match alphabet.rack_tile_of(c) {
                    Some(tile) => tally[tile as usize] += 1,
                    None => {
                        crate::return_error!(
                            BadLeave,
                            format!("row {}: invalid tile {:?}", row_num, c)
                        );
                    }
                }
            }
            let value = match f32::from_str(record[1].trim()) {
                Ok(value) if value.is_finite() => value,
                _ => {
                    crate::return_error!(
                        BadLeave,
                        format!("row {}: invalid value {:?}", row_num, &record[1])
                    );
                }
            };
            match product::leave_key_of(alphabet, &tally) {
                Some(key) => {
                    ret.values.insert(key, value);
                }
                None => log::warn!("row {}: skipping {}, too long", row_num, &record[0]),
            }
        }
        ret.max_value = ret.values.values().fold(0.0f32, |acc, &v| acc.max(v));
        log::info!(
            "loaded {} leaves, best {}",
            ret.values.len(),
            ret.max_value
        );
        Ok(ret)
    }

    pub fn from_csv_path(alphabet: &alphabet::Alphabet, path: &str) -> error::Returns<Self> {
        match std::fs::File::open(path) {
            Ok(f) => Self::from_csv_reader(alphabet, std::io::BufReader::new(f)),
            Err(e) => {
                crate::return_error!(Io, format!("cannot open {}: {}", path, e));
            }
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // Never negative, so it bounds any leave including the empty one.
    #[inline(always)]
    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    #[inline(always)]
    pub fn value_of_key(&self, key: product::LeaveKey) -> f32 {
        self.values.get(&key).copied().unwrap_or(0.0)
    }

    #[inline(always)]
    pub fn value_of_tally(&self, alphabet: &alphabet::Alphabet, tally: &[u8]) -> f32 {
        match product::leave_key_of(alphabet, tally) {
            Some(key) => self.value_of_key(key),
            None => 0.0,
        }
    }
}
