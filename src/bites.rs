// Copyright (C) 2020-2026 Andy Kurnia.

use super::error;

pub const MAX_LEN: usize = 25;

// Inline only: 0..25 = data, 25 = length.
#[derive(Clone, Copy)]
pub struct Bites([u8; MAX_LEN + 1]);

impl Bites {
    #[inline(always)]
    pub fn new() -> Self {
        Bites([0u8; MAX_LEN + 1])
    }

    #[inline(always)]
    pub fn push(&mut self, tile: u8) {
        let len = self.0[MAX_LEN] as usize;
        assert!(len < MAX_LEN, "letter string is full");
        self.0[len] = tile;
        self.0[MAX_LEN] += 1;
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        let len = self.0[MAX_LEN] as usize;
        &mut self.0[..len]
    }
}

impl Default for Bites {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for Bites {
    type Target = [u8];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.0[..self.0[MAX_LEN] as usize]
    }
}

impl AsRef<[u8]> for Bites {
    #[inline(always)]
    fn as_ref(&self) -> &[u8] {
        self
    }
}

impl std::borrow::Borrow<[u8]> for Bites {
    #[inline(always)]
    fn borrow(&self) -> &[u8] {
        self
    }
}

impl TryFrom<&[u8]> for Bites {
    type Error = error::MyError;

    #[inline(always)]
    fn try_from(given: &[u8]) -> Result<Self, Self::Error> {
        if given.len() > MAX_LEN {
            return Err(error::new(
                error::ErrorKind::WordTooLong,
                format!("{} tiles do not fit in {}", given.len(), MAX_LEN),
            ));
        }
        let mut ret = [0u8; MAX_LEN + 1];
        ret[..given.len()].copy_from_slice(given);
        ret[MAX_LEN] = given.len() as u8;
        Ok(Bites(ret))
    }
}

impl std::fmt::Debug for Bites {
    #[inline(always)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self[..].fmt(f)
    }
}

impl Eq for Bites {}

impl std::hash::Hash for Bites {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self[..].hash(state)
    }
}

impl Ord for Bites {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self[..].cmp(&other[..])
    }
}

impl PartialEq for Bites {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self[..].eq(&other[..])
    }
}

impl PartialOrd for Bites {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
