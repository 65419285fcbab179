//! Zobrist key tables for incremental board hashing.
//!
//! A `HashKeyTable` is created once per match and owns one `ZobristKeys`
//! per player. Boards borrow the table of their player, so the table must
//! outlive every board built from it; the borrow checker enforces this.

use rustc_hash::FxHashSet;

use super::geometry::FULL_SIZE;
use crate::core::{GameRng, PlayerId, PlayerMap};

/// One player's key per padded cell.
#[derive(Debug, PartialEq, Eq)]
pub struct ZobristKeys {
    keys: [u64; FULL_SIZE as usize],
}

impl ZobristKeys {
    /// Key XORed into the digest when the cell at `index` is occupied.
    #[inline]
    #[must_use]
    pub fn key(&self, index: u32) -> u64 {
        self.keys[index as usize]
    }

    /// Iterate over all keys in index order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.keys.iter().copied()
    }
}

/// Per-player Zobrist keys for one match.
///
/// Every key is non-zero and all keys across both players are distinct,
/// so a single stone always changes a digest and the two players' stones
/// on the same cell never hash alike.
#[derive(Debug)]
pub struct HashKeyTable {
    tables: PlayerMap<ZobristKeys>,
}

impl HashKeyTable {
    /// Build a table from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::from_rng(&mut GameRng::new(seed))
    }

    /// Build a table by drawing keys from `rng`.
    pub fn from_rng(rng: &mut GameRng) -> Self {
        let mut seen = FxHashSet::default();
        let mut draw = || loop {
            let key = rng.gen_range_u64(1..=u64::MAX);
            if seen.insert(key) {
                return key;
            }
        };

        let mut first = [0u64; FULL_SIZE as usize];
        first.iter_mut().for_each(|key| *key = draw());
        let mut second = [0u64; FULL_SIZE as usize];
        second.iter_mut().for_each(|key| *key = draw());

        Self {
            tables: PlayerMap::from_array([
                ZobristKeys { keys: first },
                ZobristKeys { keys: second },
            ]),
        }
    }

    /// Keys belonging to `player`.
    #[inline]
    #[must_use]
    pub fn keys(&self, player: PlayerId) -> &ZobristKeys {
        &self.tables[player]
    }
}
