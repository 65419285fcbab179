//! One player's stones as a 64-bit occupancy map with a Zobrist digest.

use smallvec::SmallVec;
use thiserror::Error;
use tracing::trace;

use super::geometry::{
    playable_bit, raw_index, to_index, Coordinate, LineKind, Point, COLUMN_SIZE, MAX_HEIGHT,
    MIN_LEN, PLAYABLE_MASK,
};
use super::keys::ZobristKeys;

/// Legal moves of a position; at most one per column.
pub type Actions = SmallVec<[Point; COLUMN_SIZE as usize]>;

/// Why a stone could not be placed or removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("cell ({column}, {height}) is outside the playable board")]
    OutOfRange { column: Coordinate, height: Coordinate },

    #[error("cell ({column}, {height}) is already occupied")]
    Occupied { column: Coordinate, height: Coordinate },

    #[error("cell ({column}, {height}) is empty")]
    Vacant { column: Coordinate, height: Coordinate },
}

/// A single player's placed stones.
///
/// `placed` has one bit per padded cell and never has a padding bit set.
/// `digest` is the XOR of the keys of every placed cell. The key table is
/// borrowed, so copying a board is three machine words.
#[derive(Clone, Copy)]
pub struct Board<'k> {
    placed: u64,
    digest: u64,
    keys: &'k ZobristKeys,
}

impl<'k> Board<'k> {
    /// Create an empty board hashing with `keys`.
    #[must_use]
    pub fn new(keys: &'k ZobristKeys) -> Self {
        Self { placed: 0, digest: 0, keys }
    }

    /// Place a stone, ignoring out-of-range or occupied cells.
    pub fn place(&mut self, column: Coordinate, height: Coordinate) {
        if let Err(err) = self.try_place(column, height) {
            trace!(%err, "ignored placement");
        }
    }

    /// Place a stone, reporting why the cell was rejected.
    pub fn try_place(&mut self, column: Coordinate, height: Coordinate) -> Result<(), PlacementError> {
        let (index, bit) = Self::locate(column, height)?;
        if self.placed & bit != 0 {
            return Err(PlacementError::Occupied { column, height });
        }
        self.placed |= bit;
        self.digest ^= self.keys.key(index);
        Ok(())
    }

    /// Remove a stone, ignoring out-of-range or empty cells.
    pub fn remove(&mut self, column: Coordinate, height: Coordinate) {
        if let Err(err) = self.try_remove(column, height) {
            trace!(%err, "ignored removal");
        }
    }

    /// Remove a stone, reporting why the cell was rejected.
    pub fn try_remove(&mut self, column: Coordinate, height: Coordinate) -> Result<(), PlacementError> {
        let (index, bit) = Self::locate(column, height)?;
        if self.placed & bit == 0 {
            return Err(PlacementError::Vacant { column, height });
        }
        self.placed &= !bit;
        self.digest ^= self.keys.key(index);
        Ok(())
    }

    fn locate(column: Coordinate, height: Coordinate) -> Result<(u32, u64), PlacementError> {
        match (to_index(column, height), playable_bit(column, height)) {
            (Some(index), Some(bit)) => Ok((index, bit)),
            _ => Err(PlacementError::OutOfRange { column, height }),
        }
    }

    /// Combine two boards: XOR of placements and of digests.
    ///
    /// For disjoint boards this is their union. Merging a board with itself
    /// yields an empty board. The result keeps `self`'s key table.
    #[must_use]
    pub fn merge(&self, other: &Board<'_>) -> Board<'k> {
        Board {
            placed: self.placed ^ other.placed,
            digest: self.digest ^ other.digest,
            keys: self.keys,
        }
    }

    /// Whether a line of `MIN_LEN` stones passes through `(column, height)`.
    ///
    /// Only line placements that contain the given cell are tested.
    /// Coordinates outside the padded grid never form a line.
    #[must_use]
    pub fn check(&self, column: Coordinate, height: Coordinate) -> bool {
        if to_index(column, height).is_none() {
            return false;
        }

        let left = (column - (MIN_LEN - 1)).max(0);
        let right = (COLUMN_SIZE - MIN_LEN).min(column);
        let bottom = (height - (MIN_LEN - 1)).max(0);
        let top = (MAX_HEIGHT - MIN_LEN).min(height);

        let vertical = (bottom..=top).any(|y| self.check_line(LineKind::Vertical, raw_index(column, y)));
        if vertical {
            return true;
        }

        let horizontal = (left..=right).any(|x| self.check_line(LineKind::Horizontal, raw_index(x, height)));
        if horizontal {
            return true;
        }

        let diagonal = (left..=right).any(|x| {
            let y = height + (x - column);
            (0..MAX_HEIGHT).contains(&y) && self.check_line(LineKind::Diagonal, raw_index(x, y))
        });
        if diagonal {
            return true;
        }

        (left..=right).any(|x| {
            let y = height - (x - column);
            (0..MAX_HEIGHT).contains(&y)
                && self.check_line(LineKind::AntiDiagonal, raw_index(x, y) - (MIN_LEN - 1))
        })
    }

    /// Test the canonical `kind` mask shifted left by `shift` bits.
    fn check_line(&self, kind: LineKind, shift: Coordinate) -> bool {
        if !(0..64).contains(&shift) {
            return false;
        }
        let line = (kind.mask() << shift) & PLAYABLE_MASK & self.placed;
        line.count_ones() >= MIN_LEN as u32
    }

    /// Lowest free row of every column that is not full, by column.
    #[must_use]
    pub fn legal_actions(&self) -> Actions {
        (0..COLUMN_SIZE)
            .filter_map(|column| {
                (0..MAX_HEIGHT)
                    .find(|&height| !self.is_set(column, height))
                    .map(|height| Point::new(column, height))
            })
            .collect()
    }

    /// Whether every playable cell is occupied.
    #[must_use]
    pub fn full(&self) -> bool {
        self.placed.count_ones() == PLAYABLE_MASK.count_ones()
    }

    /// Whether a stone sits at `(column, height)`.
    #[must_use]
    pub fn is_set(&self, column: Coordinate, height: Coordinate) -> bool {
        playable_bit(column, height).is_some_and(|bit| self.placed & bit != 0)
    }

    /// Number of stones.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.placed.count_ones()
    }

    /// Raw occupancy bits.
    #[must_use]
    pub fn placed(&self) -> u64 {
        self.placed
    }

    /// Zobrist digest of the occupancy.
    #[must_use]
    pub fn digest(&self) -> u64 {
        self.digest
    }

    /// Key table this board hashes with.
    #[must_use]
    pub fn keys(&self) -> &'k ZobristKeys {
        self.keys
    }

    /// Text rendering, top row first, one line per row.
    #[must_use]
    pub fn render(&self, blank: char, mark: char) -> String {
        let mut out = String::with_capacity(((COLUMN_SIZE + 1) * MAX_HEIGHT) as usize);
        for height in (0..MAX_HEIGHT).rev() {
            for column in 0..COLUMN_SIZE {
                out.push(if self.is_set(column, height) { mark } else { blank });
            }
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Debug for Board<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("placed", &format_args!("{:#018x}", self.placed))
            .field("digest", &format_args!("{:#018x}", self.digest))
            .finish()
    }
}

impl PartialEq for Board<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.placed == other.placed && self.digest == other.digest
    }
}

impl Eq for Board<'_> {}
