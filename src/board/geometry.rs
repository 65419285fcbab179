//! Grid geometry and the immutable masks shared by every board.
//!
//! The logical board is `COLUMN_SIZE x MAX_HEIGHT` (7 x 6). State is stored
//! over a padded `FULL_WIDTH x FULL_HEIGHT` (8 x 8) grid so that no line of
//! stones can wrap from one edge to the other; the padding stays unset.
//!
//! ```text
//! index = column * FULL_HEIGHT + height
//!
//! height 7 | 7 15 23 31 39 47 55 63   <- padding row
//! height 6 | 6 14 22 30 38 46 54 62   <- padding row
//! height 5 | 5 13 21 29 37 45 53 61
//!   ...
//! height 0 | 0  8 16 24 32 40 48 56
//!            0  1  2  3  4  5  6  7   <- column 7 is padding
//! ```
//!
//! The masks are computed by `const fn`s, so they exist before any board
//! is constructed and every board refers to the same constants.

use serde::{Deserialize, Serialize};

/// Signed coordinate so that raw driver input can be validated, not wrapped.
pub type Coordinate = i32;

/// Number of playable columns.
pub const COLUMN_SIZE: Coordinate = 7;
/// Number of playable rows.
pub const MAX_HEIGHT: Coordinate = 6;
/// Padded width.
pub const FULL_WIDTH: Coordinate = 8;
/// Padded height.
pub const FULL_HEIGHT: Coordinate = 8;
/// Number of padded cells.
pub const FULL_SIZE: u32 = (FULL_WIDTH * FULL_HEIGHT) as u32;
/// Stones in a row needed to win.
pub const MIN_LEN: Coordinate = 4;
/// Number of line orientations.
pub const LINE_TYPES: usize = 4;

const _: () = assert!(COLUMN_SIZE <= FULL_WIDTH);
const _: () = assert!(MAX_HEIGHT <= FULL_HEIGHT);
const _: () = assert!(FULL_SIZE <= u64::BITS);

/// Bits of every playable cell.
pub const PLAYABLE_MASK: u64 = playable_mask();

/// Canonical `MIN_LEN`-bit line shapes, indexed by `LineKind as usize`.
pub const LINE_MASKS: [u64; LINE_TYPES] = line_masks();

/// Orientation of a line of stones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Stacked in one column.
    Vertical = 0,
    /// Side by side in one row.
    Horizontal = 1,
    /// Rising to the right.
    Diagonal = 2,
    /// Falling to the right.
    AntiDiagonal = 3,
}

impl LineKind {
    /// All orientations in checking order.
    pub const ALL: [LineKind; LINE_TYPES] = [
        LineKind::Vertical,
        LineKind::Horizontal,
        LineKind::Diagonal,
        LineKind::AntiDiagonal,
    ];

    /// The canonical mask for this orientation.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u64 {
        LINE_MASKS[self as usize]
    }
}

/// A cell on the logical board, also used as a move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// 0-based column, left to right.
    pub column: Coordinate,
    /// 0-based row, bottom to top.
    pub height: Coordinate,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(column: Coordinate, height: Coordinate) -> Self {
        Self { column, height }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.column, self.height)
    }
}

/// Padded index of `(column, height)` without range checks.
#[inline]
#[must_use]
pub const fn raw_index(column: Coordinate, height: Coordinate) -> Coordinate {
    column * FULL_HEIGHT + height
}

/// Padded index of `(column, height)`, or `None` outside the padded grid.
#[inline]
#[must_use]
pub const fn to_index(column: Coordinate, height: Coordinate) -> Option<u32> {
    if column < 0 || column >= FULL_WIDTH || height < 0 || height >= FULL_HEIGHT {
        None
    } else {
        Some(raw_index(column, height) as u32)
    }
}

/// Single-bit mask of a playable cell, or `None` for padding and
/// out-of-range coordinates.
#[inline]
#[must_use]
pub const fn playable_bit(column: Coordinate, height: Coordinate) -> Option<u64> {
    match to_index(column, height) {
        Some(index) if PLAYABLE_MASK & (1u64 << index) != 0 => Some(1u64 << index),
        _ => None,
    }
}

const fn playable_mask() -> u64 {
    let mut mask = 0u64;
    let mut column = 0;
    while column < COLUMN_SIZE {
        let mut height = 0;
        while height < MAX_HEIGHT {
            mask |= 1u64 << raw_index(column, height);
            height += 1;
        }
        column += 1;
    }
    mask
}

const fn line_masks() -> [u64; LINE_TYPES] {
    let mut masks = [0u64; LINE_TYPES];
    let mut i = 0;
    while i < MIN_LEN {
        masks[LineKind::Vertical as usize] |= 1u64 << i;
        masks[LineKind::Horizontal as usize] |= 1u64 << (i * FULL_HEIGHT);
        masks[LineKind::Diagonal as usize] |= 1u64 << (i * (FULL_HEIGHT + 1));
        masks[LineKind::AntiDiagonal as usize] |= 1u64 << (MIN_LEN - 1 + i * (FULL_HEIGHT - 1));
        i += 1;
    }
    masks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playable_mask() {
        assert_eq!(PLAYABLE_MASK.count_ones(), (COLUMN_SIZE * MAX_HEIGHT) as u32);

        for index in 0..FULL_SIZE {
            let column = index as Coordinate / FULL_HEIGHT;
            let height = index as Coordinate % FULL_HEIGHT;
            let expected = column < COLUMN_SIZE && height < MAX_HEIGHT;
            assert_eq!(expected, PLAYABLE_MASK & (1u64 << index) != 0, "index {}", index);
        }
    }

    #[test]
    fn test_line_masks() {
        for kind in LineKind::ALL {
            assert_eq!(kind.mask().count_ones(), MIN_LEN as u32);
        }

        for i in 0..MIN_LEN {
            assert_ne!(LineKind::Vertical.mask() & (1u64 << i), 0);
            assert_ne!(LineKind::Horizontal.mask() & (1u64 << (i * FULL_HEIGHT)), 0);
            assert_ne!(LineKind::Diagonal.mask() & (1u64 << (i * (FULL_HEIGHT + 1))), 0);
            assert_ne!(
                LineKind::AntiDiagonal.mask() & (1u64 << (MIN_LEN - 1 + i * (FULL_HEIGHT - 1))),
                0
            );
        }
    }

    #[test]
    fn test_to_index() {
        assert_eq!(to_index(0, 0), Some(0));
        assert_eq!(to_index(0, MAX_HEIGHT - 1), Some(MAX_HEIGHT as u32 - 1));
        assert_eq!(to_index(0, FULL_HEIGHT - 1), Some(FULL_HEIGHT as u32 - 1));
        assert_eq!(to_index(1, 0), Some(FULL_HEIGHT as u32));
        assert_eq!(to_index(FULL_WIDTH - 1, FULL_HEIGHT - 1), Some(FULL_SIZE - 1));
        assert_eq!(to_index(-1, 0), None);
        assert_eq!(to_index(0, FULL_HEIGHT), None);
        assert_eq!(to_index(FULL_WIDTH, 0), None);
    }

    #[test]
    fn test_playable_bit_rejects_padding() {
        assert_eq!(playable_bit(0, 0), Some(1));
        assert!(playable_bit(COLUMN_SIZE - 1, MAX_HEIGHT - 1).is_some());
        assert_eq!(playable_bit(COLUMN_SIZE, 0), None);
        assert_eq!(playable_bit(0, MAX_HEIGHT), None);
        assert_eq!(playable_bit(-3, 2), None);
    }

    #[test]
    fn test_point_display() {
        assert_eq!(Point::new(3, 2).to_string(), "(3, 2)");
    }
}
