//! Knight-move adjacency on an `N×N` board.

use std::collections::HashSet;

use super::square::Square;

/// The eight knight displacements `(±1, ±2)` / `(±2, ±1)`.
///
/// Neighbor iteration follows this order, so any tie-break that indexes
/// into a neighbor list is reproducible for a fixed seed.
pub const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
];

/// Largest supported side length.
///
/// The search keeps a position table of `N²` entries; 4096 caps it at
/// 16M squares (a few hundred MiB) and keeps `N²` far from overflow.
pub const MAX_BOARD_SIZE: usize = 4096;

/// Reason a square sequence is not a legal knight path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PathViolation {
    /// A square lies outside the board.
    #[display("square {square} at index {index} is off the board")]
    OutOfBounds {
        /// Position in the sequence.
        index: usize,
        /// The offending square.
        square: Square,
    },
    /// A square appears more than once.
    #[display("square {square} revisited at index {index}")]
    Duplicate {
        /// Position of the second occurrence.
        index: usize,
        /// The repeated square.
        square: Square,
    },
    /// Two consecutive squares are not a knight move apart.
    #[display("step {index} from {from} to {to} is not a knight move")]
    IllegalStep {
        /// Position of `from` in the sequence.
        index: usize,
        /// Source square.
        from: Square,
        /// Destination square.
        to: Square,
    },
}

/// An `N×N` board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    size: usize,
}

impl Board {
    /// Creates a board of side `size`.
    ///
    /// Sizes above [`MAX_BOARD_SIZE`] are not rejected here; use
    /// [`Board::try_new`] for unvalidated input.
    pub const fn new(size: usize) -> Self {
        Self { size }
    }

    /// Creates a board of side `size`, or `None` if `size` is zero or
    /// exceeds [`MAX_BOARD_SIZE`].
    pub const fn try_new(size: usize) -> Option<Self> {
        if size == 0 || size > MAX_BOARD_SIZE {
            None
        } else {
            Some(Self { size })
        }
    }

    /// Side length `N`.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Total number of squares, `N²`. This is the length of a full tour.
    ///
    /// Saturates at `usize::MAX` for sizes whose square overflows.
    pub const fn square_count(&self) -> usize {
        self.size.saturating_mul(self.size)
    }

    /// Whether `sq` lies on the board.
    pub fn contains(&self, sq: Square) -> bool {
        sq.row < self.size && sq.col < self.size
    }

    /// Row-major linear index of `sq`. Caller guarantees `contains(sq)`.
    pub fn index(&self, sq: Square) -> usize {
        sq.row * self.size + sq.col
    }

    /// Inverse of [`Board::index`].
    pub fn square_at(&self, index: usize) -> Square {
        Square::new(index / self.size, index % self.size)
    }

    /// All squares in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Square::new(row, col)))
    }

    /// On-board squares one knight move away from `sq`.
    pub fn neighbors(&self, sq: Square) -> impl Iterator<Item = Square> + '_ {
        KNIGHT_OFFSETS
            .iter()
            .filter_map(move |&(dr, dc)| sq.offset(dr, dc))
            .filter(move |&n| self.contains(n))
    }

    /// Number of on-board knight neighbors of `sq`.
    pub fn degree(&self, sq: Square) -> usize {
        self.neighbors(sq).count()
    }

    /// Whether `a` and `b` are one knight move apart. Bounds are not checked.
    pub fn is_knight_move(a: Square, b: Square) -> bool {
        let dr = a.row.abs_diff(b.row);
        let dc = a.col.abs_diff(b.col);
        (dr == 1 && dc == 2) || (dr == 2 && dc == 1)
    }

    /// Checks that `path` stays on the board, never repeats a square, and
    /// moves like a knight at every step.
    pub fn validate_path(&self, path: &[Square]) -> Result<(), PathViolation> {
        let mut seen = HashSet::with_capacity(path.len());
        for (index, &square) in path.iter().enumerate() {
            if !self.contains(square) {
                return Err(PathViolation::OutOfBounds { index, square });
            }
            if !seen.insert(square) {
                return Err(PathViolation::Duplicate { index, square });
            }
        }
        for (index, w) in path.windows(2).enumerate() {
            if !Self::is_knight_move(w[0], w[1]) {
                return Err(PathViolation::IllegalStep {
                    index,
                    from: w[0],
                    to: w[1],
                });
            }
        }
        Ok(())
    }
}
