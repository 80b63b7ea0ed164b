//! Path state: the visited sequence plus its inverse index.
//!
//! The sequence is an arena of squares; the position index is a dense
//! table keyed by the square's linear board index. Both are mutated only
//! through [`PathState::append`] and [`PathState::splice_reverse`], which
//! keep them in exact correspondence.

use crate::board::{Board, Square, MAX_BOARD_SIZE};

/// Rejected path mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PathError {
    /// The board is empty or larger than [`MAX_BOARD_SIZE`].
    #[display("board size {_0} is outside 1..={MAX_BOARD_SIZE}")]
    UnsupportedBoard(#[error(not(source))] usize),
    /// The square is not on the board.
    #[display("square {_0} is off the board")]
    OffBoard(#[error(not(source))] Square),
    /// The square is already part of the path.
    #[display("square {_0} is already visited")]
    AlreadyVisited(#[error(not(source))] Square),
    /// The square is not a knight move from the current tail.
    #[display("square {to} is not a knight move from tail {tail}")]
    NotAdjacent {
        /// Current tail.
        tail: Square,
        /// Rejected square.
        to: Square,
    },
    /// Splice index outside `0..len - 1`.
    #[display("splice index {index} out of range for path of length {len}")]
    SpliceOutOfRange {
        /// Requested index.
        index: usize,
        /// Path length.
        len: usize,
    },
}

/// Ordered, duplicate-free knight path with O(1) membership and position
/// lookup.
#[derive(Debug, Clone)]
pub struct PathState {
    board: Board,
    squares: Vec<Square>,
    /// `positions[board.index(sq)]` is the index of `sq` in `squares`.
    positions: Vec<Option<usize>>,
}

impl PathState {
    /// Starts a path at `origin`.
    ///
    /// Allocates tables of `N²` entries, so oversized boards are rejected
    /// up front.
    pub fn new(board: Board, origin: Square) -> Result<Self, PathError> {
        if Board::try_new(board.size()).is_none() {
            return Err(PathError::UnsupportedBoard(board.size()));
        }
        if !board.contains(origin) {
            return Err(PathError::OffBoard(origin));
        }
        let mut squares = Vec::with_capacity(board.square_count());
        let mut positions = vec![None; board.square_count()];
        positions[board.index(origin)] = Some(0);
        squares.push(origin);
        Ok(Self {
            board,
            squares,
            positions,
        })
    }

    /// The board this path lives on.
    pub fn board(&self) -> Board {
        self.board
    }

    /// Number of visited squares.
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// Always false: a path holds at least its origin.
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Whether every square of the board is visited.
    pub fn is_complete(&self) -> bool {
        self.squares.len() == self.board.square_count()
    }

    /// Current endpoint.
    pub fn tail(&self) -> Square {
        self.squares[self.squares.len() - 1]
    }

    /// Square immediately before the tail, if any.
    pub fn predecessor(&self) -> Option<Square> {
        self.squares.len().checked_sub(2).map(|i| self.squares[i])
    }

    /// Visited squares in path order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Consumes the state and returns the sequence.
    pub fn into_squares(self) -> Vec<Square> {
        self.squares
    }

    /// Whether `sq` is on the path. Off-board squares are never visited.
    pub fn is_visited(&self, sq: Square) -> bool {
        self.index_of(sq).is_some()
    }

    /// Position of `sq` in the path, or `None` if unvisited.
    pub fn index_of(&self, sq: Square) -> Option<usize> {
        if !self.board.contains(sq) {
            return None;
        }
        self.positions[self.board.index(sq)]
    }

    /// Unvisited knight neighbors of `sq`.
    pub fn unvisited_neighbors(&self, sq: Square) -> impl Iterator<Item = Square> + '_ {
        self.board
            .neighbors(sq)
            .filter(move |&n| self.positions[self.board.index(n)].is_none())
    }

    /// Extends the path by one knight move.
    pub fn append(&mut self, sq: Square) -> Result<(), PathError> {
        if !self.board.contains(sq) {
            return Err(PathError::OffBoard(sq));
        }
        if self.is_visited(sq) {
            return Err(PathError::AlreadyVisited(sq));
        }
        let tail = self.tail();
        if !Board::is_knight_move(tail, sq) {
            return Err(PathError::NotAdjacent { tail, to: sq });
        }
        self.positions[self.board.index(sq)] = Some(self.squares.len());
        self.squares.push(sq);
        Ok(())
    }

    /// Reverses `squares[j + 1..]` in place and re-indexes that range.
    ///
    /// The prefix up to and including `j` is untouched and the length is
    /// unchanged. The square formerly at `j + 1` becomes the new tail.
    /// Adjacency across the seam holds only when `squares[j]` is a knight
    /// neighbor of the old tail, which the reroute engine guarantees.
    pub fn splice_reverse(&mut self, j: usize) -> Result<(), PathError> {
        let len = self.squares.len();
        if j + 1 >= len {
            return Err(PathError::SpliceOutOfRange { index: j, len });
        }
        self.squares[j + 1..].reverse();
        for i in j + 1..len {
            let sq = self.squares[i];
            self.positions[self.board.index(sq)] = Some(i);
        }
        Ok(())
    }
}
