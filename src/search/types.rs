//! Search outcomes.

use std::fmt;

use crate::board::{Board, Square};
use crate::path::PathError;

/// Counters collected during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Seed the run's generator was created from.
    pub seed: u64,
    /// Squares appended by the Warnsdorff selector.
    pub forward_moves: usize,
    /// Splices applied by the reroute engine.
    pub reroutes: usize,
}

/// Which of the two reroute exhaustion triggers fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Exhaustion {
    /// The stuck tail had no visited neighbor besides its predecessor.
    #[display("no reroute candidates")]
    NoCandidates,
    /// `max_reroute_attempts` was reached.
    #[display("reroute budget exceeded")]
    BudgetExceeded,
}

/// Why a search stopped short of a full tour.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum FailureReason {
    /// The start square has no knight neighbors.
    #[display("no legal move from the start square")]
    NoLegalStart,
    /// Rerouting could not make further progress.
    #[display("exhausted reroutes: {_0}")]
    ExhaustedReroutes(Exhaustion),
    /// A cancel flag stopped the run between steps.
    #[display("cancelled")]
    Cancelled,
    /// The configuration was rejected before searching.
    #[display("invalid configuration: {_0}")]
    InvalidConfig(String),
    /// A path mutation was rejected. Indicates a driver bug.
    #[display("path invariant violated: {_0}")]
    Internal(PathError),
}

/// A failed search: the reason plus the furthest path reached.
///
/// The path is a legal, duplicate-free knight path and can be replayed
/// for diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{reason} after {} of {} squares", path.len(), Board::new(*board_size).square_count())]
pub struct TourFailure {
    /// Why the search stopped.
    pub reason: FailureReason,
    /// Board side length.
    pub board_size: usize,
    /// Partial path at the time of failure.
    pub path: Vec<Square>,
    /// Run counters.
    pub stats: SearchStats,
}

/// A complete knight's tour.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    /// Board side length.
    pub board_size: usize,
    /// Every square exactly once, consecutive squares a knight move apart.
    pub path: Vec<Square>,
    /// Run counters.
    pub stats: SearchStats,
}

/// Outcome of [`TourRunner::run`](super::TourRunner::run).
pub type TourResult = Result<Tour, TourFailure>;

impl Tour {
    /// The board this tour covers.
    pub fn board(&self) -> Board {
        Board::new(self.board_size)
    }

    /// First square of the tour. `None` only for an empty path, which the
    /// search never produces.
    pub fn start(&self) -> Option<Square> {
        self.path.first().copied()
    }

    /// Last square of the tour.
    pub fn end(&self) -> Option<Square> {
        self.path.last().copied()
    }

    /// Whether the path is a legal tour covering the whole board.
    pub fn is_complete(&self) -> bool {
        let board = self.board();
        self.path.len() == board.square_count() && board.validate_path(&self.path).is_ok()
    }

    /// Whether the end square is a knight move from the start (a closed tour).
    pub fn is_closed(&self) -> bool {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => self.path.len() > 2 && Board::is_knight_move(start, end),
            _ => false,
        }
    }

    /// Row-major grid of 1-based move numbers.
    pub fn move_numbers(&self) -> Vec<Vec<usize>> {
        let mut grid = vec![vec![0; self.board_size]; self.board_size];
        for (i, sq) in self.path.iter().enumerate() {
            grid[sq.row][sq.col] = i + 1;
        }
        grid
    }
}

impl fmt::Display for Tour {
    /// Prints the move-number grid, right-aligned.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.path.len().to_string().len() + 1;
        for row in self.move_numbers() {
            for n in row {
                write!(f, "{n:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
