//! Search configuration.

use crate::board::{Board, Square, MAX_BOARD_SIZE};
use crate::reroute::RerouteStrategy;

/// Configuration for a knight's tour search.
///
/// # Examples
///
/// ```
/// use knight_reroute::board::Square;
/// use knight_reroute::search::TourConfig;
///
/// let config = TourConfig::default()
///     .with_board_size(6)
///     .with_start(Square::new(0, 0))
///     .with_seed(42)
///     .with_max_reroute_attempts(500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct TourConfig {
    /// Board side length `N`.
    pub board_size: usize,

    /// Origin of the tour. `None` picks a square uniformly at random.
    pub start: Option<Square>,

    /// Random seed for reproducibility. `None` draws one; the seed used is
    /// reported in the result either way.
    pub seed: Option<u64>,

    /// Maximum number of reroutes before giving up. 0 = pure Warnsdorff.
    pub max_reroute_attempts: usize,

    /// How reroute candidates are chosen.
    pub strategy: RerouteStrategy,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            board_size: 8,
            start: None,
            seed: None,
            max_reroute_attempts: 1000,
            strategy: RerouteStrategy::default(),
        }
    }
}

impl TourConfig {
    /// Creates a default configuration for an `n×n` board.
    pub fn new(n: usize) -> Self {
        Self::default().with_board_size(n)
    }

    pub fn with_board_size(mut self, n: usize) -> Self {
        self.board_size = n;
        self
    }

    pub fn with_start(mut self, start: Square) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_reroute_attempts(mut self, n: usize) -> Self {
        self.max_reroute_attempts = n;
        self
    }

    pub fn with_strategy(mut self, strategy: RerouteStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The board described by this configuration.
    pub fn board(&self) -> Board {
        Board::new(self.board_size)
    }

    /// Validates the configuration.
    ///
    /// Rejects sizes above [`MAX_BOARD_SIZE`] so the per-run arena is never
    /// larger than the search can allocate.
    pub fn validate(&self) -> Result<(), String> {
        if self.board_size == 0 {
            return Err("board_size must be positive".into());
        }
        if Board::try_new(self.board_size).is_none() {
            return Err(format!(
                "board_size {} exceeds the maximum of {MAX_BOARD_SIZE}",
                self.board_size
            ));
        }
        if let Some(start) = self.start {
            if !self.board().contains(start) {
                return Err(format!(
                    "start {start} is outside the {n}x{n} board",
                    n = self.board_size
                ));
            }
        }
        Ok(())
    }
}
