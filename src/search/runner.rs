//! Search driver.
//!
//! # Algorithm
//!
//! 1. Start a path at the configured (or a random) square
//! 2. While the path does not cover the board:
//!    a. Ask the Warnsdorff selector for the next square and append it
//!    b. If stuck, reroute: splice-reverse the path at a visited neighbor
//!       of the tail, counting the attempt against the budget
//!    c. Fail when no reroute candidate exists or the budget is spent
//!
//! The path only ever grows or is reordered, so the failure path returned
//! is also the furthest one reached.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::TourConfig;
use super::types::{Exhaustion, FailureReason, SearchStats, Tour, TourFailure, TourResult};
use crate::board::{Board, Square};
use crate::path::PathState;
use crate::{reroute, warnsdorff};

/// Driver states. `Complete` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SearchState {
    Searching,
    Rerouting,
    Complete,
    Failed(FailureReason),
}

/// Searches for knight's tours.
///
/// # Usage
///
/// ```
/// use knight_reroute::board::Square;
/// use knight_reroute::search::{TourConfig, TourRunner};
///
/// let config = TourConfig::new(8).with_start(Square::new(0, 0)).with_seed(42);
/// let tour = TourRunner::run(&config).expect("8x8 tour");
/// assert_eq!(tour.path.len(), 64);
/// ```
pub struct TourRunner;

impl TourRunner {
    /// Runs one search.
    pub fn run(config: &TourConfig) -> TourResult {
        Self::run_with_cancel(config, None)
    }

    /// Runs one search with an optional cancellation token.
    ///
    /// The flag is polled between driver steps, never inside a splice, so
    /// a cancelled run still returns a legal partial path.
    pub fn run_with_cancel(config: &TourConfig, cancel: Option<Arc<AtomicBool>>) -> TourResult {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut stats = SearchStats {
            seed,
            ..SearchStats::default()
        };

        let failure = |reason, path: Vec<Square>, stats| TourFailure {
            reason,
            board_size: config.board_size,
            path,
            stats,
        };

        if let Err(msg) = config.validate() {
            return Err(failure(FailureReason::InvalidConfig(msg), Vec::new(), stats));
        }

        let board = config.board();
        let mut rng = StdRng::seed_from_u64(seed);
        let start = config
            .start
            .unwrap_or_else(|| board.square_at(rng.random_range(0..board.square_count())));

        let mut path = match PathState::new(board, start) {
            Ok(path) => path,
            Err(e) => return Err(failure(FailureReason::Internal(e), Vec::new(), stats)),
        };

        let mut state = if path.is_complete() {
            SearchState::Complete
        } else if board.degree(start) == 0 {
            SearchState::Failed(FailureReason::NoLegalStart)
        } else {
            SearchState::Searching
        };

        loop {
            if let Some(ref flag) = cancel {
                if matches!(state, SearchState::Searching | SearchState::Rerouting)
                    && flag.load(Ordering::Relaxed)
                {
                    state = SearchState::Failed(FailureReason::Cancelled);
                }
            }

            state = match state {
                SearchState::Searching => match warnsdorff::select_next(&path, &mut rng) {
                    Some(next) => match path.append(next) {
                        Ok(()) => {
                            stats.forward_moves += 1;
                            log::trace!("move {} -> {next}", path.len());
                            if path.is_complete() {
                                SearchState::Complete
                            } else {
                                SearchState::Searching
                            }
                        }
                        Err(e) => SearchState::Failed(FailureReason::Internal(e)),
                    },
                    None => SearchState::Rerouting,
                },

                SearchState::Rerouting => {
                    if stats.reroutes >= config.max_reroute_attempts {
                        SearchState::Failed(FailureReason::ExhaustedReroutes(
                            Exhaustion::BudgetExceeded,
                        ))
                    } else {
                        match reroute::reroute(&mut path, config.strategy, &mut rng) {
                            Ok(Some(splice)) => {
                                stats.reroutes += 1;
                                log::debug!(
                                    "reroute #{} at index {}: tail {} -> {}",
                                    stats.reroutes,
                                    splice.index,
                                    splice.old_tail,
                                    splice.new_tail
                                );
                                SearchState::Searching
                            }
                            Ok(None) => SearchState::Failed(FailureReason::ExhaustedReroutes(
                                Exhaustion::NoCandidates,
                            )),
                            Err(e) => SearchState::Failed(FailureReason::Internal(e)),
                        }
                    }
                }

                SearchState::Complete => {
                    log::debug!(
                        "tour complete on {n}x{n} from {start}: {} moves, {} reroutes (seed {seed})",
                        stats.forward_moves,
                        stats.reroutes,
                        n = config.board_size
                    );
                    return Ok(Tour {
                        board_size: config.board_size,
                        path: path.into_squares(),
                        stats,
                    });
                }

                SearchState::Failed(reason) => {
                    log::debug!(
                        "search failed on {n}x{n} from {start}: {reason} at {}/{} (seed {seed})",
                        path.len(),
                        board.square_count(),
                        n = config.board_size
                    );
                    return Err(failure(reason, path.into_squares(), stats));
                }
            };
        }
    }

    /// Runs `attempts` independent searches and returns the first tour.
    ///
    /// Attempt `i` uses seed `base + i`, where `base` is the configured
    /// seed or a random one. With the `parallel` feature the attempts race
    /// on the rayon pool and the first success cancels the rest; otherwise
    /// they run in order and stop at the first success. When several
    /// attempts succeed, the one with the lowest index wins.
    ///
    /// On failure, returns every attempt's failure in attempt order.
    pub fn race(config: &TourConfig, attempts: usize) -> Result<Tour, Vec<TourFailure>> {
        let base = config.seed.unwrap_or_else(rand::random);
        let configs: Vec<TourConfig> = (0..attempts as u64)
            .map(|i| config.clone().with_seed(base.wrapping_add(i)))
            .collect();
        let cancel = Arc::new(AtomicBool::new(false));

        let outcomes = run_attempts(&configs, &cancel);

        let mut failures = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                Ok(tour) => return Ok(tour),
                Err(failure) => failures.push(failure),
            }
        }
        Err(failures)
    }
}

#[cfg(feature = "parallel")]
fn run_attempts(configs: &[TourConfig], cancel: &Arc<AtomicBool>) -> Vec<TourResult> {
    use rayon::prelude::*;

    configs
        .par_iter()
        .map(|config| {
            let outcome = TourRunner::run_with_cancel(config, Some(Arc::clone(cancel)));
            if outcome.is_ok() {
                cancel.store(true, Ordering::Relaxed);
            }
            outcome
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_attempts(configs: &[TourConfig], cancel: &Arc<AtomicBool>) -> Vec<TourResult> {
    let mut outcomes = Vec::with_capacity(configs.len());
    for config in configs {
        let outcome = TourRunner::run_with_cancel(config, Some(Arc::clone(cancel)));
        let done = outcome.is_ok();
        outcomes.push(outcome);
        if done {
            break;
        }
    }
    outcomes
}

/// Searches for a tour on an `n×n` board.
///
/// Thin wrapper over [`TourRunner::run`] with the default reroute strategy.
pub fn solve(
    board_size: usize,
    start: Option<Square>,
    seed: Option<u64>,
    max_reroute_attempts: usize,
) -> TourResult {
    let config = TourConfig {
        board_size,
        start,
        seed,
        max_reroute_attempts,
        ..TourConfig::default()
    };
    TourRunner::run(&config)
}

/// Whether `path` is a legal knight path on an `n×n` board. Used by
/// callers that replay a failure's partial path.
pub fn is_legal_path(board_size: usize, path: &[Square]) -> bool {
    Board::new(board_size).validate_path(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::MAX_BOARD_SIZE;
    use crate::reroute::RerouteStrategy;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn sq(r: usize, c: usize) -> Square {
        Square::new(r, c)
    }

    fn assert_full_tour(tour: &Tour, n: usize) {
        assert_eq!(tour.path.len(), n * n);
        let distinct: HashSet<Square> = tour.path.iter().copied().collect();
        assert_eq!(distinct.len(), n * n);
        assert!(is_legal_path(n, &tour.path));
        assert!(tour.is_complete());
    }

    #[test]
    fn test_5x5_from_corner() {
        let tour = solve(5, Some(sq(0, 0)), Some(1), 1000).expect("5x5 tour from corner");
        assert_full_tour(&tour, 5);
        assert_eq!(tour.start(), Some(sq(0, 0)));
        assert_eq!(tour.stats.seed, 1);
        assert_eq!(tour.stats.forward_moves, 24);
    }

    #[test]
    fn test_8x8_from_corner() {
        let tour = solve(8, Some(sq(0, 0)), Some(42), 1000).expect("8x8 tour from corner");
        assert_full_tour(&tour, 8);
        assert_eq!(tour.path.len(), 64);
    }

    #[test]
    fn test_8x8_many_seeds() {
        for seed in 0..20 {
            let tour = solve(8, Some(sq(0, 0)), Some(seed), 1000)
                .unwrap_or_else(|f| panic!("seed {seed}: {f}"));
            assert_full_tour(&tour, 8);
        }
    }

    #[test]
    fn test_various_sizes() {
        for (n, start) in [(5, sq(2, 2)), (6, sq(0, 0)), (7, sq(0, 0)), (10, sq(0, 0)), (12, sq(3, 4))] {
            let tour = solve(n, Some(start), Some(7), 1000)
                .unwrap_or_else(|f| panic!("{n}x{n} from {start}: {f}"));
            assert_full_tour(&tour, n);
        }
    }

    #[test]
    fn test_deterministic_under_fixed_seed() {
        let a = solve(8, Some(sq(0, 0)), Some(42), 1000);
        let b = solve(8, Some(sq(0, 0)), Some(42), 1000);
        assert_eq!(a, b);

        let c = solve(4, None, Some(9), 50);
        let d = solve(4, None, Some(9), 50);
        assert_eq!(c, d);
    }

    #[test]
    fn test_random_start_is_reported() {
        let tour = solve(8, None, Some(5), 1000).expect("8x8 tour");
        assert_full_tour(&tour, 8);
        let again = solve(8, None, Some(5), 1000).expect("8x8 tour");
        assert_eq!(tour.start(), again.start());
    }

    #[test]
    fn test_4x4_never_completes() {
        let board = Board::new(4);
        for start in board.squares() {
            for seed in 0..4 {
                let failure = solve(4, Some(start), Some(seed), 200)
                    .expect_err("4x4 has no knight's tour");
                assert!(failure.reason.is_exhausted_reroutes());
                assert!(is_legal_path(4, &failure.path));
                assert!(failure.path.len() < 16);
                assert_eq!(failure.path[0], start);
            }
        }
    }

    #[test]
    fn test_5x5_odd_color_start_fails() {
        // 13 squares of one color, 12 of the other: a tour must start on the
        // majority color, which (0, 1) is not.
        let failure = solve(5, Some(sq(0, 1)), Some(1), 300).expect_err("no tour from (0, 1)");
        assert!(failure.reason.is_exhausted_reroutes());
        assert!(is_legal_path(5, &failure.path));
    }

    #[test]
    fn test_degenerate_boards() {
        let one = solve(1, None, Some(0), 10).expect("1x1 is trivially toured");
        assert_eq!(one.path, vec![sq(0, 0)]);

        let two = solve(2, Some(sq(1, 1)), Some(0), 10).unwrap_err();
        assert_eq!(two.reason, FailureReason::NoLegalStart);
        assert_eq!(two.path, vec![sq(1, 1)]);

        let center = solve(3, Some(sq(1, 1)), Some(0), 10).unwrap_err();
        assert_eq!(center.reason, FailureReason::NoLegalStart);

        // The ring of 3x3 is reachable but the center never is.
        let ring = solve(3, Some(sq(0, 0)), Some(0), 10).unwrap_err();
        assert!(ring.reason.is_exhausted_reroutes());
        assert_eq!(ring.path.len(), 8);
    }

    #[test]
    fn test_zero_budget_is_pure_warnsdorff() {
        let failure = solve(4, Some(sq(0, 0)), Some(3), 0).unwrap_err();
        assert_eq!(failure.stats.reroutes, 0);
        assert!(matches!(
            failure.reason,
            FailureReason::ExhaustedReroutes(Exhaustion::BudgetExceeded)
                | FailureReason::ExhaustedReroutes(Exhaustion::NoCandidates)
        ));
    }

    #[test]
    fn test_budget_is_respected() {
        let failure = solve(4, Some(sq(0, 0)), Some(3), 25).unwrap_err();
        assert!(failure.stats.reroutes <= 25);
    }

    #[test]
    fn test_invalid_config() {
        let failure = TourRunner::run(&TourConfig::new(0)).unwrap_err();
        assert!(failure.reason.is_invalid_config());
        assert!(failure.path.is_empty());

        let failure = solve(5, Some(sq(5, 5)), None, 10).unwrap_err();
        assert!(failure.reason.is_invalid_config());
    }

    #[test]
    fn test_oversized_board_fails_without_allocating() {
        let failure = solve(1 << 20, Some(sq(0, 0)), Some(0), 0).unwrap_err();
        assert!(failure.reason.is_invalid_config());
        assert!(failure.path.is_empty());

        let failure = solve(MAX_BOARD_SIZE + 1, None, Some(0), 0).unwrap_err();
        assert!(failure.reason.is_invalid_config());
    }

    #[test]
    fn test_rank_guided_strategy() {
        let config = TourConfig::new(8)
            .with_start(sq(0, 0))
            .with_seed(42)
            .with_strategy(RerouteStrategy::RankGuided);
        let tour = TourRunner::run(&config).expect("8x8 tour");
        assert_full_tour(&tour, 8);
    }

    #[test]
    fn test_cancellation() {
        // Set before running so the first step observes it.
        let cancel = Arc::new(AtomicBool::new(true));
        let config = TourConfig::new(8).with_start(sq(0, 0)).with_seed(1);
        let failure = TourRunner::run_with_cancel(&config, Some(cancel)).unwrap_err();
        assert_eq!(failure.reason, FailureReason::Cancelled);
        assert_eq!(failure.path, vec![sq(0, 0)]);
    }

    #[test]
    fn test_race_returns_tour() {
        let config = TourConfig::new(8).with_start(sq(0, 0)).with_seed(100);
        let tour = TourRunner::race(&config, 4).expect("one of four attempts succeeds");
        assert_full_tour(&tour, 8);
        assert!((100..104).contains(&tour.stats.seed));
    }

    #[test]
    fn test_race_collects_failures() {
        let config = TourConfig::new(4)
            .with_start(sq(0, 0))
            .with_seed(0)
            .with_max_reroute_attempts(20);
        let failures = TourRunner::race(&config, 3).unwrap_err();
        assert_eq!(failures.len(), 3);
        let seeds: Vec<u64> = failures.iter().map(|f| f.stats.seed).collect();
        assert_eq!(seeds, vec![0, 1, 2]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_every_outcome_is_a_legal_path(
            n in 1usize..9,
            seed in any::<u64>(),
            budget in 0usize..200,
        ) {
            match solve(n, None, Some(seed), budget) {
                Ok(tour) => {
                    prop_assert!(tour.is_complete());
                    prop_assert!(tour.stats.reroutes <= budget);
                }
                Err(failure) => {
                    prop_assert!(!failure.path.is_empty());
                    prop_assert!(failure.path.len() < n * n);
                    prop_assert!(is_legal_path(n, &failure.path));
                    prop_assert!(failure.stats.reroutes <= budget);
                }
            }
        }
    }
}
