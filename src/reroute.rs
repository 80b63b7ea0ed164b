//! Reroute: repair a dead end without backtracking.
//!
//! When the tail `t` has no unvisited neighbor, pick a visited neighbor
//! `c = path[j]` of `t` (other than `t`'s predecessor) and reverse
//! `path[j + 1..]`. The path now runs `… c, t, …, path[j + 1]`: still a
//! legal knight path of the same length, ending at a different square
//! that may have unvisited exits.

use std::collections::VecDeque;

use rand::Rng;

use crate::board::Square;
use crate::path::{PathError, PathState};

/// How to choose among reroute candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RerouteStrategy {
    /// Uniform choice over all candidates.
    #[default]
    Random,

    /// Uniform choice over the candidates whose new tail is closest (in
    /// knight moves, ignoring occupancy) to an unvisited square.
    RankGuided,
}

/// A splice that was applied to the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Splice {
    /// Index of the pivot square `c`; `path[index + 1..]` was reversed.
    pub index: usize,
    /// The pivot square.
    pub pivot: Square,
    /// Tail before the splice.
    pub old_tail: Square,
    /// Tail after the splice.
    pub new_tail: Square,
}

/// Path indices `j` of the visited neighbors of the tail, excluding the
/// tail's predecessor. Returned in neighbor-offset order.
pub fn candidates(path: &PathState) -> Vec<usize> {
    let tail = path.tail();
    let predecessor = path.predecessor();
    path.board()
        .neighbors(tail)
        .filter(|&n| Some(n) != predecessor)
        .filter_map(|n| path.index_of(n))
        .collect()
}

/// Knight distance from `from` to the nearest unvisited square, walking
/// through visited squares freely. `None` when the board is full or no
/// unvisited square is reachable.
pub fn rank(path: &PathState, from: Square) -> Option<usize> {
    let board = path.board();
    if !path.is_visited(from) {
        return Some(0);
    }
    let mut dist = vec![usize::MAX; board.square_count()];
    let mut queue = VecDeque::new();
    dist[board.index(from)] = 0;
    queue.push_back(from);

    while let Some(sq) = queue.pop_front() {
        let d = dist[board.index(sq)];
        for n in board.neighbors(sq) {
            let slot = &mut dist[board.index(n)];
            if *slot != usize::MAX {
                continue;
            }
            if !path.is_visited(n) {
                return Some(d + 1);
            }
            *slot = d + 1;
            queue.push_back(n);
        }
    }
    None
}

/// Chooses a splice index for the stuck tail, or `None` when there is no
/// candidate.
pub fn choose<R: Rng>(path: &PathState, strategy: RerouteStrategy, rng: &mut R) -> Option<usize> {
    let mut pool = candidates(path);
    if pool.is_empty() {
        return None;
    }

    if strategy == RerouteStrategy::RankGuided {
        // Reversal leaves the visited set unchanged, so the prospective
        // tail's rank can be measured on the current path.
        let squares = path.squares();
        let ranked: Vec<(usize, usize)> = pool
            .iter()
            .map(|&j| (j, rank(path, squares[j + 1]).unwrap_or(usize::MAX)))
            .collect();
        let best = ranked.iter().map(|&(_, r)| r).min().unwrap_or(usize::MAX);
        pool = ranked
            .into_iter()
            .filter(|&(_, r)| r == best)
            .map(|(j, _)| j)
            .collect();
    }

    Some(pool[rng.random_range(0..pool.len())])
}

/// Applies one reroute to a stuck path.
///
/// Returns `Ok(None)` when the tail has no reroute candidate.
pub fn reroute<R: Rng>(
    path: &mut PathState,
    strategy: RerouteStrategy,
    rng: &mut R,
) -> Result<Option<Splice>, PathError> {
    let Some(index) = choose(path, strategy, rng) else {
        return Ok(None);
    };
    let old_tail = path.tail();
    let pivot = path.squares()[index];
    path.splice_reverse(index)?;
    Ok(Some(Splice {
        index,
        pivot,
        old_tail,
        new_tail: path.tail(),
    }))
}
