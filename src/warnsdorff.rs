//! Warnsdorff's rule: move to the unvisited neighbor with the fewest
//! onward unvisited neighbors.
//!
//! Squares with few remaining exits are the ones most likely to be cut
//! off later, so they are taken first. Ties are broken uniformly at
//! random.
//!
//! # Reference
//!
//! Warnsdorff, H. C. (1823), "Des Rösselsprunges einfachste und allgemeinste
//! Lösung".

use rand::Rng;

use crate::board::{Square, KNIGHT_OFFSETS};
use crate::path::PathState;

/// Onward degree: number of unvisited neighbors of `sq`.
pub fn onward_degree(path: &PathState, sq: Square) -> usize {
    path.unvisited_neighbors(sq).count()
}

/// Picks the next square from the current tail, or `None` when stuck.
pub fn select_next<R: Rng>(path: &PathState, rng: &mut R) -> Option<Square> {
    let mut best_degree = usize::MAX;
    // A knight has at most eight exits; keep the ties on the stack.
    let mut best = [Square::new(0, 0); KNIGHT_OFFSETS.len()];
    let mut count = 0;

    for candidate in path.unvisited_neighbors(path.tail()) {
        let degree = onward_degree(path, candidate);
        if degree < best_degree {
            best_degree = degree;
            best[0] = candidate;
            count = 1;
        } else if degree == best_degree {
            best[count] = candidate;
            count += 1;
        }
    }

    match count {
        0 => None,
        1 => Some(best[0]),
        n => Some(best[rng.random_range(0..n)]),
    }
}
