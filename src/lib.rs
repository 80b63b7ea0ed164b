//! Knight's tour search without backtracking.
//!
//! Builds a tour greedily with Warnsdorff's rule and repairs dead ends by
//! rerouting: the path is reversed from a visited neighbor of the stuck
//! square onward, which hands the knight a new endpoint without undoing
//! any progress.
//!
//! - [`board`]: squares, knight-move adjacency, path validation.
//! - [`path`]: the visited sequence and its inverse index.
//! - [`warnsdorff`]: forward-move selection.
//! - [`reroute`]: dead-end repair.
//! - [`search`]: the driver, its configuration, and results.
//!
//! # Example
//!
//! ```
//! use knight_reroute::board::Square;
//! use knight_reroute::search::solve;
//!
//! let tour = solve(5, Some(Square::new(0, 0)), Some(1), 1000).unwrap();
//! assert_eq!(tour.path.len(), 25);
//! println!("{tour}");
//! ```
//!
//! # Features
//!
//! - `parallel`: [`search::TourRunner::race`] runs attempts on rayon.
//! - `serde`: `Serialize`/`Deserialize` for squares, tours, and stats.

pub mod board;
pub mod path;
pub mod reroute;
pub mod search;
pub mod warnsdorff;
