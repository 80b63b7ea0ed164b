//! Board geometry.
//!
//! A square board of side `N` with knight-move adjacency. Everything in
//! this module is a pure function of the board size: no visited state,
//! no randomness.

mod geometry;
mod square;

pub use geometry::{Board, PathViolation, KNIGHT_OFFSETS, MAX_BOARD_SIZE};
pub use square::Square;
