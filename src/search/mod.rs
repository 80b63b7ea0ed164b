//! Search driver.
//!
//! Alternates Warnsdorff forward moves with splice-and-reverse reroutes
//! until the path covers the board, no reroute is possible, or the
//! reroute budget runs out.
//!
//! # References
//!
//! - Warnsdorff (1823), "Des Rösselsprunges einfachste und allgemeinste Lösung"
//! - Pohl (1967), "A method for finding Hamilton paths and Knight's tours"

mod config;
mod runner;
mod types;

pub use config::TourConfig;
pub use runner::{is_legal_path, solve, TourRunner};
pub use types::{Exhaustion, FailureReason, SearchStats, Tour, TourFailure, TourResult};
