//! Match detection for match-3 boards.
//!
//! This crate finds straight runs of three or more same-kind tiles and merges
//! runs that share a cell into a single [`MatchGroup`], so T, L, and plus
//! shapes are removed (and scored) as one unit.
//!
//! # Overview
//!
//! - [`MatchDetector`] scans a borrowed [`Board`] either around a set of
//!   changed ("dirty") cells or across the whole board.
//! - [`MatchGroup`] is the merged result, tagged with the [`MatchAxes`] that
//!   contributed runs.
//! - [`find_valid_swaps`] lists every adjacent swap that would create a match.
//!
//! [`Board`]: tessera_core::Board
//!
//! # Examples
//!
//! ```
//! use tessera_core::{Board, Position};
//! use tessera_matcher::{MatchAxes, MatchDetector};
//!
//! let board: Board = "
//!     BCDBC
//!     CDADB
//!     DAAAC
//!     BCAEB
//! "
//! .parse()?;
//!
//! let groups = MatchDetector::new().find_at(&board, [Position::new(1, 2)]);
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].len(), 5);
//! assert_eq!(groups[0].axes(), MatchAxes::HORIZONTAL | MatchAxes::VERTICAL);
//! # Ok::<(), tessera_core::ParseBoardError>(())
//! ```

pub use self::{
    detector::MatchDetector,
    group::{MatchAxes, MatchGroup},
    run::{Axis, Run},
    swaps::{ValidSwap, find_valid_swaps},
};

mod detector;
mod group;
mod run;
mod swaps;
