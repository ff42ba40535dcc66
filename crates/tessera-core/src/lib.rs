//! Core data structures for match-3 board simulation.
//!
//! This crate provides the value types and the grid container shared by the
//! matcher, generator, and game crates.
//!
//! # Overview
//!
//! - [`tile`]: [`TileKind`] identifiers and the [`TileSet`] bit mask used for
//!   fast intersection tests.
//! - [`position`]: [`Position`] coordinates and swap [`Direction`]s.
//! - [`board`]: the [`Board`] grid with get/set/clear/swap/collapse primitives.
//!
//! # Coordinates
//!
//! Row 0 is the ground (bottom) row and rows increase upward. Column 0 is the
//! leftmost column. Gravity pulls tiles toward row 0, so vacated cells end up
//! at the top of a column after [`Board::collapse_column`].
//!
//! # Examples
//!
//! ```
//! use tessera_core::{Board, Position, TileKind};
//!
//! let mut board = Board::new(3, 3);
//! board.set(Position::new(2, 1), TileKind::new(0))?;
//!
//! // Collapse pulls the tile down to the ground row.
//! let moves = board.collapse_column(1)?;
//! assert_eq!(moves.len(), 1);
//! assert_eq!(board.get(Position::new(0, 1))?, Some(TileKind::new(0)));
//! # Ok::<(), tessera_core::BoardError>(())
//! ```

pub mod board;
pub mod position;
pub mod tile;

pub use self::{
    board::{Board, BoardError, Cell, ParseBoardError, TileMove, TileSpawn},
    position::{Direction, Position},
    tile::{TileKind, TileSet},
};
