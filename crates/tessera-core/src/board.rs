//! The tile grid.
//!
//! [`Board`] owns a `rows × cols` grid of [`Cell`]s stored row-major in a flat
//! vector. Every operation is applied immediately; there is no buffering of
//! pending changes.
//!
//! # Text format
//!
//! Boards render to (and parse from) one line per row, **top row first**.
//! Tile kinds are written as letters (`A` = kind 0) and vacant cells as `.`.
//! Whitespace inside a line is ignored and blank lines are skipped, so tests
//! can lay boards out freely:
//!
//! ```
//! use tessera_core::{Board, Position, TileKind};
//!
//! let board: Board = "
//!     A . C
//!     B B A
//! "
//! .parse()?;
//!
//! assert_eq!(board.rows(), 2);
//! assert_eq!(board.tile(Position::new(0, 0)), Some(TileKind::new(1)));
//! assert_eq!(board.tile(Position::new(1, 1)), None);
//! assert_eq!(board.to_string(), "A.C\nBBA\n");
//! # Ok::<(), tessera_core::ParseBoardError>(())
//! ```

use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    str::FromStr,
};

use crate::{Position, TileKind};

/// Error returned when a position or column lies outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// The position is outside `[0, rows) × [0, cols)`.
    #[display("position {pos} is outside the {rows}x{cols} board")]
    OutOfBounds {
        /// Offending position.
        pos: Position,
        /// Board rows.
        rows: usize,
        /// Board columns.
        cols: usize,
    },
    /// The column index is not below the column count.
    #[display("column {col} is outside a board with {cols} columns")]
    ColumnOutOfBounds {
        /// Offending column.
        col: usize,
        /// Board columns.
        cols: usize,
    },
}

/// Error returned when parsing a board from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    /// The input has no rows.
    #[display("board text has no rows")]
    Empty,
    /// A row has a different width from the first row.
    #[display("row {line} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based line index in the input (top row is 0).
        line: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },
    /// A character is neither a tile letter nor `.`.
    #[display("invalid board character {_0:?}")]
    InvalidChar(#[error(not(source))] char),
}

/// State of one grid cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    tile: Option<TileKind>,
    matched: bool,
}

impl Cell {
    /// Returns the tile in this cell, or `None` if the cell is vacant.
    #[must_use]
    pub const fn tile(self) -> Option<TileKind> {
        self.tile
    }

    /// Returns `true` if the cell has no tile.
    #[must_use]
    pub const fn is_vacant(self) -> bool {
        self.tile.is_none()
    }

    /// Returns the transient matched flag.
    #[must_use]
    pub const fn is_matched(self) -> bool {
        self.matched
    }
}

/// A tile that moved from one cell to another during a collapse or swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMove {
    /// Cell the tile left.
    pub from: Position,
    /// Cell the tile now occupies.
    pub to: Position,
    /// The moved tile.
    pub tile: TileKind,
}

/// A tile placed into a previously vacant cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileSpawn {
    /// Cell that received the tile.
    pub pos: Position,
    /// The new tile.
    pub tile: TileKind,
}

/// A fixed-size grid of tile cells.
///
/// # Examples
///
/// ```
/// use tessera_core::{Board, Position, TileKind};
///
/// let mut board = Board::new(9, 9);
/// let a = Position::new(0, 0);
/// let b = Position::new(0, 1);
/// board.set(a, TileKind::new(0))?;
/// board.set(b, TileKind::new(1))?;
///
/// board.swap(a, b)?;
/// assert_eq!(board.get(a)?, Some(TileKind::new(1)));
/// assert_eq!(board.get(b)?, Some(TileKind::new(0)));
///
/// assert!(board.get(Position::new(9, 0)).is_err());
/// # Ok::<(), tessera_core::BoardError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board with every cell vacant.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board dimensions must be non-zero");
        Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `true` if `pos` lies on the board.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.row() < self.rows && pos.col() < self.cols
    }

    fn index(&self, pos: Position) -> Result<usize, BoardError> {
        if self.contains(pos) {
            Ok(pos.row() * self.cols + pos.col())
        } else {
            Err(BoardError::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    fn check_column(&self, col: usize) -> Result<(), BoardError> {
        if col < self.cols {
            Ok(())
        } else {
            Err(BoardError::ColumnOutOfBounds {
                col,
                cols: self.cols,
            })
        }
    }

    /// Returns the cell at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `pos` is outside the board.
    pub fn cell(&self, pos: Position) -> Result<Cell, BoardError> {
        Ok(self.cells[self.index(pos)?])
    }

    /// Returns the tile at `pos`, or `None` if the cell is vacant.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `pos` is outside the board.
    pub fn get(&self, pos: Position) -> Result<Option<TileKind>, BoardError> {
        Ok(self.cell(pos)?.tile)
    }

    /// Returns the tile at `pos` for scanning code.
    ///
    /// Vacant cells and positions outside the board both yield `None`; use
    /// [`Board::get`] where the two must be told apart.
    #[must_use]
    pub fn tile(&self, pos: Position) -> Option<TileKind> {
        self.index(pos).ok().and_then(|i| self.cells[i].tile)
    }

    /// Places `tile` at `pos` and clears its matched flag.
    ///
    /// Returns the tile previously in the cell.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `pos` is outside the board.
    pub fn set(&mut self, pos: Position, tile: TileKind) -> Result<Option<TileKind>, BoardError> {
        let i = self.index(pos)?;
        let previous = self.cells[i].tile.replace(tile);
        self.cells[i].matched = false;
        Ok(previous)
    }

    /// Marks the cell at `pos` vacant.
    ///
    /// The matched flag is left as is so a resolution pass can still tell
    /// which vacancies it created. Returns the removed tile.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `pos` is outside the board.
    pub fn clear(&mut self, pos: Position) -> Result<Option<TileKind>, BoardError> {
        let i = self.index(pos)?;
        Ok(self.cells[i].tile.take())
    }

    /// Returns the matched flag of the cell at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `pos` is outside the board.
    pub fn is_matched(&self, pos: Position) -> Result<bool, BoardError> {
        Ok(self.cell(pos)?.matched)
    }

    /// Sets the matched flag of the cell at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `pos` is outside the board.
    pub fn mark_matched(&mut self, pos: Position) -> Result<(), BoardError> {
        let i = self.index(pos)?;
        self.cells[i].matched = true;
        Ok(())
    }

    /// Clears every matched flag on the board.
    pub fn clear_matched_flags(&mut self) {
        for cell in &mut self.cells {
            cell.matched = false;
        }
    }

    /// Exchanges the tiles and matched flags of two cells.
    ///
    /// Adjacency is not checked; game rules decide which swaps are legal.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if either position is outside the board.
    pub fn swap(&mut self, a: Position, b: Position) -> Result<(), BoardError> {
        let i = self.index(a)?;
        let j = self.index(b)?;
        self.cells.swap(i, j);
        Ok(())
    }

    /// Compacts the tiles of column `col` toward row 0.
    ///
    /// Occupied cells keep their relative order and vacated cells end up at
    /// the top of the column. Moved cells carry their matched flag with them.
    /// Returns one [`TileMove`] per tile that changed row, bottom first; a
    /// column without vacancies below any tile yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ColumnOutOfBounds`] if `col` is not below [`Board::cols`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_core::{Board, Position};
    ///
    /// let mut board: Board = "
    ///     A
    ///     .
    ///     B
    ///     .
    /// "
    /// .parse()?;
    ///
    /// let moves = board.collapse_column(0)?;
    /// assert_eq!(moves.len(), 2);
    /// assert_eq!(moves[0].from, Position::new(1, 0));
    /// assert_eq!(moves[0].to, Position::new(0, 0));
    /// assert_eq!(board.to_string(), ".\n.\nA\nB\n");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn collapse_column(&mut self, col: usize) -> Result<Vec<TileMove>, BoardError> {
        self.check_column(col)?;
        let mut moves = Vec::new();
        let mut ground = 0;
        for row in 0..self.rows {
            let from = row * self.cols + col;
            let Some(tile) = self.cells[from].tile else {
                continue;
            };
            if row != ground {
                let to = ground * self.cols + col;
                self.cells.swap(from, to);
                moves.push(TileMove {
                    from: Position::new(row, col),
                    to: Position::new(ground, col),
                    tile,
                });
            }
            ground += 1;
        }
        Ok(moves)
    }

    /// Returns an iterator over every position in row-major order, bottom row first.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let cols = self.cols;
        (0..self.rows * self.cols).map(move |i| Position::new(i / cols, i % cols))
    }

    /// Returns the positions of all vacant cells in row-major order.
    #[must_use]
    pub fn vacant_positions(&self) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.tile(pos).is_none())
            .collect()
    }

    /// Returns `true` if no cell is vacant.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.tile.is_some())
    }

    /// Counts the tiles of each kind present on the board.
    #[must_use]
    pub fn tile_counts(&self) -> BTreeMap<TileKind, usize> {
        let mut counts = BTreeMap::new();
        for tile in self.cells.iter().filter_map(|cell| cell.tile) {
            *counts.entry(tile).or_insert(0) += 1;
        }
        counts
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for col in 0..self.cols {
                match self.tile(Position::new(row, col)) {
                    Some(tile) => write!(f, "{tile}")?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = Vec::new();
        for line in s.lines() {
            let cells = line
                .chars()
                .filter(|ch| !ch.is_whitespace())
                .map(|ch| match ch {
                    '.' => Ok(None),
                    _ => TileKind::from_letter(ch)
                        .map(Some)
                        .ok_or(ParseBoardError::InvalidChar(ch)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            if !cells.is_empty() {
                lines.push(cells);
            }
        }

        let expected = lines.first().ok_or(ParseBoardError::Empty)?.len();
        for (line, cells) in lines.iter().enumerate() {
            if cells.len() != expected {
                return Err(ParseBoardError::RaggedRow {
                    line,
                    expected,
                    found: cells.len(),
                });
            }
        }

        let rows = lines.len();
        let mut board = Self::new(rows, expected);
        for (line, cells) in lines.into_iter().enumerate() {
            let row = rows - 1 - line;
            for (col, tile) in cells.into_iter().enumerate() {
                board.cells[row * expected + col].tile = tile;
            }
        }
        Ok(board)
    }
}
