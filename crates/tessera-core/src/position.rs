//! Board coordinates and swap directions.

use std::fmt::{self, Display};

/// A cell position on a board.
///
/// Row 0 is the ground (bottom) row and rows increase upward; column 0 is the
/// leftmost column. Positions order by row, then column, so the minimum of a
/// set of positions is its lowest-leftmost cell.
///
/// A `Position` is not tied to a board size; bounds are checked by
/// [`Board`](crate::Board).
///
/// # Examples
///
/// ```
/// use tessera_core::{Direction, Position};
///
/// let pos = Position::new(0, 3);
/// assert_eq!(pos.neighbor(Direction::Up), Some(Position::new(1, 3)));
/// assert_eq!(pos.neighbor(Direction::Down), None);
/// assert!(pos.is_adjacent(Position::new(0, 4)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Creates a position from a row and a column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the row (0 is the bottom row).
    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Returns the column (0 is the leftmost column).
    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Returns the position one step in `direction`.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    /// The upper bounds are not checked here.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<Self> {
        let (row, col) = match direction {
            Direction::Up => (self.row.checked_add(1)?, self.col),
            Direction::Down => (self.row.checked_sub(1)?, self.col),
            Direction::Left => (self.row, self.col.checked_sub(1)?),
            Direction::Right => (self.row, self.col.checked_add(1)?),
        };
        Some(Self::new(row, col))
    }

    /// Returns `true` if `other` shares an edge with this position.
    #[must_use]
    pub fn is_adjacent(self, other: Self) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    /// Returns the direction from this position to an adjacent `other`.
    #[must_use]
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| self.neighbor(direction) == Some(other))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// One of the four swap directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Toward higher rows.
    Up,
    /// Toward row 0.
    Down,
    /// Toward column 0.
    Left,
    /// Toward higher columns.
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns `true` for [`Direction::Left`] and [`Direction::Right`].
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}
