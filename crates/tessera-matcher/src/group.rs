use tessera_core::{Position, TileKind};

use crate::Axis;

bitflags::bitflags! {
    /// Axes of the runs merged into a [`MatchGroup`].
    ///
    /// A straight match has exactly one flag; T, L, and plus shapes have both.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MatchAxes: u8 {
        /// At least one horizontal run contributed.
        const HORIZONTAL = 0b01;
        /// At least one vertical run contributed.
        const VERTICAL = 0b10;
    }
}

impl From<Axis> for MatchAxes {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self::HORIZONTAL,
            Axis::Vertical => Self::VERTICAL,
        }
    }
}

/// A set of same-kind cells removed as one unit.
///
/// Built by merging every run of three or more that shares a cell with
/// another run in the group. Positions are distinct and sorted row-major, so
/// the first one is the group's anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGroup {
    kind: TileKind,
    positions: Vec<Position>,
    axes: MatchAxes,
}

impl MatchGroup {
    pub(crate) fn new(kind: TileKind, mut positions: Vec<Position>, axes: MatchAxes) -> Self {
        positions.sort_unstable();
        positions.dedup();
        debug_assert!(positions.len() >= 3, "match group smaller than a run");
        Self {
            kind,
            positions,
            axes,
        }
    }

    /// Returns the kind shared by every cell.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Returns the cells in row-major order, bottom row first.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Returns the number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always `false`; groups hold at least three cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the lowest-leftmost cell.
    #[must_use]
    pub fn anchor(&self) -> Position {
        self.positions[0]
    }

    /// Returns the axes of the runs that formed this group.
    #[must_use]
    pub const fn axes(&self) -> MatchAxes {
        self.axes
    }

    /// Returns `true` if `pos` belongs to the group.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.positions.binary_search(&pos).is_ok()
    }

    /// Returns the sorted column indices touched by the group.
    #[must_use]
    pub fn columns(&self) -> Vec<usize> {
        let mut cols: Vec<_> = self.positions.iter().map(|pos| pos.col()).collect();
        cols.sort_unstable();
        cols.dedup();
        cols
    }
}
