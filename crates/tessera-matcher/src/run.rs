use tessera_core::{Board, Direction, Position, TileKind};

/// Scan axis of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    /// Along a row (left/right).
    Horizontal,
    /// Along a column (down/up).
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const ALL: [Self; 2] = [Self::Horizontal, Self::Vertical];

    /// Returns the other axis.
    #[must_use]
    pub const fn perpendicular(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    const fn backward(self) -> Direction {
        match self {
            Self::Horizontal => Direction::Left,
            Self::Vertical => Direction::Down,
        }
    }

    const fn forward(self) -> Direction {
        match self {
            Self::Horizontal => Direction::Right,
            Self::Vertical => Direction::Up,
        }
    }
}

/// A maximal straight line of same-kind tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    kind: TileKind,
    axis: Axis,
    start: Position,
    len: usize,
}

impl Run {
    /// Finds the maximal run through `pos` along `axis`.
    ///
    /// Returns `None` if the cell is vacant or outside the board. The scan
    /// stops at board edges and at vacant cells.
    #[must_use]
    pub fn through(board: &Board, pos: Position, axis: Axis) -> Option<Self> {
        let kind = board.tile(pos)?;
        let same = |p: Position| board.tile(p) == Some(kind);

        let mut start = pos;
        let mut len = 1;
        while let Some(prev) = start.neighbor(axis.backward()).filter(|&p| same(p)) {
            start = prev;
            len += 1;
        }
        let mut end = pos;
        while let Some(next) = end.neighbor(axis.forward()).filter(|&p| same(p)) {
            end = next;
            len += 1;
        }

        Some(Self {
            kind,
            axis,
            start,
            len,
        })
    }

    /// Returns the kind shared by every cell of the run.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Returns the scan axis.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Returns the lowest-leftmost cell of the run.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Returns the number of cells in the run.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the cells of the run from its start.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let Self {
            axis, start, len, ..
        } = *self;
        (0..len).map(move |i| match axis {
            Axis::Horizontal => Position::new(start.row(), start.col() + i),
            Axis::Vertical => Position::new(start.row() + i, start.col()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_through_stops_at_edges_and_gaps() {
        let board: Board = "
            AAB
            A.A
            AAA
        "
        .parse()
        .unwrap();

        let run = Run::through(&board, Position::new(0, 1), Axis::Horizontal).unwrap();
        assert_eq!(run.start(), Position::new(0, 0));
        assert_eq!(run.len(), 3);

        let run = Run::through(&board, Position::new(0, 0), Axis::Vertical).unwrap();
        assert_eq!(run.len(), 3);
        assert_eq!(
            run.positions().collect::<Vec<_>>(),
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );

        // vacancy breaks the column
        let run = Run::through(&board, Position::new(2, 1), Axis::Vertical).unwrap();
        assert_eq!(run.len(), 1);

        assert!(Run::through(&board, Position::new(1, 1), Axis::Vertical).is_none());
        assert!(Run::through(&board, Position::new(3, 0), Axis::Vertical).is_none());
    }
}
