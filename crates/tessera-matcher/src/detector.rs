use std::collections::{BTreeMap, BTreeSet};

use tessera_core::{Board, Position};

use crate::{Axis, MatchAxes, MatchGroup, Run};

/// Finds matched groups on a board.
///
/// The detector is stateless; it only borrows the board for the duration of
/// a call.
///
/// # Algorithm
///
/// 1. Every dirty cell is scanned along both axes for a maximal run of the
///    same kind. Runs of length [`MatchDetector::MIN_RUN`] or more are kept.
/// 2. Each member of a kept run is scanned along the perpendicular axis, so a
///    crossing run through a cell that did not change is still found.
/// 3. A cell already covered by a run on an axis is not scanned again on
///    that axis.
/// 4. Runs sharing a cell are merged with a disjoint-set forest.
///
/// # Examples
///
/// ```
/// use tessera_core::Board;
/// use tessera_matcher::MatchDetector;
///
/// let board: Board = "
///     ABAB
///     CCCD
///     ABDB
/// "
/// .parse()?;
///
/// let groups = MatchDetector::new().find_all(&board);
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].len(), 3);
/// # Ok::<(), tessera_core::ParseBoardError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct MatchDetector {
    _private: (),
}

impl MatchDetector {
    /// Minimum run length that counts as a match.
    pub const MIN_RUN: usize = 3;

    /// Creates a detector.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Returns the matched run through `pos` along `axis`, if any.
    #[must_use]
    pub fn matched_run(&self, board: &Board, pos: Position, axis: Axis) -> Option<Run> {
        Run::through(board, pos, axis).filter(|run| run.len() >= Self::MIN_RUN)
    }

    /// Returns `true` if `pos` is part of a matched run on either axis.
    #[must_use]
    pub fn has_match_at(&self, board: &Board, pos: Position) -> bool {
        Axis::ALL
            .into_iter()
            .any(|axis| self.matched_run(board, pos, axis).is_some())
    }

    /// Finds every group that contains a run through one of `dirty`.
    ///
    /// Positions outside the board and vacant cells are ignored. Groups are
    /// returned sorted by anchor.
    pub fn find_at<I>(&self, board: &Board, dirty: I) -> Vec<MatchGroup>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut pending: Vec<(Position, Axis)> = dirty
            .into_iter()
            .filter(|&pos| board.tile(pos).is_some())
            .flat_map(|pos| Axis::ALL.map(|axis| (pos, axis)))
            .collect();
        // Reverse so cells are scanned in the order given.
        pending.reverse();

        let mut scanned = BTreeSet::new();
        let mut runs = Vec::new();
        while let Some((pos, axis)) = pending.pop() {
            if scanned.contains(&(pos, axis)) {
                continue;
            }
            scanned.insert((pos, axis));
            let Some(run) = self.matched_run(board, pos, axis) else {
                continue;
            };
            for member in run.positions() {
                scanned.insert((member, axis));
                pending.push((member, axis.perpendicular()));
            }
            runs.push(run);
        }

        merge_runs(&runs)
    }

    /// Finds every group on the board.
    #[must_use]
    pub fn find_all(&self, board: &Board) -> Vec<MatchGroup> {
        self.find_at(board, board.positions())
    }

    /// Returns `true` if the board contains any match.
    #[must_use]
    pub fn has_any_match(&self, board: &Board) -> bool {
        board
            .positions()
            .any(|pos| self.has_match_at(board, pos))
    }
}

fn merge_runs(runs: &[Run]) -> Vec<MatchGroup> {
    let mut forest = DisjointSet::new(runs.len());
    let mut owner: BTreeMap<Position, usize> = BTreeMap::new();
    for (i, run) in runs.iter().enumerate() {
        for pos in run.positions() {
            match owner.get(&pos) {
                Some(&j) => forest.union(i, j),
                None => {
                    owner.insert(pos, i);
                }
            }
        }
    }

    let mut merged: BTreeMap<usize, (Vec<Position>, MatchAxes)> = BTreeMap::new();
    for (i, run) in runs.iter().enumerate() {
        let entry = merged
            .entry(forest.find(i))
            .or_insert_with(|| (Vec::new(), MatchAxes::empty()));
        entry.0.extend(run.positions());
        entry.1 |= MatchAxes::from(run.axis());
    }

    let mut groups: Vec<_> = merged
        .into_iter()
        .map(|(root, (positions, axes))| MatchGroup::new(runs[root].kind(), positions, axes))
        .collect();
    groups.sort_by_key(MatchGroup::anchor);
    groups
}

#[derive(Debug)]
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let a = self.find(a);
        let b = self.find(b);
        if a != b {
            self.parent[a.max(b)] = a.min(b);
        }
    }
}
