use std::{collections::BTreeSet, mem};

use tessera_core::{Board, Direction, Position, TileMove};
use tessera_generator::{GenerationFiller, TileSource};
use tessera_matcher::{MatchDetector, MatchGroup};

use crate::{
    EventSink, GameConfig, GameConfigError, GameError, GameEvent, NullSink, ResolutionMode,
    SwapBlockReason,
};

/// The next piece of work a resolving turn will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Phase {
    /// Check the swapped cells for matches, swapping back if there are none.
    #[display("evaluate")]
    Evaluate,
    /// Clear matched cells and award points.
    #[display("remove")]
    Remove,
    /// Let tiles fall into vacated cells.
    #[display("collapse")]
    Collapse,
    /// Spawn tiles into every vacancy.
    #[display("refill")]
    Refill,
    /// Look for matches among moved and spawned tiles.
    #[display("detect")]
    Detect,
}

/// State of a [`TurnController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TurnState {
    /// Ready to accept a swap.
    WaitingForInput,
    /// A swap is being resolved; swap requests return [`GameError::Busy`].
    Resolving(Phase),
}

/// Result of a controller call that may finish a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TurnOutcome {
    /// Nothing was resolving.
    Idle,
    /// The turn is still resolving; call [`TurnController::step`] again.
    Pending,
    /// The swap made no match and was undone.
    Reverted,
    /// The turn cleared at least one match and the board is stable.
    Settled {
        /// Remove-collapse-refill passes the turn took.
        passes: usize,
        /// Points awarded during the turn.
        points: u64,
    },
}

#[derive(Debug, Clone, Default)]
struct Resolution {
    swap: Option<(Position, Position)>,
    groups: Vec<MatchGroup>,
    columns: BTreeSet<usize>,
    dirty: BTreeSet<Position>,
    passes: usize,
    points: u64,
    guard_warned: bool,
}

/// Turn sequencing for a match-3 board.
///
/// The controller borrows the [`Board`] on every call and owns everything
/// else a turn needs: the tile source for refills, the event sink, and the
/// running score.
///
/// A turn is: swap, evaluate, then remove-collapse-refill-detect passes until
/// detection finds nothing. In [`ResolutionMode::Instant`] all of that
/// happens inside [`request_swap`]; in [`ResolutionMode::Stepped`] each
/// [`step`] call performs one [`Phase`].
///
/// A turn runs at most [`GameConfig::cascade_limit`] passes. The refill of
/// the last allowed pass avoids matches, but tiles settling in a collapse can
/// still line up; such matches are left on the board when the turn ends.
///
/// [`request_swap`]: TurnController::request_swap
/// [`step`]: TurnController::step
///
/// # Examples
///
/// ```
/// use tessera_core::{Board, Position};
/// use tessera_game::{GameConfig, GameEvent, TurnController, TurnOutcome};
/// use tessera_generator::ScriptedTileSource;
///
/// let mut board: Board = "
///     CDC
///     DAE
///     ABA
/// "
/// .parse()?;
/// let config = GameConfig::default().size(3, 3);
/// let mut controller = TurnController::new(config, ScriptedTileSource::new([1, 2, 3]), Vec::new())?;
///
/// let outcome = controller.request_swap(&mut board, Position::new(0, 1), Position::new(1, 1))?;
/// assert_eq!(outcome, TurnOutcome::Settled { passes: 1, points: 3 });
/// assert_eq!(controller.score(), 3);
/// assert!(matches!(
///     controller.sink().last(),
///     Some(GameEvent::CascadeSettled { passes: 1 })
/// ));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct TurnController<S, K = NullSink> {
    config: GameConfig,
    detector: MatchDetector,
    filler: GenerationFiller,
    source: S,
    sink: K,
    state: TurnState,
    score: u64,
    resolution: Resolution,
}

impl<S, K> TurnController<S, K>
where
    S: TileSource,
    K: EventSink,
{
    /// Creates a controller waiting for input with a score of zero.
    ///
    /// # Errors
    ///
    /// Returns a [`GameConfigError`] if `config` does not validate.
    pub fn new(config: GameConfig, source: S, sink: K) -> Result<Self, GameConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            detector: MatchDetector::new(),
            filler: GenerationFiller::new(config.tile_kinds),
            source,
            sink,
            state: TurnState::WaitingForInput,
            score: 0,
            resolution: Resolution::default(),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> TurnState {
        self.state
    }

    /// Returns the total score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Returns the event sink.
    #[must_use]
    pub const fn sink(&self) -> &K {
        &self.sink
    }

    /// Returns the event sink mutably, e.g. to drain collected events.
    pub const fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Consumes the controller and returns its event sink.
    #[must_use]
    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Checks whether `a` and `b` may be swapped on `board`.
    ///
    /// This does not consider whether a turn is resolving.
    ///
    /// # Errors
    ///
    /// Returns the [`SwapBlockReason`] that makes the swap invalid.
    pub fn swap_capability(
        &self,
        board: &Board,
        a: Position,
        b: Position,
    ) -> Result<(), SwapBlockReason> {
        if !board.contains(a) || !board.contains(b) {
            return Err(SwapBlockReason::OutOfBounds);
        }
        if a == b {
            return Err(SwapBlockReason::SamePosition);
        }
        if !a.is_adjacent(b) {
            return Err(SwapBlockReason::NotAdjacent);
        }
        if board.tile(a).is_none() || board.tile(b).is_none() {
            return Err(SwapBlockReason::EmptyCell);
        }
        Ok(())
    }

    /// Swaps two adjacent tiles and starts resolving the turn.
    ///
    /// In [`ResolutionMode::Instant`] the turn is resolved before returning;
    /// in [`ResolutionMode::Stepped`] this returns [`TurnOutcome::Pending`]
    /// after the swap itself.
    ///
    /// # Errors
    ///
    /// - [`GameError::Busy`] if a turn is still resolving.
    /// - [`GameError::InvalidSwapTarget`] if the positions cannot be swapped.
    ///
    /// In both cases neither the board nor the controller changes.
    pub fn request_swap(
        &mut self,
        board: &mut Board,
        a: Position,
        b: Position,
    ) -> Result<TurnOutcome, GameError> {
        if self.state.is_resolving() {
            log::debug!("swap {a} <-> {b} dropped: turn still resolving");
            return Err(GameError::Busy);
        }
        self.swap_capability(board, a, b)?;

        let moves = swap_tiles(board, a, b)?;
        self.sink.emit(GameEvent::TilesMoved(moves));
        self.resolution = Resolution {
            swap: Some((a, b)),
            ..Resolution::default()
        };
        self.state = TurnState::Resolving(Phase::Evaluate);
        log::debug!("swapped {a} <-> {b}");

        match self.config.resolution_mode {
            ResolutionMode::Instant => self.resolve(board),
            ResolutionMode::Stepped => Ok(TurnOutcome::Pending),
        }
    }

    /// Swaps the tile at `pos` with its neighbour in `direction`.
    ///
    /// # Errors
    ///
    /// Same as [`TurnController::request_swap`]; a neighbour off the board is
    /// reported as [`SwapBlockReason::OutOfBounds`].
    pub fn request_swap_toward(
        &mut self,
        board: &mut Board,
        pos: Position,
        direction: Direction,
    ) -> Result<TurnOutcome, GameError> {
        if self.state.is_resolving() {
            return Err(GameError::Busy);
        }
        let target = pos
            .neighbor(direction)
            .ok_or(SwapBlockReason::OutOfBounds)?;
        self.request_swap(board, pos, target)
    }

    /// Performs the next phase of the resolving turn.
    ///
    /// Returns [`TurnOutcome::Idle`] when no turn is resolving. If the board
    /// rejects an access, the turn is abandoned and the controller goes back
    /// to waiting for input.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Board`] if `board` does not have the shape the
    /// turn started with.
    pub fn step(&mut self, board: &mut Board) -> Result<TurnOutcome, GameError> {
        let TurnState::Resolving(phase) = self.state else {
            return Ok(TurnOutcome::Idle);
        };
        log::trace!("pass {}: {phase}", self.resolution.passes);
        let result = match phase {
            Phase::Evaluate => self.evaluate(board),
            Phase::Remove => self.remove(board),
            Phase::Collapse => self.collapse(board),
            Phase::Refill => Ok(self.refill(board)),
            Phase::Detect => Ok(self.detect(board)),
        };
        if let Err(error) = &result {
            log::warn!("abandoning turn during {phase}: {error}");
            board.clear_matched_flags();
            self.state = TurnState::WaitingForInput;
        }
        result
    }

    /// Steps until the resolving turn finishes.
    ///
    /// Returns [`TurnOutcome::Idle`] when no turn is resolving.
    ///
    /// # Errors
    ///
    /// See [`TurnController::step`].
    pub fn resolve(&mut self, board: &mut Board) -> Result<TurnOutcome, GameError> {
        loop {
            match self.step(board)? {
                TurnOutcome::Pending => {}
                outcome => return Ok(outcome),
            }
        }
    }

    fn evaluate(&mut self, board: &mut Board) -> Result<TurnOutcome, GameError> {
        let Some((a, b)) = self.resolution.swap else {
            self.state = TurnState::Resolving(Phase::Detect);
            return Ok(TurnOutcome::Pending);
        };
        let groups = self.detector.find_at(board, [a, b]);
        if groups.is_empty() {
            let moves = swap_tiles(board, a, b)?;
            self.sink.emit(GameEvent::TilesMoved(moves));
            self.state = TurnState::WaitingForInput;
            log::debug!("swap {a} <-> {b} made no match, reverted");
            return Ok(TurnOutcome::Reverted);
        }
        self.resolution.groups = groups;
        self.state = TurnState::Resolving(Phase::Remove);
        Ok(TurnOutcome::Pending)
    }

    fn remove(&mut self, board: &mut Board) -> Result<TurnOutcome, GameError> {
        let groups = mem::take(&mut self.resolution.groups);
        let cells = groups
            .iter()
            .flat_map(|group| group.positions().iter().copied())
            .collect::<BTreeSet<_>>();
        for &pos in &cells {
            board.mark_matched(pos)?;
        }
        for &pos in &cells {
            board.clear(pos)?;
        }

        let count = u64::try_from(cells.len()).unwrap_or(u64::MAX);
        let points = self.config.points_per_tile.saturating_mul(count);
        self.score = self.score.saturating_add(points);
        self.resolution.points = self.resolution.points.saturating_add(points);
        self.resolution.passes += 1;
        self.resolution.columns = cells.iter().map(|pos| pos.col()).collect();
        log::trace!(
            "pass {}: removed {} cells in {} groups",
            self.resolution.passes,
            cells.len(),
            groups.len()
        );

        self.sink
            .emit(GameEvent::TilesRemoved(cells.into_iter().collect()));
        self.sink.emit(GameEvent::ScoreChanged(self.score));
        self.state = TurnState::Resolving(Phase::Collapse);
        Ok(TurnOutcome::Pending)
    }

    fn collapse(&mut self, board: &mut Board) -> Result<TurnOutcome, GameError> {
        let mut moves = Vec::new();
        for col in mem::take(&mut self.resolution.columns) {
            moves.extend(board.collapse_column(col)?);
        }
        self.resolution.dirty.extend(moves.iter().map(|m| m.to));
        if !moves.is_empty() {
            self.sink.emit(GameEvent::TilesMoved(moves));
        }
        self.state = TurnState::Resolving(Phase::Refill);
        Ok(TurnOutcome::Pending)
    }

    fn refill(&mut self, board: &mut Board) -> TurnOutcome {
        let guarded = self.resolution.passes >= self.config.cascade_limit();
        if guarded && !self.resolution.guard_warned {
            log::warn!(
                "cascade reached {} passes, refilling without matches",
                self.config.cascade_limit()
            );
            self.resolution.guard_warned = true;
        }

        let spawns = if guarded || self.config.refill_policy.is_avoid_matches() {
            self.filler.fill(board, &mut self.source)
        } else {
            self.filler.fill_uniform(board, &mut self.source)
        };
        self.resolution.dirty.extend(spawns.iter().map(|s| s.pos));
        if !spawns.is_empty() {
            self.sink.emit(GameEvent::TilesSpawned(spawns));
        }
        self.state = TurnState::Resolving(Phase::Detect);
        TurnOutcome::Pending
    }

    fn detect(&mut self, board: &mut Board) -> TurnOutcome {
        let dirty = mem::take(&mut self.resolution.dirty);
        let groups = self.detector.find_at(board, dirty);
        if groups.is_empty() {
            return self.settle(board);
        }
        if self.resolution.passes >= self.config.cascade_limit() {
            log::warn!(
                "cascade stopped after {} passes with {} groups left on the board",
                self.resolution.passes,
                groups.len()
            );
            return self.settle(board);
        }
        self.resolution.groups = groups;
        self.state = TurnState::Resolving(Phase::Remove);
        TurnOutcome::Pending
    }

    fn settle(&mut self, board: &mut Board) -> TurnOutcome {
        board.clear_matched_flags();
        let Resolution { passes, points, .. } = mem::take(&mut self.resolution);
        self.sink.emit(GameEvent::CascadeSettled { passes });
        self.state = TurnState::WaitingForInput;
        log::debug!("turn settled after {passes} passes, {points} points");
        TurnOutcome::Settled { passes, points }
    }
}

fn swap_tiles(board: &mut Board, a: Position, b: Position) -> Result<Vec<TileMove>, GameError> {
    debug_assert!(
        board.tile(a).is_some() && board.tile(b).is_some(),
        "swap of an empty cell"
    );
    let (Some(tile_a), Some(tile_b)) = (board.get(a)?, board.get(b)?) else {
        return Err(SwapBlockReason::EmptyCell.into());
    };
    board.swap(a, b)?;
    Ok(vec![
        TileMove {
            from: a,
            to: b,
            tile: tile_a,
        },
        TileMove {
            from: b,
            to: a,
            tile: tile_b,
        },
    ])
}

#[cfg(test)]
mod tests {
    use tessera_core::{TileKind, TileSpawn};
    use tessera_generator::ScriptedTileSource;

    use super::*;
    use crate::{RefillPolicy, testing::TurnTester};

    const CASCADE_BOARD: &str = "
        CDC
        DAE
        ABA
    ";

    fn controller(
        config: GameConfig,
        script: impl IntoIterator<Item = usize>,
    ) -> TurnController<ScriptedTileSource, Vec<GameEvent>> {
        TurnController::new(config, ScriptedTileSource::new(script), Vec::new()).unwrap()
    }

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn kind(letter: char) -> TileKind {
        TileKind::from_letter(letter).unwrap()
    }

    #[test]
    fn test_swap_without_match_reverts() {
        let mut board: Board = "
            ABC
            CAB
            ABC
        "
        .parse()
        .unwrap();
        let before = board.clone();
        let mut controller = controller(GameConfig::default().size(3, 3), []);

        let outcome = controller
            .request_swap(&mut board, pos(0, 0), pos(0, 1))
            .unwrap();
        assert_eq!(outcome, TurnOutcome::Reverted);
        assert_eq!(board, before);
        assert_eq!(controller.score(), 0);
        assert!(controller.state().is_waiting_for_input());

        let events = controller.sink();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            GameEvent::TilesMoved(vec![
                TileMove { from: pos(0, 0), to: pos(0, 1), tile: kind('A') },
                TileMove { from: pos(0, 1), to: pos(0, 0), tile: kind('B') },
            ])
        );
        assert_eq!(
            events[1],
            GameEvent::TilesMoved(vec![
                TileMove { from: pos(0, 0), to: pos(0, 1), tile: kind('B') },
                TileMove { from: pos(0, 1), to: pos(0, 0), tile: kind('A') },
            ])
        );
    }

    #[test]
    fn test_ground_row_match_on_9x9() {
        let mut board: Board = "
            ABCDEABCD
            CDEABCDEA
            EABCDEABC
            BCDEABCDE
            DEABCDEAB
            ABCDEABCD
            CDEABCDEA
            EABCDEABC
            AAAEABCDE
        "
        .parse()
        .unwrap();
        let mut controller = controller(GameConfig::default(), [1, 2, 3]);

        let outcome = controller
            .request_swap(&mut board, pos(0, 0), pos(0, 1))
            .unwrap();
        assert_eq!(outcome, TurnOutcome::Settled { passes: 1, points: 3 });

        let events = controller.sink();
        assert_eq!(events.len(), 6);
        assert_eq!(
            events[1],
            GameEvent::TilesRemoved(vec![pos(0, 0), pos(0, 1), pos(0, 2)])
        );
        assert_eq!(events[2], GameEvent::ScoreChanged(3));
        let GameEvent::TilesMoved(moves) = &events[3] else {
            panic!("expected collapse moves, got {:?}", events[3]);
        };
        assert_eq!(moves.len(), 24);
        assert!(moves.iter().all(|m| m.to.row() + 1 == m.from.row()));
        assert!(moves.iter().all(|m| m.to.col() < 3 && m.to.col() == m.from.col()));
        assert_eq!(
            events[4],
            GameEvent::TilesSpawned(vec![
                TileSpawn { pos: pos(8, 0), tile: kind('B') },
                TileSpawn { pos: pos(8, 1), tile: kind('C') },
                TileSpawn { pos: pos(8, 2), tile: kind('D') },
            ])
        );
        assert_eq!(events[5], GameEvent::CascadeSettled { passes: 1 });

        assert_eq!(
            board.to_string(),
            "\
BCDDEABCD
ABCABCDEA
CDECDEABC
EABEABCDE
BCDBCDEAB
DEADEABCD
ABCABCDEA
CDECDEABC
EABEABCDE
"
        );
    }

    #[test]
    fn test_cascade_runs_until_stable() {
        let mut board: Board = CASCADE_BOARD.parse().unwrap();
        let mut controller = controller(GameConfig::default().size(3, 3), [0, 0, 0, 1, 2, 3]);

        let outcome = controller
            .request_swap(&mut board, pos(0, 1), pos(1, 1))
            .unwrap();
        assert_eq!(outcome, TurnOutcome::Settled { passes: 2, points: 6 });
        assert_eq!(board.to_string(), "BCD\nCDC\nDBE\n");

        let kinds = controller
            .sink()
            .iter()
            .map(|event| match event {
                GameEvent::TilesMoved(_) => "moved",
                GameEvent::TilesRemoved(_) => "removed",
                GameEvent::TilesSpawned(_) => "spawned",
                GameEvent::ScoreChanged(_) => "score",
                GameEvent::CascadeSettled { .. } => "settled",
            })
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            [
                "moved", "removed", "score", "moved", "spawned", "removed", "score", "spawned",
                "settled"
            ]
        );
        assert_eq!(controller.sink()[6], GameEvent::ScoreChanged(6));
    }

    #[test]
    fn test_points_per_unique_cell() {
        // T shape: the shared cell counts once
        let mut board: Board = "
            BCAD
            AABA
            CDAE
        "
        .parse()
        .unwrap();
        let config = GameConfig::default().size(3, 4).points_per_tile(10);
        let mut controller = controller(config, [0, 4, 0, 3, 2]);

        let outcome = controller
            .request_swap(&mut board, pos(1, 2), pos(1, 3))
            .unwrap();
        assert_eq!(outcome, TurnOutcome::Settled { passes: 1, points: 50 });
        assert_eq!(
            controller.sink()[1],
            GameEvent::TilesRemoved(vec![pos(0, 2), pos(1, 0), pos(1, 1), pos(1, 2), pos(2, 2)])
        );
        assert_eq!(controller.sink()[2], GameEvent::ScoreChanged(50));
        assert_eq!(board.to_string(), "ADCD\nBCEB\nCDAE\n");
    }

    #[test]
    fn test_stepped_mode_advances_one_phase_per_step() {
        let mut board: Board = CASCADE_BOARD.parse().unwrap();
        let config = GameConfig::default()
            .size(3, 3)
            .resolution_mode(ResolutionMode::Stepped);
        let mut controller = controller(config, [1, 2, 3]);

        let outcome = controller
            .request_swap(&mut board, pos(0, 1), pos(1, 1))
            .unwrap();
        assert_eq!(outcome, TurnOutcome::Pending);
        assert_eq!(controller.state(), TurnState::Resolving(Phase::Evaluate));
        assert_eq!(controller.sink().len(), 1);

        assert_eq!(
            controller.request_swap(&mut board, pos(2, 0), pos(2, 1)),
            Err(GameError::Busy)
        );
        assert_eq!(
            controller.request_swap_toward(&mut board, pos(2, 0), Direction::Right),
            Err(GameError::Busy)
        );
        assert_eq!(controller.sink().len(), 1);

        let mut phases = Vec::new();
        let outcome = loop {
            let outcome = controller.step(&mut board).unwrap();
            if !outcome.is_pending() {
                break outcome;
            }
            let TurnState::Resolving(phase) = controller.state() else {
                panic!("pending outcome while waiting for input");
            };
            phases.push(phase);
        };
        assert_eq!(
            phases,
            [Phase::Remove, Phase::Collapse, Phase::Refill, Phase::Detect]
        );
        assert_eq!(outcome, TurnOutcome::Settled { passes: 1, points: 3 });
        assert_eq!(controller.step(&mut board), Ok(TurnOutcome::Idle));
        assert_eq!(controller.resolve(&mut board), Ok(TurnOutcome::Idle));
    }

    #[test]
    fn test_invalid_requests_change_nothing() {
        let mut board: Board = "
            CD.
            DAE
            ABA
        "
        .parse()
        .unwrap();
        let before = board.clone();
        let mut controller = controller(GameConfig::default().size(3, 3), []);

        let cases = [
            (pos(0, 0), pos(0, 3), SwapBlockReason::OutOfBounds),
            (pos(0, 0), pos(0, 0), SwapBlockReason::SamePosition),
            (pos(0, 0), pos(1, 1), SwapBlockReason::NotAdjacent),
            (pos(0, 0), pos(0, 2), SwapBlockReason::NotAdjacent),
            (pos(1, 2), pos(2, 2), SwapBlockReason::EmptyCell),
        ];
        for (a, b, reason) in cases {
            assert_eq!(
                controller.request_swap(&mut board, a, b),
                Err(GameError::InvalidSwapTarget(reason)),
                "{a} <-> {b}"
            );
        }
        assert_eq!(
            controller.request_swap_toward(&mut board, pos(0, 0), Direction::Left),
            Err(GameError::InvalidSwapTarget(SwapBlockReason::OutOfBounds))
        );
        assert_eq!(
            controller.request_swap_toward(&mut board, pos(2, 0), Direction::Up),
            Err(GameError::InvalidSwapTarget(SwapBlockReason::OutOfBounds))
        );

        assert_eq!(board, before);
        assert!(controller.sink().is_empty());
        assert!(controller.state().is_waiting_for_input());
    }

    #[test]
    fn test_swap_toward_direction() {
        let mut board: Board = CASCADE_BOARD.parse().unwrap();
        let mut controller = controller(GameConfig::default().size(3, 3), [1, 2, 3]);
        let outcome = controller
            .request_swap_toward(&mut board, pos(0, 1), Direction::Up)
            .unwrap();
        assert!(outcome.is_settled());
        assert_eq!(controller.score(), 3);
    }

    #[test]
    fn test_cascade_guard_switches_refill() {
        TurnTester::from_str(CASCADE_BOARD)
            .config(GameConfig::default().max_cascade_passes(2))
            .script([0])
            .swap(pos(0, 1), pos(1, 1))
            .assert_settled(2, 6)
            .assert_board(
                "
                AAB
                CDC
                DBE
            ",
            );
    }

    #[test]
    fn test_avoid_matches_policy_stops_after_one_pass() {
        TurnTester::from_str(CASCADE_BOARD)
            .config(GameConfig::default().refill_policy(RefillPolicy::AvoidMatches))
            .script([0])
            .swap(pos(0, 1), pos(1, 1))
            .assert_settled(1, 3)
            .assert_score(3)
            .assert_board(
                "
                AAB
                CDC
                DBE
            ",
            );
    }

    #[test]
    fn test_cascade_stops_at_limit() {
        // the guarded refill is clean, but column 0 collapses into BBB
        let mut board: Board = "
            BCD
            ADC
            ACD
            BAB
        "
        .parse()
        .unwrap();
        let config = GameConfig::default().size(4, 3).max_cascade_passes(1);
        let mut controller = controller(config, [0]);

        let outcome = controller
            .request_swap(&mut board, pos(0, 0), pos(0, 1))
            .unwrap();
        assert_eq!(outcome, TurnOutcome::Settled { passes: 1, points: 3 });
        assert_eq!(board.to_string(), "BCD\nADC\nACD\nBBB\n");
        assert!(MatchDetector::new().has_any_match(&board));
        assert!(board.positions().all(|p| !board.is_matched(p).unwrap()));
        assert!(controller.state().is_waiting_for_input());
        assert_eq!(
            controller.sink().last(),
            Some(&GameEvent::CascadeSettled { passes: 1 })
        );
    }

    #[test]
    fn test_degenerate_kind_counts_are_rejected() {
        for tile_kinds in [1, 2] {
            let config = GameConfig::default().size(3, 3).tile_kinds(tile_kinds);
            assert_eq!(
                TurnController::new(config, ScriptedTileSource::default(), NullSink).err(),
                Some(GameConfigError::TileKindsOutOfRange { tile_kinds })
            );
        }
    }

    #[test]
    fn test_mismatched_board_abandons_turn() {
        let mut board: Board = CASCADE_BOARD.parse().unwrap();
        let config = GameConfig::default()
            .size(3, 3)
            .resolution_mode(ResolutionMode::Stepped);
        let mut controller = controller(config, [1, 2, 3]);
        controller
            .request_swap(&mut board, pos(0, 1), pos(1, 1))
            .unwrap();
        controller.step(&mut board).unwrap();

        let mut other = Board::new(1, 1);
        assert!(matches!(
            controller.step(&mut other),
            Err(GameError::Board(_))
        ));
        assert!(controller.state().is_waiting_for_input());
    }
}
