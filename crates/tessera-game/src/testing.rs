//! Test utilities for turn resolution.
//!
//! This module provides [`TurnTester`], a harness that plays swaps on a
//! board written as text and checks the resulting board, score, and events.
//!
//! # Example
//!
//! ```
//! use tessera_core::Position;
//! use tessera_game::testing::TurnTester;
//!
//! TurnTester::from_str("
//!     CDC
//!     DAE
//!     ABA
//! ")
//! .script([1, 2, 3])
//! .swap(Position::new(0, 1), Position::new(1, 1))
//! .assert_settled(1, 3)
//! .assert_board("
//!     BCD
//!     CDC
//!     DBE
//! ");
//! ```

use std::str::FromStr as _;

use tessera_core::{Board, Position};
use tessera_generator::ScriptedTileSource;

use crate::{GameConfig, GameError, GameEvent, TurnController, TurnOutcome};

/// A test harness for turn resolution.
///
/// Refills draw from a [`ScriptedTileSource`], so every outcome is
/// deterministic. All methods return `self` for chaining.
///
/// # Panics
///
/// Assertion methods panic with detailed messages on failure, using
/// `#[track_caller]` to report the caller's location.
#[derive(Debug)]
pub struct TurnTester {
    board: Board,
    config: GameConfig,
    script: Vec<usize>,
    controller: Option<TurnController<ScriptedTileSource, Vec<GameEvent>>>,
    last: Option<Result<TurnOutcome, GameError>>,
}

impl TurnTester {
    /// Creates a tester for `board` with the default configuration.
    #[must_use]
    pub fn new(board: Board) -> Self {
        let config = GameConfig::default().size(board.rows(), board.cols());
        Self {
            board,
            config,
            script: Vec::new(),
            controller: None,
            last: None,
        }
    }

    /// Creates a tester from board text.
    ///
    /// # Panics
    ///
    /// Panics if the text is not a valid board.
    #[track_caller]
    pub fn from_str(s: &str) -> Self {
        Self::new(Board::from_str(s).unwrap())
    }

    /// Replaces the configuration. The board's shape is kept.
    ///
    /// # Panics
    ///
    /// Panics if a swap has already been played.
    #[must_use]
    #[track_caller]
    pub fn config(mut self, config: GameConfig) -> Self {
        assert!(self.controller.is_none(), "configure before the first swap");
        self.config = config.size(self.board.rows(), self.board.cols());
        self
    }

    /// Sets the refill indices.
    ///
    /// # Panics
    ///
    /// Panics if a swap has already been played.
    #[must_use]
    #[track_caller]
    pub fn script<I>(mut self, script: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        assert!(self.controller.is_none(), "script before the first swap");
        self.script = script.into_iter().collect();
        self
    }

    /// Requests a swap and records the result.
    ///
    /// # Panics
    ///
    /// Panics if the configuration does not validate.
    #[track_caller]
    pub fn swap(mut self, a: Position, b: Position) -> Self {
        let (controller, board) = self.parts();
        let result = controller.request_swap(board, a, b);
        self.record(result)
    }

    /// Performs one step and records the result.
    ///
    /// # Panics
    ///
    /// Panics if the configuration does not validate.
    #[track_caller]
    pub fn step(mut self) -> Self {
        let (controller, board) = self.parts();
        let result = controller.step(board);
        self.record(result)
    }

    /// Returns the board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the events emitted so far.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        self.controller
            .as_ref()
            .map(|controller| controller.sink().as_slice())
            .unwrap_or_default()
    }

    /// Asserts the result of the last swap or step.
    #[track_caller]
    pub fn assert_result(self, expected: Result<TurnOutcome, GameError>) -> Self {
        assert_eq!(self.last, Some(expected), "unexpected turn result");
        self
    }

    /// Asserts that the last swap or step settled the turn.
    #[track_caller]
    pub fn assert_settled(self, passes: usize, points: u64) -> Self {
        self.assert_result(Ok(TurnOutcome::Settled { passes, points }))
    }

    /// Asserts the board, written top row first.
    #[track_caller]
    pub fn assert_board(self, expected: &str) -> Self {
        let expected = Board::from_str(expected).unwrap();
        assert_eq!(
            self.board, expected,
            "board mismatch\nactual:\n{}expected:\n{}",
            self.board, expected
        );
        self
    }

    /// Asserts the total score.
    #[track_caller]
    pub fn assert_score(self, expected: u64) -> Self {
        let actual = self.controller.as_ref().map_or(0, TurnController::score);
        assert_eq!(actual, expected, "score mismatch");
        self
    }

    /// Asserts that exactly `count` events were emitted.
    #[track_caller]
    pub fn assert_event_count(self, count: usize) -> Self {
        assert_eq!(
            self.events().len(),
            count,
            "event count mismatch: {:#?}",
            self.events()
        );
        self
    }

    #[track_caller]
    fn parts(&mut self) -> (&mut TurnController<ScriptedTileSource, Vec<GameEvent>>, &mut Board) {
        let config = self.config;
        let script = &self.script;
        let controller = self.controller.get_or_insert_with(|| {
            TurnController::new(config, ScriptedTileSource::new(script.iter().copied()), Vec::new())
                .unwrap()
        });
        (controller, &mut self.board)
    }

    fn record(mut self, result: Result<TurnOutcome, GameError>) -> Self {
        self.last = Some(result);
        self
    }
}
