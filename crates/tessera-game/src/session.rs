use tessera_core::{Board, Direction, Position};
use tessera_generator::{BoardGenerator, BoardSeed, PcgTileSource};
use tessera_matcher::{ValidSwap, find_valid_swaps};

use crate::{
    EventSink, GameConfig, GameConfigError, GameError, NullSink, TurnController, TurnOutcome,
    TurnState,
};

/// A board together with the controller that plays on it.
///
/// The board is generated from a [`BoardSeed`]; refills draw from a separate
/// stream derived from the same seed, so a session replays identically given
/// the same seed and the same swaps.
///
/// # Examples
///
/// ```
/// use tessera_game::{GameConfig, NullSink, Session};
/// use tessera_generator::BoardSeed;
///
/// let seed = BoardSeed::from_phrase("session");
/// let mut session = Session::with_seed(GameConfig::default(), seed, NullSink)?;
///
/// if let Some(hint) = session.hint() {
///     session.request_swap(hint.a, hint.b)?;
///     assert!(session.score() >= 3);
/// }
/// assert!(session.state().is_waiting_for_input());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Session<K = NullSink> {
    board: Board,
    seed: BoardSeed,
    controller: TurnController<PcgTileSource, K>,
}

impl<K> Session<K>
where
    K: EventSink,
{
    /// Starts a session on a board generated from a random seed.
    ///
    /// # Errors
    ///
    /// Returns a [`GameConfigError`] if `config` does not validate.
    pub fn new(config: GameConfig, sink: K) -> Result<Self, GameConfigError> {
        Self::with_seed(config, BoardSeed::random(), sink)
    }

    /// Starts a session on the board generated from `seed`.
    ///
    /// # Errors
    ///
    /// Returns a [`GameConfigError`] if `config` does not validate.
    pub fn with_seed(config: GameConfig, seed: BoardSeed, sink: K) -> Result<Self, GameConfigError> {
        config.validate()?;
        let generated = BoardGenerator::new(config.rows, config.cols, config.tile_kinds)
            .generate_with_seed(seed);
        Self::with_board(config, generated.board, seed, sink)
    }

    /// Starts a session on an existing board.
    ///
    /// The board's shape overrides `config.rows` and `config.cols`; `seed`
    /// only drives refills.
    ///
    /// # Errors
    ///
    /// Returns a [`GameConfigError`] if `config` does not validate.
    pub fn with_board(
        config: GameConfig,
        board: Board,
        seed: BoardSeed,
        sink: K,
    ) -> Result<Self, GameConfigError> {
        let config = config.size(board.rows(), board.cols());
        let source = PcgTileSource::from_seed(refill_seed(seed));
        let controller = TurnController::new(config, source, sink)?;
        log::debug!("session started from seed {seed}");
        Ok(Self {
            board,
            seed,
            controller,
        })
    }

    /// Returns the board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the seed the session was started from.
    #[must_use]
    pub const fn seed(&self) -> BoardSeed {
        self.seed
    }

    /// Returns the turn controller.
    #[must_use]
    pub const fn controller(&self) -> &TurnController<PcgTileSource, K> {
        &self.controller
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        self.controller.config()
    }

    /// Returns the total score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.controller.score()
    }

    /// Returns the turn state.
    #[must_use]
    pub const fn state(&self) -> TurnState {
        self.controller.state()
    }

    /// Returns the event sink.
    #[must_use]
    pub const fn sink(&self) -> &K {
        self.controller.sink()
    }

    /// Returns the event sink mutably.
    pub const fn sink_mut(&mut self) -> &mut K {
        self.controller.sink_mut()
    }

    /// See [`TurnController::request_swap`].
    ///
    /// # Errors
    ///
    /// See [`TurnController::request_swap`].
    pub fn request_swap(&mut self, a: Position, b: Position) -> Result<TurnOutcome, GameError> {
        self.controller.request_swap(&mut self.board, a, b)
    }

    /// See [`TurnController::request_swap_toward`].
    ///
    /// # Errors
    ///
    /// See [`TurnController::request_swap_toward`].
    pub fn request_swap_toward(
        &mut self,
        pos: Position,
        direction: Direction,
    ) -> Result<TurnOutcome, GameError> {
        self.controller
            .request_swap_toward(&mut self.board, pos, direction)
    }

    /// See [`TurnController::step`].
    ///
    /// # Errors
    ///
    /// See [`TurnController::step`].
    pub fn step(&mut self) -> Result<TurnOutcome, GameError> {
        self.controller.step(&mut self.board)
    }

    /// See [`TurnController::resolve`].
    ///
    /// # Errors
    ///
    /// See [`TurnController::resolve`].
    pub fn resolve(&mut self) -> Result<TurnOutcome, GameError> {
        self.controller.resolve(&mut self.board)
    }

    /// Lists every swap that would make a match on the current board.
    #[must_use]
    pub fn valid_swaps(&self) -> Vec<ValidSwap> {
        find_valid_swaps(&self.board)
    }

    /// Returns the first available swap, if any.
    #[must_use]
    pub fn hint(&self) -> Option<ValidSwap> {
        self.valid_swaps().into_iter().next()
    }

    /// Returns `true` if at least one swap would make a match.
    #[must_use]
    pub fn has_moves(&self) -> bool {
        self.hint().is_some()
    }
}

fn refill_seed(seed: BoardSeed) -> BoardSeed {
    BoardSeed::from_phrase(&format!("{seed}/refill"))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use tessera_matcher::MatchDetector;

    use super::*;
    use crate::{GameEvent, ResolutionMode};

    #[test]
    fn test_seeded_sessions_replay() {
        let seed = BoardSeed::from_phrase("replay");
        let mut a = Session::with_seed(GameConfig::default(), seed, Vec::new()).unwrap();
        let mut b = Session::with_seed(GameConfig::default(), seed, Vec::new()).unwrap();
        assert_eq!(a.board(), b.board());

        for _ in 0..5 {
            let Some(hint) = a.hint() else {
                break;
            };
            a.request_swap(hint.a, hint.b).unwrap();
            b.request_swap(hint.a, hint.b).unwrap();
        }
        assert_eq!(a.board(), b.board());
        assert_eq!(a.score(), b.score());
        assert_eq!(a.sink(), b.sink());
    }

    #[test]
    fn test_hint_swaps_always_settle() {
        let seed = BoardSeed::from_phrase("hints");
        let mut session = Session::with_seed(GameConfig::default(), seed, NullSink).unwrap();
        let detector = MatchDetector::new();
        for _ in 0..20 {
            let Some(hint) = session.hint() else {
                break;
            };
            let outcome = session.request_swap(hint.a, hint.b).unwrap();
            assert!(outcome.is_settled(), "{hint:?} gave {outcome:?}");
            assert!(session.board().is_full());
            assert!(!detector.has_any_match(session.board()));
        }
    }

    #[test]
    fn test_stepped_session_with_board() {
        let board: Board = "
            CDC
            DAE
            ABA
        "
        .parse()
        .unwrap();
        let config = GameConfig::default().resolution_mode(ResolutionMode::Stepped);
        let mut session =
            Session::with_board(config, board, BoardSeed::from([0; 32]), Vec::new()).unwrap();
        assert_eq!((session.config().rows, session.config().cols), (3, 3));
        assert!(session.has_moves());

        let outcome = session
            .request_swap_toward(Position::new(1, 1), Direction::Down)
            .unwrap();
        assert!(outcome.is_pending());
        assert_eq!(
            session.request_swap(Position::new(2, 0), Position::new(2, 1)),
            Err(GameError::Busy)
        );

        let mut steps = 0;
        while session.step().unwrap().is_pending() {
            steps += 1;
            assert!(steps < 100, "turn did not settle");
        }
        assert!(session.score() >= 3);
        assert!(matches!(
            session.sink().last(),
            Some(GameEvent::CascadeSettled { .. })
        ));
        assert_eq!(session.resolve(), Ok(TurnOutcome::Idle));
        session.sink_mut().clear();
    }

    proptest! {
        #[test]
        fn prop_score_counts_removed_cells(
            seed in any::<[u8; 32]>(),
            kinds in 3usize..=6,
            turns in 1usize..=4,
        ) {
            let config = GameConfig::default().size(7, 7).tile_kinds(kinds);
            let mut session = Session::with_seed(config, BoardSeed::from(seed), Vec::new()).unwrap();
            for _ in 0..turns {
                let Some(hint) = session.hint() else {
                    break;
                };
                let outcome = session.request_swap(hint.a, hint.b).unwrap();
                let TurnOutcome::Settled { passes, .. } = outcome else {
                    return Err(TestCaseError::fail(format!("{hint:?} gave {outcome:?}")));
                };
                prop_assert!((1..=7 * 7).contains(&passes), "{} passes", passes);
                prop_assert!(session.board().is_full());
            }

            let removed: usize = session
                .sink()
                .iter()
                .filter_map(|event| match event {
                    GameEvent::TilesRemoved(cells) => Some(cells.len()),
                    _ => None,
                })
                .sum();
            prop_assert_eq!(session.score(), removed as u64);
        }
    }
}
