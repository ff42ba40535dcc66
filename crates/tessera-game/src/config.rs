use tessera_core::TileKind;

/// How [`TurnController::request_swap`] drives resolution.
///
/// [`TurnController::request_swap`]: crate::TurnController::request_swap
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolutionMode {
    /// Resolve the whole turn before returning.
    #[default]
    Instant,
    /// Leave resolution to the host, one phase per [`step`] call.
    ///
    /// [`step`]: crate::TurnController::step
    Stepped,
}

/// How vacated cells are refilled during a cascade.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RefillPolicy {
    /// Draw every kind uniformly. New tiles may form matches and extend the
    /// cascade.
    #[default]
    Uniform,
    /// Avoid kinds that would complete a run with neighbouring tiles.
    AvoidMatches,
}

/// Game configuration.
///
/// Fields are public; the chained setters below are a convenience for
/// building a configuration in one expression.
///
/// # Examples
///
/// ```
/// use tessera_game::{GameConfig, ResolutionMode};
///
/// let config = GameConfig::default()
///     .tile_kinds(6)
///     .points_per_tile(10)
///     .resolution_mode(ResolutionMode::Stepped);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.cascade_limit(), 81);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Board rows.
    pub rows: usize,
    /// Board columns.
    pub cols: usize,
    /// Number of distinct tile kinds, `3..=32`.
    pub tile_kinds: usize,
    /// Points awarded per removed cell.
    pub points_per_tile: u64,
    /// Whether swaps resolve immediately or step by step.
    pub resolution_mode: ResolutionMode,
    /// Refill behaviour before the cascade guard kicks in.
    pub refill_policy: RefillPolicy,
    /// Passes after which refills avoid matches and the turn is cut off.
    /// `None` means `rows * cols`.
    pub max_cascade_passes: Option<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 9,
            cols: 9,
            tile_kinds: 5,
            points_per_tile: 1,
            resolution_mode: ResolutionMode::Instant,
            refill_policy: RefillPolicy::Uniform,
            max_cascade_passes: None,
        }
    }
}

impl GameConfig {
    /// Fewest tile kinds a game can be played with.
    ///
    /// With fewer kinds, match-avoiding refills cannot always avoid a match
    /// and cascades do not die out.
    pub const MIN_TILE_KINDS: usize = 3;

    /// Sets the board dimensions.
    #[must_use]
    pub fn size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Sets the number of tile kinds.
    #[must_use]
    pub fn tile_kinds(mut self, tile_kinds: usize) -> Self {
        self.tile_kinds = tile_kinds;
        self
    }

    /// Sets the points awarded per removed cell.
    #[must_use]
    pub fn points_per_tile(mut self, points: u64) -> Self {
        self.points_per_tile = points;
        self
    }

    /// Sets the resolution mode.
    #[must_use]
    pub fn resolution_mode(mut self, mode: ResolutionMode) -> Self {
        self.resolution_mode = mode;
        self
    }

    /// Sets the refill policy.
    #[must_use]
    pub fn refill_policy(mut self, policy: RefillPolicy) -> Self {
        self.refill_policy = policy;
        self
    }

    /// Sets the cascade guard threshold.
    #[must_use]
    pub fn max_cascade_passes(mut self, passes: usize) -> Self {
        self.max_cascade_passes = Some(passes);
        self
    }

    /// Returns the most passes a turn runs.
    ///
    /// The refill of the last pass avoids matches.
    #[must_use]
    pub fn cascade_limit(&self) -> usize {
        self.max_cascade_passes
            .unwrap_or(self.rows.saturating_mul(self.cols))
    }

    /// Checks that the configuration describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns the first [`GameConfigError`] found.
    pub fn validate(&self) -> Result<(), GameConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameConfigError::ZeroDimension {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !(Self::MIN_TILE_KINDS..=TileKind::MAX_KINDS).contains(&self.tile_kinds) {
            return Err(GameConfigError::TileKindsOutOfRange {
                tile_kinds: self.tile_kinds,
            });
        }
        if self.points_per_tile == 0 {
            return Err(GameConfigError::ZeroPoints);
        }
        if self.cascade_limit() == 0 {
            return Err(GameConfigError::ZeroCascadeLimit);
        }
        Ok(())
    }
}

/// Errors reported by [`GameConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameConfigError {
    /// The board has no cells.
    #[display("board dimensions must be non-zero, got {rows}x{cols}")]
    ZeroDimension {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },
    /// The number of tile kinds is unsupported.
    #[display("tile kind count must be in 3..=32, got {tile_kinds}")]
    TileKindsOutOfRange {
        /// Requested kind count.
        tile_kinds: usize,
    },
    /// `points_per_tile` is zero.
    #[display("points per tile must be positive")]
    ZeroPoints,
    /// The cascade guard would trigger before the first pass.
    #[display("cascade limit must be positive")]
    ZeroCascadeLimit,
}
