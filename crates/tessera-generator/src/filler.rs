use tessera_core::{Board, Direction, Position, TileKind, TileSet, TileSpawn};

use crate::TileSource;

/// Fills vacant cells with random tiles.
///
/// [`GenerationFiller::fill`] never completes a run of three on its own: each
/// cell avoids every kind that would line up with two already-filled
/// neighbours. [`GenerationFiller::fill_uniform`] draws without that
/// restriction, which is how ordinary refills behave during play.
///
/// Both walk vacancies in row-major order from row 0, so a given
/// [`TileSource`] sequence always produces the same board.
///
/// # Examples
///
/// ```
/// use tessera_core::Board;
/// use tessera_generator::{GenerationFiller, PcgTileSource};
///
/// let filler = GenerationFiller::new(4);
/// let mut board = Board::new(6, 6);
/// let mut source = PcgTileSource::seed_from_u64(42);
///
/// let spawns = filler.fill(&mut board, &mut source);
/// assert_eq!(spawns.len(), 36);
/// assert!(board.is_full());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationFiller {
    tile_kinds: usize,
}

impl GenerationFiller {
    /// Creates a filler drawing from the first `tile_kinds` kinds.
    ///
    /// # Panics
    ///
    /// Panics if `tile_kinds` is zero or exceeds [`TileKind::MAX_KINDS`].
    #[must_use]
    pub fn new(tile_kinds: usize) -> Self {
        assert!(
            (1..=TileKind::MAX_KINDS).contains(&tile_kinds),
            "tile kind count must be in 1..={}",
            TileKind::MAX_KINDS
        );
        Self { tile_kinds }
    }

    /// Returns the number of kinds drawn from.
    #[must_use]
    pub const fn tile_kinds(&self) -> usize {
        self.tile_kinds
    }

    /// Returns the kinds that would complete a run of three at `pos`.
    ///
    /// Both axes are checked with every pair of occupied neighbours that
    /// could form a run with `pos`: the two cells before it, the two after
    /// it, and the pair straddling it. The tile currently at `pos` is
    /// ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_core::{Board, Position, TileKind};
    /// use tessera_generator::GenerationFiller;
    ///
    /// let board: Board = "
    ///     .B.
    ///     .B.
    ///     AA.
    /// "
    /// .parse()?;
    ///
    /// let filler = GenerationFiller::new(5);
    /// let forbidden = filler.forbidden_kinds(&board, Position::new(0, 2));
    /// assert!(forbidden.contains(TileKind::new(0)));
    /// assert_eq!(forbidden.len(), 1);
    ///
    /// let forbidden = filler.forbidden_kinds(&board, Position::new(0, 1));
    /// assert!(forbidden.contains(TileKind::new(1)));
    /// # Ok::<(), tessera_core::ParseBoardError>(())
    /// ```
    #[must_use]
    pub fn forbidden_kinds(&self, board: &Board, pos: Position) -> TileSet {
        let mut forbidden = TileSet::EMPTY;
        for (backward, forward) in [
            (Direction::Left, Direction::Right),
            (Direction::Down, Direction::Up),
        ] {
            let b1 = pos.neighbor(backward);
            let b2 = b1.and_then(|p| p.neighbor(backward));
            let f1 = pos.neighbor(forward);
            let f2 = f1.and_then(|p| p.neighbor(forward));
            for (x, y) in [(b2, b1), (b1, f1), (f1, f2)] {
                forbidden |= same_kind(board, x, y);
            }
        }
        forbidden.intersection(TileSet::full(self.tile_kinds))
    }

    /// Fills every vacant cell without creating a match.
    ///
    /// If a cell has every kind forbidden (only possible with very few kinds
    /// or a crowded pre-filled board), it draws from all kinds instead.
    /// Returns the placed tiles in fill order.
    pub fn fill<S>(&self, board: &mut Board, source: &mut S) -> Vec<TileSpawn>
    where
        S: TileSource + ?Sized,
    {
        fill_with(board, |board, pos| {
            let forbidden = self.forbidden_kinds(board, pos);
            self.draw_avoiding(source, forbidden)
        })
    }

    /// Fills every vacant cell with a uniformly drawn kind.
    ///
    /// Returns the placed tiles in fill order.
    pub fn fill_uniform<S>(&self, board: &mut Board, source: &mut S) -> Vec<TileSpawn>
    where
        S: TileSource + ?Sized,
    {
        fill_with(board, |_, _| self.draw_any(source))
    }

    /// Draws a kind uniformly from those not in `forbidden`.
    ///
    /// Falls back to [`GenerationFiller::draw_any`] if nothing is left.
    pub fn draw_avoiding<S>(&self, source: &mut S, forbidden: TileSet) -> TileKind
    where
        S: TileSource + ?Sized,
    {
        let allowed = TileSet::full(self.tile_kinds).difference(forbidden);
        if allowed.is_empty() {
            return self.draw_any(source);
        }
        draw_from(source, allowed)
    }

    /// Draws a kind uniformly from all kinds.
    pub fn draw_any<S>(&self, source: &mut S) -> TileKind
    where
        S: TileSource + ?Sized,
    {
        draw_from(source, TileSet::full(self.tile_kinds))
    }
}

fn fill_with<F>(board: &mut Board, mut draw: F) -> Vec<TileSpawn>
where
    F: FnMut(&Board, Position) -> TileKind,
{
    let mut spawns = Vec::new();
    for pos in board.vacant_positions() {
        let tile = draw(board, pos);
        let placed = board.set(pos, tile);
        debug_assert!(placed.is_ok(), "vacant position {pos} is off the board");
        spawns.push(TileSpawn { pos, tile });
    }
    spawns
}

fn same_kind(board: &Board, a: Option<Position>, b: Option<Position>) -> TileSet {
    match (a.and_then(|a| board.tile(a)), b.and_then(|b| board.tile(b))) {
        (Some(a), Some(b)) => TileSet::from_bits(a.bit() & b.bit()),
        _ => TileSet::EMPTY,
    }
}

fn draw_from<S>(source: &mut S, allowed: TileSet) -> TileKind
where
    S: TileSource + ?Sized,
{
    let index = source.next_index(allowed.len()) % allowed.len();
    allowed.nth(index).unwrap_or(TileKind::new(0))
}
