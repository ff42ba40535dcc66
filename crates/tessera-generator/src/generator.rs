use tessera_core::Board;

use crate::{BoardSeed, GenerationFiller, PcgTileSource};

/// A generated board together with the seed that reproduces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBoard {
    /// The populated, match-free board.
    pub board: Board,
    /// Seed used for generation.
    pub seed: BoardSeed,
}

/// Generates fully populated boards with no initial match.
///
/// # Examples
///
/// ```
/// use tessera_generator::{BoardGenerator, BoardSeed};
///
/// let generator = BoardGenerator::new(8, 6, 4);
/// let seed = BoardSeed::from_phrase("level 1");
/// let generated = generator.generate_with_seed(seed);
///
/// assert_eq!(generated.board.rows(), 8);
/// assert_eq!(generated.board.cols(), 6);
/// assert_eq!(generated.seed, seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGenerator {
    rows: usize,
    cols: usize,
    filler: GenerationFiller,
}

impl BoardGenerator {
    /// Creates a generator for `rows × cols` boards using `tile_kinds` kinds.
    ///
    /// # Panics
    ///
    /// Panics if a dimension is zero or `tile_kinds` is outside
    /// `1..=TileKind::MAX_KINDS`.
    #[must_use]
    pub fn new(rows: usize, cols: usize, tile_kinds: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board dimensions must be non-zero");
        Self {
            rows,
            cols,
            filler: GenerationFiller::new(tile_kinds),
        }
    }

    /// Returns the filler used for population.
    #[must_use]
    pub const fn filler(&self) -> &GenerationFiller {
        &self.filler
    }

    /// Generates a board from a fresh random seed.
    #[must_use]
    pub fn generate(&self) -> GeneratedBoard {
        self.generate_with_seed(BoardSeed::random())
    }

    /// Generates the board determined by `seed`.
    #[must_use]
    pub fn generate_with_seed(&self, seed: BoardSeed) -> GeneratedBoard {
        log::debug!(
            "generating {}x{} board with {} kinds from seed {seed}",
            self.rows,
            self.cols,
            self.filler.tile_kinds()
        );
        let mut board = Board::new(self.rows, self.cols);
        let mut source = PcgTileSource::from_seed(seed);
        self.filler.fill(&mut board, &mut source);
        GeneratedBoard { board, seed }
    }
}
