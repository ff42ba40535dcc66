use std::collections::VecDeque;

use rand::{RngExt as _, SeedableRng as _};
use rand_pcg::Pcg64;

use crate::BoardSeed;

/// A uniform index generator used to pick tile kinds.
///
/// Implementations return a value in `[0, bound)`. The board engine never
/// calls this with `bound == 0`.
pub trait TileSource {
    /// Returns an index in `[0, bound)`.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<T> TileSource for &mut T
where
    T: TileSource + ?Sized,
{
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

impl<T> TileSource for Box<T>
where
    T: TileSource + ?Sized,
{
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// A seeded PCG-64 tile source.
///
/// # Examples
///
/// ```
/// use tessera_generator::{BoardSeed, PcgTileSource, TileSource};
///
/// let seed = BoardSeed::from_phrase("demo");
/// let mut a = PcgTileSource::from_seed(seed);
/// let mut b = PcgTileSource::from_seed(seed);
/// for _ in 0..16 {
///     let i = a.next_index(5);
///     assert!(i < 5);
///     assert_eq!(i, b.next_index(5));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PcgTileSource {
    rng: Pcg64,
}

impl PcgTileSource {
    /// Creates a source whose sequence is fixed by `seed`.
    #[must_use]
    pub fn from_seed(seed: BoardSeed) -> Self {
        Self {
            rng: Pcg64::from_seed(*seed.as_bytes()),
        }
    }

    /// Creates a source from a 64-bit seed, for tests and benchmarks.
    #[must_use]
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Creates a source from a fresh random seed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::from_seed(BoardSeed::random())
    }
}

impl TileSource for PcgTileSource {
    fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "tile source bound must be positive");
        self.rng.random_range(0..bound)
    }
}

/// A tile source that replays a fixed sequence of indices.
///
/// Each value is reduced modulo the requested bound. The sequence repeats
/// once exhausted; an empty script always yields 0.
///
/// # Examples
///
/// ```
/// use tessera_generator::{ScriptedTileSource, TileSource};
///
/// let mut source = ScriptedTileSource::new([0, 3, 7]);
/// assert_eq!(source.next_index(5), 0);
/// assert_eq!(source.next_index(5), 3);
/// assert_eq!(source.next_index(5), 2);
/// assert_eq!(source.next_index(5), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedTileSource {
    script: VecDeque<usize>,
}

impl ScriptedTileSource {
    /// Creates a source that yields `script` in order, then repeats it.
    pub fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl TileSource for ScriptedTileSource {
    fn next_index(&mut self, bound: usize) -> usize {
        let Some(value) = self.script.pop_front() else {
            return 0;
        };
        self.script.push_back(value);
        value % bound.max(1)
    }
}
