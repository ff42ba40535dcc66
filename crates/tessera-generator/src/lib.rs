//! Initial board population for match-3 games.
//!
//! This crate fills a vacant [`Board`] with random tiles such that no match
//! exists on the finished board, and provides the random sources used for
//! later refills.
//!
//! # Overview
//!
//! - [`TileSource`]: injected uniform index generator. [`PcgTileSource`] is
//!   the seeded production source; [`ScriptedTileSource`] replays a fixed
//!   sequence for tests.
//! - [`GenerationFiller`]: the match-free fill algorithm.
//! - [`BoardGenerator`]: builds a full board from a [`BoardSeed`] so every
//!   board can be reproduced.
//!
//! [`Board`]: tessera_core::Board
//!
//! # Examples
//!
//! ```
//! use tessera_generator::{BoardGenerator, BoardSeed};
//!
//! let generator = BoardGenerator::new(9, 9, 5);
//! let generated = generator.generate();
//! assert!(generated.board.is_full());
//!
//! // The same seed always yields the same board.
//! let again = generator.generate_with_seed(generated.seed);
//! assert_eq!(again.board, generated.board);
//! ```

pub use self::{
    filler::GenerationFiller,
    generator::{BoardGenerator, GeneratedBoard},
    seed::{BoardSeed, ParseSeedError},
    source::{PcgTileSource, ScriptedTileSource, TileSource},
};

mod filler;
mod generator;
mod seed;
mod source;
