//! Example demonstrating match-free board generation.
//!
//! This example shows how to:
//! - Create a `BoardGenerator` for a given board shape
//! - Generate a board from a random, hex, or phrase-derived seed
//! - Display the board, its seed, and the number of available moves
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_board
//! ```
//!
//! Reproduce a board from its seed:
//!
//! ```sh
//! cargo run --example generate_board -- --seed 1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef
//! ```
//!
//! Derive the seed from a phrase and change the shape:
//!
//! ```sh
//! cargo run --example generate_board -- --phrase "daily" --rows 8 --cols 7 --kinds 6
//! ```
//!
//! Set `RUST_LOG=debug` to see generator logging.

use std::process;

use clap::Parser;
use tessera_core::TileKind;
use tessera_generator::{BoardGenerator, BoardSeed};
use tessera_matcher::find_valid_swaps;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Number of rows.
    #[arg(long, value_name = "ROWS", default_value_t = 9)]
    rows: usize,

    /// Number of columns.
    #[arg(long, value_name = "COLS", default_value_t = 9)]
    cols: usize,

    /// Number of distinct tile kinds.
    #[arg(short, long, value_name = "COUNT", default_value_t = 5)]
    kinds: usize,

    /// Seed as 64 hex digits.
    #[arg(long, value_name = "HEX", conflicts_with = "phrase")]
    seed: Option<BoardSeed>,

    /// Phrase to derive the seed from.
    #[arg(long, value_name = "TEXT")]
    phrase: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.rows == 0 || args.cols == 0 {
        eprintln!("--rows and --cols must be at least 1.");
        process::exit(1);
    }
    if !(1..=TileKind::MAX_KINDS).contains(&args.kinds) {
        eprintln!("--kinds must be in 1..={}.", TileKind::MAX_KINDS);
        process::exit(1);
    }

    let generator = BoardGenerator::new(args.rows, args.cols, args.kinds);
    let seed = match (args.seed, args.phrase) {
        (Some(seed), _) => seed,
        (None, Some(phrase)) => BoardSeed::from_phrase(&phrase),
        (None, None) => BoardSeed::random(),
    };
    let generated = generator.generate_with_seed(seed);

    println!("Seed:");
    println!("  {}", generated.seed);
    println!();

    println!("Board:");
    for line in generated.board.to_string().lines() {
        println!("  {line}");
    }
    println!();

    let swaps = find_valid_swaps(&generated.board);
    println!("Valid swaps: {}", swaps.len());
    for swap in swaps.iter().take(5) {
        println!("  {} <-> {}", swap.a, swap.b);
    }
}
