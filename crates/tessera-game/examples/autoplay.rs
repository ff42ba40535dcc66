//! Example that plays a match-3 game by always taking the first hint.
//!
//! This example shows how to:
//! - Start a `Session` from a seed
//! - Collect `GameEvent`s through a closure sink
//! - Resolve turns instantly or phase by phase
//!
//! # Usage
//!
//! ```sh
//! cargo run --example autoplay
//! ```
//!
//! Replay a game from its seed, stepping through every phase:
//!
//! ```sh
//! cargo run --example autoplay -- --phrase "demo" --stepped --turns 5
//! ```
//!
//! Set `RUST_LOG=debug` (or `trace`) to follow turn resolution.

use std::{cell::RefCell, process, rc::Rc};

use clap::Parser;
use tessera_game::{
    EventSink, FnSink, GameConfig, GameEvent, Phase, ResolutionMode, Session, TurnOutcome,
    TurnState,
};
use tessera_generator::BoardSeed;

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

    /// Maximum number of turns to play.
    #[arg(short, long, value_name = "COUNT", default_value_t = 10)]
    turns: usize,

    /// Resolve turns one phase at a time.
    #[arg(long)]
    stepped: bool,

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

    let mode = if args.stepped {
        ResolutionMode::Stepped
    } else {
        ResolutionMode::Instant
    };
    let config = GameConfig::default()
        .size(args.rows, args.cols)
        .tile_kinds(args.kinds)
        .resolution_mode(mode);
    let seed = match (args.seed, args.phrase) {
        (Some(seed), _) => seed,
        (None, Some(phrase)) => BoardSeed::from_phrase(&phrase),
        (None, None) => BoardSeed::random(),
    };

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = {
        let events = Rc::clone(&events);
        FnSink::new(move |event: GameEvent| events.borrow_mut().push(event))
    };
    let mut session = match Session::with_seed(config, seed, sink) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            process::exit(1);
        }
    };

    println!("Seed:");
    println!("  {}", session.seed());
    println!();
    print_board(&session);

    for turn in 1..=args.turns {
        let Some(hint) = session.hint() else {
            println!("No moves left.");
            break;
        };
        println!("Turn {turn}: swap {} <-> {}", hint.a, hint.b);

        let mut outcome = match session.request_swap(hint.a, hint.b) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("Swap failed: {e}");
                process::exit(1);
            }
        };
        while outcome.is_pending() {
            if let Some(phase) = phase_of(&session) {
                println!("  step: {phase}");
            }
            outcome = match session.step() {
                Ok(outcome) => outcome,
                Err(e) => {
                    eprintln!("Step failed: {e}");
                    process::exit(1);
                }
            };
        }

        for event in events.borrow_mut().drain(..) {
            print_event(&event);
        }
        if let TurnOutcome::Settled { passes, points } = outcome {
            println!("  +{points} points in {passes} passes");
        }
        println!();
    }

    print_board(&session);
    println!("Score: {}", session.score());
}

fn phase_of<K>(session: &Session<K>) -> Option<Phase>
where
    K: EventSink,
{
    match session.state() {
        TurnState::Resolving(phase) => Some(phase),
        TurnState::WaitingForInput => None,
    }
}

fn print_board<K>(session: &Session<K>)
where
    K: EventSink,
{
    println!("Board:");
    for line in session.board().to_string().lines() {
        println!("  {line}");
    }
    println!();
}

fn print_event(event: &GameEvent) {
    match event {
        GameEvent::TilesMoved(moves) => println!("  moved {} tiles", moves.len()),
        GameEvent::TilesRemoved(cells) => println!("  removed {} tiles", cells.len()),
        GameEvent::TilesSpawned(spawns) => println!("  spawned {} tiles", spawns.len()),
        GameEvent::ScoreChanged(score) => println!("  score {score}"),
        GameEvent::CascadeSettled { passes } => println!("  settled after {passes} passes"),
    }
}
