//! Turn sequencing for match-3 games.
//!
//! This crate drives a [`Board`] through complete turns: a player swap, match
//! evaluation, and the remove-collapse-refill cascade that follows, reporting
//! every logical change as a [`GameEvent`].
//!
//! # Overview
//!
//! - [`TurnController`]: the turn state machine. It borrows the board on each
//!   call and owns the refill [`TileSource`], the [`EventSink`], and the score.
//! - [`Session`]: a generated board bundled with a controller, for hosts that
//!   do not manage the board themselves.
//! - [`GameConfig`]: board shape, tile kinds, scoring, and resolution
//!   options.
//! - [`testing`]: a fluent harness for writing turn tests.
//!
//! Turns are resolved either immediately ([`ResolutionMode::Instant`]) or one
//! [`Phase`] per [`TurnController::step`] call ([`ResolutionMode::Stepped`]),
//! which lets presentation finish animating each phase before the next one.
//!
//! [`Board`]: tessera_core::Board
//! [`TileSource`]: tessera_generator::TileSource
//!
//! # Examples
//!
//! ```
//! use std::sync::mpsc;
//!
//! use tessera_game::{GameConfig, GameEvent, Session};
//!
//! let (tx, rx) = mpsc::channel();
//! let mut session = Session::new(GameConfig::default(), tx)?;
//!
//! if let Some(hint) = session.hint() {
//!     session.request_swap(hint.a, hint.b)?;
//!     let events: Vec<GameEvent> = rx.try_iter().collect();
//!     assert!(events.iter().any(GameEvent::is_tiles_removed));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    config::{GameConfig, GameConfigError, RefillPolicy, ResolutionMode},
    error::{GameError, SwapBlockReason},
    event::{EventSink, FnSink, GameEvent, NullSink},
    session::Session,
    turn::{Phase, TurnController, TurnOutcome, TurnState},
};

mod config;
mod error;
mod event;
mod session;
pub mod testing;
mod turn;
