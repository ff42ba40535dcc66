use std::sync::mpsc;

use tessera_core::{Position, TileMove, TileSpawn};

/// A logical board change, reported to presentation in the order it happens.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// Tiles changed cells, by a swap, a swap-back, or a collapse.
    TilesMoved(Vec<TileMove>),
    /// Matched cells were cleared, in row-major order.
    TilesRemoved(Vec<Position>),
    /// New tiles were placed into vacant cells.
    TilesSpawned(Vec<TileSpawn>),
    /// The total score after an award.
    ScoreChanged(u64),
    /// A turn with at least one match finished and the board is stable.
    CascadeSettled {
        /// Number of remove-collapse-refill passes the turn took.
        passes: usize,
    },
}

/// Receiver of [`GameEvent`]s.
///
/// Emission never fails from the controller's point of view; a sink that
/// cannot deliver an event drops it.
pub trait EventSink {
    /// Delivers one event.
    fn emit(&mut self, event: GameEvent);
}

impl<T> EventSink for &mut T
where
    T: EventSink + ?Sized,
{
    fn emit(&mut self, event: GameEvent) {
        (**self).emit(event);
    }
}

impl<T> EventSink for Box<T>
where
    T: EventSink + ?Sized,
{
    fn emit(&mut self, event: GameEvent) {
        (**self).emit(event);
    }
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

impl EventSink for mpsc::Sender<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        if self.send(event).is_err() {
            log::trace!("event receiver disconnected, dropping event");
        }
    }
}

/// A sink that discards every event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}

/// A sink that forwards events to a closure.
///
/// # Examples
///
/// ```
/// use tessera_game::{EventSink, FnSink, GameEvent};
///
/// let mut total = 0;
/// let mut sink = FnSink::new(|event: GameEvent| {
///     if let GameEvent::ScoreChanged(score) = event {
///         total = score;
///     }
/// });
/// sink.emit(GameEvent::ScoreChanged(12));
/// drop(sink);
/// assert_eq!(total, 12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnSink<F>(F);

impl<F> FnSink<F>
where
    F: FnMut(GameEvent),
{
    /// Wraps `f`.
    #[must_use]
    pub fn new(f: F) -> Self {
        Self(f)
    }

    /// Returns the wrapped closure.
    #[must_use]
    pub fn into_inner(self) -> F {
        self.0
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GameEvent),
{
    fn emit(&mut self, event: GameEvent) {
        (self.0)(event);
    }
}
