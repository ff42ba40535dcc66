use tessera_core::BoardError;

/// Why a swap request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum SwapBlockReason {
    /// A position is outside the board.
    #[display("position is outside the board")]
    OutOfBounds,
    /// The two positions are not orthogonal neighbours.
    #[display("positions are not adjacent")]
    NotAdjacent,
    /// Both positions are the same cell.
    #[display("cannot swap a cell with itself")]
    SamePosition,
    /// A position holds no tile.
    #[display("cannot swap an empty cell")]
    EmptyCell,
}

/// Errors that can occur during game operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GameError {
    /// The swap request was invalid; game state is unchanged.
    #[display("invalid swap: {_0}")]
    #[from]
    InvalidSwapTarget(#[error(not(source))] SwapBlockReason),
    /// A turn is still resolving; the request was dropped.
    #[display("a turn is still resolving")]
    Busy,
    /// A board access failed.
    #[display("board error: {_0}")]
    #[from]
    Board(BoardError),
}
