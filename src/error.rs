use thiserror::Error;

/// Errors raised by the board, the players and the turn loop.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid position ({row}, {col})")]
    InvalidPosition { row: i32, col: i32 },

    #[error("position ({row}, {col}) is already occupied")]
    CellOccupied { row: i32, col: i32 },

    #[error("position ({row}, {col}) is not occupied")]
    CellNotOccupied { row: i32, col: i32 },

    #[error("no valid move found")]
    NoValidMove,

    #[error("invalid symbol '{0}' (expected 'X' or 'O')")]
    InvalidSymbol(String),

    #[error("invalid strategy {0} (expected 1, 2 or 3)")]
    InvalidStrategy(u8),

    #[error("input closed before a move was entered")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for results using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
