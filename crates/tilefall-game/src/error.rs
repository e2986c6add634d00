use tilefall_core::{Position, Symbol, SymbolSetError};

/// Errors returned by [`Game`](crate::Game) operations.
///
/// Every error is raised before the session is touched, so a failed call
/// leaves the board, the selection, and the score exactly as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// The position lies outside the board.
    #[display("position {pos} is outside the {size}x{size} board")]
    InvalidCoordinate {
        /// The rejected position.
        pos: Position,
        /// Side length of the board.
        size: u8,
    },
}

/// Errors returned when a [`GameConfig`](crate::GameConfig) cannot be used.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum ConfigError {
    /// The board size is outside the supported range.
    #[display("board size {size} is outside {min}..={max}")]
    InvalidSize {
        /// Requested side length.
        size: u8,
        /// Smallest supported side length.
        min: u8,
        /// Largest supported side length.
        max: u8,
    },
    /// The symbol count is outside the supported range.
    #[display("invalid symbol count: {_0}")]
    Symbols(#[from] SymbolSetError),
    /// The generation retry limit is zero.
    #[display("max generation attempts must be at least 1")]
    ZeroGenerationAttempts,
    /// The cascade round limit is zero.
    #[display("max cascade rounds must be at least 1")]
    ZeroMaxRounds,
    /// A supplied board does not match the configured size.
    #[display("board is {actual}x{actual}, expected {expected}x{expected}")]
    GridSizeMismatch {
        /// Configured side length.
        expected: u8,
        /// Side length of the supplied board.
        actual: u8,
    },
    /// A supplied board holds a symbol outside the configured alphabet.
    #[display("symbol {symbol} at {pos} is not one of the configured symbols")]
    UnknownSymbol {
        /// Where the symbol was found.
        pos: Position,
        /// The offending symbol.
        symbol: Symbol,
    },
    /// A supplied board already contains a run.
    #[display("board already has a run starting at {start}")]
    UnstableGrid {
        /// First cell of the first run found.
        start: Position,
    },
}
