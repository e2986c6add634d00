//! Core data structures for tile-matching puzzles.
//!
//! This crate provides the board representation shared by generation, cascade
//! resolution, and game session management, together with the two pure board
//! analyses every other component builds on.
//!
//! # Overview
//!
//! 1. **Core types** - Fundamental board types
//!    - [`symbol`]: Opaque tile kinds ([`Symbol`]) and the alphabet they are drawn from ([`SymbolSet`])
//!    - [`position`]: Zero-based `(column, row)` coordinates ([`Position`])
//!    - [`grid`]: The square board itself ([`Grid`]), with a plain-text format
//!
//! 2. **Board analyses**
//!    - [`matches`]: Run detection ([`find_matches`], [`has_match`], [`find_runs`])
//!    - [`moves`]: Deadlock detection ([`has_any_move`], [`find_move`], [`count_moves`])
//!
//! # Examples
//!
//! ```
//! use tilefall_core::{Grid, Move, Position, find_matches, find_move, has_any_move};
//!
//! let mut grid: Grid = "
//!     ABA
//!     CAD
//!     BCD
//! "
//! .parse()?;
//!
//! // Stable board: nothing to remove yet
//! assert!(find_matches(&grid).is_empty());
//!
//! // Swapping the `B` at (1, 0) with the `A` below it completes row 0
//! assert!(has_any_move(&mut grid));
//! assert_eq!(
//!     find_move(&mut grid),
//!     Some(Move::new(Position::new(1, 0), Position::new(1, 1)))
//! );
//! # Ok::<(), tilefall_core::GridParseError>(())
//! ```

pub mod grid;
pub mod matches;
pub mod moves;
pub mod position;
pub mod symbol;

// Re-export commonly used types
pub use self::{
    grid::{Grid, GridParseError},
    matches::{MatchSet, Orientation, Run, find_matches, find_runs, has_match},
    moves::{Move, count_moves, find_move, has_any_move},
    position::{Position, PositionParseError},
    symbol::{Symbol, SymbolSet, SymbolSetError},
};
