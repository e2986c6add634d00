//! Board generation for tile-matching puzzles.
//!
//! # Overview
//!
//! - [`GridGenerator`] fills a board so that no run exists from the start, and
//!   by default keeps trying until the board also offers at least one legal move.
//! - [`BoardSeed`] makes a board reproducible: the same seed always yields the
//!   same board (and, when the seeded generator is kept, the same refills).
//! - [`SymbolSource`] is the randomness the engine consumes. Every [`rand::Rng`]
//!   is a source; [`testing::ScriptedSource`] replays fixed draws in tests.
//!
//! # Examples
//!
//! ```
//! use tilefall_core::find_matches;
//! use tilefall_generator::{GeneratorConfig, GridGenerator};
//!
//! let generator = GridGenerator::new(GeneratorConfig::default());
//! let board = generator.generate_seeded();
//!
//! assert_eq!(board.grid.size(), 8);
//! assert!(find_matches(&board.grid).is_empty());
//!
//! // The seed reproduces the board
//! assert_eq!(generator.generate_with_seed(board.seed), board);
//! ```

pub use self::{generator::*, seed::*, source::*};

mod generator;
mod seed;
mod source;
pub mod testing;
