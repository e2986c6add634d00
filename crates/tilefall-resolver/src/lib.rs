//! Cascade resolution for tile-matching puzzles.
//!
//! After a productive swap, matched cells are removed, the cells above fall
//! into the gaps, and fresh symbols drop in from the top. The new arrangement
//! may contain runs of its own, so the process repeats until the board is
//! stable. Each repetition is a [`Round`].
//!
//! # Driving a cascade
//!
//! - [`CascadeResolver::resolve`] runs every round at once and returns a
//!   [`CascadeReport`].
//! - [`CascadeResolver::cascade`] returns a [`Cascade`] that applies one round
//!   per [`Cascade::step`], so a front end can animate each round before asking
//!   for the next. It is also an [`Iterator`] over rounds.
//! - [`CascadeProgress`] holds the same bookkeeping without borrowing the
//!   grid, for owners that keep the grid and the randomness themselves.
//!
//! All three produce the same final grid, rounds, and points for the same
//! starting grid and random stream.
//!
//! # Examples
//!
//! ```
//! use tilefall_core::{Grid, SymbolSet, has_match};
//! use tilefall_generator::testing::ScriptedSource;
//! use tilefall_resolver::{CascadeResolver, ResolverConfig};
//!
//! let mut grid: Grid = "
//!     ABC
//!     BCA
//!     AAA
//! "
//! .parse()?;
//!
//! let resolver = CascadeResolver::new(ResolverConfig {
//!     symbols: SymbolSet::new(3)?,
//!     ..ResolverConfig::default()
//! });
//! // One new symbol falls into each column
//! let mut rng = ScriptedSource::new([1, 2, 0]);
//! let report = resolver.resolve(&mut grid, &mut rng);
//!
//! assert_eq!(report.rounds.len(), 1);
//! assert_eq!(report.total_points, 30);
//! assert_eq!(grid.to_string(), "BCA\nABC\nBCA");
//! assert!(!has_match(&grid));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{cascade::*, resolver::*, round::*};

mod cascade;
mod resolver;
mod round;
