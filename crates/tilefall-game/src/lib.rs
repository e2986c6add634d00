//! Game session management for tile-matching puzzles.
//!
//! [`Game`] ties the pieces together: it generates a board, routes player
//! picks through the [`SwapValidator`], resolves the cascade of every accepted
//! swap, and keeps the session score in a [`ScoreTracker`]. The best score is
//! read from and committed to an injected [`BestScoreStore`].
//!
//! The crate draws nothing on screen and never waits. A front end forwards
//! picks to [`Game::activate`], shows the returned [`SwapOutcome`], and calls
//! [`Game::mark_idle`] when it is ready for the next pick. Front ends that
//! animate each cascade round use [`Game::activate_stepwise`] and
//! [`Game::advance`] instead.
//!
//! # Examples
//!
//! ```
//! use tilefall_core::{Grid, Position};
//! use tilefall_game::{Game, GameConfig, MemoryBestStore, SwapOutcome};
//! use tilefall_generator::testing::ScriptedSource;
//!
//! let config = GameConfig {
//!     size: 3,
//!     symbol_count: 4,
//!     ..GameConfig::default()
//! };
//! let grid: Grid = "
//!     ABA
//!     CAD
//!     BCD
//! "
//! .parse()?;
//! // Three refill draws, one per cleared column
//! let rng = ScriptedSource::new([3, 2, 1]);
//! let mut game = Game::from_grid(&config, grid, rng, MemoryBestStore::new(20))?;
//!
//! game.activate(Position::new(1, 0))?;
//! let outcome = game.activate(Position::new(1, 1))?;
//! assert!(outcome.is_accepted_swap());
//! assert_eq!(game.grid().to_string(), "DCB\nCBD\nBCD");
//! assert_eq!(game.current_score(), 30);
//!
//! assert_eq!(game.best_score(), 20);
//! assert_eq!(game.commit_best(), 30);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{config::*, error::*, game::*, score::*, swap::*};

mod config;
mod error;
mod game;
mod score;
mod swap;
