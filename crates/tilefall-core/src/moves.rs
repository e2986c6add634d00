//! Deadlock detection.
//!
//! A board is *deadlocked* when no single swap of orthogonal neighbors produces
//! a run. The checks here try every such swap in place and undo it before
//! looking at the next one, so the grid is exactly as it was on return, even
//! when a search stops early.
//!
//! Candidate swaps are visited in a fixed order: every cell with a right
//! neighbor in row-major order, then every cell with a bottom neighbor in
//! row-major order. Each trial runs a full [`has_match`] sweep, so an
//! exhaustive check on an `N`×`N` board costs O(N⁴); that is fine for the board
//! sizes a player can see.

use std::fmt::{self, Display};

use crate::{Grid, Position, has_match};

/// A swap of two orthogonally adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// First cell of the swap.
    pub from: Position,
    /// Second cell of the swap.
    pub to: Position,
}

impl Move {
    /// Creates a move between two cells.
    #[must_use]
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// Returns `true` if the two cells share an edge.
    #[must_use]
    pub const fn is_adjacent(self) -> bool {
        self.from.is_adjacent(self.to)
    }

    /// Swaps the two cells, runs `f` on the swapped grid, and swaps them back.
    ///
    /// # Panics
    ///
    /// Panics if either cell is off the grid.
    pub fn try_on<T, F>(self, grid: &mut Grid, f: F) -> T
    where
        F: FnOnce(&Grid) -> T,
    {
        grid.swap(self.from, self.to);
        let result = f(grid);
        grid.swap(self.from, self.to);
        result
    }

    /// Returns `true` if making this move would produce at least one run.
    ///
    /// The grid is left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if either cell is off the grid.
    #[must_use]
    pub fn is_productive(self, grid: &mut Grid) -> bool {
        self.try_on(grid, has_match)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.from, self.to)
    }
}

/// Returns every candidate swap on the grid, in checking order.
fn candidate_moves(grid: &Grid) -> impl Iterator<Item = Move> + use<> {
    let size = grid.size();
    let last = size.saturating_sub(1);
    let horizontal = grid
        .positions()
        .filter(move |pos| pos.x() < last)
        .map(|pos| Move::new(pos, Position::new(pos.x() + 1, pos.y())));
    let vertical = grid
        .positions()
        .filter(move |pos| pos.y() < last)
        .map(|pos| Move::new(pos, Position::new(pos.x(), pos.y() + 1)));
    horizontal.chain(vertical)
}

/// Returns `true` if some adjacent swap would produce a run.
///
/// Returns `false` exactly when the board is deadlocked. The grid is unchanged
/// on return.
///
/// # Examples
///
/// ```
/// use tilefall_core::{Grid, has_any_move};
///
/// let mut dead: Grid = "
///     ABC
///     CDA
///     ABC
/// "
/// .parse()?;
/// let before = dead.clone();
/// assert!(!has_any_move(&mut dead));
/// assert_eq!(dead, before);
/// # Ok::<(), tilefall_core::GridParseError>(())
/// ```
#[must_use]
pub fn has_any_move(grid: &mut Grid) -> bool {
    find_move(grid).is_some()
}

/// Returns the first productive swap in checking order, if any.
///
/// Useful as a hint for the player. The grid is unchanged on return.
#[must_use]
pub fn find_move(grid: &mut Grid) -> Option<Move> {
    candidate_moves(grid).find(|mv| mv.is_productive(grid))
}

/// Counts every productive swap on the board.
///
/// The grid is unchanged on return.
#[must_use]
pub fn count_moves(grid: &mut Grid) -> usize {
    candidate_moves(grid)
        .filter(|mv| mv.is_productive(grid))
        .count()
}
