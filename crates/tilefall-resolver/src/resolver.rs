use std::num::NonZero;

use tilefall_core::{Grid, MatchSet, Position, SymbolSet, find_matches};
use tilefall_generator::SymbolSource;

use crate::{Cascade, CascadeProgress, CascadeReport, ColumnRefill, Round};

/// Settings for [`CascadeResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Alphabet that refill symbols are drawn from.
    pub symbols: SymbolSet,
    /// Points awarded per removed cell.
    pub points_per_tile: u32,
    /// Upper bound on rounds in a single cascade.
    pub max_rounds: NonZero<u32>,
}

impl ResolverConfig {
    /// Default points per removed cell.
    pub const DEFAULT_POINTS_PER_TILE: u32 = 10;
    /// Default round limit.
    pub const DEFAULT_MAX_ROUNDS: NonZero<u32> = NonZero::new(1000).unwrap();
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            symbols: SymbolSet::DEFAULT,
            points_per_tile: Self::DEFAULT_POINTS_PER_TILE,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
        }
    }
}

/// Resolves cascades on a grid.
///
/// A round finds every matched cell, awards
/// [`points_per_tile`](ResolverConfig::points_per_tile) for each, lets the
/// remaining cells of every column fall to the bottom in their original order,
/// and fills the vacated top cells with fresh symbols. Refill symbols are not
/// checked against the board, so they may form new runs and extend the chain.
///
/// Refill draws happen column by column from left to right, and within a
/// column from the lowest vacated cell upward.
///
/// A cascade ends when the board is stable, or after
/// [`max_rounds`](ResolverConfig::max_rounds) rounds; the latter guards
/// against random streams that keep producing runs and is flagged in the
/// report.
#[derive(Debug, Clone)]
pub struct CascadeResolver {
    config: ResolverConfig,
}

impl CascadeResolver {
    /// Creates a resolver with the given settings.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Returns the resolver settings.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves every round and checks the settled board for deadlock.
    pub fn resolve<R>(&self, grid: &mut Grid, rng: &mut R) -> CascadeReport
    where
        R: SymbolSource + ?Sized,
    {
        self.cascade(grid, rng).finish()
    }

    /// Starts a step-wise cascade on `grid`.
    pub fn cascade<'a, R>(&'a self, grid: &'a mut Grid, rng: &'a mut R) -> Cascade<'a, R>
    where
        R: SymbolSource + ?Sized,
    {
        Cascade::new(self, grid, rng)
    }

    /// Starts step-wise bookkeeping for a grid the caller keeps.
    #[must_use]
    pub fn progress(&self) -> CascadeProgress {
        CascadeProgress::new()
    }

    /// Applies a single round, or returns `None` if the grid is stable.
    ///
    /// `index` is recorded as the round's position within its cascade.
    pub fn resolve_round<R>(&self, grid: &mut Grid, rng: &mut R, index: u32) -> Option<Round>
    where
        R: SymbolSource + ?Sized,
    {
        let removed = find_matches(grid);
        if removed.is_empty() {
            return None;
        }
        let points = u64::from(self.config.points_per_tile) * removed.len() as u64;
        let refills = self.collapse(grid, &removed, rng);
        log::debug!(
            "cascade round {index}: removed {} cells for {points} points",
            removed.len()
        );
        Some(Round {
            index,
            removed,
            points,
            refills,
        })
    }

    fn collapse<R>(&self, grid: &mut Grid, removed: &MatchSet, rng: &mut R) -> Vec<ColumnRefill>
    where
        R: SymbolSource + ?Sized,
    {
        let size = grid.size();
        let mut refills = Vec::new();
        for x in 0..size {
            // Rows `write..size` hold the surviving cells once the scan is done.
            let mut write = size;
            for y in (0..size).rev() {
                let pos = Position::new(x, y);
                if removed.contains(pos) {
                    continue;
                }
                write -= 1;
                if write != y {
                    grid[Position::new(x, write)] = grid[pos];
                }
            }
            if write == 0 {
                continue;
            }
            for y in (0..write).rev() {
                grid[Position::new(x, y)] = rng.sample_symbol(self.config.symbols);
            }
            refills.push(ColumnRefill {
                x,
                symbols: (0..write).map(|y| grid[Position::new(x, y)]).collect(),
            });
        }
        refills
    }
}
