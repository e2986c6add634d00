use tilefall_core::{Grid, has_any_move, has_match};
use tilefall_generator::SymbolSource;

use crate::{CascadeReport, CascadeResolver, CascadeStep, Round};

/// Bookkeeping for a cascade resolved one round at a time.
///
/// The grid and the random source are passed to every call instead of being
/// borrowed for the whole cascade, so an owner such as a game session can keep
/// both in its own fields between rounds.
///
/// # Examples
///
/// ```
/// use tilefall_core::{Grid, SymbolSet};
/// use tilefall_generator::testing::ScriptedSource;
/// use tilefall_resolver::{CascadeResolver, ResolverConfig};
///
/// let mut grid: Grid = "
///     ABC
///     BCA
///     AAA
/// "
/// .parse()?;
/// let mut rng = ScriptedSource::new([1, 2, 0]);
/// let resolver = CascadeResolver::new(ResolverConfig {
///     symbols: SymbolSet::new(3)?,
///     ..ResolverConfig::default()
/// });
///
/// let mut progress = resolver.progress();
/// let step = progress.step(&resolver, &mut grid, &mut rng).unwrap();
/// assert_eq!(step.round.points, 30);
/// assert!(!step.more_pending);
/// assert!(progress.is_finished());
///
/// let report = progress.finish(&resolver, &mut grid, &mut rng);
/// assert_eq!(report.total_points, 30);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CascadeProgress {
    rounds: Vec<Round>,
    total_points: u64,
    truncated: bool,
    finished: bool,
}

impl CascadeProgress {
    /// Creates bookkeeping for a cascade that has not started.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the next round, or returns `None` once the cascade is over.
    pub fn step<R>(
        &mut self,
        resolver: &CascadeResolver,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Option<CascadeStep>
    where
        R: SymbolSource + ?Sized,
    {
        if self.finished {
            return None;
        }
        let index = self.next_index();
        let Some(round) = resolver.resolve_round(grid, rng, index) else {
            self.finished = true;
            return None;
        };
        self.total_points += round.points;

        let pending = has_match(grid);
        if pending && index >= resolver.config().max_rounds.get() {
            log::warn!("cascade stopped after {index} rounds with runs still on the board");
            self.truncated = true;
        }
        self.finished = !pending || self.truncated;
        self.rounds.push(round.clone());
        Some(CascadeStep {
            round,
            more_pending: !self.finished,
        })
    }

    /// Applies every remaining round and returns the report.
    pub fn finish<R>(
        mut self,
        resolver: &CascadeResolver,
        grid: &mut Grid,
        rng: &mut R,
    ) -> CascadeReport
    where
        R: SymbolSource + ?Sized,
    {
        while self.step(resolver, grid, rng).is_some() {}
        // A truncated board still holds runs, so a move search says nothing
        let deadlocked = !self.truncated && !has_any_move(grid);
        if deadlocked {
            log::debug!("board is deadlocked after {} rounds", self.rounds.len());
        }
        CascadeReport {
            rounds: self.rounds,
            total_points: self.total_points,
            deadlocked,
            truncated: self.truncated,
        }
    }

    /// Returns `true` once no further round will be applied.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the rounds applied so far.
    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Returns the points awarded so far.
    #[must_use]
    pub fn total_points(&self) -> u64 {
        self.total_points
    }

    #[expect(clippy::cast_possible_truncation)]
    fn next_index(&self) -> u32 {
        self.rounds.len() as u32 + 1
    }
}

/// A cascade that borrows its grid and random source.
///
/// Created by [`CascadeResolver::cascade`]. Iterating yields each applied
/// [`Round`]; [`Cascade::finish`] resolves whatever is left and reports.
#[derive(Debug)]
pub struct Cascade<'a, R: ?Sized> {
    resolver: &'a CascadeResolver,
    grid: &'a mut Grid,
    rng: &'a mut R,
    progress: CascadeProgress,
}

impl<'a, R> Cascade<'a, R>
where
    R: SymbolSource + ?Sized,
{
    pub(crate) fn new(resolver: &'a CascadeResolver, grid: &'a mut Grid, rng: &'a mut R) -> Self {
        Self {
            resolver,
            grid,
            rng,
            progress: CascadeProgress::new(),
        }
    }

    /// Applies the next round, or returns `None` once the board is stable or
    /// the round limit was hit.
    pub fn step(&mut self) -> Option<CascadeStep> {
        self.progress.step(self.resolver, self.grid, self.rng)
    }

    /// Returns the grid as it stands after the last applied round.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.grid
    }

    /// Returns the bookkeeping accumulated so far.
    #[must_use]
    pub fn progress(&self) -> &CascadeProgress {
        &self.progress
    }

    /// Applies every remaining round and returns the report.
    pub fn finish(self) -> CascadeReport {
        self.progress.finish(self.resolver, self.grid, self.rng)
    }
}

impl<R> Iterator for Cascade<'_, R>
where
    R: SymbolSource + ?Sized,
{
    type Item = Round;

    fn next(&mut self) -> Option<Self::Item> {
        self.step().map(|step| step.round)
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;
    use tilefall_core::{Position, Symbol, SymbolSet};
    use tilefall_generator::{GeneratorConfig, GridGenerator, testing::ScriptedSource};

    use super::*;
    use crate::ResolverConfig;

    const CHAIN: &str = "
        EBCD
        ECDB
        AAAC
        EDBC
    ";

    fn resolver(symbols: u8) -> CascadeResolver {
        CascadeResolver::new(ResolverConfig {
            symbols: SymbolSet::new(symbols).unwrap(),
            ..ResolverConfig::default()
        })
    }

    #[test]
    fn test_steps_report_pending_rounds() {
        let resolver = resolver(5);
        let mut grid: Grid = CHAIN.parse().unwrap();
        let mut rng = ScriptedSource::new([1, 3, 0, 2, 3, 1]);
        let mut cascade = resolver.cascade(&mut grid, &mut rng);

        let first = cascade.step().expect("first round");
        assert_eq!(first.round.index, 1);
        assert!(first.more_pending);
        assert_eq!(cascade.grid().to_string(), "BDAD\nEBCB\nECDC\nEDBC");

        let second = cascade.step().expect("second round");
        assert_eq!(second.round.index, 2);
        assert!(!second.more_pending);
        assert_eq!(cascade.progress().total_points(), 60);

        assert_eq!(cascade.step(), None);
        assert_eq!(cascade.step(), None);
        let report = cascade.finish();
        assert_eq!(report.rounds.len(), 2);
        assert!(!report.deadlocked);
    }

    #[test]
    fn test_iterator_yields_rounds() {
        let resolver = resolver(5);
        let mut grid: Grid = CHAIN.parse().unwrap();
        let mut rng = ScriptedSource::new([1, 3, 0, 2, 3, 1]);
        let points: Vec<_> = resolver
            .cascade(&mut grid, &mut rng)
            .map(|round| round.points)
            .collect();
        assert_eq!(points, vec![30, 30]);
        assert_eq!(grid.to_string(), "BDAD\nDBCB\nCCDC\nBDBC");
    }

    #[test]
    fn test_finish_after_partial_steps() {
        let resolver = resolver(5);
        let mut grid: Grid = CHAIN.parse().unwrap();
        let mut rng = ScriptedSource::new([1, 3, 0, 2, 3, 1]);
        let mut progress = resolver.progress();
        assert!(progress.step(&resolver, &mut grid, &mut rng).is_some());
        assert_eq!(progress.rounds().len(), 1);
        assert!(!progress.is_finished());

        let report = progress.finish(&resolver, &mut grid, &mut rng);
        assert_eq!(report.total_points, 60);
        assert_eq!(grid.to_string(), "BDAD\nDBCB\nCCDC\nBDBC");
    }

    #[test]
    fn test_stable_grid_finishes_immediately() {
        let resolver = resolver(3);
        let mut grid: Grid = "ABC\nBCA\nCAB".parse().unwrap();
        let mut rng = ScriptedSource::new([]);
        let mut progress = resolver.progress();
        assert_eq!(progress.step(&resolver, &mut grid, &mut rng), None);
        assert!(progress.is_finished());
        assert_eq!(progress.total_points(), 0);
    }

    #[test]
    fn test_limit_stops_stepping() {
        let resolver = CascadeResolver::new(ResolverConfig {
            symbols: SymbolSet::new(5).unwrap(),
            max_rounds: NonZero::new(1).unwrap(),
            ..ResolverConfig::default()
        });
        let mut grid: Grid = CHAIN.parse().unwrap();
        let mut rng = ScriptedSource::new([1, 3, 0]);
        let mut cascade = resolver.cascade(&mut grid, &mut rng);
        let step = cascade.step().expect("one round");
        assert!(!step.more_pending);
        assert_eq!(cascade.step(), None);
        assert!(cascade.finish().truncated);
    }

    #[test]
    fn test_stepwise_matches_one_shot() {
        let generator = GridGenerator::new(GeneratorConfig {
            require_move: false,
            ..GeneratorConfig::default()
        });
        let resolver = CascadeResolver::new(ResolverConfig::default());
        for seed in 0..16 {
            let mut rng = Pcg64::seed_from_u64(seed);
            let mut start = generator.generate(&mut rng);
            // Force a run into the top row
            for x in 0..3 {
                start[Position::new(x, 0)] = Symbol::new(5);
            }

            let mut one_shot = start.clone();
            let mut one_shot_rng = rng.clone();
            let expected = resolver.resolve(&mut one_shot, &mut one_shot_rng);

            let mut stepped = start.clone();
            let mut stepped_rng = rng.clone();
            let mut cascade = resolver.cascade(&mut stepped, &mut stepped_rng);
            let mut rounds = Vec::new();
            while let Some(step) = cascade.step() {
                rounds.push(step.round);
            }
            let report = cascade.finish();

            assert_eq!(rounds, expected.rounds);
            assert_eq!(report, expected);
            assert_eq!(stepped, one_shot);
        }
    }
}
