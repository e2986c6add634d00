use tilefall_core::{Grid, Move, Position, find_move, find_runs, has_any_move};
use tilefall_generator::{GridGenerator, SymbolSource};
use tilefall_resolver::{
    CascadeProgress, CascadeReport, CascadeResolver, CascadeStep, ResolverConfig,
};

use crate::{
    BestScoreStore, ConfigError, GameConfig, GameError, ScoreTracker, SelectionState, SwapAttempt,
    SwapValidator,
};

/// Result of [`Game::activate`] and [`Game::activate_stepwise`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SwapOutcome {
    /// The cell became the pending first pick.
    Selected(Position),
    /// The pick was not adjacent to the pending one; the selection was cleared.
    Deselected,
    /// The swap formed no run and was undone.
    RejectedSwap(Move),
    /// The swap formed a run and its cascade was resolved in full.
    AcceptedSwap(CascadeReport),
    /// The swap formed a run; its rounds are applied by [`Game::advance`].
    CascadePending(Move),
    /// A cascade is still in progress; the pick was ignored.
    Busy,
}

/// One call's worth of progress on a step-wise cascade.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum CascadeEvent {
    /// A round was applied and its points added to the score.
    Round(CascadeStep),
    /// No rounds are left. The report repeats every round of the cascade and
    /// tells whether the settled board is deadlocked.
    Settled(CascadeReport),
}

/// A tile-matching game session.
///
/// Owns the board, the random source that refills it, the selection machine,
/// and the session score. The best score lives in the injected store and is
/// only written by [`Game::commit_best`] and [`Game::reset`].
///
/// After an accepted swap the session is busy until the front end calls
/// [`Game::mark_idle`], typically once it has finished animating the cascade.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg64;
/// use tilefall_core::{Position, has_match};
/// use tilefall_game::{Game, GameConfig, MemoryBestStore, SwapOutcome};
///
/// let mut game = Game::initialize(
///     &GameConfig::default(),
///     Pcg64::seed_from_u64(7),
///     MemoryBestStore::default(),
/// )?;
/// assert_eq!(game.grid().size(), 8);
/// assert!(!has_match(game.grid()));
///
/// // Play the suggested move
/// let hint = game.hint().expect("new boards have a move");
/// game.activate(hint.from)?;
/// let SwapOutcome::AcceptedSwap(report) = game.activate(hint.to)? else {
///     panic!("hinted move is productive");
/// };
/// assert_eq!(game.current_score(), report.total_points);
/// assert!(game.current_score() >= 30);
///
/// game.mark_idle();
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Game<R, S> {
    generator: GridGenerator,
    resolver: CascadeResolver,
    rng: R,
    store: S,
    grid: Grid,
    swap: SwapValidator,
    score: ScoreTracker,
    cascade: Option<CascadeProgress>,
}

impl<R, S> Game<R, S>
where
    R: SymbolSource,
    S: BestScoreStore,
{
    /// Starts a session on a freshly generated board.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` does not validate.
    pub fn initialize(config: &GameConfig, mut rng: R, store: S) -> Result<Self, ConfigError> {
        let (generator, resolver) = config.validate()?;
        let generator = GridGenerator::new(generator);
        let grid = generator.generate(&mut rng);
        log::info!(
            "started a {size}x{size} game with {} symbols",
            config.symbol_count,
            size = config.size
        );
        Ok(Self::assemble(generator, resolver, rng, store, grid))
    }

    /// Starts a session on a caller-supplied board.
    ///
    /// The board must be stable and drawn from the configured symbols; later
    /// boards come from the generator.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` does not validate, if `grid` is not
    /// `config.size` cells wide, if it holds a symbol outside the alphabet, or
    /// if it already contains a run.
    pub fn from_grid(
        config: &GameConfig,
        grid: Grid,
        rng: R,
        store: S,
    ) -> Result<Self, ConfigError> {
        let (generator, resolver) = config.validate()?;
        if grid.size() != config.size {
            return Err(ConfigError::GridSizeMismatch {
                expected: config.size,
                actual: grid.size(),
            });
        }
        if let Some(pos) = grid
            .positions()
            .find(|&pos| !resolver.symbols.contains(grid[pos]))
        {
            return Err(ConfigError::UnknownSymbol {
                pos,
                symbol: grid[pos],
            });
        }
        if let Some(run) = find_runs(&grid).first() {
            return Err(ConfigError::UnstableGrid { start: run.start });
        }
        Ok(Self::assemble(
            GridGenerator::new(generator),
            resolver,
            rng,
            store,
            grid,
        ))
    }

    fn assemble(
        generator: GridGenerator,
        resolver: ResolverConfig,
        rng: R,
        store: S,
        grid: Grid,
    ) -> Self {
        Self {
            generator,
            resolver: CascadeResolver::new(resolver),
            rng,
            store,
            grid,
            swap: SwapValidator::new(),
            score: ScoreTracker::new(),
            cascade: None,
        }
    }

    /// Returns the board.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the state of the selection machine.
    #[must_use]
    pub fn selection_state(&self) -> SelectionState {
        self.swap.state()
    }

    /// Returns the pending first pick, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Position> {
        self.swap.selection()
    }

    /// Returns `true` while a swap's cascade has not been acknowledged.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.swap.state().is_busy()
    }

    /// Returns the score of the current session.
    #[must_use]
    pub fn current_score(&self) -> u64 {
        self.score.current()
    }

    /// Returns the stored best score.
    ///
    /// The current session only counts once it is committed.
    #[must_use]
    pub fn best_score(&self) -> u64 {
        self.store.get()
    }

    /// Returns the best-score store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handles a pick at `pos`, resolving any accepted swap's cascade at once.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidCoordinate`] if `pos` is off the board.
    /// Nothing changes in that case.
    pub fn activate(&mut self, pos: Position) -> Result<SwapOutcome, GameError> {
        self.pick(pos, |game, mv| {
            log::debug!("accepted swap {mv}");
            let report = game.resolver.resolve(&mut game.grid, &mut game.rng);
            game.score.add_points(report.total_points);
            SwapOutcome::AcceptedSwap(report)
        })
    }

    /// Handles a pick at `pos`, leaving any accepted swap's cascade for
    /// [`Game::advance`].
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidCoordinate`] if `pos` is off the board.
    /// Nothing changes in that case.
    pub fn activate_stepwise(&mut self, pos: Position) -> Result<SwapOutcome, GameError> {
        self.pick(pos, |game, mv| {
            log::debug!("accepted swap {mv}, cascade pending");
            game.cascade = Some(game.resolver.progress());
            SwapOutcome::CascadePending(mv)
        })
    }

    fn pick<F>(&mut self, pos: Position, accept: F) -> Result<SwapOutcome, GameError>
    where
        F: FnOnce(&mut Self, Move) -> SwapOutcome,
    {
        let outcome = match self.swap.select_or_swap(&mut self.grid, pos)? {
            SwapAttempt::Selected(pos) => SwapOutcome::Selected(pos),
            SwapAttempt::Deselected => SwapOutcome::Deselected,
            SwapAttempt::Rejected(mv) => SwapOutcome::RejectedSwap(mv),
            SwapAttempt::Busy => SwapOutcome::Busy,
            SwapAttempt::Accepted(mv) => accept(self, mv),
        };
        Ok(outcome)
    }

    /// Applies the next round of a pending step-wise cascade.
    ///
    /// Returns [`CascadeEvent::Round`] for each round, then
    /// [`CascadeEvent::Settled`] once, then `None` until the next accepted
    /// step-wise swap.
    pub fn advance(&mut self) -> Option<CascadeEvent> {
        let progress = self.cascade.as_mut()?;
        if let Some(step) = progress.step(&self.resolver, &mut self.grid, &mut self.rng) {
            self.score.add_points(step.round.points);
            return Some(CascadeEvent::Round(step));
        }
        let progress = self.cascade.take()?;
        let report = progress.finish(&self.resolver, &mut self.grid, &mut self.rng);
        Some(CascadeEvent::Settled(report))
    }

    /// Returns `true` while a step-wise cascade has events left.
    #[must_use]
    pub fn has_pending_cascade(&self) -> bool {
        self.cascade.is_some()
    }

    /// Acknowledges the end of a cascade so the next pick is accepted.
    ///
    /// Has no effect while a step-wise cascade still has events left.
    pub fn mark_idle(&mut self) {
        if self.cascade.is_some() {
            log::debug!("ignoring mark_idle while a cascade is pending");
            return;
        }
        self.swap.mark_idle();
    }

    /// Returns a productive swap on the current board, if any.
    #[must_use]
    pub fn hint(&mut self) -> Option<Move> {
        find_move(&mut self.grid)
    }

    /// Returns `true` if no swap on the current board forms a run.
    #[must_use]
    pub fn is_deadlocked(&mut self) -> bool {
        !has_any_move(&mut self.grid)
    }

    /// Writes the current score to the store if it beats the stored best, and
    /// returns the resulting best.
    pub fn commit_best(&mut self) -> u64 {
        self.score.commit_best(&mut self.store)
    }

    /// Ends the session and starts a new one.
    ///
    /// Commits the best score, zeroes the current score, clears the selection
    /// and any pending cascade, and generates a new board.
    pub fn reset(&mut self) -> &Grid {
        let best = self.commit_best();
        log::info!(
            "session ended with {} points (best {best})",
            self.score.current()
        );
        self.score.reset();
        self.replace_board()
    }

    /// Generates a new board while keeping the current score.
    ///
    /// Meant for a board that ended up deadlocked after a cascade.
    pub fn regenerate(&mut self) -> &Grid {
        log::info!("regenerating board at {} points", self.score.current());
        self.replace_board()
    }

    fn replace_board(&mut self) -> &Grid {
        self.swap.clear();
        self.cascade = None;
        self.grid = self.generator.generate(&mut self.rng);
        &self.grid
    }
}
