use std::num::NonZero;

use tilefall_core::{Grid, Symbol, SymbolSet, has_any_move};

use crate::{BoardSeed, SymbolSource};

/// Settings for [`GridGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Side length of the board.
    pub size: u8,
    /// Alphabet the board is drawn from.
    pub symbols: SymbolSet,
    /// Whether to keep regenerating until the board has at least one legal move.
    pub require_move: bool,
    /// Upper bound on boards tried when `require_move` is set.
    pub max_attempts: NonZero<u32>,
}

impl GeneratorConfig {
    /// Default number of boards tried before giving up on finding a legal move.
    pub const DEFAULT_MAX_ATTEMPTS: NonZero<u32> = NonZero::new(100).unwrap();
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: 8,
            symbols: SymbolSet::DEFAULT,
            require_move: true,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// A generated board together with the seed that reproduces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBoard {
    /// The generated board.
    pub grid: Grid,
    /// Seed for [`GridGenerator::generate_with_seed`].
    pub seed: BoardSeed,
}

/// Generates boards that start without any run.
///
/// A run-free board is not necessarily playable: it may contain no swap that
/// produces a run. With [`GeneratorConfig::require_move`] set (the default),
/// the generator discards such boards and tries again, up to
/// [`GeneratorConfig::max_attempts`] times; if every attempt is deadlocked the
/// last board is returned anyway and a warning is logged.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg64;
/// use tilefall_core::{SymbolSet, find_matches, has_any_move};
/// use tilefall_generator::{GeneratorConfig, GridGenerator};
///
/// let config = GeneratorConfig {
///     size: 6,
///     symbols: SymbolSet::new(4)?,
///     ..GeneratorConfig::default()
/// };
/// let generator = GridGenerator::new(config);
///
/// let mut rng = Pcg64::seed_from_u64(42);
/// let mut grid = generator.generate(&mut rng);
/// assert_eq!(grid.size(), 6);
/// assert!(find_matches(&grid).is_empty());
/// assert!(has_any_move(&mut grid));
/// # Ok::<(), tilefall_core::SymbolSetError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GridGenerator {
    config: GeneratorConfig,
}

impl GridGenerator {
    /// Creates a generator with the given settings.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the generator settings.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a board, drawing randomness from `rng`.
    pub fn generate<R>(&self, rng: &mut R) -> Grid
    where
        R: SymbolSource + ?Sized,
    {
        let GeneratorConfig {
            size,
            symbols,
            require_move,
            max_attempts,
        } = self.config;

        let mut grid = generate_run_free(size, symbols, rng);
        if !require_move {
            return grid;
        }
        for attempt in 1..=max_attempts.get() {
            if has_any_move(&mut grid) {
                if attempt > 1 {
                    log::debug!("generated a playable board after {attempt} attempts");
                }
                return grid;
            }
            if attempt == max_attempts.get() {
                break;
            }
            log::debug!("generated board is deadlocked, retrying (attempt {attempt})");
            grid = generate_run_free(size, symbols, rng);
        }
        log::warn!(
            "no playable {size}x{size} board with {} symbols after {} attempts",
            symbols.len(),
            max_attempts
        );
        grid
    }

    /// Generates a board from a fresh random seed.
    #[must_use]
    pub fn generate_seeded(&self) -> GeneratedBoard {
        self.generate_with_seed(BoardSeed::random())
    }

    /// Generates the board that `seed` stands for.
    #[must_use]
    pub fn generate_with_seed(&self, seed: BoardSeed) -> GeneratedBoard {
        let grid = self.generate(&mut seed.rng());
        GeneratedBoard { grid, seed }
    }
}

/// Fills a `size`×`size` board in row-major order without creating any run.
///
/// Each cell draws a symbol uniformly from `symbols`; a draw that would
/// complete a run of three with the two cells to its left, or with the two
/// cells above it, is rejected and drawn again. At most two symbols are ever
/// forbidden for a cell, so with three or more symbols every cell eventually
/// accepts a draw.
///
/// The result has no match, but it may have no legal move either; see
/// [`GridGenerator`] for the retrying variant.
pub fn generate_run_free<R>(size: u8, symbols: SymbolSet, rng: &mut R) -> Grid
where
    R: SymbolSource + ?Sized,
{
    let width = usize::from(size);
    let mut placed: Vec<Symbol> = Vec::with_capacity(width * width);
    Grid::from_fn(size, |pos| {
        let (x, y) = (usize::from(pos.x()), usize::from(pos.y()));
        let i = y * width + x;
        let row_forbidden = (x >= 2 && placed[i - 1] == placed[i - 2]).then(|| placed[i - 1]);
        let column_forbidden =
            (y >= 2 && placed[i - width] == placed[i - 2 * width]).then(|| placed[i - width]);
        let symbol = loop {
            let symbol = rng.sample_symbol(symbols);
            if Some(symbol) != row_forbidden && Some(symbol) != column_forbidden {
                break symbol;
            }
        };
        placed.push(symbol);
        symbol
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;
    use tilefall_core::{Position, find_matches, has_match};

    use super::*;
    use crate::testing::ScriptedSource;

    #[test]
    fn test_rejects_row_completion() {
        // Row 0 draws A, A, then A again (rejected) before settling on B.
        let mut rng = ScriptedSource::new([0, 0, 0, 1, 2, 0, 1, 2, 1, 0]);
        let grid = generate_run_free(3, SymbolSet::new(3).unwrap(), &mut rng);
        assert_eq!(grid.to_string(), "AAB\nCAB\nCBA");
        assert!(!has_match(&grid));
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_rejects_column_completion() {
        // (0,2) draws A (rejected: column 0 is already A, A) then C.
        let mut rng = ScriptedSource::new([0, 1, 2, 0, 2, 1, 0, 2, 1, 0]);
        let grid = generate_run_free(3, SymbolSet::new(3).unwrap(), &mut rng);
        assert_eq!(grid[Position::new(0, 2)], Symbol::new(2));
        assert!(!has_match(&grid));
    }

    #[test]
    fn test_retries_until_playable() {
        // First board is deadlocked, second has a move.
        let dead = [0, 0, 1, 0, 0, 1, 1, 2, 2];
        let playable = [0, 1, 0, 1, 0, 1, 2, 2, 1];
        let mut script = dead.to_vec();
        script.extend(playable);
        let mut rng = ScriptedSource::new(script);

        let generator = GridGenerator::new(GeneratorConfig {
            size: 3,
            symbols: SymbolSet::new(3).unwrap(),
            ..GeneratorConfig::default()
        });
        let mut grid = generator.generate(&mut rng);
        assert_eq!(grid.to_string(), "ABA\nBAB\nCCB");
        assert!(has_any_move(&mut grid));
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let dead = [0u8, 0, 1, 0, 0, 1, 1, 2, 2];
        let mut rng = ScriptedSource::repeating(dead);
        let generator = GridGenerator::new(GeneratorConfig {
            size: 3,
            symbols: SymbolSet::new(3).unwrap(),
            require_move: true,
            max_attempts: NonZero::new(3).unwrap(),
        });
        let mut grid = generator.generate(&mut rng);
        assert!(!has_any_move(&mut grid));
        assert_eq!(rng.draws(), 27);
    }

    #[test]
    fn test_without_require_move_single_attempt() {
        let mut rng = ScriptedSource::new([0, 0, 1, 0, 0, 1, 1, 2, 2]);
        let generator = GridGenerator::new(GeneratorConfig {
            size: 3,
            symbols: SymbolSet::new(3).unwrap(),
            require_move: false,
            ..GeneratorConfig::default()
        });
        let mut grid = generator.generate(&mut rng);
        assert_eq!(grid.to_string(), "AAB\nAAB\nBCC");
        assert!(!has_any_move(&mut grid));
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_seed_reproduces_board() {
        let generator = GridGenerator::new(GeneratorConfig::default());
        let seed: BoardSeed = "a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3"
            .parse()
            .expect("valid seed");
        let a = generator.generate_with_seed(seed);
        let b = generator.generate_with_seed(seed);
        assert_eq!(a, b);
        assert_eq!(a.seed, seed);
    }

    proptest! {
        #[test]
        fn test_generated_boards_have_no_match(
            seed in any::<u64>(),
            size in 3u8..=12,
            count in 3u8..=8,
        ) {
            let symbols = SymbolSet::new(count).unwrap();
            let mut rng = Pcg64::seed_from_u64(seed);
            let grid = generate_run_free(size, symbols, &mut rng);
            prop_assert_eq!(grid.size(), size);
            prop_assert!(find_matches(&grid).is_empty());
            prop_assert!(grid.cells().iter().all(|&s| symbols.contains(s)));
        }

        #[test]
        fn test_default_generator_boards_are_playable(seed in any::<u64>()) {
            let generator = GridGenerator::new(GeneratorConfig::default());
            let mut rng = Pcg64::seed_from_u64(seed);
            let mut grid = generator.generate(&mut rng);
            prop_assert!(!has_match(&grid));
            prop_assert!(has_any_move(&mut grid));
        }
    }
}
