use std::num::NonZero;

use tilefall_core::SymbolSet;
use tilefall_generator::GeneratorConfig;
use tilefall_resolver::ResolverConfig;

use crate::ConfigError;

/// Settings for a [`Game`](crate::Game) session.
///
/// Fields are plain values so front ends can fill them from flags or a
/// settings file; [`GameConfig::validate`] checks them and splits them into
/// the generator and resolver settings.
///
/// # Examples
///
/// ```
/// use tilefall_game::{ConfigError, GameConfig};
///
/// let config = GameConfig {
///     symbol_count: 2,
///     ..GameConfig::default()
/// };
/// assert!(matches!(config.validate(), Err(ConfigError::Symbols(_))));
///
/// let (generator, resolver) = GameConfig::default().validate()?;
/// assert_eq!(generator.size, 8);
/// assert_eq!(resolver.points_per_tile, 10);
/// # Ok::<(), ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Side length of the board.
    pub size: u8,
    /// Number of distinct symbols.
    pub symbol_count: u8,
    /// Whether generated boards must have at least one legal move.
    pub require_move: bool,
    /// Boards tried per generation before settling for a deadlocked one.
    pub max_generation_attempts: u32,
    /// Points awarded per removed cell.
    pub points_per_tile: u32,
    /// Upper bound on rounds in a single cascade.
    pub max_rounds: u32,
}

impl GameConfig {
    /// Smallest supported board size.
    pub const MIN_SIZE: u8 = 3;
    /// Largest supported board size.
    pub const MAX_SIZE: u8 = 32;

    /// Checks the settings and builds the generator and resolver settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the board size or symbol count is out of
    /// range, or if either limit is zero.
    pub fn validate(&self) -> Result<(GeneratorConfig, ResolverConfig), ConfigError> {
        if !(Self::MIN_SIZE..=Self::MAX_SIZE).contains(&self.size) {
            return Err(ConfigError::InvalidSize {
                size: self.size,
                min: Self::MIN_SIZE,
                max: Self::MAX_SIZE,
            });
        }
        let symbols = SymbolSet::new(self.symbol_count)?;
        let max_attempts =
            NonZero::new(self.max_generation_attempts).ok_or(ConfigError::ZeroGenerationAttempts)?;
        let max_rounds = NonZero::new(self.max_rounds).ok_or(ConfigError::ZeroMaxRounds)?;

        let generator = GeneratorConfig {
            size: self.size,
            symbols,
            require_move: self.require_move,
            max_attempts,
        };
        let resolver = ResolverConfig {
            symbols,
            points_per_tile: self.points_per_tile,
            max_rounds,
        };
        Ok((generator, resolver))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let generator = GeneratorConfig::default();
        let resolver = ResolverConfig::default();
        Self {
            size: generator.size,
            symbol_count: generator.symbols.len(),
            require_move: generator.require_move,
            max_generation_attempts: generator.max_attempts.get(),
            points_per_tile: resolver.points_per_tile,
            max_rounds: resolver.max_rounds.get(),
        }
    }
}
