use rand::Rng;
use tilefall_core::{Symbol, SymbolSet};

/// A source of uniformly distributed small integers.
///
/// The engine draws all of its randomness through this trait: initial board
/// generation and the symbols that fall in after each cascade round. Any
/// [`rand::Rng`] implements it, so a seeded PRNG gives reproducible games.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg64;
/// use tilefall_core::SymbolSet;
/// use tilefall_generator::SymbolSource as _;
///
/// let mut rng = Pcg64::seed_from_u64(7);
/// let symbol = rng.sample_symbol(SymbolSet::DEFAULT);
/// assert!(SymbolSet::DEFAULT.contains(symbol));
/// ```
pub trait SymbolSource {
    /// Returns an integer uniformly distributed in `0..bound`.
    ///
    /// `bound` is never zero.
    fn next_below(&mut self, bound: u8) -> u8;

    /// Returns a symbol drawn uniformly from `symbols`.
    fn sample_symbol(&mut self, symbols: SymbolSet) -> Symbol {
        Symbol::new(self.next_below(symbols.len()))
    }
}

impl<R> SymbolSource for R
where
    R: Rng + ?Sized,
{
    fn next_below(&mut self, bound: u8) -> u8 {
        self.random_range(0..bound)
    }
}
