//! Tile kinds and the alphabet they are drawn from.

use std::fmt::{self, Display};

/// An opaque tile kind.
///
/// Symbols carry no meaning beyond equality: two cells match when they hold the
/// same symbol. Each symbol is identified by a small index and rendered in the
/// text format as an uppercase letter (`0` is `A`, `1` is `B`, and so on).
///
/// # Examples
///
/// ```
/// use tilefall_core::Symbol;
///
/// let symbol = Symbol::new(2);
/// assert_eq!(symbol.index(), 2);
/// assert_eq!(symbol.glyph(), 'C');
/// assert_eq!(Symbol::from_glyph('C'), Some(symbol));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol(u8);

impl Symbol {
    /// Creates a symbol from its index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`SymbolSet::MAX`].
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(index < SymbolSet::MAX, "symbol index out of range");
        Self(index)
    }

    /// Returns the index of this symbol.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the letter used for this symbol in the text format.
    #[must_use]
    pub const fn glyph(self) -> char {
        (b'A' + self.0) as char
    }

    /// Parses a symbol from its letter, accepting either case.
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        let upper = glyph.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Some(Self(upper as u8 - b'A'))
        } else {
            None
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Errors returned when building a [`SymbolSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SymbolSetError {
    /// Fewer than [`SymbolSet::MIN`] symbols make run-free generation impossible.
    #[display("at least {} symbols are required, got {count}", SymbolSet::MIN)]
    TooFew {
        /// Requested symbol count.
        count: u8,
    },
    /// More symbols than the text format can represent.
    #[display("at most {} symbols are supported, got {count}", SymbolSet::MAX)]
    TooMany {
        /// Requested symbol count.
        count: u8,
    },
}

/// The alphabet of symbols a board is drawn from.
///
/// A set of `n` symbols contains the symbols with indices `0..n`. At least
/// three symbols are required: with only two, some cells would have every
/// choice forbidden by the run-free generation rule.
///
/// # Examples
///
/// ```
/// use tilefall_core::{Symbol, SymbolSet};
///
/// let symbols = SymbolSet::new(4)?;
/// assert_eq!(symbols.len(), 4);
/// assert!(symbols.contains(Symbol::new(3)));
/// assert!(!symbols.contains(Symbol::new(4)));
///
/// assert!(SymbolSet::new(2).is_err());
/// # Ok::<(), tilefall_core::SymbolSetError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolSet {
    count: u8,
}

impl SymbolSet {
    /// Minimum number of symbols.
    pub const MIN: u8 = 3;
    /// Maximum number of symbols.
    pub const MAX: u8 = 26;
    /// The classic six-symbol alphabet.
    pub const DEFAULT: Self = Self { count: 6 };

    /// Creates an alphabet of `count` symbols.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolSetError::TooFew`] if `count` is below [`SymbolSet::MIN`], or
    /// [`SymbolSetError::TooMany`] if it is above [`SymbolSet::MAX`].
    pub const fn new(count: u8) -> Result<Self, SymbolSetError> {
        if count < Self::MIN {
            return Err(SymbolSetError::TooFew { count });
        }
        if count > Self::MAX {
            return Err(SymbolSetError::TooMany { count });
        }
        Ok(Self { count })
    }

    /// Returns the number of symbols.
    #[must_use]
    pub const fn len(self) -> u8 {
        self.count
    }

    /// Always `false`; an alphabet holds at least [`SymbolSet::MIN`] symbols.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        false
    }

    /// Returns the symbol at `index`, or `None` if it is outside the alphabet.
    #[must_use]
    pub const fn get(self, index: u8) -> Option<Symbol> {
        if index < self.count {
            Some(Symbol(index))
        } else {
            None
        }
    }

    /// Returns `true` if `symbol` belongs to this alphabet.
    #[must_use]
    pub const fn contains(self, symbol: Symbol) -> bool {
        symbol.0 < self.count
    }

    /// Returns an iterator over all symbols in index order.
    pub fn iter(self) -> impl Iterator<Item = Symbol> {
        (0..self.count).map(Symbol)
    }
}

impl Default for SymbolSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_round_trip_at_bounds() {
        assert_eq!(Symbol::new(0).glyph(), 'A');
        assert_eq!(Symbol::new(25).glyph(), 'Z');
        assert_eq!(Symbol::from_glyph('a'), Some(Symbol::new(0)));
        assert_eq!(Symbol::from_glyph('z'), Some(Symbol::new(25)));
        assert_eq!(Symbol::from_glyph('.'), None);
        assert_eq!(Symbol::from_glyph('5'), None);
    }

    #[test]
    fn test_symbol_set_bounds() {
        assert_eq!(SymbolSet::new(2), Err(SymbolSetError::TooFew { count: 2 }));
        assert_eq!(
            SymbolSet::new(27),
            Err(SymbolSetError::TooMany { count: 27 })
        );
        assert!(SymbolSet::new(3).is_ok());
        assert!(SymbolSet::new(26).is_ok());
        assert_eq!(SymbolSet::default().len(), 6);
    }

    #[test]
    fn test_symbol_set_iter_and_get() {
        let symbols = SymbolSet::new(3).unwrap();
        let all: Vec<_> = symbols.iter().collect();
        assert_eq!(all, vec![Symbol::new(0), Symbol::new(1), Symbol::new(2)]);
        assert_eq!(symbols.get(2), Some(Symbol::new(2)));
        assert_eq!(symbols.get(3), None);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SymbolSetError::TooFew { count: 1 }.to_string(),
            "at least 3 symbols are required, got 1"
        );
    }
}
