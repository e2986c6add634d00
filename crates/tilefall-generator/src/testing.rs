//! Test utilities for code that consumes a [`SymbolSource`].
//!
//! [`ScriptedSource`] replays a fixed list of draws, so tests can state exactly
//! which symbols fall into a board.
//!
//! # Example
//!
//! ```
//! use tilefall_core::SymbolSet;
//! use tilefall_generator::{SymbolSource as _, testing::ScriptedSource};
//!
//! let mut source = ScriptedSource::new([2, 0]);
//! assert_eq!(source.sample_symbol(SymbolSet::DEFAULT).glyph(), 'C');
//! assert_eq!(source.sample_symbol(SymbolSet::DEFAULT).glyph(), 'A');
//! assert!(source.is_exhausted());
//! ```

use crate::SymbolSource;

/// A [`SymbolSource`] that returns scripted values in order.
///
/// # Panics
///
/// Drawing panics, reporting the caller's location, when a one-shot script is
/// exhausted or when a scripted value is not below the requested bound.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<u8>,
    cursor: usize,
    repeat: bool,
}

impl ScriptedSource {
    /// Creates a source that yields `values` once.
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        Self {
            values: values.into_iter().collect(),
            cursor: 0,
            repeat: false,
        }
    }

    /// Creates a source that cycles through `values` forever.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn repeating<I>(values: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let mut this = Self::new(values);
        assert!(!this.values.is_empty(), "repeating script must not be empty");
        this.repeat = true;
        this
    }

    /// Returns the number of values drawn so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }

    /// Returns `true` if a one-shot script has no values left.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        !self.repeat && self.cursor >= self.values.len()
    }
}

impl SymbolSource for ScriptedSource {
    #[track_caller]
    fn next_below(&mut self, bound: u8) -> u8 {
        let index = if self.repeat {
            self.cursor % self.values.len()
        } else {
            self.cursor
        };
        let Some(&value) = self.values.get(index) else {
            panic!("scripted source exhausted after {} draws", self.cursor);
        };
        assert!(
            value < bound,
            "scripted value {value} at draw {} is not below {bound}",
            self.cursor
        );
        self.cursor += 1;
        value
    }
}
