//! The square board of symbols.

use std::{
    fmt::{self, Display},
    ops::{Index, IndexMut},
    str::FromStr,
};

use crate::{Position, Symbol};

/// A square board of symbols addressed by [`Position`].
///
/// Cells are stored in row-major order. A grid is always completely filled:
/// removal and refill happen within a single cascade round, so no empty cell
/// is ever observable.
///
/// # Text format
///
/// Each non-blank line is one row, top to bottom; each letter is one cell
/// (see [`Symbol::glyph`]). Whitespace inside a line is ignored, so rows may be
/// grouped for readability. The number of rows must equal the number of cells
/// in every row.
///
/// # Examples
///
/// ```
/// use tilefall_core::{Grid, Position, Symbol};
///
/// let mut grid: Grid = "
///     ABC
///     BCA
///     CAB
/// "
/// .parse()?;
/// assert_eq!(grid.size(), 3);
/// assert_eq!(grid[Position::new(2, 0)], Symbol::new(2));
///
/// grid.swap(Position::new(0, 0), Position::new(1, 0));
/// assert_eq!(grid.to_string(), "BAC\nBCA\nCAB");
/// # Ok::<(), tilefall_core::GridParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    size: u8,
    cells: Vec<Symbol>,
}

impl Grid {
    /// Creates a grid by calling `f` for every position in row-major order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_core::{Grid, Symbol};
    ///
    /// let grid = Grid::from_fn(4, |pos| Symbol::new((pos.x() + pos.y()) % 3));
    /// assert_eq!(grid.to_string(), "ABCA\nBCAB\nCABC\nABCA");
    /// ```
    pub fn from_fn<F>(size: u8, f: F) -> Self
    where
        F: FnMut(Position) -> Symbol,
    {
        let cells = Self::row_major(size).map(f).collect();
        Self { size, cells }
    }

    /// Creates a grid from cells in row-major order.
    ///
    /// Returns `None` if `cells` does not hold exactly `size * size` symbols.
    #[must_use]
    pub fn from_cells(size: u8, cells: Vec<Symbol>) -> Option<Self> {
        (cells.len() == usize::from(size) * usize::from(size)).then_some(Self { size, cells })
    }

    /// Returns the side length of the grid.
    #[must_use]
    pub const fn size(&self) -> u8 {
        self.size
    }

    /// Returns all cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Symbol] {
        &self.cells
    }

    /// Returns the cells of row `y`, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `y` is outside the grid.
    #[must_use]
    pub fn row(&self, y: u8) -> &[Symbol] {
        assert!(y < self.size, "row {y} out of range");
        let start = usize::from(y) * usize::from(self.size);
        &self.cells[start..start + usize::from(self.size)]
    }

    /// Returns `true` if `pos` lies on the grid.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x() < self.size && pos.y() < self.size
    }

    /// Returns the symbol at `pos`, or `None` if `pos` is off the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Symbol> {
        self.contains(pos).then(|| self.cells[self.offset(pos)])
    }

    /// Exchanges the symbols at `a` and `b`.
    ///
    /// Swapping is its own inverse: calling it twice restores the grid exactly.
    ///
    /// # Panics
    ///
    /// Panics if either position is off the grid.
    pub fn swap(&mut self, a: Position, b: Position) {
        let (a, b) = (self.checked_offset(a), self.checked_offset(b));
        self.cells.swap(a, b);
    }

    /// Returns an iterator over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        Self::row_major(self.size)
    }

    fn row_major(size: u8) -> impl Iterator<Item = Position> {
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    fn offset(&self, pos: Position) -> usize {
        usize::from(pos.y()) * usize::from(self.size) + usize::from(pos.x())
    }

    #[track_caller]
    fn checked_offset(&self, pos: Position) -> usize {
        assert!(
            self.contains(pos),
            "position {pos} is outside a {size}x{size} grid",
            size = self.size
        );
        self.offset(pos)
    }
}

impl Index<Position> for Grid {
    type Output = Symbol;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.cells[self.checked_offset(pos)]
    }
}

impl IndexMut<Position> for Grid {
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        let offset = self.checked_offset(pos);
        &mut self.cells[offset]
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            if y > 0 {
                writeln!(f)?;
            }
            for symbol in self.row(y) {
                Display::fmt(symbol, f)?;
            }
        }
        Ok(())
    }
}

/// Errors returned when parsing a [`Grid`] from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridParseError {
    /// The input contains no rows.
    #[display("grid text is empty")]
    Empty,
    /// A character is not a symbol letter.
    #[display("invalid symbol {ch:?} at row {row}")]
    InvalidSymbol {
        /// The offending character.
        ch: char,
        /// Zero-based row of the character.
        row: usize,
    },
    /// A row length differs from the number of rows.
    #[display("row {row} has {len} cells, expected {expected}")]
    NotSquare {
        /// Zero-based row index.
        row: usize,
        /// Cells found in the row.
        len: usize,
        /// Number of rows in the input.
        expected: usize,
    },
    /// The grid is larger than positions can address.
    #[display("grid of {size} rows is too large")]
    TooLarge {
        /// Number of rows in the input.
        size: usize,
    },
}

impl FromStr for Grid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(|line| line.split_whitespace().collect::<String>())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        if rows.is_empty() {
            return Err(GridParseError::Empty);
        }
        let expected = rows.len();
        let size =
            u8::try_from(expected).map_err(|_| GridParseError::TooLarge { size: expected })?;

        let mut cells = Vec::with_capacity(expected * expected);
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != expected {
                return Err(GridParseError::NotSquare { row, len, expected });
            }
            for ch in line.chars() {
                let symbol =
                    Symbol::from_glyph(ch).ok_or(GridParseError::InvalidSymbol { ch, row })?;
                cells.push(symbol);
            }
        }
        Ok(Self { size, cells })
    }
}
