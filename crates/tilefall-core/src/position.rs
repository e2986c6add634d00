//! Board coordinates.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// A zero-based `(column, row)` coordinate on a board.
///
/// Column `x` grows to the right and row `y` grows downward, so `(0, 0)` is
/// the top-left cell and gravity pulls symbols toward larger `y`.
///
/// # Examples
///
/// ```
/// use tilefall_core::Position;
///
/// let pos = Position::new(3, 4);
/// assert_eq!(pos.x(), 3);
/// assert_eq!(pos.y(), 4);
///
/// assert!(pos.is_adjacent(Position::new(3, 5)));
/// assert!(!pos.is_adjacent(Position::new(4, 5))); // diagonal
/// assert!(!pos.is_adjacent(pos));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Returns the column.
    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Returns the row.
    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Returns `true` if `other` shares an edge with `self`.
    ///
    /// Exactly one axis must differ, and by exactly one.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        (dx == 1 && dy == 0) || (dx == 0 && dy == 1)
    }

    /// Returns the position one column to the right, or `None` on overflow.
    #[must_use]
    pub const fn right(self) -> Option<Self> {
        match self.x.checked_add(1) {
            Some(x) => Some(Self { x, y: self.y }),
            None => None,
        }
    }

    /// Returns the position one row below, or `None` on overflow.
    #[must_use]
    pub const fn below(self) -> Option<Self> {
        match self.y.checked_add(1) {
            Some(y) => Some(Self { x: self.x, y }),
            None => None,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Errors returned when parsing a [`Position`] from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PositionParseError {
    /// The text does not hold exactly two coordinates.
    #[display("expected two coordinates, found {count}")]
    WrongCount {
        /// Number of coordinates found.
        count: usize,
    },
    /// A coordinate is not a number in `0..=255`.
    #[display("coordinate {index} is not a number in 0..=255")]
    InvalidNumber {
        /// Zero-based index of the coordinate.
        index: usize,
    },
}

/// Parses `x y`, `x,y` or `(x, y)`.
impl FromStr for Position {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(s);
        let parts = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>();
        let [x, y] = parts[..] else {
            return Err(PositionParseError::WrongCount { count: parts.len() });
        };
        let x = x
            .parse()
            .map_err(|_| PositionParseError::InvalidNumber { index: 0 })?;
        let y = y
            .parse()
            .map_err(|_| PositionParseError::InvalidNumber { index: 1 })?;
        Ok(Self::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency() {
        let center = Position::new(2, 2);
        for neighbor in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            assert!(center.is_adjacent(Position::new(neighbor.0, neighbor.1)));
        }
        for far in [(2, 2), (0, 2), (2, 4), (3, 3), (1, 1)] {
            assert!(!center.is_adjacent(Position::new(far.0, far.1)));
        }
    }

    #[test]
    fn test_neighbors_saturate_at_edge() {
        assert_eq!(Position::new(0, 0).right(), Some(Position::new(1, 0)));
        assert_eq!(Position::new(0, 0).below(), Some(Position::new(0, 1)));
        assert_eq!(Position::new(u8::MAX, 0).right(), None);
        assert_eq!(Position::new(0, u8::MAX).below(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(1, 7).to_string(), "(1, 7)");
    }

    #[test]
    fn test_parse() {
        let expected = Ok(Position::new(3, 12));
        assert_eq!("3 12".parse(), expected);
        assert_eq!(" 3,12 ".parse(), expected);
        assert_eq!("(3, 12)".parse(), expected);
        assert_eq!(Position::new(3, 12).to_string().parse(), expected);

        assert_eq!(
            "3".parse::<Position>(),
            Err(PositionParseError::WrongCount { count: 1 })
        );
        assert_eq!(
            "1 2 3".parse::<Position>(),
            Err(PositionParseError::WrongCount { count: 3 })
        );
        assert_eq!(
            "1 -2".parse::<Position>(),
            Err(PositionParseError::InvalidNumber { index: 1 })
        );
        assert_eq!(
            "300 2".parse::<Position>(),
            Err(PositionParseError::InvalidNumber { index: 0 })
        );
    }
}
