//! Run detection.
//!
//! A *run* is three or more identical symbols in a row or column. The functions
//! in this module sweep every row left to right and every column top to bottom;
//! they never mutate the grid and never draw randomness.
//!
//! - [`find_matches`] collects every cell belonging to some run.
//! - [`has_match`] stops at the first run found.
//! - [`find_runs`] lists the runs themselves, for callers that animate per run.

use std::ops::ControlFlow;

use crate::{Grid, Position};

/// Minimum length of a run.
pub const MIN_RUN: u8 = 3;

/// The axis a run lies along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Left to right within a row.
    Horizontal,
    /// Top to bottom within a column.
    Vertical,
}

/// A maximal line of identical symbols of length [`MIN_RUN`] or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    /// Leftmost (horizontal) or topmost (vertical) cell.
    pub start: Position,
    /// Axis of the run.
    pub orientation: Orientation,
    /// Number of cells.
    pub len: u8,
}

impl Run {
    /// Returns the cells of the run, starting from [`Run::start`].
    pub fn positions(self) -> impl Iterator<Item = Position> {
        let Self {
            start,
            orientation,
            len,
        } = self;
        (0..len).map(move |i| match orientation {
            Orientation::Horizontal => Position::new(start.x() + i, start.y()),
            Orientation::Vertical => Position::new(start.x(), start.y() + i),
        })
    }
}

/// A set of cells on a grid of known size.
///
/// Iteration is in row-major order regardless of insertion order, so results
/// are deterministic.
///
/// # Examples
///
/// ```
/// use tilefall_core::{MatchSet, Position};
///
/// let mut set = MatchSet::new(8);
/// assert!(set.insert(Position::new(3, 1)));
/// assert!(set.insert(Position::new(0, 1)));
/// assert!(!set.insert(Position::new(3, 1))); // already present
///
/// assert_eq!(set.len(), 2);
/// let cells: Vec<_> = set.iter().collect();
/// assert_eq!(cells, vec![Position::new(0, 1), Position::new(3, 1)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    size: u8,
    bits: Vec<u64>,
}

impl MatchSet {
    const WORD_BITS: usize = u64::BITS as usize;

    /// Creates an empty set for a grid with side length `size`.
    #[must_use]
    pub fn new(size: u8) -> Self {
        let cells = usize::from(size) * usize::from(size);
        Self {
            size,
            bits: vec![0; cells.div_ceil(Self::WORD_BITS)],
        }
    }

    /// Adds `pos` to the set, returning `true` if it was not already present.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid the set was created for.
    pub fn insert(&mut self, pos: Position) -> bool {
        let (word, mask) = self.bit(pos);
        let inserted = self.bits[word] & mask == 0;
        self.bits[word] |= mask;
        inserted
    }

    /// Returns `true` if `pos` is in the set.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        if pos.x() >= self.size || pos.y() >= self.size {
            return false;
        }
        let (word, mask) = self.bit(pos);
        self.bits[word] & mask != 0
    }

    /// Returns the number of cells in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Returns `true` if the set holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&word| word == 0)
    }

    /// Returns the cells of the set in row-major order.
    #[expect(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        let size = usize::from(self.size);
        self.bits
            .iter()
            .enumerate()
            .flat_map(|(word, &bits)| {
                (0..Self::WORD_BITS)
                    .filter(move |&bit| bits & (1_u64 << bit) != 0)
                    .map(move |bit| word * Self::WORD_BITS + bit)
            })
            .map(move |i| Position::new((i % size) as u8, (i / size) as u8))
    }

    #[track_caller]
    fn bit(&self, pos: Position) -> (usize, u64) {
        assert!(
            pos.x() < self.size && pos.y() < self.size,
            "position {pos} is outside the match set"
        );
        let offset = usize::from(pos.y()) * usize::from(self.size) + usize::from(pos.x());
        (offset / Self::WORD_BITS, 1_u64 << (offset % Self::WORD_BITS))
    }
}

impl Extend<Position> for MatchSet {
    fn extend<T: IntoIterator<Item = Position>>(&mut self, iter: T) {
        for pos in iter {
            self.insert(pos);
        }
    }
}

/// Returns every cell that belongs to a run of three or more.
///
/// Cells shared by a horizontal and a vertical run appear once.
///
/// # Examples
///
/// ```
/// use tilefall_core::{Grid, Position, find_matches};
///
/// let grid: Grid = "
///     AAAB
///     BCAD
///     DBAC
///     CDBA
/// "
/// .parse()?;
///
/// let matches = find_matches(&grid);
/// // Row 0 contributes (0,0) (1,0) (2,0); column 2 contributes (2,0) (2,1) (2,2)
/// assert_eq!(matches.len(), 5);
/// assert!(matches.contains(Position::new(2, 2)));
/// # Ok::<(), tilefall_core::GridParseError>(())
/// ```
#[must_use]
pub fn find_matches(grid: &Grid) -> MatchSet {
    let mut matches = MatchSet::new(grid.size());
    let _ = for_each_run(grid, |run| {
        matches.extend(run.positions());
        ControlFlow::<()>::Continue(())
    });
    matches
}

/// Returns `true` if the grid contains at least one run.
///
/// Equivalent to `!find_matches(grid).is_empty()` but stops at the first run
/// and allocates nothing.
#[must_use]
pub fn has_match(grid: &Grid) -> bool {
    for_each_run(grid, |_| ControlFlow::Break(())).is_break()
}

/// Returns every maximal run, horizontal runs first (top to bottom), then
/// vertical runs (left to right).
///
/// # Examples
///
/// ```
/// use tilefall_core::{Grid, Orientation, Position, find_runs};
///
/// let grid: Grid = "
///     ABCD
///     ABDC
///     ACCC
///     DABA
/// "
/// .parse()?;
///
/// let runs = find_runs(&grid);
/// assert_eq!(runs.len(), 2);
/// assert_eq!(runs[0].start, Position::new(1, 2));
/// assert_eq!(runs[0].orientation, Orientation::Horizontal);
/// assert_eq!(runs[1].start, Position::new(0, 0));
/// assert_eq!(runs[1].len, 3);
/// # Ok::<(), tilefall_core::GridParseError>(())
/// ```
#[must_use]
pub fn find_runs(grid: &Grid) -> Vec<Run> {
    let mut runs = Vec::new();
    let _ = for_each_run(grid, |run| {
        runs.push(run);
        ControlFlow::<()>::Continue(())
    });
    runs
}

fn for_each_run<B, F>(grid: &Grid, mut f: F) -> ControlFlow<B>
where
    F: FnMut(Run) -> ControlFlow<B>,
{
    let size = grid.size();
    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        let at = |line: u8, i: u8| match orientation {
            Orientation::Horizontal => Position::new(i, line),
            Orientation::Vertical => Position::new(line, i),
        };
        for line in 0..size {
            let mut start = 0;
            for i in 1..=size {
                if i < size && grid[at(line, i)] == grid[at(line, start)] {
                    continue;
                }
                let len = i - start;
                if len >= MIN_RUN {
                    f(Run {
                        start: at(line, start),
                        orientation,
                        len,
                    })?;
                }
                start = i;
            }
        }
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::Symbol;

    fn grid(s: &str) -> Grid {
        s.parse().expect("valid grid")
    }

    #[test]
    fn test_stable_grid_has_no_matches() {
        let grid = grid(
            "
            ABAB
            BABA
            ABAB
            BABA
            ",
        );
        assert!(find_matches(&grid).is_empty());
        assert!(!has_match(&grid));
        assert!(find_runs(&grid).is_empty());
    }

    #[test]
    fn test_run_at_row_end_is_detected() {
        let grid = grid(
            "
            ABCCC
            BCABA
            CABAB
            ABABC
            BACAB
            ",
        );
        let matches = find_matches(&grid);
        assert_eq!(matches.len(), 3);
        for x in 2..5 {
            assert!(matches.contains(Position::new(x, 0)));
        }
        assert!(has_match(&grid));
    }

    #[test]
    fn test_run_at_column_end_is_detected() {
        let grid = grid(
            "
            ABDC
            BCAD
            CDBD
            DABD
            ",
        );
        let runs = find_runs(&grid);
        assert_eq!(
            runs,
            vec![Run {
                start: Position::new(3, 1),
                orientation: Orientation::Vertical,
                len: 3,
            }]
        );
    }

    #[test]
    fn test_run_of_four_and_five() {
        let grid = grid(
            "
            AAAAB
            BCDEA
            CDEAB
            DEABC
            BBBBB
            ",
        );
        let runs = find_runs(&grid);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len, 4);
        assert_eq!(runs[1].len, 5);
        assert_eq!(find_matches(&grid).len(), 9);
    }

    #[test]
    fn test_crossing_runs_are_deduplicated() {
        // Plus shape centered at (2, 2)
        let grid = grid(
            "
            BCACB
            CBABC
            AAAAA
            BCACB
            CBABC
            ",
        );
        let matches = find_matches(&grid);
        // Row 2 (5 cells) + column 2 (5 cells) sharing (2, 2)
        assert_eq!(matches.len(), 9);
        assert_eq!(find_runs(&grid).len(), 2);
    }

    #[test]
    fn test_two_in_a_row_is_not_a_run() {
        let grid = grid(
            "
            AAB
            BBA
            ABA
            ",
        );
        assert!(!has_match(&grid));
    }

    #[test]
    fn test_match_set_iterates_row_major() {
        let mut set = MatchSet::new(3);
        set.extend([Position::new(2, 2), Position::new(0, 0), Position::new(1, 0)]);
        let cells: Vec<_> = set.iter().collect();
        assert_eq!(
            cells,
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 2)]
        );
        assert!(!set.contains(Position::new(5, 5)));
    }

    #[test]
    fn test_match_set_spans_words() {
        // 81 cells need two words; cell 63 ends the first and cell 64 starts the second
        let mut set = MatchSet::new(9);
        assert!(set.is_empty());
        let cells = [Position::new(0, 7), Position::new(1, 7), Position::new(8, 8)];
        set.extend(cells);
        assert!(!set.insert(Position::new(1, 7)));
        assert_eq!(set.len(), 3);
        assert!(set.contains(Position::new(0, 7)));
        assert!(set.contains(Position::new(1, 7)));
        assert!(!set.contains(Position::new(2, 7)));
        assert_eq!(set.iter().collect::<Vec<_>>(), cells);
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (3u8..=8).prop_flat_map(|size| {
            let n = usize::from(size) * usize::from(size);
            prop::collection::vec(0u8..4, n).prop_map(move |cells| {
                let cells = cells.into_iter().map(Symbol::new).collect();
                Grid::from_cells(size, cells).expect("cell count matches size")
            })
        })
    }

    proptest! {
        #[test]
        fn test_has_match_agrees_with_find_matches(grid in arb_grid()) {
            prop_assert_eq!(has_match(&grid), !find_matches(&grid).is_empty());
        }

        #[test]
        fn test_every_match_lies_in_a_run(grid in arb_grid()) {
            let matches = find_matches(&grid);
            let mut from_runs = MatchSet::new(grid.size());
            for run in find_runs(&grid) {
                let symbol = grid[run.start];
                prop_assert!(run.len >= MIN_RUN);
                for pos in run.positions() {
                    prop_assert_eq!(grid[pos], symbol);
                }
                from_runs.extend(run.positions());
            }
            prop_assert_eq!(matches, from_runs);
        }
    }
}
