use tilefall_core::{Grid, Move, Position, has_match};

use crate::GameError;

/// Where the selection machine stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::IsVariant)]
pub enum SelectionState {
    /// Nothing is selected.
    #[default]
    Idle,
    /// A first cell was picked and the next pick completes the swap.
    Selected(Position),
    /// A swap was accepted and its cascade is still on screen.
    Busy,
}

/// Result of a single pick handed to [`SwapValidator::select_or_swap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SwapAttempt {
    /// The cell became the pending first pick.
    Selected(Position),
    /// The pick was not adjacent to the pending one; the selection was cleared.
    Deselected,
    /// The swap produced no run and was undone.
    Rejected(Move),
    /// The swap produced a run and stays on the board; the validator is busy.
    Accepted(Move),
    /// A cascade is still in progress; the pick was ignored.
    Busy,
}

/// The two-pick selection machine.
///
/// The first pick on an idle validator selects a cell. The second pick always
/// clears the selection; if it is orthogonally adjacent to the first, the two
/// cells are swapped. A swap that forms no run is swapped back at once, so the
/// grid is left exactly as it was. A swap that forms a run is kept, and the
/// validator becomes busy until [`SwapValidator::mark_idle`] is called. While
/// busy every pick is ignored, so at most one swap is ever in flight.
///
/// # Examples
///
/// ```
/// use tilefall_core::{Grid, Position};
/// use tilefall_game::{SwapAttempt, SwapValidator};
///
/// let mut grid: Grid = "
///     ABA
///     CAD
///     BCD
/// "
/// .parse()?;
/// let mut validator = SwapValidator::new();
///
/// let first = Position::new(1, 0);
/// assert_eq!(validator.select_or_swap(&mut grid, first)?, SwapAttempt::Selected(first));
///
/// let attempt = validator.select_or_swap(&mut grid, Position::new(1, 1))?;
/// assert!(attempt.is_accepted());
/// assert_eq!(grid.to_string(), "AAA\nCBD\nBCD");
/// assert!(validator.state().is_busy());
///
/// validator.mark_idle();
/// assert!(validator.state().is_idle());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapValidator {
    state: SelectionState,
}

impl SwapValidator {
    /// Creates an idle validator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SelectionState::Idle,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> SelectionState {
        self.state
    }

    /// Returns the pending first pick, if any.
    #[must_use]
    pub const fn selection(&self) -> Option<Position> {
        match self.state {
            SelectionState::Selected(pos) => Some(pos),
            SelectionState::Idle | SelectionState::Busy => None,
        }
    }

    /// Handles a pick at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidCoordinate`] if `pos` is off the grid. The
    /// grid and the state are unchanged in that case.
    pub fn select_or_swap(
        &mut self,
        grid: &mut Grid,
        pos: Position,
    ) -> Result<SwapAttempt, GameError> {
        if !grid.contains(pos) {
            return Err(GameError::InvalidCoordinate {
                pos,
                size: grid.size(),
            });
        }
        let prev = match self.state {
            SelectionState::Busy => return Ok(SwapAttempt::Busy),
            SelectionState::Idle => {
                self.state = SelectionState::Selected(pos);
                return Ok(SwapAttempt::Selected(pos));
            }
            SelectionState::Selected(prev) => prev,
        };

        self.state = SelectionState::Idle;
        let mv = Move::new(prev, pos);
        if !mv.is_adjacent() {
            return Ok(SwapAttempt::Deselected);
        }
        grid.swap(mv.from, mv.to);
        if has_match(grid) {
            self.state = SelectionState::Busy;
            return Ok(SwapAttempt::Accepted(mv));
        }
        grid.swap(mv.from, mv.to);
        Ok(SwapAttempt::Rejected(mv))
    }

    /// Leaves the busy state. Has no effect in any other state.
    pub fn mark_idle(&mut self) {
        if self.state.is_busy() {
            self.state = SelectionState::Idle;
        }
    }

    /// Drops any selection or busy flag.
    pub fn clear(&mut self) {
        self.state = SelectionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        "
        ABA
        CAD
        BCD
        "
        .parse()
        .expect("valid grid")
    }

    #[test]
    fn test_non_productive_swap_is_reverted() {
        let mut g = grid();
        let before = g.clone();
        let mut validator = SwapValidator::new();
        validator.select_or_swap(&mut g, Position::new(0, 0)).unwrap();
        let attempt = validator
            .select_or_swap(&mut g, Position::new(1, 0))
            .unwrap();
        assert_eq!(
            attempt,
            SwapAttempt::Rejected(Move::new(Position::new(0, 0), Position::new(1, 0)))
        );
        assert_eq!(g, before);
        assert!(validator.state().is_idle());
    }

    #[test]
    fn test_non_adjacent_pick_deselects() {
        let mut g = grid();
        let before = g.clone();
        let mut validator = SwapValidator::new();
        for second in [Position::new(1, 1), Position::new(2, 0), Position::new(0, 0)] {
            validator.select_or_swap(&mut g, Position::new(0, 0)).unwrap();
            assert_eq!(
                validator.select_or_swap(&mut g, second).unwrap(),
                SwapAttempt::Deselected
            );
            assert_eq!(validator.selection(), None);
        }
        assert_eq!(g, before);
    }

    #[test]
    fn test_busy_ignores_picks() {
        let mut g = grid();
        let mut validator = SwapValidator::new();
        validator.select_or_swap(&mut g, Position::new(1, 0)).unwrap();
        assert!(
            validator
                .select_or_swap(&mut g, Position::new(1, 1))
                .unwrap()
                .is_accepted()
        );
        let swapped = g.clone();

        for pos in [Position::new(0, 0), Position::new(2, 2)] {
            assert_eq!(
                validator.select_or_swap(&mut g, pos).unwrap(),
                SwapAttempt::Busy
            );
        }
        assert_eq!(g, swapped);
        assert!(validator.state().is_busy());

        validator.mark_idle();
        assert_eq!(
            validator.select_or_swap(&mut g, Position::new(0, 0)).unwrap(),
            SwapAttempt::Selected(Position::new(0, 0))
        );
    }

    #[test]
    fn test_out_of_bounds_pick_changes_nothing() {
        let mut g = grid();
        let before = g.clone();
        let mut validator = SwapValidator::new();
        validator.select_or_swap(&mut g, Position::new(1, 0)).unwrap();

        let err = validator
            .select_or_swap(&mut g, Position::new(3, 0))
            .unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidCoordinate {
                pos: Position::new(3, 0),
                size: 3
            }
        );
        assert_eq!(validator.selection(), Some(Position::new(1, 0)));
        assert_eq!(g, before);
    }

    #[test]
    fn test_mark_idle_keeps_selection() {
        let mut g = grid();
        let mut validator = SwapValidator::new();
        validator.select_or_swap(&mut g, Position::new(2, 2)).unwrap();
        validator.mark_idle();
        assert_eq!(validator.selection(), Some(Position::new(2, 2)));
        validator.clear();
        assert_eq!(validator.selection(), None);
    }
}
