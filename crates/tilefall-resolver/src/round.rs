use tilefall_core::{MatchSet, Symbol};

/// Symbols that dropped into one column during a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRefill {
    /// Column index.
    pub x: u8,
    /// New symbols, top to bottom. They occupy rows `0..symbols.len()`.
    pub symbols: Vec<Symbol>,
}

/// One match, remove, fall, and refill pass of a cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// One-based position of the round within its cascade.
    pub index: u32,
    /// Cells removed this round, at their positions before falling.
    pub removed: MatchSet,
    /// Points awarded for this round.
    pub points: u64,
    /// New symbols per column; columns without removals are omitted.
    pub refills: Vec<ColumnRefill>,
}

/// A round returned by step-wise resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeStep {
    /// The round that was just applied.
    pub round: Round,
    /// Whether the board still has runs left to resolve.
    pub more_pending: bool,
}

/// The outcome of a fully resolved cascade.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CascadeReport {
    /// Rounds in the order they were applied.
    pub rounds: Vec<Round>,
    /// Sum of the points of all rounds.
    pub total_points: u64,
    /// Whether the settled board has no productive swap.
    ///
    /// Always `false` for a truncated cascade.
    pub deadlocked: bool,
    /// Whether resolution stopped at the round limit with runs still on the board.
    ///
    /// The board is not stable in that case. Until those runs are cleared, any
    /// swap leaves a run on the board and is therefore accepted.
    pub truncated: bool,
}

impl CascadeReport {
    /// Returns the total number of cells removed over all rounds.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.rounds.iter().map(|round| round.removed.len()).sum()
    }
}
