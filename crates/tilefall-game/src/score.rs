/// Persistent storage for the best score.
///
/// The game reads the stored value when asked for the best score and writes
/// it back when a session is committed. Implementations decide where the value
/// lives; [`MemoryBestStore`] keeps it in memory.
pub trait BestScoreStore {
    /// Returns the stored best score, or 0 if none was stored yet.
    fn get(&self) -> u64;

    /// Replaces the stored best score.
    fn set(&mut self, score: u64);
}

impl<S> BestScoreStore for &mut S
where
    S: BestScoreStore + ?Sized,
{
    fn get(&self) -> u64 {
        (**self).get()
    }

    fn set(&mut self, score: u64) {
        (**self).set(score);
    }
}

impl<S> BestScoreStore for Box<S>
where
    S: BestScoreStore + ?Sized,
{
    fn get(&self) -> u64 {
        (**self).get()
    }

    fn set(&mut self, score: u64) {
        (**self).set(score);
    }
}

/// A [`BestScoreStore`] that keeps the best score in memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryBestStore {
    best: u64,
}

impl MemoryBestStore {
    /// Creates a store holding `best`.
    #[must_use]
    pub const fn new(best: u64) -> Self {
        Self { best }
    }
}

impl BestScoreStore for MemoryBestStore {
    fn get(&self) -> u64 {
        self.best
    }

    fn set(&mut self, score: u64) {
        self.best = score;
    }
}

/// Score of the current session.
///
/// # Examples
///
/// ```
/// use tilefall_game::{BestScoreStore as _, MemoryBestStore, ScoreTracker};
///
/// let mut store = MemoryBestStore::new(50);
/// let mut score = ScoreTracker::new();
/// score.add_points(30);
/// score.add_points(40);
/// assert_eq!(score.current(), 70);
///
/// assert_eq!(score.commit_best(&mut store), 70);
/// assert_eq!(store.get(), 70);
///
/// score.reset();
/// assert_eq!(score.commit_best(&mut store), 70); // best never decreases
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    current: u64,
}

impl ScoreTracker {
    /// Creates a tracker at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: 0 }
    }

    /// Returns the score of the current session.
    #[must_use]
    pub const fn current(&self) -> u64 {
        self.current
    }

    /// Adds `points` to the current score.
    pub fn add_points(&mut self, points: u64) {
        self.current = self.current.saturating_add(points);
    }

    /// Sets the current score back to zero.
    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Stores the current score if it beats the stored best, and returns the
    /// resulting best.
    pub fn commit_best<S>(&self, store: &mut S) -> u64
    where
        S: BestScoreStore + ?Sized,
    {
        let stored = store.get();
        if self.current > stored {
            log::debug!("new best score {} (was {stored})", self.current);
            store.set(self.current);
            self.current
        } else {
            stored
        }
    }
}
