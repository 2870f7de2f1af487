//! Rune prefix sums over a run sequence
//!
//! The index is rebuilt for every operation; it is never cached alongside
//! the runs it describes.

use crate::Run;

/// Resolved location of an absolute rune offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPosition {
    /// Index of the run containing the offset, or `runs.len()` for the end
    pub run: usize,
    /// Rune offset inside that run
    pub offset: usize,
}

impl RunPosition {
    pub const fn new(run: usize, offset: usize) -> Self {
        Self { run, offset }
    }

    /// True when the position sits on the first rune of its run
    pub fn on_boundary(&self) -> bool {
        self.offset == 0
    }
}

/// Cumulative rune counts, `prefix[i]` = runes in `runs[..=i]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixIndex {
    prefix: Vec<usize>,
}

impl PrefixIndex {
    pub fn build(runs: &[Run]) -> Self {
        let mut sum = 0;
        let prefix = runs
            .iter()
            .map(|run| {
                sum += run.rune_len();
                sum
            })
            .collect();
        Self { prefix }
    }

    /// Total rune count
    pub fn total(&self) -> usize {
        self.prefix.last().copied().unwrap_or(0)
    }

    /// Runes before run `index`
    pub fn start_of(&self, index: usize) -> usize {
        if index == 0 {
            0
        } else {
            self.prefix[index - 1]
        }
    }

    /// Resolves `pos` to `(run, offset)`.
    ///
    /// `pos == 0` maps to the first run, `pos >= total` maps to the
    /// one-past-last sentinel. Anything else lands in the first run whose
    /// cumulative count exceeds `pos`, so a position on a boundary belongs
    /// to the run that starts there.
    pub fn locate(&self, pos: usize) -> RunPosition {
        if pos == 0 {
            return RunPosition::new(0, 0);
        }
        if pos >= self.total() {
            return RunPosition::new(self.prefix.len(), 0);
        }
        let run = self.prefix.partition_point(|&sum| sum <= pos);
        RunPosition::new(run, pos - self.start_of(run))
    }
}
