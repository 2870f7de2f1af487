//! Run normalization
//!
//! Merging folds adjacent runs that share a style into one and drops runs
//! with no text. The parallel variant partitions the input into one
//! contiguous chunk per worker, merges every chunk independently, then runs
//! one sequential pass over the concatenation to join runs that were split
//! across a chunk boundary. Both variants produce identical output.

use crate::Run;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Run count at which normalization switches to the parallel path
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// Tuning for [`normalize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Minimum number of runs before the parallel path is considered
    pub parallel_threshold: usize,
    /// Number of chunks (and so workers) used by the parallel path
    pub workers: usize,
}

impl MergeConfig {
    pub fn new(parallel_threshold: usize, workers: usize) -> Self {
        Self {
            parallel_threshold,
            workers,
        }
    }

    /// Configuration that never takes the parallel path
    pub fn sequential() -> Self {
        Self::new(usize::MAX, 1)
    }

    fn wants_parallel(&self, len: usize) -> bool {
        self.workers > 1 && len >= self.parallel_threshold
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PARALLEL_THRESHOLD, rayon::current_num_threads())
    }
}

/// Single left-to-right merge of equal-style neighbours
pub fn merge_runs<I>(runs: I) -> Vec<Run>
where
    I: IntoIterator<Item = Run>,
{
    let mut out: Vec<Run> = Vec::new();
    for run in runs {
        if run.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.style == run.style => last.text.push_str(&run.text),
            _ => out.push(run),
        }
    }
    out
}

/// Partitioned merge over `workers` contiguous chunks
pub fn merge_runs_parallel(runs: &[Run], workers: usize) -> Vec<Run> {
    if runs.is_empty() || workers <= 1 {
        return merge_runs(runs.iter().cloned());
    }

    let chunk_size = runs.len().div_ceil(workers);
    let merged: Vec<Vec<Run>> = runs
        .par_chunks(chunk_size)
        .map(|chunk| merge_runs(chunk.iter().cloned()))
        .collect();

    merge_runs(merged.into_iter().flatten())
}

/// Merges `runs` choosing the strategy from `config`
pub fn normalize(runs: Vec<Run>, config: &MergeConfig) -> Vec<Run> {
    if config.wants_parallel(runs.len()) {
        log::debug!(
            "normalizing {} runs across {} workers",
            runs.len(),
            config.workers
        );
        merge_runs_parallel(&runs, config.workers)
    } else {
        merge_runs(runs)
    }
}
