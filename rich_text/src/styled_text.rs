//! The style-run text model

use crate::normalize::{normalize, MergeConfig};
use crate::position::PrefixIndex;
use crate::run::split_at_rune;
use crate::{Run, TextError, DEFAULT_STYLE};
use serde::{Deserialize, Serialize};

/// One rich-text field: an ordered sequence of style runs
///
/// Positions taken by the editing operations are signed so that requests
/// with out-of-range values can be clamped instead of rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyledText {
    #[serde(rename = "text")]
    runs: Vec<Run>,
}

impl StyledText {
    pub fn new() -> Self {
        Self { runs: Vec::new() }
    }

    /// Wraps runs as given; they are normalized by the next mutation
    pub fn from_runs(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    /// Single default-style run, or the empty sequence for empty text
    pub fn from_plain(text: &str) -> Self {
        if text.is_empty() {
            Self::new()
        } else {
            Self::from_runs(vec![Run::plain(text)])
        }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn into_runs(self) -> Vec<Run> {
        self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(Run::is_empty)
    }

    /// Total length in runes
    pub fn rune_len(&self) -> usize {
        self.runs.iter().map(Run::rune_len).sum()
    }

    /// Style-stripped concatenation of all runs
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Applies `style` to runes `[start, end)` with default merge tuning
    pub fn apply_style(&mut self, start: i64, end: i64, style: &str) -> Result<(), TextError> {
        self.apply_style_with(start, end, style, &MergeConfig::default())
    }

    /// Applies `style` to runes `[start, end)`.
    ///
    /// `start >= end` is rejected before anything else. An empty sequence
    /// is then accepted as a no-op. The bounds are clamped to the text and
    /// rejected again if the clamped range is empty.
    pub fn apply_style_with(
        &mut self,
        start: i64,
        end: i64,
        style: &str,
        config: &MergeConfig,
    ) -> Result<(), TextError> {
        if start >= end {
            return Err(TextError::InvalidRange { start, end });
        }

        let index = PrefixIndex::build(&self.runs);
        let total = index.total();
        if total == 0 {
            return Ok(());
        }

        let from = start.max(0);
        let to = end.min(total as i64);
        if from >= to {
            return Err(TextError::InvalidRange { start, end });
        }
        let (from, to) = (from as usize, to as usize);

        let first = index.locate(from).run;
        let end_pos = index.locate(to);
        // A range ending on a boundary does not touch the run starting there.
        let last = if end_pos.on_boundary() {
            end_pos.run - 1
        } else {
            end_pos.run
        };

        let mut out = Vec::with_capacity(self.runs.len() + 2);
        out.extend_from_slice(&self.runs[..first]);

        for i in first..=last {
            let run = &self.runs[i];
            let run_start = index.start_of(i);
            let len = run.rune_len();
            let lo = from.saturating_sub(run_start).min(len);
            let hi = (to - run_start).min(len);

            if lo > 0 {
                out.push(run.piece(&run.style, 0, lo));
            }
            if hi > lo {
                out.push(run.piece(style, lo, hi));
            }
            if hi < len {
                out.push(run.piece(&run.style, hi, len));
            }
        }

        out.extend_from_slice(&self.runs[last + 1..]);
        self.runs = normalize(out, config);
        Ok(())
    }

    /// Inserts `text` at rune `pos` with default merge tuning
    pub fn insert_text(&mut self, pos: i64, text: &str) {
        self.insert_text_with(pos, text, &MergeConfig::default());
    }

    /// Inserts `text` at rune `pos`, clamped into the text.
    ///
    /// Text typed on a run boundary takes the style of the run before it;
    /// text typed inside a run takes that run's style.
    pub fn insert_text_with(&mut self, pos: i64, text: &str, config: &MergeConfig) {
        if text.is_empty() {
            return;
        }

        if self.runs.is_empty() {
            self.runs = vec![Run::new(DEFAULT_STYLE, text)];
            return;
        }

        let index = PrefixIndex::build(&self.runs);
        let pos = pos.clamp(0, index.total() as i64) as usize;
        let at = index.locate(pos);

        let mut out = Vec::with_capacity(self.runs.len() + 2);
        out.extend_from_slice(&self.runs[..at.run]);

        if at.run == self.runs.len() {
            let style = self.runs[at.run - 1].style.clone();
            out.push(Run::new(style, text));
        } else {
            let run = &self.runs[at.run];
            let (left, right) = split_at_rune(&run.text, at.offset);
            let style = if at.on_boundary() && at.run > 0 {
                &self.runs[at.run - 1].style
            } else {
                &run.style
            };

            out.push(Run::new(run.style.as_str(), left));
            out.push(Run::new(style.as_str(), text));
            out.push(Run::new(run.style.as_str(), right));
            out.extend_from_slice(&self.runs[at.run + 1..]);
        }

        self.runs = normalize(out, config);
    }

    /// Deletes runes `[start, end)` with default merge tuning
    pub fn delete_range(&mut self, start: i64, end: i64) {
        self.delete_range_with(start, end, &MergeConfig::default());
    }

    /// Deletes runes `[start, end)`. Empty or inverted ranges, before or
    /// after clamping, leave the text untouched.
    pub fn delete_range_with(&mut self, start: i64, end: i64, config: &MergeConfig) {
        if start >= end {
            return;
        }

        let index = PrefixIndex::build(&self.runs);
        let total = index.total();
        if total == 0 {
            return;
        }

        let from = start.max(0);
        let to = end.min(total as i64);
        if from >= to {
            return;
        }

        let head = index.locate(from as usize);
        let tail = index.locate(to as usize);

        let mut out = Vec::with_capacity(self.runs.len());
        out.extend_from_slice(&self.runs[..head.run]);

        if !head.on_boundary() {
            let run = &self.runs[head.run];
            out.push(run.piece(&run.style, 0, head.offset));
        }

        if tail.run < self.runs.len() {
            let run = &self.runs[tail.run];
            out.push(run.piece(&run.style, tail.offset, run.rune_len()));
            out.extend_from_slice(&self.runs[tail.run + 1..]);
        }

        self.runs = normalize(out, config);
    }
}

impl From<Vec<Run>> for StyledText {
    fn from(runs: Vec<Run>) -> Self {
        Self::from_runs(runs)
    }
}
