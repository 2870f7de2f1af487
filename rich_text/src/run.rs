//! Style runs and rune-offset helpers

use serde::{Deserialize, Serialize};

/// Style given to text typed into an empty field
pub const DEFAULT_STYLE: &str = "default";

/// A contiguous span of text sharing one style tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Run {
    pub style: String,
    #[serde(rename = "string")]
    pub text: String,
}

impl Run {
    pub fn new(style: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            text: text.into(),
        }
    }

    /// Run with the default style
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(DEFAULT_STYLE, text)
    }

    /// Length in Unicode scalar values
    pub fn rune_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Copy of `self.text[from..to]` (rune offsets) carrying `style`
    pub(crate) fn piece(&self, style: &str, from: usize, to: usize) -> Run {
        Run::new(style, rune_slice(&self.text, from, to))
    }
}

/// Byte offset of the `n`th rune, or `s.len()` when `n` is past the end
pub(crate) fn byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}

/// Slice of `s` between two rune offsets
pub(crate) fn rune_slice(s: &str, from: usize, to: usize) -> &str {
    let start = byte_offset(s, from);
    let end = start + byte_offset(&s[start..], to.saturating_sub(from));
    &s[start..end]
}

/// Splits `s` into the first `n` runes and the rest
pub(crate) fn split_at_rune(s: &str, n: usize) -> (&str, &str) {
    s.split_at(byte_offset(s, n))
}
