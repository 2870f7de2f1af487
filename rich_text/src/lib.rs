//! # Rich Text
//!
//! Style-run text model used by every text-bearing block.
//!
//! ## Philosophy
//!
//! - **Runs, not markup**: Text is an ordered list of `(style, string)` runs
//! - **Rune addressed**: Every position counts Unicode scalar values, never bytes
//! - **Always normalized**: Mutations leave no empty runs and no equal-style neighbours
//! - **Copy then swap**: Operations build the new run list before replacing the old one
//!
//! ## Design
//!
//! The crate provides:
//! - [`StyledText`]: the run sequence and its editing operations
//! - [`PrefixIndex`]: rune prefix sums and position lookup
//! - [`merge_runs`] / [`normalize`]: sequential and partitioned-parallel run merging
//! - Map codec for the `{"text": [{"style", "string"}]}` wire shape

pub mod error;
pub mod normalize;
pub mod position;
pub mod run;
pub mod styled_text;
pub mod wire;

pub use error::TextError;
pub use normalize::{merge_runs, merge_runs_parallel, normalize, MergeConfig};
pub use position::{PrefixIndex, RunPosition};
pub use run::{Run, DEFAULT_STYLE};
pub use styled_text::StyledText;
pub use wire::{from_data_map, to_data_map, DataMap, TEXT_KEY};
