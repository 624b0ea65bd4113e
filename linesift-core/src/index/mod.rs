//! Inverted-index construction and query evaluation.
//!
//! Indexing is chunked: [`IndexBuilder`] processes the dataset in
//! fixed-size batches with a yield point between them, and only a
//! completed build ever becomes a [`LineIndex`]. Query evaluation is a
//! pure function over a finished index and its dataset.
//!
//! Threading:
//! - [`LineIndex`] is immutable after construction and safe to share
//!   behind an `Arc`; the builder is single-owner.

mod builder;
mod search;
mod stats;
mod types;

pub use builder::IndexBuilder;
pub use search::{clamp_limit, search};
pub use stats::IndexStats;
pub use types::{LineIndex, DEFAULT_RESULT_LIMIT, LINES_PER_BATCH, MAX_RESULT_LIMIT};
