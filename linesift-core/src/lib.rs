//! linesift — line-level term-overlap search.
//!
//! Loads a text blob, builds a word-level inverted index over its
//! lines, and answers free-text queries by ranking lines on how many
//! query-token occurrences they contain.
//!
//! The pipeline, leaf first:
//!
//! - [`analyzer`] — per-word normalization and line tokenization
//! - [`dataset`] — line-addressable storage over the raw text
//! - [`index`] — chunked index construction and pure query evaluation
//! - [`engine`] — versioned state holder with background rebuilds and
//!   generation-based supersession
//!
//! ```
//! use linesift_core::Linesift;
//!
//! let engine = Linesift::new();
//! engine.load_text("the cat sat\nthe dog sat").wait().unwrap();
//! assert_eq!(engine.search("cat", 10).len(), 1);
//! ```

pub mod analyzer;
pub mod dataset;
pub mod engine;
pub mod index;

pub use dataset::Dataset;
pub use engine::{BuildHandle, Linesift};
pub use index::{IndexBuilder, IndexStats, LineIndex};
pub use linesift_types::{BuildError, Generation, LineNo, SearchHit};
