//! Index statistics.

use crate::index::types::LineIndex;
use linesift_types::LineNo;

/// A snapshot of index statistics.
#[derive(Debug, Clone, Copy)]
pub struct IndexStats {
    /// Number of dataset lines the index covers.
    pub lines_indexed: usize,
    /// Number of distinct tokens.
    pub distinct_tokens: usize,
    /// Total posting entries (one per token occurrence).
    pub total_postings: usize,
}

impl LineIndex {
    /// Returns index statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            lines_indexed: self.lines_indexed,
            distinct_tokens: self.postings.len(),
            total_postings: self.total_postings,
        }
    }
}

impl IndexStats {
    /// Approximate posting-list memory in bytes, ignoring token keys
    /// and map overhead.
    pub fn postings_bytes(&self) -> usize {
        self.total_postings * std::mem::size_of::<LineNo>()
    }
}

impl core::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} lines, {} tokens, {} postings",
            self.lines_indexed, self.distinct_tokens, self.total_postings
        )
    }
}
