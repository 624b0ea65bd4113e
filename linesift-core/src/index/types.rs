//! Index types and constants.

use linesift_types::{Generation, LineNo};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Lines processed per builder step before yielding back to the
/// caller. Keeps the host responsive while large files index.
pub const LINES_PER_BATCH: usize = 500;

/// Result-list length used when the caller supplies no usable limit.
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Upper bound on the result-list length.
pub const MAX_RESULT_LIMIT: usize = 100;

/// Posting list for one token: line numbers in ascending order, one
/// entry per occurrence. Most tokens appear on few lines, so a small
/// inline buffer avoids a heap allocation for the common case.
pub type PostingList = SmallVec<[LineNo; 4]>;

/// Inverted index over a dataset: token → posting list.
///
/// The normalization policy that produced the index travels with it:
/// queries evaluated against this index normalize with the same
/// [`case_sensitive`](LineIndex::case_sensitive) flag, so index and
/// query can never disagree by construction.
///
/// An index is built once by [`IndexBuilder`](super::IndexBuilder) and
/// never mutated afterwards; changing the dataset or the case flag
/// produces a whole new index under a fresh generation.
pub struct LineIndex {
    pub(crate) postings: FxHashMap<String, PostingList>,
    pub(crate) case_sensitive: bool,
    pub(crate) generation: Generation,
    pub(crate) lines_indexed: usize,
    pub(crate) total_postings: usize,
}

impl LineIndex {
    pub(crate) fn empty(case_sensitive: bool, generation: Generation) -> Self {
        Self {
            postings: FxHashMap::default(),
            case_sensitive,
            generation,
            lines_indexed: 0,
            total_postings: 0,
        }
    }

    /// Returns the posting list for `token`, or `None` when the token
    /// does not occur in the dataset.
    #[inline(always)]
    pub fn postings(&self, token: &str) -> Option<&[LineNo]> {
        self.postings.get(token).map(|list| list.as_slice())
    }

    /// Returns `true` if `token` occurs anywhere in the dataset.
    #[inline(always)]
    pub fn contains(&self, token: &str) -> bool {
        self.postings.contains_key(token)
    }

    /// Number of distinct tokens.
    #[inline(always)]
    #[must_use]
    pub fn distinct_tokens(&self) -> usize {
        self.postings.len()
    }

    /// Total posting entries across all tokens (one per occurrence).
    #[inline(always)]
    #[must_use]
    pub fn total_postings(&self) -> usize {
        self.total_postings
    }

    /// Number of dataset lines this index covers.
    #[inline(always)]
    #[must_use]
    pub fn lines_indexed(&self) -> usize {
        self.lines_indexed
    }

    /// Returns `true` if the index holds no postings.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// The normalization policy this index was built under.
    #[inline(always)]
    pub const fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// The build generation that produced this index.
    #[inline(always)]
    pub const fn generation(&self) -> Generation {
        self.generation
    }
}
