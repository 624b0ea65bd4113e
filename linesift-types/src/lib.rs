//! Core types for the linesift search engine.
//!
//! This crate provides the fundamental types that are shared across
//! the linesift ecosystem. Keeping types separate ensures:
//!
//! - **Cross-crate compatibility**: core and tooling share the same types
//! - **Clean boundaries**: no circular dependencies between crates

#![warn(missing_docs)]

use core::fmt;

/// Zero-based line number within a dataset.
///
/// Lines are identified by a 32-bit unsigned integer. With u32::MAX
/// (~4 billion) lines, this is ample for a single in-memory text blob
/// while keeping posting lists compact.
pub type LineNo = u32;

/// Monotonically increasing identifier for successive index rebuilds.
///
/// Every rebuild request is assigned a fresh generation. A build whose
/// generation is no longer the latest requested one is superseded and
/// its result must be discarded, never published.
pub type Generation = u64;

/// A single ranked search result: a line of the dataset and its
/// accumulated term-match score.
///
/// Results are ordered by score (descending); ties keep the order in
/// which lines were first touched during query evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// The matched line, verbatim as it appeared in the dataset.
    pub text: String,
    /// Number of query-token occurrences that matched this line.
    pub score: u32,
}

impl SearchHit {
    /// Creates a new search hit.
    #[inline]
    pub fn new(text: impl Into<String>, score: u32) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

impl fmt::Display for SearchHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "score={} text={}", self.score, self.text)
    }
}

/// Errors reported for an index build that never got published.
///
/// Building itself cannot fail: any text is accepted as-is. The only
/// failure modes are losing the race against a newer build or losing
/// the worker thread entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// A newer build was requested while this one was in flight; its
    /// result was discarded without being published.
    Superseded {
        /// Generation of the discarded build.
        requested: Generation,
        /// Latest generation observed when the build was abandoned.
        latest: Generation,
    },
    /// The worker thread disappeared without reporting a result.
    WorkerLost,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Superseded { requested, latest } => {
                write!(
                    f,
                    "build generation {} superseded by generation {}",
                    requested, latest
                )
            }
            BuildError::WorkerLost => {
                write!(f, "index build worker exited without a result")
            }
        }
    }
}

impl core::error::Error for BuildError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_hit_display() {
        let hit = SearchHit::new("the cat sat", 2);
        assert_eq!(format!("{hit}"), "score=2 text=the cat sat");
    }

    #[test]
    fn search_hit_equality() {
        let a = SearchHit::new("line", 1);
        let b = SearchHit::new("line", 1);
        let c = SearchHit::new("line", 2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn build_error_display() {
        let err = BuildError::Superseded {
            requested: 3,
            latest: 5,
        };
        let msg = format!("{err}");
        assert!(msg.contains('3'));
        assert!(msg.contains('5'));

        assert!(format!("{}", BuildError::WorkerLost).contains("worker"));
    }

    #[test]
    fn build_error_is_error() {
        fn assert_error<E: core::error::Error>(_: E) {}
        assert_error(BuildError::WorkerLost);
    }
}
