//! Streaming line tokenizer.
//!
//! Splits a raw line into whitespace-delimited words, normalizes each
//! word, and emits the resulting tokens through a callback. Words that
//! normalize to the empty string (pure punctuation, lone symbols) are
//! dropped before they ever reach the index or the score table.
//!
//! A single internal buffer is reused across words, so tokenizing a
//! line performs no per-token allocation.
//!
//! ```
//! use linesift_core::analyzer::tokenizer::LineTokenizer;
//! use linesift_core::analyzer::normalizer::NormalizerConfig;
//!
//! let mut tokenizer = LineTokenizer::new(NormalizerConfig::default());
//! let mut tokens = Vec::new();
//! tokenizer.tokenize("The cat -- sat!", |t| tokens.push(t.to_owned()));
//! assert_eq!(tokens, ["the", "cat", "sat"]);
//! ```

use crate::analyzer::normalizer::{NormalizerConfig, TokenNormalizer};

/// Tokenizes raw lines into normalized tokens.
///
/// The same normalization policy is applied to dataset lines during
/// indexing and to query strings during evaluation; constructing both
/// tokenizers from the same [`NormalizerConfig`] is what keeps the two
/// sides comparable.
#[derive(Debug, Default)]
pub struct LineTokenizer {
    normalizer: TokenNormalizer,
    buf: String,
}

impl LineTokenizer {
    /// Creates a tokenizer with the given normalization policy.
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            normalizer: TokenNormalizer::new(config),
            buf: String::with_capacity(64),
        }
    }

    /// Returns `true` when tokens preserve letter case.
    #[inline(always)]
    pub const fn case_sensitive(&self) -> bool {
        self.normalizer.case_sensitive()
    }

    /// Splits `line` on whitespace and emits each non-empty normalized
    /// token, left to right.
    ///
    /// The emitted `&str` borrows the tokenizer's internal buffer and
    /// is only valid for the duration of the callback.
    #[inline]
    pub fn tokenize<F>(&mut self, line: &str, mut emit: F)
    where
        F: FnMut(&str),
    {
        let Self { normalizer, buf } = self;
        for word in line.split_whitespace() {
            normalizer.normalize_into(word, buf);
            if !buf.is_empty() {
                emit(buf);
            }
        }
    }
}
