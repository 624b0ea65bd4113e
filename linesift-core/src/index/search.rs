//! Query evaluation.
//!
//! A query is split and normalized with the same policy that built the
//! index, each token's posting list contributes +1 per occurrence to
//! the owning line's score, and lines are returned in descending score
//! order truncated to the result limit.
//!
//! Scores are keyed by line text, so distinct lines with identical
//! text merge into a single result with their scores summed. This
//! mirrors what the result list shows the user: repeated lines appear
//! once.
//!
//! Evaluation is a pure, synchronous computation over a finished
//! index; it never suspends and never fails.

use linesift_types::SearchHit;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::analyzer::normalizer::NormalizerConfig;
use crate::analyzer::tokenizer::LineTokenizer;
use crate::dataset::Dataset;
use crate::index::types::{LineIndex, DEFAULT_RESULT_LIMIT, MAX_RESULT_LIMIT};

/// Clamps a caller-supplied result limit into `[1, MAX_RESULT_LIMIT]`,
/// substituting the default for zero (the "missing" encoding).
#[inline]
pub fn clamp_limit(limit: usize) -> usize {
    if limit == 0 {
        DEFAULT_RESULT_LIMIT
    } else {
        limit.min(MAX_RESULT_LIMIT)
    }
}

/// Ranks dataset lines against `query` by term-overlap count.
///
/// `dataset` must be the dataset `index` was built from; posting lists
/// index into it. The index carries its own case-sensitivity flag, so
/// query normalization always matches index normalization.
///
/// Ties are broken by the order lines were first touched while walking
/// posting lists (query-token order, then ascending line order), which
/// a stable sort preserves.
pub fn search(index: &LineIndex, dataset: &Dataset, query: &str, limit: usize) -> Vec<SearchHit> {
    let limit = clamp_limit(limit);

    if index.is_empty() {
        return Vec::new();
    }

    let mut tokenizer = LineTokenizer::new(NormalizerConfig {
        case_sensitive: index.case_sensitive(),
    });

    // Transient score table, keyed by line text, insertion-ordered.
    let mut scores: Vec<(&str, u32)> = Vec::new();
    let mut slot_by_text: FxHashMap<&str, usize> = FxHashMap::default();

    tokenizer.tokenize(query, |token| {
        let Some(postings) = index.postings(token) else {
            return;
        };
        for &line_no in postings {
            let Some(text) = dataset.line(line_no) else {
                continue;
            };
            match slot_by_text.get(text) {
                Some(&slot) => scores[slot].1 += 1,
                None => {
                    slot_by_text.insert(text, scores.len());
                    scores.push((text, 1));
                }
            }
        }
    });

    scores.sort_by(|a, b| b.1.cmp(&a.1));
    scores.truncate(limit);

    trace!(
        query_len = query.len(),
        hits = scores.len(),
        limit,
        "query evaluated"
    );

    scores
        .into_iter()
        .map(|(text, score)| SearchHit::new(text, score))
        .collect()
}
