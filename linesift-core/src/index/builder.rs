//! Chunked index construction.
//!
//! Building walks the dataset in fixed-size batches with an explicit
//! yield point between them: [`IndexBuilder::step`] processes one
//! batch and returns, so a host can interleave other work (or check
//! for supersession) during a large build. The finished index is
//! identical whether built in one step or many.

use std::sync::Arc;

use linesift_types::{Generation, LineNo};
use tracing::debug;

use crate::analyzer::normalizer::NormalizerConfig;
use crate::analyzer::tokenizer::LineTokenizer;
use crate::dataset::Dataset;
use crate::index::types::{LineIndex, PostingList, LINES_PER_BATCH};

/// Incrementally builds a [`LineIndex`] over a dataset.
///
/// ```
/// use std::sync::Arc;
/// use linesift_core::dataset::Dataset;
/// use linesift_core::index::IndexBuilder;
///
/// let dataset = Arc::new(Dataset::from_text("the cat sat\nthe dog sat"));
/// let index = IndexBuilder::new(dataset, false, 0).run();
/// assert_eq!(index.postings("cat"), Some(&[0u32][..]));
/// assert_eq!(index.postings("sat"), Some(&[0u32, 1][..]));
/// ```
pub struct IndexBuilder {
    dataset: Arc<Dataset>,
    tokenizer: LineTokenizer,
    index: LineIndex,
    next_line: usize,
}

impl IndexBuilder {
    /// Starts a build over `dataset` with the given normalization
    /// policy, tagged with `generation`.
    pub fn new(dataset: Arc<Dataset>, case_sensitive: bool, generation: Generation) -> Self {
        Self {
            tokenizer: LineTokenizer::new(NormalizerConfig { case_sensitive }),
            index: LineIndex::empty(case_sensitive, generation),
            next_line: 0,
            dataset,
        }
    }

    /// Processes up to [`LINES_PER_BATCH`] lines.
    ///
    /// Returns `true` while lines remain, `false` once the dataset is
    /// exhausted. This is the cooperative yield point: callers decide
    /// between batches whether to continue, abandon, or do other work.
    pub fn step(&mut self) -> bool {
        let total = self.dataset.len();
        let end = (self.next_line + LINES_PER_BATCH).min(total);

        for line_no in self.next_line..end {
            // Every line number we are about to record is a valid
            // index into the dataset by construction.
            let line = match self.dataset.line(line_no as LineNo) {
                Some(line) => line,
                None => break,
            };
            let postings = &mut self.index.postings;
            let mut added = 0usize;
            self.tokenizer.tokenize(line, |token| {
                match postings.get_mut(token) {
                    Some(list) => list.push(line_no as LineNo),
                    None => {
                        let mut list = PostingList::new();
                        list.push(line_no as LineNo);
                        postings.insert(token.to_owned(), list);
                    }
                }
                added += 1;
            });
            self.index.total_postings += added;
        }

        self.index.lines_indexed = end;
        self.next_line = end;
        end < total
    }

    /// Returns `true` once every line has been processed.
    #[inline(always)]
    pub fn is_complete(&self) -> bool {
        self.next_line >= self.dataset.len()
    }

    /// Lines processed so far.
    #[inline(always)]
    pub fn lines_processed(&self) -> usize {
        self.next_line
    }

    /// Drives the build to completion and returns the index.
    pub fn run(mut self) -> LineIndex {
        while self.step() {}
        self.finish()
    }

    /// Consumes the builder and returns the finished index.
    ///
    /// Must only be called once [`is_complete`](Self::is_complete)
    /// reports `true`; a partial index must never be observable.
    pub fn finish(self) -> LineIndex {
        debug_assert!(self.is_complete(), "finish called on a partial build");
        debug!(
            generation = self.index.generation,
            lines = self.index.lines_indexed,
            tokens = self.index.distinct_tokens(),
            postings = self.index.total_postings,
            "index build complete"
        );
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(text: &str, case_sensitive: bool) -> LineIndex {
        IndexBuilder::new(Arc::new(Dataset::from_text(text)), case_sensitive, 0).run()
    }

    fn assert_same_postings(a: &LineIndex, b: &LineIndex) {
        assert_eq!(a.distinct_tokens(), b.distinct_tokens());
        assert_eq!(a.total_postings(), b.total_postings());
        for (token, list) in &a.postings {
            assert_eq!(
                b.postings(token),
                Some(list.as_slice()),
                "postings differ for {token:?}"
            );
        }
    }

    #[test]
    fn postings_follow_line_order() {
        let index = build("the cat sat\nthe dog sat\ncats and dogs", false);
        assert_eq!(index.postings("the"), Some(&[0u32, 1][..]));
        assert_eq!(index.postings("sat"), Some(&[0u32, 1][..]));
        assert_eq!(index.postings("cat"), Some(&[0u32][..]));
        assert_eq!(index.postings("cats"), Some(&[2u32][..]));
        assert_eq!(index.postings("missing"), None);
    }

    #[test]
    fn one_posting_per_occurrence() {
        // A token repeated within a line posts once per occurrence,
        // not once per distinct line.
        let index = build("buffalo buffalo buffalo\nbuffalo", false);
        assert_eq!(index.postings("buffalo"), Some(&[0u32, 0, 0, 1][..]));
        assert_eq!(index.total_postings(), 4);
    }

    #[test]
    fn empty_dataset_empty_index() {
        let index = IndexBuilder::new(Arc::new(Dataset::default()), false, 0).run();
        assert!(index.is_empty());
        assert_eq!(index.lines_indexed(), 0);

        let blank = build("", false);
        assert!(blank.is_empty());
        assert_eq!(blank.lines_indexed(), 1);
    }

    #[test]
    fn punctuation_only_lines_index_nothing() {
        let index = build("---\n!!!\n...", false);
        assert!(index.is_empty());
        assert_eq!(index.lines_indexed(), 3);
    }

    #[test]
    fn case_folding_merges_tokens() {
        let folded = build("Cat\ncat\nCAT", false);
        assert_eq!(folded.postings("cat"), Some(&[0u32, 1, 2][..]));
        assert_eq!(folded.distinct_tokens(), 1);

        let exact = build("Cat\ncat\nCAT", true);
        assert_eq!(exact.postings("Cat"), Some(&[0u32][..]));
        assert_eq!(exact.postings("cat"), Some(&[1u32][..]));
        assert_eq!(exact.postings("CAT"), Some(&[2u32][..]));
        assert_eq!(exact.distinct_tokens(), 3);
    }

    #[test]
    fn flag_travels_with_index() {
        assert!(!build("x", false).case_sensitive());
        assert!(build("x", true).case_sensitive());
    }

    #[test]
    fn chunked_equals_single_shot() {
        let text: String = (0..(LINES_PER_BATCH * 3 + 17))
            .map(|i| format!("line {} shared token{}\n", i, i % 7))
            .collect();
        let dataset = Arc::new(Dataset::from_text(text));

        let single = IndexBuilder::new(dataset.clone(), false, 0).run();

        let mut builder = IndexBuilder::new(dataset, false, 0);
        let mut steps = 0usize;
        while builder.step() {
            steps += 1;
        }
        assert!(steps >= 3, "expected multiple batches, got {steps}");
        let chunked = builder.finish();

        assert_same_postings(&single, &chunked);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let text = "the cat sat\nthe dog sat\ncats and dogs";
        let a = build(text, false);
        let b = build(text, false);
        assert_same_postings(&a, &b);
    }

    #[test]
    fn every_posting_points_at_a_matching_line() {
        let text = "Hello, world!\nhello again\nWORLD peace\ngoodbye";
        let dataset = Arc::new(Dataset::from_text(text));
        let index = IndexBuilder::new(dataset.clone(), false, 0).run();

        let mut tokenizer = LineTokenizer::new(NormalizerConfig::default());
        for (token, list) in &index.postings {
            for &line_no in list {
                let line = dataset.line(line_no).expect("posting within dataset");
                let mut found = false;
                tokenizer.tokenize(line, |t| found |= t == token.as_str());
                assert!(found, "line {line_no} does not contain token {token:?}");
            }
        }
    }

    #[test]
    fn step_progress_reporting() {
        let text: String = (0..LINES_PER_BATCH + 1).map(|i| format!("{i}\n")).collect();
        let mut builder = IndexBuilder::new(Arc::new(Dataset::from_text(text)), false, 0);

        // LINES_PER_BATCH + 1 content lines plus the trailing empty line.
        assert!(!builder.is_complete());
        assert!(builder.step());
        assert_eq!(builder.lines_processed(), LINES_PER_BATCH);
        assert!(!builder.step());
        assert_eq!(builder.lines_processed(), LINES_PER_BATCH + 2);
        assert!(builder.is_complete());
    }

    #[test]
    fn generation_is_recorded() {
        let index = IndexBuilder::new(Arc::new(Dataset::from_text("x")), false, 42).run();
        assert_eq!(index.generation(), 42);
    }
}
