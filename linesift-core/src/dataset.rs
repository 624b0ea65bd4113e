//! Line-addressable dataset storage.
//!
//! Holds the uploaded text as a single contiguous buffer plus one
//! (offset, length) span per line. This avoids a per-line allocation
//! while keeping line lookup O(1).
//!
//! ## Memory Layout
//!
//! ```text
//! Text buffer: line0\nline1\nline2\n...
//!              ^      ^      ^
//! Spans:      (0,5)  (6,5)  (12,5) ...
//! ```
//!
//! A dataset is immutable once built and is replaced wholesale when a
//! new file is loaded.

use linesift_types::LineNo;
use memchr::memchr_iter;

/// Line reference into the text buffer - 8 bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LineSpan {
    offset: u32,
    len: u32,
}

/// An ordered, immutable sequence of lines derived from a text blob.
///
/// Splitting follows the `'\n'` separator convention: the empty string
/// is one empty line, and a trailing newline produces a final empty
/// line. Line content is kept verbatim; no validation is performed.
#[derive(Default)]
pub struct Dataset {
    text: String,
    spans: Vec<LineSpan>,
}

impl Dataset {
    /// Builds a dataset from file contents.
    ///
    /// # Panics
    ///
    /// Panics if `text` exceeds `u32::MAX` bytes; spans store 32-bit
    /// offsets.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        assert!(
            text.len() <= u32::MAX as usize,
            "dataset larger than u32::MAX bytes"
        );

        let bytes = text.as_bytes();
        let mut spans = Vec::with_capacity(128);
        let mut start = 0usize;

        for i in memchr_iter(b'\n', bytes) {
            spans.push(LineSpan {
                offset: start as u32,
                len: (i - start) as u32,
            });
            start = i + 1;
        }
        // Final segment, empty when the text ends with a newline.
        spans.push(LineSpan {
            offset: start as u32,
            len: (bytes.len() - start) as u32,
        });

        Self { text, spans }
    }

    /// Returns the line at `line_no`, or `None` past the end.
    #[inline(always)]
    pub fn line(&self, line_no: LineNo) -> Option<&str> {
        let span = self.spans.get(line_no as usize)?;
        let start = span.offset as usize;
        Some(&self.text[start..start + span.len as usize])
    }

    /// Returns the number of lines.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns `true` if the dataset contains no lines.
    ///
    /// Only the default (never-loaded) dataset is empty; any loaded
    /// text, including `""`, contains at least one line.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Iterates over lines in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.spans.iter().map(move |span| {
            let start = span.offset as usize;
            &self.text[start..start + span.len as usize]
        })
    }

    /// Total size of the underlying text in bytes.
    #[inline(always)]
    pub fn text_bytes(&self) -> usize {
        self.text.len()
    }
}
