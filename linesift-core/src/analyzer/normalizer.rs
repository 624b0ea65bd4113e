//! Token normalization.
//!
//! Turns a single whitespace-delimited word into its comparable token
//! form: punctuation and other non-word characters are stripped, and
//! unless the index is case sensitive the result is folded to
//! lowercase. Two words are the same token iff their normalized forms
//! are byte-identical.
//!
//! "Word character" means alphanumeric in the Unicode sense
//! ([`char::is_alphanumeric`]). ASCII letters and digits always
//! survive; the Unicode extension covers non-Latin scripts without
//! special-casing them.

/// Maps ASCII bytes to their folded token byte, or 0 for stripped
/// characters. Letters fold to lowercase, digits map to themselves,
/// everything else is removed.
#[rustfmt::skip]
const ASCII_FOLD: [u8; 128] = [
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,
    b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', 0,    0,    0,    0,    0,    0,
    0,    b'a', b'b', b'c', b'd', b'e', b'f', b'g', b'h', b'i', b'j', b'k', b'l', b'm', b'n', b'o',
    b'p', b'q', b'r', b's', b't', b'u', b'v', b'w', b'x', b'y', b'z', 0,    0,    0,    0,    0,
    0,    b'a', b'b', b'c', b'd', b'e', b'f', b'g', b'h', b'i', b'j', b'k', b'l', b'm', b'n', b'o',
    b'p', b'q', b'r', b's', b't', b'u', b'v', b'w', b'x', b'y', b'z', 0,    0,    0,    0,    0,
];

/// Configuration options for token normalization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// When enabled, letter case is preserved; "Cat" and "cat" become
    /// distinct tokens.
    pub case_sensitive: bool,
}

/// Per-word token normalizer.
///
/// Pure and total: never fails, never allocates beyond the output
/// buffer, and is idempotent — normalizing an already-normalized token
/// returns it unchanged.
///
/// # Examples
///
/// ```
/// use linesift_core::analyzer::normalizer::{NormalizerConfig, TokenNormalizer};
///
/// let folding = TokenNormalizer::default();
/// assert_eq!(folding.normalize("Hello!"), "hello");
///
/// let exact = TokenNormalizer::new(NormalizerConfig { case_sensitive: true });
/// assert_eq!(exact.normalize("Hello!"), "Hello");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenNormalizer {
    config: NormalizerConfig,
}

impl TokenNormalizer {
    /// Creates a normalizer with the specified configuration.
    #[inline]
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Returns `true` when this normalizer preserves letter case.
    #[inline(always)]
    pub const fn case_sensitive(&self) -> bool {
        self.config.case_sensitive
    }

    /// Normalizes a word into an existing String buffer.
    ///
    /// Clears the buffer before writing; reuses its capacity. The
    /// buffer is left empty when the word consists entirely of
    /// stripped characters.
    #[inline]
    pub fn normalize_into(&self, word: &str, out: &mut String) {
        out.clear();

        if word.is_ascii() {
            out.reserve(word.len());
            if self.config.case_sensitive {
                for &b in word.as_bytes() {
                    if b.is_ascii_alphanumeric() {
                        out.push(b as char);
                    }
                }
            } else {
                for &b in word.as_bytes() {
                    let folded = ASCII_FOLD[b as usize];
                    if folded != 0 {
                        out.push(folded as char);
                    }
                }
            }
            return;
        }

        if self.config.case_sensitive {
            out.extend(word.chars().filter(|c| c.is_alphanumeric()));
        } else {
            // Strip after folding: expanding case mappings (e.g. U+0130)
            // can introduce combining marks that must not survive, or
            // the result would not be idempotent.
            for ch in word.chars() {
                for lowered in ch.to_lowercase() {
                    if lowered.is_alphanumeric() {
                        out.push(lowered);
                    }
                }
            }
        }
    }

    /// Normalizes a word and returns a new String.
    #[inline]
    pub fn normalize(&self, word: &str) -> String {
        let mut out = String::with_capacity(word.len());
        self.normalize_into(word, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(word: &str) -> String {
        TokenNormalizer::default().normalize(word)
    }

    fn norm_exact(word: &str) -> String {
        TokenNormalizer::new(NormalizerConfig {
            case_sensitive: true,
        })
        .normalize(word)
    }

    #[test]
    fn ascii_lowercase_fold() {
        assert_eq!(norm("HELLO"), "hello");
        assert_eq!(norm("HeLlO"), "hello");
        assert_eq!(norm("abc123"), "abc123");
    }

    #[test]
    fn ascii_full_alphabet() {
        let upper: String = (b'A'..=b'Z').map(|b| b as char).collect();
        let lower: String = (b'a'..=b'z').map(|b| b as char).collect();
        assert_eq!(norm(&upper), lower);
        assert_eq!(norm_exact(&upper), upper);
    }

    #[test]
    fn punctuation_stripped() {
        assert_eq!(norm("hello!"), "hello");
        assert_eq!(norm("foo-bar_baz"), "foobarbaz");
        assert_eq!(norm("(quoted)"), "quoted");
        assert_eq!(norm("don't"), "dont");
    }

    #[test]
    fn digits_survive() {
        assert_eq!(norm("v1.2.3"), "v123");
        assert_eq!(norm_exact("v1.2.3"), "v123");
    }

    #[test]
    fn case_sensitive_preserves_case_but_strips() {
        assert_eq!(norm_exact("Hello, World?"), "HelloWorld");
        assert_eq!(norm_exact("Cat"), "Cat");
    }

    #[test]
    fn all_special_yields_empty() {
        assert_eq!(norm("!!!"), "");
        assert_eq!(norm("---"), "");
        assert_eq!(norm_exact("?!"), "");
    }

    #[test]
    fn empty_input() {
        assert_eq!(norm(""), "");
        assert_eq!(norm_exact(""), "");
    }

    #[test]
    fn unicode_letters_survive() {
        assert_eq!(norm("café"), "café");
        assert_eq!(norm("Müller"), "müller");
        assert_eq!(norm("ПРИВЕТ"), "привет");
        assert_eq!(norm("你好"), "你好");
    }

    #[test]
    fn unicode_punctuation_stripped() {
        assert_eq!(norm("«guillemets»"), "guillemets");
        assert_eq!(norm("em—dash"), "emdash");
        assert_eq!(norm("…ellipsis"), "ellipsis");
    }

    #[test]
    fn emoji_stripped() {
        assert_eq!(norm("hi🌍there"), "hithere");
        assert_eq!(norm("🍵"), "");
    }

    #[test]
    fn expanding_lowercase_stays_valid() {
        // U+0130 lowercases to 'i' plus a combining mark; the mark is
        // not alphanumeric and must not survive.
        assert_eq!(norm("İstanbul"), "istanbul");
    }

    #[test]
    fn idempotent_folding() {
        let n = TokenNormalizer::default();
        for word in ["Hello!", "CAFÉ", "v1.2.3", "İstanbul", "straße"] {
            let once = n.normalize(word);
            let twice = n.normalize(&once);
            assert_eq!(once, twice, "not idempotent for {word:?}");
        }
    }

    #[test]
    fn idempotent_exact() {
        let n = TokenNormalizer::new(NormalizerConfig {
            case_sensitive: true,
        });
        for word in ["Hello!", "CAFÉ", "MiXeD-case_99"] {
            let once = n.normalize(word);
            let twice = n.normalize(&once);
            assert_eq!(once, twice, "not idempotent for {word:?}");
        }
    }

    #[test]
    fn normalize_into_reuses_buffer() {
        let n = TokenNormalizer::default();
        let mut buf = String::with_capacity(64);
        let cap = buf.capacity();

        n.normalize_into("HELLO!", &mut buf);
        assert_eq!(buf, "hello");
        assert_eq!(buf.capacity(), cap);

        n.normalize_into("WORLD?", &mut buf);
        assert_eq!(buf, "world");
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn control_chars_stripped() {
        assert_eq!(norm("a\x01b"), "ab");
        assert_eq!(norm("tab\there"), "tabhere");
    }

    #[test]
    fn fold_table_matches_std() {
        for b in 0u8..128 {
            let expected = if b.is_ascii_alphanumeric() {
                b.to_ascii_lowercase()
            } else {
                0
            };
            assert_eq!(ASCII_FOLD[b as usize], expected, "byte {b:#x}");
        }
    }
}
