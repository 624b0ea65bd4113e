//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Turns raw words into comparable tokens
//! - **Tokenizer**: Splits lines into normalized tokens

pub mod normalizer;
pub mod tokenizer;

pub use normalizer::{NormalizerConfig, TokenNormalizer};
pub use tokenizer::LineTokenizer;
