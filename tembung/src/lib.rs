//! Morphology primitives for Indonesian and Javanese text
//!
//! This crate holds the pure, synchronous half of the translator: language
//! codes and the valid-pairs table, request validation, the whitespace
//! tokenizer, the affix detector and the stemming strategies. Anything that
//! performs I/O lives in `tembung-mt`.
//!
//! # Example
//!
//! ```
//! use tembung::{AffixStripper, Stemmer, is_affixed, tokenize};
//!
//! let stemmer = AffixStripper::new();
//! let tokens = tokenize("Adik bermainlah di taman");
//! assert_eq!(tokens[1], "bermainlah");
//! assert!(is_affixed(&tokens[1]));
//! assert_eq!(stemmer.stem(&tokens[1]), "main");
//! ```

use serde::Serialize;

pub mod affix;
pub mod language;
pub mod request;
pub mod stemmer;
pub mod tokenizer;

pub use affix::{DETECTOR_PREFIXES, DETECTOR_SUFFIXES, MIN_ROOT_CHARS, is_affixed};
pub use language::{Code, LanguagePair};
pub use request::{RequestError, TranslationRequest};
pub use stemmer::{
    AffixStripper, STRIP_PREFIXES, STRIP_SUFFIXES, SnowballAlgorithm, SnowballAnalyzer, Stemmer,
    StemmerKind,
};
pub use tokenizer::{SENTENCE_PUNCTUATION, Token, strip_punctuation, tokenize};

/// Offline morphology of a single token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Morphology {
    pub token: Token,
    pub has_affix: bool,
    pub stem: String,
}

impl Morphology {
    /// Analyse a token with sentence punctuation removed first
    ///
    /// A token made only of punctuation keeps itself as its stem.
    pub fn of(token: &str, stemmer: &dyn Stemmer) -> Self {
        let clean = strip_punctuation(token);
        if clean.is_empty() {
            return Self {
                token: token.to_string(),
                has_affix: false,
                stem: token.to_string(),
            };
        }

        Self {
            token: token.to_string(),
            has_affix: is_affixed(&clean),
            stem: stemmer.stem(&clean),
        }
    }
}

/// Tokenize `text` and analyse every token, preserving order
pub fn analyse(text: &str, stemmer: &dyn Stemmer) -> Vec<Morphology> {
    tokenize(text)
        .iter()
        .map(|token| Morphology::of(token, stemmer))
        .collect()
}
