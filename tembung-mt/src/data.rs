//! Data structures produced by the translation pipeline
//!
//! Everything here is built once per request and never mutated after the
//! response is assembled.

use serde::Serialize;
use tembung::Token;

/// Outcome of translating one token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordTranslation {
    /// The translated word, or the original token when nothing matched
    pub text: String,
    /// Source-side lexeme the dictionary matched, `None` on no match
    ///
    /// The remote backend has no notion of a match and always leaves this
    /// empty.
    pub matched: Option<String>,
}

impl WordTranslation {
    pub fn matched(text: impl Into<String>, matched: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            matched: Some(matched.into()),
        }
    }

    /// Fallback for a token without a match: the token itself
    pub fn unmatched(token: impl Into<String>) -> Self {
        Self {
            text: token.into(),
            matched: None,
        }
    }

    /// Plain translation returned by a service that reports no match data
    pub fn translated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            matched: None,
        }
    }
}

/// Per-token breakdown returned to the caller
///
/// `translated_original` is `None` only when the backend call failed; the
/// reason is in `errors`. `matched` is `null` on a dictionary miss, a failed
/// call, or a backend without match data. Stem fields are present only when
/// the source language is Indonesian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordAnalysis {
    pub original: Token,
    pub translated_original: Option<String>,
    pub matched: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_affix: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stemmed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_stemmed: Option<String>,
    /// Outer `None` for non-Indonesian sources, inner `None` when the stem
    /// had no match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_stemmed: Option<Option<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl WordAnalysis {
    pub fn is_failed(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Token-level half of the response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub word_analysis: Vec<WordAnalysis>,
    /// Stemmed roots joined by single spaces, Indonesian sources only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stemmed_text: Option<String>,
}

/// Full response for a translate request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationResult {
    pub original: String,
    /// Authoritative sentence-level translation
    pub translation_original: String,
    /// Per-token translations joined by single spaces
    pub word_by_word: String,
    pub analysis: Analysis,
}

/// One row of a dictionary gloss
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlossEntry {
    pub original: Token,
    pub translated: String,
    pub matched: Option<String>,
}

/// Word-by-word dictionary translation of a sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlossResult {
    /// The normalized (trimmed, lowercased) sentence
    pub original: String,
    pub translated: String,
    pub details: Vec<GlossEntry>,
}
