//! Inbound translation requests and their validation

use serde::Serialize;
use thiserror::Error;

use crate::language::LanguagePair;
use crate::tokenizer::{Token, tokenize};

/// Validation failures for an inbound request
///
/// These are caller mistakes. The display text is safe to return to the
/// caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// A required field was absent or empty
    #[error("Missing required fields: {0}")]
    MissingField(String),
    /// The text contained nothing but whitespace
    #[error("Text must contain at least one word")]
    BlankText,
    /// The code was not one of `id`, `jw`, `ng`, `kl`, `ka`
    #[error("Unknown language code: {0}")]
    UnknownCode(String),
    /// The `(from, to)` combination is not in the valid-pairs table
    #[error("Invalid language pair: {from} → {to}")]
    InvalidPair { from: String, to: String },
}

/// A validated request: non-blank text and a supported language pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRequest {
    pub text: String,
    pub pair: LanguagePair,
}

impl TranslationRequest {
    /// Validate raw request fields
    ///
    /// Missing or empty fields are reported together, before the language
    /// pair is checked.
    ///
    /// # Example
    ///
    /// ```
    /// use tembung::TranslationRequest;
    ///
    /// let request = TranslationRequest::validate(Some("Aku mangan"), Some("jw"), Some("id")).unwrap();
    /// assert_eq!(request.tokens(), vec!["aku", "mangan"]);
    ///
    /// assert!(TranslationRequest::validate(Some("makan"), Some("id"), Some("en")).is_err());
    /// ```
    pub fn validate(
        text: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Self, RequestError> {
        let missing: Vec<&str> = [("text", text), ("from", from), ("to", to)]
            .into_iter()
            .filter(|(_, value)| value.is_none_or(|v| v.is_empty()))
            .map(|(name, _)| name)
            .collect();

        if !missing.is_empty() {
            return Err(RequestError::MissingField(missing.join(", ")));
        }

        let text = text.unwrap_or_default();
        if text.trim().is_empty() {
            return Err(RequestError::BlankText);
        }

        let pair = LanguagePair::parse(from.unwrap_or_default(), to.unwrap_or_default())?;

        Ok(Self {
            text: text.to_string(),
            pair,
        })
    }

    /// Tokens of the request text, in input order
    pub fn tokens(&self) -> Vec<Token> {
        tokenize(&self.text)
    }
}
