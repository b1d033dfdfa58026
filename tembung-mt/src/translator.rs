//! Translation traits
//!
//! Two capabilities with separate traits, so a backend can provide one
//! without the other:
//!
//! - [`WordTranslator`] resolves a single token.
//! - [`SentenceTranslator`] resolves the whole input text in one call.
//!
//! # Example
//!
//! ```ignore
//! use tembung::LanguagePair;
//! use tembung_mt::{RemoteTranslator, SentenceTranslator, WordTranslator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let remote = RemoteTranslator::from_env()?;
//!     let pair = LanguagePair::parse("id", "kl")?;
//!
//!     let word = remote.translate_word("makan", &pair).await?;
//!     println!("{}", word.text);
//!
//!     let sentence = remote.translate_sentence("Saya makan nasi", &pair).await?;
//!     println!("{}", sentence);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use tembung::LanguagePair;

use crate::data::WordTranslation;
use crate::error::MtResult;

/// Resolve the translation of one token
///
/// A token the backend has no answer for is not an error: implementations
/// return the original token with `matched` left empty. `Err` is reserved
/// for a backend that could not be asked.
#[async_trait]
pub trait WordTranslator: Send + Sync {
    async fn translate_word(&self, token: &str, pair: &LanguagePair)
    -> MtResult<WordTranslation>;

    /// Name of the backend, for logs
    fn backend_name(&self) -> &str;
}

/// Resolve the translation of a whole text as one unit
#[async_trait]
pub trait SentenceTranslator: Send + Sync {
    async fn translate_sentence(&self, text: &str, pair: &LanguagePair) -> MtResult<String>;

    /// Name of the provider, for logs
    fn provider_name(&self) -> &str;
}
