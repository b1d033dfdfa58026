//! Remote translation service adapter
//!
//! Talks to a JSON translation endpoint that accepts
//! `{ "text", "from", "to" }` and answers `{ "result" }`.
//!
//! # Configuration
//!
//! The endpoint defaults to [`RemoteTranslator::DEFAULT_URL`] and can be
//! overridden with the `TEMBUNG_REMOTE_URL` environment variable or the
//! `[remote]` section of the config file.
//!
//! # Example
//!
//! ```ignore
//! use tembung::LanguagePair;
//! use tembung_mt::{RemoteTranslator, SentenceTranslator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let remote = RemoteTranslator::from_env()?;
//!     let pair = LanguagePair::parse("id", "ng")?;
//!     println!("{}", remote.translate_sentence("Saya mau makan", &pair).await?);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tembung::{LanguagePair, strip_punctuation};
use tracing::debug;

use crate::data::WordTranslation;
use crate::error::{MtError, MtResult};
use crate::translator::{SentenceTranslator, WordTranslator};

#[derive(Debug, Serialize)]
struct RemoteRequest<'a> {
    text: &'a str,
    from: &'a str,
    to: &'a str,
}

#[derive(Debug, Deserialize)]
struct RemoteResponse {
    result: Option<String>,
}

/// Client for the remote translation service
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct RemoteTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteTranslator {
    pub const DEFAULT_URL: &'static str = "https://api.translatejawa.id/translate";

    /// Upper bound on text sent in one request
    const MAX_CHARS: usize = 5_000;

    /// Create a client for `base_url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// `ConfigError` if the URL does not parse, `NetworkError` if the HTTP
    /// client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> MtResult<Self> {
        let base_url = base_url.into();
        reqwest::Url::parse(&base_url).map_err(|e| {
            MtError::ConfigError(format!("Invalid remote URL '{}': {}", base_url, e))
        })?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Create a client from `TEMBUNG_REMOTE_URL`, falling back to the default endpoint
    pub fn from_env() -> MtResult<Self> {
        let base_url =
            std::env::var("TEMBUNG_REMOTE_URL").unwrap_or_else(|_| Self::DEFAULT_URL.to_string());
        Self::new(base_url, Duration::from_secs(30))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one text to the service and return its `result`
    async fn request(&self, text: &str, pair: &LanguagePair) -> MtResult<String> {
        if text.chars().count() > Self::MAX_CHARS {
            return Err(MtError::TranslationError(format!(
                "Text exceeds maximum length of {} characters",
                Self::MAX_CHARS
            )));
        }

        let body = RemoteRequest {
            text,
            from: pair.from.as_str(),
            to: pair.to.as_str(),
        };

        let response = self.client.post(&self.base_url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(MtError::TranslationError(if status.is_client_error() {
                format!("Service rejected request ({}): {}", status, error_text)
            } else {
                format!("Service error ({}): {}", status, error_text)
            }));
        }

        let parsed: RemoteResponse = response.json().await?;
        parsed.result.ok_or_else(|| {
            MtError::TranslationError("Invalid service response: missing 'result' field".to_string())
        })
    }
}

impl std::fmt::Debug for RemoteTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteTranslator")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl WordTranslator for RemoteTranslator {
    async fn translate_word(
        &self,
        token: &str,
        pair: &LanguagePair,
    ) -> MtResult<WordTranslation> {
        let clean = strip_punctuation(token);
        if clean.is_empty() {
            return Ok(WordTranslation::unmatched(token));
        }

        debug!(token = %clean, pair = %pair, "remote word lookup");
        let translated = self.request(&clean, pair).await?;
        Ok(WordTranslation::translated(translated.trim()))
    }

    fn backend_name(&self) -> &str {
        "remote"
    }
}

#[async_trait]
impl SentenceTranslator for RemoteTranslator {
    async fn translate_sentence(&self, text: &str, pair: &LanguagePair) -> MtResult<String> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }
        self.request(text, pair).await
    }

    fn provider_name(&self) -> &str {
        "remote"
    }
}
