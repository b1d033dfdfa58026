use std::time::Duration;

use tembung::RequestError;
use thiserror::Error;

/// Error types for the translation pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MtError {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// The request could not be sent or the connection failed
    #[error("Network error: {0}")]
    NetworkError(String),
    /// The translation service answered with an error or an unusable body
    #[error("Translation error: {0}")]
    TranslationError(String),
    /// The dictionary store failed to load or answer
    #[error("Dictionary error: {0}")]
    DictionaryError(String),
    /// An outbound call did not finish within its budget
    #[error("Timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    /// Caller-supplied input failed validation
    #[error(transparent)]
    InvalidRequest(#[from] RequestError),
}

impl MtError {
    /// Whether the error was caused by the caller rather than by a backend
    pub fn is_validation(&self) -> bool {
        matches!(self, MtError::InvalidRequest(_))
    }
}

impl From<reqwest::Error> for MtError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            MtError::TranslationError(format!("Malformed response: {}", error))
        } else {
            MtError::NetworkError(error.to_string())
        }
    }
}

/// Result type for translation operations
pub type MtResult<T> = Result<T, MtError>;
