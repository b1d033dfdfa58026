//! Mock translator for testing
//!
//! A deterministic, network-free stand-in for the remote service. It
//! implements both [`WordTranslator`] and [`SentenceTranslator`].
//!
//! # Example
//!
//! ```ignore
//! use tembung::LanguagePair;
//! use tembung_mt::{MockMode, MockTranslator, SentenceTranslator};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let pair = LanguagePair::parse("id", "ng").unwrap();
//!     let result = mock.translate_sentence("makan", &pair).await.unwrap();
//!     assert_eq!(result, "makan_ng");
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use tembung::LanguagePair;

use crate::data::WordTranslation;
use crate::error::{MtError, MtResult};
use crate::translator::{SentenceTranslator, WordTranslator};

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append the target code: "makan" → "makan_ng"
    Suffix,

    /// Use predefined mappings, keyed by (text, target code)
    /// Unmapped text falls back to the suffix behaviour
    Mappings(HashMap<(String, String), String>),

    /// Fail for the listed texts, suffix everything else
    FailOn(HashSet<String>),

    /// Simulate a service that is down
    Error(String),

    /// No-op: return input unchanged
    NoOp,
}

/// Mock translator that simulates various translation scenarios
#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    /// Simulated network delay applied to every call (in milliseconds)
    delay_ms: u64,
    /// Extra delay for specific texts, to force out-of-order completion
    text_delays: HashMap<String, u64>,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay_ms: 0,
            text_delays: HashMap::new(),
        }
    }

    /// Create a MockTranslator with simulated network delay
    ///
    /// ```ignore
    /// let mock = MockTranslator::with_delay(MockMode::Suffix, 50);
    /// // Each translation will take ~50ms
    /// ```
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::new(mode)
        }
    }

    /// Delay calls for one specific text by `delay_ms`
    pub fn delay_text(mut self, text: &str, delay_ms: u64) -> Self {
        self.text_delays.insert(text.to_string(), delay_ms);
        self
    }

    /// Build a mappings-mode mock from `(text, target, translation)` triples
    pub fn from_mappings(mappings: &[(&str, &str, &str)]) -> Self {
        let map = mappings
            .iter()
            .map(|(text, target, translation)| {
                ((text.to_string(), target.to_string()), translation.to_string())
            })
            .collect();
        Self::new(MockMode::Mappings(map))
    }

    async fn apply_delay(&self, text: &str) {
        let delay = self.delay_ms + self.text_delays.get(text).copied().unwrap_or(0);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }

    /// Apply translation logic based on the mode
    fn apply_translation(&self, text: &str, target: &str) -> MtResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target)))
            }
            MockMode::FailOn(failing) if failing.contains(text) => Err(
                MtError::TranslationError(format!("Mock failure for '{}'", text)),
            ),
            MockMode::FailOn(_) => Ok(format!("{}_{}", text, target)),
            MockMode::Error(msg) => Err(MtError::TranslationError(msg.clone())),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl WordTranslator for MockTranslator {
    async fn translate_word(
        &self,
        token: &str,
        pair: &LanguagePair,
    ) -> MtResult<WordTranslation> {
        self.apply_delay(token).await;
        let text = self.apply_translation(token, pair.to.as_str())?;
        Ok(WordTranslation::translated(text))
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

#[async_trait]
impl SentenceTranslator for MockTranslator {
    async fn translate_sentence(&self, text: &str, pair: &LanguagePair) -> MtResult<String> {
        self.apply_delay(text).await;
        self.apply_translation(text, pair.to.as_str())
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}
