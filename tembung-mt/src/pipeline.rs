//! Process-wide translation resources
//!
//! A [`Pipeline`] is built once from a [`Config`] at start-up and shared by
//! every request. It owns the HTTP client, the loaded dictionary and the
//! stemmer; nothing here is re-created per call.

use std::sync::Arc;

use tembung::{Stemmer, TranslationRequest};
use tracing::info;

use crate::analysis::Analyzer;
use crate::config::{Backend, Config};
use crate::data::{GlossResult, TranslationResult};
use crate::dictionary::{DictionaryTranslator, MemoryDictionary};
use crate::error::{MtError, MtResult};
use crate::remote::RemoteTranslator;
use crate::translator::{SentenceTranslator, WordTranslator};

#[derive(Debug, Clone)]
pub struct Pipeline {
    analyzer: Analyzer,
    dictionary: Option<DictionaryTranslator>,
}

impl Pipeline {
    /// Build the configured backend, sentence translator and stemmer
    ///
    /// The dictionary is loaded whenever a path is configured, so the gloss
    /// operation stays available with the remote backend too.
    pub fn from_config(config: &Config) -> MtResult<Self> {
        let remote = Arc::new(RemoteTranslator::new(
            config.remote.base_url.clone(),
            config.remote_timeout(),
        )?);

        let dictionary = match &config.dictionary.path {
            Some(path) => {
                let store = MemoryDictionary::from_json_file(path)?;
                Some(DictionaryTranslator::new(Arc::new(store)))
            }
            None => None,
        };

        let words: Arc<dyn WordTranslator> = match (config.translator.backend, &dictionary) {
            (Backend::Remote, _) => remote.clone(),
            (Backend::Dictionary, Some(dictionary)) => Arc::new(dictionary.clone()),
            (Backend::Dictionary, None) => {
                return Err(MtError::ConfigError(
                    "The dictionary backend needs [dictionary] path".to_string(),
                ));
            }
        };

        let stemmer: Arc<dyn Stemmer> = Arc::from(config.stemmer_kind()?.build());

        let analyzer =
            Analyzer::new(words, remote, stemmer).with_call_timeout(config.call_timeout());

        info!(
            backend = analyzer.word_backend(),
            stemmer = analyzer.stemmer_name(),
            remote = %config.remote.base_url,
            dictionary = dictionary.is_some(),
            "translation pipeline ready"
        );

        Ok(Self {
            analyzer,
            dictionary,
        })
    }

    /// Assemble a pipeline from already-built parts
    pub fn new(
        words: Arc<dyn WordTranslator>,
        sentences: Arc<dyn SentenceTranslator>,
        stemmer: Arc<dyn Stemmer>,
        dictionary: Option<DictionaryTranslator>,
    ) -> Self {
        Self {
            analyzer: Analyzer::new(words, sentences, stemmer),
            dictionary,
        }
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn has_dictionary(&self) -> bool {
        self.dictionary.is_some()
    }

    pub async fn translate(&self, request: &TranslationRequest) -> MtResult<TranslationResult> {
        self.analyzer.translate(request).await
    }

    /// Word-by-word dictionary gloss of an Indonesian sentence
    ///
    /// Returns `None` when no dictionary is configured.
    pub async fn gloss(&self, sentence: &str) -> Option<MtResult<GlossResult>> {
        match &self.dictionary {
            Some(dictionary) => Some(
                tokio::time::timeout(self.analyzer.call_timeout(), dictionary.gloss(sentence))
                    .await
                    .unwrap_or(Err(MtError::Timeout(self.analyzer.call_timeout()))),
            ),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::DictionaryEntry;
    use crate::mock::{MockMode, MockTranslator};
    use tembung::AffixStripper;

    #[test]
    fn test_from_default_config() {
        let pipeline = Pipeline::from_config(&Config::default()).unwrap();
        assert_eq!(pipeline.analyzer().word_backend(), "remote");
        assert_eq!(pipeline.analyzer().stemmer_name(), "affix");
        assert!(!pipeline.has_dictionary());
    }

    #[test]
    fn test_dictionary_backend_without_file_fails() {
        let mut config = Config::default();
        config.translator.backend = Backend::Dictionary;
        config.dictionary.path = Some("/nonexistent/kamus.json".into());
        assert!(matches!(
            Pipeline::from_config(&config),
            Err(MtError::DictionaryError(_))
        ));
    }

    #[tokio::test]
    async fn test_gloss_needs_dictionary() {
        let pipeline = Pipeline::new(
            Arc::new(MockTranslator::new(MockMode::Suffix)),
            Arc::new(MockTranslator::new(MockMode::Suffix)),
            Arc::new(AffixStripper::new()),
            None,
        );
        assert!(pipeline.gloss("makan").await.is_none());
    }

    #[tokio::test]
    async fn test_gloss_with_dictionary() {
        let store = MemoryDictionary::new(vec![DictionaryEntry::new("tidur", "turu (ngoko)")]);
        let pipeline = Pipeline::new(
            Arc::new(MockTranslator::new(MockMode::Suffix)),
            Arc::new(MockTranslator::new(MockMode::Suffix)),
            Arc::new(AffixStripper::new()),
            Some(DictionaryTranslator::new(Arc::new(store))),
        );
        let result = pipeline.gloss("Tidur siang").await.unwrap().unwrap();
        assert_eq!(result.translated, "turu siang");
    }
}
