//! Morphological translation pipeline
//!
//! [`Analyzer`] fans every token out to the word translator (and, for
//! Indonesian sources, to the stemmer and a second lookup of the stem) while
//! the sentence translator runs alongside. Results are re-joined by token
//! index, never by completion order.
//!
//! Every outbound call carries its own timeout. A token whose call fails or
//! times out is reported in its own entry and does not affect its siblings.
//! The sentence translation is the authoritative result, so its failure
//! fails the request.
//!
//! Dropping the future returned by [`Analyzer::translate`] cancels every
//! call still in flight.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tembung::{LanguagePair, Stemmer, TranslationRequest, is_affixed, strip_punctuation};
use tracing::{info, warn};

use crate::data::{Analysis, TranslationResult, WordAnalysis, WordTranslation};
use crate::error::{MtError, MtResult};
use crate::translator::{SentenceTranslator, WordTranslator};

/// Orchestrates tokenization, stemming and translation for one request
#[derive(Clone)]
pub struct Analyzer {
    words: Arc<dyn WordTranslator>,
    sentences: Arc<dyn SentenceTranslator>,
    stemmer: Arc<dyn Stemmer>,
    call_timeout: Duration,
}

impl Analyzer {
    pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(
        words: Arc<dyn WordTranslator>,
        sentences: Arc<dyn SentenceTranslator>,
        stemmer: Arc<dyn Stemmer>,
    ) -> Self {
        Self {
            words,
            sentences,
            stemmer,
            call_timeout: Self::DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Set the budget for each individual outbound call
    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    pub fn word_backend(&self) -> &str {
        self.words.backend_name()
    }

    pub fn stemmer_name(&self) -> &str {
        self.stemmer.name()
    }

    /// Translate a validated request and build its word-by-word breakdown
    ///
    /// # Errors
    ///
    /// Only a failed or timed-out sentence translation is an error. Token
    /// failures are recorded in the matching [`WordAnalysis`].
    pub async fn translate(&self, request: &TranslationRequest) -> MtResult<TranslationResult> {
        let pair = request.pair;
        let tokens = request.tokens();
        let with_stems = pair.is_from_indonesian();

        info!(
            pair = %pair,
            tokens = tokens.len(),
            backend = self.words.backend_name(),
            "translating request"
        );

        let sentence = self.timed(self.sentences.translate_sentence(request.text.trim(), &pair));
        let per_token = join_all(
            tokens
                .iter()
                .map(|token| self.analyse_token(token, &pair, with_stems)),
        );

        let (sentence, word_analysis) = tokio::join!(sentence, per_token);
        let translation_original = sentence?;

        let failed = word_analysis.iter().filter(|entry| entry.is_failed()).count();
        if failed > 0 {
            warn!(failed, total = tokens.len(), "some tokens could not be translated");
        }

        let word_by_word = word_analysis
            .iter()
            .map(|entry| {
                entry
                    .translated_original
                    .as_deref()
                    .unwrap_or(entry.original.as_str())
            })
            .collect::<Vec<_>>()
            .join(" ");

        let stemmed_text = with_stems.then(|| {
            word_analysis
                .iter()
                .filter_map(|entry| entry.stemmed.as_deref())
                .collect::<Vec<_>>()
                .join(" ")
        });

        Ok(TranslationResult {
            original: request.text.clone(),
            translation_original,
            word_by_word,
            analysis: Analysis {
                tokens,
                word_analysis,
                stemmed_text,
            },
        })
    }

    async fn analyse_token(
        &self,
        token: &str,
        pair: &LanguagePair,
        with_stems: bool,
    ) -> WordAnalysis {
        let mut errors = Vec::new();

        if !with_stems {
            let result = self.timed(self.words.translate_word(token, pair)).await;
            let original = record(result, token, "original", &mut errors);
            return WordAnalysis {
                original: token.to_string(),
                translated_original: original.as_ref().map(|t| t.text.clone()),
                matched: original.and_then(|t| t.matched),
                has_affix: None,
                stemmed: None,
                translated_stemmed: None,
                matched_stemmed: None,
                errors,
            };
        }

        let clean = strip_punctuation(token);
        let (has_affix, stemmed) = if clean.is_empty() {
            (false, token.to_string())
        } else {
            (is_affixed(&clean), self.stemmer.stem(&clean))
        };

        let (original, stem) = tokio::join!(
            self.timed(self.words.translate_word(token, pair)),
            self.timed(self.words.translate_word(&stemmed, pair)),
        );

        let original = record(original, token, "original", &mut errors);
        let stem = record(stem, &stemmed, "stemmed", &mut errors);

        WordAnalysis {
            original: token.to_string(),
            translated_original: original.as_ref().map(|t| t.text.clone()),
            matched: original.and_then(|t| t.matched),
            has_affix: Some(has_affix),
            stemmed: Some(stemmed),
            translated_stemmed: stem.as_ref().map(|t| t.text.clone()),
            matched_stemmed: Some(stem.and_then(|t| t.matched)),
            errors,
        }
    }

    /// Bound one outbound call by the configured timeout
    async fn timed<T>(&self, call: impl Future<Output = MtResult<T>>) -> MtResult<T> {
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(MtError::Timeout(self.call_timeout)),
        }
    }
}

/// Keep the translation, or log and collect the failure for the entry
fn record(
    result: MtResult<WordTranslation>,
    token: &str,
    stage: &str,
    errors: &mut Vec<String>,
) -> Option<WordTranslation> {
    match result {
        Ok(translation) => Some(translation),
        Err(e) => {
            warn!(token, stage, error = %e, "token translation failed");
            errors.push(format!("{}: {}", stage, e));
            None
        }
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("words", &self.words.backend_name())
            .field("sentences", &self.sentences.provider_name())
            .field("stemmer", &self.stemmer.name())
            .field("call_timeout", &self.call_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{DictionaryEntry, DictionaryTranslator, MemoryDictionary};
    use crate::mock::{MockMode, MockTranslator};
    use std::collections::HashSet;
    use tembung::AffixStripper;

    fn request(text: &str, from: &str, to: &str) -> TranslationRequest {
        TranslationRequest::validate(Some(text), Some(from), Some(to)).unwrap()
    }

    fn mock_analyzer(words: MockTranslator) -> Analyzer {
        Analyzer::new(
            Arc::new(words),
            Arc::new(MockTranslator::new(MockMode::Suffix)),
            Arc::new(AffixStripper::new()),
        )
    }

    #[tokio::test]
    async fn test_indonesian_source_includes_stems() {
        let analyzer = mock_analyzer(MockTranslator::new(MockMode::Suffix));
        let result = analyzer
            .translate(&request("Adik bermainlah", "id", "ng"))
            .await
            .unwrap();

        assert_eq!(result.translation_original, "Adik bermainlah_ng");
        assert_eq!(result.analysis.tokens, vec!["adik", "bermainlah"]);
        assert_eq!(result.analysis.stemmed_text.as_deref(), Some("adik main"));

        let entry = &result.analysis.word_analysis[1];
        assert_eq!(entry.original, "bermainlah");
        assert_eq!(entry.translated_original.as_deref(), Some("bermainlah_ng"));
        assert_eq!(entry.has_affix, Some(true));
        assert_eq!(entry.stemmed.as_deref(), Some("main"));
        assert_eq!(entry.translated_stemmed.as_deref(), Some("main_ng"));
    }

    #[tokio::test]
    async fn test_javanese_source_omits_stems() {
        let analyzer = mock_analyzer(MockTranslator::new(MockMode::Suffix));
        let result = analyzer
            .translate(&request("Aku mangan sega", "jw", "id"))
            .await
            .unwrap();

        assert!(result.analysis.stemmed_text.is_none());
        for entry in &result.analysis.word_analysis {
            assert!(entry.has_affix.is_none());
            assert!(entry.stemmed.is_none());
            assert!(entry.translated_stemmed.is_none());
        }
        assert_eq!(result.word_by_word, "aku_id mangan_id sega_id");
    }

    #[tokio::test]
    async fn test_order_survives_out_of_order_completion() {
        let words = MockTranslator::new(MockMode::Suffix)
            .delay_text("satu", 40)
            .delay_text("dua", 20);
        let analyzer = mock_analyzer(words);
        let result = analyzer
            .translate(&request("satu dua tiga", "jw", "id"))
            .await
            .unwrap();

        let originals: Vec<&str> = result
            .analysis
            .word_analysis
            .iter()
            .map(|entry| entry.original.as_str())
            .collect();
        assert_eq!(originals, vec!["satu", "dua", "tiga"]);
        assert_eq!(result.analysis.word_analysis.len(), result.analysis.tokens.len());
    }

    #[tokio::test]
    async fn test_token_failure_is_isolated() {
        let failing = HashSet::from(["rusak".to_string()]);
        let analyzer = mock_analyzer(MockTranslator::new(MockMode::FailOn(failing)));
        let result = analyzer
            .translate(&request("mobil rusak sekali", "jw", "id"))
            .await
            .unwrap();

        let entries = &result.analysis.word_analysis;
        assert!(!entries[0].is_failed());
        assert!(entries[1].is_failed());
        assert_eq!(entries[1].translated_original, None);
        assert!(entries[1].errors[0].starts_with("original:"));
        assert_eq!(entries[2].translated_original.as_deref(), Some("sekali_id"));
        assert_eq!(result.word_by_word, "mobil_id rusak sekali_id");
    }

    #[tokio::test]
    async fn test_token_timeout_does_not_block_siblings() {
        let words = MockTranslator::new(MockMode::Suffix).delay_text("lambat", 500);
        let analyzer = mock_analyzer(words).with_call_timeout(Duration::from_millis(50));
        let result = analyzer
            .translate(&request("cepat lambat", "jw", "id"))
            .await
            .unwrap();

        let entries = &result.analysis.word_analysis;
        assert_eq!(entries[0].translated_original.as_deref(), Some("cepat_id"));
        assert_eq!(entries[1].translated_original, None);
        assert_eq!(entries[1].errors, vec!["original: Timed out after 50ms"]);
    }

    #[tokio::test]
    async fn test_sentence_failure_fails_request() {
        let analyzer = Analyzer::new(
            Arc::new(MockTranslator::new(MockMode::Suffix)),
            Arc::new(MockTranslator::new(MockMode::Error("offline".to_string()))),
            Arc::new(AffixStripper::new()),
        );
        let result = analyzer.translate(&request("makan", "id", "kl")).await;
        assert!(matches!(result, Err(MtError::TranslationError(_))));
    }

    #[tokio::test]
    async fn test_dictionary_backend() {
        let dictionary = MemoryDictionary::new(vec![
            DictionaryEntry::new("makan", "mangan (krama)"),
            DictionaryEntry::new("makanan", "panganan"),
        ]);
        let analyzer = Analyzer::new(
            Arc::new(DictionaryTranslator::new(Arc::new(dictionary))),
            Arc::new(MockTranslator::new(MockMode::NoOp)),
            Arc::new(AffixStripper::new()),
        );
        let result = analyzer
            .translate(&request("dimakan komputer", "id", "kl"))
            .await
            .unwrap();

        let entries = &result.analysis.word_analysis;
        // no exact row; "dimakan" is not contained in any row either
        assert_eq!(entries[0].translated_original.as_deref(), Some("dimakan"));
        assert_eq!(entries[0].stemmed.as_deref(), Some("makan"));
        assert_eq!(entries[0].translated_stemmed.as_deref(), Some("mangan"));
        assert_eq!(entries[1].translated_original.as_deref(), Some("komputer"));
        assert!(entries.iter().all(|entry| !entry.is_failed()));
    }

    #[tokio::test]
    async fn test_match_indicator_separates_hits_from_misses() {
        let dictionary = MemoryDictionary::new(vec![
            DictionaryEntry::new("buku", "buku"),
            DictionaryEntry::new("tanda", "(kata benda)"),
        ]);
        let analyzer = Analyzer::new(
            Arc::new(DictionaryTranslator::new(Arc::new(dictionary))),
            Arc::new(MockTranslator::new(MockMode::NoOp)),
            Arc::new(AffixStripper::new()),
        );
        let result = analyzer
            .translate(&request("buku komputer tanda", "id", "ng"))
            .await
            .unwrap();

        let entries = &result.analysis.word_analysis;
        assert_eq!(entries[0].translated_original.as_deref(), Some("buku"));
        assert_eq!(entries[0].matched.as_deref(), Some("buku"));
        assert_eq!(entries[0].matched_stemmed, Some(Some("buku".to_string())));

        assert_eq!(entries[1].translated_original.as_deref(), Some("komputer"));
        assert_eq!(entries[1].matched, None);
        assert_eq!(entries[1].matched_stemmed, Some(None));

        // gloss-only counterpart: the row was found, the token text stays
        assert_eq!(entries[2].translated_original.as_deref(), Some("tanda"));
        assert_eq!(entries[2].matched.as_deref(), Some("tanda"));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["analysis"]["word_analysis"][0]["matched"], "buku");
        assert_eq!(
            json["analysis"]["word_analysis"][1]["matched"],
            serde_json::Value::Null
        );
    }

    #[tokio::test]
    async fn test_remote_style_backend_reports_no_match() {
        let analyzer = mock_analyzer(MockTranslator::new(MockMode::Suffix));
        let result = analyzer
            .translate(&request("mangan", "jw", "id"))
            .await
            .unwrap();

        let entry = &result.analysis.word_analysis[0];
        assert_eq!(entry.matched, None);
        assert_eq!(entry.matched_stemmed, None);
    }

    #[tokio::test]
    async fn test_punctuation_tokens() {
        let analyzer = mock_analyzer(MockTranslator::new(MockMode::NoOp));
        let result = analyzer
            .translate(&request("makan !", "id", "ng"))
            .await
            .unwrap();

        let entry = &result.analysis.word_analysis[1];
        assert_eq!(entry.stemmed.as_deref(), Some("!"));
        assert_eq!(entry.has_affix, Some(false));
        assert_eq!(result.analysis.stemmed_text.as_deref(), Some("makan !"));
    }
}
