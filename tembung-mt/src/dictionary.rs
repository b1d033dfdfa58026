//! Local bilingual dictionary backend
//!
//! The storage engine sits behind the [`DictionaryStore`] trait and is only
//! ever read. [`MemoryDictionary`] is the bundled implementation, loaded once
//! from a JSON file at start-up.
//!
//! Lookup for one token, in order:
//!
//! 1. strip sentence punctuation; an empty result falls back to the token
//! 2. exact match on the source-language field
//! 3. substring match on the same field
//! 4. strip the parenthetical gloss and stray `-`/`;` from the counterpart
//! 5. no match: the original token, with no match indicator
//!
//! When several rows match, the first row the store returns wins.
//! [`MemoryDictionary`] returns rows in file order, so the earliest entry in
//! the file is used.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use futures::future::join_all;
use regex::Regex;
use serde::Deserialize;
use tembung::{Code, LanguagePair, strip_punctuation, tokenize};
use tracing::{debug, info};

use crate::data::{GlossEntry, GlossResult, WordTranslation};
use crate::error::{MtError, MtResult};
use crate::translator::WordTranslator;

static GLOSS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").expect("gloss pattern is a valid regex"));

/// One dictionary row
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DictionaryEntry {
    #[serde(alias = "indonesia")]
    pub indonesian: String,
    /// Javanese counterpart, possibly with a gloss such as `mangan (krama)`
    #[serde(alias = "jawa")]
    pub javanese: String,
}

impl DictionaryEntry {
    pub fn new(indonesian: impl Into<String>, javanese: impl Into<String>) -> Self {
        Self {
            indonesian: indonesian.into(),
            javanese: javanese.into(),
        }
    }

    fn field(&self, side: Side) -> &str {
        match side {
            Side::Indonesian => &self.indonesian,
            Side::Javanese => &self.javanese,
        }
    }
}

/// The field a lookup is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Indonesian,
    Javanese,
}

impl Side {
    /// Source-language field for a pair
    pub fn for_pair(pair: &LanguagePair) -> Self {
        match pair.from {
            Code::Jw => Side::Javanese,
            _ => Side::Indonesian,
        }
    }

    fn opposite(self) -> Self {
        match self {
            Side::Indonesian => Side::Javanese,
            Side::Javanese => Side::Indonesian,
        }
    }
}

/// A row found by the store, seen from the lookup side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryMatch {
    /// Counterpart in the target language, not yet normalized
    pub target_word: String,
    /// Value of the source field that matched
    pub source_gloss: String,
}

/// Read-only dictionary lookups
///
/// Implementations must be safe for concurrent reads.
#[async_trait]
pub trait DictionaryStore: Send + Sync {
    /// First row whose `side` field equals `word`
    async fn find_exact(&self, word: &str, side: Side) -> MtResult<Option<DictionaryMatch>>;

    /// First row whose `side` field contains `word`
    async fn find_containing(&self, word: &str, side: Side)
    -> MtResult<Option<DictionaryMatch>>;
}

/// In-memory dictionary keeping file order
#[derive(Debug, Clone, Default)]
pub struct MemoryDictionary {
    entries: Vec<DictionaryEntry>,
    /// Lowercased field value to index of its first row
    exact: HashMap<(Side, String), usize>,
}

impl MemoryDictionary {
    pub fn new(entries: Vec<DictionaryEntry>) -> Self {
        let mut exact = HashMap::new();
        for (index, entry) in entries.iter().enumerate() {
            for side in [Side::Indonesian, Side::Javanese] {
                exact
                    .entry((side, normalize_key(entry.field(side))))
                    .or_insert(index);
            }
        }
        Self { entries, exact }
    }

    /// Parse a JSON array of `{ "indonesian", "javanese" }` objects
    pub fn from_json_str(content: &str) -> MtResult<Self> {
        let entries: Vec<DictionaryEntry> = serde_json::from_str(content)
            .map_err(|e| MtError::DictionaryError(format!("Failed to parse dictionary: {}", e)))?;
        Ok(Self::new(entries))
    }

    /// Load a dictionary file
    ///
    /// # Errors
    /// - File not found or unreadable
    /// - Invalid JSON, or a root that is not an array of entries
    pub fn from_json_file(path: &Path) -> MtResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MtError::DictionaryError(format!(
                "Failed to read dictionary '{}': {}",
                path.display(),
                e
            ))
        })?;

        let dictionary = Self::from_json_str(&content).map_err(|e| match e {
            MtError::DictionaryError(msg) => {
                MtError::DictionaryError(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })?;

        info!(
            entries = dictionary.len(),
            path = %path.display(),
            "loaded dictionary"
        );
        Ok(dictionary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn to_match(&self, index: usize, side: Side) -> DictionaryMatch {
        let entry = &self.entries[index];
        DictionaryMatch {
            target_word: entry.field(side.opposite()).to_string(),
            source_gloss: entry.field(side).to_string(),
        }
    }
}

#[async_trait]
impl DictionaryStore for MemoryDictionary {
    async fn find_exact(&self, word: &str, side: Side) -> MtResult<Option<DictionaryMatch>> {
        Ok(self
            .exact
            .get(&(side, normalize_key(word)))
            .map(|&index| self.to_match(index, side)))
    }

    async fn find_containing(
        &self,
        word: &str,
        side: Side,
    ) -> MtResult<Option<DictionaryMatch>> {
        let needle = normalize_key(word);
        if needle.is_empty() {
            return Ok(None);
        }
        Ok(self
            .entries
            .iter()
            .position(|entry| entry.field(side).to_lowercase().contains(&needle))
            .map(|index| self.to_match(index, side)))
    }
}

fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Strip parenthetical glosses and stray `-`/`;` from a dictionary counterpart
///
/// ```
/// use tembung_mt::dictionary::normalize_gloss;
///
/// assert_eq!(normalize_gloss("mangan (krama)"), "mangan");
/// assert_eq!(normalize_gloss("-dhahar;"), "dhahar");
/// ```
pub fn normalize_gloss(counterpart: &str) -> String {
    GLOSS_PATTERN
        .replace_all(counterpart, "")
        .replace(['-', ';'], "")
        .trim()
        .to_string()
}

/// Word translator backed by a [`DictionaryStore`]
#[derive(Clone)]
pub struct DictionaryTranslator {
    store: Arc<dyn DictionaryStore>,
}

impl DictionaryTranslator {
    pub fn new(store: Arc<dyn DictionaryStore>) -> Self {
        Self { store }
    }

    /// Look a token up on one side of the dictionary
    pub async fn lookup(&self, token: &str, side: Side) -> MtResult<WordTranslation> {
        let clean = strip_punctuation(token);
        if clean.is_empty() {
            return Ok(WordTranslation::unmatched(token));
        }

        let found = match self.store.find_exact(&clean, side).await? {
            Some(found) => Some(found),
            None => self.store.find_containing(&clean, side).await?,
        };

        match found {
            Some(found) => {
                debug!(token = %clean, matched = %found.source_gloss, "dictionary match");
                let text = normalize_gloss(&found.target_word);
                if text.is_empty() {
                    // counterpart was nothing but a gloss; the row still matched
                    Ok(WordTranslation::matched(token, found.source_gloss))
                } else {
                    Ok(WordTranslation::matched(text, found.source_gloss))
                }
            }
            None => {
                debug!(token = %clean, "no dictionary match");
                Ok(WordTranslation::unmatched(token))
            }
        }
    }

    /// Word-by-word Indonesian → Javanese translation of a whole sentence
    ///
    /// Lookups run concurrently and are re-joined in word order. A store
    /// failure on any word fails the whole gloss.
    pub async fn gloss(&self, sentence: &str) -> MtResult<GlossResult> {
        let words = tokenize(sentence);

        let lookups = words
            .iter()
            .map(|word| self.lookup(word, Side::Indonesian));
        let translations = join_all(lookups).await;

        let mut details = Vec::with_capacity(words.len());
        for (word, translation) in words.into_iter().zip(translations) {
            let translation = translation?;
            details.push(GlossEntry {
                original: word,
                translated: translation.text,
                matched: translation.matched,
            });
        }

        let translated = details
            .iter()
            .map(|entry| entry.translated.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(GlossResult {
            original: sentence.trim().to_lowercase(),
            translated,
            details,
        })
    }
}

impl std::fmt::Debug for DictionaryTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryTranslator").finish_non_exhaustive()
    }
}

#[async_trait]
impl WordTranslator for DictionaryTranslator {
    async fn translate_word(
        &self,
        token: &str,
        pair: &LanguagePair,
    ) -> MtResult<WordTranslation> {
        self.lookup(token, Side::for_pair(pair)).await
    }

    fn backend_name(&self) -> &str {
        "dictionary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DictionaryTranslator {
        let dictionary = MemoryDictionary::new(vec![
            DictionaryEntry::new("makan", "mangan (krama)"),
            DictionaryEntry::new("makanan", "panganan"),
            DictionaryEntry::new("rumah", "omah; griya (krama)"),
            DictionaryEntry::new("pergi", "lunga-"),
            DictionaryEntry::new("kepergian", "lelungan"),
            DictionaryEntry::new("tanda", "(kata benda)"),
        ]);
        DictionaryTranslator::new(Arc::new(dictionary))
    }

    fn id_to_kl() -> LanguagePair {
        LanguagePair::parse("id", "kl").unwrap()
    }

    #[test]
    fn test_normalize_gloss() {
        assert_eq!(normalize_gloss("mangan (krama)"), "mangan");
        assert_eq!(normalize_gloss("omah; griya (krama)"), "omah griya");
        assert_eq!(normalize_gloss("lunga-"), "lunga");
        assert_eq!(normalize_gloss("  turu  "), "turu");
        assert_eq!(normalize_gloss("(kn)"), "");
    }

    #[tokio::test]
    async fn test_exact_match_strips_gloss() {
        let result = sample().translate_word("makan", &id_to_kl()).await.unwrap();
        assert_eq!(result.text, "mangan");
        assert_eq!(result.matched.as_deref(), Some("makan"));
    }

    #[tokio::test]
    async fn test_exact_match_beats_earlier_substring() {
        // "makan" is a substring of both rows; exact wins
        let result = sample().translate_word("makanan", &id_to_kl()).await.unwrap();
        assert_eq!(result.text, "panganan");
    }

    #[tokio::test]
    async fn test_substring_match() {
        let result = sample().translate_word("pergian", &id_to_kl()).await.unwrap();
        assert_eq!(result.text, "lelungan");
        assert_eq!(result.matched.as_deref(), Some("kepergian"));
    }

    #[tokio::test]
    async fn test_substring_ties_use_file_order() {
        // "ma" is contained in makan (row 0) and makanan (row 1)
        let result = sample().translate_word("ma", &id_to_kl()).await.unwrap();
        assert_eq!(result.matched.as_deref(), Some("makan"));
    }

    #[tokio::test]
    async fn test_no_match_returns_original() {
        let result = sample().translate_word("komputer", &id_to_kl()).await.unwrap();
        assert_eq!(result, WordTranslation::unmatched("komputer"));
    }

    #[tokio::test]
    async fn test_punctuation_is_stripped_before_lookup() {
        let result = sample().translate_word("rumah,", &id_to_kl()).await.unwrap();
        assert_eq!(result.text, "omah griya");

        let result = sample().translate_word("?!", &id_to_kl()).await.unwrap();
        assert_eq!(result, WordTranslation::unmatched("?!"));
    }

    #[tokio::test]
    async fn test_gloss_only_counterpart_keeps_token_and_match() {
        let result = sample().translate_word("tanda", &id_to_kl()).await.unwrap();
        assert_eq!(result, WordTranslation::matched("tanda", "tanda"));
    }

    #[tokio::test]
    async fn test_javanese_source_uses_javanese_field() {
        let pair = LanguagePair::parse("jw", "id").unwrap();
        let result = sample().translate_word("panganan", &pair).await.unwrap();
        assert_eq!(result.text, "makanan");
        assert_eq!(result.matched.as_deref(), Some("panganan"));
    }

    #[tokio::test]
    async fn test_gloss_sentence() {
        let result = sample().gloss("  Makan di rumah!  ").await.unwrap();
        assert_eq!(result.original, "makan di rumah!");
        assert_eq!(result.translated, "mangan di omah griya");
        assert_eq!(result.details.len(), 3);
        assert_eq!(result.details[1].matched, None);
        assert_eq!(result.details[2].original, "rumah!");
    }

    #[test]
    fn test_from_json_str() {
        let dictionary = MemoryDictionary::from_json_str(
            r#"[
                { "indonesian": "tidur", "javanese": "turu" },
                { "indonesia": "minum", "jawa": "ngombe (ngoko)" }
            ]"#,
        )
        .unwrap();
        assert_eq!(dictionary.len(), 2);
        assert!(!dictionary.is_empty());
    }

    #[test]
    fn test_from_json_str_rejects_objects() {
        let result = MemoryDictionary::from_json_str(r#"{ "tidur": "turu" }"#);
        assert!(matches!(result, Err(MtError::DictionaryError(_))));
    }

    #[test]
    fn test_from_missing_file() {
        let result = MemoryDictionary::from_json_file(Path::new("/nonexistent/kamus.json"));
        match result {
            Err(MtError::DictionaryError(msg)) => assert!(msg.contains("Failed to read")),
            other => panic!("Expected DictionaryError, got {:?}", other),
        }
    }
}
