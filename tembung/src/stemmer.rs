//! Stemming strategies
//!
//! Two interchangeable strategies sit behind the [`Stemmer`] trait:
//!
//! 1. [`AffixStripper`] - a single pass over fixed Indonesian prefix and suffix lists
//! 2. [`SnowballAnalyzer`] - delegates to a Snowball analyzer from `rust-stemmers`
//!
//! The strategy is picked once from a [`StemmerKind`] and shared for the life
//! of the process.

use rust_stemmers::Algorithm;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::affix::{strip_prefix_with_root, strip_suffix_with_root};

/// Prefixes tried by [`AffixStripper`], most specific first
pub const STRIP_PREFIXES: &[&str] = &[
    "memper", "meng", "meny", "men", "mem", "me", "ber", "ter", "per", "di", "ke", "se",
];

/// Suffixes tried by [`AffixStripper`], in list order
pub const STRIP_SUFFIXES: &[&str] = &["kan", "an", "i", "lah", "kah", "nya"];

/// Reduce a word to an approximate root
///
/// Implementations are pure: the same word always yields the same root.
pub trait Stemmer: Send + Sync {
    fn stem(&self, word: &str) -> String;

    /// Strategy name, for logs
    fn name(&self) -> &str;
}

/// Fixed-list prefix/suffix stripper
///
/// Removes at most one prefix, then at most one suffix from what is left.
/// An affix is only removed when the remainder keeps at least
/// [`MIN_ROOT_CHARS`](crate::affix::MIN_ROOT_CHARS) characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct AffixStripper;

impl AffixStripper {
    pub fn new() -> Self {
        Self
    }
}

impl Stemmer for AffixStripper {
    fn stem(&self, word: &str) -> String {
        let without_prefix = STRIP_PREFIXES
            .iter()
            .find_map(|prefix| strip_prefix_with_root(word, prefix))
            .unwrap_or(word);

        let root = STRIP_SUFFIXES
            .iter()
            .find_map(|suffix| strip_suffix_with_root(without_prefix, suffix))
            .unwrap_or(without_prefix);

        root.to_string()
    }

    fn name(&self) -> &str {
        "affix"
    }
}

/// Snowball algorithms the delegated analyzer can be configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnowballAlgorithm {
    English,
    Dutch,
    French,
    German,
    Portuguese,
    Spanish,
}

impl SnowballAlgorithm {
    fn to_algorithm(self) -> Algorithm {
        match self {
            SnowballAlgorithm::English => Algorithm::English,
            SnowballAlgorithm::Dutch => Algorithm::Dutch,
            SnowballAlgorithm::French => Algorithm::French,
            SnowballAlgorithm::German => Algorithm::German,
            SnowballAlgorithm::Portuguese => Algorithm::Portuguese,
            SnowballAlgorithm::Spanish => Algorithm::Spanish,
        }
    }
}

impl FromStr for SnowballAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "porter" => Ok(SnowballAlgorithm::English),
            "dutch" => Ok(SnowballAlgorithm::Dutch),
            "french" => Ok(SnowballAlgorithm::French),
            "german" => Ok(SnowballAlgorithm::German),
            "portuguese" => Ok(SnowballAlgorithm::Portuguese),
            "spanish" => Ok(SnowballAlgorithm::Spanish),
            other => Err(format!("Unknown snowball algorithm: {}", other)),
        }
    }
}

/// Delegated analyzer backed by a Snowball stemmer
pub struct SnowballAnalyzer {
    stemmer: rust_stemmers::Stemmer,
    algorithm: SnowballAlgorithm,
}

impl SnowballAnalyzer {
    pub fn new(algorithm: SnowballAlgorithm) -> Self {
        Self {
            stemmer: rust_stemmers::Stemmer::create(algorithm.to_algorithm()),
            algorithm,
        }
    }

    pub fn algorithm(&self) -> SnowballAlgorithm {
        self.algorithm
    }
}

impl fmt::Debug for SnowballAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballAnalyzer")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl Stemmer for SnowballAnalyzer {
    fn stem(&self, word: &str) -> String {
        self.stemmer.stem(word).into_owned()
    }

    fn name(&self) -> &str {
        "snowball"
    }
}

/// Configured stemming strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StemmerKind {
    #[default]
    Affix,
    Snowball(SnowballAlgorithm),
}

impl StemmerKind {
    /// Parse a strategy name, with the algorithm used when it is `snowball`
    pub fn from_names(strategy: &str, algorithm: &str) -> Result<Self, String> {
        match strategy.trim().to_lowercase().as_str() {
            "affix" | "heuristic" => Ok(StemmerKind::Affix),
            "snowball" | "analyzer" => Ok(StemmerKind::Snowball(algorithm.parse()?)),
            other => Err(format!("Unknown stemmer strategy: {}", other)),
        }
    }

    pub fn build(self) -> Box<dyn Stemmer> {
        match self {
            StemmerKind::Affix => Box::new(AffixStripper::new()),
            StemmerKind::Snowball(algorithm) => Box::new(SnowballAnalyzer::new(algorithm)),
        }
    }
}
