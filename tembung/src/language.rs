//! Language and register codes
//!
//! `id` and `jw` are languages. `ng`, `kl` and `ka` are politeness registers
//! of Javanese used as translation targets from Indonesian.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::request::RequestError;

/// A language or register code accepted by the translator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Code {
    /// Indonesian
    Id,
    /// Javanese, used as a source language
    Jw,
    /// Javanese ngoko register
    Ng,
    /// Javanese krama register
    Kl,
    /// Javanese kasar register
    Ka,
}

impl Code {
    pub fn as_str(&self) -> &'static str {
        match self {
            Code::Id => "id",
            Code::Jw => "jw",
            Code::Ng => "ng",
            Code::Kl => "kl",
            Code::Ka => "ka",
        }
    }

    /// Whether the code names a Javanese register rather than a language
    pub fn is_register(&self) -> bool {
        matches!(self, Code::Ng | Code::Kl | Code::Ka)
    }

    /// Valid targets for a source code
    ///
    /// Registers are never valid sources, so they map to an empty slice.
    pub fn valid_targets(&self) -> &'static [Code] {
        match self {
            Code::Id => &[Code::Ng, Code::Kl, Code::Ka],
            Code::Jw => &[Code::Id],
            Code::Ng | Code::Kl | Code::Ka => &[],
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Code {
    type Err = RequestError;

    /// Codes match exactly: lowercase, no surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Code::Id),
            "jw" => Ok(Code::Jw),
            "ng" => Ok(Code::Ng),
            "kl" => Ok(Code::Kl),
            "ka" => Ok(Code::Ka),
            other => Err(RequestError::UnknownCode(other.to_string())),
        }
    }
}

/// A validated `(from, to)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LanguagePair {
    pub from: Code,
    pub to: Code,
}

impl LanguagePair {
    /// Build a pair, rejecting combinations outside the valid-pairs table
    ///
    /// # Example
    ///
    /// ```
    /// use tembung::{Code, LanguagePair};
    ///
    /// assert!(LanguagePair::new(Code::Id, Code::Kl).is_ok());
    /// assert!(LanguagePair::new(Code::Jw, Code::Ng).is_err());
    /// ```
    pub fn new(from: Code, to: Code) -> Result<Self, RequestError> {
        if from.valid_targets().contains(&to) {
            Ok(Self { from, to })
        } else {
            Err(RequestError::InvalidPair {
                from: from.to_string(),
                to: to.to_string(),
            })
        }
    }

    /// Parse and validate a pair from raw codes
    ///
    /// An unrecognised code on either side is reported as an invalid pair so
    /// that `id → en` and `jw → ng` produce the same error.
    pub fn parse(from: &str, to: &str) -> Result<Self, RequestError> {
        let invalid = || RequestError::InvalidPair {
            from: from.to_string(),
            to: to.to_string(),
        };
        let from_code = from.parse::<Code>().map_err(|_| invalid())?;
        let to_code = to.parse::<Code>().map_err(|_| invalid())?;
        Self::new(from_code, to_code).map_err(|_| invalid())
    }

    /// Whether the source side is Indonesian, which enables stemming
    pub fn is_from_indonesian(&self) -> bool {
        self.from == Code::Id
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("id".parse::<Code>().unwrap(), Code::Id);
        assert_eq!("kl".parse::<Code>().unwrap(), Code::Kl);
        assert!("en".parse::<Code>().is_err());
    }

    #[test]
    fn test_codes_match_exactly() {
        assert!("ID".parse::<Code>().is_err());
        assert!(" kl ".parse::<Code>().is_err());
        assert_eq!(
            LanguagePair::parse("ID", "ng"),
            Err(RequestError::InvalidPair {
                from: "ID".to_string(),
                to: "ng".to_string(),
            })
        );
    }

    #[test]
    fn test_valid_pairs_from_indonesian() {
        for to in [Code::Ng, Code::Kl, Code::Ka] {
            let pair = LanguagePair::new(Code::Id, to).unwrap();
            assert!(pair.is_from_indonesian());
        }
    }

    #[test]
    fn test_valid_pair_from_javanese() {
        let pair = LanguagePair::parse("jw", "id").unwrap();
        assert_eq!(pair.from, Code::Jw);
        assert!(!pair.is_from_indonesian());
    }

    #[test]
    fn test_invalid_pairs() {
        assert!(LanguagePair::parse("id", "en").is_err());
        assert!(LanguagePair::parse("id", "jw").is_err());
        assert!(LanguagePair::parse("jw", "ng").is_err());
        assert!(LanguagePair::parse("ng", "id").is_err());
    }

    #[test]
    fn test_unknown_code_reports_invalid_pair() {
        match LanguagePair::parse("id", "en") {
            Err(RequestError::InvalidPair { from, to }) => {
                assert_eq!(from, "id");
                assert_eq!(to, "en");
            }
            other => panic!("Expected InvalidPair, got {:?}", other),
        }
    }

    #[test]
    fn test_registers() {
        assert!(Code::Ka.is_register());
        assert!(!Code::Jw.is_register());
        assert!(Code::Ng.valid_targets().is_empty());
    }
}
