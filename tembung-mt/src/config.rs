//! Runtime configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `TEMBUNG_*` environment variables. The result is validated once at
//! start-up.
//!
//! ```toml
//! [translator]
//! backend = "dictionary"
//!
//! [dictionary]
//! path = "data/kamus.json"
//!
//! [stemmer]
//! strategy = "affix"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tembung::StemmerKind;

use crate::error::{MtError, MtResult};
use crate::remote::RemoteTranslator;

/// Environment variable naming the config file
pub const CONFIG_PATH_VAR: &str = "TEMBUNG_CONFIG";

/// Which word translator answers per-token lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Remote,
    Dictionary,
}

impl FromStr for Backend {
    type Err = MtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remote" => Ok(Backend::Remote),
            "dictionary" | "kamus" => Ok(Backend::Dictionary),
            other => Err(MtError::ConfigError(format!(
                "Unknown translator backend: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub backend: Backend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub base_url: String,
    /// HTTP client timeout, covering connect and body
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: RemoteTranslator::DEFAULT_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// JSON file with `{ "indonesian", "javanese" }` rows
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StemmerConfig {
    /// `affix` or `snowball`
    pub strategy: String,
    /// Snowball algorithm, used only by the `snowball` strategy
    pub algorithm: String,
}

impl Default for StemmerConfig {
    fn default() -> Self {
        Self {
            strategy: "affix".to_string(),
            algorithm: "english".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Budget for each outbound call made while answering a request
    pub call_timeout_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            call_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub remote: RemoteConfig,
    pub dictionary: DictionaryConfig,
    pub stemmer: StemmerConfig,
    pub pipeline: PipelineConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration for the process
    ///
    /// `path` wins over `TEMBUNG_CONFIG`. Without either, defaults are used.
    /// Environment overrides are applied last, then the result is validated.
    pub fn load(path: Option<&Path>) -> MtResult<Self> {
        let from_env = env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> MtResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MtError::ConfigError(format!(
                "Failed to read config '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> MtResult<Self> {
        toml::from_str(content)
            .map_err(|e| MtError::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Apply `TEMBUNG_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> MtResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("TEMBUNG_BACKEND") {
            self.translator.backend = backend.parse()?;
        }
        if let Some(url) = lookup("TEMBUNG_REMOTE_URL") {
            self.remote.base_url = url;
        }
        if let Some(path) = lookup("TEMBUNG_DICTIONARY_PATH") {
            self.dictionary.path = Some(PathBuf::from(path));
        }
        if let Some(strategy) = lookup("TEMBUNG_STEMMER") {
            self.stemmer.strategy = strategy;
        }
        if let Some(algorithm) = lookup("TEMBUNG_STEMMER_ALGORITHM") {
            self.stemmer.algorithm = algorithm;
        }
        if let Some(timeout) = lookup("TEMBUNG_CALL_TIMEOUT_MS") {
            self.pipeline.call_timeout_ms = timeout.trim().parse().map_err(|_| {
                MtError::ConfigError(format!("TEMBUNG_CALL_TIMEOUT_MS is not a number: {}", timeout))
            })?;
        }
        if let Some(bind) = lookup("TEMBUNG_BIND") {
            self.server.bind = bind;
        }
        Ok(())
    }

    pub fn validate(&self) -> MtResult<()> {
        if self.translator.backend == Backend::Dictionary && self.dictionary.path.is_none() {
            return Err(MtError::ConfigError(
                "The dictionary backend needs [dictionary] path".to_string(),
            ));
        }
        if self.pipeline.call_timeout_ms == 0 {
            return Err(MtError::ConfigError(
                "call_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.remote.timeout_secs == 0 {
            return Err(MtError::ConfigError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        self.stemmer_kind()?;
        Ok(())
    }

    pub fn stemmer_kind(&self) -> MtResult<StemmerKind> {
        StemmerKind::from_names(&self.stemmer.strategy, &self.stemmer.algorithm)
            .map_err(MtError::ConfigError)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.pipeline.call_timeout_ms)
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote.timeout_secs)
    }
}
