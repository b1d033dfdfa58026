//! Translation between Indonesian and Javanese with a word-by-word breakdown
//!
//! Built on the morphology primitives in `tembung`, this crate adds
//! everything that talks to the outside world: the remote translation
//! service, the bilingual dictionary, and the [`Analyzer`] that fans tokens
//! out to them concurrently.
//!
//! # Workflow Example
//!
//! ```ignore
//! use tembung::TranslationRequest;
//! use tembung_mt::{Config, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Load configuration and build shared resources once
//!     let config = Config::load(None)?;
//!     let pipeline = Pipeline::from_config(&config)?;
//!
//!     // 2. Validate the request
//!     let request = TranslationRequest::validate(Some("Adik bermainlah"), Some("id"), Some("ng"))?;
//!
//!     // 3. Translate the sentence and every token
//!     let result = pipeline.translate(&request).await?;
//!
//!     println!("{}", result.translation_original);
//!     println!("{:?}", result.analysis.stemmed_text);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod data;
pub mod dictionary;
pub mod error;
pub mod mock;
pub mod pipeline;
pub mod remote;
pub mod translator;


// Re-export main types for convenient access
pub use analysis::Analyzer;
pub use config::{Backend, Config};
pub use data::{
    Analysis, GlossEntry, GlossResult, TranslationResult, WordAnalysis, WordTranslation,
};
pub use dictionary::{
    DictionaryEntry, DictionaryMatch, DictionaryStore, DictionaryTranslator, MemoryDictionary,
    Side, normalize_gloss,
};
pub use error::{MtError, MtResult};
pub use mock::{MockMode, MockTranslator};
pub use pipeline::Pipeline;
pub use remote::RemoteTranslator;
pub use translator::{SentenceTranslator, WordTranslator};
