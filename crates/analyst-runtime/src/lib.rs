//! # analyst-runtime
//!
//! AI capability providers for the crypto-analyst pipeline.
//!
//! ## Providers
//!
//! - **Ollama** (default): Local LLM summarize/translate via Ollama
//! - **OpenAI** (coming soon): OpenAI API integration
//! - **Anthropic** (coming soon): Claude API integration
//!
//! ## Usage
//!
//! ```rust,ignore
//! use analyst_runtime::ollama::OllamaTranslator;
//! use std::sync::Arc;
//!
//! let translator = OllamaTranslator::new("http://localhost", 11434);
//! let aggregator = FeedAggregator::from_config(&config)
//!     .with_translator(Arc::new(translator));
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "ollama")]
pub use ollama::OllamaTranslator;

// Re-export core types for convenience
pub use crypto_analyst::{
    Analyst, AnalystConfig, AnalystError, Result, SummarizeTranslate, TranslatedNews,
};
