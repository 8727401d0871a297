//! # crypto-analyst
//!
//! Market data aggregation and scoring pipeline for cryptocurrency
//! trading assistants. Fetches live prices through a cached, throttled
//! source, aggregates multi-feed news with keyword classification, runs
//! three independent analysis agents, and folds everything into a
//! deterministic trading recommendation.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌───────────────────────────────┐
//! │ PriceSource  │   │ FeedAggregator                │
//! │  (CoinGecko, │   │  (RSS feeds, classifier,      │
//! │   60s cache, │   │   optional AI translate)      │
//! │   2s throttle│   └──────────────┬────────────────┘
//! └──────┬───────┘                  │
//!        │  MarketSnapshot          │  Vec<NewsItem>
//!        ▼                          ▼
//! ┌─────────────────────────────────────────────────┐
//! │ Agents: Technical │ Sentiment │ Risk            │
//! └──────────────────────┬──────────────────────────┘
//!                        │  Vec<AgentScore>
//!                        ▼
//! ┌─────────────────────────────────────────────────┐
//! │ RecommendationEngine → AnalysisReport           │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Degradation Rules
//!
//! Market data is the only hard dependency. Failed feed sources, a
//! failed AI capability, and failed agents all degrade gracefully; an
//! unknown symbol or a dead price endpoint aborts the analysis.

pub mod agents;
pub mod analyst;
pub mod cache;
pub mod config;
pub mod error;
pub mod market;
pub mod model;
pub mod news;
pub mod recommend;
pub mod translate;

pub use analyst::Analyst;
pub use config::AnalystConfig;
pub use error::{AnalystError, Result};
pub use model::{
    AgentScore, AnalysisReport, Category, MarketSnapshot, NewsItem, Recommendation, Sentiment,
    Severity, Signal,
};
pub use recommend::RecommendationEngine;
pub use translate::{SummarizeTranslate, TranslatedNews};
