//! Domain Models
//!
//! Core data types for market snapshots, aggregated news, and scoring.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time market data record for one asset.
///
/// Immutable once constructed; cloned (not aliased) when handed to agents.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Ticker symbol (e.g., "BTC", "ETH")
    pub symbol: String,

    /// Current price in USD
    pub price_usd: Decimal,

    /// Current price in JPY
    pub price_jpy: Decimal,

    /// Market capitalization in USD
    pub market_cap: Decimal,

    /// 24-hour trading volume in USD
    pub volume_24h: Decimal,

    /// 24-hour price change percentage
    pub change_24h: Decimal,

    /// When this snapshot was fetched
    pub fetched_at: DateTime<Utc>,
}

impl MarketSnapshot {
    /// 24h volume as a fraction of market cap (zero when market cap is zero)
    pub fn volume_ratio(&self) -> Decimal {
        if self.market_cap > Decimal::ZERO {
            self.volume_24h / self.market_cap
        } else {
            Decimal::ZERO
        }
    }
}

/// News categories derived from keyword matching.
///
/// A single item may carry several categories; `General` is the fallback
/// when nothing matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Bitcoin,
    Ethereum,
    Defi,
    Regulation,
    Technology,
    Market,
    Adoption,
    Security,
    General,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Bitcoin => "bitcoin",
            Category::Ethereum => "ethereum",
            Category::Defi => "defi",
            Category::Regulation => "regulation",
            Category::Technology => "technology",
            Category::Market => "market",
            Category::Adoption => "adoption",
            Category::Security => "security",
            Category::General => "general",
        }
    }
}

/// Keyword-derived sentiment label
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

/// A single aggregated news entry.
///
/// Created once by the aggregator with all derived fields populated;
/// never mutated afterward.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub source: String,
    pub published: DateTime<Utc>,
    pub summary: String,

    /// Categories derived at construction time
    pub categories: Vec<Category>,

    /// Sentiment label derived at construction time
    pub sentiment: Sentiment,

    /// Net keyword score behind the sentiment label
    pub sentiment_score: i32,
}

/// Severity band attached to an agent score
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Moderate,
    Elevated,
    High,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::Elevated => "elevated",
            Severity::High => "high",
        }
    }
}

/// Structured output of one analysis agent.
///
/// Narrative-free: the tags name the signals that produced the score,
/// rendering is left to the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentScore {
    /// Agent that produced this score
    pub agent: String,

    /// Numeric score; the range is agent-defined
    pub score: Decimal,

    /// Rationale tags, in the order they were derived
    pub tags: Vec<String>,

    /// Severity band for this score
    pub severity: Severity,
}

impl AgentScore {
    /// Placeholder emitted when an agent fails, so one broken agent
    /// never aborts the whole report
    pub fn degraded(agent: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            score: Decimal::ZERO,
            tags: vec!["analysis temporarily unavailable".into()],
            severity: Severity::Moderate,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.tags
            .iter()
            .any(|t| t == "analysis temporarily unavailable")
    }
}

/// Final categorical trading signal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl Signal {
    pub fn label(self) -> &'static str {
        match self {
            Signal::StrongBuy => "strong buy",
            Signal::Buy => "buy",
            Signal::Hold => "hold",
            Signal::Sell => "sell",
            Signal::StrongSell => "strong sell",
        }
    }
}

/// Combined trading recommendation.
///
/// Derived and stateless; discarded after being returned to the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Recommendation {
    /// Aggregate tally across all weighted factors
    pub score: i32,

    pub signal: Signal,

    /// Suggested portfolio allocation range for this asset
    pub position_size_hint: String,

    /// Suggested stop-loss percentage (1.5x the 24h move)
    pub stop_loss_pct: Decimal,

    /// Every tally contribution, in the order it was applied
    pub factors: Vec<String>,
}

/// Full analysis output for one `analyze(symbol)` call
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub generated_at: DateTime<Utc>,
    pub snapshot: MarketSnapshot,
    pub agent_scores: Vec<AgentScore>,
    pub recommendation: Recommendation,
    pub news: Vec<NewsItem>,
}

impl AnalysisReport {
    /// Generate a plain-text summary for front ends that don't render
    /// the structured report themselves
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!(
            "{} - ${:.2} ({:+.2}% 24h)\n",
            self.snapshot.symbol, self.snapshot.price_usd, self.snapshot.change_24h
        ));
        s.push_str(&format!(
            "Signal: {} (score {:+})\n",
            self.recommendation.signal.label(),
            self.recommendation.score
        ));
        s.push_str(&format!(
            "Position size: {} | Stop loss: {:.1}%\n",
            self.recommendation.position_size_hint, self.recommendation.stop_loss_pct
        ));

        for agent in &self.agent_scores {
            s.push_str(&format!(
                "  {} [{}]: {}\n",
                agent.agent,
                agent.severity.label(),
                agent.tags.join("; ")
            ));
        }

        s.push_str(&format!("News analyzed: {} items\n", self.news.len()));
        s
    }
}
