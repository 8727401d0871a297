//! Analyst Facade
//!
//! Wires the price source, news aggregator, agents, and recommendation
//! engine into the single `analyze(symbol)` entry point.

use std::sync::Arc;

use chrono::Utc;

use crate::agents::{self, AnalysisAgent};
use crate::config::AnalystConfig;
use crate::error::Result;
use crate::market::{CoinGeckoClient, PriceSource};
use crate::model::AnalysisReport;
use crate::news::FeedAggregator;
use crate::recommend::RecommendationEngine;

/// Top-level analysis pipeline for one deployment.
///
/// Construct once and share; every collaborator behind it is safe for
/// concurrent `analyze` calls.
pub struct Analyst {
    price: PriceSource,
    news: FeedAggregator,
    agents: Vec<Box<dyn AnalysisAgent>>,
    engine: RecommendationEngine,
    news_limit: usize,
}

impl Analyst {
    /// Build the default pipeline: CoinGecko prices, the configured RSS
    /// feeds, and the three standard agents.
    pub fn new(config: AnalystConfig) -> Self {
        let endpoint = Arc::new(CoinGeckoClient::new(
            config.coingecko_base.clone(),
            config.price_timeout,
        ));
        let news = FeedAggregator::from_config(&config);
        let news_limit = config.max_news_items;

        Self {
            price: PriceSource::new(endpoint, config),
            news,
            agents: agents::default_agents(),
            engine: RecommendationEngine::new(),
            news_limit,
        }
    }

    /// Build a pipeline from explicit parts. Used by deployments that
    /// swap the endpoint or agent set, and by tests.
    pub fn with_parts(
        price: PriceSource,
        news: FeedAggregator,
        agents: Vec<Box<dyn AnalysisAgent>>,
        news_limit: usize,
    ) -> Self {
        Self {
            price,
            news,
            agents,
            engine: RecommendationEngine::new(),
            news_limit,
        }
    }

    /// Run the full pipeline for one ticker symbol.
    ///
    /// Market data is the only hard dependency: an unknown symbol or an
    /// unreachable price endpoint aborts the call with no partial
    /// report. News and agent failures degrade instead.
    pub async fn analyze(&self, symbol: &str) -> Result<AnalysisReport> {
        let snapshot = self.price.fetch(symbol).await?;
        tracing::info!(symbol = %snapshot.symbol, price = %snapshot.price_usd, "snapshot ready");

        let news = self.news.fetch_news(self.news_limit).await;
        let agent_scores = agents::score_all(&self.agents, &snapshot, &news);
        let recommendation = self.engine.combine(&snapshot, &news, &agent_scores);

        tracing::info!(
            symbol = %snapshot.symbol,
            signal = recommendation.signal.label(),
            score = recommendation.score,
            "analysis complete"
        );

        Ok(AnalysisReport {
            symbol: snapshot.symbol.clone(),
            generated_at: Utc::now(),
            snapshot,
            agent_scores,
            recommendation,
            news,
        })
    }
}
