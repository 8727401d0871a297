//! Analysis Agents
//!
//! Three independent scorers over the same snapshot + news inputs.
//! Agents hold no state across calls; each `analyze` is a pure
//! function of its inputs, so they need no synchronization.

mod risk;
mod sentiment;
mod technical;

pub use risk::RiskAgent;
pub use sentiment::SentimentAgent;
pub use technical::TechnicalAgent;

use crate::error::Result;
use crate::model::{AgentScore, MarketSnapshot, NewsItem};

/// A single analysis perspective on the market data
pub trait AnalysisAgent: Send + Sync {
    fn name(&self) -> &str;

    /// Score the snapshot and classified news. Agents must not mutate
    /// shared state; the snapshot is a copy.
    fn analyze(&self, snapshot: &MarketSnapshot, news: &[NewsItem]) -> Result<AgentScore>;
}

/// The default closed set of agents: technical, sentiment, risk
pub fn default_agents() -> Vec<Box<dyn AnalysisAgent>> {
    vec![
        Box::new(TechnicalAgent),
        Box::new(SentimentAgent),
        Box::new(RiskAgent),
    ]
}

/// Run every agent, substituting a degraded placeholder when one
/// fails, so a single agent can never abort the overall report.
pub fn score_all(
    agents: &[Box<dyn AnalysisAgent>],
    snapshot: &MarketSnapshot,
    news: &[NewsItem],
) -> Vec<AgentScore> {
    agents
        .iter()
        .map(|agent| {
            agent.analyze(snapshot, news).unwrap_or_else(|err| {
                tracing::error!(agent = agent.name(), error = %err, "agent analysis failed");
                AgentScore::degraded(agent.name())
            })
        })
        .collect()
}
