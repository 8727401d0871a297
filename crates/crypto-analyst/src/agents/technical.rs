//! Technical Analysis Agent
//!
//! Bands the 24h move, checks volume against market cap, and sizes the
//! asset by capitalization.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::AnalysisAgent;
use crate::error::Result;
use crate::model::{AgentScore, MarketSnapshot, NewsItem, Severity};

/// Volume above this fraction of market cap counts as high activity
const HIGH_ACTIVITY_RATIO: Decimal = dec!(0.10);

pub struct TechnicalAgent;

impl AnalysisAgent for TechnicalAgent {
    fn name(&self) -> &str {
        "Technical Analysis"
    }

    fn analyze(&self, snapshot: &MarketSnapshot, _news: &[NewsItem]) -> Result<AgentScore> {
        let mut tags = Vec::new();

        // Momentum band from the 24h change
        let change = snapshot.change_24h;
        let (band_score, band_tag) = if change > dec!(5) {
            (2, format!("strong bullish momentum ({change:+.2}% 24h)"))
        } else if change > dec!(2) {
            (1, format!("mild bullish momentum ({change:+.2}% 24h)"))
        } else if change < dec!(-5) {
            (-2, format!("strong bearish momentum ({change:+.2}% 24h)"))
        } else if change < dec!(-2) {
            (-1, format!("mild bearish momentum ({change:+.2}% 24h)"))
        } else {
            (0, format!("neutral range ({change:+.2}% 24h)"))
        };
        tags.push(band_tag);

        // Secondary volume-vs-market-cap check
        let high_activity = snapshot.volume_ratio() > HIGH_ACTIVITY_RATIO;
        if high_activity {
            tags.push("high activity: volume above 10% of market cap".into());
        } else {
            tags.push("normal trading volume".into());
        }

        // Market-cap size band
        if snapshot.market_cap > dec!(100_000_000_000) {
            tags.push("large-cap asset (>$100B)".into());
        } else if snapshot.market_cap > dec!(10_000_000_000) {
            tags.push("mid-cap asset ($10B-$100B)".into());
        } else {
            tags.push("small-cap asset (<$10B)".into());
        }

        let score = band_score + i32::from(high_activity);

        let severity = match band_score.abs() {
            2 => Severity::Elevated,
            1 => Severity::Moderate,
            _ => Severity::Low,
        };

        Ok(AgentScore {
            agent: self.name().to_string(),
            score: Decimal::from(score),
            tags,
            severity,
        })
    }
}
