//! Sentiment Analysis Agent
//!
//! Aggregates the classified news set: per-item detail for the most
//! recent items, category counts, and an overall mood score.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::AnalysisAgent;
use crate::error::Result;
use crate::model::{AgentScore, Category, MarketSnapshot, NewsItem, Sentiment, Severity};

/// How many items get per-item detail tags; the rest are only counted
const DETAILED_ITEMS: usize = 8;

pub struct SentimentAgent;

impl AnalysisAgent for SentimentAgent {
    fn name(&self) -> &str {
        "Sentiment Analysis"
    }

    fn analyze(&self, _snapshot: &MarketSnapshot, news: &[NewsItem]) -> Result<AgentScore> {
        if news.is_empty() {
            return Ok(AgentScore {
                agent: self.name().to_string(),
                score: Decimal::ZERO,
                tags: vec!["no news available".into()],
                severity: Severity::Low,
            });
        }

        let mut tags = Vec::new();
        let mut category_counts: BTreeMap<Category, usize> = BTreeMap::new();
        let mut positive = 0usize;
        let mut negative = 0usize;

        for (i, item) in news.iter().enumerate() {
            if i < DETAILED_ITEMS {
                tags.push(format!(
                    "{} [{}]: {}",
                    item.source,
                    item.sentiment.label(),
                    item.title
                ));
            }
            for category in &item.categories {
                *category_counts.entry(*category).or_default() += 1;
            }
            match item.sentiment {
                Sentiment::Positive => positive += 1,
                Sentiment::Negative => negative += 1,
                Sentiment::Neutral => {}
            }
        }

        if news.len() > DETAILED_ITEMS {
            tags.push(format!(
                "{} additional items analyzed",
                news.len() - DETAILED_ITEMS
            ));
        }

        // Top categories by item count
        let mut by_count: Vec<(Category, usize)> = category_counts.into_iter().collect();
        by_count.sort_by(|a, b| b.1.cmp(&a.1));
        for (category, count) in by_count.into_iter().take(5) {
            tags.push(format!("category {}: {} items", category.label(), count));
        }

        let total = Decimal::from(news.len());
        let positive_ratio = Decimal::from(positive) / total;
        let negative_ratio = Decimal::from(negative) / total;

        // The score scale differs by branch: x10 for a dominant mood,
        // x5 in the neutral band. Preserved as a behavioral contract.
        let (mood_tag, score, severity) = if positive_ratio > dec!(0.5) {
            (
                "very positive: strong optimistic mood",
                ((positive_ratio - negative_ratio) * dec!(10)).round(),
                Severity::Elevated,
            )
        } else if negative_ratio > dec!(0.5) {
            (
                "very negative: cautious mood spreading",
                ((negative_ratio - positive_ratio) * dec!(-10)).round(),
                Severity::Elevated,
            )
        } else {
            (
                "neutral: balanced news environment",
                ((positive_ratio - negative_ratio) * dec!(5)).round(),
                Severity::Low,
            )
        };
        tags.push(mood_tag.into());

        Ok(AgentScore {
            agent: self.name().to_string(),
            score,
            tags,
            severity,
        })
    }
}
