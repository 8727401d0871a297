//! Recommendation Engine
//!
//! Folds momentum, volume activity, and a lightweight news recount
//! into one signed tally and a final signal. The tally is computed
//! independently of the agent scores, and the news recount is a
//! deliberately cheaper scan than the full classifier.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::model::{AgentScore, MarketSnapshot, NewsItem, Recommendation, Signal};

/// Only the most recent items feed the recount
const RECOUNT_ITEMS: usize = 5;

/// Raw headline terms for the recount, independent of the classifier
/// keyword tables (both the English and Japanese forms appear in
/// translated titles)
const BULLISH_TERMS: &[&str] = &["上昇", "急騰", "強気", "surge", "rally", "bullish"];
const BEARISH_TERMS: &[&str] = &["下落", "暴落", "弱気", "crash", "decline", "bearish"];

#[derive(Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Combine the snapshot and news into a final recommendation.
    ///
    /// Deterministic: identical inputs always produce an identical
    /// recommendation.
    pub fn combine(
        &self,
        snapshot: &MarketSnapshot,
        news: &[NewsItem],
        agent_scores: &[AgentScore],
    ) -> Recommendation {
        tracing::debug!(
            symbol = %snapshot.symbol,
            agents = agent_scores.len(),
            news = news.len(),
            "combining recommendation"
        );

        let mut score = 0i32;
        let mut factors = Vec::new();

        // Price momentum, mirroring the technical bands
        let change = snapshot.change_24h;
        if change > dec!(5) {
            score += 2;
            factors.push("strong upward trend (+2)".to_string());
        } else if change > dec!(2) {
            score += 1;
            factors.push("mild upward trend (+1)".to_string());
        } else if change < dec!(-5) {
            score -= 2;
            factors.push("strong downward trend (-2)".to_string());
        } else if change < dec!(-2) {
            score -= 1;
            factors.push("mild downward trend (-1)".to_string());
        } else {
            factors.push("price stable (0)".to_string());
        }

        // Volume activity
        if snapshot.volume_ratio() > dec!(0.10) {
            score += 1;
            factors.push("high trading volume (+1)".to_string());
        } else {
            factors.push("normal trading volume (0)".to_string());
        }

        // Lightweight sentiment recount over the freshest headlines
        let (bullish, bearish) = recount_headlines(news);
        if bullish > bearish {
            score += 1;
            factors.push("positive news sentiment (+1)".to_string());
        } else if bearish > bullish {
            score -= 1;
            factors.push("negative news sentiment (-1)".to_string());
        } else {
            factors.push("neutral news sentiment (0)".to_string());
        }

        let (signal, position_size_hint) = signal_band(score);
        let stop_loss_pct = (change.abs() * dec!(1.5)).round_dp(1);

        Recommendation {
            score,
            signal,
            position_size_hint: position_size_hint.to_string(),
            stop_loss_pct,
            factors,
        }
    }
}

/// Count bullish vs bearish headlines among the most recent items,
/// by raw substring match
fn recount_headlines(news: &[NewsItem]) -> (usize, usize) {
    let mut bullish = 0;
    let mut bearish = 0;
    for item in news.iter().take(RECOUNT_ITEMS) {
        let title = item.title.to_lowercase();
        if BULLISH_TERMS.iter().any(|t| title.contains(t)) {
            bullish += 1;
        } else if BEARISH_TERMS.iter().any(|t| title.contains(t)) {
            bearish += 1;
        }
    }
    (bullish, bearish)
}

fn signal_band(score: i32) -> (Signal, &'static str) {
    if score >= 3 {
        (Signal::StrongBuy, "15-20% of portfolio")
    } else if score >= 1 {
        (Signal::Buy, "10-15% of portfolio")
    } else if score <= -3 {
        (Signal::StrongSell, "0-5% of portfolio")
    } else if score <= -1 {
        (Signal::Sell, "5-10% of portfolio")
    } else {
        (Signal::Hold, "maintain current position")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Sentiment};
    use chrono::Utc;

    fn snapshot(change: Decimal, market_cap: Decimal, volume: Decimal) -> MarketSnapshot {
        MarketSnapshot {
            symbol: "TEST".into(),
            price_usd: dec!(100),
            price_jpy: dec!(15000),
            market_cap,
            volume_24h: volume,
            change_24h: change,
            fetched_at: Utc::now(),
        }
    }

    fn headline(title: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            url: String::new(),
            source: "test.example".into(),
            published: Utc::now(),
            summary: String::new(),
            categories: vec![Category::Market],
            sentiment: Sentiment::Neutral,
            sentiment_score: 0,
        }
    }

    #[test]
    fn strong_buy_needs_all_factors_aligned() {
        let cap = dec!(200_000_000_000);
        let snap = snapshot(dec!(6.0), cap, cap * dec!(0.2));
        let news = vec![headline("Bitcoin surge continues"), headline("quiet day")];

        let rec = RecommendationEngine::new().combine(&snap, &news, &[]);
        assert_eq!(rec.score, 4); // +2 momentum, +1 volume, +1 news
        assert_eq!(rec.signal, Signal::StrongBuy);
        assert_eq!(rec.factors.len(), 3);
    }

    #[test]
    fn bearish_news_and_decline_sell_off() {
        let cap = dec!(50_000_000_000);
        let snap = snapshot(dec!(-6.0), cap, cap * dec!(0.01));
        let news = vec![headline("crash wipes out gains"), headline("弱気相場が続く")];

        let rec = RecommendationEngine::new().combine(&snap, &news, &[]);
        assert_eq!(rec.score, -3); // -2 momentum, 0 volume, -1 news
        assert_eq!(rec.signal, Signal::StrongSell);
    }

    #[test]
    fn stable_market_holds() {
        let cap = dec!(50_000_000_000);
        let snap = snapshot(dec!(0.5), cap, cap * dec!(0.05));
        let rec = RecommendationEngine::new().combine(&snap, &[], &[]);

        assert_eq!(rec.score, 0);
        assert_eq!(rec.signal, Signal::Hold);
        assert_eq!(rec.position_size_hint, "maintain current position");
    }

    #[test]
    fn recount_only_scans_recent_items() {
        // Five neutral headlines ahead of a bullish sixth
        let mut news: Vec<NewsItem> = (0..5).map(|i| headline(&format!("update {i}"))).collect();
        news.push(headline("massive surge incoming"));

        let (bullish, bearish) = recount_headlines(&news);
        assert_eq!((bullish, bearish), (0, 0));
    }

    #[test]
    fn japanese_terms_count_in_the_recount() {
        let news = vec![headline("ビットコイン急騰で市場活況")];
        let (bullish, bearish) = recount_headlines(&news);
        assert_eq!((bullish, bearish), (1, 0));
    }

    #[test]
    fn stop_loss_scales_with_the_move() {
        let cap = dec!(50_000_000_000);
        let snap = snapshot(dec!(-4.2), cap, cap * dec!(0.05));
        let rec = RecommendationEngine::new().combine(&snap, &[], &[]);
        assert_eq!(rec.stop_loss_pct, dec!(6.3));
    }

    #[test]
    fn identical_inputs_give_identical_recommendations() {
        let cap = dec!(200_000_000_000);
        let snap = snapshot(dec!(3.0), cap, cap * dec!(0.15));
        let news = vec![headline("rally extends"), headline("steady trading")];
        let engine = RecommendationEngine::new();

        let first = engine.combine(&snap, &news, &[]);
        let second = engine.combine(&snap, &news, &[]);
        assert_eq!(first.score, second.score);
        assert_eq!(first.signal, second.signal);
        assert_eq!(first.factors, second.factors);
        assert_eq!(first.stop_loss_pct, second.stop_loss_pct);
    }
}
