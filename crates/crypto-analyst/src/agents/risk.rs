//! Risk Assessment Agent
//!
//! Three independent 1 (low) to 5 (high) sub-scores - volatility,
//! market-cap, liquidity - averaged into an overall band with
//! position-sizing guidance.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::AnalysisAgent;
use crate::error::Result;
use crate::model::{AgentScore, MarketSnapshot, NewsItem, Severity};

pub struct RiskAgent;

/// Volatility sub-score from the absolute 24h change
fn volatility_score(abs_change: Decimal) -> i32 {
    if abs_change > dec!(15) {
        5
    } else if abs_change > dec!(10) {
        4
    } else if abs_change > dec!(5) {
        3
    } else if abs_change > dec!(2) {
        2
    } else {
        1
    }
}

/// Market-cap sub-score: larger caps carry lower risk
fn market_cap_score(market_cap: Decimal) -> i32 {
    if market_cap > dec!(500_000_000_000) {
        1
    } else if market_cap > dec!(100_000_000_000) {
        2
    } else if market_cap > dec!(50_000_000_000) {
        2
    } else if market_cap > dec!(10_000_000_000) {
        3
    } else if market_cap > dec!(1_000_000_000) {
        4
    } else {
        5
    }
}

/// Liquidity sub-score from the volume/market-cap ratio
fn liquidity_score(volume_ratio: Decimal) -> i32 {
    if volume_ratio > dec!(0.30) {
        1
    } else if volume_ratio > dec!(0.10) {
        1
    } else if volume_ratio > dec!(0.05) {
        2
    } else if volume_ratio > dec!(0.01) {
        3
    } else {
        4
    }
}

fn severity_band(overall: Decimal) -> Severity {
    if overall <= dec!(1.5) {
        Severity::Low
    } else if overall <= dec!(2.5) {
        Severity::Moderate
    } else if overall <= dec!(3.5) {
        Severity::Elevated
    } else {
        Severity::High
    }
}

impl AnalysisAgent for RiskAgent {
    fn name(&self) -> &str {
        "Risk Assessment"
    }

    fn analyze(&self, snapshot: &MarketSnapshot, _news: &[NewsItem]) -> Result<AgentScore> {
        let abs_change = snapshot.change_24h.abs();
        let volume_ratio = snapshot.volume_ratio();

        let volatility = volatility_score(abs_change);
        let cap = market_cap_score(snapshot.market_cap);
        let liquidity = liquidity_score(volume_ratio);

        let overall = Decimal::from(volatility + cap + liquidity) / dec!(3);

        // Linear position-management hints from the overall score,
        // truncated like the original banding
        let overall_x3 = (overall * dec!(3)).trunc();
        let max_position = Decimal::ONE.max(dec!(20) - overall_x3);
        let stop_loss = dec!(5).max(overall_x3);
        let max_allocation = dec!(10).max(dec!(50) - (overall * dec!(10)).trunc());

        let tags = vec![
            format!("volatility risk {volatility}/5 ({abs_change:.2}% 24h move)"),
            format!("market-cap risk {cap}/5 (${:.0} cap)", snapshot.market_cap),
            format!(
                "liquidity risk {liquidity}/5 ({:.1}% volume/cap)",
                volume_ratio * dec!(100)
            ),
            format!("max position size: {max_position:.0}% of portfolio"),
            format!("stop loss: {stop_loss:.0}%"),
            format!("max allocation: {max_allocation:.0}%"),
        ];

        Ok(AgentScore {
            agent: self.name().to_string(),
            score: overall.round_dp(2),
            tags,
            severity: severity_band(overall),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn large_cap_liquid_asset_with_moderate_move() {
        let cap = dec!(200_000_000_000);
        let snap = snapshot(dec!(6.0), cap, cap * dec!(0.2));
        let score = RiskAgent.analyze(&snap, &[]).unwrap();

        // abs(6) in the >5 band -> 3; $200B -> 2; ratio 0.2 > 0.10 -> 1
        assert!(score.tags[0].starts_with("volatility risk 3/5"));
        assert!(score.tags[1].starts_with("market-cap risk 2/5"));
        assert!(score.tags[2].starts_with("liquidity risk 1/5"));
        assert_eq!(score.score, dec!(2)); // mean of 3, 2, 1
        assert_eq!(score.severity, Severity::Moderate);
    }

    #[test]
    fn volatility_score_is_monotonic_in_abs_change() {
        let changes = [
            dec!(0),
            dec!(1.9),
            dec!(2.1),
            dec!(5.1),
            dec!(10.1),
            dec!(15.1),
            dec!(40),
        ];
        let scores: Vec<i32> = changes.iter().map(|c| volatility_score(*c)).collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn micro_cap_illiquid_asset_is_high_risk() {
        let snap = snapshot(dec!(20), dec!(500_000_000), dec!(1_000_000));
        let score = RiskAgent.analyze(&snap, &[]).unwrap();

        // 5 + 5 + 4 -> mean 4.67
        assert_eq!(score.score, dec!(4.67));
        assert_eq!(score.severity, Severity::High);
        // max(1, 20 - trunc(4.67 * 3)) = max(1, 20 - 14) = 6
        assert!(score.tags.iter().any(|t| t == "max position size: 6% of portfolio"));
    }

    #[test]
    fn mega_cap_stable_asset_is_low_risk() {
        let cap = dec!(1_900_000_000_000);
        let snap = snapshot(dec!(0.5), cap, cap * dec!(0.15));
        let score = RiskAgent.analyze(&snap, &[]).unwrap();

        // 1 + 1 + 1 -> mean 1
        assert_eq!(score.score, dec!(1));
        assert_eq!(score.severity, Severity::Low);
    }

    #[test]
    fn severity_band_edges() {
        assert_eq!(severity_band(dec!(1.5)), Severity::Low);
        assert_eq!(severity_band(dec!(1.51)), Severity::Moderate);
        assert_eq!(severity_band(dec!(2.5)), Severity::Moderate);
        assert_eq!(severity_band(dec!(3.5)), Severity::Elevated);
        assert_eq!(severity_band(dec!(3.51)), Severity::High);
    }
}
