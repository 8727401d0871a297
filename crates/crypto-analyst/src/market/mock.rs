//! Mock Price Endpoint
//!
//! For testing and demo purposes. Returns realistic static quotes.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{PriceEndpoint, PricePayload};
use crate::error::{AnalystError, Result};

/// Mock price endpoint with static quotes keyed by CoinGecko id
#[derive(Default)]
pub struct MockPriceEndpoint;

impl MockPriceEndpoint {
    pub fn new() -> Self {
        Self
    }

    // (usd, jpy, market_cap, 24h_vol, 24h_change)
    fn quote(id: &str) -> Option<(Decimal, Decimal, Decimal, Decimal, Decimal)> {
        match id {
            "bitcoin" => Some((
                dec!(97500),
                dec!(14_600_000),
                dec!(1_900_000_000_000),
                dec!(38_000_000_000),
                dec!(2.5),
            )),
            "ethereum" => Some((
                dec!(3450),
                dec!(517_000),
                dec!(415_000_000_000),
                dec!(15_000_000_000),
                dec!(1.8),
            )),
            "solana" => Some((
                dec!(195),
                dec!(29_200),
                dec!(92_000_000_000),
                dec!(3_000_000_000),
                dec!(4.2),
            )),
            "cardano" => Some((
                dec!(0.95),
                dec!(142),
                dec!(33_000_000_000),
                dec!(900_000_000),
                dec!(-1.2),
            )),
            "dogecoin" => Some((
                dec!(0.38),
                dec!(57),
                dec!(55_000_000_000),
                dec!(6_500_000_000),
                dec!(12.0),
            )),
            _ => None,
        }
    }
}

#[async_trait]
impl PriceEndpoint for MockPriceEndpoint {
    async fn simple_price(&self, id: &str) -> Result<PricePayload> {
        let (usd, jpy, usd_market_cap, usd_24h_vol, usd_24h_change) =
            Self::quote(id).ok_or_else(|| AnalystError::NotFound(id.to_string()))?;

        Ok(PricePayload {
            usd,
            jpy,
            usd_market_cap,
            usd_24h_vol,
            usd_24h_change,
        })
    }

    fn name(&self) -> &str {
        "MockPriceEndpoint"
    }
}
