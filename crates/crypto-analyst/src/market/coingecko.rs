//! CoinGecko Price Endpoint
//!
//! One REST call per lookup against the public simple-price endpoint.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use super::{PriceEndpoint, PricePayload};
use crate::error::{AnalystError, Result};

/// CoinGecko simple-price client
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PriceEndpoint for CoinGeckoClient {
    async fn simple_price(&self, id: &str) -> Result<PricePayload> {
        let url = format!("{}/simple/price", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("ids", id),
                ("vs_currencies", "usd,jpy"),
                ("include_market_cap", "true"),
                ("include_24hr_vol", "true"),
                ("include_24hr_change", "true"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let payload: HashMap<String, PricePayload> = response.json().await?;

        // CoinGecko answers 200 with an empty object for unknown ids
        payload
            .get(id)
            .cloned()
            .ok_or_else(|| AnalystError::NotFound(id.to_string()))
    }

    fn name(&self) -> &str {
        "CoinGecko"
    }
}
