//! Market Data
//!
//! Price endpoint abstraction and the cached, rate-limited price source.

mod coingecko;
mod mock;

pub use coingecko::CoinGeckoClient;
pub use mock::MockPriceEndpoint;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cache::RateLimitedCache;
use crate::config::AnalystConfig;
use crate::error::{AnalystError, Result};
use crate::model::MarketSnapshot;

/// Raw simple-price payload for one asset, as the endpoint returns it.
///
/// Fields the endpoint omits default to zero, matching how the report
/// treats missing market data.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PricePayload {
    #[serde(default)]
    pub usd: Decimal,
    #[serde(default)]
    pub jpy: Decimal,
    #[serde(default)]
    pub usd_market_cap: Decimal,
    #[serde(default)]
    pub usd_24h_vol: Decimal,
    #[serde(default)]
    pub usd_24h_change: Decimal,
}

/// Price endpoint trait (Strategy pattern)
///
/// Implement this per provider: CoinGecko, CoinMarketCap, a mock, etc.
#[async_trait]
pub trait PriceEndpoint: Send + Sync {
    /// Fetch the simple-price payload for one provider identifier.
    ///
    /// An identifier the provider does not know maps to
    /// [`AnalystError::NotFound`].
    async fn simple_price(&self, id: &str) -> Result<PricePayload>;

    /// Endpoint name, for logging
    fn name(&self) -> &str;
}

/// Cached, throttled market snapshot source.
///
/// All live price traffic funnels through one [`RateLimitedCache`], so
/// a single timestamp serializes the external call budget.
pub struct PriceSource {
    endpoint: Arc<dyn PriceEndpoint>,
    cache: RateLimitedCache<MarketSnapshot>,
    config: AnalystConfig,
}

impl PriceSource {
    pub fn new(endpoint: Arc<dyn PriceEndpoint>, config: AnalystConfig) -> Self {
        let cache = RateLimitedCache::new(config.cache_ttl, config.min_api_interval);
        Self {
            endpoint,
            cache,
            config,
        }
    }

    /// Fetch a market snapshot for a ticker symbol (case-insensitive).
    ///
    /// A fresh cached snapshot is returned without touching the
    /// endpoint; an expired one is served only when the live fetch
    /// fails for transport reasons. An endpoint answering
    /// [`AnalystError::NotFound`] surfaces it even when an expired
    /// snapshot exists (a delisted asset must not keep trading on old
    /// data). Any other failure without a cached snapshot surfaces as
    /// [`AnalystError::UpstreamUnavailable`].
    pub async fn fetch(&self, symbol: &str) -> Result<MarketSnapshot> {
        let id = self
            .config
            .coingecko_id(symbol)
            .ok_or_else(|| AnalystError::NotFound(symbol.to_string()))?
            .to_string();
        let display_symbol = symbol.to_uppercase();

        let endpoint = Arc::clone(&self.endpoint);
        let result = self
            .cache
            .get_or_fetch(&id, || {
                let id = id.clone();
                let symbol = display_symbol.clone();
                async move {
                    tracing::info!(%symbol, endpoint = endpoint.name(), "fetching price");
                    let payload = endpoint.simple_price(&id).await?;
                    Ok(MarketSnapshot {
                        symbol,
                        price_usd: payload.usd,
                        price_jpy: payload.jpy,
                        market_cap: payload.usd_market_cap,
                        volume_24h: payload.usd_24h_vol,
                        change_24h: payload.usd_24h_change,
                        fetched_at: Utc::now(),
                    })
                }
            })
            .await;

        match result {
            Ok((snapshot, stale)) => {
                if stale {
                    tracing::warn!(symbol = %display_symbol, "serving stale market snapshot");
                }
                Ok(snapshot)
            }
            Err(AnalystError::NotFound(_)) => {
                Err(AnalystError::NotFound(display_symbol))
            }
            Err(err) => Err(AnalystError::UpstreamUnavailable(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingEndpoint {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PriceEndpoint for CountingEndpoint {
        async fn simple_price(&self, _id: &str) -> Result<PricePayload> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PricePayload {
                usd: dec!(97500),
                jpy: dec!(14600000),
                usd_market_cap: dec!(1_900_000_000_000),
                usd_24h_vol: dec!(38_000_000_000),
                usd_24h_change: dec!(2.5),
            })
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    struct DownEndpoint;

    #[async_trait]
    impl PriceEndpoint for DownEndpoint {
        async fn simple_price(&self, _id: &str) -> Result<PricePayload> {
            Err(AnalystError::UpstreamUnavailable("connection refused".into()))
        }

        fn name(&self) -> &str {
            "down"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_fetch_within_ttl_hits_cache() {
        let endpoint = Arc::new(CountingEndpoint {
            calls: AtomicUsize::new(0),
        });
        let source: PriceSource =
            PriceSource::new(Arc::clone(&endpoint) as Arc<dyn PriceEndpoint>, AnalystConfig::default());

        let first = source.fetch("btc").await.unwrap();
        let second = source.fetch("BTC").await.unwrap();
        assert_eq!(first.price_usd, second.price_usd);
        assert_eq!(endpoint.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_symbol_is_not_found() {
        let source = PriceSource::new(Arc::new(DownEndpoint), AnalystConfig::default());
        let result = source.fetch("doesnotexist").await;
        assert!(matches!(result, Err(AnalystError::NotFound(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn endpoint_failure_without_cache_is_upstream_unavailable() {
        let source = PriceSource::new(Arc::new(DownEndpoint), AnalystConfig::default());
        let result = source.fetch("BTC").await;
        assert!(matches!(result, Err(AnalystError::UpstreamUnavailable(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn delisted_asset_is_not_served_from_expired_cache() {
        struct DelistingEndpoint {
            calls: AtomicUsize,
        }

        #[async_trait]
        impl PriceEndpoint for DelistingEndpoint {
            async fn simple_price(&self, id: &str) -> Result<PricePayload> {
                // First call succeeds; the asset disappears afterwards
                if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Ok(PricePayload {
                        usd: dec!(0.38),
                        ..PricePayload::default()
                    })
                } else {
                    Err(AnalystError::NotFound(id.to_string()))
                }
            }

            fn name(&self) -> &str {
                "delisting"
            }
        }

        let source = PriceSource::new(
            Arc::new(DelistingEndpoint {
                calls: AtomicUsize::new(0),
            }),
            AnalystConfig::default(),
        );

        source.fetch("DOGE").await.unwrap();
        tokio::time::advance(std::time::Duration::from_secs(61)).await;

        let result = source.fetch("DOGE").await;
        assert!(matches!(result, Err(AnalystError::NotFound(symbol)) if symbol == "DOGE"));
    }

    #[tokio::test(start_paused = true)]
    async fn snapshot_symbol_is_uppercased() {
        let endpoint = Arc::new(CountingEndpoint {
            calls: AtomicUsize::new(0),
        });
        let source = PriceSource::new(endpoint, AnalystConfig::default());
        let snapshot = source.fetch("eth").await.unwrap();
        assert_eq!(snapshot.symbol, "ETH");
    }
}
