//! Analyst Configuration
//!
//! Static configuration: endpoints, feed sources, the symbol lookup
//! table, and the cache/throttle/pool tunables.

use std::collections::HashMap;
use std::time::Duration;

/// Configuration for the analyst pipeline
#[derive(Clone, Debug)]
pub struct AnalystConfig {
    /// CoinGecko API base URL
    pub coingecko_base: String,

    /// RSS feed URLs to aggregate
    pub feed_urls: Vec<String>,

    /// Symbol -> CoinGecko identifier table
    pub symbols: HashMap<String, String>,

    /// How long a price snapshot stays fresh
    pub cache_ttl: Duration,

    /// Minimum interval between live price API calls (global throttle)
    pub min_api_interval: Duration,

    /// Timeout for the price endpoint call
    pub price_timeout: Duration,

    /// Timeout for a single feed source fetch
    pub feed_timeout: Duration,

    /// Entries kept per feed source, to guarantee source diversity
    pub per_source_cap: usize,

    /// Concurrent feed fetch tasks, independent of source count
    pub worker_cap: usize,

    /// Default number of news items returned by an aggregation call
    pub max_news_items: usize,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            coingecko_base: "https://api.coingecko.com/api/v3".into(),
            feed_urls: vec![
                "https://cointelegraph.com/rss".into(),
                "https://bitcoinist.com/feed".into(),
                "https://newsbtc.com/feed".into(),
                "https://cryptopotato.com/feed".into(),
                "https://coindesk.com/arc/outboundfeeds/rss/".into(),
                "https://decrypt.co/feed".into(),
            ],
            symbols: default_symbols(),
            cache_ttl: Duration::from_secs(60),
            min_api_interval: Duration::from_secs(2),
            price_timeout: Duration::from_secs(10),
            feed_timeout: Duration::from_secs(5),
            per_source_cap: 15,
            worker_cap: 10,
            max_news_items: 20,
        }
    }
}

impl AnalystConfig {
    /// Read overridable settings from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base) = std::env::var("COINGECKO_API_BASE") {
            config.coingecko_base = base;
        }
        if let Ok(ttl) = std::env::var("PRICE_CACHE_TTL_SECS") {
            if let Ok(secs) = ttl.parse() {
                config.cache_ttl = Duration::from_secs(secs);
            }
        }
        if let Ok(interval) = std::env::var("MIN_API_INTERVAL_SECS") {
            if let Ok(secs) = interval.parse() {
                config.min_api_interval = Duration::from_secs(secs);
            }
        }

        config
    }

    /// Resolve a ticker symbol to its CoinGecko identifier.
    ///
    /// Lookups are case-insensitive; a CoinGecko id passed directly
    /// (e.g. "bitcoin") also resolves.
    pub fn coingecko_id(&self, symbol: &str) -> Option<&str> {
        let upper = symbol.to_uppercase();
        if let Some(id) = self.symbols.get(&upper) {
            return Some(id);
        }
        let lower = symbol.to_lowercase();
        self.symbols
            .values()
            .find(|id| **id == lower)
            .map(String::as_str)
    }

    /// Supported ticker symbols, sorted
    pub fn supported_symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.symbols.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }
}

fn default_symbols() -> HashMap<String, String> {
    [
        ("BTC", "bitcoin"),
        ("ETH", "ethereum"),
        ("ADA", "cardano"),
        ("MATIC", "polygon"),
        ("SOL", "solana"),
        ("LINK", "chainlink"),
        ("DOT", "polkadot"),
        ("AVAX", "avalanche-2"),
        ("UNI", "uniswap"),
        ("AAVE", "aave"),
        ("XRP", "ripple"),
        ("LTC", "litecoin"),
        ("BCH", "bitcoin-cash"),
        ("BNB", "binancecoin"),
        ("DOGE", "dogecoin"),
    ]
    .into_iter()
    .map(|(symbol, id)| (symbol.to_string(), id.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_lookup_is_case_insensitive() {
        let config = AnalystConfig::default();
        assert_eq!(config.coingecko_id("btc"), Some("bitcoin"));
        assert_eq!(config.coingecko_id("Btc"), Some("bitcoin"));
        assert_eq!(config.coingecko_id("AVAX"), Some("avalanche-2"));
    }

    #[test]
    fn coingecko_id_passes_through() {
        let config = AnalystConfig::default();
        assert_eq!(config.coingecko_id("bitcoin"), Some("bitcoin"));
    }

    #[test]
    fn unknown_symbol_resolves_to_none() {
        let config = AnalystConfig::default();
        assert_eq!(config.coingecko_id("doesnotexist"), None);
    }
}
