//! News Aggregation
//!
//! Concurrent multi-feed aggregation with per-item classification and
//! optional AI enrichment. One broken feed must never block news
//! availability: source failures are absorbed and logged.

pub mod article;
pub mod classify;
pub mod feed;

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use futures::StreamExt;

use crate::config::AnalystConfig;
use crate::model::NewsItem;
use crate::translate::{self, SummarizeTranslate, TranslatedNews};
use article::ArticleFetcher;
use feed::{FeedEntry, FeedSource, RssFeedSource};

/// Concurrent multi-feed news aggregator.
///
/// `fetch_news` never fails: it returns whatever the surviving sources
/// produced, newest first.
pub struct FeedAggregator {
    sources: Vec<Arc<dyn FeedSource>>,
    translator: Option<Arc<dyn SummarizeTranslate>>,
    articles: Option<Arc<dyn ArticleFetcher>>,

    /// Entries kept per source, to guarantee source diversity
    per_source_cap: usize,

    /// Bounded worker pool size, independent of source count
    worker_cap: usize,
}

impl FeedAggregator {
    pub fn new(sources: Vec<Arc<dyn FeedSource>>, per_source_cap: usize, worker_cap: usize) -> Self {
        Self {
            sources,
            translator: None,
            articles: None,
            per_source_cap,
            worker_cap: worker_cap.max(1),
        }
    }

    /// Build RSS sources from the configured feed URLs
    pub fn from_config(config: &AnalystConfig) -> Self {
        let sources = config
            .feed_urls
            .iter()
            .map(|url| {
                Arc::new(RssFeedSource::new(url.clone(), config.feed_timeout))
                    as Arc<dyn FeedSource>
            })
            .collect();
        Self::new(sources, config.per_source_cap, config.worker_cap)
    }

    /// Attach the optional AI summarize/translate capability
    pub fn with_translator(mut self, translator: Arc<dyn SummarizeTranslate>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Attach the optional article-body fetcher (feeds the AI path only)
    pub fn with_article_fetcher(mut self, articles: Arc<dyn ArticleFetcher>) -> Self {
        self.articles = Some(articles);
        self
    }

    /// Fetch, classify, and enrich recent news across all sources.
    ///
    /// Always returns 0..limit items, newest first. With no sources
    /// configured at all, a small fixed set of illustrative items is
    /// returned so downstream scoring always has input.
    pub async fn fetch_news(&self, limit: usize) -> Vec<NewsItem> {
        if self.sources.is_empty() {
            tracing::warn!("no feed sources configured, returning sample news");
            return sample_news(limit);
        }

        let mut items: Vec<NewsItem> = futures::stream::iter(self.sources.iter())
            .map(|source| self.collect_source(Arc::clone(source)))
            .buffer_unordered(self.worker_cap)
            .collect::<Vec<Vec<NewsItem>>>()
            .await
            .into_iter()
            .flatten()
            .collect();

        items.sort_by(|a, b| b.published.cmp(&a.published));
        items.truncate(limit);
        items
    }

    /// Fetch and enrich one source. Failures are swallowed here so they
    /// never propagate into the aggregate call.
    async fn collect_source(&self, source: Arc<dyn FeedSource>) -> Vec<NewsItem> {
        let entries = match source.fetch().await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(source = source.name(), error = %err, "feed source failed");
                return Vec::new();
            }
        };

        let mut items = Vec::new();
        for entry in entries.into_iter().take(self.per_source_cap) {
            items.push(self.enrich_entry(source.name(), entry).await);
        }
        tracing::info!(source = source.name(), count = items.len(), "parsed feed source");
        items
    }

    /// Build a complete, immutable news item from a raw feed entry:
    /// derived fields are populated here, never patched afterward.
    async fn enrich_entry(&self, source: &str, entry: FeedEntry) -> NewsItem {
        let published = entry.published.unwrap_or_else(Utc::now);
        let full_text = format!("{} {}", entry.title, entry.summary);

        let categories = classify::categorize(&full_text);
        let (sentiment, sentiment_score) = classify::sentiment(&full_text);

        let translated = self.summarize(&entry.title, &entry.summary, &entry.link).await;
        let (title, summary) = if translated.applied {
            (translated.title, translated.summary)
        } else {
            (entry.title, entry.summary)
        };

        NewsItem {
            title,
            url: entry.link,
            source: source.to_string(),
            published,
            summary,
            categories,
            sentiment,
            sentiment_score,
        }
    }

    /// AI summarize/translate when the capability is present and
    /// working; the deterministic keyword fallback otherwise.
    async fn summarize(&self, title: &str, summary: &str, link: &str) -> TranslatedNews {
        let Some(translator) = &self.translator else {
            return translate::keyword_fallback(title, summary);
        };

        let body = match &self.articles {
            Some(articles) if !link.is_empty() => {
                let text = articles.fetch_text(link).await;
                if text.is_empty() { None } else { Some(text) }
            }
            _ => None,
        };

        match translator.process(title, summary, body.as_deref()).await {
            Ok(translated) => translated,
            Err(err) => {
                tracing::warn!(
                    capability = translator.name(),
                    error = %err,
                    "translation failed, using keyword fallback"
                );
                translate::keyword_fallback(title, summary)
            }
        }
    }
}

/// Fixed illustrative items served when the feed capability is
/// entirely unavailable
fn sample_news(limit: usize) -> Vec<NewsItem> {
    let samples = [
        (
            "Bitcoin価格が上昇傾向、機関投資家の関心高まる",
            "https://example.com/bitcoin-institutional-interest",
            "Sample Crypto News",
            2,
            "機関投資家のビットコインへの関心が高まっており、価格上昇要因となっている",
        ),
        (
            "Ethereum 2.0アップデートが順調に進行",
            "https://example.com/ethereum-upgrade",
            "Sample Tech News",
            4,
            "Ethereum 2.0のアップグレードが計画通り進行し、ステーキング報酬が安定している",
        ),
        (
            "DeFiプロトコルの総ロック資産価値が増加",
            "https://example.com/defi-tvl-increase",
            "Sample DeFi News",
            6,
            "分散型金融プロトコルの総ロック資産価値が過去最高水準に達している",
        ),
    ];

    samples
        .into_iter()
        .take(limit)
        .map(|(title, url, source, hours_ago, summary)| {
            let full_text = format!("{title} {summary}");
            let (sentiment, sentiment_score) = classify::sentiment(&full_text);
            NewsItem {
                title: title.to_string(),
                url: url.to_string(),
                source: source.to_string(),
                published: Utc::now() - ChronoDuration::hours(hours_ago),
                summary: summary.to_string(),
                categories: classify::categorize(&full_text),
                sentiment,
                sentiment_score,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AnalystError, Result};
    use async_trait::async_trait;
    use chrono::{DateTime, Duration as ChronoDuration};

    struct StaticSource {
        name: String,
        count: usize,
        base: DateTime<Utc>,
    }

    impl StaticSource {
        fn new(name: &str, count: usize, base: DateTime<Utc>) -> Arc<dyn FeedSource> {
            Arc::new(Self {
                name: name.to_string(),
                count,
                base,
            })
        }
    }

    #[async_trait]
    impl FeedSource for StaticSource {
        async fn fetch(&self) -> Result<Vec<FeedEntry>> {
            Ok((0..self.count)
                .map(|i| FeedEntry {
                    title: format!("{} headline {}", self.name, i),
                    summary: "Markets moved today. Analysts commented. More follows.".into(),
                    link: format!("https://{}/article/{}", self.name, i),
                    published: Some(self.base - ChronoDuration::minutes(i as i64)),
                })
                .collect())
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl FeedSource for BrokenSource {
        async fn fetch(&self) -> Result<Vec<FeedEntry>> {
            Err(AnalystError::Feed("timed out".into()))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    struct FailingTranslator;

    #[async_trait]
    impl SummarizeTranslate for FailingTranslator {
        async fn process(
            &self,
            _title: &str,
            _summary: &str,
            _full_text: Option<&str>,
        ) -> Result<TranslatedNews> {
            Err(AnalystError::Capability("model offline".into()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn failed_source_contributes_zero_items() {
        let now = Utc::now();
        let aggregator = FeedAggregator::new(
            vec![
                StaticSource::new("alpha.example", 15, now),
                Arc::new(BrokenSource),
                StaticSource::new("gamma.example", 15, now),
            ],
            15,
            10,
        );

        let items = aggregator.fetch_news(40).await;
        assert_eq!(items.len(), 30);
        assert!(items.iter().all(|item| item.source != "broken"));
    }

    #[tokio::test]
    async fn merged_items_are_sorted_newest_first_and_truncated() {
        let now = Utc::now();
        let aggregator = FeedAggregator::new(
            vec![
                StaticSource::new("alpha.example", 10, now),
                StaticSource::new("gamma.example", 10, now - ChronoDuration::hours(1)),
            ],
            15,
            10,
        );

        let items = aggregator.fetch_news(5).await;
        assert_eq!(items.len(), 5);
        assert!(items.windows(2).all(|w| w[0].published >= w[1].published));
        // All five newest come from the fresher source
        assert!(items.iter().all(|item| item.source == "alpha.example"));
    }

    #[tokio::test]
    async fn per_source_cap_bounds_each_feed() {
        let aggregator =
            FeedAggregator::new(vec![StaticSource::new("alpha.example", 40, Utc::now())], 15, 10);

        let items = aggregator.fetch_news(100).await;
        assert_eq!(items.len(), 15);
    }

    #[tokio::test]
    async fn no_sources_yields_sample_items() {
        let aggregator = FeedAggregator::new(Vec::new(), 15, 10);
        let items = aggregator.fetch_news(20).await;
        assert!(!items.is_empty());
        assert!(items.len() <= 3);
        // Derived fields are populated at construction
        assert!(items.iter().all(|item| !item.categories.is_empty()));
    }

    #[tokio::test]
    async fn missing_timestamp_defaults_to_now() {
        struct UndatedSource;

        #[async_trait]
        impl FeedSource for UndatedSource {
            async fn fetch(&self) -> Result<Vec<FeedEntry>> {
                Ok(vec![FeedEntry {
                    title: "Undated headline".into(),
                    summary: String::new(),
                    link: String::new(),
                    published: None,
                }])
            }

            fn name(&self) -> &str {
                "undated.example"
            }
        }

        let before = Utc::now();
        let aggregator = FeedAggregator::new(vec![Arc::new(UndatedSource)], 15, 10);
        let items = aggregator.fetch_news(5).await;
        assert_eq!(items.len(), 1);
        assert!(items[0].published >= before);
    }

    #[tokio::test]
    async fn translator_error_falls_back_to_keyword_substitution() {
        struct BullishSource;

        #[async_trait]
        impl FeedSource for BullishSource {
            async fn fetch(&self) -> Result<Vec<FeedEntry>> {
                Ok(vec![FeedEntry {
                    title: "Bitcoin surge continues".into(),
                    summary: "The rally extended overnight.".into(),
                    link: "https://bull.example/1".into(),
                    published: Some(Utc::now()),
                }])
            }

            fn name(&self) -> &str {
                "bull.example"
            }
        }

        let aggregator = FeedAggregator::new(vec![Arc::new(BullishSource)], 15, 10)
            .with_translator(Arc::new(FailingTranslator));

        let items = aggregator.fetch_news(5).await;
        assert_eq!(items.len(), 1);
        // Keyword fallback translated the matched terms
        assert_eq!(items[0].title, "ビットコイン 急騰 continues");
    }

    #[tokio::test]
    async fn classification_happens_at_construction() {
        let now = Utc::now();
        let aggregator =
            FeedAggregator::new(vec![StaticSource::new("alpha.example", 3, now)], 15, 10);

        let items = aggregator.fetch_news(10).await;
        for item in items {
            assert!(!item.categories.is_empty());
        }
    }
}
