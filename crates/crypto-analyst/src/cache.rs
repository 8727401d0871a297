//! Rate-Limited Cache
//!
//! Time-boxed cache with a single global throttle for live fetches.
//! All external price traffic goes through one instance, so one stamp
//! serializes the whole budget rather than one per key.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::{AnalystError, Result};

/// A cached value and the moment it was stored
#[derive(Clone, Debug)]
struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
}

#[derive(Debug)]
struct CacheState<T> {
    entries: HashMap<String, CacheEntry<T>>,
    /// Timestamp of the last live fetch, shared across all keys
    last_call: Option<Instant>,
}

/// Time-boxed cache plus minimum-interval throttle.
///
/// The entry map and the throttle stamp are one shared mutable resource;
/// the mutex is held across the fetch so concurrent callers cannot
/// interleave a stale read with a write, race the stamp, or issue
/// duplicate fetches for the same key.
#[derive(Debug)]
pub struct RateLimitedCache<T> {
    state: Mutex<CacheState<T>>,
    ttl: Duration,
    min_interval: Duration,
}

impl<T: Clone> RateLimitedCache<T> {
    pub fn new(ttl: Duration, min_interval: Duration) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                last_call: None,
            }),
            ttl,
            min_interval,
        }
    }

    /// Return the cached value for `key`, or run `fetch` to refresh it.
    ///
    /// The returned flag is true when the value is an expired entry
    /// served because the live fetch failed (staleness is preferred to
    /// total failure). [`AnalystError::NotFound`] is the exception: the
    /// upstream disowned the key, so the expired entry is evicted and
    /// the error propagates. A fresh cache hit performs no fetch and no
    /// throttle wait.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<(T, bool)>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut state = self.state.lock().await;

        if let Some(entry) = state.entries.get(key) {
            if entry.stored_at.elapsed() < self.ttl {
                tracing::debug!(key, "returning cached value");
                return Ok((entry.value.clone(), false));
            }
        }

        if let Some(last_call) = state.last_call {
            let since_last = last_call.elapsed();
            if since_last < self.min_interval {
                let wait = self.min_interval - since_last;
                tracing::debug!(key, wait_ms = wait.as_millis() as u64, "throttling fetch");
                tokio::time::sleep(wait).await;
            }
        }

        state.last_call = Some(Instant::now());

        match fetch().await {
            Ok(value) => {
                state.entries.insert(
                    key.to_string(),
                    CacheEntry {
                        value: value.clone(),
                        stored_at: Instant::now(),
                    },
                );
                Ok((value, false))
            }
            Err(err) => {
                // An upstream that answered "no such key" invalidates
                // the entry; only transport-level failures fall back
                if matches!(err, AnalystError::NotFound(_)) {
                    state.entries.remove(key);
                    return Err(err);
                }
                if let Some(entry) = state.entries.get(key) {
                    tracing::warn!(key, error = %err, "fetch failed, returning expired entry");
                    return Ok((entry.value.clone(), true));
                }
                Err(err)
            }
        }
    }
}
