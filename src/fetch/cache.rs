use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::debug;

use super::fetcher::Fetch;

/// Snapshot of one cache slot. `data` and `error` can coexist: a failed
/// revalidation keeps the stale data visible alongside the error.
#[derive(Debug, Clone, Default)]
pub struct CacheEntry {
    pub data: Option<Value>,
    pub error: Option<String>,
    pub is_validating: bool,
}

/// Stale-while-revalidate cache keyed by exact request-URL string.
///
/// `get(Some(key))` returns the current entry immediately and starts a
/// background fetch the first time a key is seen; callers poll `get` again
/// to observe the settled state. A `None` key means "do not fetch" and
/// always yields an idle empty entry. Revalidation happens only through
/// explicit `revalidate` calls; there are no implicit refresh triggers.
/// Distinct keys fetch independently, with no ordering between them.
pub struct SwrCache {
    fetcher: Arc<dyn Fetch>,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl SwrCache {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Arc<Self> {
        Arc::new(Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
        })
    }

    pub fn get(self: &Arc<Self>, key: Option<&str>) -> CacheEntry {
        let Some(key) = key else {
            return CacheEntry::default();
        };

        let mut entries = self.entries.lock().unwrap();
        if let Some(entry) = entries.get(key) {
            return entry.clone();
        }

        let entry = CacheEntry {
            is_validating: true,
            ..CacheEntry::default()
        };
        entries.insert(key.to_string(), entry.clone());
        drop(entries);

        debug!(key = %key, "cache miss, fetching");
        let cache = Arc::clone(self);
        let key = key.to_string();
        tokio::spawn(async move {
            cache.run_fetch(&key).await;
        });

        entry
    }

    /// Refetch `key`, keeping any stale data visible while the fetch is in
    /// flight. Completes when the entry has settled.
    pub async fn revalidate(&self, key: &str) {
        {
            let mut entries = self.entries.lock().unwrap();
            let entry = entries.entry(key.to_string()).or_default();
            entry.is_validating = true;
        }
        self.run_fetch(key).await;
    }

    /// Drop the entry so the next `get` refetches from scratch.
    pub fn invalidate(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    async fn run_fetch(&self, key: &str) {
        let result = self.fetcher.fetch(key).await;

        let mut entries = self.entries.lock().unwrap();
        let entry = entries.entry(key.to_string()).or_default();
        entry.is_validating = false;
        match result {
            Ok(data) => {
                entry.data = Some(data);
                entry.error = None;
            }
            Err(err) => {
                debug!(key = %key, error = %err, "fetch failed");
                entry.error = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fetcher::FetchError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Counts fetches and replays a per-key script of responses.
    struct ScriptedFetcher {
        calls: AtomicUsize,
        responses: Mutex<Vec<Result<Value, FetchError>>>,
    }

    impl ScriptedFetcher {
        fn new(responses: Vec<Result<Value, FetchError>>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                responses: Mutex::new(responses),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetch for ScriptedFetcher {
        async fn fetch(&self, _url: &str) -> Result<Value, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                Ok(json!(null))
            } else {
                responses.remove(0)
            }
        }
    }

    async fn settle(cache: &Arc<SwrCache>, key: &str) -> CacheEntry {
        for _ in 0..100 {
            let entry = cache.get(Some(key));
            if !entry.is_validating {
                return entry;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!("cache entry for {} never settled", key);
    }

    #[tokio::test]
    async fn test_none_key_means_no_fetch() {
        let fetcher = ScriptedFetcher::new(vec![]);
        let cache = SwrCache::new(fetcher.clone());

        for _ in 0..5 {
            let entry = cache.get(None);
            assert!(entry.data.is_none());
            assert!(entry.error.is_none());
            assert!(!entry.is_validating);
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_first_get_fetches_once() {
        let fetcher = ScriptedFetcher::new(vec![Ok(json!({"v": 1}))]);
        let cache = SwrCache::new(fetcher.clone());

        let first = cache.get(Some("/api/movies"));
        assert!(first.is_validating);
        assert!(first.data.is_none());

        let settled = settle(&cache, "/api/movies").await;
        assert_eq!(settled.data.unwrap(), json!({"v": 1}));

        // Repeated reads serve the cached entry without refetching.
        for _ in 0..3 {
            cache.get(Some("/api/movies"));
        }
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_revalidate_replaces_data() {
        let fetcher = ScriptedFetcher::new(vec![Ok(json!({"v": 1})), Ok(json!({"v": 2}))]);
        let cache = SwrCache::new(fetcher.clone());

        cache.get(Some("/k"));
        settle(&cache, "/k").await;

        cache.revalidate("/k").await;
        let entry = cache.get(Some("/k"));
        assert_eq!(entry.data.unwrap(), json!({"v": 2}));
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_revalidation_keeps_stale_data() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(json!({"v": 1})),
            Err(FetchError::Status(500)),
        ]);
        let cache = SwrCache::new(fetcher.clone());

        cache.get(Some("/k"));
        settle(&cache, "/k").await;

        cache.revalidate("/k").await;
        let entry = cache.get(Some("/k"));
        assert_eq!(entry.data.unwrap(), json!({"v": 1}));
        assert!(entry.error.unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let fetcher = ScriptedFetcher::new(vec![Ok(json!({"v": 1})), Ok(json!({"v": 2}))]);
        let cache = SwrCache::new(fetcher.clone());

        cache.get(Some("/k"));
        settle(&cache, "/k").await;

        cache.invalidate("/k");
        cache.get(Some("/k"));
        let entry = settle(&cache, "/k").await;
        assert_eq!(entry.data.unwrap(), json!({"v": 2}));
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_distinct_keys_fetch_independently() {
        let fetcher = ScriptedFetcher::new(vec![Ok(json!(1)), Ok(json!(2))]);
        let cache = SwrCache::new(fetcher.clone());

        cache.get(Some("/a"));
        cache.get(Some("/b"));
        settle(&cache, "/a").await;
        settle(&cache, "/b").await;
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_error_state_surfaces() {
        let fetcher = ScriptedFetcher::new(vec![Err(FetchError::Network("refused".into()))]);
        let cache = SwrCache::new(fetcher.clone());

        cache.get(Some("/down"));
        let entry = settle(&cache, "/down").await;
        assert!(entry.data.is_none());
        assert!(entry.error.unwrap().contains("refused"));
    }
}
