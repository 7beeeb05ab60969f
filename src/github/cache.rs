// src/github/cache.rs
// =============================================================================
// Bounded in-memory cache of finished repository summaries.
//
// Keyed by the raw (trimmed) query string. Only resolved summaries are
// stored: the fetcher looks the key up, does the network work on a miss,
// and then puts the finished value. Failed fetches are never stored.
//
// moka handles the synchronisation and the size-bounded eviction, so the
// cache can be shared between query tasks through a plain clone.
// =============================================================================

use std::sync::Arc;

use moka::future::Cache;

use crate::github::RepoSummary;

#[derive(Clone)]
pub struct SummaryCache {
    inner: Cache<String, Arc<RepoSummary>>,
}

impl SummaryCache {
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::builder().max_capacity(max_capacity).build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Arc<RepoSummary>> {
        self.inner.get(key).await
    }

    pub async fn put(&self, key: String, summary: Arc<RepoSummary>) {
        self.inner.insert(key, summary).await;
    }

    #[cfg(test)]
    pub async fn len(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}
