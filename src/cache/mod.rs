//! Fetch cache for remote pages
//!
//! Every remote read of one run goes through a single [`FetchCache`], so an
//! item referenced by several lines (or reached through several dependency
//! paths) is downloaded exactly once.
//!
//! - Successful responses are kept for the lifetime of the cache
//! - Failures are never cached; asking again retries the request
//! - Nothing is persisted between runs

pub mod http;
pub mod stats;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::Result;

pub use http::HttpFetcher;
pub use stats::FetchStats;

/// Performs the actual remote read behind the cache
pub trait PageFetcher: Send + Sync {
    /// Fetch the body at `url`; non-2xx responses are errors
    fn fetch(&self, url: &str) -> Result<String>;
}

#[derive(Default)]
struct CacheState {
    pages: HashMap<String, Arc<str>>,
    stats: FetchStats,
}

/// Memoizes page bodies by URL for one run
pub struct FetchCache {
    fetcher: Box<dyn PageFetcher>,
    state: Mutex<CacheState>,
}

impl FetchCache {
    pub fn new(fetcher: Box<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Get the body at `url`, reading it remotely only on the first request
    pub fn get(&self, url: &str) -> Result<Arc<str>> {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(page) = state.pages.get(url).cloned() {
                state.stats.hits += 1;
                tracing::trace!(url, "fetch cache hit");
                return Ok(page);
            }
        }

        // The lock is not held during the request; on a race the last writer wins.
        tracing::debug!(url, "fetching");
        let fetched = self.fetcher.fetch(url);

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match fetched {
            Ok(body) => {
                let page: Arc<str> = Arc::from(body);
                state.stats.misses += 1;
                state.pages.insert(url.to_string(), Arc::clone(&page));
                Ok(page)
            }
            Err(e) => {
                state.stats.failures += 1;
                Err(e)
            }
        }
    }

    /// Number of distinct pages held
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pages
            .len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Request counters since the cache was created
    pub fn stats(&self) -> FetchStats {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).stats
    }
}

#[cfg(test)]
mod tests;
