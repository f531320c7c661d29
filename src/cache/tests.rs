//! Tests for the fetch cache

#![allow(clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::error::{ModsyncError, fetch};

/// Serves fixed pages and counts remote reads per URL
#[derive(Default)]
struct CountingFetcher {
    pages: HashMap<String, String>,
    calls: Mutex<HashMap<String, usize>>,
}

impl CountingFetcher {
    fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }
}

impl PageFetcher for Arc<CountingFetcher> {
    fn fetch(&self, url: &str) -> Result<String> {
        *self
            .calls
            .lock()
            .expect("lock")
            .entry(url.to_string())
            .or_default() += 1;
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| fetch::request_failed(url, "not found"))
    }
}

/// Fails the first `failures` requests, then succeeds
struct FlakyFetcher {
    failures: usize,
    calls: Arc<AtomicUsize>,
}

impl PageFetcher for FlakyFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(ModsyncError::BadStatus {
                url: url.to_string(),
                status: 503,
            })
        } else {
            Ok("ok".to_string())
        }
    }
}

#[test]
fn test_same_url_fetched_once() {
    let fetcher = Arc::new(CountingFetcher::default().with_page("https://a.test/1", "one"));
    let cache = FetchCache::new(Box::new(Arc::clone(&fetcher)));

    for _ in 0..3 {
        assert_eq!(&*cache.get("https://a.test/1").expect("get"), "one");
    }

    let calls = fetcher.calls.lock().expect("lock");
    assert_eq!(calls.get("https://a.test/1"), Some(&1));
    assert_eq!(cache.len(), 1);
    let stats = cache.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 2);
}

#[test]
fn test_distinct_urls_fetched_separately() {
    let fetcher = Arc::new(
        CountingFetcher::default()
            .with_page("https://a.test/1", "one")
            .with_page("https://a.test/2", "two"),
    );
    let cache = FetchCache::new(Box::new(Arc::clone(&fetcher)));

    assert_eq!(&*cache.get("https://a.test/1").expect("get"), "one");
    assert_eq!(&*cache.get("https://a.test/2").expect("get"), "two");
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_failures_are_not_cached() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = FetchCache::new(Box::new(FlakyFetcher {
        failures: 1,
        calls: Arc::clone(&calls),
    }));

    let err = cache.get("https://a.test/flaky").expect_err("first call fails");
    assert!(matches!(err, ModsyncError::BadStatus { status: 503, .. }));
    assert!(cache.is_empty());

    assert_eq!(&*cache.get("https://a.test/flaky").expect("retry"), "ok");
    assert_eq!(&*cache.get("https://a.test/flaky").expect("cached"), "ok");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.stats().failures, 1);
}

#[test]
fn test_cache_is_shareable_across_threads() {
    let fetcher = Arc::new(CountingFetcher::default().with_page("https://a.test/1", "one"));
    let cache = Arc::new(FetchCache::new(Box::new(Arc::clone(&fetcher))));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || cache.get("https://a.test/1").map(|p| p.to_string()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("join").expect("get"), "one");
    }
    assert_eq!(cache.len(), 1);
}
