//! Request counters for the fetch cache

/// How the cache answered requests during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Answered from memory
    pub hits: usize,
    /// Read remotely and stored
    pub misses: usize,
    /// Remote reads that failed
    pub failures: usize,
}

impl FetchStats {
    /// Total number of requests made to the cache
    pub fn requests(&self) -> usize {
        self.hits + self.misses + self.failures
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} request(s): {} page(s) fetched, {} cache hit(s), {} failure(s)",
            self.requests(),
            self.misses,
            self.hits,
            self.failures
        )
    }
}
