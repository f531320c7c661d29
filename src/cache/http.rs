//! HTTP page fetcher

use std::time::Duration;

use crate::cache::PageFetcher;
use crate::error::{ModsyncError, Result, fetch};

const USER_AGENT: &str = concat!("modsync/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP(S) fetcher with connect/read/write timeouts
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();
        Self { agent }
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        match self.agent.get(url).set("User-Agent", USER_AGENT).call() {
            Ok(response) => response
                .into_string()
                .map_err(|e| fetch::request_failed(url, format!("reading body: {e}"))),
            Err(ureq::Error::Status(status, _)) => Err(ModsyncError::BadStatus {
                url: url.to_string(),
                status,
            }),
            Err(e) => Err(fetch::request_failed(url, e.to_string())),
        }
    }
}
