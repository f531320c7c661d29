//! Command helper utilities

use std::path::Path;

use crate::cache::{FetchCache, HttpFetcher};
use crate::config::{Requirements, Settings, SettingsFile};
use crate::error::Result;

/// Load the settings file, layer the command line on top and resolve
///
/// Precedence is command line / environment, then the settings file, then
/// built-in defaults.
pub fn load_settings(
    config: Option<&Path>,
    overrides: SettingsFile,
    needs: Requirements,
) -> Result<Settings> {
    let file = SettingsFile::load(config)?;
    Settings::resolve(file.merge(overrides), needs)
}

/// Fetch cache shared by every lookup of one run
pub fn fetch_cache(settings: &Settings) -> FetchCache {
    FetchCache::new(Box::new(HttpFetcher::new(settings.http_timeout)))
}

/// Log how well the fetch cache did
pub fn log_cache_stats(cache: &FetchCache) {
    tracing::debug!(pages = cache.len(), "fetch cache: {}", cache.stats().summary());
}
