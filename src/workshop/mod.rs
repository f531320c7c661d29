//! Steam Workshop catalog adapter
//!
//! Turns workshop item pages into [`ItemDetail`]s and dependency lists.
//! Pages are read through the run's [`FetchCache`], so the detail and the
//! dependency lookup of one item share a single download.

pub mod page;
pub mod url;

use crate::cache::FetchCache;
use crate::domain::{ItemDetail, ItemId};
use crate::error::{Result, fetch};
use crate::resolver::CatalogSource;

/// Catalog backed by scraped workshop pages
pub struct WorkshopCatalog<'a> {
    cache: &'a FetchCache,
}

impl<'a> WorkshopCatalog<'a> {
    pub fn new(cache: &'a FetchCache) -> Self {
        Self { cache }
    }
}

impl CatalogSource for WorkshopCatalog<'_> {
    fn fetch_detail(&self, item: &ItemId) -> Result<ItemDetail> {
        let html = self.cache.get(&url::url_from_id(item))?;
        let title = page::title(&html)
            .ok_or_else(|| fetch::page_parse_failed(item.as_str(), "missing item title"))?;
        let updated = page::updated_marker(&html)
            .ok_or_else(|| fetch::page_parse_failed(item.as_str(), "missing update date"))?;
        Ok(ItemDetail::new(title, updated))
    }

    fn fetch_dependencies(&self, item: &ItemId) -> Result<Vec<ItemId>> {
        let html = self.cache.get(&url::url_from_id(item))?;
        page::required_item_links(&html)
            .into_iter()
            .map(|href| {
                url::id_from_url(&href).ok_or_else(|| {
                    fetch::page_parse_failed(
                        item.as_str(),
                        format!("required item link without an id: {href}"),
                    )
                })
            })
            .collect()
    }
}
