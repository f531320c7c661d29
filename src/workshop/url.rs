//! Workshop item URLs

use crate::domain::ItemId;

/// Base URL of a workshop item page
pub const WORKSHOP_PAGE_URL: &str = "https://steamcommunity.com/workshop/filedetails/";

/// Page URL of the given item
pub fn url_from_id(id: &ItemId) -> String {
    format!("{WORKSHOP_PAGE_URL}?id={}", urlencoding::encode(id.as_str()))
}

/// Item id from the `id` query parameter of a workshop URL
pub fn id_from_url(url: &str) -> Option<ItemId> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != "id" {
            return None;
        }
        let value = urlencoding::decode(value).ok()?;
        let value = value.trim();
        (!value.is_empty()).then(|| ItemId::new(value))
    })
}
