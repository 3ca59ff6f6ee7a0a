use common::{ApiResult, LOCATION_SEARCH, LocationOption, decode_search};

use crate::api_client;

/// Search geocoded locations matching `query`
pub async fn search_locations(query: &str, limit: u32) -> ApiResult<Vec<LocationOption>> {
    log::trace!("Searching locations for '{}' (limit {})", query, limit);
    let raw = api_client::get(
        LOCATION_SEARCH,
        &[("q", query.to_string()), ("limit", limit.to_string())],
    )
    .await?;

    let result = decode_search(raw.status, &raw.body);
    match &result {
        Ok(locations) => log::info!("Found {} locations for '{}'", locations.len(), query),
        Err(e) => log::warn!("Location search for '{}' failed: {}", query, e),
    }
    result
}
