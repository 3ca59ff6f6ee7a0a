use common::{
    ApiResult, CLIMATE_ANALYZE, CLIMATE_HEALTH, ClimateAnalysis, HealthStatus, LocationData,
    decode_analysis, decode_plain,
};

use crate::api_client;

/// Run the backend analysis for one location
pub async fn analyze_location(location: &LocationData) -> ApiResult<ClimateAnalysis> {
    log::debug!("Requesting analysis for {}", location.label());
    let raw = api_client::post(CLIMATE_ANALYZE, location).await?;

    let result = decode_analysis(raw.status, &raw.body);
    match &result {
        Ok(_) => log::info!("Analysis received for {}", location.label()),
        Err(e) => log::error!("Analysis for {} failed: {}", location.label(), e),
    }
    result
}

/// Probe backend health
pub async fn check_health() -> ApiResult<HealthStatus> {
    log::trace!("Probing backend health");
    let raw = api_client::get(CLIMATE_HEALTH, &[]).await?;
    let result = decode_plain::<HealthStatus>(raw.status, &raw.body);
    if let Err(e) = &result {
        log::warn!("Health probe failed: {}", e);
    }
    result
}
