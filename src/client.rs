use common::{
    ApiError, ApiResult, CLIMATE_ANALYZE, CLIMATE_COMPARE, CLIMATE_HEALTH, CLIMATE_LEGACY_LOOKUP,
    ClimateAnalysis, CompareRequest, ComparisonReport, HealthStatus, LOCATION_SEARCH,
    LocationData, LocationOption, decode_analysis, decode_comparison, decode_legacy_lookup,
    decode_plain, decode_search, join_url,
};
use reqwest::{Client, RequestBuilder, Url};
use tracing::{debug, instrument, trace};

use crate::config::Settings;

/// HTTP client for the climate backend.
///
/// Only fetches `(status, body)`; the shared decoders in `common` turn that
/// into typed results, so every client surfaces the same messages.
#[derive(Debug, Clone)]
pub struct ClimateClient {
    http: Client,
    base_url: String,
}

impl ClimateClient {
    pub fn new(settings: &Settings) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("climate-advisor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: settings.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        join_url(&self.base_url, endpoint)
    }

    async fn fetch(&self, request: RequestBuilder, endpoint: &str) -> ApiResult<(u16, String)> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        trace!(endpoint, status, "Response received, reading body");

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read response body: {}", e)))?;
        Ok((status, body))
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, limit: u32) -> ApiResult<Vec<LocationOption>> {
        let request = self
            .http
            .get(self.url(LOCATION_SEARCH))
            .query(&[("q", query.to_string()), ("limit", limit.to_string())]);
        let (status, body) = self.fetch(request, LOCATION_SEARCH).await?;
        decode_search(status, &body)
    }

    #[instrument(skip(self, location), fields(location = %location.label()))]
    pub async fn analyze(&self, location: &LocationData) -> ApiResult<ClimateAnalysis> {
        let request = self.http.post(self.url(CLIMATE_ANALYZE)).json(location);
        let (status, body) = self.fetch(request, CLIMATE_ANALYZE).await?;
        decode_analysis(status, &body)
    }

    #[instrument(skip(self))]
    pub async fn compare(&self, current: &str, target: &str) -> ApiResult<ComparisonReport> {
        let payload = CompareRequest {
            current_location: current.to_string(),
            target_location: target.to_string(),
        };
        let request = self.http.post(self.url(CLIMATE_COMPARE)).json(&payload);
        let (status, body) = self.fetch(request, CLIMATE_COMPARE).await?;
        decode_comparison(status, &body)
    }

    /// Superseded single-location lookup by free-text name.
    #[instrument(skip(self))]
    pub async fn legacy_lookup(&self, location: &str) -> ApiResult<LocationData> {
        let mut url = Url::parse(&self.url(CLIMATE_LEGACY_LOOKUP))
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidRequest("base URL cannot carry a path".to_string()))?
            .push(location);
        debug!(%url, "Legacy lookup");

        let (status, body) = self.fetch(self.http.get(url), CLIMATE_LEGACY_LOOKUP).await?;
        decode_legacy_lookup(status, &body)
    }

    pub async fn health(&self) -> ApiResult<HealthStatus> {
        let (status, body) = self
            .fetch(self.http.get(self.url(CLIMATE_HEALTH)), CLIMATE_HEALTH)
            .await?;
        decode_plain(status, &body)
    }
}
