//! Common transport-layer types shared by the browser frontend and the
//! terminal client. These structs mirror the climate backend's request and
//! response payloads, so every client deserializes API responses through the
//! same shapes and the same envelope rules.

mod analysis;
mod de;
mod endpoints;
mod envelope;
mod error;
pub mod format;
mod location;
mod priorities;

#[cfg(test)]
mod fixtures;

pub use analysis::{
    AnalyzedLocation, AnnualTempIncrease, ClimateAnalysis, ClimateVariations, CompareRequest,
    ComparisonInsights, ComparisonReport, CurrentClimate, Projections, ResilienceComparison,
    RiskAssessment, RiskLevel, TemperatureComparison, Winner,
};
pub use endpoints::{
    ApiEnvironment, CLIMATE_ANALYZE, CLIMATE_COMPARE, CLIMATE_HEALTH, CLIMATE_LEGACY_LOOKUP,
    LOCATION_SEARCH, join_url,
};
pub use envelope::{
    HealthStatus, decode_analysis, decode_comparison, decode_legacy_lookup, decode_plain,
    decode_search,
};
pub use error::{ANALYSIS_FAILED, ApiError, ApiResult, GENERIC_FAILURE};
pub use format::{MetricKind, PLACEHOLDER, ScoreBand, ScoreBar, format_metric};
pub use location::{LocationData, LocationOption, format_display_name};
pub use priorities::{MAX_PRIORITY, MIN_PRIORITY, Priorities, PriorityKey};

/// Queries shorter than this, after trimming, never reach the backend.
pub const MIN_QUERY_CHARS: usize = 2;

/// Suggestions requested per search.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Whether `query` is long enough to search for.
pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}
