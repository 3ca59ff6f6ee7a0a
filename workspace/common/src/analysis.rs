use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::de::{blank_as_none, lenient_f64, null_as_default, nullable_vec};
use crate::location::format_display_name;

/// Climate analysis produced by the backend for one location.
///
/// Every numeric field is optional: values that are missing, `null`,
/// non-numeric or non-finite all decode to `None` so rendering can substitute
/// a placeholder instead of failing the whole payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClimateAnalysis {
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: AnalyzedLocation,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_climate: CurrentClimate,
    #[serde(default, deserialize_with = "null_as_default")]
    pub climate_variations: ClimateVariations,
    #[serde(default, deserialize_with = "null_as_default")]
    pub annual_temp_increase: AnnualTempIncrease,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projections: Projections,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub resilience_score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub risk_assessment: RiskAssessment,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub recommendations: Vec<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub data_sources: Vec<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub last_updated: Option<String>,
}

impl ClimateAnalysis {
    /// Card heading, falling back to the requested name when the backend echo is empty.
    pub fn heading(&self, fallback: &str) -> String {
        let heading = self.location.label();
        if heading.is_empty() {
            fallback.to_string()
        } else {
            heading
        }
    }

    /// `last_updated` parsed from the backend's naive ISO-8601 timestamp.
    pub fn last_updated_at(&self) -> Option<NaiveDateTime> {
        let raw = self.last_updated.as_deref()?;
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }
}

/// Location echo inside an analysis; looser than [`crate::LocationOption`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyzedLocation {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub admin1: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub population: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub timezone: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub display_name: Option<String>,
}

impl AnalyzedLocation {
    pub fn label(&self) -> String {
        if let Some(display_name) = &self.display_name {
            return display_name.clone();
        }
        format_display_name(
            self.name.as_deref().unwrap_or_default(),
            self.admin1.as_deref(),
            self.country.as_deref().unwrap_or_default(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrentClimate {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub current_temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub current_humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_temp_max: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_temp_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_precipitation: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub data_source: Option<String>,
    #[serde(default)]
    pub data_available: Option<bool>,
}

/// Recent-versus-baseline variations for the current month.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClimateVariations {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub current_month: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub month_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temp_max_variation: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temp_min_variation: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rainfall_variation_percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub annual_temp_increase: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub recent_avg_temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub baseline_avg_temp: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub baseline_period: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub recent_period: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub data_quality: Option<String>,
    #[serde(default)]
    pub data_available: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnualTempIncrease {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub increase: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub recent_avg: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub baseline_avg: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub baseline_period: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub recent_period: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub confidence: Option<String>,
    #[serde(default)]
    pub data_available: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Projections {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temperature_change_2050: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub current_avg_temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub future_avg_temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub extreme_heat_days_current: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub extreme_heat_days_future: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub precipitation_change_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskAssessment {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub risk_level: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub temperature_impact: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub key_concerns: Vec<String>,
}

impl RiskAssessment {
    pub fn level(&self) -> RiskLevel {
        self.risk_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(RiskLevel::Unknown)
    }
}

/// Backend risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Unknown,
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "moderate" | "medium" => Ok(Self::Moderate),
            "high" => Ok(Self::High),
            "veryhigh" => Ok(Self::VeryHigh),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

// ===================== Comparison =====================

/// Request body for the backend's side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareRequest {
    pub current_location: String,
    pub target_location: String,
}

/// Two analyses plus backend-generated insights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub current_location: ClimateAnalysis,
    pub target_location: ClimateAnalysis,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comparison_insights: ComparisonInsights,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComparisonInsights {
    #[serde(default, deserialize_with = "null_as_default")]
    pub resilience_comparison: ResilienceComparison,
    #[serde(default, deserialize_with = "null_as_default")]
    pub temperature_comparison: TemperatureComparison,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResilienceComparison {
    #[serde(default, deserialize_with = "null_as_default")]
    pub winner: Winner,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub score_difference: Option<f64>,
    #[serde(default)]
    pub improvement: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemperatureComparison {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub current_change: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub target_change: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub difference: Option<f64>,
    #[serde(default)]
    pub target_cooler: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Current,
    Target,
    #[default]
    #[serde(other)]
    Tie,
}
