//! Safe numeric formatting for backend metrics.
//!
//! All rendering of analysis numbers goes through this module. A value that is
//! missing or not finite always renders as [`PLACEHOLDER`]; deltas and
//! relative changes are rounded to one decimal and sign-prefixed; scores are
//! rounded and clamped to `0..=100`. Score bars map raw values onto `0..=100`
//! through a fixed [`LinearWindow`] per metric.

use crate::analysis::ClimateAnalysis;

/// Rendered in place of a missing or non-finite value.
pub const PLACEHOLDER: &str = "—";

/// Formatting policy for a semantic field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Absolute temperature, `24.3°C`
    Temperature,
    /// Signed temperature change, `+1.2°C`
    TemperatureDelta,
    /// Signed relative change, `+8.0%`
    PercentChange,
    /// Unsigned share such as humidity, `61%`
    Percent,
    /// Precipitation amount, `3.2 mm`
    Precipitation,
    /// Whole-number score clamped to `0..=100`
    Score,
    /// Whole count with thousands separators, `1,153,615`
    Count,
}

/// Drops `NaN` and infinities.
pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

pub fn format_metric(value: Option<f64>, kind: MetricKind) -> String {
    let Some(value) = finite(value) else {
        return PLACEHOLDER.to_string();
    };

    match kind {
        MetricKind::Temperature => format!("{:.1}°C", normalize_zero(round_to(value, 1))),
        MetricKind::TemperatureDelta => format!("{}°C", signed(value, 1)),
        MetricKind::PercentChange => format!("{}%", signed(value, 1)),
        MetricKind::Percent => format!("{}%", normalize_zero(value.round())),
        MetricKind::Precipitation => {
            format!("{:.1} mm", normalize_zero(round_to(value, 1)))
        }
        MetricKind::Score => match bounded_score(Some(value)) {
            Some(score) => score.to_string(),
            None => PLACEHOLDER.to_string(),
        },
        MetricKind::Count => group_thousands(value.round() as i64),
    }
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// `+1.2`, `-0.4`, `+0.0`; never `-0.0`.
pub fn signed(value: f64, decimals: usize) -> String {
    let rounded = normalize_zero(round_to(value, decimals as u32));
    if rounded >= 0.0 {
        format!("+{:.*}", decimals, rounded)
    } else {
        format!("{:.*}", decimals, rounded)
    }
}

/// Rounds and clamps into `0..=100`.
pub fn bounded_score(value: Option<f64>) -> Option<u8> {
    finite(value).map(|v| v.round().clamp(0.0, 100.0) as u8)
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

// ===================== Score bars =====================

/// Linear map from a raw window onto `0..=100`; inputs outside clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearWindow {
    pub low: f64,
    pub high: f64,
    /// High raw values map to low scores.
    pub inverted: bool,
}

impl LinearWindow {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high, inverted: false }
    }

    pub const fn inverted(low: f64, high: f64) -> Self {
        Self { low, high, inverted: true }
    }

    pub fn score(&self, value: Option<f64>) -> Option<u8> {
        let value = finite(value)?;
        let span = self.high - self.low;
        if span <= 0.0 {
            return None;
        }
        let fraction = ((value - self.low) / span).clamp(0.0, 1.0);
        let fraction = if self.inverted { 1.0 - fraction } else { fraction };
        Some((fraction * 100.0).round() as u8)
    }
}

/// ±5 °C of monthly variation.
pub const TEMPERATURE_VARIATION_WINDOW: LinearWindow = LinearWindow::new(-5.0, 5.0);
/// −100 % (no rain) to +200 % (triple) rainfall variation.
pub const RAINFALL_VARIATION_WINDOW: LinearWindow = LinearWindow::new(-100.0, 200.0);
/// Three points per degree, saturating at ~33 °C.
pub const CURRENT_TEMPERATURE_WINDOW: LinearWindow = LinearWindow::new(0.0, 100.0 / 3.0);
/// Warming by 2050; 0 °C is the best outlook, 4 °C the worst.
pub const FUTURE_OUTLOOK_WINDOW: LinearWindow = LinearWindow::inverted(0.0, 4.0);
pub const RESILIENCE_WINDOW: LinearWindow = LinearWindow::new(0.0, 100.0);

/// Colour band of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            90.. => Self::Excellent,
            80..=89 => Self::Good,
            70..=79 => Self::Fair,
            _ => Self::Poor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

/// One bounded bar ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBar {
    pub label: &'static str,
    pub score: Option<u8>,
}

impl ScoreBar {
    pub fn new(label: &'static str, window: LinearWindow, value: Option<f64>) -> Self {
        Self { label, score: window.score(value) }
    }

    pub fn band(&self) -> Option<ScoreBand> {
        self.score.map(ScoreBand::for_score)
    }

    /// Width for a percentage-based bar; missing scores draw empty.
    pub fn width_percent(&self) -> u8 {
        self.score.unwrap_or(0)
    }

    pub fn display(&self) -> String {
        match self.score {
            Some(score) => score.to_string(),
            None => PLACEHOLDER.to_string(),
        }
    }
}

/// The bars shown on every analysis card, in display order.
pub fn score_bars(analysis: &ClimateAnalysis) -> Vec<ScoreBar> {
    vec![
        ScoreBar::new("Climate Resilience", RESILIENCE_WINDOW, analysis.resilience_score),
        ScoreBar::new(
            "Current Temperature",
            CURRENT_TEMPERATURE_WINDOW,
            analysis.current_climate.current_temperature,
        ),
        ScoreBar::new(
            "Future Outlook",
            FUTURE_OUTLOOK_WINDOW,
            analysis.projections.temperature_change_2050,
        ),
        ScoreBar::new(
            "Max Temp Variation",
            TEMPERATURE_VARIATION_WINDOW,
            analysis.climate_variations.temp_max_variation,
        ),
        ScoreBar::new(
            "Min Temp Variation",
            TEMPERATURE_VARIATION_WINDOW,
            analysis.climate_variations.temp_min_variation,
        ),
        ScoreBar::new(
            "Rainfall Variation",
            RAINFALL_VARIATION_WINDOW,
            analysis.climate_variations.rainfall_variation_percent,
        ),
    ]
}

/// Label/value rows for the facts panel of an analysis card.
pub fn analysis_facts(analysis: &ClimateAnalysis) -> Vec<(&'static str, String)> {
    let climate = &analysis.current_climate;
    let variations = &analysis.climate_variations;
    let projections = &analysis.projections;

    vec![
        ("Resilience Score", format_metric(analysis.resilience_score, MetricKind::Score)),
        ("Current Temp", format_metric(climate.current_temperature, MetricKind::Temperature)),
        ("Humidity", format_metric(climate.current_humidity, MetricKind::Percent)),
        ("Weekly Precipitation", format_metric(climate.total_precipitation, MetricKind::Precipitation)),
        (
            "Annual Increase",
            format_metric(analysis.annual_temp_increase.increase, MetricKind::TemperatureDelta),
        ),
        (
            "Max Temp Variation",
            format_metric(variations.temp_max_variation, MetricKind::TemperatureDelta),
        ),
        (
            "Min Temp Variation",
            format_metric(variations.temp_min_variation, MetricKind::TemperatureDelta),
        ),
        (
            "Rainfall Variation",
            format_metric(variations.rainfall_variation_percent, MetricKind::PercentChange),
        ),
        (
            "2050 Change",
            format_metric(projections.temperature_change_2050, MetricKind::TemperatureDelta),
        ),
        (
            "Precipitation by 2050",
            format_metric(projections.precipitation_change_percent, MetricKind::PercentChange),
        ),
        (
            "Extreme Heat Days",
            format!(
                "{} → {}",
                format_metric(projections.extreme_heat_days_current, MetricKind::Count),
                format_metric(projections.extreme_heat_days_future, MetricKind::Count)
            ),
        ),
        ("Risk Level", analysis.risk_assessment.level().to_string()),
        ("Population", format_metric(analysis.location.population, MetricKind::Count)),
    ]
}
