//! Builders shared by the session tests.

use common::{ClimateAnalysis, LocationOption};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Routes events to stderr for the current test; level from `RUST_LOG`, default WARN.
pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

pub fn location(name: &str, country: &str, latitude: f64, longitude: f64) -> LocationOption {
    LocationOption {
        name: name.to_string(),
        country: country.to_string(),
        admin1: None,
        latitude,
        longitude,
        population: None,
        timezone: None,
        display_name: format!("{}, {}", name, country),
    }
}

pub fn copenhagen() -> LocationOption {
    location("Copenhagen", "Denmark", 55.6761, 12.5683)
}

pub fn helsinki() -> LocationOption {
    location("Helsinki", "Finland", 60.1699, 24.9384)
}

pub fn analysis_with_score(score: f64) -> ClimateAnalysis {
    ClimateAnalysis {
        resilience_score: Some(score),
        ..ClimateAnalysis::default()
    }
}
