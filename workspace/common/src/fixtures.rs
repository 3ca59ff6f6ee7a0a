//! Backend payloads shared by the unit tests.

use serde_json::json;

pub(crate) fn perpignan_payload() -> serde_json::Value {
    json!({
        "location": {
            "name": "Perpignan",
            "country": "France",
            "admin1": "Occitanie",
            "latitude": 42.6976,
            "longitude": 2.8954,
            "population": 120158,
            "timezone": "Europe/Paris",
            "display_name": "Perpignan, Occitanie, France"
        },
        "current_climate": {
            "current_temperature": 24.3,
            "current_humidity": 61,
            "avg_temp_max": 28.1,
            "avg_temp_min": 17.9,
            "total_precipitation": 3.2,
            "data_source": "open-meteo",
            "data_available": true
        },
        "climate_variations": {
            "current_month": 7,
            "month_name": "July",
            "temp_max_variation": 1.2,
            "temp_min_variation": 1.2,
            "rainfall_variation_percent": 5.3,
            "annual_temp_increase": 0.9,
            "recent_avg_temp": 16.4,
            "baseline_avg_temp": 15.5,
            "baseline_period": "Historical baseline",
            "recent_period": "Recent years",
            "data_quality": "high",
            "data_available": true
        },
        "annual_temp_increase": {
            "increase": 0.9,
            "recent_avg": 16.4,
            "baseline_avg": 15.5,
            "confidence": "high",
            "data_available": true
        },
        "projections": {
            "temperature_change_2050": 1.4,
            "current_avg_temp": 16.4,
            "future_avg_temp": 16.9,
            "extreme_heat_days_current": 0,
            "extreme_heat_days_future": 0,
            "precipitation_change_percent": 2.7
        },
        "resilience_score": 86,
        "risk_assessment": {
            "risk_level": "Low",
            "description": "Minimal climate risks expected. Good adaptation capacity.",
            "temperature_impact": "+0.9°C since baseline",
            "key_concerns": ["Rising temperatures", "Changing precipitation patterns"]
        },
        "recommendations": ["Monitor local climate adaptation plans"],
        "data_sources": ["Current weather: Open-Meteo API"],
        "last_updated": "2025-07-05T10:15:30.123456"
    })
}
