//! Response envelope decoding shared by the browser and terminal clients.
//!
//! The backend wraps payloads as `{ "success": bool, "<field>": ... }` and
//! reports failures either as `success: false` with a `message`, or (FastAPI
//! style) as an error status with a `detail` that is a string or a list of
//! validation entries. Each client only fetches `(status, body)`; turning that
//! pair into a typed result happens here.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::analysis::{ClimateAnalysis, ComparisonReport};
use crate::error::{ANALYSIS_FAILED, ApiError, ApiResult};
use crate::location::{LocationData, LocationOption};

/// Backend health probe body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}

/// Decodes a `GET /locations/search` response into its suggestion list.
pub fn decode_search(status: u16, body: &str) -> ApiResult<Vec<LocationOption>> {
    decode_field(status, body, "locations", "Location search failed")
}

/// Decodes a `POST /climate/analyze` response.
pub fn decode_analysis(status: u16, body: &str) -> ApiResult<ClimateAnalysis> {
    decode_field(status, body, "data", ANALYSIS_FAILED)
}

/// Decodes a `POST /climate/compare` response.
pub fn decode_comparison(status: u16, body: &str) -> ApiResult<ComparisonReport> {
    decode_field(status, body, "data", "Comparison failed")
}

/// Decodes the superseded `GET /climate/test/<location>` lookup.
pub fn decode_legacy_lookup(status: u16, body: &str) -> ApiResult<LocationData> {
    decode_field(status, body, "location_data", "Location not found")
}

/// Decodes an un-enveloped body such as the health probe.
pub fn decode_plain<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<T> {
    let value = parse_body(status, body)?;
    if !is_success_status(status) {
        return Err(value
            .as_object()
            .and_then(failure_message)
            .map(ApiError::Application)
            .unwrap_or(ApiError::Status(status)));
    }
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode_field<T: DeserializeOwned>(
    status: u16,
    body: &str,
    field: &str,
    fallback: &str,
) -> ApiResult<T> {
    let value = parse_body(status, body)?;
    let Some(object) = value.as_object() else {
        if !is_success_status(status) {
            return Err(ApiError::Status(status));
        }
        return Err(ApiError::Decode("expected a JSON object".to_string()));
    };

    let message = failure_message(object);

    if !is_success_status(status) {
        tracing::debug!(status, ?message, "Backend returned an error status");
        return Err(message
            .map(ApiError::Application)
            .unwrap_or(ApiError::Status(status)));
    }

    if object.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ApiError::Application(
            message.unwrap_or_else(|| fallback.to_string()),
        ));
    }

    match object.get(field) {
        Some(payload) if !payload.is_null() => {
            T::deserialize(payload).map_err(|e| ApiError::Decode(e.to_string()))
        }
        _ => Err(ApiError::Application(
            message.unwrap_or_else(|| fallback.to_string()),
        )),
    }
}

fn parse_body(status: u16, body: &str) -> ApiResult<Value> {
    serde_json::from_str::<Value>(body).map_err(|e| {
        if is_success_status(status) {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Status(status)
        }
    })
}

fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// `detail` wins over `message`, which wins over `error`.
fn failure_message(object: &Map<String, Value>) -> Option<String> {
    object
        .get("detail")
        .and_then(detail_text)
        .or_else(|| text_field(object, "message"))
        .or_else(|| text_field(object, "error"))
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn detail_text(detail: &Value) -> Option<String> {
    let text = match detail {
        Value::String(s) => s.trim().to_string(),
        Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(s) => Some(s.clone()),
                Value::Object(obj) => text_field(obj, "msg").or_else(|| text_field(obj, "message")),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("; "),
        Value::Object(obj) => text_field(obj, "msg")
            .or_else(|| text_field(obj, "message"))
            .unwrap_or_default(),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}
