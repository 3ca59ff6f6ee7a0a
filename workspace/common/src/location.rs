use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::de::{blank_as_none, lenient_u64, nullable_string};
use crate::error::{ApiError, ApiResult};

/// A geocoded candidate returned by the location search endpoint.
///
/// Lives only until the next search response replaces it or the user picks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationOption {
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub country: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub admin1: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, deserialize_with = "lenient_u64", skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub display_name: String,
}

impl LocationOption {
    /// Text shown in the dropdown and in the input once selected.
    pub fn label(&self) -> String {
        if self.display_name.trim().is_empty() {
            format_display_name(&self.name, self.admin1.as_deref(), &self.country)
        } else {
            self.display_name.clone()
        }
    }

    /// The analysis payload for this candidate.
    pub fn to_location_data(&self) -> LocationData {
        LocationData::from(self)
    }
}

/// Location payload posted to the analysis endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LocationData {
    #[validate(length(min = 1, message = "location name must not be empty"))]
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub country: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub admin1: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be within -90..90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be within -180..180"))]
    pub longitude: f64,
    #[serde(default, deserialize_with = "lenient_u64", skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl LocationData {
    /// Validates the payload, turning failures into [`ApiError::InvalidRequest`].
    pub fn checked(self) -> ApiResult<Self> {
        self.validate()
            .map_err(|errors| ApiError::InvalidRequest(errors.to_string()))?;
        Ok(self)
    }

    pub fn label(&self) -> String {
        format_display_name(&self.name, self.admin1.as_deref(), &self.country)
    }
}

impl From<&LocationOption> for LocationData {
    fn from(option: &LocationOption) -> Self {
        Self {
            name: option.name.clone(),
            country: option.country.clone(),
            admin1: option.admin1.clone(),
            latitude: option.latitude,
            longitude: option.longitude,
            population: option.population,
            timezone: option.timezone.clone(),
        }
    }
}

impl From<LocationOption> for LocationData {
    fn from(option: LocationOption) -> Self {
        Self {
            name: option.name,
            country: option.country,
            admin1: option.admin1,
            latitude: option.latitude,
            longitude: option.longitude,
            population: option.population,
            timezone: option.timezone,
        }
    }
}

/// `"name, admin1, country"` when the region adds information, else `"name, country"`.
/// Empty parts are skipped.
pub fn format_display_name(name: &str, admin1: Option<&str>, country: &str) -> String {
    let region = admin1
        .map(str::trim)
        .filter(|region| !region.is_empty() && *region != name.trim());

    [Some(name.trim()), region, Some(country.trim())]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn copenhagen() -> LocationOption {
        serde_json::from_value(json!({
            "name": "Copenhagen",
            "country": "Denmark",
            "admin1": "Capital Region",
            "latitude": 55.6761,
            "longitude": 12.5683,
            "population": 1153615,
            "timezone": "Europe/Copenhagen",
            "display_name": "Copenhagen, Capital Region, Denmark"
        }))
        .unwrap()
    }

    #[test]
    fn test_option_decodes_backend_shape() {
        let option = copenhagen();
        assert_eq!(option.name, "Copenhagen");
        assert_eq!(option.admin1.as_deref(), Some("Capital Region"));
        assert_eq!(option.population, Some(1_153_615));
        assert_eq!(option.label(), "Copenhagen, Capital Region, Denmark");
    }

    #[test]
    fn test_option_tolerates_nulls_and_blank_region() {
        let option: LocationOption = serde_json::from_value(json!({
            "name": "Perpignan",
            "country": null,
            "admin1": "",
            "latitude": 42.6976,
            "longitude": 2.8954,
            "population": null,
            "timezone": null
        }))
        .unwrap();

        assert_eq!(option.country, "");
        assert_eq!(option.admin1, None);
        assert_eq!(option.display_name, "");
        assert_eq!(option.label(), "Perpignan");
    }

    #[test]
    fn test_display_name_skips_region_equal_to_name() {
        assert_eq!(
            format_display_name("Berlin", Some("Berlin"), "Germany"),
            "Berlin, Germany"
        );
        assert_eq!(
            format_display_name("Zurich", Some("Zurich"), "Switzerland"),
            "Zurich, Switzerland"
        );
        assert_eq!(
            format_display_name("Austin", Some("Texas"), "United States"),
            "Austin, Texas, United States"
        );
        assert_eq!(format_display_name("Helsinki", None, "Finland"), "Helsinki, Finland");
    }

    #[test]
    fn test_location_data_is_subset_of_option() {
        let option = copenhagen();
        let data = option.to_location_data();

        assert_eq!(data.name, option.name);
        assert_eq!(data.country, option.country);
        assert_eq!(data.admin1, option.admin1);
        assert_eq!(data.latitude, option.latitude);
        assert_eq!(data.longitude, option.longitude);
        assert_eq!(data.population, option.population);
        assert_eq!(data.timezone, option.timezone);

        let body = serde_json::to_value(&data).unwrap();
        assert!(body.get("display_name").is_none());
    }

    #[test]
    fn test_location_data_validation() {
        let data = copenhagen().to_location_data();
        assert!(data.clone().checked().is_ok());

        let mut bad = data.clone();
        bad.latitude = 123.0;
        let err = bad.checked().unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(ref msg) if msg.contains("latitude")));

        let mut unnamed = data;
        unnamed.name = String::new();
        assert!(matches!(unnamed.checked(), Err(ApiError::InvalidRequest(_))));
    }
}
