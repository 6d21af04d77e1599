//! Point lookup and forecast records from the weather service
//!
//! Only the fields the reports render are modelled; everything else in the
//! GeoJSON documents is ignored.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// `GET /points/{lat},{lon}`
#[derive(Debug, Deserialize, Clone)]
pub struct PointResponse {
    pub properties: PointProperties,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PointProperties {
    /// URL of the forecast resource for this point
    pub forecast: String,
    pub relative_location: RelativeLocation,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RelativeLocation {
    pub properties: RelativeLocationProperties,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RelativeLocationProperties {
    pub city: String,
    pub state: String,
}

impl PointResponse {
    /// "City, ST" of the nearest named place
    #[must_use]
    pub fn location_name(&self) -> String {
        let place = &self.properties.relative_location.properties;
        format!("{}, {}", place.city, place.state)
    }

    #[must_use]
    pub fn forecast_url(&self) -> &str {
        &self.properties.forecast
    }
}

/// Forecast document; periods alternate day/night, index 0 is the current one.
#[derive(Debug, Deserialize, Clone)]
pub struct ForecastResponse {
    pub properties: ForecastProperties,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastProperties {
    pub periods: Vec<ForecastPeriod>,
}

/// A named forecast slot such as "Tonight" or "Thursday".
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub short_forecast: String,
    pub temperature: f64,
    #[serde(default = "default_temperature_unit")]
    pub temperature_unit: String,
    #[serde(default)]
    pub probability_of_precipitation: Option<PrecipitationProbability>,
    #[serde(default)]
    pub wind_direction: String,
    #[serde(default)]
    pub wind_speed: String,
    pub is_daytime: bool,
    #[serde(default)]
    pub detailed_forecast: String,
    pub end_time: DateTime<FixedOffset>,
}

/// Quantitative value wrapper; `value` is null when the service has no estimate.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PrecipitationProbability {
    pub value: Option<f64>,
}

fn default_temperature_unit() -> String {
    "F".to_string()
}

impl ForecastPeriod {
    /// Precipitation chance in percent, if the service provided one
    #[must_use]
    pub fn precipitation_chance(&self) -> Option<f64> {
        self.probability_of_precipitation
            .as_ref()
            .and_then(|probability| probability.value)
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{} {}°", self.temperature, self.temperature_unit)
    }

    #[must_use]
    pub fn format_precipitation(&self) -> String {
        match self.precipitation_chance() {
            Some(value) => format!("{value}%"),
            None => "n/a".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINT: &str = r#"{
        "properties": {
            "forecast": "https://api.weather.gov/gridpoints/OKX/33,35/forecast",
            "relativeLocation": {
                "type": "Feature",
                "properties": { "city": "Hoboken", "state": "NJ", "distance": {} }
            }
        }
    }"#;

    const PERIOD: &str = r#"{
        "number": 1,
        "name": "Tonight",
        "startTime": "2024-05-10T18:00:00-04:00",
        "endTime": "2024-05-11T06:00:00-04:00",
        "isDaytime": false,
        "temperature": 52,
        "temperatureUnit": "F",
        "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": null },
        "windSpeed": "5 mph",
        "windDirection": "NW",
        "icon": "https://api.weather.gov/icons/land/night/few?size=medium",
        "shortForecast": "Mostly Clear",
        "detailedForecast": "Mostly clear, with a low around 52."
    }"#;

    #[test]
    fn test_point_location_name() {
        let point: PointResponse = serde_json::from_str(POINT).unwrap();
        assert_eq!(point.location_name(), "Hoboken, NJ");
        assert_eq!(
            point.forecast_url(),
            "https://api.weather.gov/gridpoints/OKX/33,35/forecast"
        );
    }

    #[test]
    fn test_period_formatting() {
        let period: ForecastPeriod = serde_json::from_str(PERIOD).unwrap();
        assert!(!period.is_daytime);
        assert_eq!(period.short_forecast, "Mostly Clear");
        assert_eq!(period.format_temperature(), "52 F°");
        assert_eq!(period.precipitation_chance(), None);
        assert_eq!(period.format_precipitation(), "n/a");
    }
}
