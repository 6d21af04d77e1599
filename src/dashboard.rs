//! One user action: resolve the location, fetch, and collect alerts
//!
//! Input and upstream failures never escape as errors. They are logged and
//! turned into alert lines on the returned [`Dashboard`]. Only store failures
//! propagate.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::aurora::{self, AuroraReport};
use crate::models::{Coordinate, CoordinateField, parse_number, resolve_coordinates};
use crate::preferences::{Preferences, UserSettings};
use crate::services::WeatherServices;
use crate::store::PreferenceStore;
use crate::weather::{self, WeatherReport};
use crate::{NightSkyError, Result};

pub const MISSING_LOCATION_ALERT: &str =
    "You have no Latitude or Longitude data saved, please save some data with the set button.";
pub const WEATHER_SERVICE_ALERT: &str =
    "The Latitude and Longitude you entered was not in the U.S. please enter a new one.";
pub const SOLAR_SERVICE_ALERT: &str =
    "There was a problem with getting the Solar Weather, please be patient while we fix it.";

/// Everything one action produced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub weather: Option<WeatherReport>,
    pub aurora: Option<AuroraReport>,
    pub alerts: Vec<String>,
}

impl Dashboard {
    fn alerted(alerts: Vec<String>) -> Self {
        Self {
            alerts,
            ..Self::default()
        }
    }
}

/// Alert lines for a failed coordinate resolution
#[must_use]
pub fn resolution_alerts(err: &NightSkyError) -> Vec<String> {
    match err {
        NightSkyError::MissingPreference { fields } => {
            let mut alerts = vec![MISSING_LOCATION_ALERT.to_string()];
            alerts.extend(fields.iter().map(CoordinateField::invalid_message));
            alerts
        }
        NightSkyError::Validation { fields } => {
            fields.iter().map(CoordinateField::invalid_message).collect()
        }
        other => vec![other.user_message()],
    }
}

pub struct NightSky<S, P> {
    services: S,
    preferences: Preferences<P>,
}

impl<S: WeatherServices, P: PreferenceStore> NightSky<S, P> {
    pub fn new(services: S, store: P) -> Self {
        Self {
            services,
            preferences: Preferences::new(store),
        }
    }

    pub fn preferences(&self) -> &Preferences<P> {
        &self.preferences
    }

    /// Weather first, then aurora for the same latitude.
    ///
    /// The K-index feed is only fetched once the weather lookup succeeded.
    pub async fn check(
        &self,
        raw_lat: &str,
        raw_lon: &str,
        with_forecast: bool,
    ) -> Result<Dashboard> {
        let saved = self.preferences.location().await?;

        let coordinate = match resolve_coordinates(raw_lat, raw_lon, saved.as_ref()) {
            Ok(coordinate) => coordinate,
            Err(
                err @ (NightSkyError::Validation { .. } | NightSkyError::MissingPreference { .. }),
            ) => {
                warn!("Could not resolve coordinates: {}", err);
                return Ok(Dashboard::alerted(resolution_alerts(&err)));
            }
            Err(err) => return Err(err),
        };
        info!("Checking sky for {}", coordinate.format_coordinates());

        let weather = match weather::fetch_report(&self.services, coordinate, with_forecast).await {
            Ok(report) => report,
            Err(err) => {
                warn!("Lat and Lon not valid points for API: {}", err);
                return Ok(Dashboard::alerted(vec![WEATHER_SERVICE_ALERT.to_string()]));
            }
        };

        let mut dashboard = Dashboard {
            weather: Some(weather),
            ..Dashboard::default()
        };

        match aurora::fetch_report(&self.services, Some(coordinate.latitude)).await {
            Ok(report) => dashboard.aurora = Some(report),
            Err(err) => {
                warn!("There was a problem with the Solar Weather API: {}", err);
                dashboard.alerts.push(SOLAR_SERVICE_ALERT.to_string());
            }
        }

        Ok(dashboard)
    }

    /// Aurora card on its own.
    ///
    /// Only latitude matters here: a numeric input wins, otherwise the saved
    /// latitude is used. With neither, the card is still shown without a verdict.
    pub async fn aurora(&self, raw_lat: &str) -> Result<Dashboard> {
        let latitude = match parse_number(raw_lat) {
            Some(latitude) => Some(latitude),
            None => self
                .preferences
                .location()
                .await?
                .map(|saved| saved.latitude),
        };

        let mut dashboard = Dashboard::default();
        if latitude.is_none() {
            dashboard.alerts = resolution_alerts(&NightSkyError::missing_preference(vec![
                CoordinateField::Latitude,
            ]));
        }

        match aurora::fetch_report(&self.services, latitude).await {
            Ok(report) => dashboard.aurora = Some(report),
            Err(err) => {
                warn!("There was a problem with the Solar Weather API: {}", err);
                dashboard.alerts = vec![SOLAR_SERVICE_ALERT.to_string()];
            }
        }

        Ok(dashboard)
    }

    /// Explicit confirmation: both inputs must be numbers before anything is written.
    pub async fn save_location(&self, raw_lat: &str, raw_lon: &str) -> Result<Coordinate> {
        let mut invalid = Vec::new();
        let latitude = parse_number(raw_lat);
        let longitude = parse_number(raw_lon);
        if latitude.is_none() {
            invalid.push(CoordinateField::Latitude);
        }
        if longitude.is_none() {
            invalid.push(CoordinateField::Longitude);
        }

        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => {
                let coordinate = Coordinate::new(latitude, longitude);
                self.preferences.save_location(&coordinate).await?;
                Ok(coordinate)
            }
            _ => Err(NightSkyError::validation(invalid)),
        }
    }

    pub async fn settings(&self) -> Result<UserSettings> {
        self.preferences.settings().await
    }

    pub async fn set_dark_mode(&self, darkmode: bool) -> Result<UserSettings> {
        self.preferences.set_dark_mode(darkmode).await
    }
}
