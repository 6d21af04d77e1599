//! HTTP client for the NOAA space weather feed and the api.weather.gov service

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::WeatherServices;
use crate::config::ServicesConfig;
use crate::models::{Coordinate, ForecastResponse, GeomagneticReading, PointResponse};
use crate::{NightSkyError, Result};

/// Client for the K-index feed and the weather point/forecast endpoints
#[derive(Debug, Clone)]
pub struct NoaaClient {
    client: Client,
    solar_url: String,
    weather_url: String,
}

impl NoaaClient {
    /// Create a new client from the services configuration
    pub fn new(config: &ServicesConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| NightSkyError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            solar_url: config.solar_url.clone(),
            weather_url: config.weather_url.clone(),
        })
    }

    /// Points URL for a coordinate, e.g. `.../points/40.7,-74`
    #[must_use]
    pub fn point_url(&self, coordinate: &Coordinate) -> String {
        format!(
            "{}{},{}",
            self.weather_url, coordinate.latitude, coordinate.longitude
        )
    }

    /// GET a URL and decode the JSON body.
    ///
    /// A non-success status turns the response body into a service error
    /// message; there is no retry.
    #[instrument(skip(self))]
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let start_time = Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Request failed: {}", e);
            NightSkyError::service_unavailable(format!("Request to {url} failed: {e}"))
        })?;

        let status = response.status();
        debug!(
            "HTTP response received: {} in {:.3}s",
            status,
            start_time.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Service answered {}: {}", status, body);
            return Err(NightSkyError::service(status.as_u16(), body));
        }

        response.json::<T>().await.map_err(|e| {
            warn!("Failed to parse response from {}: {}", url, e);
            NightSkyError::service_unavailable(format!("Invalid response from {url}: {e}"))
        })
    }
}

impl WeatherServices for NoaaClient {
    async fn solar_readings(&self) -> Result<Vec<GeomagneticReading>> {
        let readings: Vec<GeomagneticReading> = self.get_json(&self.solar_url).await?;
        info!("Retrieved {} K-index readings", readings.len());
        Ok(readings)
    }

    async fn point(&self, coordinate: &Coordinate) -> Result<PointResponse> {
        info!(
            "Looking up weather point for coordinates: {}",
            coordinate.format_coordinates()
        );
        self.get_json(&self.point_url(coordinate)).await
    }

    async fn forecast(&self, forecast_url: &str) -> Result<ForecastResponse> {
        let forecast: ForecastResponse = self.get_json(forecast_url).await?;
        info!(
            "Retrieved forecast with {} periods",
            forecast.properties.periods.len()
        );
        Ok(forecast)
    }
}
