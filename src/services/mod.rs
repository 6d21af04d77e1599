//! External data feeds
//!
//! The geomagnetic feed, the weather point lookup and the forecast fetch sit
//! behind [`WeatherServices`] so the reports can be built against any source.

use crate::Result;
use crate::models::{Coordinate, ForecastResponse, GeomagneticReading, PointResponse};

pub mod noaa;

pub use noaa::NoaaClient;

/// The three upstream lookups. Any non-success answer is a
/// [`crate::NightSkyError::Service`].
pub trait WeatherServices {
    /// Planetary K-index readings in feed order
    async fn solar_readings(&self) -> Result<Vec<GeomagneticReading>>;

    /// Point metadata (nearest place and forecast URL) for a coordinate
    async fn point(&self, coordinate: &Coordinate) -> Result<PointResponse>;

    /// Forecast periods behind a point's forecast URL
    async fn forecast(&self, forecast_url: &str) -> Result<ForecastResponse>;
}
