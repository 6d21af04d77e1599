//! Data models for the NightSky application
//!
//! This module contains the core domain models organized by concern:
//! - Coordinate: latitude/longitude input, validation and resolution
//! - Solar: geomagnetic K-index readings from the space weather feed
//! - Forecast: point lookup and forecast period records from the weather service

pub mod coordinate;
pub mod forecast;
pub mod solar;

// Re-export all public types for convenient access
pub use coordinate::{Coordinate, CoordinateField, is_number, parse_number, resolve_coordinates};
pub use forecast::{ForecastPeriod, ForecastResponse, PointResponse, PrecipitationProbability};
pub use solar::GeomagneticReading;
