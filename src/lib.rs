//! `NightSky` - current weather, aurora visibility and forecast for a location
//!
//! This library classifies aurora visibility from the planetary K-index and
//! latitude, resolves user-supplied coordinates against a saved preference,
//! and assembles weather reports from the api.weather.gov forecast feed.

pub mod aurora;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod models;
pub mod preferences;
pub mod render;
pub mod services;
pub mod store;
pub mod weather;

// Re-export core types for public API
pub use aurora::{AuroraReport, VisibilityVerdict, classify, current_reading};
pub use config::NightSkyConfig;
pub use dashboard::{Dashboard, NightSky};
pub use error::NightSkyError;
pub use models::{
    Coordinate, CoordinateField, ForecastPeriod, GeomagneticReading, resolve_coordinates,
};
pub use preferences::{Preferences, UserSettings};
pub use services::{NoaaClient, WeatherServices};
pub use store::{FjallStore, MemoryStore, PreferenceStore};
pub use weather::WeatherReport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, NightSkyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
