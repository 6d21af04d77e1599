//! Geomagnetic K-index reading from the planetary K-index feed

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One entry of the planetary K-index feed.
///
/// `time_tag` carries no zone suffix; the feed publishes UTC.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeomagneticReading {
    /// Observation time (UTC)
    pub time_tag: NaiveDateTime,
    /// Integral K-index, 0..9
    pub kp_index: i32,
    /// Estimated fractional K-index
    pub estimated_kp: f64,
}

impl GeomagneticReading {
    /// Observation date, `YYYY-MM-DD`
    #[must_use]
    pub fn format_date(&self) -> String {
        self.time_tag.format("%Y-%m-%d").to_string()
    }

    /// Observation time of day, `HH:MM:SS`
    #[must_use]
    pub fn format_time(&self) -> String {
        self.time_tag.format("%H:%M:%S").to_string()
    }
}
