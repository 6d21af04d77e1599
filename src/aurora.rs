//! Aurora visibility from the planetary K-index and latitude
//!
//! The K-index selects a `(high, mid)` latitude threshold pair. Latitudes at or
//! above `high` are `Likely`, `[mid, high)` is `Faint`, anything below `mid` is
//! `Unlikely`. Boundaries belong to the higher-visibility bucket.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::models::GeomagneticReading;
use crate::services::WeatherServices;
use crate::{NightSkyError, Result};

/// Shown under every aurora card.
pub const SKY_NOTICE: &str =
    "Note: Visibility also depends on how clear your skies are, check the weather below.";

/// Three-valued aurora visibility classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibilityVerdict {
    Likely,
    Faint,
    Unlikely,
}

impl VisibilityVerdict {
    /// Sentence shown to the user for this verdict
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            VisibilityVerdict::Likely => "It is highly likely you can see it tonight.",
            VisibilityVerdict::Faint => "You may see faint traces of it tonight.",
            VisibilityVerdict::Unlikely => "It is unlikely you will see it tonight.",
        }
    }
}

impl fmt::Display for VisibilityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisibilityVerdict::Likely => write!(f, "Likely"),
            VisibilityVerdict::Faint => write!(f, "Faint"),
            VisibilityVerdict::Unlikely => write!(f, "Unlikely"),
        }
    }
}

/// Latitude thresholds for one K-index row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// `Likely` at or above this latitude
    pub high: f64,
    /// `Faint` at or above this latitude (and below `high`)
    pub mid: f64,
}

/// Row used for K-index 2 and below, and for anything the table does not list.
pub const DEFAULT_THRESHOLDS: Thresholds = Thresholds {
    high: 54.0,
    mid: 50.0,
};

/// Threshold row for a K-index.
///
/// Out-of-range indices (0, negatives, above 9) land on the default row,
/// same as 1 and 2. This hides bad input instead of rejecting it.
#[must_use]
pub fn thresholds(kp_index: i32) -> Thresholds {
    let (high, mid) = match kp_index {
        9 => (33.0, 20.0),
        8 => (37.0, 33.0),
        7 => (40.0, 37.0),
        6 => (43.0, 40.0),
        5 => (45.0, 43.0),
        4 => (48.0, 45.0),
        3 => (50.0, 48.0),
        _ => return DEFAULT_THRESHOLDS,
    };
    Thresholds { high, mid }
}

/// Classify aurora visibility for a K-index at a latitude.
#[must_use]
pub fn classify(kp_index: i32, latitude: f64) -> VisibilityVerdict {
    let Thresholds { high, mid } = thresholds(kp_index);
    if latitude >= high {
        VisibilityVerdict::Likely
    } else if latitude >= mid {
        VisibilityVerdict::Faint
    } else {
        VisibilityVerdict::Unlikely
    }
}

/// The reading treated as "current".
///
/// This is the feed's first element, not necessarily its latest one; the
/// upstream ordering is not checked.
#[must_use]
pub fn current_reading(feed: &[GeomagneticReading]) -> Option<&GeomagneticReading> {
    feed.first()
}

/// Solar weather card: the current reading and, when a latitude is known, its verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuroraReport {
    pub reading: GeomagneticReading,
    pub latitude: Option<f64>,
    pub verdict: Option<VisibilityVerdict>,
}

impl AuroraReport {
    #[must_use]
    pub fn new(reading: GeomagneticReading, latitude: Option<f64>) -> Self {
        let verdict = latitude.map(|lat| classify(reading.kp_index, lat));
        Self {
            reading,
            latitude,
            verdict,
        }
    }

    /// Build a report from a whole feed; `None` when the feed is empty.
    #[must_use]
    pub fn from_feed(feed: &[GeomagneticReading], latitude: Option<f64>) -> Option<Self> {
        current_reading(feed).map(|reading| Self::new(reading.clone(), latitude))
    }
}

/// Fetch the K-index feed and build the aurora report for a latitude.
#[instrument(skip(services))]
pub async fn fetch_report<S: WeatherServices>(
    services: &S,
    latitude: Option<f64>,
) -> Result<AuroraReport> {
    let feed = services.solar_readings().await?;
    debug!("K-index feed returned {} readings", feed.len());

    AuroraReport::from_feed(&feed, latitude)
        .ok_or_else(|| NightSkyError::service_unavailable("K-index feed contained no readings"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn reading(kp_index: i32) -> GeomagneticReading {
        GeomagneticReading {
            time_tag: NaiveDate::from_ymd_opt(2024, 5, 10)
                .unwrap()
                .and_hms_opt(17, 42, 0)
                .unwrap(),
            kp_index,
            estimated_kp: f64::from(kp_index) + 0.33,
        }
    }

    #[rstest]
    #[case(9, 33.0, VisibilityVerdict::Likely)]
    #[case(9, 32.999, VisibilityVerdict::Faint)]
    #[case(9, 20.0, VisibilityVerdict::Faint)]
    #[case(9, 19.999, VisibilityVerdict::Unlikely)]
    #[case(8, 37.0, VisibilityVerdict::Likely)]
    #[case(8, 33.0, VisibilityVerdict::Faint)]
    #[case(8, 32.9, VisibilityVerdict::Unlikely)]
    #[case(7, 40.0, VisibilityVerdict::Likely)]
    #[case(7, 37.0, VisibilityVerdict::Faint)]
    #[case(7, 36.9, VisibilityVerdict::Unlikely)]
    #[case(6, 43.0, VisibilityVerdict::Likely)]
    #[case(6, 40.0, VisibilityVerdict::Faint)]
    #[case(6, 39.9, VisibilityVerdict::Unlikely)]
    #[case(5, 45.0, VisibilityVerdict::Likely)]
    #[case(5, 43.0, VisibilityVerdict::Faint)]
    #[case(5, 42.9, VisibilityVerdict::Unlikely)]
    #[case(4, 48.0, VisibilityVerdict::Likely)]
    #[case(4, 45.0, VisibilityVerdict::Faint)]
    #[case(4, 44.9, VisibilityVerdict::Unlikely)]
    #[case(3, 50.0, VisibilityVerdict::Likely)]
    #[case(3, 48.0, VisibilityVerdict::Faint)]
    #[case(3, 47.9, VisibilityVerdict::Unlikely)]
    #[case(2, 54.0, VisibilityVerdict::Likely)]
    #[case(2, 50.0, VisibilityVerdict::Faint)]
    #[case(2, 49.9, VisibilityVerdict::Unlikely)]
    #[case(1, 54.0, VisibilityVerdict::Likely)]
    fn test_threshold_table(
        #[case] kp_index: i32,
        #[case] latitude: f64,
        #[case] expected: VisibilityVerdict,
    ) {
        assert_eq!(classify(kp_index, latitude), expected);
    }

    #[rstest]
    #[case(0, 49.0, VisibilityVerdict::Unlikely)]
    #[case(0, 52.0, VisibilityVerdict::Faint)]
    #[case(10, 54.0, VisibilityVerdict::Likely)]
    #[case(-1, 50.0, VisibilityVerdict::Faint)]
    #[case(42, 40.0, VisibilityVerdict::Unlikely)]
    fn test_unrecognized_index_uses_default_row(
        #[case] kp_index: i32,
        #[case] latitude: f64,
        #[case] expected: VisibilityVerdict,
    ) {
        assert_eq!(thresholds(kp_index), DEFAULT_THRESHOLDS);
        assert_eq!(classify(kp_index, latitude), expected);
    }

    const TABLE: [(i32, f64, f64); 8] = [
        (9, 33.0, 20.0),
        (8, 37.0, 33.0),
        (7, 40.0, 37.0),
        (6, 43.0, 40.0),
        (5, 45.0, 43.0),
        (4, 48.0, 45.0),
        (3, 50.0, 48.0),
        (2, 54.0, 50.0),
    ];

    #[test]
    fn test_bands_are_exclusive_and_exhaustive() {
        for (kp_index, high, mid) in TABLE {
            // Sweep -10..=90 in tenths; each latitude lands in exactly one band.
            for tenths in -100..=900 {
                let latitude = f64::from(tenths) / 10.0;
                let likely = latitude >= high;
                let faint = (mid..high).contains(&latitude);
                let unlikely = latitude < mid;
                assert_eq!(
                    [likely, faint, unlikely].iter().filter(|&&band| band).count(),
                    1,
                    "kp={kp_index} lat={latitude}"
                );

                let verdict = classify(kp_index, latitude);
                match verdict {
                    VisibilityVerdict::Likely => assert!(likely, "kp={kp_index} lat={latitude}"),
                    VisibilityVerdict::Faint => assert!(faint, "kp={kp_index} lat={latitude}"),
                    VisibilityVerdict::Unlikely => {
                        assert!(unlikely, "kp={kp_index} lat={latitude}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_threshold_rows_match_table() {
        for (kp_index, high, mid) in TABLE {
            assert_eq!(thresholds(kp_index), Thresholds { high, mid });
        }
    }

    #[test]
    fn test_classify_is_repeatable() {
        for kp_index in 0..=9 {
            assert_eq!(classify(kp_index, 45.5), classify(kp_index, 45.5));
        }
    }

    #[test]
    fn test_nan_latitude_is_unlikely() {
        assert_eq!(classify(9, f64::NAN), VisibilityVerdict::Unlikely);
    }

    #[test]
    fn test_current_reading_is_first_entry() {
        let feed = vec![reading(3), reading(7)];
        assert_eq!(current_reading(&feed).map(|r| r.kp_index), Some(3));
        assert!(current_reading(&[]).is_none());
    }

    #[test]
    fn test_report_from_feed() {
        let feed = vec![reading(6), reading(2)];
        let report = AuroraReport::from_feed(&feed, Some(44.0)).unwrap();
        assert_eq!(report.reading.kp_index, 6);
        assert_eq!(report.verdict, Some(VisibilityVerdict::Likely));

        let report = AuroraReport::from_feed(&feed, Some(41.0)).unwrap();
        assert_eq!(report.verdict, Some(VisibilityVerdict::Faint));

        let report = AuroraReport::from_feed(&feed, None).unwrap();
        assert_eq!(report.verdict, None);

        assert!(AuroraReport::from_feed(&[], Some(44.0)).is_none());
    }

    #[test]
    fn test_verdict_messages() {
        assert!(VisibilityVerdict::Likely.message().contains("highly likely"));
        assert!(VisibilityVerdict::Faint.message().contains("faint traces"));
        assert!(VisibilityVerdict::Unlikely.message().contains("unlikely"));
        assert_eq!(VisibilityVerdict::Faint.to_string(), "Faint");
    }
}
