//! Weather report assembly
//!
//! The forecast feed alternates day and night periods. When the first period
//! is daytime the current card pairs it with the night after it, and the
//! forecast days start at index 2; otherwise the current card is the night
//! alone and forecast days start at index 1.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::models::{Coordinate, ForecastPeriod};
use crate::services::WeatherServices;
use crate::{NightSkyError, Result};

const DAY_FIRST_FORECAST: [usize; 4] = [2, 4, 6, 8];
const NIGHT_FIRST_FORECAST: [usize; 4] = [1, 3, 5, 7];

/// A period plus, when present, the night that follows it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCard {
    pub period: ForecastPeriod,
    pub night: Option<ForecastPeriod>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// "City, ST" from the point lookup
    pub location_name: String,
    pub coordinate: Coordinate,
    pub current: DayCard,
    /// Four-day outlook, empty unless requested
    pub forecast: Vec<DayCard>,
}

/// Period indices used for the four forecast days
#[must_use]
pub fn forecast_indices(first_is_daytime: bool) -> [usize; 4] {
    if first_is_daytime {
        DAY_FIRST_FORECAST
    } else {
        NIGHT_FIRST_FORECAST
    }
}

/// Build a report from already-fetched periods.
pub fn build_report(
    location_name: String,
    coordinate: Coordinate,
    periods: &[ForecastPeriod],
    with_forecast: bool,
) -> Result<WeatherReport> {
    let first = periods
        .first()
        .ok_or_else(|| NightSkyError::service_unavailable("forecast contained no periods"))?;

    let current = DayCard {
        period: first.clone(),
        night: if first.is_daytime {
            periods.get(1).cloned()
        } else {
            None
        },
    };

    let forecast = if with_forecast {
        forecast_indices(first.is_daytime)
            .iter()
            .filter_map(|&index| {
                periods.get(index).map(|period| DayCard {
                    period: period.clone(),
                    night: periods.get(index + 1).cloned(),
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(WeatherReport {
        location_name,
        coordinate,
        current,
        forecast,
    })
}

/// Point lookup, then forecast fetch, then report assembly.
#[instrument(skip(services))]
pub async fn fetch_report<S: WeatherServices>(
    services: &S,
    coordinate: Coordinate,
    with_forecast: bool,
) -> Result<WeatherReport> {
    let point = services.point(&coordinate).await?;
    let location_name = point.location_name();
    debug!("Point resolved to {}", location_name);

    let forecast = services.forecast(point.forecast_url()).await?;
    build_report(
        location_name,
        coordinate,
        &forecast.properties.periods,
        with_forecast,
    )
}
