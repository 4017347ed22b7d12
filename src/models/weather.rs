//! Provider-independent weather values.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Conditions at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub description: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: Option<f64>,
    pub observed_at: Option<DateTime<Utc>>,
}

/// One 3-hour bucket of a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub at: DateTime<Utc>,
    pub snapshot: WeatherSnapshot,
}

/// A city's forecast buckets plus its offset from UTC
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Seconds east of UTC for the forecast city
    pub utc_offset_seconds: i32,
    pub entries: Vec<ForecastEntry>,
}

impl Forecast {
    /// Buckets for a city on UTC
    pub fn utc(entries: Vec<ForecastEntry>) -> Self {
        Self {
            utc_offset_seconds: 0,
            entries,
        }
    }

    /// The city's offset; out-of-range values fall back to UTC
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_seconds)
            .unwrap_or_else(|| Utc.fix())
    }
}
