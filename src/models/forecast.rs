use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timestamp layout used by forecast samples, e.g. `2024-05-01 12:00:00`
pub const SAMPLE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Forecast feed from a weather provider, samples in provider order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub city: String,
    pub samples: Vec<ForecastSample>,
}

/// A single timestamped forecast sample (3-hour interval for OpenWeatherMap)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: String,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub description: String,
}

impl ForecastSample {
    pub fn new(
        timestamp: impl Into<String>,
        temp_min_c: f64,
        temp_max_c: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            temp_min_c,
            temp_max_c,
            description: description.into(),
        }
    }

    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.timestamp.trim(), SAMPLE_TIMESTAMP_FORMAT).ok()
    }

    /// Calendar date of the sample, `None` if the timestamp is malformed
    pub fn date(&self) -> Option<NaiveDate> {
        self.parsed_timestamp().map(|ts| ts.date())
    }
}

/// Aggregated view of one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub dominant_condition: String,
    pub label: String,
}
