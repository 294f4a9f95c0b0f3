use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const PRECIPITATION_KEYWORDS: [&str; 3] = ["rain", "drizzle", "thunderstorm"];
const SUNSHINE_KEYWORDS: [&str; 2] = ["sun", "clear"];

/// Current conditions as reported by a weather provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature_c: f64,
    pub description: String,
    pub humidity_percent: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed_ms: Option<f64>,
    pub observed_at: DateTime<Utc>,
}

impl CurrentWeather {
    /// Whether the description mentions rain, drizzle or a thunderstorm
    pub fn mentions_precipitation(&self) -> bool {
        self.mentions_any(&PRECIPITATION_KEYWORDS)
    }

    pub fn mentions_sunshine(&self) -> bool {
        self.mentions_any(&SUNSHINE_KEYWORDS)
    }

    fn mentions_any(&self, keywords: &[&str]) -> bool {
        let description = self.description.to_lowercase();
        keywords.iter().any(|k| description.contains(k))
    }
}
