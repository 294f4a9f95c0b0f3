use super::WeatherProvider;
use crate::config::OpenWeatherMapConfig;
use crate::error::{FarmWeatherError, Result};
use crate::models::{CurrentWeather, ForecastSample, WeatherForecast};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
    coordinates: RwLock<HashMap<String, Coordinates>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Coordinates {
    lat: f64,
    lon: f64,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmGeocodeResult {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    #[serde(default)]
    wind: Option<OwmWind>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
    city: OwmCity,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt_txt: String,
    main: OwmForecastMain,
    weather: Vec<OwmWeather>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastMain {
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCity {
    name: String,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            coordinates: RwLock::new(HashMap::new()),
        })
    }

    /// Fetch current conditions in metric units
    pub async fn fetch_current(&self, location: &str) -> Result<CurrentWeather> {
        let coords = self.coordinates(location).await?;
        let url = self.endpoint("/data/2.5/weather", coords)?;
        let response: OwmCurrentResponse = self.get_json(url).await?;
        convert_current(response)
    }

    /// Fetch the 5-day/3-hour forecast in metric units
    pub async fn fetch_forecast(&self, location: &str) -> Result<WeatherForecast> {
        let coords = self.coordinates(location).await?;
        let url = self.endpoint("/data/2.5/forecast", coords)?;
        let response: OwmForecastResponse = self.get_json(url).await?;
        Ok(convert_forecast(response))
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self, location: &str) -> Result<bool> {
        let coords = self.coordinates(location).await?;
        let url = self.endpoint("/data/2.5/weather", coords)?;

        let response = self.client.get(url).send().await.map_err(unavailable)?;
        Ok(response.status().is_success())
    }

    /// Resolve a place name through the direct geocoding API, caching hits
    async fn coordinates(&self, location: &str) -> Result<Coordinates> {
        let location = location.trim();
        if location.is_empty() {
            return Err(FarmWeatherError::InvalidData("No location provided".into()));
        }

        let key = location.to_lowercase();
        if let Some(coords) = self.coordinates.read().await.get(&key) {
            return Ok(*coords);
        }

        let url = reqwest::Url::parse_with_params(
            &format!("{}/geo/1.0/direct", self.config.base_url),
            &[("q", location), ("limit", "1"), ("appid", self.api_key()?)],
        )
        .map_err(|e| FarmWeatherError::Config(format!("Invalid OpenWeatherMap URL: {}", e)))?;

        let results: Vec<OwmGeocodeResult> = self.get_json(url).await?;
        let first = results.first().ok_or_else(|| {
            FarmWeatherError::NotFound(format!("Could not find coordinates for location: {}", location))
        })?;

        let coords = Coordinates {
            lat: first.lat,
            lon: first.lon,
        };
        tracing::debug!("Geocoded {} to {:.4},{:.4}", location, coords.lat, coords.lon);
        self.coordinates.write().await.insert(key, coords);

        Ok(coords)
    }

    fn endpoint(&self, path: &str, coords: Coordinates) -> Result<reqwest::Url> {
        let lat = coords.lat.to_string();
        let lon = coords.lon.to_string();
        reqwest::Url::parse_with_params(
            &format!("{}{}", self.config.base_url, path),
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key()?),
                ("units", "metric"),
            ],
        )
        .map_err(|e| FarmWeatherError::Config(format!("Invalid OpenWeatherMap URL: {}", e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: reqwest::Url) -> Result<T> {
        let response = self.client.get(url).send().await.map_err(unavailable)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FarmWeatherError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            FarmWeatherError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })
    }

    fn api_key(&self) -> Result<&str> {
        let key = self.config.api_key.trim();
        // An unresolved ${VAR} placeholder means the environment variable was never set
        if key.is_empty() || key.starts_with("${") {
            return Err(FarmWeatherError::Config(
                "OpenWeatherMap API key is not configured".into(),
            ));
        }
        Ok(key)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapClient {
    async fn current_weather(&self, location: &str) -> Result<CurrentWeather> {
        self.fetch_current(location).await
    }

    async fn forecast(&self, location: &str) -> Result<WeatherForecast> {
        self.fetch_forecast(location).await
    }
}

fn unavailable(e: reqwest::Error) -> FarmWeatherError {
    if e.is_timeout() {
        FarmWeatherError::DataSourceUnavailable("OpenWeatherMap request timed out".into())
    } else {
        FarmWeatherError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
    }
}

fn convert_current(response: OwmCurrentResponse) -> Result<CurrentWeather> {
    let description = response
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or_else(|| FarmWeatherError::InvalidData("Weather response has no conditions".into()))?;

    Ok(CurrentWeather {
        temperature_c: response.main.temp,
        description,
        humidity_percent: response.main.humidity.round().clamp(0.0, 100.0) as u32,
        wind_speed_ms: response.wind.map(|w| w.speed),
        observed_at: DateTime::from_timestamp(response.dt, 0).unwrap_or_else(Utc::now),
    })
}

fn convert_forecast(response: OwmForecastResponse) -> WeatherForecast {
    let samples = response
        .list
        .into_iter()
        .map(|item| {
            let description = item
                .weather
                .into_iter()
                .next()
                .map(|w| w.description)
                .unwrap_or_default();
            ForecastSample::new(item.dt_txt, item.main.temp_min, item.main.temp_max, description)
        })
        .collect();

    WeatherForecast {
        city: response.city.name,
        samples,
    }
}
