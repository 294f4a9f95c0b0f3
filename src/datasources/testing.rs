//! In-process weather provider for tests

use super::WeatherProvider;
use crate::error::{FarmWeatherError, Result};
use crate::models::{CurrentWeather, ForecastSample, WeatherForecast};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct StaticWeatherProvider {
    current: Option<CurrentWeather>,
    forecast: Option<WeatherForecast>,
    calls: AtomicUsize,
}

impl StaticWeatherProvider {
    /// Rainy, humid afternoon in Gulu with a two-day forecast
    pub fn gulu() -> Self {
        Self {
            current: Some(CurrentWeather {
                temperature_c: 24.5,
                description: "light rain".into(),
                humidity_percent: 82,
                wind_speed_ms: Some(3.1),
                observed_at: Utc::now(),
            }),
            forecast: Some(WeatherForecast {
                city: "Gulu".into(),
                samples: vec![
                    ForecastSample::new("2024-05-01 12:00:00", 21.0, 27.6, "light rain"),
                    ForecastSample::new("2024-05-01 15:00:00", 22.4, 29.1, "light rain"),
                    ForecastSample::new("2024-05-02 00:00:00", 17.8, 19.0, "clear sky"),
                ],
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            current: None,
            forecast: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_forecast(mut self, forecast: WeatherForecast) -> Self {
        self.forecast = Some(forecast);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for StaticWeatherProvider {
    async fn current_weather(&self, _location: &str) -> Result<CurrentWeather> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.current
            .clone()
            .ok_or_else(|| FarmWeatherError::DataSourceUnavailable("weather offline".into()))
    }

    async fn forecast(&self, _location: &str) -> Result<WeatherForecast> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.forecast
            .clone()
            .ok_or_else(|| FarmWeatherError::DataSourceUnavailable("forecast offline".into()))
    }
}
