pub mod openweathermap;
#[cfg(test)]
pub mod testing;

pub use openweathermap::OpenWeatherMapClient;

use crate::error::Result;
use crate::models::{CurrentWeather, WeatherForecast};
use async_trait::async_trait;

/// Source of weather data for a named place
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, location: &str) -> Result<CurrentWeather>;

    async fn forecast(&self, location: &str) -> Result<WeatherForecast>;
}
