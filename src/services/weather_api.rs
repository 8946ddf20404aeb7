//! Trait for the weather provider a session talks to.

use anyhow::Result;

use crate::forecast::ForecastSample;
use crate::weather::CurrentWeather;

/// Abstraction over a current-weather + short-term forecast provider
/// (e.g., OpenWeatherMap).
#[async_trait::async_trait]
pub trait WeatherApi: Send + Sync {
    /// Current conditions for `city`, temperatures in Celsius.
    async fn current_weather(&self, city: &str) -> Result<CurrentWeather>;

    /// 3-hour forecast slots for `city`, oldest first, temperatures in Kelvin.
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastSample>>;
}
