use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use tracing::info;

use crate::fetch::auth::UrlParam;
use crate::fetch::{BasicClient, HttpClient, fetch_json};
use crate::forecast::ForecastSample;
use crate::services::weather_api::WeatherApi;
use crate::weather::{CurrentWeather, ForecastResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

pub struct OpenWeatherClient<C> {
    http: C,
    base_url: Url,
}

impl OpenWeatherClient<UrlParam<BasicClient>> {
    /// Builds a client that appends `appid=<api_key>` to every request.
    pub fn new(base_url: &str, api_key: String) -> Result<Self> {
        Self::with_http(base_url, UrlParam::appid(BasicClient::new()?, api_key))
    }
}

impl<C: HttpClient> OpenWeatherClient<C> {
    pub fn with_http(base_url: &str, http: C) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid OpenWeatherMap base URL '{base_url}'"))?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_url.join(path)?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }
}

#[async_trait]
impl<C: HttpClient> WeatherApi for OpenWeatherClient<C> {
    #[tracing::instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<CurrentWeather> {
        let url = self.endpoint("/data/2.5/weather", &[("q", city), ("units", "metric")])?;
        let current: CurrentWeather = fetch_json(&self.http, url)
            .await
            .with_context(|| format!("current weather request for '{city}' failed"))?;

        info!(
            place = %current.name,
            weather = current.weather.first().map(|w| w.main.as_str()).unwrap_or(""),
            description = current.weather.first().map(|w| w.description.as_str()).unwrap_or(""),
            temperature = current.main.temp,
            "Current weather fetched"
        );
        Ok(current)
    }

    #[tracing::instrument(skip(self))]
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastSample>> {
        let url = self.endpoint("/data/2.5/forecast", &[("q", city)])?;
        let forecast: ForecastResponse = fetch_json(&self.http, url)
            .await
            .with_context(|| format!("forecast request for '{city}' failed"))?;

        info!(slots = forecast.list.len(), "Forecast fetched");
        Ok(forecast.list)
    }
}
