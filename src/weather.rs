//! OpenWeatherMap response shapes and the search-input check.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::forecast::ForecastSample;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/w";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
}

/// Body of `/data/2.5/weather` requested with `units=metric`.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    pub coord: Coord,
    pub weather: Vec<Condition>,
    pub main: MainReadings,
}

impl CurrentWeather {
    /// The provider lists conditions most-significant first.
    pub fn primary_condition(&self) -> Result<&Condition> {
        match self.weather.first() {
            Some(condition) => Ok(condition),
            None => bail!("weather response for '{}' has no conditions", self.name),
        }
    }
}

/// Body of `/data/2.5/forecast`. Temperatures are Kelvin.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastSample>,
}

/// What a successful search hands back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSummary {
    pub name: String,
    pub weather: String,
    pub description: String,
    pub temperature: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub icon: String,
}

impl WeatherSummary {
    pub fn from_current(current: &CurrentWeather) -> Result<Self> {
        let condition = current.primary_condition()?;
        Ok(Self {
            name: current.name.clone(),
            weather: condition.main.clone(),
            description: condition.description.clone(),
            temperature: current.main.temp,
            temp_min: current.main.temp_min,
            temp_max: current.main.temp_max,
            icon: icon_url(&condition.icon),
        })
    }
}

pub fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}.png")
}

/// Rejects empty input before any request is made.
pub fn validate_city(input: &str) -> Result<&str> {
    let city = input.trim();
    if city.is_empty() {
        bail!("Please enter a city name");
    }
    Ok(city)
}
