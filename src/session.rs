//! One user's search session: the map layer, the popup overlay, the chart
//! and the error line, all owned in one place and reset between searches.

use tracing::{error, info, warn};

use crate::chart::ForecastChart;
use crate::forecast::{AggregationMode, ChartSeries, DailyAggregate, aggregate_with};
use crate::map::{MapView, Marker, Popup};
use crate::services::weather_api::WeatherApi;
use crate::weather::{WeatherSummary, validate_city};

/// Shown for every failed search, whatever the cause.
pub const SEARCH_FAILED_MESSAGE: &str = "Please enter a valid city name";

/// A failed search. Displays as [`SEARCH_FAILED_MESSAGE`]; the underlying
/// cause is kept as the error source.
#[derive(Debug, thiserror::Error)]
#[error("{}", SEARCH_FAILED_MESSAGE)]
pub struct SearchError {
    #[source]
    cause: anyhow::Error,
}

impl SearchError {
    pub fn cause(&self) -> &anyhow::Error {
        &self.cause
    }
}

/// Everything a successful search produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub summary: WeatherSummary,
    pub daily: Vec<DailyAggregate>,
}

#[derive(Debug, Default)]
pub struct Session {
    map: MapView,
    chart: Option<ForecastChart>,
    error_message: Option<String>,
    mode: AggregationMode,
}

impl Session {
    pub fn new(mode: AggregationMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn map(&self) -> &MapView {
        &self.map
    }

    pub fn chart(&self) -> Option<&ForecastChart> {
        self.chart.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Clears markers and popup, destroys the chart and clears the error.
    pub fn reset(&mut self) {
        self.map.clear_markers();
        self.map.remove_popup();
        self.chart = None;
        self.error_message = None;
    }

    /// Runs one search for `input` against `api`.
    ///
    /// Taking `&mut self` keeps searches on a session strictly sequential.
    ///
    /// # Errors
    ///
    /// Empty input, provider failures and malformed forecast data all end in
    /// a [`SearchError`]; the map is left empty and
    /// [`Session::error_message`] is set.
    #[tracing::instrument(skip(self, api))]
    pub async fn search<A>(&mut self, api: &A, input: &str) -> Result<SearchResult, SearchError>
    where
        A: WeatherApi + ?Sized,
    {
        self.reset();

        match self.run(api, input).await {
            Ok(result) => {
                self.error_message = None;
                info!(place = %result.summary.name, days = result.daily.len(), "Search complete");
                Ok(result)
            }
            Err(cause) => {
                let chain = format!("{cause:#}");
                error!(error = %chain, "Search failed");
                self.map.remove_popup();
                self.map.clear_markers();
                self.error_message = Some(SEARCH_FAILED_MESSAGE.to_string());
                Err(SearchError { cause })
            }
        }
    }

    async fn run<A>(&mut self, api: &A, input: &str) -> anyhow::Result<SearchResult>
    where
        A: WeatherApi + ?Sized,
    {
        let city = validate_city(input)?;

        let current = api.current_weather(city).await?;
        let summary = WeatherSummary::from_current(&current)?;
        let (lon, lat) = (current.coord.lon, current.coord.lat);

        self.map.clear_markers();
        self.map.add_marker(Marker::at(lon, lat));
        self.map.set_popup(Popup::for_summary(&summary, lon, lat));

        let samples = api.forecast(city).await?;
        let daily = aggregate_with(self.mode, &samples)?;
        if daily.is_empty() {
            warn!(slots = samples.len(), "Forecast produced no complete days");
        }

        self.chart = Some(ForecastChart::new(ChartSeries::from_aggregates(&daily)));

        Ok(SearchResult { summary, daily })
    }
}
