//! Data types used by the forecast aggregation.

use serde::{Deserialize, Deserializer, Serialize};

/// One 3-hour forecast slot.
///
/// Deserializes from the provider's `{ "dt_txt": ..., "main": { "temp": ... } }`
/// shape; all other fields of the entry are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastSample {
    /// `YYYY-MM-DD HH:MM:SS`
    #[serde(rename = "dt_txt")]
    pub timestamp: String,
    #[serde(rename = "main", deserialize_with = "temp_of_main")]
    pub temperature_kelvin: f64,
}

fn temp_of_main<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    struct Main {
        temp: f64,
    }
    Ok(Main::deserialize(deserializer)?.temp)
}

impl ForecastSample {
    pub fn new(timestamp: impl Into<String>, temperature_kelvin: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            temperature_kelvin,
        }
    }
}

/// Average temperature for one day, in degrees Celsius rounded to 2 places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    /// `YYYY-MM-DD`
    pub date: String,
    pub average_temperature_celsius: f64,
}

impl DailyAggregate {
    pub fn new(date: impl Into<String>, average_temperature_celsius: f64) -> Self {
        Self {
            date: date.into(),
            average_temperature_celsius,
        }
    }
}

/// Selects how samples are bucketed into days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AggregationMode {
    /// Single-character day key. Drops the first sample of every new day
    /// and never flushes the last day.
    #[default]
    Legacy,
    /// Groups on the full date, counts every sample, flushes the last day.
    Calendar,
}

/// Parallel label/value arrays, the shape the chart accepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl ChartSeries {
    pub fn from_aggregates(aggregates: &[DailyAggregate]) -> Self {
        let (labels, data) = aggregates
            .iter()
            .map(|day| (day.date.clone(), day.average_temperature_celsius))
            .unzip();
        Self { labels, data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Lowest and highest value, or `None` for an empty series.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.data.iter().copied().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_series_splits_aggregates() {
        let series = ChartSeries::from_aggregates(&[
            DailyAggregate::new("2024-01-01", 3.5),
            DailyAggregate::new("2024-01-02", -1.25),
        ]);

        assert_eq!(series.labels, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(series.data, vec![3.5, -1.25]);
        assert_eq!(series.value_range(), Some((-1.25, 3.5)));
    }

    #[test]
    fn test_chart_series_empty() {
        let series = ChartSeries::from_aggregates(&[]);
        assert!(series.is_empty());
        assert_eq!(series.value_range(), None);
    }
}
