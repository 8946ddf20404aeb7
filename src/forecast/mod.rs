//! Daily temperature aggregation over the 3-hour forecast.
//!
//! The provider returns one sample every three hours. This module reduces
//! that list into one average per day and reshapes the result into the
//! parallel `labels`/`data` arrays the chart consumes.

pub mod aggregate;
pub mod types;
pub mod utility;

pub use aggregate::{AggregateError, aggregate, aggregate_calendar_days, aggregate_with};
pub use types::{AggregationMode, ChartSeries, DailyAggregate, ForecastSample};
