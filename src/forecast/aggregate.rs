use crate::forecast::types::{AggregationMode, DailyAggregate, ForecastSample};
use crate::forecast::utility::average_celsius;
use tracing::debug;

/// Byte offset of the character used to detect a change of day.
const DAY_KEY_INDEX: usize = 9;

/// Length of the `YYYY-MM-DD` prefix of a timestamp.
const DATE_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    #[error("malformed forecast timestamp '{0}': expected 'YYYY-MM-DD HH:MM:SS'")]
    MalformedTimestamp(String),
}

fn day_key(sample: &ForecastSample) -> Result<u8, AggregateError> {
    sample
        .timestamp
        .as_bytes()
        .get(DAY_KEY_INDEX)
        .copied()
        .ok_or_else(|| AggregateError::MalformedTimestamp(sample.timestamp.clone()))
}

fn date_of(sample: &ForecastSample) -> Result<&str, AggregateError> {
    sample
        .timestamp
        .get(..DATE_LEN)
        .ok_or_else(|| AggregateError::MalformedTimestamp(sample.timestamp.clone()))
}

/// Reduces a time-ordered forecast into one average per day, in order of
/// first appearance.
///
/// A day boundary is detected when the character at index 9 of the
/// timestamp changes. Two behaviours are kept deliberately:
///
/// - the sample that crosses a boundary is not counted toward its own day;
/// - the day still in progress when the input ends is never emitted.
///
/// A group left with no samples (a day represented by a single slot) is
/// skipped rather than averaged. Input is assumed sorted; that is not checked.
///
/// # Errors
///
/// Returns [`AggregateError::MalformedTimestamp`] when a timestamp is too
/// short to carry a day key or a date.
pub fn aggregate(samples: &[ForecastSample]) -> Result<Vec<DailyAggregate>, AggregateError> {
    let Some(first) = samples.first() else {
        return Ok(Vec::new());
    };

    let mut current_key = day_key(first)?;
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut days = Vec::new();

    for (i, sample) in samples.iter().enumerate() {
        let key = day_key(sample)?;
        if key == current_key {
            count += 1;
            sum += sample.temperature_kelvin;
            continue;
        }

        // `i > 0` here: the first sample always matches its own key.
        let previous = &samples[i - 1];
        let date = date_of(previous)?;
        match average_celsius(sum, count) {
            Some(avg) => days.push(DailyAggregate::new(date, avg)),
            None => debug!(date, "Skipping day with no counted samples"),
        }

        count = 0;
        sum = 0.0;
        current_key = key;
    }

    Ok(days)
}

/// Groups on the full `YYYY-MM-DD` prefix, counts every sample and emits the
/// final day as well.
///
/// # Errors
///
/// Returns [`AggregateError::MalformedTimestamp`] for a timestamp without a
/// date prefix.
pub fn aggregate_calendar_days(
    samples: &[ForecastSample],
) -> Result<Vec<DailyAggregate>, AggregateError> {
    let mut days = Vec::new();
    let mut current: Option<(&str, f64, usize)> = None;

    for sample in samples {
        let date = date_of(sample)?;
        current = match current {
            Some((day, sum, count)) if day == date => {
                Some((day, sum + sample.temperature_kelvin, count + 1))
            }
            Some((day, sum, count)) => {
                if let Some(avg) = average_celsius(sum, count) {
                    days.push(DailyAggregate::new(day, avg));
                }
                Some((date, sample.temperature_kelvin, 1))
            }
            None => Some((date, sample.temperature_kelvin, 1)),
        };
    }

    if let Some((day, sum, count)) = current {
        if let Some(avg) = average_celsius(sum, count) {
            days.push(DailyAggregate::new(day, avg));
        }
    }

    Ok(days)
}

/// Dispatches to [`aggregate`] or [`aggregate_calendar_days`].
pub fn aggregate_with(
    mode: AggregationMode,
    samples: &[ForecastSample],
) -> Result<Vec<DailyAggregate>, AggregateError> {
    match mode {
        AggregationMode::Legacy => aggregate(samples),
        AggregationMode::Calendar => aggregate_calendar_days(samples),
    }
}
