use chrono::{DateTime, Utc};

use crate::{
    classify::classify,
    model::{Prediction, RawForecast, RawPrediction, Report},
};

/// Label used when the service sends no description for a day.
pub const DEFAULT_WEATHER_LABEL: &str = "Clear";

/// Build a report stamped with the current time.
pub fn build(city: impl Into<String>, raw_predictions: &[RawPrediction]) -> Report {
    build_at(city, raw_predictions, Utc::now())
}

/// Build a report with an explicit generation timestamp.
///
/// Days are numbered from 1 in source order. The category is derived from the
/// raw label before it is defaulted.
pub fn build_at(
    city: impl Into<String>,
    raw_predictions: &[RawPrediction],
    generated_at: DateTime<Utc>,
) -> Report {
    let predictions = raw_predictions
        .iter()
        .enumerate()
        .map(|(i, raw)| to_prediction(i + 1, raw))
        .collect();

    Report { city: city.into(), generated_at, predictions }
}

fn to_prediction(day_index: usize, raw: &RawPrediction) -> Prediction {
    let label = raw.weather.as_deref().filter(|l| !l.is_empty());

    Prediction {
        day_index,
        category: classify(label),
        weather_label: label.unwrap_or(DEFAULT_WEATHER_LABEL).to_string(),
        precipitation: raw.precipitation.unwrap_or(0.0),
        temp_min: raw.temp_min,
        temp_max: raw.temp_max,
        wind: raw.wind,
    }
}

impl Report {
    pub fn from_raw(raw: &RawForecast) -> Self {
        build(raw.city.as_str(), &raw.predictions)
    }
}
