use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::Category;

/// One day as sent by the prediction service. Nothing here is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default)]
    pub precipitation: Option<f64>,
    pub temp_min: f64,
    pub temp_max: f64,
    pub wind: f64,
}

/// Success body of the prediction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecast {
    pub city: String,
    #[serde(default)]
    pub predictions: Vec<RawPrediction>,
}

/// Either body the prediction service may answer with.
///
/// The error arm is listed first so that `{ "error": ... }` never gets
/// mistaken for a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ForecastPayload {
    Error { error: String },
    Forecast(RawForecast),
}

/// Canonical, immutable day of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// 1-based position in the report.
    pub day_index: usize,
    pub category: Category,
    pub weather_label: String,
    pub precipitation: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub wind: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub city: String,
    pub generated_at: DateTime<Utc>,
    pub predictions: Vec<Prediction>,
}

impl Report {
    pub fn day_count(&self) -> usize {
        self.predictions.len()
    }
}

/// Human-readable failure shown in place of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub message: String,
}

impl ErrorResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl std::fmt::Display for ErrorResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
