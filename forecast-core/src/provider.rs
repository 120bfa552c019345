use crate::{
    Config,
    model::{RawForecast, Report},
    provider::prediction_service::PredictionServiceClient,
    state::ViewState,
};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod prediction_service;

/// Failure to obtain a forecast. Its message is shown to the user as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RetrievalError {
    #[error("Please enter a city name.")]
    EmptyCity,

    #[error("Invalid service URL '{0}'.")]
    InvalidUrl(String),

    #[error("Failed to reach the forecast service: {0}")]
    Request(String),

    #[error("Forecast service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse forecast response: {0}")]
    Parse(String),

    /// The service answered with an `{ "error": ... }` body.
    #[error("{0}")]
    Service(String),
}

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch(&self, city: &str) -> Result<RawForecast, RetrievalError>;
}

/// Construct the prediction service client from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let url = config.service_url();
    let client = PredictionServiceClient::new(&url, config.timeout()).map_err(|e| {
        anyhow::anyhow!(
            "{e}\n\
             Hint: run `forecast configure` or set FORECAST_SERVICE_URL."
        )
    })?;

    Ok(Box::new(client))
}

/// Run one fetch and collapse it into either a report or an error.
pub async fn fetch_view_state(provider: &dyn ForecastProvider, city: &str) -> ViewState {
    let mut state = ViewState::default();
    state.begin_fetch();

    let result = provider.fetch(city).await.map(|raw| Report::from_raw(&raw));
    state.finish(result);

    state
}
