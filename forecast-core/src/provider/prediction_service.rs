use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::model::{ForecastPayload, RawForecast};

use super::{ForecastProvider, RetrievalError};

/// Client for the prediction service's `/weather/predict/{city}` endpoint.
#[derive(Debug, Clone)]
pub struct PredictionServiceClient {
    base_url: Url,
    http: Client,
}

impl PredictionServiceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RetrievalError> {
        let base_url =
            Url::parse(base_url).map_err(|_| RetrievalError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(RetrievalError::InvalidUrl(base_url.to_string()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RetrievalError::Request(e.to_string()))?;

        Ok(Self { base_url, http })
    }

    fn predict_url(&self, city: &str) -> Result<Url, RetrievalError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RetrievalError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["weather", "predict", city]);
        Ok(url)
    }
}

#[async_trait]
impl ForecastProvider for PredictionServiceClient {
    #[instrument(skip(self))]
    async fn fetch(&self, city: &str) -> Result<RawForecast, RetrievalError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(RetrievalError::EmptyCity);
        }

        let url = self.predict_url(city)?;
        debug!(url = %url, "Fetching forecast");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| RetrievalError::Request(e.to_string()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| RetrievalError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(RetrievalError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let payload: ForecastPayload =
            serde_json::from_str(&body).map_err(|e| RetrievalError::Parse(e.to_string()))?;

        match payload {
            ForecastPayload::Forecast(forecast) => {
                debug!(days = forecast.predictions.len(), "Forecast received");
                Ok(forecast)
            }
            ForecastPayload::Error { error } => {
                warn!(error = %error, "Forecast service reported an error");
                Err(RetrievalError::Service(error))
            }
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> PredictionServiceClient {
        PredictionServiceClient::new(base, Duration::from_secs(5)).expect("valid base url")
    }

    #[test]
    fn predict_url_appends_encoded_city() {
        let url = client("http://localhost:8000").predict_url("New York").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/weather/predict/New%20York");
    }

    #[test]
    fn predict_url_keeps_base_path() {
        let url = client("https://example.com/api/").predict_url("Lyon").unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/weather/predict/Lyon");
    }

    #[test]
    fn rejects_unparsable_base() {
        let err = PredictionServiceClient::new("localhost:8000 x", Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidUrl(_)));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }
}
