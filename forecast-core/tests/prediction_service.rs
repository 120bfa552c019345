//! Integration tests for the prediction service client using wiremock.

use std::time::Duration;

use forecast_core::{
    Category, ForecastProvider, RetrievalError, fetch_view_state,
    provider::prediction_service::PredictionServiceClient,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn sample_forecast() -> serde_json::Value {
    serde_json::json!({
        "city": "Nairobi",
        "predictions": [
            {"day": "DAY 1", "weather": "Rain", "precipitation": 4.2,
             "temp_min": 14.5, "temp_max": 24.0, "wind": 3.1},
            {"day": "DAY 2", "weather": "Sunny", "precipitation": 0,
             "temp_min": 13.0, "temp_max": 26.5, "wind": 2.4},
            {"day": "DAY 3", "temp_min": 12.8, "temp_max": 25.1, "wind": 2.9}
        ]
    })
}

fn client(server: &MockServer) -> PredictionServiceClient {
    PredictionServiceClient::new(&server.uri(), Duration::from_secs(5)).expect("valid mock url")
}

#[tokio::test]
async fn fetches_and_parses_forecast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather/predict/nairobi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast()))
        .expect(1)
        .mount(&server)
        .await;

    let forecast = client(&server).fetch("nairobi").await.expect("forecast expected");

    assert_eq!(forecast.city, "Nairobi");
    assert_eq!(forecast.predictions.len(), 3);
    assert_eq!(forecast.predictions[2].weather, None);
}

#[tokio::test]
async fn view_state_holds_classified_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather/predict/nairobi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast()))
        .mount(&server)
        .await;

    let state = fetch_view_state(&client(&server), "nairobi").await;
    let report = state.report().expect("report expected");

    let categories: Vec<_> = report.predictions.iter().map(|p| p.category).collect();
    assert_eq!(categories, vec![Category::Rain, Category::Sunny, Category::Clear]);
    assert_eq!(report.predictions[2].weather_label, "Clear");
    assert!(state.error().is_none());
}

#[tokio::test]
async fn error_body_becomes_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather/predict/atlantis"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": "City not found"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).fetch("atlantis").await.unwrap_err();
    assert_eq!(err, RetrievalError::Service("City not found".into()));
    assert_eq!(err.to_string(), "City not found");

    let state = fetch_view_state(&client(&server), "atlantis").await;
    assert!(state.report().is_none());
    assert_eq!(state.error().map(|e| e.message.as_str()), Some("City not found"));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client(&server).fetch("paris").await.unwrap_err();
    assert_eq!(err, RetrievalError::Status { status: 503, body: "maintenance".into() });
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server).fetch("paris").await.unwrap_err();
    assert!(matches!(err, RetrievalError::Parse(_)));
}

#[tokio::test]
async fn blank_city_never_hits_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast()))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).fetch("   ").await.unwrap_err();
    assert_eq!(err, RetrievalError::EmptyCity);
}

#[tokio::test]
async fn city_is_sent_as_one_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather/predict/New%20York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "city": "New York",
            "predictions": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let forecast = client(&server).fetch("New York").await.expect("forecast expected");
    assert!(forecast.predictions.is_empty());
}
