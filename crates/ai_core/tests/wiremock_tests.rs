//! Integration tests for the model serving client using WireMock
//!
//! These tests mock the TF-Serving REST API to verify client behavior without
//! requiring an actual model server.

use std::io::Write;
use std::sync::Arc;

use ai_core::{
    BlockageClassifier, FeatureScaler, ModelContext, ModelServingConfig, ModelServingError,
    ModelState, ServingClient, WeatherModel, WeatherModelMode,
};
use chrono::{TimeZone, Utc};
use domain::{
    BlockageState, ObservedOutcome, StationMetadata, WeatherFeatures, WeatherInputs,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn serving_for(server: &MockServer) -> Arc<ServingClient> {
    Arc::new(ServingClient::new(server.uri(), 5000).unwrap())
}

fn features() -> WeatherFeatures {
    WeatherFeatures {
        inputs: WeatherInputs {
            app_temp: 30.0,
            clouds: 90.0,
            dewpt: 24.0,
            dhi: 90.0,
            dni: 600.0,
            elev_angle: 35.0,
            ghi: 500.0,
            pres: 1002.0,
            rh: 80.0,
            slp: 1004.0,
            solar_rad: 150.0,
            temp: 30.0,
            uv: 2.0,
            vis: 3.0,
            wind_dir: 240.0,
            wind_spd: 5.0,
            hour: 9,
            month: 7,
        },
        outputs: ObservedOutcome {
            weather: "Light rain".to_string(),
            precip: 1.5,
        },
        metadata: StationMetadata {
            timezone: "Asia/Kolkata".to_string(),
            temp: 30.0,
            sources: vec![],
            country_code: "IN".to_string(),
            city_name: "Mumbai".to_string(),
        },
        observed_at: Utc.with_ymd_and_hms(2024, 7, 15, 9, 0, 0).unwrap(),
    }
}

fn two_column_scaler() -> Arc<FeatureScaler> {
    Arc::new(
        FeatureScaler::new(
            vec!["rh".to_string(), "temp".to_string()],
            vec![70.0, 25.0],
            vec![10.0, 5.0],
        )
        .unwrap(),
    )
}

// =============================================================================
// Blockage Classifier Tests
// =============================================================================

#[tokio::test]
async fn classify_sends_base64_and_picks_argmax() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/models/drain_blockage:predict"))
        .and(body_partial_json(
            serde_json::json!({"instances": [{"b64": "/9j/"}]}),
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"predictions": [[0.08, 0.02, 0.9]]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let classifier = BlockageClassifier::new(serving_for(&server), "drain_blockage");
    let prediction = classifier.classify(&[0xFF, 0xD8, 0xFF]).await.unwrap();

    assert_eq!(prediction.state, BlockageState::Partial);
    assert!((prediction.confidence - 0.9).abs() < 1e-9);
    assert!(prediction.attributions.is_none());
}

#[tokio::test]
async fn classify_passes_attributions_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/models/drain_blockage:predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "predictions": [[0.95, 0.03, 0.02]],
            "attributions": [[0.1, 0.2, 0.3, 0.4]]
        })))
        .mount(&server)
        .await;

    let classifier = BlockageClassifier::new(serving_for(&server), "drain_blockage");
    let prediction = classifier.classify(b"img").await.unwrap();

    assert_eq!(prediction.state, BlockageState::Full);
    assert_eq!(prediction.attributions, Some(vec![0.1, 0.2, 0.3, 0.4]));
}

#[tokio::test]
async fn classify_rejects_wrong_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/models/drain_blockage:predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"predictions": [[0.3, 0.7]]})),
        )
        .mount(&server)
        .await;

    let classifier = BlockageClassifier::new(serving_for(&server), "drain_blockage");
    let err = classifier.classify(b"img").await.unwrap_err();
    assert!(matches!(err, ModelServingError::InvalidResponse(_)));
}

#[tokio::test]
async fn unknown_model_is_not_available() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/models/drain_blockage:predict"))
        .respond_with(ResponseTemplate::new(404).set_body_json(
            serde_json::json!({"error": "Servable not found for request: Latest(drain_blockage)"}),
        ))
        .mount(&server)
        .await;

    let classifier = BlockageClassifier::new(serving_for(&server), "drain_blockage");
    let err = classifier.classify(b"img").await.unwrap_err();
    assert!(matches!(err, ModelServingError::ModelNotAvailable(_)));
}

#[tokio::test]
async fn server_error_is_reported_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/models/drain_blockage:predict"))
        .respond_with(ResponseTemplate::new(500).set_body_string("OOM"))
        .mount(&server)
        .await;

    let classifier = BlockageClassifier::new(serving_for(&server), "drain_blockage");
    let err = classifier.classify(b"img").await.unwrap_err();
    match err {
        ModelServingError::ServerError(msg) => assert!(msg.contains("OOM")),
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// Weather Model Tests
// =============================================================================

#[tokio::test]
async fn remote_weather_model_sends_scaled_row() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/models/weather:predict"))
        .and(body_partial_json(serde_json::json!({
            "instances": [[1.0, 1.0]],
            "explain": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "predictions": [{"weather": "Heavy rain", "precip": 12.5}],
            "attributions": [[0.6, -0.2]]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let model = WeatherModel::remote(serving_for(&server), "weather", two_column_scaler());
    let prediction = model.predict(&features(), true).await.unwrap();

    assert_eq!(prediction.weather, "Heavy rain");
    assert!((prediction.precip - 12.5).abs() < 1e-9);
    let attributions = prediction.attributions.unwrap();
    assert_eq!(attributions.len(), 2);
    assert_eq!(attributions[0].feature, "rh");
    assert!((attributions[0].value - 0.6).abs() < 1e-9);
}

#[tokio::test]
async fn remote_weather_model_skips_attributions_when_not_asked() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/models/weather:predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "predictions": [{"weather": "Clear", "precip": 0.0}],
            "attributions": [[0.6, -0.2]]
        })))
        .mount(&server)
        .await;

    let model = WeatherModel::remote(serving_for(&server), "weather", two_column_scaler());
    let prediction = model.predict(&features(), false).await.unwrap();
    assert!(prediction.attributions.is_none());
}

#[tokio::test]
async fn remote_weather_model_rejects_empty_predictions() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/models/weather:predict"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"predictions": []})),
        )
        .mount(&server)
        .await;

    let model = WeatherModel::remote(serving_for(&server), "weather", two_column_scaler());
    let err = model.predict(&features(), false).await.unwrap_err();
    assert!(matches!(err, ModelServingError::InvalidResponse(_)));
}

#[tokio::test]
async fn observed_weather_model_makes_no_request() {
    let prediction = WeatherModel::observed()
        .predict(&features(), true)
        .await
        .unwrap();
    assert_eq!(prediction.weather, "Light rain");
    assert!((prediction.precip - 1.5).abs() < 1e-9);
    assert!(prediction.attributions.is_none());
}

// =============================================================================
// Model Status Tests
// =============================================================================

#[tokio::test]
async fn model_state_available() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models/drain_blockage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model_version_status": [{
                "version": "3",
                "state": "AVAILABLE",
                "status": {"error_code": "OK", "error_message": ""}
            }]
        })))
        .mount(&server)
        .await;

    let state = serving_for(&server)
        .model_state("drain_blockage")
        .await
        .unwrap();
    assert_eq!(state, ModelState::Available);
}

#[tokio::test]
async fn model_state_loading() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model_version_status": [{"version": "1", "state": "LOADING"}]
        })))
        .mount(&server)
        .await;

    let state = serving_for(&server).model_state("weather").await.unwrap();
    assert_eq!(state, ModelState::NotReady("LOADING".to_string()));
}

#[tokio::test]
async fn context_reports_every_served_model() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models/drain_blockage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model_version_status": [{"version": "1", "state": "AVAILABLE"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/models/weather"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut scaler = tempfile::NamedTempFile::new().unwrap();
    write!(
        scaler,
        r#"{{"feature_names": ["rh"], "mean": [70.0], "scale": [10.0]}}"#
    )
    .unwrap();

    let context = ModelContext::load(&ModelServingConfig {
        base_url: server.uri(),
        weather_mode: WeatherModelMode::Remote,
        scaler_path: scaler.path().to_path_buf(),
        input_columns: vec!["rh".to_string()],
        ..ModelServingConfig::default()
    })
    .unwrap();

    let states = context.model_states().await;
    assert_eq!(states.len(), 2);
    assert_eq!(states[0].0, "drain_blockage");
    assert!(matches!(states[0].1, Ok(ModelState::Available)));
    assert!(matches!(
        states[1].1,
        Err(ModelServingError::ModelNotAvailable(_))
    ));
}
