//! Integration tests for HTTP handlers
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use application::{
    ApplicationError, EmailService, FloodPredictionConfig, FloodPredictionService,
    GeocodingService, HealthService, ImageLibraryService,
    ports::{
        BlockageClassifierPort, EmailPort, GeocodingPort, ModelStatus, ModelStatusPort,
        ObjectStoragePort, Place, WeatherModelPort, WeatherPort,
    },
};
use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use bytes::Bytes;
use chrono::{TimeZone, Utc};
use domain::{
    BlockagePrediction, BlockageState, FeatureAttribution, GeoLocation, ObservedOutcome,
    StationMetadata, WeatherFeatures, WeatherInputs, WeatherPrediction,
};
use presentation_http::{create_router, middleware::REQUEST_ID_HEADER, state::AppState};
use serde_json::{Value, json};
use tokio::sync::Mutex;

const JPEG: &[u8] = b"\xFF\xD8\xFF\xE0\x00\x10JFIF\x00drain";

fn features(weather: &str, precip: f64, rh: f64) -> WeatherFeatures {
    WeatherFeatures {
        inputs: WeatherInputs {
            app_temp: 29.0,
            clouds: 90.0,
            dewpt: 23.0,
            dhi: 80.0,
            dni: 500.0,
            elev_angle: 30.0,
            ghi: 400.0,
            pres: 1002.0,
            rh,
            slp: 1005.0,
            solar_rad: 200.0,
            temp: 26.0,
            uv: 3.0,
            vis: 4.0,
            wind_dir: 200.0,
            wind_spd: 6.0,
            hour: 14,
            month: 8,
        },
        outputs: ObservedOutcome {
            weather: weather.to_string(),
            precip,
        },
        metadata: StationMetadata {
            timezone: "Asia/Kolkata".to_string(),
            temp: 26.0,
            sources: vec!["analysis".to_string()],
            country_code: "IN".to_string(),
            city_name: "Mumbai".to_string(),
        },
        observed_at: Utc.with_ymd_and_hms(2024, 8, 1, 14, 0, 0).unwrap(),
    }
}

struct FakeWeather {
    features: WeatherFeatures,
    reachable: bool,
}

#[async_trait]
impl WeatherPort for FakeWeather {
    async fn current_features(
        &self,
        _location: &GeoLocation,
    ) -> Result<WeatherFeatures, ApplicationError> {
        if self.reachable {
            Ok(self.features.clone())
        } else {
            Err(ApplicationError::ExternalService(
                "Weatherbit returned 503".to_string(),
            ))
        }
    }
}

/// Echoes observed weather and classifies every image the same way
struct FakeModels {
    loaded: bool,
    blockage: BlockageState,
    confidence: f64,
}

#[async_trait]
impl WeatherModelPort for FakeModels {
    async fn predict(
        &self,
        features: &WeatherFeatures,
        explain: bool,
    ) -> Result<WeatherPrediction, ApplicationError> {
        let mut prediction = WeatherPrediction::from_observed(&features.outputs);
        if explain {
            prediction.attributions = Some(vec![FeatureAttribution {
                feature: "rh".to_string(),
                value: 0.42,
            }]);
        }
        Ok(prediction)
    }
}

#[async_trait]
impl BlockageClassifierPort for FakeModels {
    async fn classify(&self, _image: &[u8]) -> Result<BlockagePrediction, ApplicationError> {
        Ok(BlockagePrediction::new(self.blockage, self.confidence)?)
    }
}

#[async_trait]
impl ModelStatusPort for FakeModels {
    fn is_loaded(&self) -> bool {
        self.loaded
    }

    async fn model_statuses(&self) -> Vec<ModelStatus> {
        vec![ModelStatus::ready("drain_blockage")]
    }
}

struct FakeGeocoder(Option<Place>);

#[async_trait]
impl GeocodingPort for FakeGeocoder {
    async fn reverse_geocode(
        &self,
        _location: &GeoLocation,
    ) -> Result<Option<Place>, ApplicationError> {
        Ok(self.0.clone())
    }
}

struct FakeStorage(Vec<String>);

#[async_trait]
impl ObjectStoragePort for FakeStorage {
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, ApplicationError> {
        Ok(self
            .0
            .iter()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn get_object(&self, _key: &str) -> Result<Bytes, ApplicationError> {
        Ok(Bytes::from_static(b"hello"))
    }
}

#[derive(Default)]
struct RecordingEmail {
    sent: Mutex<Vec<Value>>,
}

#[async_trait]
impl EmailPort for RecordingEmail {
    async fn send(&self, payload: &Value) -> Result<Value, ApplicationError> {
        self.sent.lock().await.push(payload.clone());
        Ok(json!({"status": "success", "hasError": false}))
    }
}

struct Harness {
    weather: FakeWeather,
    models: FakeModels,
    place: Option<Place>,
    image_keys: Option<Vec<String>>,
    email: Arc<RecordingEmail>,
}

impl Harness {
    fn new() -> Self {
        Self {
            weather: FakeWeather {
                features: features("Heavy rain", 15.0, 50.0),
                reachable: true,
            },
            models: FakeModels {
                loaded: true,
                blockage: BlockageState::Full,
                confidence: 0.9,
            },
            place: Some(Place {
                city: Some("Mumbai".to_string()),
                address: Some("Colaba, Mumbai, Maharashtra, India".to_string()),
            }),
            image_keys: Some(vec![
                "NO BLOCKAGE/".to_string(),
                "NO BLOCKAGE/drain-01.jpg".to_string(),
            ]),
            email: Arc::new(RecordingEmail::default()),
        }
    }

    fn server(self) -> TestServer {
        let models = Arc::new(self.models);
        let prediction = FloodPredictionService::new(
            Arc::new(self.weather),
            models.clone(),
            models.clone(),
            models.clone(),
            FloodPredictionConfig::default(),
        );
        let images = self.image_keys.map(|keys| {
            Arc::new(ImageLibraryService::new(
                Arc::new(FakeStorage(keys)),
                "NO BLOCKAGE/",
            ))
        });

        let state = AppState {
            prediction: Arc::new(prediction),
            geocoding: Arc::new(GeocodingService::new(Arc::new(FakeGeocoder(self.place)))),
            images,
            email: Arc::new(EmailService::new(self.email)),
            health: Arc::new(HealthService::new(models)),
            upload_limit: 1024 * 1024,
        };

        TestServer::new(create_router(state)).expect("Failed to create test server")
    }
}

fn upload(request: &str) -> MultipartForm {
    MultipartForm::new()
        .add_part(
            "image",
            Part::bytes(JPEG.to_vec())
                .file_name("drain.jpg")
                .mime_type("image/jpeg"),
        )
        .add_text("request", request.to_string())
}

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn health_is_ok_with_request_id() {
        let server = Harness::new().server();

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert!(!response.header(REQUEST_ID_HEADER).is_empty());
    }

    #[tokio::test]
    async fn ready_when_models_serve() {
        let server = Harness::new().server();

        let response = server.get("/ready").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["ready"], true);
        assert_eq!(body["models"][0]["name"], "drain_blockage");
    }

    #[tokio::test]
    async fn not_ready_without_models() {
        let mut harness = Harness::new();
        harness.models.loaded = false;
        let server = harness.server();

        let response = server.get("/ready").await;

        response.assert_status_service_unavailable();
        let body: Value = response.json();
        assert_eq!(body["models_loaded"], false);
    }
}

mod prediction_tests {
    use super::*;

    #[tokio::test]
    async fn returns_full_assessment() {
        let server = Harness::new().server();

        let response = server
            .post("/api/v1/predict-flood")
            .multipart(upload(r#"{"lon": 72.8777, "lat": 19.076}"#))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["image"], "drain.jpg");
        assert_eq!(body["latitude"], 19.076);
        assert_eq!(body["longitude"], 72.8777);
        assert_eq!(body["prediction"]["flood_risk"], "High");
        assert_eq!(
            body["prediction"]["reason"],
            "Heavy rain, bad weather, and severe blockage detected."
        );
        assert_eq!(body["weather_prediction"]["weather"], "Heavy rain");
        assert_eq!(body["weather_data"]["rh"], 50.0);
        assert_eq!(body["weather_metadata"]["city_name"], "Mumbai");
        assert_eq!(body["weather_shap_value"][0]["feature"], "rh");
        assert_eq!(body["drain_blockage"], 0);
        assert_eq!(body["drain_blockage_prob"], 0.9);
        assert!(body["drain_blockage_shape_value"].is_null());
        assert!(body.get("drain_blockage_shape_value").is_some());
        assert!(body.get("drain_blockage_shap_value").is_none());
    }

    #[tokio::test]
    async fn accepts_trailing_slash_path() {
        let server = Harness::new().server();

        let response = server
            .post("/api/v1/predict-flood/")
            .multipart(upload(r#"{"lon": 72.8777, "lat": 19.076}"#))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["prediction"]["flood_risk"], "High");
    }

    #[tokio::test]
    async fn post_rain_humidity_is_moderate() {
        let mut harness = Harness::new();
        harness.weather.features = features("Fog", 0.0, 90.0);
        harness.models.blockage = BlockageState::Partial;
        harness.models.confidence = 0.68;
        let server = harness.server();

        let response = server
            .post("/api/v1/predict-flood")
            .multipart(upload(r#"{"lon": 72.8777, "lat": 19.076}"#))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["prediction"]["flood_risk"], "Moderate");
        assert_eq!(body["drain_blockage"], 2);
    }

    #[tokio::test]
    async fn missing_image_is_bad_request() {
        let server = Harness::new().server();

        let form = MultipartForm::new().add_text("request", r#"{"lon": 72.8, "lat": 19.0}"#);
        let response = server.post("/api/v1/predict-flood").multipart(form).await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["code"], "bad_request");
        assert!(body["error"].as_str().unwrap().contains("image"));
    }

    #[tokio::test]
    async fn malformed_request_field_is_bad_request() {
        let server = Harness::new().server();

        let response = server
            .post("/api/v1/predict-flood")
            .multipart(upload("lon=72.8"))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn out_of_range_coordinates_are_bad_request() {
        let server = Harness::new().server();

        let response = server
            .post("/api/v1/predict-flood")
            .multipart(upload(r#"{"lon": 72.8, "lat": 123.0}"#))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn non_image_upload_is_bad_request() {
        let server = Harness::new().server();

        let form = MultipartForm::new()
            .add_part(
                "image",
                Part::bytes(b"%PDF-1.4".to_vec()).file_name("report.pdf"),
            )
            .add_text("request", r#"{"lon": 72.8, "lat": 19.0}"#);
        let response = server.post("/api/v1/predict-flood").multipart(form).await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn unloaded_models_are_service_unavailable() {
        let mut harness = Harness::new();
        harness.models.loaded = false;
        let server = harness.server();

        let response = server
            .post("/api/v1/predict-flood")
            .multipart(upload(r#"{"lon": 72.8777, "lat": 19.076}"#))
            .await;

        response.assert_status_service_unavailable();
        let body: Value = response.json();
        assert_eq!(body["code"], "service_unavailable");
    }

    #[tokio::test]
    async fn weather_outage_is_bad_gateway() {
        let mut harness = Harness::new();
        harness.weather.reachable = false;
        let server = harness.server();

        let response = server
            .post("/api/v1/predict-flood")
            .multipart(upload(r#"{"lon": 72.8777, "lat": 19.076}"#))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
    }
}

mod geocoding_tests {
    use super::*;

    #[tokio::test]
    async fn resolves_city_and_address() {
        let server = Harness::new().server();

        let response = server
            .get("/api/v1/reverse-geocode")
            .add_query_param("lat", 18.92)
            .add_query_param("lon", 72.83)
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "city": "Mumbai",
            "address": "Colaba, Mumbai, Maharashtra, India"
        }));
    }

    #[tokio::test]
    async fn unknown_place_is_not_found() {
        let mut harness = Harness::new();
        harness.place = None;
        let server = harness.server();

        let response = server
            .get("/api/v1/reverse-geocode")
            .add_query_param("lat", -48.87)
            .add_query_param("lon", -123.39)
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn out_of_range_query_is_validation_error() {
        let server = Harness::new().server();

        let response = server
            .get("/api/v1/reverse-geocode")
            .add_query_param("lat", 95.0)
            .add_query_param("lon", 72.83)
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["code"], "validation_error");
    }
}

mod image_tests {
    use super::*;

    #[tokio::test]
    async fn returns_base64_image() {
        let server = Harness::new().server();

        let response = server.get("/api/v1/get-latest-s3-image").await;

        response.assert_status_ok();
        response.assert_json(&json!({"imageBase64": "aGVsbG8="}));
    }

    #[tokio::test]
    async fn empty_library_is_not_found() {
        let mut harness = Harness::new();
        harness.image_keys = Some(vec!["NO BLOCKAGE/".to_string()]);
        let server = harness.server();

        server
            .get("/api/v1/get-latest-s3-image")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn unconfigured_storage_is_service_unavailable() {
        let mut harness = Harness::new();
        harness.image_keys = None;
        let server = harness.server();

        server
            .get("/api/v1/get-latest-s3-image")
            .await
            .assert_status_service_unavailable();
    }
}

mod email_tests {
    use super::*;

    #[tokio::test]
    async fn forwards_payload_unchanged() {
        let harness = Harness::new();
        let email = harness.email.clone();
        let server = harness.server();

        let payload = json!({
            "recipients": [{"to": [{"email": "ops@example.com", "name": "Ops"}]}],
            "from": {"email": "alerts@example.com"},
            "domain": "example.com",
            "template_id": "flood_alert"
        });
        let response = server.post("/api/v1/send-email").json(&payload).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "success");
        assert_eq!(email.sent.lock().await.as_slice(), &[payload]);
    }

    #[tokio::test]
    async fn empty_recipients_are_rejected() {
        let harness = Harness::new();
        let email = harness.email.clone();
        let server = harness.server();

        let response = server
            .post("/api/v1/send-email")
            .json(&json!({"recipients": [], "template_id": "flood_alert"}))
            .await;

        response.assert_status_bad_request();
        assert!(email.sent.lock().await.is_empty());
    }
}

mod docs_tests {
    use super::*;

    #[tokio::test]
    async fn serves_openapi_document() {
        let server = Harness::new().server();

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body["paths"].get("/api/v1/predict-flood").is_some());
    }

    #[tokio::test]
    async fn serves_redoc_page() {
        let server = Harness::new().server();

        let response = server.get("/redoc").await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("Floodwatch API"));
    }
}
