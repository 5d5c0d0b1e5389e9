//! Floodwatch HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::{
    EmailService, FloodPredictionConfig, FloodPredictionService, GeocodingService, HealthService,
    ImageLibraryService,
};
use axum::http::{HeaderValue, Method};
use infrastructure::{
    AppConfig, GeocodingAdapter, ModelAdapter, Msg91EmailAdapter, S3StorageAdapter,
    SecurityValidator, ServerConfig, WeatherAdapter, init_logging,
};
use presentation_http::{error::set_expose_internal_errors, routes, state::AppState};
use tokio::{net::TcpListener, signal, sync::watch};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Room for the multipart envelope and the `request` field on top of the image
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "Floodwatch starting"
    );

    let warnings = config.validate();
    SecurityValidator::log_warnings(&warnings);
    if SecurityValidator::should_block_startup(&config, &warnings) {
        anyhow::bail!("Refusing to start in production with critical configuration issues");
    }

    set_expose_internal_errors(!config.environment.is_production());

    let state = build_state(&config)?;
    let app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server));

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, docs = %format!("http://{addr}/docs"), "Server listening");

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let (stopping_tx, mut stopping_rx) = watch::channel(false);

    let server = async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                info!(timeout = ?shutdown_timeout, "Waiting for connections to close");
                let _ = stopping_tx.send(true);
            })
            .await
    };
    let deadline = async move {
        let _ = stopping_rx.wait_for(|stopping| *stopping).await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    tokio::select! {
        result = server => result?,
        () = deadline => warn!("Shutdown timeout elapsed, dropping open connections"),
    }

    info!("Server shutdown complete");

    Ok(())
}

/// Wire adapters into the application services
fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let weather = WeatherAdapter::new(config.weather.to_client_config())
        .context("Failed to initialize weather client")?;
    let geocoder = GeocodingAdapter::new(&config.geocoding.to_client_config())
        .context("Failed to initialize geocoding client")?;
    let email = Msg91EmailAdapter::new(config.email.to_client_config())
        .context("Failed to initialize MSG91 client")?;

    // Model loading failures leave the server up; /ready and predictions report them
    let models = Arc::new(ModelAdapter::load(&config.models));
    if let Some(reason) = models.load_error() {
        warn!(%reason, "Starting without prediction models");
    }

    let images = if config.storage.bucket.is_some() {
        let storage =
            S3StorageAdapter::new(&config.storage).context("Failed to initialize S3 storage")?;
        Some(Arc::new(ImageLibraryService::new(
            Arc::new(storage),
            config.storage.prefix.clone(),
        )))
    } else {
        warn!("storage.bucket not set, reference images are disabled");
        None
    };

    let prediction = FloodPredictionService::new(
        Arc::new(weather),
        models.clone(),
        models.clone(),
        models.clone(),
        FloodPredictionConfig {
            max_image_bytes: config.server.max_upload_bytes,
            ..FloodPredictionConfig::default()
        },
    );

    Ok(AppState {
        prediction: Arc::new(prediction),
        geocoding: Arc::new(GeocodingService::new(Arc::new(geocoder))),
        images,
        email: Arc::new(EmailService::new(Arc::new(email))),
        health: Arc::new(HealthService::new(models)),
        upload_limit: config.server.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD),
    })
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    if server.allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
