// Eventdesk server
// Decision: HTTP and gRPC share one EventEngine and run joined
// Decision: In-memory dev mode when DATABASE_URL is unset

use std::sync::Arc;

use anyhow::{Context, Result};
use eventdesk_core::telemetry::{init_telemetry, TelemetryConfig};
use eventdesk_core::{EngineConfig, EventEngine, EventService, RequiredFieldsValidator};
use eventdesk_server::grpc_service::EventServiceImpl;
use eventdesk_server::storage::{seed_sample_events, StorageBackend};
use eventdesk_server::{build_app, serve, HealthState, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; real environment variables still apply
    let _ = dotenvy::dotenv();

    // Initialize telemetry with OpenTelemetry support
    // Configure via environment variables:
    // - OTEL_SERVICE_NAME: Service name (default: "eventdesk-server")
    // - OTEL_EXPORTER_OTLP_ENDPOINT: OTLP endpoint (e.g., "http://localhost:4317")
    // - RUST_LOG: Log filter (default: "eventdesk_server=debug,eventdesk_core=info,tower_http=debug")
    // - LOG_FORMAT: "json" for JSON lines
    let mut telemetry_config = TelemetryConfig::from_env();
    if telemetry_config.service_name == "eventdesk" {
        telemetry_config.service_name = "eventdesk-server".to_string();
    }
    if telemetry_config.log_filter.is_none() {
        telemetry_config.log_filter =
            Some("eventdesk_server=debug,eventdesk_core=info,tower_http=debug".to_string());
    }
    telemetry_config.service_version = Some(env!("CARGO_PKG_VERSION").to_string());

    // Keep the guard alive for the lifetime of the application
    let _telemetry_guard = init_telemetry(telemetry_config);

    tracing::info!("eventdesk-server starting...");

    let config = ServerConfig::from_env().context("Invalid configuration")?;

    // Storage
    let backend = StorageBackend::from_config(&config).await?;
    let store = backend.store();

    if config.seed_sample_events {
        seed_sample_events(store.as_ref())
            .await
            .context("Failed to seed sample events")?;
    }

    // Engine shared by both transports
    let engine = EventEngine::new(
        store,
        Arc::new(RequiredFieldsValidator),
        EngineConfig {
            store_timeout: config.store_timeout,
        },
    );
    let service: Arc<dyn EventService> = Arc::new(engine);
    tracing::info!(
        storage = backend.name(),
        store_timeout_ms = config.store_timeout.as_millis() as u64,
        "Event engine ready"
    );

    if !config.api_prefix.is_empty() {
        tracing::info!(prefix = %config.api_prefix, "API prefix configured");
    }
    if config.cors_allowed_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?config.cors_allowed_origins, "CORS origins configured");
    }

    let app = build_app(
        service.clone(),
        HealthState {
            storage: backend.name(),
        },
        &config.api_prefix,
        config.cors_allowed_origins.clone(),
    );

    let listener = tokio::net::TcpListener::bind(config.http_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", config.http_addr);

    serve(
        listener,
        app,
        config.grpc_addr,
        EventServiceImpl::new(service),
    )
    .await?;

    Ok(())
}
