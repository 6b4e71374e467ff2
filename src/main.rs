use std::net::SocketAddr;
use std::sync::Arc;

use dc_registry::config::AppConfig;
use dc_registry::models::{AppState, HealthState};
use dc_registry::services::db_monitor::spawn_db_monitor;
use dc_registry::services::jwt::Authorization;
use dc_registry::{app, build_service};
use tokio::net::TcpListener;
use tracing::info;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dc_registry=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(
            "dc-registry".into(),
            std::io::stdout,
        ))
        .init();
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env().expect("Failed to load configuration");
    config.log_config();

    let service = build_service(&config)
        .await
        .expect("Failed to initialize data center store");
    let health = Arc::new(HealthState::new());
    spawn_db_monitor(
        Arc::clone(&service),
        Arc::clone(&health),
        config.db_monitor_interval,
    );

    let authorization =
        Authorization::from_config(&config.auth).expect("Failed to configure authorization");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let state = Arc::new(AppState::new(service, health, authorization, config));

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    info!(%addr, "Server starting");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}
