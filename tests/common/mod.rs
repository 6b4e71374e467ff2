#![allow(dead_code)]

use std::sync::{Arc, Once};
use std::time::{SystemTime, UNIX_EPOCH};

use dc_registry::config::{AppConfig, AuthConfig};
use dc_registry::models::{AppState, HealthState};
use dc_registry::services::jwt::Authorization;
use dc_registry::services::{DataCenterService, MemoryDataCenterService};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const JWT_SECRET: &str = "integration-test-secret";
pub const WRITE_SCOPE: &str = "DATA-CENTER.WRITE";
pub const READ_SCOPE: &str = "DATA-CENTER.READ";

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("dc_registry=debug")
            .with_test_writer()
            .init();
    });
}

/// A running application plus handles on its shared state.
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub health: Arc<HealthState>,
    pub store: Arc<MemoryDataCenterService>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Registers a data center and returns the stored record.
    pub async fn create(&self, payload: &Value, bearer: Option<&str>) -> reqwest::Response {
        let mut request = self.client.post(self.url("/data-centers")).json(payload);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }
}

fn test_config(auth: AuthConfig) -> AppConfig {
    AppConfig {
        auth,
        service_version: "1.2.3".to_string(),
        service_commit_id: "abc123".to_string(),
        ..AppConfig::default()
    }
}

async fn spawn_with_config(config: AppConfig) -> TestApp {
    init_tracing_once();

    let store = Arc::new(MemoryDataCenterService::new());
    let service: Arc<dyn DataCenterService> = store.clone();
    let health = Arc::new(HealthState::new());
    let authorization =
        Authorization::from_config(&config.auth).expect("Failed to configure authorization");
    let state = Arc::new(AppState::new(
        service,
        Arc::clone(&health),
        authorization,
        config,
    ));

    // Randomly choose an available port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");

    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let app = dc_registry::app(state);
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{port}"),
        client: reqwest::Client::new(),
        health,
        store,
    }
}

/// Spawns the application in insecure mode (authorization disabled).
pub async fn spawn_app() -> TestApp {
    spawn_with_config(test_config(AuthConfig::disabled())).await
}

/// Spawns the application with HS256 token verification enabled.
pub async fn spawn_app_with_auth() -> TestApp {
    spawn_with_config(test_config(AuthConfig {
        enabled: true,
        jwt_key: Some(JWT_SECRET.to_string()),
        jwt_key_url: None,
        write_scope: WRITE_SCOPE.to_string(),
    }))
    .await
}

/// Spawns the application with a custom documentation mount.
pub async fn spawn_app_with_docs_at(path: &str) -> TestApp {
    spawn_with_config(AppConfig {
        openapi_path: path.to_string(),
        ..test_config(AuthConfig::disabled())
    })
    .await
}

/// Signs a token granting `scopes` with the test secret.
pub fn token(scopes: &[&str]) -> String {
    let exp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
        + 600;
    encode(
        &Header::default(),
        &json!({"sub": "integration-tester", "exp": exp, "context": {"scope": scopes}}),
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn data_center(center_id: &str, country: &str, center_type: &str) -> Value {
    json!({
        "centerId": center_id,
        "country": country,
        "name": format!("{center_id} Data Center"),
        "type": center_type,
        "organization": "Ontario Institute for Cancer Research",
        "email": "dcc@example.org",
        "url": "https://example.org",
        "songUrl": "https://song.example.org",
        "scoreUrl": "https://score.example.org"
    })
}
