//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use stepflow_api::state::AppState;
use stepflow_auth::jwt::JwtDecoder;
use stepflow_auth::password::PasswordHasher;
use stepflow_auth::session::SessionService;
use stepflow_core::config::auth::AuthConfig;
use stepflow_core::config::logging::LoggingConfig;
use stepflow_core::config::server::ServerConfig;
use stepflow_core::config::{AppConfig, DatabaseConfig};
use stepflow_database::memory::{MemoryCatalogStore, MemoryCredentialStore};
use stepflow_database::store::CredentialStore;
use stepflow_entity::user::{NewUser, Role};

/// Test application context backed by the in-memory store.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Credential store for seeding users directly.
    pub credentials: Arc<MemoryCredentialStore>,
    /// Application config used by the app.
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application.
    pub fn new() -> Self {
        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                provider: "memory".to_string(),
                ..DatabaseConfig::default()
            },
            auth: AuthConfig {
                access_token_secret: "access-secret-for-tests".to_string(),
                refresh_token_secret: "refresh-secret-for-tests".to_string(),
                ..AuthConfig::default()
            },
            logging: LoggingConfig::default(),
        };

        let credentials = Arc::new(MemoryCredentialStore::new());
        let catalog = Arc::new(MemoryCatalogStore::new());

        let sessions = Arc::new(SessionService::new(
            Arc::clone(&credentials) as Arc<dyn CredentialStore>,
            &config.auth,
        ));
        let decoder = Arc::new(JwtDecoder::new(&config.auth));

        let state = AppState {
            config: Arc::new(config.clone()),
            catalog,
            sessions,
            decoder,
        };

        Self {
            router: stepflow_api::router::build_router(state),
            credentials,
            config,
        }
    }

    /// Seed a user directly in the store and return their ID.
    pub async fn create_user(&self, username: &str, password: &str, role: Role) -> Uuid {
        let hash = PasswordHasher::new().hash(password).expect("hashing failed");
        let user = self
            .credentials
            .insert_user(&NewUser {
                username: username.to_string(),
                password_hash: hash,
                role,
            })
            .await
            .expect("failed to seed user");
        user.id
    }

    /// Log in and return the `(accessToken, refreshToken)` cookie values.
    pub async fn login(&self, username: &str, password: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/auth/login",
                Some(serde_json::json!({ "username": username, "password": password })),
                &[],
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        let access = response
            .cookie_value("accessToken")
            .expect("no accessToken cookie in login response");
        let refresh = response
            .cookie_value("refreshToken")
            .expect("no refreshToken cookie in login response");
        (access, refresh)
    }

    /// Make an HTTP request to the test app with optional cookies.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookies: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if !cookies.is_empty() {
            let cookie_header = cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, cookie_header);
        }

        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("failed to serialize body"))
            .unwrap_or_default();

        let request = builder
            .body(Body::from(body_str))
            .expect("failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("failed to send request");

        let status = response.status();
        let set_cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(String::from))
            .collect();

        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookies,
        }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body (`Null` for empty bodies).
    pub body: Value,
    /// Raw `Set-Cookie` header values.
    pub set_cookies: Vec<String>,
}

impl TestResponse {
    /// Value of the named cookie from `Set-Cookie`, if present.
    pub fn cookie_value(&self, name: &str) -> Option<String> {
        self.set_cookies.iter().find_map(|raw| {
            let (pair, _) = raw.split_once(';').unwrap_or((raw.as_str(), ""));
            let (cookie_name, value) = pair.split_once('=')?;
            (cookie_name.trim() == name).then(|| value.to_string())
        })
    }

    /// Raw `Set-Cookie` line for the named cookie.
    pub fn raw_cookie(&self, name: &str) -> Option<&String> {
        self.set_cookies
            .iter()
            .find(|raw| raw.trim_start().starts_with(&format!("{name}=")))
    }
}
