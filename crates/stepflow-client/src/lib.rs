//! # stepflow-client
//!
//! HTTP client for the Stepflow API.
//!
//! Auth cookies are carried by reqwest's cookie store. When a protected call
//! comes back 401, concurrent callers coordinate so that exactly one
//! `/auth/refresh` request goes out; the rest wait for its outcome and then
//! retry once with the refreshed cookie.

use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

/// Errors surfaced by the API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The session could not be established or refreshed.
    #[error("Authentication required")]
    Unauthorized,
    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },
}

/// Cookie-authenticated client for the Stepflow API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    /// Guards the refresh call; only one caller refreshes at a time.
    refresh_lock: Mutex<()>,
    /// Bumped after every successful refresh. A caller that observed an
    /// older value while failing knows someone else already refreshed.
    refresh_epoch: AtomicU64,
}

impl ApiClient {
    /// Create a client against the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            refresh_lock: Mutex::new(()),
            refresh_epoch: AtomicU64::new(0),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register a new account.
    pub async fn signup(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/auth/signup"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;

        Self::expect_success(response).await
    }

    /// Log in; the auth cookies land in the client's cookie store.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;

        Self::expect_success(response).await
    }

    /// Log out and drop the server-side session.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.http.post(self.url("/auth/logout")).send().await?;
        Self::expect_success(response).await
    }

    /// GET a protected resource, refreshing the session once on 401.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let epoch = self.refresh_epoch.load(Ordering::Acquire);
        let response = self.http.get(self.url(path)).send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.ensure_refreshed(epoch).await?;
            let retry = self.http.get(self.url(path)).send().await?;
            return Self::parse(retry).await;
        }

        Self::parse(response).await
    }

    /// POST to a protected resource, refreshing the session once on 401.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let epoch = self.refresh_epoch.load(Ordering::Acquire);
        let response = self.http.post(self.url(path)).json(body).send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.ensure_refreshed(epoch).await?;
            let retry = self.http.post(self.url(path)).json(body).send().await?;
            return Self::parse(retry).await;
        }

        Self::parse(response).await
    }

    /// Single-flight refresh coordination.
    ///
    /// `seen_epoch` is the epoch the caller observed before its request
    /// failed. If the epoch moved while waiting for the lock, another caller
    /// already refreshed and there is nothing left to do.
    async fn ensure_refreshed(&self, seen_epoch: u64) -> Result<(), ClientError> {
        let _flight = self.refresh_lock.lock().await;

        if self.refresh_epoch.load(Ordering::Acquire) != seen_epoch {
            debug!("Session already refreshed by a concurrent caller");
            return Ok(());
        }

        let response = self.http.post(self.url("/auth/refresh")).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Unauthorized);
        }

        self.refresh_epoch.fetch_add(1, Ordering::Release);
        debug!("Session refreshed");
        Ok(())
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json().await?)
    }

    async fn expect_success(response: reqwest::Response) -> Result<(), ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}
