//! Single-flight refresh behavior against a counting stub server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};

use stepflow_client::ApiClient;

#[derive(Clone)]
struct StubState {
    refresh_calls: Arc<AtomicUsize>,
}

/// 401 until the refreshed cookie is present.
async fn protected(headers: HeaderMap) -> Response {
    let authenticated = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|cookies| cookies.contains("accessToken=fresh"));

    if authenticated {
        Json(serde_json::json!({ "ok": true })).into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

/// Counts invocations and hands out the accepted cookie.
async fn refresh(State(state): State<StubState>) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);

    let mut response = Json(serde_json::json!({ "newAccessToken": "fresh" })).into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        "accessToken=fresh; Path=/; HttpOnly".parse().unwrap(),
    );
    response
}

async fn spawn_stub(state: StubState) -> SocketAddr {
    let app = axum::Router::new()
        .route("/protected", get(protected))
        .route("/auth/refresh", post(refresh))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_concurrent_unauthorized_calls_trigger_one_refresh() {
    let refresh_calls = Arc::new(AtomicUsize::new(0));
    let addr = spawn_stub(StubState {
        refresh_calls: Arc::clone(&refresh_calls),
    })
    .await;

    let client = Arc::new(ApiClient::new(format!("http://{addr}")).unwrap());

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let client = Arc::clone(&client);
        tasks.push(tokio::spawn(async move {
            client.get_json::<serde_json::Value>("/protected").await
        }));
    }

    for task in tasks {
        let body = task.await.unwrap().expect("request should succeed");
        assert_eq!(body["ok"], true);
    }

    assert_eq!(
        refresh_calls.load(Ordering::SeqCst),
        1,
        "all concurrent callers must share one refresh"
    );
}

#[tokio::test]
async fn test_failed_refresh_surfaces_unauthorized() {
    // A stub with no refresh route: the refresh call itself 404s.
    let app = axum::Router::new().route("/protected", get(protected));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = ApiClient::new(format!("http://{addr}")).unwrap();
    let err = client
        .get_json::<serde_json::Value>("/protected")
        .await
        .unwrap_err();

    assert!(matches!(err, stepflow_client::ClientError::Unauthorized));
}
