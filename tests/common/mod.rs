//! Shared test utilities for colorapp integration tests.
//!
//! Provides helpers for building gateway and teller routers, stub color
//! tellers, and reading responses.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use colorapp::api::{create_router, GatewayState};
use colorapp::downstream::{build_http_client, ColorTellerClient};
use colorapp::history::ColorHistory;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Service;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Stub Color Tellers
// =============================================================================

/// Start a stub teller that answers `GET /` with `body`.
pub async fn stub_teller(body: &str) -> MockServer {
    let server = MockServer::start().await;
    answer_with(&server, body).await;
    server
}

/// Replace whatever the stub answered before with `body`.
pub async fn answer_with(server: &MockServer, body: &str) {
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

// =============================================================================
// Gateway Builders
// =============================================================================

/// Build gateway state pointed at `endpoint` with a fresh history.
pub fn gateway_state(endpoint: &str, capacity: usize) -> GatewayState {
    let http = build_http_client(Duration::from_secs(5)).unwrap();
    let client = ColorTellerClient::new(http.clone(), Some(endpoint)).unwrap();
    GatewayState::new(client, http, Arc::new(ColorHistory::new(capacity)))
        .with_ping_delay(Duration::from_millis(50))
}

/// Build a gateway router and keep a handle on its history.
pub fn gateway_app(endpoint: &str, capacity: usize) -> (Router, Arc<ColorHistory>) {
    let state = gateway_state(endpoint, capacity);
    let history = Arc::clone(&state.history);
    (create_router(Arc::new(state)), history)
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Send `GET uri` through a clone of `app`.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().call(request).await.unwrap()
}

/// Collect a response body into a string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

// =============================================================================
// Live Servers
// =============================================================================

/// Serve `app` on an ephemeral localhost port.
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
