//! Integration tests for the color teller router.

mod common;

use axum::http::StatusCode;
use colorapp::faults::{FaultInjector, RANDOM_FAILURE_MESSAGE, RANDOM_SUCCESS_MESSAGE};
use colorapp::teller::{create_router, TellerState};
use common::{body_string, get};
use std::sync::Arc;

fn teller_app(color: &str) -> axum::Router {
    create_router(Arc::new(TellerState::new(color)))
}

#[tokio::test]
async fn test_root_answers_configured_color() {
    let app = teller_app("blue");

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "blue");
}

#[tokio::test]
async fn test_ping_is_empty_ok() {
    let app = teller_app("blue");

    let response = get(&app, "/ping").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.is_empty());
}

#[tokio::test]
async fn test_retry_test_fails_about_half_the_time() {
    let state = TellerState::new("blue").with_faults(FaultInjector::seeded(99));
    let app = create_router(Arc::new(state));

    let mut failures = 0;
    for _ in 0..1000 {
        let response = get(&app, "/retryTest").await;
        match response.status() {
            StatusCode::INTERNAL_SERVER_ERROR => {
                assert_eq!(body_string(response).await, RANDOM_FAILURE_MESSAGE);
                failures += 1;
            }
            StatusCode::OK => {
                assert_eq!(body_string(response).await, RANDOM_SUCCESS_MESSAGE);
            }
            other => panic!("Unexpected status {}", other),
        }
    }

    assert!((400..=600).contains(&failures), "failures = {}", failures);
}

#[tokio::test]
async fn test_any_other_path_answers_color() {
    let app = teller_app("blue");

    for uri in ["/color", "/some/nested/path", "/ping/extra"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::OK, "uri = {}", uri);
        assert_eq!(body_string(response).await, "blue");
    }
}
