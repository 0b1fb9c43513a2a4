//! Fault-injection handlers shared by the gateway and the color teller.

use crate::faults::{
    FaultInjector, FaultOutcome, DELAYED_PING_MESSAGE, RANDOM_FAILURE_MESSAGE,
    RANDOM_SUCCESS_MESSAGE,
};
use axum::http::StatusCode;
use std::time::Duration;

/// Fails roughly half of the time with a 500.
pub fn random_fault(injector: &FaultInjector) -> (StatusCode, &'static str) {
    match injector.roll() {
        FaultOutcome::Failure => {
            tracing::debug!("Injecting random failure");
            (StatusCode::INTERNAL_SERVER_ERROR, RANDOM_FAILURE_MESSAGE)
        }
        FaultOutcome::Success => (StatusCode::OK, RANDOM_SUCCESS_MESSAGE),
    }
}

/// Waits `delay` before answering. Only this request's task sleeps.
pub async fn delayed_ping(delay: Duration) -> &'static str {
    tracing::info!(delay_ms = delay.as_millis() as u64, "Delaying ping response");
    tokio::time::sleep(delay).await;
    DELAYED_PING_MESSAGE
}

/// Liveness check: 200 with an empty body.
pub async fn simple_ping() -> StatusCode {
    tracing::debug!("Ping requested, responding with HTTP 200");
    StatusCode::OK
}
