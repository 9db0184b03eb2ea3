use crate::app_state::AppState;
use crate::domain::GREETING;
use axum::extract::State;
use std::time::Instant;

/// Handler for `GET /`.
///
/// axum also routes HEAD here. Both are counted under `method="GET"` so the
/// counter total for `/` always equals the latency sample count for `/`.
#[tracing::instrument(skip_all)]
pub async fn root_handler(State(state): State<AppState>) -> &'static str {
    // ---
    let start = Instant::now();
    state.metrics().record_http_request(start, "GET", "/");

    GREETING
}
