//! Health check endpoints.

use axum::extract::State;

use crate::error::Result;
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Asks the lead desk whether it can take submissions; a failure is a 502.
pub async fn readiness(State(state): State<AppState>) -> Result<&'static str> {
    state.leads().check().await?;
    Ok("ready")
}
