//! HTTP route handlers for the review server.

pub mod reviews;

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::HealthResponse;
use crate::state::ServerState;

/// Health check endpoint. Always 200; a failed load shows up in the body.
pub async fn health(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    Json(state.health())
}
