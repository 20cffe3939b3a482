//! Review listing handler.

use std::sync::Arc;

use axum::{extract::State, Json};
use reviewhub_core::ReviewRecord;
use tracing::{debug, error};

use crate::error::AppError;
use crate::state::ServerState;

/// GET /api/reviews - All aggregated reviews, in load order.
pub async fn list(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Arc<[ReviewRecord]>>, AppError> {
    let reviews = state.reviews().map_err(|e| {
        error!("Serving startup error: {}", e);
        AppError::from(e.clone())
    })?;

    debug!("Returning {} reviews", reviews.len());
    Ok(Json(Arc::clone(reviews)))
}
