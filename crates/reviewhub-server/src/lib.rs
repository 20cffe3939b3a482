//! HTTP façade over the aggregated review set.
//!
//! | Route | Response |
//! |---|---|
//! | `GET /` | landing page (`index.html` from the static directory) |
//! | `GET /static/*` | page assets |
//! | `GET /api/reviews` | JSON array of reviews, or 500 with `{error, details}` |
//! | `GET /health` | `{status, reviews_count, startup_error}`, always 200 |

pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use state::{LoadOutcome, ServerState};

/// Builds the application router around a loaded state snapshot.
pub fn router(state: Arc<ServerState>, static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/api/reviews", get(handlers::reviews::list))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors)
        .with_state(state)
}
