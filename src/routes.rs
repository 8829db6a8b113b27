mod health;
mod subscribe;

use crate::{startup::AppState, telemetry::RequestIdMakeSpan};
use axum::{
    Router,
    http::{StatusCode, Uri},
    routing::{get, post},
};
use health::health_check;
use subscribe::subscribe;
use tower::ServiceBuilder;
use tower_http::{ServiceBuilderExt, request_id::MakeRequestUuid, trace::TraceLayer};
use tracing::warn;

// re-exports
pub use subscribe::SubscribeError;

pub fn get_router(app_state: AppState) -> Router {
    let middlewares = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(TraceLayer::new_for_http().make_span_with(RequestIdMakeSpan))
        .propagate_x_request_id();

    Router::new()
        .route("/health", get(health_check))
        .route("/api/subscribe", post(subscribe))
        .layer(middlewares)
        .fallback(handle_404)
        .with_state(app_state.into())
}

async fn handle_404(uri: Uri) -> StatusCode {
    warn!("Route not found: {}", uri);
    StatusCode::NOT_FOUND
}
