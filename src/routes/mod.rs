use std::convert::Infallible;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::error;

use crate::error::InterceptError;
use crate::middleware::{LoggingInterceptor, TrafficDumpLayer};
use crate::sink::cause_chain;
use crate::AppState;

pub mod echo;
pub mod health;

/// Builds the demo router with traffic dumps on every route.
pub fn create_app(state: AppState, interceptor: LoggingInterceptor) -> Router {
    let timeout = Duration::from_secs(state.config.server.timeout_seconds);

    Router::new()
        .route("/health", get(health::health))
        .route("/echo", get(echo::echo))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(HandleErrorLayer::new(handle_dump_error))
                .layer(TrafficDumpLayer::new(interceptor))
                .layer(TimeoutLayer::new(timeout)),
        )
        .with_state(state)
}

async fn handle_dump_error(err: InterceptError<Infallible>) -> (StatusCode, String) {
    error!(error = %err, chain = ?cause_chain(&err), "Traffic dump failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "traffic dump failed".to_string(),
    )
}
