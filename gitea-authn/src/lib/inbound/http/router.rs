use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::health::health;
use crate::GiteaAuthenticator;

#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<GiteaAuthenticator>,
}

pub fn create_router(authenticator: Arc<GiteaAuthenticator>) -> Router {
    let state = AppState { authenticator };

    // Headers are not recorded: request bodies and headers may carry credentials.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/api/auth/authenticate", post(authenticate))
        .route("/health", get(health))
        .layer(trace_layer)
        .with_state(state)
}
