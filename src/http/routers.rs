use axum::Router;
use axum::middleware;
use axum::routing::any;
use hyper::{Body, Response, StatusCode};

use crate::http::routers::generate::handle_generate;
use crate::http::routers::health::handle_health;
use crate::http::utils::{CORS_PREFLIGHT_METHODS, cors_headers, log_requests};

pub mod generate;
pub mod health;


pub fn preflight_response() -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    cors_headers(response.headers_mut(), Some(CORS_PREFLIGHT_METHODS));
    response
}

/// `/health` checks the stores, every other path and method generates.
pub fn make_blog_http_server() -> Router {
    Router::new()
        .route("/health", any(handle_health))
        .fallback(handle_generate)
        .layer(middleware::from_fn(log_requests))
}
