use axum::Extension;
use hyper::{Body, Method, Response, StatusCode};
use serde_json::json;
use tracing::error;

use crate::global_context::SharedGlobalContext;
use crate::http::routers::preflight_response;
use crate::http::utils::cors_headers;


async fn _check_stores(gcx: SharedGlobalContext) -> Result<(), String> {
    let (chat_history, files) = {
        let gcx_locked = gcx.read().await;
        (gcx_locked.chat_history.clone(), gcx_locked.files.clone())
    };
    chat_history.get("health-check").await?;
    files.list(Some(1)).await?;
    Ok(())
}

fn _json_response(status: StatusCode, body: serde_json::Value) -> Response<Body> {
    let mut response = Response::new(Body::from(body.to_string()));
    *response.status_mut() = status;
    response.headers_mut().insert(hyper::header::CONTENT_TYPE, hyper::header::HeaderValue::from_static("application/json"));
    cors_headers(response.headers_mut(), None);
    response
}

pub async fn handle_health(
    Extension(gcx): Extension<SharedGlobalContext>,
    method: Method,
) -> Response<Body> {
    if method == Method::OPTIONS {
        return preflight_response();
    }
    match _check_stores(gcx).await {
        Ok(()) => _json_response(StatusCode::OK, json!({"status": "OK", "kv": "connected"})),
        Err(e) => {
            error!("health check failed: {}", e);
            _json_response(StatusCode::INTERNAL_SERVER_ERROR, json!({"status": "ERROR", "message": e}))
        }
    }
}
