use axum::Extension;
use hyper::{Body, Method, Response, Uri};
use tracing::info;

use crate::custom_error::ScratchError;
use crate::dispatcher::generate_for_session;
use crate::generation_mode::{GenerationMode, finalize_instruction};
use crate::global_context::SharedGlobalContext;
use crate::http::routers::preflight_response;
use crate::http::utils::{CORS_ACTUAL_METHODS, cors_headers, query_param};


const DEFAULT_SESSION: &str = "default";

pub async fn handle_generate(
    Extension(gcx): Extension<SharedGlobalContext>,
    method: Method,
    uri: Uri,
) -> Result<Response<Body>, ScratchError> {
    if method == Method::OPTIONS {
        return Ok(preflight_response());
    }
    let session_id = query_param(uri.query(), "session")
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SESSION.to_string());
    let q = query_param(uri.query(), "q");

    let generation = gcx.read().await.generation.clone();
    let mode = GenerationMode::classify(q.as_deref(), &generation.topics, &mut rand::thread_rng());
    info!("session {:?} mode {}", session_id, mode.name());
    let instruction = finalize_instruction(&mode.instruction(&generation.templates), &generation.strict_suffix);

    let text = generate_for_session(gcx.clone(), &session_id, instruction).await?;

    let mut response = Response::new(Body::from(text));
    response.headers_mut().insert(hyper::header::CONTENT_TYPE, hyper::header::HeaderValue::from_static("text/plain"));
    cors_headers(response.headers_mut(), Some(CORS_ACTUAL_METHODS));
    Ok(response)
}
