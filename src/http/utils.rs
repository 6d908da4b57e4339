use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use hyper::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN};
use hyper::HeaderMap;
use tracing::{info, error};


pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_PREFLIGHT_METHODS: &str = "GET,POST,DELETE,OPTIONS";
pub const CORS_ACTUAL_METHODS: &str = "GET,POST,OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type,Accept";

pub fn cors_headers(headers: &mut HeaderMap, allow_methods: Option<&'static str>) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(CORS_ALLOW_ORIGIN));
    if let Some(methods) = allow_methods {
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(methods));
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(CORS_ALLOW_HEADERS));
    }
}

/// First occurrence wins, like URLSearchParams.get
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    url::form_urlencoded::parse(query.unwrap_or("").as_bytes())
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.into_owned())
}

pub async fn log_requests<B>(req: Request<B>, next: Next<B>) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    info!("\n--- HTTP {} {} starts ---\n", method, path);
    let t0 = std::time::Instant::now();
    let response = next.run(req).await;
    let status = response.status();
    if status.is_server_error() {
        error!("{} {} returning \"{}\" after {}ms", method, path, status, t0.elapsed().as_millis());
    } else {
        info!("{} {} completed {} {}ms", method, path, status, t0.elapsed().as_millis());
    }
    response
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param() {
        let q = Some("session=abc&q=outline%3A%20AI&q=second&empty=");
        assert_eq!(query_param(q, "session"), Some("abc".to_string()));
        assert_eq!(query_param(q, "q"), Some("outline: AI".to_string()));
        assert_eq!(query_param(q, "empty"), Some(String::new()));
        assert_eq!(query_param(q, "missing"), None);
        assert_eq!(query_param(None, "q"), None);
        assert_eq!(query_param(Some("q=a+b"), "q"), Some("a b".to_string()));
    }

    #[test]
    fn test_cors_headers() {
        let mut headers = HeaderMap::new();
        cors_headers(&mut headers, None);
        assert_eq!(headers.len(), 1);
        cors_headers(&mut headers, Some(CORS_PREFLIGHT_METHODS));
        assert_eq!(headers.get(ACCESS_CONTROL_ALLOW_METHODS).unwrap(), "GET,POST,DELETE,OPTIONS");
        assert_eq!(headers.get(ACCESS_CONTROL_ALLOW_HEADERS).unwrap(), "Content-Type,Accept");
    }
}
