use std::error::Error;
use std::fmt;

use axum::Json;
use axum::response::IntoResponse;
use hyper::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use hyper::StatusCode;
use serde_json::json;
use tracing::error;


#[derive(Debug, Clone)]
pub struct ScratchError {
    pub status_code: StatusCode,
    pub message: String,
}

impl IntoResponse for ScratchError {
    fn into_response(self) -> axum::response::Response {
        error!("client will see {} {}", self.status_code, self.message);
        let payload = json!({
            "error": self.message,
        });
        (self.status_code, [(ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(payload)).into_response()
    }
}

impl Error for ScratchError {}
impl fmt::Display for ScratchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status_code, self.message)
    }
}

impl ScratchError {
    pub fn new(status_code: StatusCode, message: String) -> Self {
        ScratchError {
            status_code,
            message,
        }
    }

    pub fn internal(message: String) -> Self {
        ScratchError::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

pub trait MapErrToString<T> {
    /// Same as .map_err(|e| format!("{} {}", pref, e))
    fn map_err_with_prefix<P: std::fmt::Display>(self, pref: P) -> Result<T, String>;
}

impl<T, E: std::fmt::Display> MapErrToString<T> for Result<T, E> {
    fn map_err_with_prefix<P: std::fmt::Display>(self, pref: P) -> Result<T, String> {
        self.map_err(|e| format!("{pref} {e}"))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_body_has_error_field() {
        let err = ScratchError::internal("AI returned empty response".to_string());
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        let bytes = hyper::body::to_bytes(resp.into_body()).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v, json!({"error": "AI returned empty response"}));
    }

    #[test]
    fn test_map_err_with_prefix() {
        let r: Result<(), String> = Err("boom".to_string());
        assert_eq!(r.map_err_with_prefix("kv put:"), Err("kv put: boom".to_string()));
    }
}
