use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde_json::json;
use tracing::info;

use crate::call_validation::{ChatMessage, SamplingParameters};
use crate::custom_error::MapErrToString;
use crate::inference::{InferenceBackend, parse_reply_body};


/// Any chat-completions style endpoint (OpenAI, vLLM, llama.cpp server, ...).
pub struct OpenAiStyleEndpoint {
    client: reqwest::Client,
    endpoint: String,
    bearer: String,
}

impl OpenAiStyleEndpoint {
    pub fn new(client: reqwest::Client, endpoint: &str, bearer: &str) -> Self {
        OpenAiStyleEndpoint {
            client,
            endpoint: endpoint.to_string(),
            bearer: bearer.to_string(),
        }
    }
}

/// `{"choices": [{"message": {"content": "..."}}]}` becomes `{"response": "..."}`,
/// anything else is passed along untouched.
fn normalize_choices(reply: serde_json::Value) -> serde_json::Value {
    match reply.pointer("/choices/0/message/content").and_then(|c| c.as_str()) {
        Some(content) => json!({"response": content}),
        None => reply,
    }
}

#[async_trait]
impl InferenceBackend for OpenAiStyleEndpoint {
    async fn run(
        &self,
        model: &str,
        messages: &[ChatMessage],
        sampling: &SamplingParameters,
    ) -> Result<serde_json::Value, String> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !self.bearer.is_empty() {
            let value = HeaderValue::from_str(format!("Bearer {}", self.bearer).as_str())
                .map_err_with_prefix("bad api key:")?;
            headers.insert(AUTHORIZATION, value);
        }
        let data = json!({
            "model": model,
            "stream": false,
            "messages": messages,
            "temperature": sampling.temperature,
            "max_tokens": sampling.max_tokens,
        });
        let resp = self.client.post(&self.endpoint)
            .headers(headers)
            .body(data.to_string())
            .send()
            .await
            .map_err(|e| format!("{}", e))?;
        let status_code = resp.status().as_u16();
        let response_txt = resp.text().await.map_err(|e|
            format!("reading from socket {}: {}", self.endpoint, e)
        )?;
        if status_code != 200 {
            info!("forward_to_openai_style_endpoint: {} {}\n{}", self.endpoint, status_code, response_txt);
            return Err(format!("{} status={} text {}", self.endpoint, status_code, response_txt));
        }
        Ok(normalize_choices(parse_reply_body(&response_txt)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::call_validation::ChatRole;

    #[test]
    fn test_normalize_choices() {
        let reply = json!({"id": "x", "choices": [{"index": 0, "message": {"role": "assistant", "content": "{\"t\":2}"}}]});
        assert_eq!(normalize_choices(reply), json!({"response": "{\"t\":2}"}));
        let other = json!({"weird": true});
        assert_eq!(normalize_choices(other.clone()), other);
    }

    #[tokio::test]
    async fn test_run_against_chat_completions() {
        let mut server = mockito::Server::new_async().await;
        let m = server.mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(mockito::Matcher::PartialJson(json!({"model": "gpt-4o-mini", "stream": false, "max_tokens": 4096})))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#)
            .create_async().await;
        let endpoint = format!("{}/v1/chat/completions", server.url());
        let backend = OpenAiStyleEndpoint::new(reqwest::Client::new(), &endpoint, "sk-test");
        let messages = vec![ChatMessage::new(ChatRole::User, "hi".to_string())];
        let reply = backend.run("gpt-4o-mini", &messages, &SamplingParameters::default()).await.unwrap();
        assert_eq!(reply, json!({"response": "hello"}));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_run_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _m = server.mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body(r#"{"error":{"message":"overloaded"}}"#)
            .create_async().await;
        let endpoint = format!("{}/v1/chat/completions", server.url());
        let backend = OpenAiStyleEndpoint::new(reqwest::Client::new(), &endpoint, "");
        let messages = vec![ChatMessage::new(ChatRole::User, "hi".to_string())];
        let err = backend.run("gpt-4o-mini", &messages, &SamplingParameters::default()).await.unwrap_err();
        assert!(err.contains("status=500"));
        assert!(err.contains("overloaded"));
    }
}
