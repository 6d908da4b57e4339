use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::call_validation::{ChatMessage, SamplingParameters};
use crate::forward_to_openai_endpoint::OpenAiStyleEndpoint;
use crate::forward_to_workers_ai::CloudflareWorkersAi;
use crate::global_context::CommandLine;


#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Whatever the provider answered, parsed as JSON when possible.
    /// Pulling the text out of it is `model_reply::extract_reply_text`'s job.
    async fn run(
        &self,
        model: &str,
        messages: &[ChatMessage],
        sampling: &SamplingParameters,
    ) -> Result<serde_json::Value, String>;
}

pub fn backend_from_cmdline(
    cmdline: &CommandLine,
    client: reqwest::Client,
) -> Result<Arc<dyn InferenceBackend>, String> {
    match cmdline.endpoint_style.to_lowercase().as_str() {
        "cloudflare" => {
            if cmdline.account_id.is_empty() {
                return Err("cloudflare endpoint style needs --account-id".to_string());
            }
            Ok(Arc::new(CloudflareWorkersAi::new(
                client,
                &cmdline.api_base_url,
                &cmdline.account_id,
                &cmdline.api_key,
            )))
        }
        "openai" => Ok(Arc::new(OpenAiStyleEndpoint::new(
            client,
            &cmdline.openai_endpoint,
            &cmdline.api_key,
        ))),
        _ => {
            error!("Invalid endpoint_style: {}", cmdline.endpoint_style);
            Err(format!("Invalid endpoint_style: {}", cmdline.endpoint_style))
        }
    }
}


/// Parses a provider reply body, falling back to a JSON string for plain text bodies.
pub fn parse_reply_body(text: &str) -> serde_json::Value {
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}
