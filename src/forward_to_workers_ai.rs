use async_trait::async_trait;
use serde_json::json;
use tracing::info;
use url::Url;

use crate::call_validation::{ChatMessage, SamplingParameters};
use crate::custom_error::MapErrToString;
use crate::inference::{InferenceBackend, parse_reply_body};


/// Workers AI REST endpoint: `POST {base}/accounts/{account}/ai/run/{model}`.
/// The answer usually looks like `{"result": {"response": "..."}, "success": true}`.
pub struct CloudflareWorkersAi {
    client: reqwest::Client,
    api_base_url: String,
    account_id: String,
    api_token: String,
}

impl CloudflareWorkersAi {
    pub fn new(client: reqwest::Client, api_base_url: &str, account_id: &str, api_token: &str) -> Self {
        CloudflareWorkersAi {
            client,
            api_base_url: api_base_url.to_string(),
            account_id: account_id.to_string(),
            api_token: api_token.to_string(),
        }
    }

    fn _run_url(&self, model: &str) -> Result<Url, String> {
        let mut url = Url::parse(&self.api_base_url).map_err_with_prefix("bad api base url:")?;
        {
            let mut segments = url.path_segments_mut()
                .map_err(|_| format!("api base url {} cannot have a path", self.api_base_url))?;
            segments.pop_if_empty().extend(&["accounts", self.account_id.as_str(), "ai", "run"]);
            // model ids look like "@cf/meta/llama-3.1-70b-instruct", slashes are part of the path
            segments.extend(model.split('/'));
        }
        Ok(url)
    }
}

#[async_trait]
impl InferenceBackend for CloudflareWorkersAi {
    async fn run(
        &self,
        model: &str,
        messages: &[ChatMessage],
        sampling: &SamplingParameters,
    ) -> Result<serde_json::Value, String> {
        let url = self._run_url(model)?;
        let data = json!({
            "messages": messages,
            "temperature": sampling.temperature,
            "max_tokens": sampling.max_tokens,
        });
        let mut req = self.client.post(url.clone()).json(&data);
        if !self.api_token.is_empty() {
            req = req.bearer_auth(&self.api_token);
        }
        let resp = req.send().await.map_err(|e| format!("{}", e))?;
        let status_code = resp.status().as_u16();
        let response_txt = resp.text().await.map_err(|e|
            format!("reading from socket {}: {}", url, e)
        )?;
        if !(200..300).contains(&status_code) {
            return Err(format!("{} status={} text {}", url, status_code, response_txt));
        }
        info!("workers ai {} replied {} bytes", model, response_txt.len());
        Ok(parse_reply_body(&response_txt))
    }
}
