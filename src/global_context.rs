use std::sync::Arc;

use structopt::StructOpt;
use tokio::sync::RwLock as ARwLock;
use tracing::{info, warn};

use crate::custom_error::MapErrToString;
use crate::inference::{InferenceBackend, backend_from_cmdline};
use crate::kv_cloudflare::CloudflareKv;
use crate::kv_store::{KvStore, MemoryKv};
use crate::yaml_configs::generation_loader::{GenerationConfig, load_generation_config};


#[derive(Debug, StructOpt, Clone)]
pub struct CommandLine {
    #[structopt(long, help="Send logs to stderr, as opposed to --logs-dir, so it's easier to debug.")]
    pub logs_stderr: bool,
    #[structopt(long, default_value="", help="Send logs to a file, no rotation.")]
    pub logs_to_file: String,
    #[structopt(long, default_value="logs", help="Directory for daily rotated logs.")]
    pub logs_dir: String,
    #[structopt(long, short="v", help="Makes DEBUG log level visible.")]
    pub verbose: bool,
    #[structopt(long, short="p", env="PORT", default_value="8787", help="Bind 127.0.0.1:<port> to listen for HTTP requests.")]
    pub http_port: u16,
    #[structopt(long, help="Bind 0.0.0.0 instead of 127.0.0.1.")]
    pub inside_container: bool,
    #[structopt(long, help="Trust self-signed SSL certificates")]
    pub insecure: bool,
    #[structopt(long, env="ENDPOINT_STYLE", default_value="cloudflare", help="Inference API flavor: cloudflare or openai.")]
    pub endpoint_style: String,
    #[structopt(long, env="CLOUDFLARE_API_BASE", default_value="https://api.cloudflare.com/client/v4", help="Cloudflare REST API base, used for Workers AI and KV.")]
    pub api_base_url: String,
    #[structopt(long, env="CLOUDFLARE_ACCOUNT_ID", default_value="", help="Cloudflare account id.")]
    pub account_id: String,
    #[structopt(long, short="k", env="CLOUDFLARE_API_TOKEN", default_value="", hide_env_values=true, help="The API key to authenticate your requests, will appear in HTTP requests this binary makes.")]
    pub api_key: String,
    #[structopt(long, env="OPENAI_ENDPOINT", default_value="https://api.openai.com/v1/chat/completions", help="Chat completions URL for --endpoint-style openai.")]
    pub openai_endpoint: String,
    #[structopt(long, env="MODEL", default_value="@cf/meta/llama-3.1-70b-instruct", help="Model to run.")]
    pub model: String,
    #[structopt(long, env="CHAT_HISTORY_NAMESPACE", default_value="", help="KV namespace id for chat history, empty keeps history in memory.")]
    pub chat_history_namespace: String,
    #[structopt(long, env="FILES_NAMESPACE", default_value="", help="KV namespace id for files, empty keeps files in memory.")]
    pub files_namespace: String,
    #[structopt(long, env="GENERATION_YAML", default_value="", help="YAML merged over the compiled-in topics, prompts and limits.")]
    pub generation_yaml: String,
}

pub struct GlobalContext {
    pub cmdline: CommandLine,
    pub generation: Arc<GenerationConfig>,
    pub chat_history: Arc<dyn KvStore>,
    pub files: Arc<dyn KvStore>,
    pub inference: Arc<dyn InferenceBackend>,
}

pub type SharedGlobalContext = Arc<ARwLock<GlobalContext>>;

fn _make_kv(cmdline: &CommandLine, client: &reqwest::Client, namespace_id: &str, what: &str) -> Arc<dyn KvStore> {
    if namespace_id.is_empty() {
        warn!("no KV namespace for {}, keeping it in memory, it will be lost on restart", what);
        return Arc::new(MemoryKv::new());
    }
    info!("{} lives in KV namespace {}", what, namespace_id);
    Arc::new(CloudflareKv::new(
        client.clone(),
        &cmdline.api_base_url,
        &cmdline.account_id,
        namespace_id,
        &cmdline.api_key,
    ))
}

pub async fn create_global_context(cmdline: CommandLine) -> Result<SharedGlobalContext, String> {
    let mut http_client_builder = reqwest::Client::builder();
    if cmdline.insecure {
        http_client_builder = http_client_builder.danger_accept_invalid_certs(true)
    }
    let http_client = http_client_builder.build().map_err_with_prefix("http client:")?;
    let generation = load_generation_config(&cmdline.generation_yaml).await?;
    let inference = backend_from_cmdline(&cmdline, http_client.clone())?;
    let chat_history = _make_kv(&cmdline, &http_client, &cmdline.chat_history_namespace, "chat history");
    let files = _make_kv(&cmdline, &http_client, &cmdline.files_namespace, "files");
    let cx = GlobalContext {
        cmdline,
        generation: Arc::new(generation),
        chat_history,
        files,
        inference,
    };
    Ok(Arc::new(ARwLock::new(cx)))
}
